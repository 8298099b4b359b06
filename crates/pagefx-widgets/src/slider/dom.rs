#![forbid(unsafe_code)]

//! DOM-backed slider collaborators.

use pagefx_core::{Dom, NodeId, Selector};

use super::{IndicatorRenderer, ViewportPositioner};

/// Positions slides with an inline `transform: translateX(N%)`.
#[derive(Debug, Clone)]
pub struct DomPositioner<D> {
    dom: D,
}

impl<D: Dom> DomPositioner<D> {
    pub fn new(dom: D) -> Self {
        Self { dom }
    }
}

impl<D: Dom> ViewportPositioner for DomPositioner<D> {
    type Slide = NodeId;

    fn translate(&mut self, slide: &NodeId, offset: isize) {
        self.dom
            .set_style(*slide, "transform", &format!("translateX({}%)", 100 * offset));
    }
}

/// Indicator buttons inside a container element.
///
/// Each indicator is `<button class="{dot_class}" data-slide="{tag}">`; the
/// active one additionally carries `active_class`.
#[derive(Debug, Clone)]
pub struct DomIndicators<D> {
    dom: D,
    container: NodeId,
    dot_class: String,
    active_class: String,
}

/// Attribute holding an indicator's slide index.
pub const SLIDE_ATTRIBUTE: &str = "data-slide";

impl<D: Dom> DomIndicators<D> {
    pub fn new(
        dom: D,
        container: NodeId,
        dot_class: impl Into<String>,
        active_class: impl Into<String>,
    ) -> Self {
        Self {
            dom,
            container,
            dot_class: dot_class.into(),
            active_class: active_class.into(),
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    fn dot_selector(&self) -> Selector {
        Selector::element("button").with_class(self.dot_class.as_str())
    }
}

impl<D: Dom> IndicatorRenderer for DomIndicators<D> {
    type Indicator = NodeId;

    fn append(&mut self, tag: usize) -> NodeId {
        let spec = self
            .dot_selector()
            .with_attribute(SLIDE_ATTRIBUTE, tag.to_string());
        self.dom.append_element(self.container, &spec)
    }

    fn find_by_tag(&self, tag: usize) -> Option<NodeId> {
        let selector = Selector::class(self.dot_class.as_str())
            .with_attribute(SLIDE_ATTRIBUTE, tag.to_string());
        self.dom
            .query_all_within(self.container, &selector)
            .into_iter()
            .next()
    }

    fn indicators(&self) -> Vec<NodeId> {
        self.dom.query_all_within(self.container, &self.dot_selector())
    }

    fn set_active(&mut self, indicator: &NodeId, active: bool) {
        self.dom.toggle_class(*indicator, &self.active_class, active);
    }

    fn tag_at(&self, target: NodeId) -> Option<usize> {
        if target == self.container
            || !self.dom.contains(self.container, target)
            || !self.dom.matches(target, &self.dot_selector())
        {
            return None;
        }
        self.dom.attribute(target, SLIDE_ATTRIBUTE)?.parse().ok()
    }
}
