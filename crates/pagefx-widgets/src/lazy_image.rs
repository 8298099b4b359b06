#![forbid(unsafe_code)]

//! Lazy-loaded images.
//!
//! Images carrying a `data-src` are observed once with a positive root
//! margin so loading starts shortly before they scroll into view. On
//! intersect the real source is swapped in; the blur class is removed only
//! when the browser reports the image loaded.

use pagefx_core::{Dom, Event, NodeId, Outcome, PageError, RootMargin, Selector};
use pagefx_runtime::{ObserveMode, ObserverOptions, VisibilityEntry, VisibilityObserver};

use crate::Behavior;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct LazyImageConfig {
    pub image: Selector,
    pub source_attribute: String,
    pub lazy_class: String,
    pub root_margin: RootMargin,
    pub threshold: f64,
}

impl Default for LazyImageConfig {
    fn default() -> Self {
        Self {
            image: Selector::element("img").with_attribute_present("data-src"),
            source_attribute: "data-src".into(),
            lazy_class: "lazy-img".into(),
            root_margin: RootMargin::uniform_px(200.0),
            threshold: 0.0,
        }
    }
}

/// Lazy image loading mounted on the page.
#[derive(Debug)]
pub struct LazyImages<D> {
    dom: D,
    source_attribute: String,
    lazy_class: String,
    observer: VisibilityObserver,
    /// Images whose source was swapped and whose load is awaited.
    loading: Vec<NodeId>,
}

impl<D: Dom> LazyImages<D> {
    pub fn mount(dom: D, config: &LazyImageConfig) -> Result<Self, PageError> {
        let images = dom.query_all(&config.image);
        if images.is_empty() {
            return Err(PageError::missing(config.image.to_string()));
        }

        let options = ObserverOptions::new(config.root_margin, config.threshold);
        let mut observer = VisibilityObserver::new(options);
        for image in images {
            observer.observe(image, ObserveMode::Once);
        }

        let mut lazy = Self {
            dom,
            source_attribute: config.source_attribute.clone(),
            lazy_class: config.lazy_class.clone(),
            observer,
            loading: Vec::new(),
        };
        let entries = lazy.observer.update_from(&lazy.dom);
        lazy.apply(&entries);
        Ok(lazy)
    }

    /// Images not yet near the viewport.
    pub fn pending(&self) -> usize {
        self.observer.len()
    }

    /// Images whose load event has not arrived yet.
    pub fn loading(&self) -> &[NodeId] {
        &self.loading
    }

    fn apply(&mut self, entries: &[VisibilityEntry]) -> usize {
        let mut swapped = 0;
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let image = entry.target;
            let Some(source) = self.dom.attribute(image, &self.source_attribute) else {
                continue;
            };
            self.dom.set_attribute(image, "src", &source);
            self.loading.push(image);
            swapped += 1;
        }
        swapped
    }
}

impl<D: Dom> Behavior for LazyImages<D> {
    fn name(&self) -> &'static str {
        "lazy_image"
    }

    fn handle_event(&mut self, event: &Event) -> Result<Outcome, PageError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("behavior_event", behavior = "lazy_image").entered();

        match event {
            Event::Scroll(viewport) => {
                if self.observer.is_empty() {
                    return Ok(Outcome::IGNORED);
                }
                let dom = &self.dom;
                let entries = self.observer.update(*viewport, |node| dom.bounding_rect(node));
                Ok(if self.apply(&entries) > 0 {
                    Outcome::HANDLED
                } else {
                    Outcome::IGNORED
                })
            }
            Event::Load(node) => {
                let Some(pos) = self.loading.iter().position(|n| n == node) else {
                    return Ok(Outcome::IGNORED);
                };
                self.loading.swap_remove(pos);
                self.dom.remove_class(*node, &self.lazy_class);
                Ok(Outcome::HANDLED)
            }
            _ => Ok(Outcome::IGNORED),
        }
    }
}
