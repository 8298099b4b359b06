#![forbid(unsafe_code)]

//! Sticky navigation bar.
//!
//! The header is observed with a root margin of minus the nav height: once
//! the header has scrolled out from under the nav, the nav gets the sticky
//! class; when it comes back, the class is removed.

use pagefx_core::{Dom, Event, NodeId, Outcome, PageError, RootMargin, Selector};
use pagefx_runtime::{ObserveMode, Observable, ObserverOptions, VisibilityEntry, VisibilityObserver};

use crate::Behavior;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct StickyNavConfig {
    pub nav: Selector,
    pub header: Selector,
    pub sticky_class: String,
}

impl Default for StickyNavConfig {
    fn default() -> Self {
        Self {
            nav: Selector::class("nav"),
            header: Selector::class("header"),
            sticky_class: "sticky".into(),
        }
    }
}

/// Sticky nav mounted on the page.
#[derive(Debug)]
pub struct StickyNav<D> {
    dom: D,
    nav: NodeId,
    header: NodeId,
    sticky_class: String,
    observer: VisibilityObserver,
    sticky: Observable<bool>,
}

impl<D: Dom> StickyNav<D> {
    /// Measure the nav, start observing the header and apply the initial
    /// state.
    pub fn mount(dom: D, config: &StickyNavConfig) -> Result<Self, PageError> {
        let nav = dom.require(&config.nav)?;
        let header = dom.require(&config.header)?;
        let nav_height = dom.bounding_rect(nav).map_or(0.0, |r| r.height);

        let options = ObserverOptions::new(RootMargin::uniform_px(-nav_height), 0.0);
        let mut observer = VisibilityObserver::new(options);
        observer.observe(header, ObserveMode::Persistent);

        let mut sticky_nav = Self {
            dom,
            nav,
            header,
            sticky_class: config.sticky_class.clone(),
            observer,
            sticky: Observable::new(false),
        };
        let entries = sticky_nav.observer.update_from(&sticky_nav.dom);
        sticky_nav.apply(&entries);
        Ok(sticky_nav)
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky.get()
    }

    /// Shared handle to the sticky flag.
    pub fn sticky(&self) -> Observable<bool> {
        self.sticky.clone()
    }

    pub fn root_margin(&self) -> RootMargin {
        self.observer.options().root_margin
    }

    fn apply(&self, entries: &[VisibilityEntry]) -> bool {
        let Some(entry) = entries.iter().rev().find(|e| e.target == self.header) else {
            return false;
        };
        let sticky = !entry.is_intersecting;
        self.dom.toggle_class(self.nav, &self.sticky_class, sticky);
        self.sticky.set(sticky)
    }
}

impl<D: Dom> Behavior for StickyNav<D> {
    fn name(&self) -> &'static str {
        "sticky_nav"
    }

    fn handle_event(&mut self, event: &Event) -> Result<Outcome, PageError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("behavior_event", behavior = "sticky_nav").entered();

        let Event::Scroll(viewport) = event else {
            return Ok(Outcome::IGNORED);
        };
        let dom = &self.dom;
        let entries = self.observer.update(*viewport, |node| dom.bounding_rect(node));
        Ok(if self.apply(&entries) {
            Outcome::HANDLED
        } else {
            Outcome::IGNORED
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagefx_core::{MemoryDom, Rect};

    fn fixture() -> (MemoryDom, NodeId) {
        let dom = MemoryDom::new();
        let header = dom.append(dom.body(), "header.header");
        let nav = dom.append(header, "nav.nav");
        dom.set_rect(header, Rect::new(0.0, 0.0, 1280.0, 800.0));
        dom.set_rect(nav, Rect::new(0.0, 0.0, 1280.0, 90.0));
        (dom, nav)
    }

    fn scroll(dom: &MemoryDom, sticky: &mut StickyNav<MemoryDom>, dy: f64) -> Outcome {
        dom.scroll_by(dy);
        sticky.handle_event(&Event::Scroll(dom.viewport())).unwrap()
    }

    #[test]
    fn root_margin_is_negative_nav_height() {
        let (dom, _) = fixture();
        let sticky = StickyNav::mount(dom, &StickyNavConfig::default()).unwrap();
        assert_eq!(sticky.root_margin(), RootMargin::uniform_px(-90.0));
    }

    #[test]
    fn toggles_both_ways() {
        let (dom, nav) = fixture();
        let mut sticky = StickyNav::mount(dom.clone(), &StickyNavConfig::default()).unwrap();
        assert!(!sticky.is_sticky());
        assert!(!dom.has_class(nav, "sticky"));

        // Header bottom at 100px: still under the 90px nav band.
        assert_eq!(scroll(&dom, &mut sticky, 700.0), Outcome::IGNORED);
        assert!(!sticky.is_sticky());

        // Header bottom at 80px: scrolled past.
        assert_eq!(scroll(&dom, &mut sticky, 20.0), Outcome::HANDLED);
        assert!(sticky.is_sticky());
        assert!(dom.has_class(nav, "sticky"));

        scroll(&dom, &mut sticky, -500.0);
        assert!(!sticky.is_sticky());
        assert!(!dom.has_class(nav, "sticky"));
    }

    #[test]
    fn mounting_below_the_header_starts_sticky() {
        let (dom, nav) = fixture();
        dom.scroll_by(1000.0);
        let sticky = StickyNav::mount(dom.clone(), &StickyNavConfig::default()).unwrap();
        assert!(sticky.is_sticky());
        assert!(dom.has_class(nav, "sticky"));
    }

    #[test]
    fn sticky_flag_is_observable() {
        let (dom, _) = fixture();
        let mut sticky = StickyNav::mount(dom.clone(), &StickyNavConfig::default()).unwrap();
        let flag = sticky.sticky();
        scroll(&dom, &mut sticky, 900.0);
        assert!(flag.get());
        assert_eq!(flag.version(), 1);
    }

    #[test]
    fn other_events_are_ignored() {
        let (dom, nav) = fixture();
        let mut sticky = StickyNav::mount(dom, &StickyNavConfig::default()).unwrap();
        assert_eq!(sticky.handle_event(&Event::click(nav)).unwrap(), Outcome::IGNORED);
    }
}
