#![forbid(unsafe_code)]

//! Mounting behaviors on a page and routing events to them.
//!
//! # Invariants
//!
//! - Behaviors see events in mount order: modal, scroll, tabs, nav fade,
//!   sticky nav, reveal, lazy images, extra behaviors, slider.
//! - One behavior's error never prevents the others from seeing the same
//!   event. Errors are logged at `warn` with the behavior name.
//!
//! # Failure Modes
//!
//! - In non-strict mode a behavior that cannot be mounted (missing element,
//!   empty slider) is skipped with a `warn`. In strict mode the first such
//!   failure is returned from [`Page::mount`].

use pagefx_core::{Dom, Event, Outcome, PageError};
use pagefx_widgets::{
    Behavior, LazyImages, Modal, NavFade, SectionReveal, SliderBehavior, SmoothScroll, StickyNav,
    Tabs,
};

use crate::config::PageConfig;

/// Behaviors mounted on one document.
pub struct Page<D: Dom> {
    dom: D,
    behaviors: Vec<Box<dyn Behavior>>,
    slider: Option<SliderBehavior<D>>,
}

impl<D: Dom + Clone + 'static> Page<D> {
    /// Resolve every configured behavior against `dom`.
    pub fn mount(dom: D, config: &PageConfig) -> Result<Self, PageError> {
        let _span = tracing::debug_span!("page_mount", strict = config.strict).entered();
        let strict = config.strict;
        let mut behaviors: Vec<Box<dyn Behavior>> = Vec::new();

        if let Some(b) = admit("modal", Modal::mount(dom.clone(), &config.modal), strict)? {
            behaviors.push(Box::new(b));
        }
        if let Some(b) = admit(
            "scroll",
            SmoothScroll::mount(dom.clone(), &config.scroll),
            strict,
        )? {
            behaviors.push(Box::new(b));
        }
        if let Some(b) = admit("tabs", Tabs::mount(dom.clone(), &config.tabs), strict)? {
            behaviors.push(Box::new(b));
        }
        if let Some(b) = admit("nav_fade", NavFade::mount(dom.clone(), &config.nav_fade), strict)? {
            behaviors.push(Box::new(b));
        }
        if let Some(b) = admit(
            "sticky_nav",
            StickyNav::mount(dom.clone(), &config.sticky_nav),
            strict,
        )? {
            behaviors.push(Box::new(b));
        }
        if let Some(b) = admit(
            "reveal",
            SectionReveal::mount(dom.clone(), &config.reveal),
            strict,
        )? {
            behaviors.push(Box::new(b));
        }
        if let Some(b) = admit(
            "lazy_image",
            LazyImages::mount(dom.clone(), &config.lazy_image),
            strict,
        )? {
            behaviors.push(Box::new(b));
        }
        let slider = admit("slider", SliderBehavior::mount(dom.clone(), &config.slider), strict)?;

        tracing::info!(
            behaviors = behaviors.len() + usize::from(slider.is_some()),
            "page mounted"
        );
        Ok(Self {
            dom,
            behaviors,
            slider,
        })
    }

    /// Append a behavior after the built-in ones (it still runs before the
    /// slider).
    pub fn add_behavior(&mut self, behavior: impl Behavior + 'static) {
        self.behaviors.push(Box::new(behavior));
    }
}

impl<D: Dom> Page<D> {
    /// Route `event` to every behavior and combine their outcomes.
    pub fn dispatch(&mut self, event: &Event) -> Outcome {
        let _span = tracing::trace_span!("page_dispatch", ?event).entered();
        let mut outcome = Outcome::IGNORED;
        for behavior in &mut self.behaviors {
            outcome |= run(behavior.as_mut(), event);
        }
        if let Some(slider) = &mut self.slider {
            outcome |= run(slider, event);
        }
        outcome
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// The mounted slider, if the page has one.
    pub fn slider(&self) -> Option<&SliderBehavior<D>> {
        self.slider.as_ref()
    }

    pub fn slider_mut(&mut self) -> Option<&mut SliderBehavior<D>> {
        self.slider.as_mut()
    }

    /// Names of mounted behaviors in dispatch order.
    pub fn behavior_names(&self) -> Vec<&'static str> {
        self.behaviors
            .iter()
            .map(|b| b.name())
            .chain(self.slider.as_ref().map(|s| s.name()))
            .collect()
    }
}

impl<D: Dom> std::fmt::Debug for Page<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("behaviors", &self.behavior_names())
            .finish_non_exhaustive()
    }
}

fn admit<B>(
    name: &'static str,
    mounted: Result<B, PageError>,
    strict: bool,
) -> Result<Option<B>, PageError> {
    match mounted {
        Ok(behavior) => {
            tracing::debug!(behavior = name, "behavior mounted");
            Ok(Some(behavior))
        }
        Err(err) if !strict => {
            tracing::warn!(behavior = name, error = %err, "behavior skipped");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn run(behavior: &mut dyn Behavior, event: &Event) -> Outcome {
    match behavior.handle_event(event) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(behavior = behavior.name(), error = %err, "behavior failed");
            Outcome::IGNORED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagefx_core::{KeyCode, MemoryDom, NodeId};
    use std::cell::Cell;
    use std::rc::Rc;
    use tracing_test::traced_test;

    struct Counter(Rc<Cell<u32>>);

    impl Behavior for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn handle_event(&mut self, _event: &Event) -> Result<Outcome, PageError> {
            self.0.set(self.0.get() + 1);
            Ok(Outcome::HANDLED)
        }
    }

    struct Failing;

    impl Behavior for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn handle_event(&mut self, _event: &Event) -> Result<Outcome, PageError> {
            Err(PageError::missing(".gone"))
        }
    }

    fn slider_only() -> (MemoryDom, NodeId) {
        let dom = MemoryDom::new();
        let slider = dom.append(dom.body(), ".slider");
        for _ in 0..3 {
            dom.append(slider, ".slide");
        }
        dom.append(slider, "button.slider__btn--left");
        let right = dom.append(slider, "button.slider__btn--right");
        dom.append(slider, ".dots");
        (dom, right)
    }

    #[test]
    #[traced_test]
    fn missing_behaviors_are_skipped_with_a_warning() {
        let (dom, _) = slider_only();
        let page = Page::mount(dom, &PageConfig::default()).unwrap();
        assert_eq!(page.behavior_names(), vec!["slider"]);
        assert!(logs_contain("behavior skipped"));
        assert!(logs_contain("modal"));
    }

    #[test]
    fn strict_mode_fails_on_first_missing_element() {
        let (dom, _) = slider_only();
        let config = PageConfig {
            strict: true,
            ..PageConfig::default()
        };
        let err = Page::mount(dom, &config).unwrap_err();
        assert_eq!(err, PageError::missing(".modal"));
    }

    #[test]
    #[traced_test]
    fn failing_behavior_does_not_stop_the_rest() {
        let (dom, right) = slider_only();
        let mut page = Page::mount(dom, &PageConfig::default()).unwrap();
        let count = Rc::new(Cell::new(0));
        page.add_behavior(Failing);
        page.add_behavior(Counter(Rc::clone(&count)));

        let outcome = page.dispatch(&Event::click(right));
        assert!(outcome.is_handled());
        assert_eq!(count.get(), 1);
        assert_eq!(page.slider().map(|s| s.slider().current_slide()), Some(1));
        assert!(logs_contain("behavior failed"));
        assert!(logs_contain("failing"));
    }

    #[test]
    fn slider_is_reachable_for_programmatic_navigation() {
        let (dom, _) = slider_only();
        let mut page = Page::mount(dom, &PageConfig::default()).unwrap();
        page.slider_mut().unwrap().slider_mut().go_to(2).unwrap();
        page.dispatch(&Event::key(KeyCode::ArrowRight));
        assert_eq!(page.slider().unwrap().slider().current_slide(), 0);
    }
}
