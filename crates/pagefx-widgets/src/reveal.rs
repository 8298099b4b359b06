#![forbid(unsafe_code)]

//! Reveal sections as they scroll into view.
//!
//! Every section is hidden at mount and observed once. When enough of a
//! section is visible its hidden class is removed and it is no longer
//! observed, so a revealed section never hides again.

use pagefx_core::{Dom, Event, NodeId, Outcome, PageError, Selector};
use pagefx_runtime::{ObserveMode, ObserverOptions, VisibilityEntry, VisibilityObserver};

use crate::Behavior;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct RevealConfig {
    pub section: Selector,
    pub hidden_class: String,
    /// Visible fraction that triggers the reveal.
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            section: Selector::class("section"),
            hidden_class: "section--hidden".into(),
            threshold: 0.15,
        }
    }
}

/// Section reveal mounted on the page.
#[derive(Debug)]
pub struct SectionReveal<D> {
    dom: D,
    hidden_class: String,
    observer: VisibilityObserver,
}

impl<D: Dom> SectionReveal<D> {
    /// Hide and observe every section, then reveal the ones already in
    /// view.
    pub fn mount(dom: D, config: &RevealConfig) -> Result<Self, PageError> {
        let sections = dom.query_all(&config.section);
        if sections.is_empty() {
            return Err(PageError::missing(config.section.to_string()));
        }

        let mut observer =
            VisibilityObserver::new(ObserverOptions::default().threshold(config.threshold));
        for section in &sections {
            dom.add_class(*section, &config.hidden_class);
            observer.observe(*section, ObserveMode::Once);
        }

        let mut reveal = Self {
            dom,
            hidden_class: config.hidden_class.clone(),
            observer,
        };
        let entries = reveal.observer.update_from(&reveal.dom);
        reveal.apply(&entries);
        Ok(reveal)
    }

    /// Sections still waiting to be revealed.
    pub fn pending(&self) -> usize {
        self.observer.len()
    }

    fn apply(&self, entries: &[VisibilityEntry]) -> usize {
        let mut revealed = 0;
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            self.reveal(entry.target);
            revealed += 1;
        }
        revealed
    }

    fn reveal(&self, section: NodeId) {
        self.dom.remove_class(section, &self.hidden_class);
        #[cfg(feature = "tracing")]
        tracing::debug!(section = %section, "section revealed");
    }
}

impl<D: Dom> Behavior for SectionReveal<D> {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn handle_event(&mut self, event: &Event) -> Result<Outcome, PageError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("behavior_event", behavior = "reveal").entered();

        let Event::Scroll(viewport) = event else {
            return Ok(Outcome::IGNORED);
        };
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
}
