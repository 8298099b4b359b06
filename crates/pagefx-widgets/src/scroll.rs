#![forbid(unsafe_code)]

//! Smooth in-page scrolling.
//!
//! Two entry points: the hero "learn more" button scrolls to a fixed
//! section, and the nav links container delegates clicks on its links to the
//! section named by the link's `href` fragment.

use pagefx_core::{Dom, Event, NodeId, Outcome, PageError, ScrollBehavior, Selector};

use crate::Behavior;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ScrollConfig {
    pub scroll_button: Selector,
    pub scroll_target: Selector,
    pub nav_links: Selector,
    /// Class a click target must carry to count as a nav link.
    pub nav_link_class: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scroll_button: Selector::class("btn--scroll-to"),
            scroll_target: Selector::id_of("section--1"),
            nav_links: Selector::class("nav__links"),
            nav_link_class: "nav__link".into(),
        }
    }
}

/// Smooth scrolling mounted on the page.
#[derive(Debug)]
pub struct SmoothScroll<D> {
    dom: D,
    button: NodeId,
    target: NodeId,
    links: NodeId,
    link_class: String,
}

impl<D: Dom> SmoothScroll<D> {
    pub fn mount(dom: D, config: &ScrollConfig) -> Result<Self, PageError> {
        let button = dom.require(&config.scroll_button)?;
        let target = dom.require(&config.scroll_target)?;
        let links = dom.require(&config.nav_links)?;
        Ok(Self {
            dom,
            button,
            target,
            links,
            link_class: config.nav_link_class.clone(),
        })
    }

    /// Section a nav link points at, if its `href` is a known `#id`.
    fn link_destination(&self, link: NodeId) -> Option<NodeId> {
        let href = self.dom.attribute(link, "href")?;
        let id = href.strip_prefix('#')?;
        let selector: Selector = href.parse().ok().filter(|_| !id.is_empty())?;
        self.dom.query(&selector)
    }
}

impl<D: Dom> Behavior for SmoothScroll<D> {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn handle_event(&mut self, event: &Event) -> Result<Outcome, PageError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("behavior_event", behavior = "scroll").entered();

        let Event::Click(click) = event else {
            return Ok(Outcome::IGNORED);
        };
        let target = click.target;

        if self.dom.contains(self.button, target) {
            self.dom.scroll_into_view(self.target, ScrollBehavior::Smooth);
            return Ok(Outcome::HANDLED);
        }

        if !self.dom.contains(self.links, target) {
            return Ok(Outcome::IGNORED);
        }
        if !self.dom.has_class(target, &self.link_class) {
            return Ok(Outcome::PREVENT_DEFAULT);
        }
        match self.link_destination(target) {
            Some(section) => {
                self.dom.scroll_into_view(section, ScrollBehavior::Smooth);
                Ok(Outcome::HANDLED | Outcome::PREVENT_DEFAULT)
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    href = ?self.dom.attribute(target, "href"),
                    "nav link has no destination"
                );
                Ok(Outcome::PREVENT_DEFAULT)
            }
        }
    }
}
