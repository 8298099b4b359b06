#![forbid(unsafe_code)]

//! Fade the other navigation links while one is hovered.

use pagefx_core::{Dom, Event, NodeId, Outcome, PageError, Selector};

use crate::Behavior;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct NavFadeConfig {
    pub nav: Selector,
    pub link_class: String,
    pub logo: Selector,
    /// Opacity applied to siblings and logo while a link is hovered.
    pub faded_opacity: f64,
}

impl Default for NavFadeConfig {
    fn default() -> Self {
        Self {
            nav: Selector::class("nav"),
            link_class: "nav__link".into(),
            logo: Selector::element("img"),
            faded_opacity: 0.5,
        }
    }
}

/// Hover fade mounted on the nav bar.
#[derive(Debug)]
pub struct NavFade<D> {
    dom: D,
    nav: NodeId,
    link_class: String,
    logo: Selector,
    faded_opacity: f64,
}

impl<D: Dom> NavFade<D> {
    pub fn mount(dom: D, config: &NavFadeConfig) -> Result<Self, PageError> {
        let nav = dom.require(&config.nav)?;
        Ok(Self {
            dom,
            nav,
            link_class: config.link_class.clone(),
            logo: config.logo.clone(),
            faded_opacity: config.faded_opacity,
        })
    }

    /// Set `opacity` on every link except `hovered`, and on the logo.
    fn fade_around(&self, hovered: NodeId, opacity: f64) {
        let value = opacity.to_string();
        let links = Selector::class(self.link_class.as_str());
        for link in self.dom.query_all_within(self.nav, &links) {
            if link != hovered {
                self.dom.set_style(link, "opacity", &value);
            }
        }
        if let Some(logo) = self.dom.query_all_within(self.nav, &self.logo).first() {
            self.dom.set_style(*logo, "opacity", &value);
        }
    }
}

impl<D: Dom> Behavior for NavFade<D> {
    fn name(&self) -> &'static str {
        "nav_fade"
    }

    fn handle_event(&mut self, event: &Event) -> Result<Outcome, PageError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("behavior_event", behavior = "nav_fade").entered();

        let (pointer, opacity) = match event {
            Event::PointerOver(p) => (p, self.faded_opacity),
            Event::PointerOut(p) => (p, 1.0),
            _ => return Ok(Outcome::IGNORED),
        };
        let target = pointer.target;
        if !self.dom.contains(self.nav, target) || !self.dom.has_class(target, &self.link_class) {
            return Ok(Outcome::IGNORED);
        }
        self.fade_around(target, opacity);
        Ok(Outcome::HANDLED)
    }
}
