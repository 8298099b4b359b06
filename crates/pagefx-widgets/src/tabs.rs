#![forbid(unsafe_code)]

//! Tabbed content panels.
//!
//! Clicks are delegated from the tab container. The clicked tab's
//! `data-tab` value `n` selects the panel carrying
//! `{content_class}--{n}`. Exactly one tab and one panel are active after a
//! successful switch; a click that resolves to no tab changes nothing.

use pagefx_core::{Dom, Event, NodeId, Outcome, PageError, Selector};

use crate::Behavior;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct TabsConfig {
    pub container: Selector,
    pub tab_class: String,
    pub content_class: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            container: Selector::class("operations__tab-container"),
            tab_class: "operations__tab".into(),
            content_class: "operations__content".into(),
        }
    }
}

impl TabsConfig {
    fn tab_active_class(&self) -> String {
        format!("{}--active", self.tab_class)
    }

    fn content_active_class(&self) -> String {
        format!("{}--active", self.content_class)
    }
}

/// Tab group mounted on the page.
#[derive(Debug)]
pub struct Tabs<D> {
    dom: D,
    container: NodeId,
    config: TabsConfig,
}

impl<D: Dom> Tabs<D> {
    pub fn mount(dom: D, config: &TabsConfig) -> Result<Self, PageError> {
        let container = dom.require(&config.container)?;
        Ok(Self {
            dom,
            container,
            config: config.clone(),
        })
    }

    /// Tab currently marked active, if any.
    pub fn active_tab(&self) -> Option<NodeId> {
        let active = Selector::class(self.config.tab_active_class());
        self.dom.query_all(&active).into_iter().next()
    }

    /// Activate `tab` and its panel.
    pub fn activate(&self, tab: NodeId) -> Result<(), PageError> {
        let panel = self.panel_for(tab)?;

        let tab_active = self.config.tab_active_class();
        let content_active = self.config.content_active_class();
        for other in self.dom.query_all(&Selector::class(self.config.tab_class.as_str())) {
            self.dom.remove_class(other, &tab_active);
        }
        for other in self
            .dom
            .query_all(&Selector::class(self.config.content_class.as_str()))
        {
            self.dom.remove_class(other, &content_active);
        }
        self.dom.add_class(tab, &tab_active);
        self.dom.add_class(panel, &content_active);

        #[cfg(feature = "tracing")]
        tracing::debug!(tab = %tab, panel = %panel, "tab activated");
        Ok(())
    }

    fn panel_for(&self, tab: NodeId) -> Result<NodeId, PageError> {
        let key = self.dom.attribute(tab, "data-tab").unwrap_or_default();
        let selector = Selector::class(format!("{}--{}", self.config.content_class, key));
        self.dom.require(&selector)
    }
}

impl<D: Dom> Behavior for Tabs<D> {
    fn name(&self) -> &'static str {
        "tabs"
    }

    fn handle_event(&mut self, event: &Event) -> Result<Outcome, PageError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("behavior_event", behavior = "tabs").entered();

        let Event::Click(click) = event else {
            return Ok(Outcome::IGNORED);
        };
        if !self.dom.contains(self.container, click.target) {
            return Ok(Outcome::IGNORED);
        }

        let tab_selector = Selector::element("button").with_class(self.config.tab_class.as_str());
        let clicked = self
            .dom
            .closest(click.target, &tab_selector)
            .filter(|tab| self.dom.contains(self.container, *tab));
        let Some(tab) = clicked else {
            return Ok(Outcome::PREVENT_DEFAULT);
        };

        self.activate(tab)?;
        Ok(Outcome::HANDLED | Outcome::PREVENT_DEFAULT)
    }
}
