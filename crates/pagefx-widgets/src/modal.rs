#![forbid(unsafe_code)]

//! Modal dialog with an overlay backdrop.
//!
//! The dialog and its overlay are shown by removing a hidden class and
//! hidden by adding it back. [`ModalState`] decides what an event means;
//! [`Modal`] resolves which element was hit and applies the result to the
//! page.
//!
//! # Invariants
//!
//! - Dialog and overlay always carry the hidden class together.
//! - Escape closes only while open.
//! - The open state is observable; subscribers see every open/close change
//!   exactly once.

use pagefx_core::{Dom, Event, KeyCode, NodeId, Outcome, PageError, Selector};
use pagefx_runtime::{Observable, Subscription};

use crate::Behavior;

/// What a click landed on, as far as the modal is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalHit {
    OpenTrigger,
    CloseTrigger,
    Backdrop,
}

/// Action emitted by [`ModalState::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// An open trigger was clicked.
    Opened,
    /// The close trigger was clicked.
    Closed,
    /// The backdrop was clicked.
    BackdropClicked,
    /// Escape was pressed while open.
    EscapePressed,
}

impl ModalAction {
    /// Whether the action leaves the modal open.
    pub fn opens(self) -> bool {
        matches!(self, Self::Opened)
    }
}

/// Modal configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ModalConfig {
    pub modal: Selector,
    pub overlay: Selector,
    pub open_trigger: Selector,
    pub close_trigger: Selector,
    pub hidden_class: String,
    pub close_on_escape: bool,
    pub close_on_backdrop: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            modal: Selector::class("modal"),
            overlay: Selector::class("overlay"),
            open_trigger: Selector::class("btn--show-modal"),
            close_trigger: Selector::class("btn--close-modal"),
            hidden_class: "hidden".into(),
            close_on_escape: true,
            close_on_backdrop: true,
        }
    }
}

impl ModalConfig {
    #[must_use]
    pub fn hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_class = class.into();
        self
    }

    #[must_use]
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    #[must_use]
    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }
}

/// Open/closed state of a modal.
#[derive(Debug, Clone)]
pub struct ModalState {
    open: Observable<bool>,
}

impl Default for ModalState {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ModalState {
    pub fn new(open: bool) -> Self {
        Self {
            open: Observable::new(open),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn open(&mut self) {
        self.open.set(true);
    }

    pub fn close(&mut self) {
        self.open.set(false);
    }

    /// Shared handle to the open flag.
    pub fn observable(&self) -> Observable<bool> {
        self.open.clone()
    }

    /// Decide what `event` does.
    ///
    /// `hit` is the modal element the event's target resolved to, if any.
    pub fn handle_event(
        &mut self,
        event: &Event,
        hit: Option<ModalHit>,
        config: &ModalConfig,
    ) -> Option<ModalAction> {
        let action = match (event, hit) {
            (Event::Key(key), _) if key.is_press(KeyCode::Escape) => {
                (config.close_on_escape && self.is_open()).then_some(ModalAction::EscapePressed)
            }
            (Event::Click(_), Some(ModalHit::OpenTrigger)) => Some(ModalAction::Opened),
            (Event::Click(_), Some(ModalHit::CloseTrigger)) => Some(ModalAction::Closed),
            (Event::Click(_), Some(ModalHit::Backdrop)) => {
                config.close_on_backdrop.then_some(ModalAction::BackdropClicked)
            }
            _ => None,
        }?;

        if action.opens() {
            self.open();
        } else {
            self.close();
        }
        Some(action)
    }
}

/// Modal dialog mounted on the page.
#[derive(Debug)]
pub struct Modal<D> {
    dom: D,
    modal: NodeId,
    overlay: NodeId,
    open_triggers: Vec<NodeId>,
    close_trigger: NodeId,
    config: ModalConfig,
    state: ModalState,
}

impl<D: Dom> Modal<D> {
    /// Resolve the dialog's elements. The initial state is read from the
    /// dialog's hidden class.
    pub fn mount(dom: D, config: &ModalConfig) -> Result<Self, PageError> {
        let modal = dom.require(&config.modal)?;
        let overlay = dom.require(&config.overlay)?;
        let close_trigger = dom.require(&config.close_trigger)?;
        let open_triggers = dom.query_all(&config.open_trigger);
        let state = ModalState::new(!dom.has_class(modal, &config.hidden_class));
        Ok(Self {
            dom,
            modal,
            overlay,
            open_triggers,
            close_trigger,
            config: config.clone(),
            state,
        })
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Run `callback` on every open/close change.
    pub fn on_change(&self, callback: impl Fn(&bool) + 'static) -> Subscription {
        self.state.open.subscribe(callback)
    }

    /// Show the dialog and overlay.
    pub fn open(&mut self) {
        self.state.open();
        self.sync();
    }

    /// Hide the dialog and overlay.
    pub fn close(&mut self) {
        self.state.close();
        self.sync();
    }

    fn hit(&self, target: NodeId) -> Option<ModalHit> {
        if self
            .open_triggers
            .iter()
            .any(|trigger| self.dom.contains(*trigger, target))
        {
            Some(ModalHit::OpenTrigger)
        } else if self.dom.contains(self.close_trigger, target) {
            Some(ModalHit::CloseTrigger)
        } else if self.dom.contains(self.overlay, target) {
            Some(ModalHit::Backdrop)
        } else {
            None
        }
    }

    fn sync(&self) {
        let hidden = !self.state.is_open();
        for node in [self.modal, self.overlay] {
            self.dom.toggle_class(node, &self.config.hidden_class, hidden);
        }
    }
}

impl<D: Dom> Behavior for Modal<D> {
    fn name(&self) -> &'static str {
        "modal"
    }

    fn handle_event(&mut self, event: &Event) -> Result<Outcome, PageError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("behavior_event", behavior = "modal").entered();

        let hit = match event {
            Event::Click(click) => self.hit(click.target),
            _ => None,
        };
        let Some(action) = self.state.handle_event(event, hit, &self.config) else {
            return Ok(Outcome::IGNORED);
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(?action, "modal action");

        self.sync();
        Ok(if action.opens() {
            Outcome::HANDLED | Outcome::PREVENT_DEFAULT
        } else {
            Outcome::HANDLED
        })
    }
}
