#![forbid(unsafe_code)]

//! Page behaviors for pagefx.
//!
//! Each behavior owns a [`Dom`](pagefx_core::Dom) handle plus the element
//! handles it resolved at mount time, and reacts to [`Event`]s routed to it
//! by the page:
//!
//! - [`slider`]: the carousel state machine and its DOM bindings
//! - [`modal`]: show/hide a dialog and its overlay
//! - [`scroll`]: smooth scrolling for the hero button and nav links
//! - [`tabs`]: tabbed content panels
//! - [`nav_fade`]: fade sibling nav links on hover
//! - [`sticky_nav`], [`reveal`], [`lazy_image`]: visibility-driven effects

pub mod lazy_image;
pub mod modal;
pub mod nav_fade;
pub mod reveal;
pub mod scroll;
pub mod slider;
pub mod sticky_nav;
pub mod tabs;

pub use lazy_image::{LazyImageConfig, LazyImages};
pub use modal::{Modal, ModalAction, ModalConfig, ModalHit, ModalState};
pub use nav_fade::{NavFade, NavFadeConfig};
pub use reveal::{RevealConfig, SectionReveal};
pub use scroll::{ScrollConfig, SmoothScroll};
pub use slider::{
    DomIndicators, DomPositioner, IndicatorRenderer, Slider, SliderBehavior, SliderConfig,
    SliderKeys, ViewportPositioner,
};
pub use sticky_nav::{StickyNav, StickyNavConfig};
pub use tabs::{Tabs, TabsConfig};

use pagefx_core::{Event, Outcome, PageError};

/// A behavior mounted on a page.
///
/// Behaviors see every event the page receives and ignore the ones that do
/// not concern them by returning [`Outcome::IGNORED`].
pub trait Behavior {
    /// Short stable name, used in logs.
    fn name(&self) -> &'static str;

    /// React to one event.
    ///
    /// An `Err` means this behavior could not complete its reaction; it must
    /// leave its own state consistent so later events still work.
    fn handle_event(&mut self, event: &Event) -> Result<Outcome, PageError>;
}
