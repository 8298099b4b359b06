#![forbid(unsafe_code)]

//! Core types for pagefx.
//!
//! Everything a page behavior needs to talk about the page without knowing
//! what renders it: node handles, input events, rectangles, a small
//! compound-selector grammar, and the [`Dom`](dom::Dom) capability trait.

pub mod dom;
pub mod error;
pub mod event;
pub mod geometry;
pub mod node;
pub mod selector;

pub use dom::{Dom, ScrollBehavior};
#[cfg(any(test, feature = "test-helpers"))]
pub use dom::memory::MemoryDom;
pub use error::{PageError, SliderError};
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Outcome, PointerEvent};
pub use geometry::{Rect, RootMargin};
pub use node::NodeId;
pub use selector::Selector;
