#![forbid(unsafe_code)]

//! pagefx public facade.
//!
//! Mount every landing-page behavior on a document and feed it events:
//!
//! ```ignore
//! use pagefx::prelude::*;
//!
//! let config = PageConfig::load("pagefx.toml")?;
//! let mut page = Page::mount(dom, &config)?;
//! let outcome = page.dispatch(&Event::key(KeyCode::ArrowRight));
//! ```
//!
//! The crate re-exports the core types, the runtime primitives and the
//! behaviors so hosts only depend on `pagefx`.

pub mod config;
pub mod page;

pub use config::{ConfigError, PageConfig};
pub use page::Page;

pub use pagefx_core as core;
pub use pagefx_runtime as runtime;
pub use pagefx_widgets as widgets;

pub use pagefx_core::{
    Dom, Event, KeyCode, KeyEvent, NodeId, Outcome, PageError, Rect, RootMargin, Selector,
    SliderError,
};
pub use pagefx_widgets::Behavior;

/// Everything a host usually needs.
pub mod prelude {
    pub use crate::config::{ConfigError, PageConfig};
    pub use crate::page::Page;
    pub use pagefx_core::{Dom, Event, KeyCode, NodeId, Outcome, PageError, Rect};
    pub use pagefx_widgets::Behavior;
}
