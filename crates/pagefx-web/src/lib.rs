#![forbid(unsafe_code)]

//! Browser backend for pagefx.
//!
//! - [`listener`]: which browser events the page listens to and where
//! - `web_dom` (wasm32): [`Dom`](pagefx_core::Dom) over `web_sys` elements
//! - `handle` (wasm32): `mount` entry point exported to JavaScript; owns
//!   the mounted page and its event listeners
//!
//! ```js
//! import init, { mount } from "./pagefx_web.js";
//! await init();
//! const page = mount(await (await fetch("pagefx.toml")).text());
//! page.next();
//! ```

pub mod listener;

#[cfg(target_arch = "wasm32")]
mod handle;
#[cfg(target_arch = "wasm32")]
mod web_dom;

#[cfg(target_arch = "wasm32")]
pub use handle::{PageHandle, mount};
pub use listener::ListenerKind;
#[cfg(target_arch = "wasm32")]
pub use web_dom::WebDom;
