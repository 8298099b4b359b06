#![forbid(unsafe_code)]

//! JavaScript entry point.
//!
//! [`mount`] builds a [`Page`] on the live document and installs one
//! listener per [`ListenerKind`]. The returned [`PageHandle`] owns the page
//! and the listener closures; dropping it (or calling `free()` from JS)
//! removes every listener.

use std::cell::RefCell;
use std::rc::Rc;

use pagefx::{Dom, Page, PageConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, EventTarget, KeyboardEvent};

use crate::listener::ListenerKind;
use crate::web_dom::WebDom;

type SharedPage = Rc<RefCell<Page<WebDom>>>;

struct Listener {
    target: EventTarget,
    kind: ListenerKind,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind.event_type(),
            self.closure.as_ref().unchecked_ref(),
            self.kind.capture(),
        );
    }
}

/// A mounted page, kept alive by JavaScript.
#[wasm_bindgen]
pub struct PageHandle {
    page: SharedPage,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl PageHandle {
    /// Show the next slide.
    pub fn next(&self) -> Result<(), JsValue> {
        self.with_slider(|slider| slider.next())
    }

    /// Show the previous slide.
    pub fn prev(&self) -> Result<(), JsValue> {
        self.with_slider(|slider| slider.prev())
    }

    /// Show slide `index`.
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, index: usize) -> Result<(), JsValue> {
        self.with_slider(|slider| slider.go_to(index))
    }

    /// Index of the visible slide, or `undefined` without a slider.
    #[wasm_bindgen(getter, js_name = currentSlide)]
    pub fn current_slide(&self) -> Option<usize> {
        let page = self.page.try_borrow().ok()?;
        page.slider().map(|s| s.slider().current_slide())
    }

    /// Names of the mounted behaviors.
    #[wasm_bindgen(getter)]
    pub fn behaviors(&self) -> Vec<String> {
        self.page
            .try_borrow()
            .map(|page| page.behavior_names().into_iter().map(String::from).collect())
            .unwrap_or_default()
    }
}

impl PageHandle {
    fn with_slider(
        &self,
        f: impl FnOnce(
            &mut pagefx::widgets::Slider<
                pagefx::widgets::DomPositioner<WebDom>,
                pagefx::widgets::DomIndicators<WebDom>,
            >,
        ) -> Result<(), pagefx::SliderError>,
    ) -> Result<(), JsValue> {
        let mut page = self
            .page
            .try_borrow_mut()
            .map_err(|_| js_error("page is busy"))?;
        let slider = page
            .slider_mut()
            .ok_or_else(|| js_error("no slider on this page"))?;
        f(slider.slider_mut()).map_err(|err| js_error(&err.to_string()))
    }
}

/// Mount pagefx on the current document.
///
/// `config_toml` overrides the default configuration.
#[wasm_bindgen]
pub fn mount(config_toml: Option<String>) -> Result<PageHandle, JsValue> {
    let config = match config_toml {
        Some(text) => PageConfig::from_toml_str(&text).map_err(|err| js_error(&err.to_string()))?,
        None => PageConfig::default(),
    };
    let dom = WebDom::from_window()?;
    let page = Page::mount(dom.clone(), &config).map_err(|err| js_error(&err.to_string()))?;
    let page: SharedPage = Rc::new(RefCell::new(page));

    let mut listeners = Vec::with_capacity(ListenerKind::ALL.len());
    for kind in ListenerKind::ALL {
        let target: EventTarget = if kind.on_window() {
            dom.window().clone().into()
        } else {
            dom.document().clone().into()
        };
        let closure = listener_closure(kind, dom.clone(), Rc::clone(&page));
        let options = AddEventListenerOptions::new();
        options.set_capture(kind.capture());
        options.set_passive(kind.on_window());
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind.event_type(),
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        listeners.push(Listener {
            target,
            kind,
            closure,
        });
    }

    Ok(PageHandle {
        page,
        _listeners: listeners,
    })
}

fn listener_closure(
    kind: ListenerKind,
    dom: WebDom,
    page: SharedPage,
) -> Closure<dyn FnMut(web_sys::Event)> {
    Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        let target = dom.node_of_target(event.target());
        let key = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key);
        let Some(page_event) = kind.to_event(target, key.as_deref(), dom.viewport()) else {
            return;
        };
        let Ok(mut page) = page.try_borrow_mut() else {
            #[cfg(feature = "tracing")]
            tracing::debug!(event = kind.event_type(), "re-entrant event dropped");
            return;
        };
        if page.dispatch(&page_event).prevents_default() {
            event.prevent_default();
        }
    })
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}
