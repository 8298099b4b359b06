#![forbid(unsafe_code)]

//! [`Dom`] over the live browser document.
//!
//! Elements are registered on first sight and keep their [`NodeId`] for the
//! lifetime of the [`WebDom`]. Failed browser calls (invalid class tokens,
//! detached nodes) are dropped, matching the no-op rule for stale handles.

use std::cell::RefCell;
use std::rc::Rc;

use pagefx_core::{Dom, NodeId, Rect, ScrollBehavior, Selector};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, ScrollIntoViewOptions, Window};

/// Handle returned when an element could not be created.
const DETACHED: NodeId = NodeId::new(u32::MAX);

#[derive(Default)]
struct Registry {
    elements: Vec<Element>,
}

/// The browser document as a [`Dom`]. Clones share the element registry.
#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for WebDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDom")
            .field("registered", &self.registry.borrow().elements.len())
            .finish_non_exhaustive()
    }
}

impl WebDom {
    /// Bind to the global `window` and its document.
    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self {
            window,
            document,
            registry: Rc::new(RefCell::new(Registry::default())),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Node handle for `element`, registering it if new.
    pub fn node_of(&self, element: &Element) -> NodeId {
        let mut registry = self.registry.borrow_mut();
        if let Some(pos) = registry.elements.iter().position(|e| e == element) {
            return NodeId::new(pos as u32);
        }
        registry.elements.push(element.clone());
        NodeId::new((registry.elements.len() - 1) as u32)
    }

    /// Node handle for an event target, if it is an element.
    pub fn node_of_target(&self, target: Option<web_sys::EventTarget>) -> Option<NodeId> {
        let element = target?.dyn_into::<Element>().ok()?;
        Some(self.node_of(&element))
    }

    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.registry.borrow().elements.get(node.index()).cloned()
    }

    fn collect(&self, list: Result<web_sys::NodeList, JsValue>) -> Vec<NodeId> {
        let Ok(list) = list else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.node_of(&element))
            .collect()
    }
}

impl Dom for WebDom {
    fn tag_name(&self, node: NodeId) -> Option<String> {
        Some(self.element(node)?.tag_name().to_ascii_lowercase())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.element(node)?.parent_element()?;
        Some(self.node_of(&parent))
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|e| e.class_list().contains(class))
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.set_attribute(name, value);
        }
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.element(node)
            && let Some(html) = element.dyn_ref::<HtmlElement>()
        {
            let _ = html.style().set_property(property, value);
        }
    }

    fn query(&self, selector: &Selector) -> Option<NodeId> {
        let element = self.document.query_selector(&selector.to_string()).ok()??;
        Some(self.node_of(&element))
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.collect(self.document.query_selector_all(&selector.to_string()))
    }

    fn query_all_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        match self.element(root) {
            Some(root) => self.collect(root.query_selector_all(&selector.to_string())),
            None => Vec::new(),
        }
    }

    fn append_element(&self, parent: NodeId, spec: &Selector) -> NodeId {
        let Some(parent) = self.element(parent) else {
            return DETACHED;
        };
        let Ok(element) = self.document.create_element(spec.tag().unwrap_or("div")) else {
            return DETACHED;
        };
        if let Some(id) = spec.id() {
            element.set_id(id);
        }
        for class in spec.classes() {
            let _ = element.class_list().add_1(class);
        }
        for attr in spec.attributes() {
            let _ = element.set_attribute(&attr.name, attr.value.as_deref().unwrap_or(""));
        }
        if parent.append_child(&element).is_err() {
            return DETACHED;
        }
        self.node_of(&element)
    }

    fn scroll_into_view(&self, node: NodeId, behavior: ScrollBehavior) {
        let Some(element) = self.element(node) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        let rect = self.element(node)?.get_bounding_client_rect();
        Some(Rect::new(rect.x(), rect.y(), rect.width(), rect.height()))
    }

    fn viewport(&self) -> Rect {
        let extent = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Rect::new(
            0.0,
            0.0,
            extent(self.window.inner_width()),
            extent(self.window.inner_height()),
        )
    }
}
