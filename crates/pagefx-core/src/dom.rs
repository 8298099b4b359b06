#![forbid(unsafe_code)]

//! The page, as seen by behaviors.
//!
//! [`Dom`] is a capability set over element handles. Every method takes
//! `&self`: like the browser DOM, implementations are interior-mutable and
//! handles are cheap to clone, so a behavior keeps its own copy of the DOM
//! handle and its own [`NodeId`]s.
//!
//! # Invariants
//!
//! 1. A [`NodeId`] returned by one DOM is stable for that DOM's lifetime.
//! 2. Query results are in document order.
//! 3. Operations on a stale or foreign handle are no-ops (getters return
//!    `None`/`false`), never panics.

#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;

use crate::geometry::Rect;
use crate::node::NodeId;
use crate::selector::Selector;

/// How [`Dom::scroll_into_view`] moves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Element-level operations behaviors are allowed to perform.
pub trait Dom {
    /// Lower-case tag name.
    fn tag_name(&self, node: NodeId) -> Option<String>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn add_class(&self, node: NodeId, class: &str);

    fn remove_class(&self, node: NodeId, class: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&self, node: NodeId, name: &str, value: &str);

    /// Set one inline style property (`element.style[property] = value`).
    fn set_style(&self, node: NodeId, property: &str, value: &str);

    /// First element in the document matching `selector`.
    fn query(&self, selector: &Selector) -> Option<NodeId>;

    /// Every element in the document matching `selector`.
    fn query_all(&self, selector: &Selector) -> Vec<NodeId>;

    /// Every descendant of `root` (excluding `root`) matching `selector`.
    fn query_all_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId>;

    /// Create an element from a compound selector (tag, id, classes and
    /// attributes are applied) and append it as the last child of `parent`.
    fn append_element(&self, parent: NodeId, spec: &Selector) -> NodeId;

    fn scroll_into_view(&self, node: NodeId, behavior: ScrollBehavior);

    /// Border box relative to the viewport.
    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;

    /// The current viewport rectangle.
    fn viewport(&self) -> Rect;

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Nearest inclusive ancestor of `node` matching `selector`
    /// (`element.closest(selector)`).
    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if selector.matches(self, current) {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    /// Whether `node` itself matches `selector` (`element.matches(selector)`).
    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        selector.matches(self, node)
    }

    /// Add or remove `class` depending on `on`.
    fn toggle_class(&self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Resolve a required element, mapping absence to an error.
    fn require(&self, selector: &Selector) -> Result<NodeId, crate::error::PageError> {
        self.query(selector)
            .ok_or_else(|| crate::error::PageError::missing(selector.to_string()))
    }
}

impl<D: Dom + ?Sized> Dom for &D {
    fn tag_name(&self, node: NodeId) -> Option<String> {
        (**self).tag_name(node)
    }
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        (**self).parent(node)
    }
    fn has_class(&self, node: NodeId, class: &str) -> bool {
        (**self).has_class(node, class)
    }
    fn add_class(&self, node: NodeId, class: &str) {
        (**self).add_class(node, class);
    }
    fn remove_class(&self, node: NodeId, class: &str) {
        (**self).remove_class(node, class);
    }
    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        (**self).attribute(node, name)
    }
    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        (**self).set_attribute(node, name, value);
    }
    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        (**self).set_style(node, property, value);
    }
    fn query(&self, selector: &Selector) -> Option<NodeId> {
        (**self).query(selector)
    }
    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        (**self).query_all(selector)
    }
    fn query_all_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        (**self).query_all_within(root, selector)
    }
    fn append_element(&self, parent: NodeId, spec: &Selector) -> NodeId {
        (**self).append_element(parent, spec)
    }
    fn scroll_into_view(&self, node: NodeId, behavior: ScrollBehavior) {
        (**self).scroll_into_view(node, behavior);
    }
    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        (**self).bounding_rect(node)
    }
    fn viewport(&self) -> Rect {
        (**self).viewport()
    }
}
