#![forbid(unsafe_code)]

//! In-memory [`Dom`] for tests.
//!
//! Elements are created from compound selectors (`"button.dots__dot"`),
//! geometry is assigned explicitly with [`MemoryDom::set_rect`], and every
//! side effect a behavior can cause (classes, inline styles, attributes,
//! scroll requests) can be read back.
//!
//! ```
//! use pagefx_core::{Dom, MemoryDom, Selector};
//!
//! let dom = MemoryDom::new();
//! let nav = dom.append(dom.body(), "nav.nav");
//! let link = dom.append(nav, "a.nav__link");
//! dom.set_style(link, "opacity", "0.5");
//!
//! assert_eq!(dom.style(link, "opacity").as_deref(), Some("0.5"));
//! assert_eq!(dom.query(&Selector::class("nav__link")), Some(link));
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{Dom, ScrollBehavior};
use crate::geometry::Rect;
use crate::node::NodeId;
use crate::selector::Selector;

const DEFAULT_VIEWPORT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1280.0,
    height: 800.0,
};

#[derive(Debug, Default)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    rect: Option<Rect>,
}

#[derive(Debug)]
struct Tree {
    elements: Vec<Element>,
    viewport: Rect,
    scrolls: Vec<(NodeId, ScrollBehavior)>,
}

impl Tree {
    fn get(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.index())
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.index())
    }

    /// Descendants of `root` in document order, `root` excluded.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .get(root)
            .map(|el| el.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(el) = self.get(node) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }
}

/// Shared, cloneable in-memory document.
///
/// Clones share the same tree, the way several behaviors share one page.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    tree: Rc<RefCell<Tree>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Create a document containing only `<body>`.
    pub fn new() -> Self {
        let body = Element {
            tag: "body".into(),
            ..Element::default()
        };
        Self {
            tree: Rc::new(RefCell::new(Tree {
                elements: vec![body],
                viewport: DEFAULT_VIEWPORT,
                scrolls: Vec::new(),
            })),
        }
    }

    /// The `<body>` element.
    pub fn body(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Append an element described by a compound selector.
    ///
    /// # Panics
    ///
    /// Panics if `spec` is not a valid selector; fixtures are written by hand.
    pub fn append(&self, parent: NodeId, spec: &str) -> NodeId {
        let spec: Selector = spec
            .parse()
            .unwrap_or_else(|err| panic!("bad fixture element `{spec}`: {err}"));
        self.append_element(parent, &spec)
    }

    /// Assign the element's viewport-relative border box.
    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        if let Some(el) = self.tree.borrow_mut().get_mut(node) {
            el.rect = Some(rect);
        }
    }

    /// Move every element with a rect by `dy` (positive scrolls content up).
    pub fn scroll_by(&self, dy: f64) {
        for el in &mut self.tree.borrow_mut().elements {
            if let Some(rect) = &mut el.rect {
                rect.y -= dy;
            }
        }
    }

    pub fn set_viewport(&self, viewport: Rect) {
        self.tree.borrow_mut().viewport = viewport;
    }

    /// Read an inline style property.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree
            .borrow()
            .get(node)
            .and_then(|el| el.styles.get(property).cloned())
    }

    /// Class list in insertion order.
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.tree
            .borrow()
            .get(node)
            .map(|el| el.classes.clone())
            .unwrap_or_default()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .borrow()
            .get(node)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    /// Every `scroll_into_view` request so far, oldest first.
    pub fn scroll_log(&self) -> Vec<(NodeId, ScrollBehavior)> {
        self.tree.borrow().scrolls.clone()
    }

    /// Number of elements, `<body>` included.
    pub fn len(&self) -> usize {
        self.tree.borrow().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the nodes under `root` (or the whole document) so the
    /// tree is not borrowed while selectors run.
    fn nodes_under(&self, root: Option<NodeId>) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        match root {
            Some(root) => tree.descendants(root),
            None => {
                let body = self.body();
                let mut all = vec![body];
                all.extend(tree.descendants(body));
                all
            }
        }
    }
}

impl Dom for MemoryDom {
    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().get(node).map(|el| el.tag.clone())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().get(node).and_then(|el| el.parent)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree
            .borrow()
            .get(node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.tree.borrow_mut().get_mut(node)
            && !el.classes.iter().any(|c| c == class)
        {
            el.classes.push(class.to_owned());
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.tree.borrow_mut().get_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let tree = self.tree.borrow();
        let el = tree.get(node)?;
        if name == "class" {
            return Some(el.classes.join(" "));
        }
        el.attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.tree.borrow_mut().get_mut(node) {
            if name == "class" {
                el.classes = value.split_whitespace().map(str::to_owned).collect();
            } else {
                el.attributes.insert(name.to_owned(), value.to_owned());
            }
        }
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(el) = self.tree.borrow_mut().get_mut(node) {
            el.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.nodes_under(None)
            .into_iter()
            .filter(|&node| selector.matches(self, node))
            .collect()
    }

    fn query_all_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.nodes_under(Some(root))
            .into_iter()
            .filter(|&node| selector.matches(self, node))
            .collect()
    }

    fn append_element(&self, parent: NodeId, spec: &Selector) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let id = NodeId::new(tree.elements.len() as u32);
        let mut attributes: BTreeMap<String, String> = spec
            .attributes()
            .iter()
            .map(|attr| (attr.name.clone(), attr.value.clone().unwrap_or_default()))
            .collect();
        if let Some(html_id) = spec.id() {
            attributes.insert("id".into(), html_id.to_owned());
        }
        tree.elements.push(Element {
            tag: spec.tag().unwrap_or("div").to_owned(),
            parent: Some(parent),
            children: Vec::new(),
            classes: spec.classes().to_vec(),
            attributes,
            styles: BTreeMap::new(),
            rect: None,
        });
        if let Some(parent) = tree.get_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    fn scroll_into_view(&self, node: NodeId, behavior: ScrollBehavior) {
        self.tree.borrow_mut().scrolls.push((node, behavior));
    }

    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        self.tree.borrow().get(node).and_then(|el| el.rect)
    }

    fn viewport(&self) -> Rect {
        self.tree.borrow().viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_applies_selector_parts() {
        let dom = MemoryDom::new();
        let img = dom.append(dom.body(), "img#hero.lazy-img[data-src=\"big.jpg\"]");
        assert_eq!(dom.tag_name(img).as_deref(), Some("img"));
        assert_eq!(dom.attribute(img, "id").as_deref(), Some("hero"));
        assert_eq!(dom.attribute(img, "data-src").as_deref(), Some("big.jpg"));
        assert!(dom.has_class(img, "lazy-img"));
        assert_eq!(dom.parent(img), Some(dom.body()));
    }

    #[test]
    fn queries_follow_document_order() {
        let dom = MemoryDom::new();
        let first = dom.append(dom.body(), "section.section");
        let second = dom.append(dom.body(), "section.section");
        // Created last but nested inside the first section.
        let nested = dom.append(first, "div.section");

        let found = dom.query_all(&Selector::class("section"));
        assert_eq!(found, vec![first, nested, second]);
        assert_eq!(dom.query_all_within(first, &Selector::class("section")), vec![nested]);
    }

    #[test]
    fn class_edits_are_idempotent() {
        let dom = MemoryDom::new();
        let el = dom.append(dom.body(), "div");
        dom.add_class(el, "hidden");
        dom.add_class(el, "hidden");
        assert_eq!(dom.classes(el), vec!["hidden".to_owned()]);
        dom.remove_class(el, "hidden");
        dom.remove_class(el, "hidden");
        assert!(dom.classes(el).is_empty());
    }

    #[test]
    fn closest_and_contains_walk_ancestors() {
        let dom = MemoryDom::new();
        let tabs = dom.append(dom.body(), "div.operations__tab-container");
        let tab = dom.append(tabs, "button.operations__tab");
        let label = dom.append(tab, "span");

        let sel: Selector = "button.operations__tab".parse().unwrap();
        assert_eq!(dom.closest(label, &sel), Some(tab));
        assert_eq!(dom.closest(tabs, &sel), None);
        assert!(dom.contains(tabs, label));
        assert!(!dom.contains(label, tabs));
    }

    #[test]
    fn stale_handles_are_ignored() {
        let dom = MemoryDom::new();
        let ghost = NodeId::new(99);
        dom.add_class(ghost, "x");
        dom.set_style(ghost, "opacity", "1");
        assert!(!dom.has_class(ghost, "x"));
        assert_eq!(dom.tag_name(ghost), None);
        assert_eq!(dom.bounding_rect(ghost), None);
    }

    #[test]
    fn scroll_by_shifts_rects() {
        let dom = MemoryDom::new();
        let el = dom.append(dom.body(), "section");
        dom.set_rect(el, Rect::new(0.0, 900.0, 100.0, 100.0));
        dom.scroll_by(400.0);
        assert_eq!(dom.bounding_rect(el), Some(Rect::new(0.0, 500.0, 100.0, 100.0)));
    }

    #[test]
    fn clones_share_the_tree() {
        let dom = MemoryDom::new();
        let other = dom.clone();
        let el = other.append(other.body(), "p");
        assert_eq!(dom.tag_name(el).as_deref(), Some("p"));
    }
}
