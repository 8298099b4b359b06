#![forbid(unsafe_code)]

//! Input events delivered to page behaviors.
//!
//! Events carry the raw target node; behaviors that listen on a container
//! resolve the element they care about by walking up from the target
//! (delegation). Viewport changes arrive as [`Event::Scroll`], which is what
//! drives visibility observation.

use bitflags::bitflags;

use crate::geometry::Rect;
use crate::node::NodeId;

/// A page input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A key was pressed or released anywhere on the document.
    Key(KeyEvent),
    /// A primary-button click on `target`.
    Click(PointerEvent),
    /// The pointer entered `target` (bubbles, like `mouseover`).
    PointerOver(PointerEvent),
    /// The pointer left `target` (bubbles, like `mouseout`).
    PointerOut(PointerEvent),
    /// The viewport moved or resized. Carries the new viewport rectangle.
    Scroll(Rect),
    /// A resource (image) finished loading.
    Load(NodeId),
}

impl Event {
    /// Convenience constructor for a key press.
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
        })
    }

    /// Convenience constructor for a click.
    pub const fn click(target: NodeId) -> Self {
        Self::Click(PointerEvent { target })
    }

    /// The node the event was dispatched to, if any.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Self::Click(p) | Self::PointerOver(p) | Self::PointerOut(p) => Some(p.target),
            Self::Load(node) => Some(*node),
            Self::Key(_) | Self::Scroll(_) => None,
        }
    }
}

/// Keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Whether this is a press of `code`.
    #[inline]
    pub fn is_press(&self, code: KeyCode) -> bool {
        self.kind == KeyEventKind::Press && self.code == code
    }
}

/// Press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Release,
}

/// Logical key, named after the DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Enter,
    Tab,
    Char(char),
}

impl KeyCode {
    /// Parse a DOM `KeyboardEvent.key` string.
    ///
    /// Returns `None` for keys no behavior listens to.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        let code = match key {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

/// Pointer event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The innermost element under the pointer.
    pub target: NodeId,
}

bitflags! {
    /// What a behavior did with an event.
    ///
    /// Outcomes from several behaviors are OR-ed together by the page.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Outcome: u8 {
        /// The behavior reacted to the event.
        const HANDLED = 0b01;
        /// The host should suppress the browser default action.
        const PREVENT_DEFAULT = 0b10;
    }
}

impl Outcome {
    /// Nothing happened.
    pub const IGNORED: Self = Self::empty();

    /// Whether any behavior reacted.
    #[inline]
    pub fn is_handled(self) -> bool {
        self.contains(Self::HANDLED)
    }

    /// Whether the host should call `preventDefault`.
    #[inline]
    pub fn prevents_default(self) -> bool {
        self.contains(Self::PREVENT_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_names_parse() {
        assert_eq!(KeyCode::from_dom_key("ArrowLeft"), Some(KeyCode::ArrowLeft));
        assert_eq!(KeyCode::from_dom_key("Right"), Some(KeyCode::ArrowRight));
        assert_eq!(KeyCode::from_dom_key("Esc"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_dom_key("a"), Some(KeyCode::Char('a')));
        assert_eq!(KeyCode::from_dom_key("Shift"), None);
        assert_eq!(KeyCode::from_dom_key(""), None);
    }

    #[test]
    fn key_press_helper() {
        let Event::Key(key) = Event::key(KeyCode::Escape) else {
            panic!("expected key event");
        };
        assert!(key.is_press(KeyCode::Escape));
        assert!(!key.is_press(KeyCode::Enter));

        let release = KeyEvent {
            code: KeyCode::Escape,
            kind: KeyEventKind::Release,
        };
        assert!(!release.is_press(KeyCode::Escape));
    }

    #[test]
    fn target_for_pointer_and_load() {
        let node = NodeId::new(3);
        assert_eq!(Event::click(node).target(), Some(node));
        assert_eq!(Event::Load(node).target(), Some(node));
        assert_eq!(Event::key(KeyCode::Enter).target(), None);
    }

    #[test]
    fn outcomes_combine() {
        let combined = Outcome::HANDLED | Outcome::PREVENT_DEFAULT;
        assert!(combined.is_handled());
        assert!(combined.prevents_default());
        assert!(!Outcome::IGNORED.is_handled());
    }
}
