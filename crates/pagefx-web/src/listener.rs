#![forbid(unsafe_code)]

//! Browser event subscriptions.
//!
//! Every behavior is driven by document-level delegation, so the page needs
//! a fixed set of listeners regardless of which behaviors mounted.

use pagefx_core::{Event, KeyCode, KeyEvent, KeyEventKind, NodeId, PointerEvent, Rect};

/// One browser event subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Click,
    KeyDown,
    MouseOver,
    MouseOut,
    Scroll,
    Resize,
    Load,
}

impl ListenerKind {
    pub const ALL: [Self; 7] = [
        Self::Click,
        Self::KeyDown,
        Self::MouseOver,
        Self::MouseOut,
        Self::Scroll,
        Self::Resize,
        Self::Load,
    ];

    /// DOM event type string.
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::MouseOver => "mouseover",
            Self::MouseOut => "mouseout",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::Load => "load",
        }
    }

    /// Whether the listener goes on `window` rather than `document`.
    pub const fn on_window(self) -> bool {
        matches!(self, Self::Scroll | Self::Resize)
    }

    /// `load` does not bubble, so it is caught in the capture phase.
    pub const fn capture(self) -> bool {
        matches!(self, Self::Load)
    }

    /// Translate a browser event into a page event.
    ///
    /// `target` is the event target already mapped to a node, `key` the
    /// `KeyboardEvent.key` string and `viewport` the current viewport.
    /// Returns `None` when the event carries nothing a behavior can use.
    pub fn to_event(
        self,
        target: Option<NodeId>,
        key: Option<&str>,
        viewport: Rect,
    ) -> Option<Event> {
        match self {
            Self::Click => target.map(Event::click),
            Self::MouseOver => target.map(|target| Event::PointerOver(PointerEvent { target })),
            Self::MouseOut => target.map(|target| Event::PointerOut(PointerEvent { target })),
            Self::Load => target.map(Event::Load),
            Self::KeyDown => key.and_then(KeyCode::from_dom_key).map(|code| {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                })
            }),
            Self::Scroll | Self::Resize => Some(Event::Scroll(viewport)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_viewport_events_listen_on_window() {
        let on_window: Vec<_> = ListenerKind::ALL
            .into_iter()
            .filter(|k| k.on_window())
            .map(ListenerKind::event_type)
            .collect();
        assert_eq!(on_window, vec!["scroll", "resize"]);
    }

    #[test]
    fn load_is_captured() {
        assert!(ListenerKind::Load.capture());
        assert!(!ListenerKind::Click.capture());
    }

    #[test]
    fn keydown_maps_known_keys() {
        let vp = Rect::default();
        assert_eq!(
            ListenerKind::KeyDown.to_event(None, Some("Escape"), vp),
            Some(Event::key(KeyCode::Escape))
        );
        assert_eq!(ListenerKind::KeyDown.to_event(None, Some("Shift"), vp), None);
        assert_eq!(ListenerKind::KeyDown.to_event(None, None, vp), None);
    }

    #[test]
    fn pointer_events_need_a_target() {
        let vp = Rect::default();
        let node = NodeId::new(4);
        assert_eq!(
            ListenerKind::Click.to_event(Some(node), None, vp),
            Some(Event::click(node))
        );
        assert_eq!(ListenerKind::MouseOut.to_event(None, None, vp), None);
    }

    #[test]
    fn resize_reports_viewport() {
        let vp = Rect::new(0.0, 0.0, 390.0, 844.0);
        assert_eq!(
            ListenerKind::Resize.to_event(None, None, vp),
            Some(Event::Scroll(vp))
        );
    }
}
