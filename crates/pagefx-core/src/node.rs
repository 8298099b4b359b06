#![forbid(unsafe_code)]

//! Opaque node handles.

use core::fmt;

/// Handle to one element of the page.
///
/// Handles are issued by a [`Dom`](crate::dom::Dom) implementation and are
/// only meaningful to the DOM that issued them. They are `Copy` and compare
/// by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw handle value.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw handle value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Raw value as an index into a DOM's node table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
