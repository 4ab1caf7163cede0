//! Cursor selections over the content tree
//!
//! A [`Selection`] is a plain value: every walker operation takes one by
//! reference and hands back a fresh one. Offsets are character indices
//! inside text leaves and child indices inside containers.

use crate::document::{Document, NodeId};

/// One end of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub node: NodeId,
    pub offset: usize,
}

impl Anchor {
    #[must_use]
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Anchor { node, offset }
    }
}

/// Directed range over the content tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: Anchor,
    pub end: Anchor,
    /// Travel backwards when moving from this selection
    pub reversed: bool,
}

impl Selection {
    #[must_use]
    pub const fn new(start: Anchor, end: Anchor, reversed: bool) -> Self {
        Selection {
            start,
            end,
            reversed,
        }
    }

    /// Selection spanning the whole of `node`
    #[must_use]
    pub fn node(doc: &Document, node: NodeId) -> Self {
        Selection::new(
            Anchor::new(node, 0),
            Anchor::new(node, doc.extent(node)),
            false,
        )
    }

    /// Selection of characters `start..end` inside a text leaf
    #[must_use]
    pub const fn text(leaf: NodeId, start: usize, end: usize) -> Self {
        Selection::new(Anchor::new(leaf, start), Anchor::new(leaf, end), false)
    }

    /// Collapsed selection at a single point
    #[must_use]
    pub const fn caret(node: NodeId, offset: usize) -> Self {
        Selection::text(node, offset, offset)
    }

    /// Copy of this selection travelling in the given direction
    #[must_use]
    pub const fn with_reversed(self, reversed: bool) -> Self {
        Selection::new(self.start, self.end, reversed)
    }

    /// End that leads in the direction of travel: `start` forwards, `end` backwards
    #[must_use]
    pub const fn focus(&self) -> Anchor {
        if self.reversed {
            self.end
        } else {
            self.start
        }
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Whether the selection spans exactly one whole node
    #[must_use]
    pub fn is_node(&self, doc: &Document, node: NodeId) -> bool {
        self.start == Anchor::new(node, 0) && self.end == Anchor::new(node, doc.extent(node))
    }
}
