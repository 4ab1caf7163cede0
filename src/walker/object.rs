//! Object walker
//!
//! Stops once per content leaf, except that a link, button or math
//! expression is a single object however many leaves it contains.

use super::{describe_selection, sync_point, travel_point, Description, Walker};
use crate::document::{Document, NodeId, NodeKind};
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectWalker;

impl ObjectWalker {
    #[must_use]
    pub const fn new() -> Self {
        ObjectWalker
    }

    /// The object a node belongs to
    pub fn object_of(doc: &Document, node: NodeId) -> NodeId {
        doc.find_ancestor(node, |k| k.is_focusable() || matches!(k, NodeKind::Math { .. }))
            .unwrap_or(node)
    }
}

impl Walker for ObjectWalker {
    fn next(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let (node, _) = travel_point(doc, sel)?;
        let current = Self::object_of(doc, node);
        let leaf = doc.next_content_leaf(current, sel.reversed)?;
        Some(Selection::node(doc, Self::object_of(doc, leaf)).with_reversed(sel.reversed))
    }

    fn sync(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let (leaf, _) = sync_point(doc, sel)?;
        Some(Selection::node(doc, Self::object_of(doc, leaf)).with_reversed(sel.reversed))
    }

    fn act(&self, doc: &Document, sel: &Selection) -> bool {
        doc.is_focusable(Self::object_of(doc, sel.start.node))
    }

    fn describe(
        &self,
        doc: &Document,
        prev: Option<&Selection>,
        cur: &Selection,
    ) -> Vec<Description> {
        describe_selection(doc, prev, cur)
    }

    fn granularity_label(&self) -> &'static str {
        "Object"
    }
}
