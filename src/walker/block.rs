//! Group and visual-region walkers
//!
//! Both move between containers: groups are the nearest heading,
//! paragraph, list item, cell or math expression around the content;
//! visual regions are the top-level children of the document.

use super::{annotation_for, context_for, sync_point, travel_point, Description, Walker};
use crate::document::{Document, NodeId, NodeKind};
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Group,
    Visual,
}

#[derive(Debug, Clone, Copy)]
pub struct BlockWalker {
    kind: BlockKind,
}

impl BlockWalker {
    #[must_use]
    pub const fn new(kind: BlockKind) -> Self {
        BlockWalker { kind }
    }

    #[must_use]
    pub const fn group() -> Self {
        Self::new(BlockKind::Group)
    }

    #[must_use]
    pub const fn visual() -> Self {
        Self::new(BlockKind::Visual)
    }

    /// The block containing `node`; content outside any block is its own block
    pub fn block_of(&self, doc: &Document, node: NodeId) -> NodeId {
        match self.kind {
            BlockKind::Group => doc.find_ancestor(node, NodeKind::is_group).unwrap_or(node),
            BlockKind::Visual => {
                let chain = doc.ancestors(node);
                match chain.len() {
                    0 | 1 => node,
                    n => chain[n - 2],
                }
            }
        }
    }
}

impl Walker for BlockWalker {
    fn next(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let (node, _) = travel_point(doc, sel)?;
        let current = self.block_of(doc, node);
        let leaf = doc.next_content_leaf(current, sel.reversed)?;
        Some(Selection::node(doc, self.block_of(doc, leaf)).with_reversed(sel.reversed))
    }

    fn sync(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let (leaf, _) = sync_point(doc, sel)?;
        Some(Selection::node(doc, self.block_of(doc, leaf)).with_reversed(sel.reversed))
    }

    fn act(&self, doc: &Document, sel: &Selection) -> bool {
        let block = sel.start.node;
        doc.is_focusable(block) || doc.focusable_descendants(block) == 1
    }

    fn describe(
        &self,
        doc: &Document,
        prev: Option<&Selection>,
        cur: &Selection,
    ) -> Vec<Description> {
        let block = cur.start.node;
        vec![Description::new(doc.text_of(block))
            .with_context(context_for(doc, prev, cur))
            .with_annotation(annotation_for(doc, block))]
    }

    fn granularity_label(&self) -> &'static str {
        match self.kind {
            BlockKind::Group => "Group",
            BlockKind::Visual => "Visual",
        }
    }
}
