//! Traversal strategies, one per granularity or mode
//!
//! A [`Walker`] knows how to move a [`Selection`] by one unit of its
//! granularity, how to snap an arbitrary selection onto its unit
//! boundaries, and how to describe where the cursor landed. Walkers never
//! touch navigator state; the only state they own is their own (for
//! example the math walker's speech domain).
//!
//! ## Walkers
//!
//! - [`TextWalker`] - characters, words, sentences, wrapped lines
//! - [`ObjectWalker`] - leaf objects and focusable controls
//! - [`BlockWalker`] - structural groups and top-level visual regions
//! - [`TableWalker`] - cell-by-cell table navigation
//! - [`MathWalker`] - math expression exploration
//! - [`Filtered`] - decorator restricting where another walker may stop

pub mod block;
pub mod filter;
pub mod math;
pub mod object;
pub mod table;
pub mod text;

pub use block::{BlockKind, BlockWalker};
pub use filter::{Filtered, NodeFilter};
pub use math::{MathDomain, MathTraversal, MathWalker};
pub use object::ObjectWalker;
pub use table::TableWalker;
pub use text::{TextUnit, TextWalker};

use crate::document::{Document, NodeId, NodeKind};
use crate::selection::Selection;

/// Spoken description of one navigation step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Description {
    /// Containers entered since the previous position
    pub context: String,
    /// The content itself
    pub text: String,
    /// Role of the content (link, heading, cell location, ...)
    pub annotation: String,
}

impl Description {
    pub fn new(text: impl Into<String>) -> Self {
        Description {
            text: text.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }

    /// The utterance a speech engine would receive
    #[must_use]
    pub fn spoken(&self) -> String {
        [&self.context, &self.text, &self.annotation]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Braille line for one navigation step
///
/// `start..end` is the character range of the selected content inside
/// `text`, used to place the braille cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Braille {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Braille {
    /// Build a braille line from spoken descriptions
    ///
    /// Roles are contracted to their usual braille abbreviations; the
    /// cursor range covers the first description's text.
    #[must_use]
    pub fn from_descriptions(descriptions: &[Description]) -> Self {
        let mut line = Braille::default();
        for (i, desc) in descriptions.iter().enumerate() {
            if !desc.context.is_empty() {
                push_word(&mut line.text, &desc.context);
            }
            let at = push_word(&mut line.text, &desc.text);
            if i == 0 {
                line.start = at;
                line.end = at + desc.text.chars().count();
            }
            if !desc.annotation.is_empty() {
                push_word(&mut line.text, &abbreviate(&desc.annotation));
            }
        }
        line
    }
}

/// Append `word` separated by a space; returns the char offset it starts at
fn push_word(text: &mut String, word: &str) -> usize {
    if !text.is_empty() {
        text.push(' ');
    }
    let at = text.chars().count();
    text.push_str(word);
    at
}

fn abbreviate(role: &str) -> String {
    match role {
        "Link" => "lnk".to_string(),
        "Button" => "btn".to_string(),
        "Image" => "img".to_string(),
        "Math" => "math".to_string(),
        _ => match role.strip_prefix("Heading ") {
            Some(level) => format!("h{level}"),
            None => role.to_string(),
        },
    }
}

/// Caller-supplied match over an ancestor chain (innermost node first)
pub type AncestorPredicate<'a> = dyn Fn(&Document, &[NodeId]) -> bool + 'a;

/// Traversal over one granularity or mode
pub trait Walker {
    /// Move one unit in the selection's direction; `None` at the content boundary
    fn next(&self, doc: &Document, sel: &Selection) -> Option<Selection>;

    /// Snap an arbitrary selection onto this walker's unit boundaries
    fn sync(&self, doc: &Document, sel: &Selection) -> Option<Selection>;

    /// Whether the selection has something to activate
    fn act(&self, doc: &Document, sel: &Selection) -> bool;

    /// Describe `cur`, mentioning what changed since `prev`
    fn describe(
        &self,
        doc: &Document,
        prev: Option<&Selection>,
        cur: &Selection,
    ) -> Vec<Description>;

    fn braille_describe(&self, doc: &Document, prev: Option<&Selection>, cur: &Selection) -> Braille {
        Braille::from_descriptions(&self.describe(doc, prev, cur))
    }

    /// Human-readable name of the granularity, e.g. "Word"
    fn granularity_label(&self) -> &'static str;

    /// Keep moving until a unit whose ancestor chain matches `predicate`
    fn find_next(
        &self,
        doc: &Document,
        sel: &Selection,
        predicate: &AncestorPredicate<'_>,
    ) -> Option<Selection> {
        let mut cur = *sel;
        loop {
            let next = self.next(doc, &cur)?;
            if next == cur {
                return None;
            }
            if predicate(doc, &doc.ancestors(next.start.node)) {
                return Some(next);
            }
            cur = next;
        }
    }
}

impl<W: Walker + ?Sized> Walker for Box<W> {
    fn next(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        (**self).next(doc, sel)
    }

    fn sync(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        (**self).sync(doc, sel)
    }

    fn act(&self, doc: &Document, sel: &Selection) -> bool {
        (**self).act(doc, sel)
    }

    fn describe(
        &self,
        doc: &Document,
        prev: Option<&Selection>,
        cur: &Selection,
    ) -> Vec<Description> {
        (**self).describe(doc, prev, cur)
    }

    fn braille_describe(&self, doc: &Document, prev: Option<&Selection>, cur: &Selection) -> Braille {
        (**self).braille_describe(doc, prev, cur)
    }

    fn granularity_label(&self) -> &'static str {
        (**self).granularity_label()
    }

    fn find_next(
        &self,
        doc: &Document,
        sel: &Selection,
        predicate: &AncestorPredicate<'_>,
    ) -> Option<Selection> {
        (**self).find_next(doc, sel, predicate)
    }
}

/// Leaf and char offset a selection snaps around when syncing
///
/// Forwards this is the first content at the selection's start, backwards
/// the last content before its end. Leaves without content and empty
/// containers defer to the next content leaf in the direction of travel.
pub(crate) fn sync_point(doc: &Document, sel: &Selection) -> Option<(NodeId, usize)> {
    let anchor = sel.focus();
    let node = anchor.node;
    doc.node(node)?;

    if doc.is_leaf(node) && doc.has_content(node) {
        let offset = if sel.reversed {
            anchor.offset.saturating_sub(1)
        } else {
            anchor.offset
        };
        return Some((node, offset.min(doc.extent(node).saturating_sub(1))));
    }

    let leaf = if doc.is_leaf(node) {
        doc.next_content_leaf(node, sel.reversed)?
    } else {
        doc.content_leaf_within(node, sel.reversed)
            .or_else(|| doc.next_content_leaf(node, sel.reversed))?
    };
    Some(leaf_edge(doc, leaf, sel.reversed))
}

fn leaf_edge(doc: &Document, leaf: NodeId, reversed: bool) -> (NodeId, usize) {
    if reversed {
        (leaf, doc.extent(leaf).saturating_sub(1))
    } else {
        (leaf, 0)
    }
}

/// Leaf and char offset a selection is left from when moving
///
/// Forwards this is the selection's end, backwards its start. Container
/// anchors are narrowed to their last (or first) content leaf.
pub(crate) fn travel_point(doc: &Document, sel: &Selection) -> Option<(NodeId, usize)> {
    let anchor = if sel.reversed { sel.start } else { sel.end };
    let node = anchor.node;
    doc.node(node)?;

    if doc.is_leaf(node) {
        return Some((node, anchor.offset));
    }
    Some(match doc.content_leaf_within(node, !sel.reversed) {
        Some(leaf) if sel.reversed => (leaf, 0),
        Some(leaf) => (leaf, doc.extent(leaf)),
        None if sel.reversed => (node, 0),
        None => (node, doc.extent(node)),
    })
}

/// Roles of containers `cur` is inside of that `prev` was not, outermost first
pub(crate) fn context_for(doc: &Document, prev: Option<&Selection>, cur: &Selection) -> String {
    let prev_chain = prev
        .map(|p| doc.ancestors(p.start.node))
        .unwrap_or_default();

    doc.ancestors(cur.start.node)
        .into_iter()
        .rev()
        .filter(|n| !prev_chain.contains(n))
        .filter(|&n| {
            matches!(
                doc.kind(n),
                Some(
                    NodeKind::Section { .. }
                        | NodeKind::List
                        | NodeKind::Table { .. }
                        | NodeKind::Math { .. }
                )
            )
        })
        .filter_map(|n| doc.role(n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Role of the nearest heading, control or image around `node`
pub(crate) fn annotation_for(doc: &Document, node: NodeId) -> String {
    doc.find_ancestor(node, |k| {
        matches!(
            k,
            NodeKind::Heading { .. } | NodeKind::Link { .. } | NodeKind::Button | NodeKind::Image { .. }
        )
    })
    .and_then(|n| doc.role(n))
    .unwrap_or_default()
}

/// Text covered by a selection
pub(crate) fn selected_text(doc: &Document, sel: &Selection) -> String {
    if sel.start.node == sel.end.node {
        if let Some(text) = doc.text(sel.start.node) {
            let len = sel.end.offset.saturating_sub(sel.start.offset);
            return text.chars().skip(sel.start.offset).take(len).collect();
        }
        return doc.text_of(sel.start.node);
    }
    format!(
        "{} {}",
        doc.text_of(sel.start.node),
        doc.text_of(sel.end.node)
    )
}

/// Description used by walkers with no special rendering
pub(crate) fn describe_selection(
    doc: &Document,
    prev: Option<&Selection>,
    cur: &Selection,
) -> Vec<Description> {
    vec![Description::new(selected_text(doc, cur))
        .with_context(context_for(doc, prev, cur))
        .with_annotation(annotation_for(doc, cur.start.node))]
}
