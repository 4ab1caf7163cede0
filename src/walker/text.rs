//! Character, word, sentence and line walkers
//!
//! Units live inside text leaves. Non-text content (images, math tokens
//! without text children) counts as a single unit. Moving past the last
//! unit of a leaf continues with the first unit of the next content leaf.

use std::ops::Range;

use super::{describe_selection, sync_point, travel_point, Description, Walker};
use crate::document::{Document, NodeId, NodeKind};
use crate::movement::{char_spans, line_spans, sentence_spans, word_spans};
use crate::selection::Selection;

/// Text unit a [`TextWalker`] moves by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextUnit {
    Character,
    Word,
    Sentence,
    /// Display lines wrapped at `width` columns
    Line { width: usize },
}

/// Walker over text units
#[derive(Debug, Clone, Copy)]
pub struct TextWalker {
    unit: TextUnit,
}

impl TextWalker {
    #[must_use]
    pub const fn new(unit: TextUnit) -> Self {
        TextWalker { unit }
    }

    #[must_use]
    pub const fn unit(&self) -> TextUnit {
        self.unit
    }

    fn spans(&self, text: &str) -> Vec<Range<usize>> {
        match self.unit {
            TextUnit::Character => char_spans(text),
            TextUnit::Word => word_spans(text),
            TextUnit::Sentence => sentence_spans(text),
            TextUnit::Line { width } => line_spans(text, width),
        }
    }

    /// First (or last) unit of a content leaf
    fn edge_unit(&self, doc: &Document, leaf: NodeId, reversed: bool) -> Option<Selection> {
        let sel = match doc.text(leaf) {
            Some(text) => {
                let spans = self.spans(text);
                let span = if reversed { spans.last() } else { spans.first() }?;
                Selection::text(leaf, span.start, span.end)
            }
            None => Selection::node(doc, leaf),
        };
        Some(sel.with_reversed(reversed))
    }
}

impl Walker for TextWalker {
    fn next(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let (node, offset) = travel_point(doc, sel)?;

        if let Some(text) = doc.text(node) {
            let spans = self.spans(text);
            let found = if sel.reversed {
                spans.iter().rev().find(|s| s.end <= offset)
            } else {
                spans.iter().find(|s| s.start >= offset)
            };
            if let Some(span) = found {
                return Some(Selection::text(node, span.start, span.end).with_reversed(sel.reversed));
            }
        }

        let mut leaf = doc.next_content_leaf(node, sel.reversed)?;
        loop {
            if let Some(unit) = self.edge_unit(doc, leaf, sel.reversed) {
                return Some(unit);
            }
            leaf = doc.next_content_leaf(leaf, sel.reversed)?;
        }
    }

    fn sync(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let (leaf, offset) = sync_point(doc, sel)?;
        let Some(text) = doc.text(leaf) else {
            return Some(Selection::node(doc, leaf).with_reversed(sel.reversed));
        };

        let spans = self.spans(text);
        let span = spans
            .iter()
            .find(|s| s.contains(&offset))
            .or_else(|| {
                // Offset sits between units (whitespace): take the nearest one
                if sel.reversed {
                    spans.iter().rev().find(|s| s.end <= offset)
                } else {
                    spans.iter().find(|s| s.start >= offset)
                }
            })
            .or_else(|| if sel.reversed { spans.first() } else { spans.last() })?;

        Some(Selection::text(leaf, span.start, span.end).with_reversed(sel.reversed))
    }

    fn act(&self, doc: &Document, sel: &Selection) -> bool {
        doc.find_ancestor(sel.start.node, NodeKind::is_focusable)
            .is_some()
    }

    fn describe(
        &self,
        doc: &Document,
        prev: Option<&Selection>,
        cur: &Selection,
    ) -> Vec<Description> {
        let mut descriptions = describe_selection(doc, prev, cur);
        if self.unit == TextUnit::Character {
            for desc in &mut descriptions {
                if let Some(name) = whitespace_name(&desc.text) {
                    desc.text = name.to_string();
                }
            }
        }
        descriptions
    }

    fn granularity_label(&self) -> &'static str {
        match self.unit {
            TextUnit::Character => "Character",
            TextUnit::Word => "Word",
            TextUnit::Sentence => "Sentence",
            TextUnit::Line { .. } => "Line",
        }
    }
}

fn whitespace_name(text: &str) -> Option<&'static str> {
    match text {
        " " => Some("space"),
        "\t" => Some("tab"),
        "\n" => Some("new line"),
        _ => None,
    }
}
