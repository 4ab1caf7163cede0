//! Math walker
//!
//! Navigation inside a math expression. In leaf traversal the cursor
//! visits the expression's tokens left to right; in tree traversal it
//! moves between nodes of the expression's syntax tree, either staying
//! on one level (climbing when a level runs out) or, with explore on,
//! walking the whole tree in preorder. Moving past either end of the
//! expression yields `None`; leaving math is the navigator's business.
//!
//! How an expression is spoken depends on the [`MathDomain`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{context_for, Description, Walker};
use crate::document::{Document, NodeId, NodeKind};
use crate::error::{ErrorType, NavError};
use crate::selection::Selection;

/// Speech rule set for math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathDomain {
    /// Symbols read as written, structures in plain words
    #[default]
    Default,
    MathSpeak,
    ClearSpeak,
}

impl MathDomain {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Default => Self::MathSpeak,
            Self::MathSpeak => Self::ClearSpeak,
            Self::ClearSpeak => Self::Default,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::MathSpeak => "mathspeak",
            Self::ClearSpeak => "clearspeak",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::MathSpeak => "MathSpeak",
            Self::ClearSpeak => "ClearSpeak",
        }
    }
}

impl fmt::Display for MathDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MathDomain {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "mathspeak" => Ok(Self::MathSpeak),
            "clearspeak" => Ok(Self::ClearSpeak),
            _ => Err(NavError::new(
                ErrorType::Parse,
                "INVALID_MATH_DOMAIN",
                format!("Unknown math domain: {s}"),
            )),
        }
    }
}

/// How the math walker moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathTraversal {
    /// Token by token
    #[default]
    Leaf,
    /// Node by node through the syntax tree
    Tree,
}

impl MathTraversal {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Leaf => Self::Tree,
            Self::Tree => Self::Leaf,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::Tree => "tree",
        }
    }
}

impl fmt::Display for MathTraversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MathTraversal {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leaf" => Ok(Self::Leaf),
            "tree" => Ok(Self::Tree),
            _ => Err(NavError::new(
                ErrorType::Parse,
                "INVALID_MATH_TRAVERSAL",
                format!("Unknown math traversal: {s}"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MathWalker {
    domain: MathDomain,
    traversal: MathTraversal,
    explore: bool,
}

impl MathWalker {
    #[must_use]
    pub const fn new(domain: MathDomain, traversal: MathTraversal, explore: bool) -> Self {
        MathWalker {
            domain,
            traversal,
            explore,
        }
    }

    #[must_use]
    pub const fn domain(&self) -> MathDomain {
        self.domain
    }

    #[must_use]
    pub const fn traversal(&self) -> MathTraversal {
        self.traversal
    }

    #[must_use]
    pub const fn explore(&self) -> bool {
        self.explore
    }

    pub fn set_domain(&mut self, domain: MathDomain) {
        self.domain = domain;
    }

    pub fn set_traversal(&mut self, traversal: MathTraversal) {
        self.traversal = traversal;
    }

    pub fn set_explore(&mut self, explore: bool) {
        self.explore = explore;
    }

    pub fn cycle_domain(&mut self) -> MathDomain {
        self.domain = self.domain.next();
        self.domain
    }

    pub fn cycle_traversal_mode(&mut self) -> MathTraversal {
        self.traversal = self.traversal.next();
        self.traversal
    }

    /// Flip explore mode; returns the new state
    pub fn toggle_explore(&mut self) -> bool {
        self.explore = !self.explore;
        self.explore
    }

    #[must_use]
    pub fn domain_msg(&self) -> String {
        format!("Domain: {}", self.domain.label())
    }

    #[must_use]
    pub fn traversal_mode_msg(&self) -> String {
        match self.traversal {
            MathTraversal::Leaf => "Traversal: leaf".to_string(),
            MathTraversal::Tree => "Traversal: syntax tree".to_string(),
        }
    }

    pub fn is_in_math(&self, doc: &Document, sel: &Selection) -> bool {
        doc.containing_math(sel.start.node).is_some()
    }

    /// Spoken form of a math node under the current domain
    pub fn speak(&self, doc: &Document, node: NodeId) -> String {
        match doc.kind(node) {
            Some(NodeKind::Math { alt }) if doc.is_leaf(node) => alt.trim().to_string(),
            Some(NodeKind::MathItem { role, text }) => self.speak_item(doc, node, role, text),
            Some(NodeKind::Text(text)) => text.trim().to_string(),
            Some(_) => self.speak_children(doc, doc.children(node)),
            None => String::new(),
        }
    }

    fn speak_children(&self, doc: &Document, children: &[NodeId]) -> String {
        children
            .iter()
            .map(|&c| self.speak(doc, c))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn speak_item(&self, doc: &Document, node: NodeId, role: &str, text: &str) -> String {
        let children = doc.children(node);
        let part = |i: usize| children.get(i).map(|&c| self.speak(doc, c)).unwrap_or_default();

        match (role, children.len()) {
            ("mo", _) => self.operator(text.trim()).to_string(),
            ("mfrac", 2) => match self.domain {
                MathDomain::Default => format!("{} over {}", part(0), part(1)),
                MathDomain::MathSpeak => {
                    format!("StartFraction {} Over {} EndFraction", part(0), part(1))
                }
                MathDomain::ClearSpeak => format!(
                    "the fraction with numerator {} and denominator {}",
                    part(0),
                    part(1)
                ),
            },
            ("msqrt", _) => {
                let inner = self.speak_children(doc, children);
                match self.domain {
                    MathDomain::Default => format!("square root of {inner}"),
                    MathDomain::MathSpeak => format!("StartRoot {inner} EndRoot"),
                    MathDomain::ClearSpeak => format!("the square root of {inner}"),
                }
            }
            ("msup", 2) => match self.domain {
                MathDomain::Default => format!("{} to the power {}", part(0), part(1)),
                MathDomain::MathSpeak => format!("{} Superscript {} Baseline", part(0), part(1)),
                MathDomain::ClearSpeak => format!("{} to the {} power", part(0), part(1)),
            },
            ("msub", 2) => match self.domain {
                MathDomain::MathSpeak => format!("{} Subscript {} Baseline", part(0), part(1)),
                _ => format!("{} sub {}", part(0), part(1)),
            },
            _ => {
                let own = text.trim();
                let rest = self.speak_children(doc, children);
                match (own.is_empty(), rest.is_empty()) {
                    (true, _) => rest,
                    (false, true) => own.to_string(),
                    (false, false) => format!("{own} {rest}"),
                }
            }
        }
    }

    fn operator<'a>(&self, symbol: &'a str) -> &'a str {
        if self.domain == MathDomain::Default {
            return symbol;
        }
        let clear = self.domain == MathDomain::ClearSpeak;
        match symbol {
            "+" => "plus",
            "-" | "\u{2212}" => "minus",
            "=" if clear => "is equal to",
            "=" => "equals",
            "\u{d7}" | "*" => "times",
            "\u{f7}" | "/" => "divided by",
            "<" if clear => "is less than",
            "<" => "less-than",
            ">" if clear => "is greater than",
            ">" => "greater-than",
            "(" if clear => "open paren",
            "(" => "left-parenthesis",
            ")" if clear => "close paren",
            ")" => "right-parenthesis",
            _ => symbol,
        }
    }

    fn step_leaf(doc: &Document, math: NodeId, node: NodeId, reversed: bool) -> Option<NodeId> {
        let leaf = if node == math {
            doc.content_leaf_within(math, reversed)
                .filter(|&l| l != math)?
        } else {
            doc.next_content_leaf(node, reversed)?
        };
        doc.contains(math, leaf).then_some(leaf)
    }

    fn step_tree(&self, doc: &Document, math: NodeId, node: NodeId, reversed: bool) -> Option<NodeId> {
        if node == math {
            let children = doc.children(math);
            return if reversed { children.last() } else { children.first() }.copied();
        }

        if self.explore {
            return if reversed {
                match doc.sibling(node, true) {
                    Some(sib) => Some(doc.last_leaf(sib)),
                    None => doc.parent(node).filter(|&p| p != math),
                }
            } else if let Some(&child) = doc.children(node).first() {
                Some(child)
            } else {
                Self::sibling_or_climb(doc, math, node, false)
            };
        }
        Self::sibling_or_climb(doc, math, node, reversed)
    }

    fn sibling_or_climb(doc: &Document, math: NodeId, node: NodeId, reversed: bool) -> Option<NodeId> {
        let mut cur = node;
        while cur != math {
            if let Some(sib) = doc.sibling(cur, reversed) {
                return Some(sib);
            }
            cur = doc.parent(cur)?;
        }
        None
    }
}

impl Walker for MathWalker {
    fn next(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let node = sel.start.node;
        let math = doc.containing_math(node)?;
        let target = match self.traversal {
            MathTraversal::Leaf => Self::step_leaf(doc, math, node, sel.reversed),
            MathTraversal::Tree => self.step_tree(doc, math, node, sel.reversed),
        }?;
        Some(Selection::node(doc, target).with_reversed(sel.reversed))
    }

    fn sync(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let node = sel.start.node;
        let math = doc.containing_math(node)?;
        let target = if doc.is_leaf(math) {
            math
        } else {
            match self.traversal {
                MathTraversal::Leaf if node == math || !doc.has_content(node) => doc
                    .content_leaf_within(node, sel.reversed)
                    .unwrap_or(math),
                MathTraversal::Tree if node == math => {
                    self.step_tree(doc, math, math, sel.reversed).unwrap_or(math)
                }
                _ => node,
            }
        };
        Some(Selection::node(doc, target).with_reversed(sel.reversed))
    }

    fn act(&self, _doc: &Document, _sel: &Selection) -> bool {
        false
    }

    fn describe(
        &self,
        doc: &Document,
        prev: Option<&Selection>,
        cur: &Selection,
    ) -> Vec<Description> {
        let node = cur.start.node;
        let annotation = match doc.kind(node) {
            Some(NodeKind::MathItem { role, .. }) if self.traversal == MathTraversal::Tree => {
                role_name(role).to_string()
            }
            _ => String::new(),
        };
        vec![Description::new(self.speak(doc, node))
            .with_context(context_for(doc, prev, cur))
            .with_annotation(annotation)]
    }

    fn granularity_label(&self) -> &'static str {
        "Math"
    }
}

fn role_name(role: &str) -> &str {
    match role {
        "mi" => "identifier",
        "mn" => "number",
        "mo" => "operator",
        "mfrac" => "fraction",
        "msqrt" => "square root",
        "msup" => "superscript",
        "msub" => "subscript",
        "mrow" => "row",
        other => other,
    }
}
