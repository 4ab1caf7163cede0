//! JSON document loading
//!
//! ```json
//! {
//!   "kind": "document",
//!   "children": [
//!     { "kind": "heading", "level": 1, "children": ["Prices"] },
//!     { "kind": "paragraph", "children": ["Plain strings become text."] }
//!   ]
//! }
//! ```
//!
//! A top-level node that is not a `document` is wrapped in one.

use serde::Deserialize;

use super::{Document, NodeId, NodeKind};
use crate::error::{ErrorType, NavError, Result};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChildSpec {
    Text(String),
    Node(NodeSpec),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum NodeSpec {
    Document {
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    Section {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    Heading {
        #[serde(default = "default_level")]
        level: u8,
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    Paragraph {
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    List {
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    ListItem {
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    Text {
        text: String,
    },
    Link {
        #[serde(default)]
        href: String,
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    Button {
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    Image {
        #[serde(default)]
        alt: String,
    },
    Table {
        #[serde(default)]
        layout: bool,
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    Row {
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    Cell {
        #[serde(default)]
        header: bool,
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    Math {
        #[serde(default)]
        alt: String,
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
    MathItem {
        role: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        children: Vec<ChildSpec>,
    },
}

fn default_level() -> u8 {
    2
}

impl NodeSpec {
    fn into_parts(self) -> (NodeKind, Vec<ChildSpec>) {
        match self {
            NodeSpec::Document { children } => (NodeKind::Document, children),
            NodeSpec::Section { label, children } => (NodeKind::Section { label }, children),
            NodeSpec::Heading { level, children } => (NodeKind::Heading { level }, children),
            NodeSpec::Paragraph { children } => (NodeKind::Paragraph, children),
            NodeSpec::List { children } => (NodeKind::List, children),
            NodeSpec::ListItem { children } => (NodeKind::ListItem, children),
            NodeSpec::Text { text } => (NodeKind::Text(text), Vec::new()),
            NodeSpec::Link { href, children } => (NodeKind::Link { href }, children),
            NodeSpec::Button { children } => (NodeKind::Button, children),
            NodeSpec::Image { alt } => (NodeKind::Image { alt }, Vec::new()),
            NodeSpec::Table { layout, children } => (NodeKind::Table { layout }, children),
            NodeSpec::Row { children } => (NodeKind::Row, children),
            NodeSpec::Cell { header, children } => (NodeKind::Cell { header }, children),
            NodeSpec::Math { alt, children } => (NodeKind::Math { alt }, children),
            NodeSpec::MathItem {
                role,
                text,
                children,
            } => (NodeKind::MathItem { role, text }, children),
        }
    }
}

impl Document {
    /// Parse a document from its JSON description
    pub fn from_json(input: &str) -> Result<Self> {
        let spec: NodeSpec = serde_json::from_str(input).map_err(|e| {
            NavError::new(
                ErrorType::Document,
                "INVALID_DOCUMENT",
                format!("Invalid document: {e}"),
            )
        })?;

        let mut doc = Document::new();
        let root = doc.root();
        match spec.into_parts() {
            (NodeKind::Document, children) => {
                for child in children {
                    attach(&mut doc, root, child)?;
                }
            }
            (kind, children) => {
                let id = doc.append(root, kind);
                for child in children {
                    attach(&mut doc, id, child)?;
                }
            }
        }
        Ok(doc)
    }
}

fn attach(doc: &mut Document, parent: NodeId, child: ChildSpec) -> Result<()> {
    match child {
        ChildSpec::Text(text) => {
            doc.append_text(parent, &text);
        }
        ChildSpec::Node(spec) => {
            let (kind, children) = spec.into_parts();
            if kind == NodeKind::Document {
                return Err(NavError::new(
                    ErrorType::Document,
                    "NESTED_DOCUMENT",
                    "A document node may only appear at the top level",
                ));
            }
            let id = doc.append(parent, kind);
            for grandchild in children {
                attach(doc, id, grandchild)?;
            }
        }
    }
    Ok(())
}
