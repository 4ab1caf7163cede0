//! Reference content tree
//!
//! An arena of nodes standing in for the host's accessibility tree. The
//! navigator itself only asks the handful of questions listed below
//! (containing table, containing math, layout table, next leaf, content,
//! focusable descendants); the walkers use the rest.
//!
//! ## Document order
//!
//! Leaves are visited depth first, left to right. [`Document::next_leaf`]
//! always steps *out* of the given node's subtree, so calling it on a
//! container skips everything inside it.

pub mod json;

/// Index of a node in its [`Document`]
pub type NodeId = usize;

/// Kind of a content node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of the tree
    Document,
    /// Landmark region, optionally labelled
    Section { label: Option<String> },
    /// Heading with level 1-6
    Heading { level: u8 },
    Paragraph,
    List,
    ListItem,
    /// Run of text (always a leaf)
    Text(String),
    Link { href: String },
    Button,
    /// Image with alternative text (always a leaf)
    Image { alt: String },
    /// Table; `layout` marks tables used purely for visual arrangement
    Table { layout: bool },
    Row,
    Cell { header: bool },
    /// Math expression; `alt` is spoken when it has no children
    Math { alt: String },
    /// Element inside a math expression (`mi`, `mo`, `mn`, `mfrac`, ...)
    MathItem { role: String, text: String },
}

impl NodeKind {
    /// Whether this kind accepts keyboard focus
    pub fn is_focusable(&self) -> bool {
        matches!(self, NodeKind::Link { .. } | NodeKind::Button)
    }

    /// Whether this kind forms a structural group
    pub fn is_group(&self) -> bool {
        matches!(
            self,
            NodeKind::Heading { .. }
                | NodeKind::Paragraph
                | NodeKind::ListItem
                | NodeKind::Cell { .. }
                | NodeKind::Math { .. }
        )
    }
}

/// A single node in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Content tree owned by one navigation session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document containing only its root
    #[must_use]
    pub fn new() -> Self {
        Document {
            nodes: vec![Node {
                id: 0,
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root node
    #[must_use]
    pub fn root(&self) -> NodeId {
        0
    }

    /// Append a node as the last child of `parent`
    ///
    /// # Panics
    /// Panics if `parent` is not a node of this document.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Append a text leaf
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append(parent, NodeKind::Text(text.to_string()))
    }

    /// Number of nodes, root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id).map(|n| &n.kind)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children(id).is_empty()
    }

    /// Chain from `id` up to the root, `id` first
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cur = self.node(id).map(|n| n.id);
        while let Some(n) = cur {
            chain.push(n);
            cur = self.parent(n);
        }
        chain
    }

    /// Whether `node` is `ancestor` or lies inside it
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Nearest ancestor-or-self matching `pred`
    pub fn find_ancestor(&self, id: NodeId, pred: impl Fn(&NodeKind) -> bool) -> Option<NodeId> {
        self.ancestors(id)
            .into_iter()
            .find(|&n| self.kind(n).is_some_and(&pred))
    }

    /// Position of `id` among its parent's children
    fn index_in_parent(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(id)?;
        let idx = self.children(parent).iter().position(|&c| c == id)?;
        Some((parent, idx))
    }

    /// Sibling after (or before, when `reversed`) `id`
    #[must_use]
    pub fn sibling(&self, id: NodeId, reversed: bool) -> Option<NodeId> {
        let (parent, idx) = self.index_in_parent(id)?;
        let siblings = self.children(parent);
        if reversed {
            idx.checked_sub(1).map(|i| siblings[i])
        } else {
            siblings.get(idx + 1).copied()
        }
    }

    /// Deepest first leaf of the subtree at `id`
    #[must_use]
    pub fn first_leaf(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        while let Some(&child) = self.children(cur).first() {
            cur = child;
        }
        cur
    }

    /// Deepest last leaf of the subtree at `id`
    #[must_use]
    pub fn last_leaf(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        while let Some(&child) = self.children(cur).last() {
            cur = child;
        }
        cur
    }

    /// First leaf strictly after (or before) the subtree of `id`
    #[must_use]
    pub fn next_leaf(&self, id: NodeId, reversed: bool) -> Option<NodeId> {
        let mut cur = id;
        loop {
            if let Some(sib) = self.sibling(cur, reversed) {
                return Some(if reversed {
                    self.last_leaf(sib)
                } else {
                    self.first_leaf(sib)
                });
            }
            cur = self.parent(cur)?;
        }
    }

    /// Whether a leaf carries something worth speaking
    #[must_use]
    pub fn has_content(&self, id: NodeId) -> bool {
        if !self.is_leaf(id) {
            return false;
        }
        match self.kind(id) {
            Some(NodeKind::Text(text)) => !text.trim().is_empty(),
            Some(NodeKind::Image { .. }) => true,
            Some(NodeKind::MathItem { text, .. }) => !text.trim().is_empty(),
            Some(NodeKind::Math { alt }) => !alt.trim().is_empty(),
            _ => false,
        }
    }

    /// Next content-bearing leaf after (or before) the subtree of `id`
    #[must_use]
    pub fn next_content_leaf(&self, id: NodeId, reversed: bool) -> Option<NodeId> {
        let mut cur = self.next_leaf(id, reversed)?;
        while !self.has_content(cur) {
            cur = self.next_leaf(cur, reversed)?;
        }
        Some(cur)
    }

    /// First (or last, when `reversed`) content-bearing leaf inside `id`
    #[must_use]
    pub fn content_leaf_within(&self, id: NodeId, reversed: bool) -> Option<NodeId> {
        let mut cur = if reversed {
            self.last_leaf(id)
        } else {
            self.first_leaf(id)
        };
        loop {
            if !self.contains(id, cur) {
                return None;
            }
            if self.has_content(cur) {
                return Some(cur);
            }
            cur = self.next_leaf(cur, reversed)?;
        }
    }

    #[must_use]
    pub fn is_focusable(&self, id: NodeId) -> bool {
        self.kind(id).is_some_and(NodeKind::is_focusable)
    }

    /// Focusable nodes strictly inside `id`
    #[must_use]
    pub fn focusable_descendants(&self, id: NodeId) -> usize {
        self.children(id)
            .iter()
            .map(|&c| usize::from(self.is_focusable(c)) + self.focusable_descendants(c))
            .sum()
    }

    /// Nearest table containing `id` (or `id` itself)
    #[must_use]
    pub fn containing_table(&self, id: NodeId) -> Option<NodeId> {
        self.find_ancestor(id, |k| matches!(k, NodeKind::Table { .. }))
    }

    /// Nearest math expression containing `id` (or `id` itself)
    #[must_use]
    pub fn containing_math(&self, id: NodeId) -> Option<NodeId> {
        self.find_ancestor(id, |k| matches!(k, NodeKind::Math { .. }))
    }

    /// Row nodes of a table
    #[must_use]
    pub fn table_rows(&self, table: NodeId) -> Vec<NodeId> {
        self.children(table)
            .iter()
            .copied()
            .filter(|&c| matches!(self.kind(c), Some(NodeKind::Row)))
            .collect()
    }

    /// Cell nodes of a row
    #[must_use]
    pub fn row_cells(&self, row: NodeId) -> Vec<NodeId> {
        self.children(row)
            .iter()
            .copied()
            .filter(|&c| matches!(self.kind(c), Some(NodeKind::Cell { .. })))
            .collect()
    }

    /// Whether a table only arranges content visually
    ///
    /// Explicitly flagged tables are layout tables. Otherwise a table with
    /// no header cells that is a single row or a single column is treated
    /// as layout.
    #[must_use]
    pub fn is_layout_table(&self, table: NodeId) -> bool {
        match self.kind(table) {
            Some(NodeKind::Table { layout: true }) => return true,
            Some(NodeKind::Table { layout: false }) => {}
            _ => return false,
        }
        let rows = self.table_rows(table);
        let has_headers = rows.iter().any(|&r| {
            self.row_cells(r)
                .iter()
                .any(|&c| matches!(self.kind(c), Some(NodeKind::Cell { header: true })))
        });
        if has_headers {
            return false;
        }
        let max_cols = rows
            .iter()
            .map(|&r| self.row_cells(r).len())
            .max()
            .unwrap_or(0);
        rows.len() <= 1 || max_cols <= 1
    }

    /// Length of a node in anchor units: characters for text, children otherwise
    #[must_use]
    pub fn extent(&self, id: NodeId) -> usize {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => text.chars().count(),
            Some(_) => self.children(id).len(),
            None => 0,
        }
    }

    /// Raw text of a text leaf
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Readable text of a subtree, words separated by single spaces
    #[must_use]
    pub fn text_of(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        self.collect_text(id, &mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, id: NodeId, out: &mut Vec<String>) {
        let own = match self.kind(id) {
            Some(NodeKind::Text(text)) => Some(text.as_str()),
            Some(NodeKind::Image { alt }) => Some(alt.as_str()),
            Some(NodeKind::MathItem { text, .. }) => Some(text.as_str()),
            Some(NodeKind::Math { alt }) if self.is_leaf(id) => Some(alt.as_str()),
            _ => None,
        };
        if let Some(text) = own {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        }
        for &child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// Spoken role of a node, if it has one
    #[must_use]
    pub fn role(&self, id: NodeId) -> Option<String> {
        match self.kind(id)? {
            NodeKind::Section { label: Some(label) } => Some(format!("{label} region")),
            NodeKind::Heading { level } => Some(format!("Heading {level}")),
            NodeKind::List => Some(format!("List with {} items", self.children(id).len())),
            NodeKind::Link { .. } => Some("Link".to_string()),
            NodeKind::Button => Some("Button".to_string()),
            NodeKind::Image { .. } => Some("Image".to_string()),
            NodeKind::Table { .. } => {
                let rows = self.table_rows(id);
                let cols = rows
                    .iter()
                    .map(|&r| self.row_cells(r).len())
                    .max()
                    .unwrap_or(0);
                Some(format!(
                    "Table with {} rows and {} columns",
                    rows.len(),
                    cols
                ))
            }
            NodeKind::Math { .. } => Some("Math".to_string()),
            _ => None,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
