//! Test utilities
//! Shared fixture documents for walker and navigator tests

use crate::document::{Document, NodeId, NodeKind};

/// A small report page with every kind of content the walkers handle
pub struct Fixture {
    pub doc: Document,
    pub main: NodeId,
    pub heading: NodeId,
    pub heading_text: NodeId,
    pub p1: NodeId,
    /// "Sales grew. Costs fell! Profit rose?"
    pub p1_text: NodeId,
    pub p2: NodeId,
    pub link: NodeId,
    pub link_text: NodeId,
    pub button: NodeId,
    pub table: NodeId,
    /// `cells[row][col]`, row 0 and column 0 are headers
    pub cells: Vec<Vec<NodeId>>,
    pub math: NodeId,
    /// `x`, `+`, fraction
    pub math_items: Vec<NodeId>,
    /// numerator and denominator of the fraction
    pub fraction_parts: Vec<NodeId>,
    pub p4: NodeId,
    pub p4_text: NodeId,
    pub layout_table: NodeId,
    pub layout_cell_text: NodeId,
    pub footer: NodeId,
    pub list: NodeId,
    pub home_link: NodeId,
    pub image: NodeId,
}

pub fn fixture() -> Fixture {
    let mut doc = Document::new();
    let root = doc.root();

    let main = doc.append(
        root,
        NodeKind::Section {
            label: Some("Main".to_string()),
        },
    );
    let heading = doc.append(main, NodeKind::Heading { level: 1 });
    let heading_text = doc.append_text(heading, "Quarterly report");

    let p1 = doc.append(main, NodeKind::Paragraph);
    let p1_text = doc.append_text(p1, "Sales grew. Costs fell! Profit rose?");

    let p2 = doc.append(main, NodeKind::Paragraph);
    doc.append_text(p2, "Read the ");
    let link = doc.append(
        p2,
        NodeKind::Link {
            href: "/summary".to_string(),
        },
    );
    let link_text = doc.append_text(link, "full summary");
    doc.append_text(p2, " or ");
    let button = doc.append(p2, NodeKind::Button);
    doc.append_text(button, "Download");

    let table = doc.append(main, NodeKind::Table { layout: false });
    let mut cells = Vec::new();
    for (r, row_text) in [["Region", "Sales"], ["North", "120"], ["South", "95"]]
        .iter()
        .enumerate()
    {
        let row = doc.append(table, NodeKind::Row);
        let mut row_cells = Vec::new();
        for (c, text) in row_text.iter().enumerate() {
            let cell = doc.append(
                row,
                NodeKind::Cell {
                    header: r == 0 || c == 0,
                },
            );
            doc.append_text(cell, text);
            row_cells.push(cell);
        }
        cells.push(row_cells);
    }

    let math = doc.append(
        main,
        NodeKind::Math {
            alt: "x plus one half".to_string(),
        },
    );
    let mut math_items = Vec::new();
    for (role, text) in [("mi", "x"), ("mo", "+")] {
        math_items.push(doc.append(
            math,
            NodeKind::MathItem {
                role: role.to_string(),
                text: text.to_string(),
            },
        ));
    }
    let frac = doc.append(
        math,
        NodeKind::MathItem {
            role: "mfrac".to_string(),
            text: String::new(),
        },
    );
    math_items.push(frac);
    let mut fraction_parts = Vec::new();
    for text in ["1", "2"] {
        fraction_parts.push(doc.append(
            frac,
            NodeKind::MathItem {
                role: "mn".to_string(),
                text: text.to_string(),
            },
        ));
    }

    let p4 = doc.append(main, NodeKind::Paragraph);
    let p4_text = doc.append_text(p4, "That ends the math.");

    let layout_table = doc.append(main, NodeKind::Table { layout: true });
    let layout_row = doc.append(layout_table, NodeKind::Row);
    let left = doc.append(layout_row, NodeKind::Cell { header: false });
    let layout_cell_text = doc.append_text(left, "Left column");
    let right = doc.append(layout_row, NodeKind::Cell { header: false });
    doc.append_text(right, "Right column");

    let footer = doc.append(
        root,
        NodeKind::Section {
            label: Some("Footer".to_string()),
        },
    );
    let list = doc.append(footer, NodeKind::List);
    let item = doc.append(list, NodeKind::ListItem);
    let home_link = doc.append(
        item,
        NodeKind::Link {
            href: "/".to_string(),
        },
    );
    doc.append_text(home_link, "Home");
    let item = doc.append(list, NodeKind::ListItem);
    doc.append_text(item, "Contact us");
    let image = doc.append(
        footer,
        NodeKind::Image {
            alt: "Logo".to_string(),
        },
    );

    Fixture {
        doc,
        main,
        heading,
        heading_text,
        p1,
        p1_text,
        p2,
        link,
        link_text,
        button,
        table,
        cells,
        math,
        math_items,
        fraction_parts,
        p4,
        p4_text,
        layout_table,
        layout_cell_text,
        footer,
        list,
        home_link,
        image,
    }
}
