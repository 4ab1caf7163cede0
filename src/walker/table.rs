//! Table walker
//!
//! Moves cell by cell in reading order and answers the table-specific
//! questions (headers, location, jumps to row/column extremes). Every
//! operation returns `None` when the selection is not inside a table.

use super::{context_for, sync_point, Description, Walker};
use crate::document::{Document, NodeId, NodeKind};
use crate::selection::Selection;

/// Position of a cell inside its table grid
struct CellPos {
    grid: Vec<Vec<NodeId>>,
    row: usize,
    col: usize,
}

impl CellPos {
    fn cell(&self) -> NodeId {
        self.grid[self.row][self.col]
    }

    /// Header cell naming this cell's row, unless the cell is that header
    fn row_header(&self, doc: &Document) -> Option<NodeId> {
        let header = *self.grid[self.row].first()?;
        (self.col != 0 && is_header(doc, header)).then_some(header)
    }

    /// Header cell naming this cell's column, unless the cell is that header
    fn col_header(&self, doc: &Document) -> Option<NodeId> {
        let header = *self.grid.first()?.get(self.col)?;
        (self.row != 0 && is_header(doc, header)).then_some(header)
    }
}

fn is_header(doc: &Document, cell: NodeId) -> bool {
    matches!(doc.kind(cell), Some(NodeKind::Cell { header: true }))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TableWalker;

impl TableWalker {
    #[must_use]
    pub const fn new() -> Self {
        TableWalker
    }

    fn grid(doc: &Document, table: NodeId) -> Vec<Vec<NodeId>> {
        doc.table_rows(table)
            .into_iter()
            .map(|row| doc.row_cells(row))
            .filter(|cells| !cells.is_empty())
            .collect()
    }

    /// Find the cell a selection refers to
    ///
    /// A selection on the table itself (or outside any cell, such as a
    /// caption) refers to the first cell; one on a row to that row's first
    /// cell.
    fn locate(doc: &Document, sel: &Selection) -> Option<CellPos> {
        let start = sel.start.node;
        let table = doc.containing_table(start)?;
        let grid = Self::grid(doc, table);
        if grid.is_empty() {
            return None;
        }

        let cell = doc
            .find_ancestor(start, |k| matches!(k, NodeKind::Cell { .. }))
            .filter(|&c| doc.containing_table(c) == Some(table));
        if let Some(cell) = cell {
            for (row, cells) in grid.iter().enumerate() {
                if let Some(col) = cells.iter().position(|&c| c == cell) {
                    return Some(CellPos { grid, row, col });
                }
            }
        }

        let row = doc
            .find_ancestor(start, |k| matches!(k, NodeKind::Row))
            .and_then(|r| grid.iter().position(|cells| doc.parent(cells[0]) == Some(r)))
            .unwrap_or(0);
        Some(CellPos { grid, row, col: 0 })
    }

    fn select(doc: &Document, pos: &CellPos, row: usize, col: usize, reversed: bool) -> Option<Selection> {
        let cell = *pos.grid.get(row)?.get(col)?;
        Some(Selection::node(doc, cell).with_reversed(reversed))
    }

    pub fn go_to_first_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let pos = Self::locate(doc, sel)?;
        Self::select(doc, &pos, 0, 0, sel.reversed)
    }

    pub fn go_to_last_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let pos = Self::locate(doc, sel)?;
        let row = pos.grid.len() - 1;
        let col = pos.grid[row].len() - 1;
        Self::select(doc, &pos, row, col, sel.reversed)
    }

    pub fn go_to_row_first_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let pos = Self::locate(doc, sel)?;
        Self::select(doc, &pos, pos.row, 0, sel.reversed)
    }

    pub fn go_to_row_last_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let pos = Self::locate(doc, sel)?;
        let col = pos.grid[pos.row].len() - 1;
        Self::select(doc, &pos, pos.row, col, sel.reversed)
    }

    /// First cell of the current column (rows too short for the column are skipped)
    pub fn go_to_col_first_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let pos = Self::locate(doc, sel)?;
        let row = pos.grid.iter().position(|cells| pos.col < cells.len())?;
        Self::select(doc, &pos, row, pos.col, sel.reversed)
    }

    pub fn go_to_col_last_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let pos = Self::locate(doc, sel)?;
        let row = pos.grid.iter().rposition(|cells| pos.col < cells.len())?;
        Self::select(doc, &pos, row, pos.col, sel.reversed)
    }

    /// Same column in the next row (previous when reversed)
    ///
    /// Shorter rows clamp the column to their last cell.
    pub fn next_row(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let pos = Self::locate(doc, sel)?;
        let row = if sel.reversed {
            pos.row.checked_sub(1)?
        } else {
            pos.row + 1
        };
        let len = pos.grid.get(row)?.len();
        Self::select(doc, &pos, row, pos.col.min(len - 1), sel.reversed)
    }

    /// Next cell in the same row (previous when reversed)
    pub fn next_col(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let pos = Self::locate(doc, sel)?;
        let col = if sel.reversed {
            pos.col.checked_sub(1)?
        } else {
            pos.col + 1
        };
        Self::select(doc, &pos, pos.row, col, sel.reversed)
    }

    /// Row and column header text for the current cell, comma separated
    pub fn header_text(&self, doc: &Document, sel: &Selection) -> Option<String> {
        let pos = Self::locate(doc, sel)?;
        let headers: Vec<String> = [pos.row_header(doc), pos.col_header(doc)]
            .into_iter()
            .flatten()
            .map(|h| doc.text_of(h))
            .collect();
        Some(headers.join(", "))
    }

    /// "row R of N, column C of M"
    pub fn location_description(&self, doc: &Document, sel: &Selection) -> Option<String> {
        let pos = Self::locate(doc, sel)?;
        Some(format!(
            "row {} of {}, column {} of {}",
            pos.row + 1,
            pos.grid.len(),
            pos.col + 1,
            pos.grid[pos.row].len()
        ))
    }

    pub fn is_in_table(&self, doc: &Document, sel: &Selection) -> bool {
        doc.containing_table(sel.start.node).is_some()
    }
}

impl Walker for TableWalker {
    fn next(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let pos = Self::locate(doc, sel)?;
        let (row, col) = if sel.reversed {
            match pos.col.checked_sub(1) {
                Some(col) => (pos.row, col),
                None => {
                    let row = pos.row.checked_sub(1)?;
                    (row, pos.grid[row].len() - 1)
                }
            }
        } else if pos.col + 1 < pos.grid[pos.row].len() {
            (pos.row, pos.col + 1)
        } else {
            (pos.row + 1, 0)
        };
        Self::select(doc, &pos, row, col, sel.reversed)
    }

    fn sync(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        if doc.containing_table(sel.start.node).is_none() {
            // A selection that starts above the table may still resolve into it
            let (leaf, _) = sync_point(doc, sel)?;
            doc.containing_table(leaf)?;
            return self.sync(doc, &Selection::node(doc, leaf).with_reversed(sel.reversed));
        }
        let pos = Self::locate(doc, sel)?;
        Self::select(doc, &pos, pos.row, pos.col, sel.reversed)
    }

    fn act(&self, doc: &Document, sel: &Selection) -> bool {
        Self::locate(doc, sel).is_some_and(|pos| doc.focusable_descendants(pos.cell()) == 1)
    }

    fn describe(
        &self,
        doc: &Document,
        prev: Option<&Selection>,
        cur: &Selection,
    ) -> Vec<Description> {
        let Some(pos) = Self::locate(doc, cur) else {
            return Vec::new();
        };
        let prev_pos = prev
            .and_then(|p| Self::locate(doc, p))
            .filter(|p| p.grid == pos.grid);

        // Announce a header only when its row or column changed
        let mut context = vec![context_for(doc, prev, cur)];
        if prev_pos.as_ref().map_or(true, |p| p.row != pos.row) {
            context.extend(pos.row_header(doc).map(|h| doc.text_of(h)));
        }
        if prev_pos.as_ref().map_or(true, |p| p.col != pos.col) {
            context.extend(pos.col_header(doc).map(|h| doc.text_of(h)));
        }
        context.retain(|c| !c.is_empty());

        let location = format!(
            "row {} of {}, column {} of {}",
            pos.row + 1,
            pos.grid.len(),
            pos.col + 1,
            pos.grid[pos.row].len()
        );
        vec![Description::new(doc.text_of(pos.cell()))
            .with_context(context.join(", "))
            .with_annotation(location)]
    }

    fn granularity_label(&self) -> &'static str {
        "Table"
    }
}
