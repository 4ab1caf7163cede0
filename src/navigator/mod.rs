//! Navigation mode controller
//!
//! The [`Navigator`] decides which walker owns the cursor. It tracks the
//! granularity the caller chose, a one-level subnavigation override, and
//! the table and math modes that take over the GROUP slot. It never walks
//! content itself: every movement is forwarded to the walker selected by
//! that state.
//!
//! ## State
//!
//! ```text
//! Normal(g) --ensure_subnavigating--> Subnavigating(g, g - 1)
//!     ^   \                                 |
//!     |    `--try_enter_table--> TableMode   | set/shift granularity
//!     |    `--try_enter_math---> MathMode    | (cancels subnavigation)
//!     |                             |       v
//!     `---- ensure_not_*_mode ------'    Normal(g')
//! ```
//!
//! Table and math mode are mutually exclusive: entering one leaves the
//! other. Leaving either returns to GROUP.
//!
//! ## Invariants
//!
//! After every public call:
//! - the active granularity is a valid rank (enforced by [`Granularity`])
//! - table mode and math mode are never both on
//! - while subnavigating, [`Navigator::granularity`] reports the baseline
//!   the caller set, and leaving subnavigation restores it exactly
//! - the GROUP slot holds the table walker only in table mode, the math
//!   walker only in math mode, and the ordinary group walker otherwise

pub mod registry;

pub use registry::{GroupSlot, WalkerRegistry};

use crate::document::Document;
use crate::granularity::Granularity;
use crate::selection::Selection;
use crate::settings::NavSettings;
use crate::store::SessionStore;
use crate::walker::{AncestorPredicate, Braille, Description, MathDomain, MathTraversal, Walker};

/// Store key holding the granularity rank
pub const GRANULARITY_KEY: &str = "granularity";

/// Options for [`Navigator::try_enter_table`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableEntry {
    /// Enter layout tables too
    pub force: bool,
    /// Start at the first cell instead of the cell under the cursor
    pub from_top: bool,
}

pub struct Navigator {
    registry: WalkerRegistry,
    initial: Granularity,
    force_layout_tables: bool,
    /// Granularity of the walker currently driving navigation
    current: Granularity,
    /// Granularity the caller set, while subnavigating
    subnav_baseline: Option<Granularity>,
    table_mode: bool,
    math_mode: bool,
    saved_math_granularity: Option<Granularity>,
}

impl Navigator {
    pub fn new(settings: &NavSettings) -> Self {
        let mut nav = Self::with_registry(WalkerRegistry::new(settings));
        nav.initial = settings.initial_granularity;
        nav.current = settings.initial_granularity;
        nav.force_layout_tables = settings.force_layout_tables;
        nav
    }

    /// Navigator over custom walkers, starting at GROUP
    pub fn with_registry(registry: WalkerRegistry) -> Self {
        Navigator {
            registry,
            initial: Granularity::Group,
            force_layout_tables: false,
            current: Granularity::Group,
            subnav_baseline: None,
            table_mode: false,
            math_mode: false,
            saved_math_granularity: None,
        }
    }

    /// Back to the initial granularity with every mode off
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.subnav_baseline = None;
        self.table_mode = false;
        self.math_mode = false;
        self.saved_math_granularity = None;
        self.registry.set_group_slot(GroupSlot::Ordinary);
        tracing::debug!(granularity = %self.initial, "navigator reset");
    }

    pub fn registry(&self) -> &WalkerRegistry {
        &self.registry
    }

    fn walker(&self) -> &dyn Walker {
        self.registry.walker(self.current)
    }

    // --- forwarding ---

    pub fn next(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        self.walker().next(doc, sel)
    }

    pub fn sync(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        self.walker().sync(doc, sel)
    }

    pub fn act(&self, doc: &Document, sel: &Selection) -> bool {
        self.walker().act(doc, sel)
    }

    pub fn describe(
        &self,
        doc: &Document,
        prev: Option<&Selection>,
        cur: &Selection,
    ) -> Vec<Description> {
        self.walker().describe(doc, prev, cur)
    }

    pub fn braille_describe(
        &self,
        doc: &Document,
        prev: Option<&Selection>,
        cur: &Selection,
    ) -> Braille {
        self.walker().braille_describe(doc, prev, cur)
    }

    /// Label of the walker currently driving navigation
    pub fn granularity_label(&self) -> &'static str {
        self.walker().granularity_label()
    }

    /// Sync to the start of the page (its end when `reversed`)
    ///
    /// Leaves table mode first.
    pub fn sync_to_page_beginning(&mut self, doc: &Document, reversed: bool) -> Option<Selection> {
        self.ensure_not_table_mode();
        let page = Selection::node(doc, doc.root()).with_reversed(reversed);
        self.sync(doc, &page)
    }

    /// Search forward with the object walker, whatever the granularity
    pub fn find_next(
        &self,
        doc: &Document,
        sel: &Selection,
        predicate: &AncestorPredicate<'_>,
    ) -> Option<Selection> {
        self.registry
            .walker(Granularity::Object)
            .find_next(doc, sel, predicate)
    }

    /// Resolve a node selection to OBJECT or GROUP, switching to it
    ///
    /// A group with more than one focusable control is too coarse to land
    /// on, so the object under the node wins; otherwise the group does.
    pub fn sync_node(&mut self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let group = self.registry.walker(Granularity::Group).sync(doc, sel);
        let object = self.registry.walker(Granularity::Object).sync(doc, sel);

        match group {
            Some(g) if doc.focusable_descendants(g.start.node) <= 1 => {
                self.set_granularity(Granularity::Group);
                Some(g)
            }
            _ => {
                self.set_granularity(Granularity::Object);
                object
            }
        }
    }

    // --- granularity ---

    pub fn make_more_granular(&mut self) {
        self.ensure_not_subnavigating();
        self.shift_to(self.current.more_granular());
    }

    pub fn make_less_granular(&mut self) {
        self.ensure_not_subnavigating();
        self.shift_to(self.current.less_granular());
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.ensure_not_subnavigating();
        self.shift_to(granularity);
    }

    fn shift_to(&mut self, granularity: Granularity) {
        if granularity != self.current {
            tracing::debug!(from = %self.current, to = %granularity, "granularity changed");
        }
        self.current = granularity;
    }

    /// Granularity the caller chose, ignoring any subnavigation
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.subnav_baseline.unwrap_or(self.current)
    }

    /// Granularity actually driving navigation, subnavigation included
    #[must_use]
    pub fn active_granularity(&self) -> Granularity {
        self.current
    }

    // --- subnavigation ---

    /// Go one level more granular until [`Self::ensure_not_subnavigating`]
    pub fn ensure_subnavigating(&mut self) {
        if self.subnav_baseline.is_some() {
            return;
        }
        self.subnav_baseline = Some(self.current);
        self.current = self.current.more_granular();
        tracing::debug!(baseline = %self.granularity(), active = %self.current, "subnavigation on");
    }

    pub fn ensure_not_subnavigating(&mut self) {
        if let Some(baseline) = self.subnav_baseline.take() {
            self.current = baseline;
            tracing::debug!(granularity = %baseline, "subnavigation off");
        }
    }

    #[must_use]
    pub fn is_subnavigating(&self) -> bool {
        self.subnav_baseline.is_some()
    }

    // --- table mode ---

    #[must_use]
    pub fn is_table_mode(&self) -> bool {
        self.table_mode && self.registry.group_slot() == GroupSlot::Table
    }

    /// Enter table mode on the table around `sel`
    ///
    /// Returns `None` without changing anything when already in table
    /// mode, when `sel` is not inside a table, or when the table is a
    /// layout table and neither `entry.force` nor the force setting is on.
    pub fn try_enter_table(
        &mut self,
        doc: &Document,
        sel: &Selection,
        entry: TableEntry,
    ) -> Option<Selection> {
        if self.is_table_mode() {
            return None;
        }
        let table = doc.containing_table(sel.start.node)?;
        if doc.is_layout_table(table) && !(entry.force || self.force_layout_tables) {
            tracing::trace!(table, "skipping layout table");
            return None;
        }

        let walker = self.registry.table();
        let landed = if entry.from_top {
            walker.go_to_first_cell(doc, sel)
        } else {
            walker.sync(doc, sel)
        }?;

        self.subnav_baseline = None;
        self.math_mode = false;
        self.table_mode = true;
        self.registry.set_group_slot(GroupSlot::Table);
        self.shift_to(Granularity::Group);
        tracing::debug!(table, from_top = entry.from_top, "table mode on");
        Some(landed)
    }

    /// Leave table mode; a no-op when not in it
    pub fn ensure_not_table_mode(&mut self) {
        if self.registry.group_slot() == GroupSlot::Table {
            self.registry.set_group_slot(GroupSlot::Ordinary);
        }
        if self.table_mode {
            self.table_mode = false;
            tracing::debug!("table mode off");
        }
    }

    pub fn go_to_first_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        self.registry.table().go_to_first_cell(doc, sel)
    }

    pub fn go_to_last_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        self.registry.table().go_to_last_cell(doc, sel)
    }

    pub fn go_to_row_first_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        self.registry.table().go_to_row_first_cell(doc, sel)
    }

    pub fn go_to_row_last_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        self.registry.table().go_to_row_last_cell(doc, sel)
    }

    pub fn go_to_col_first_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        self.registry.table().go_to_col_first_cell(doc, sel)
    }

    pub fn go_to_col_last_cell(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        self.registry.table().go_to_col_last_cell(doc, sel)
    }

    pub fn next_row(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        self.registry.table().next_row(doc, sel)
    }

    pub fn next_col(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        self.registry.table().next_col(doc, sel)
    }

    pub fn header_text(&self, doc: &Document, sel: &Selection) -> Option<String> {
        self.registry.table().header_text(doc, sel)
    }

    pub fn location_description(&self, doc: &Document, sel: &Selection) -> Option<String> {
        self.registry.table().location_description(doc, sel)
    }

    pub fn is_in_table(&self, doc: &Document, sel: &Selection) -> bool {
        self.registry.table().is_in_table(doc, sel)
    }

    // --- math mode ---

    #[must_use]
    pub fn is_math_mode(&self) -> bool {
        self.math_mode && self.registry.group_slot() == GroupSlot::Math
    }

    /// Enter math mode on the expression around `sel`
    pub fn try_enter_math(&mut self, doc: &Document, sel: &Selection) -> Option<Selection> {
        if self.is_math_mode() {
            return None;
        }
        let math = doc.containing_math(sel.start.node)?;
        let landed = self.registry.math().sync(doc, sel)?;

        self.saved_math_granularity = Some(self.granularity());
        self.subnav_baseline = None;
        self.table_mode = false;
        self.math_mode = true;
        self.registry.set_group_slot(GroupSlot::Math);
        self.shift_to(Granularity::Group);
        tracing::debug!(math, saved = ?self.saved_math_granularity, "math mode on");
        Some(landed)
    }

    /// Leave math mode and move past the expression around `sel`
    ///
    /// Math mode is left even when `sel` is not inside math; the result is
    /// then `None`. Otherwise the cursor lands on the first content after
    /// (before, when `reversed`) the expression, synced to the restored
    /// granularity, or `None` when no content remains.
    pub fn try_exit_math(
        &mut self,
        doc: &Document,
        sel: &Selection,
        reversed: bool,
    ) -> Option<Selection> {
        self.ensure_not_math_mode();
        let math = doc.containing_math(sel.start.node)?;
        let leaf = doc.next_content_leaf(math, reversed)?;
        let beside = Selection::node(doc, leaf).with_reversed(reversed);
        self.sync(doc, &beside)
    }

    /// Leave math mode, returning to GROUP; a no-op when not in it
    ///
    /// The granularity saved on entry stays available through
    /// [`Self::saved_math_granularity`] but is not restored.
    pub fn ensure_not_math_mode(&mut self) {
        if !self.math_mode && self.registry.group_slot() != GroupSlot::Math {
            return;
        }
        if self.registry.group_slot() == GroupSlot::Math {
            self.registry.set_group_slot(GroupSlot::Ordinary);
        }
        self.math_mode = false;
        self.set_granularity(Granularity::Group);
        tracing::debug!("math mode off");
    }

    /// Granularity recorded when math mode was last entered
    #[must_use]
    pub fn saved_math_granularity(&self) -> Option<Granularity> {
        self.saved_math_granularity
    }

    pub fn is_in_math(&self, doc: &Document, sel: &Selection) -> bool {
        self.registry.math().is_in_math(doc, sel)
    }

    pub fn cycle_domain(&mut self) -> MathDomain {
        self.registry.math_mut().cycle_domain()
    }

    pub fn cycle_traversal_mode(&mut self) -> MathTraversal {
        self.registry.math_mut().cycle_traversal_mode()
    }

    pub fn toggle_explore(&mut self) -> bool {
        self.registry.math_mut().toggle_explore()
    }

    pub fn domain_msg(&self) -> String {
        self.registry.math().domain_msg()
    }

    pub fn traversal_mode_msg(&self) -> String {
        self.registry.math().traversal_mode_msg()
    }

    // --- persistence ---

    /// Save the granularity rank; modes and subnavigation are session-only
    pub fn store_on(&self, store: &mut SessionStore) {
        store.set(GRANULARITY_KEY, self.granularity().rank());
    }

    /// Restore the granularity rank, ignoring missing or invalid values
    pub fn read_from(&mut self, store: &SessionStore) {
        let Some(value) = store.get(GRANULARITY_KEY) else {
            return;
        };
        let granularity = value
            .as_u64()
            .and_then(|rank| u8::try_from(rank).ok())
            .and_then(Granularity::from_rank);
        match granularity {
            Some(g) => self.set_granularity(g),
            None => tracing::warn!(value = %value, "ignoring stored granularity"),
        }
    }

    #[cfg(test)]
    pub(crate) fn retarget_group_slot(&mut self, slot: GroupSlot) {
        self.registry.set_group_slot(slot);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(&NavSettings::default())
    }
}
