//! Walker slots indexed by granularity
//!
//! Seven fixed slots, one per rank. The GROUP slot is the only one that
//! changes meaning: [`GroupSlot`] selects whether it is served by the
//! ordinary group walker, the table walker or the math walker. The table
//! and math walkers live alongside the slots so their mode-specific
//! operations are reachable whichever walker currently serves GROUP.

use crate::granularity::Granularity;
use crate::settings::NavSettings;
use crate::walker::{
    BlockWalker, MathWalker, ObjectWalker, TableWalker, TextUnit, TextWalker, Walker,
};

/// Which walker serves the GROUP slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupSlot {
    #[default]
    Ordinary,
    Table,
    Math,
}

pub struct WalkerRegistry {
    slots: [Box<dyn Walker>; 7],
    table: TableWalker,
    math: MathWalker,
    group_slot: GroupSlot,
}

impl WalkerRegistry {
    /// Standard walkers configured from settings
    pub fn new(settings: &NavSettings) -> Self {
        WalkerRegistry {
            slots: [
                Box::new(TextWalker::new(TextUnit::Character)),
                Box::new(TextWalker::new(TextUnit::Word)),
                Box::new(TextWalker::new(TextUnit::Line {
                    width: settings.line_width,
                })),
                Box::new(TextWalker::new(TextUnit::Sentence)),
                Box::new(ObjectWalker::new()),
                Box::new(BlockWalker::group()),
                Box::new(BlockWalker::visual()),
            ],
            table: TableWalker::new(),
            math: MathWalker::new(
                settings.math_domain,
                settings.math_traversal,
                settings.math_explore,
            ),
            group_slot: GroupSlot::Ordinary,
        }
    }

    /// Replace the walker in one slot, e.g. with a [`crate::walker::Filtered`] wrapper
    ///
    /// For GROUP this replaces the ordinary group walker; the table and
    /// math walkers are not affected.
    #[must_use]
    pub fn with_walker(mut self, granularity: Granularity, walker: Box<dyn Walker>) -> Self {
        self.slots[granularity.rank() as usize] = walker;
        self
    }

    /// The walker currently serving `granularity`
    pub fn walker(&self, granularity: Granularity) -> &dyn Walker {
        match (granularity, self.group_slot) {
            (Granularity::Group, GroupSlot::Table) => &self.table,
            (Granularity::Group, GroupSlot::Math) => &self.math,
            _ => self.slots[granularity.rank() as usize].as_ref(),
        }
    }

    pub fn table(&self) -> &TableWalker {
        &self.table
    }

    pub fn math(&self) -> &MathWalker {
        &self.math
    }

    pub fn math_mut(&mut self) -> &mut MathWalker {
        &mut self.math
    }

    #[must_use]
    pub fn group_slot(&self) -> GroupSlot {
        self.group_slot
    }

    pub(crate) fn set_group_slot(&mut self, slot: GroupSlot) {
        self.group_slot = slot;
    }
}

impl Default for WalkerRegistry {
    fn default() -> Self {
        Self::new(&NavSettings::default())
    }
}
