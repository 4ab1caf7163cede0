//! Script session: a document, a navigator and a cursor
//!
//! [`Session`] plays the part of the command layer: it decides when to
//! change granularity or enter and leave modes, keeps the cursor, and
//! turns each step into an output line (spoken text, or braille when
//! enabled).

use super::{parse_script, FindTarget, MathCommand, NavCommand, TableCommand};
use crate::document::{Document, NodeId, NodeKind};
use crate::error::{ErrorType, NavError, Result};
use crate::navigator::Navigator;
use crate::selection::Selection;
use crate::settings::NavSettings;
use crate::store::SessionStore;
use crate::walker::AncestorPredicate;

pub struct Session {
    doc: Document,
    nav: Navigator,
    settings: NavSettings,
    store: SessionStore,
    cursor: Option<Selection>,
    braille: bool,
}

impl Session {
    /// Start a session with the cursor at the top of the page
    pub fn new(doc: Document, settings: NavSettings) -> Self {
        Self::with_store(doc, settings, SessionStore::new())
    }

    /// Start a session, restoring the granularity saved in `store`
    pub fn with_store(doc: Document, settings: NavSettings, store: SessionStore) -> Self {
        let mut nav = Navigator::new(&settings);
        nav.read_from(&store);
        let cursor = nav.sync_to_page_beginning(&doc, false);
        Session {
            doc,
            nav,
            settings,
            store,
            cursor,
            braille: false,
        }
    }

    /// Print braille lines instead of speech
    #[must_use]
    pub fn with_braille(mut self, braille: bool) -> Self {
        self.braille = braille;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn settings(&self) -> &NavSettings {
        &self.settings
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn cursor(&self) -> Option<Selection> {
        self.cursor
    }

    /// Record the navigator's persistent state in the store
    pub fn save_state(&mut self) {
        self.nav.store_on(&mut self.store);
    }

    /// Announcement for the current position
    pub fn current(&self) -> Option<String> {
        self.cursor.map(|cur| self.announce(None, &cur))
    }

    /// Parse and run a script; returns every output line
    pub fn run_script(&mut self, script: &str) -> Result<Vec<String>> {
        let mut output = Vec::new();
        for command in parse_script(script)? {
            output.extend(self.execute(&command)?);
        }
        Ok(output)
    }

    /// Run one command
    pub fn execute(&mut self, command: &NavCommand) -> Result<Vec<String>> {
        tracing::trace!(?command, "executing");
        let lines = match command {
            NavCommand::Next => self.step(false),
            NavCommand::Prev => self.step(true),
            NavCommand::Granularity(g) => {
                self.nav.set_granularity(*g);
                self.resync()
            }
            NavCommand::MoreGranular => {
                self.nav.make_more_granular();
                self.resync()
            }
            NavCommand::LessGranular => {
                self.nav.make_less_granular();
                self.resync()
            }
            NavCommand::Subnav(on) => {
                if *on {
                    self.nav.ensure_subnavigating();
                } else {
                    self.nav.ensure_not_subnavigating();
                }
                self.resync()
            }
            NavCommand::Table(cmd) => self.table(*cmd),
            NavCommand::Math(cmd) => self.math(*cmd),
            NavCommand::Find(target) => self.find(*target),
            NavCommand::Top => self.page_edge(false),
            NavCommand::Bottom => self.page_edge(true),
            NavCommand::Act => {
                let acted = self
                    .cursor
                    .is_some_and(|cur| self.nav.act(&self.doc, &cur));
                vec![if acted { "Activated" } else { "Nothing to activate" }.to_string()]
            }
            NavCommand::Node(id) => self.node(*id)?,
            NavCommand::Set(assignment) => self.set(assignment)?,
            NavCommand::Store => {
                self.nav.store_on(&mut self.store);
                vec![format!("Stored {}", self.nav.granularity())]
            }
            NavCommand::Restore => {
                self.nav.read_from(&self.store);
                self.resync()
            }
            NavCommand::Reset => {
                self.nav.reset();
                self.cursor = self.nav.sync_to_page_beginning(&self.doc, false);
                self.resync()
            }
        };
        Ok(lines)
    }

    fn announce(&self, prev: Option<&Selection>, cur: &Selection) -> String {
        if self.braille {
            return self.nav.braille_describe(&self.doc, prev, cur).text;
        }
        self.nav
            .describe(&self.doc, prev, cur)
            .iter()
            .map(|d| d.spoken())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Move the cursor to `landed`, announcing it, or report `miss`
    fn land(&mut self, landed: Option<Selection>, miss: &str) -> Vec<String> {
        match landed {
            Some(sel) => {
                let line = self.announce(self.cursor.as_ref(), &sel);
                self.cursor = Some(sel);
                vec![line]
            }
            None => vec![miss.to_string()],
        }
    }

    /// Jump to the start (end when `reversed`) of the page
    ///
    /// The math walker only moves inside its expression, so math mode is
    /// left first.
    fn page_edge(&mut self, reversed: bool) -> Vec<String> {
        self.nav.ensure_not_math_mode();
        let landed = self.nav.sync_to_page_beginning(&self.doc, reversed);
        self.land(landed, "Empty document")
    }

    fn step(&mut self, reversed: bool) -> Vec<String> {
        let Some(cur) = self.cursor else {
            return vec!["Empty document".to_string()];
        };
        let landed = self.nav.next(&self.doc, &cur.with_reversed(reversed));
        let miss = match (self.nav.is_math_mode(), reversed) {
            (true, false) => "End of math",
            (true, true) => "Start of math",
            (false, false) => "End of content",
            (false, true) => "Start of content",
        };
        self.land(landed, miss)
    }

    /// Snap the cursor onto the current granularity and report it
    fn resync(&mut self) -> Vec<String> {
        let mut lines = vec![self.nav.granularity_label().to_string()];
        if let Some(cur) = self.cursor {
            if let Some(synced) = self.nav.sync(&self.doc, &cur) {
                self.cursor = Some(synced);
            }
        }
        lines.extend(self.current());
        lines
    }

    fn table(&mut self, cmd: TableCommand) -> Vec<String> {
        let Some(cur) = self.cursor else {
            return vec!["Empty document".to_string()];
        };
        let (doc, nav) = (&self.doc, &mut self.nav);
        let landed = match cmd {
            TableCommand::Enter(entry) => {
                let landed = nav.try_enter_table(doc, &cur, entry);
                if landed.is_none() {
                    let msg = if nav.is_table_mode() {
                        "Already in table mode"
                    } else if doc.containing_table(cur.start.node).is_some() {
                        "Layout table"
                    } else {
                        "Not in a table"
                    };
                    return vec![msg.to_string()];
                }
                landed
            }
            TableCommand::Exit => {
                nav.ensure_not_table_mode();
                return self.resync();
            }
            TableCommand::FirstCell => nav.go_to_first_cell(doc, &cur),
            TableCommand::LastCell => nav.go_to_last_cell(doc, &cur),
            TableCommand::RowFirst => nav.go_to_row_first_cell(doc, &cur),
            TableCommand::RowLast => nav.go_to_row_last_cell(doc, &cur),
            TableCommand::ColFirst => nav.go_to_col_first_cell(doc, &cur),
            TableCommand::ColLast => nav.go_to_col_last_cell(doc, &cur),
            TableCommand::NextRow => nav.next_row(doc, &cur.with_reversed(false)),
            TableCommand::PrevRow => nav.next_row(doc, &cur.with_reversed(true)),
            TableCommand::NextCol => nav.next_col(doc, &cur.with_reversed(false)),
            TableCommand::PrevCol => nav.next_col(doc, &cur.with_reversed(true)),
            TableCommand::Headers => {
                return vec![match nav.header_text(doc, &cur) {
                    Some(headers) if headers.is_empty() => "No headers".to_string(),
                    Some(headers) => headers,
                    None => "Not in a table".to_string(),
                }];
            }
            TableCommand::Location => {
                return vec![nav
                    .location_description(doc, &cur)
                    .unwrap_or_else(|| "Not in a table".to_string())];
            }
        };
        let miss = if self.nav.is_in_table(&self.doc, &cur) {
            "No cell there"
        } else {
            "Not in a table"
        };
        self.land(landed, miss)
    }

    fn math(&mut self, cmd: MathCommand) -> Vec<String> {
        match cmd {
            MathCommand::CycleDomain => {
                self.nav.cycle_domain();
                return vec![self.nav.domain_msg()];
            }
            MathCommand::CycleTraversal => {
                self.nav.cycle_traversal_mode();
                return vec![self.nav.traversal_mode_msg()];
            }
            MathCommand::ToggleExplore => {
                let on = self.nav.toggle_explore();
                return vec![format!("Explore {}", if on { "on" } else { "off" })];
            }
            MathCommand::Enter | MathCommand::Exit { .. } => {}
        }

        let Some(cur) = self.cursor else {
            return vec!["Empty document".to_string()];
        };
        match cmd {
            MathCommand::Enter => {
                let landed = self.nav.try_enter_math(&self.doc, &cur);
                self.land(landed, "Not in math")
            }
            _ => {
                let back = matches!(cmd, MathCommand::Exit { back: true });
                match self.nav.try_exit_math(&self.doc, &cur, back) {
                    Some(landed) => {
                        let mut lines = vec![self.nav.granularity_label().to_string()];
                        lines.extend(self.land(Some(landed), ""));
                        lines
                    }
                    None => self.resync(),
                }
            }
        }
    }

    fn find(&mut self, target: FindTarget) -> Vec<String> {
        let Some(cur) = self.cursor else {
            return vec!["Empty document".to_string()];
        };
        let predicate: &AncestorPredicate<'_> = &move |doc, chain| {
            chain.iter().any(|&n| {
                matches!(
                    (target, doc.kind(n)),
                    (FindTarget::Link, Some(NodeKind::Link { .. }))
                        | (FindTarget::Heading, Some(NodeKind::Heading { .. }))
                        | (FindTarget::Button, Some(NodeKind::Button))
                )
            })
        };
        let landed = self.nav.find_next(&self.doc, &cur.with_reversed(false), predicate);
        self.land(landed, &format!("No more {}", target.plural()))
    }

    fn node(&mut self, id: NodeId) -> Result<Vec<String>> {
        if self.doc.node(id).is_none() {
            return Err(NavError::new(
                ErrorType::Document,
                "UNKNOWN_NODE",
                format!("No node with id {id}"),
            ));
        }
        let target = Selection::node(&self.doc, id);
        let landed = self.nav.sync_node(&self.doc, &target);
        let mut lines = vec![self.nav.granularity_label().to_string()];
        lines.extend(self.land(landed, "Nothing to read there"));
        Ok(lines)
    }

    /// Apply a setting and rebuild the navigator so it takes effect
    ///
    /// The granularity and the math domain, traversal and explore state
    /// carry over unless the assignment names them; table mode, math mode
    /// and subnavigation do not.
    fn set(&mut self, assignment: &str) -> Result<Vec<String>> {
        let math = self.nav.registry().math();
        let mut settings = NavSettings {
            math_domain: math.domain(),
            math_traversal: math.traversal(),
            math_explore: math.explore(),
            ..self.settings.clone()
        };
        settings.apply(assignment)?;
        self.settings = settings;
        let granularity = self.nav.granularity();
        self.nav = Navigator::new(&self.settings);
        self.nav.set_granularity(granularity);
        tracing::debug!(assignment, "navigator rebuilt with new settings");
        Ok(vec![format!("Set {assignment}")])
    }
}
