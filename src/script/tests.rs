use super::*;
use crate::document::{Document, NodeId};
use crate::selection::Selection;
use crate::settings::NavSettings;
use crate::store::SessionStore;
use crate::test_utils::{fixture, Fixture};

fn at(f: &Fixture, id: NodeId) -> Selection {
    Selection::node(&f.doc, id)
}

fn session(f: &Fixture) -> Session {
    Session::new(f.doc.clone(), NavSettings::default())
}

fn run(session: &mut Session, script: &str) -> Vec<String> {
    session.run_script(script).unwrap()
}

// --- parsing ---

#[test]
fn test_parse_simple_commands() {
    assert_eq!(parse_line("next").unwrap(), Some(NavCommand::Next));
    assert_eq!(parse_line("  p  ").unwrap(), Some(NavCommand::Prev));
    assert_eq!(parse_line("MORE").unwrap(), Some(NavCommand::MoreGranular));
    assert_eq!(parse_line("reset").unwrap(), Some(NavCommand::Reset));
    assert_eq!(parse_line("").unwrap(), None);
    assert_eq!(parse_line("# a comment").unwrap(), None);
}

#[test]
fn test_parse_granularity_by_name_and_rank() {
    assert_eq!(
        parse_line("granularity word").unwrap(),
        Some(NavCommand::Granularity(Granularity::Word))
    );
    assert_eq!(
        parse_line("gran 0").unwrap(),
        Some(NavCommand::Granularity(Granularity::Character))
    );
    assert!(parse_line("granularity").is_err());
    assert!(parse_line("granularity paragraph").is_err());
}

#[test]
fn test_parse_table_commands() {
    assert_eq!(
        parse_line("table enter").unwrap(),
        Some(NavCommand::Table(TableCommand::Enter(TableEntry::default())))
    );
    assert_eq!(
        parse_line("table enter force top").unwrap(),
        Some(NavCommand::Table(TableCommand::Enter(TableEntry {
            force: true,
            from_top: true,
        })))
    );
    assert_eq!(
        parse_line("table next-col").unwrap(),
        Some(NavCommand::Table(TableCommand::NextCol))
    );
    assert_eq!(
        parse_line("table where").unwrap(),
        Some(NavCommand::Table(TableCommand::Location))
    );

    let err = parse_line("table enter sideways").unwrap_err();
    assert_eq!(err.code, "INVALID_ARGUMENT");
    assert_eq!(parse_line("table").unwrap_err().code, "MISSING_ARGUMENT");
    assert!(parse_line("table first now").is_err());
}

#[test]
fn test_parse_math_and_find() {
    assert_eq!(
        parse_line("math exit back").unwrap(),
        Some(NavCommand::Math(MathCommand::Exit { back: true }))
    );
    assert_eq!(
        parse_line("math explore").unwrap(),
        Some(NavCommand::Math(MathCommand::ToggleExplore))
    );
    assert!(parse_line("math exit forward").is_err());
    assert_eq!(
        parse_line("find heading").unwrap(),
        Some(NavCommand::Find(FindTarget::Heading))
    );
    assert_eq!(FindTarget::Button.plural(), "buttons");
}

#[test]
fn test_parse_arguments() {
    assert_eq!(parse_line("node 12").unwrap(), Some(NavCommand::Node(12)));
    assert!(parse_line("node twelve").is_err());
    assert_eq!(
        parse_line("set lw=40").unwrap(),
        Some(NavCommand::Set("lw=40".to_string()))
    );
    assert!(parse_line("set lw").is_err());
    assert_eq!(parse_line("subnav on").unwrap(), Some(NavCommand::Subnav(true)));
    assert!(parse_line("subnav maybe").is_err());
    assert_eq!(parse_line("next 2").unwrap_err().code, "INVALID_ARGUMENT");
}

#[test]
fn test_parse_unknown_command() {
    let err = parse_line("jump").unwrap_err();
    assert_eq!(err.code, "UNKNOWN_COMMAND");
    assert!(err.contains_msg("jump"));
}

#[test]
fn test_parse_script_reports_line() {
    let commands = parse_script("next\n\n# skip\nprev\n").unwrap();
    assert_eq!(commands, vec![NavCommand::Next, NavCommand::Prev]);

    let err = parse_script("next\nprev\nwander").unwrap_err();
    assert!(err.contains_msg("line 3"));
}

// --- session ---

#[test]
fn test_session_starts_at_page_top() {
    let f = fixture();
    let s = session(&f);
    assert_eq!(s.cursor(), Some(at(&f, f.heading)));
    assert_eq!(
        s.current().as_deref(),
        Some("Main region, Quarterly report, Heading 1")
    );
}

#[test]
fn test_braille_output() {
    let f = fixture();
    let s = session(&f).with_braille(true);
    assert_eq!(s.current().as_deref(), Some("Main region Quarterly report h1"));
}

#[test]
fn test_next_and_prev() {
    let f = fixture();
    let mut s = session(&f);

    let out = run(&mut s, "next");
    assert_eq!(s.cursor(), Some(at(&f, f.p1)));
    assert!(out[0].contains("Sales grew."));

    run(&mut s, "prev");
    assert_eq!(s.cursor().map(|c| c.start.node), Some(f.heading));
    assert_eq!(run(&mut s, "prev"), vec!["Start of content"]);
}

#[test]
fn test_end_of_content() {
    let f = fixture();
    let mut s = session(&f);
    run(&mut s, "bottom");
    assert_eq!(s.cursor(), Some(at(&f, f.image).with_reversed(true)));
    assert_eq!(run(&mut s, "next"), vec!["End of content"]);
}

#[test]
fn test_granularity_resyncs_cursor() {
    let f = fixture();
    let mut s = session(&f);

    let out = run(&mut s, "granularity word");
    assert_eq!(out[0], "Word");
    assert_eq!(s.cursor(), Some(Selection::text(f.heading_text, 0, 9)));

    let out = run(&mut s, "less");
    assert_eq!(out[0], "Line");
    assert_eq!(s.navigator().granularity(), Granularity::Line);
}

#[test]
fn test_subnav_keeps_baseline() {
    let f = fixture();
    let mut s = session(&f);
    run(&mut s, "granularity sentence\nsubnav on");
    assert!(s.navigator().is_subnavigating());
    assert_eq!(s.navigator().granularity(), Granularity::Sentence);
    assert_eq!(s.navigator().active_granularity(), Granularity::Line);

    run(&mut s, "subnav off");
    assert_eq!(s.navigator().active_granularity(), Granularity::Sentence);
}

#[test]
fn test_find_walks_links_then_stops() {
    let f = fixture();
    let mut s = session(&f);

    run(&mut s, "find link");
    assert_eq!(s.cursor(), Some(at(&f, f.link)));
    run(&mut s, "find link");
    assert_eq!(s.cursor(), Some(at(&f, f.home_link)));
    assert_eq!(run(&mut s, "find link"), vec!["No more links"]);
    assert_eq!(s.cursor(), Some(at(&f, f.home_link)));
}

#[test]
fn test_act() {
    let f = fixture();
    let mut s = session(&f);
    assert_eq!(run(&mut s, "act"), vec!["Nothing to activate"]);
    run(&mut s, "find button");
    assert_eq!(run(&mut s, "act"), vec!["Activated"]);
}

#[test]
fn test_node_jump_validates_id() {
    let f = fixture();
    let mut s = session(&f);

    let out = run(&mut s, &format!("node {}", f.p1_text));
    assert_eq!(out[0], "Group");
    assert_eq!(s.cursor(), Some(at(&f, f.p1)));

    let err = s.run_script("node 9999").unwrap_err();
    assert_eq!(err.code, "UNKNOWN_NODE");
    assert_eq!(s.cursor(), Some(at(&f, f.p1)));
}

#[test]
fn test_table_session() {
    let f = fixture();
    let mut s = session(&f);

    assert_eq!(run(&mut s, "table enter"), vec!["Not in a table"]);

    run(&mut s, &format!("node {}", f.cells[1][1] + 1));
    run(&mut s, "table enter");
    assert!(s.navigator().is_table_mode());
    assert_eq!(s.cursor(), Some(at(&f, f.cells[1][1])));
    assert_eq!(run(&mut s, "table headers"), vec!["North, Sales"]);
    assert_eq!(run(&mut s, "table enter"), vec!["Already in table mode"]);

    assert_eq!(run(&mut s, "table next-col"), vec!["No cell there"]);
    let out = run(&mut s, "table prev-col");
    assert_eq!(out, vec!["Region, North, row 2 of 3, column 1 of 2"]);
    assert_eq!(run(&mut s, "table where"), vec!["row 2 of 3, column 1 of 2"]);

    run(&mut s, "table last");
    assert_eq!(s.cursor().map(|c| c.start.node), Some(f.cells[2][1]));

    let out = run(&mut s, "table exit");
    assert_eq!(out[0], "Group");
    assert!(!s.navigator().is_table_mode());
}

#[test]
fn test_layout_table_needs_force() {
    let f = fixture();
    let mut s = session(&f);
    run(&mut s, &format!("node {}", f.layout_cell_text));

    assert_eq!(run(&mut s, "table enter"), vec!["Layout table"]);
    assert!(!s.navigator().is_table_mode());
    run(&mut s, "table enter force");
    assert!(s.navigator().is_table_mode());
}

#[test]
fn test_math_session() {
    let f = fixture();
    let mut s = session(&f);
    assert_eq!(run(&mut s, "math enter"), vec!["Not in math"]);

    run(&mut s, &format!("node {}", f.math_items[0]));
    assert_eq!(s.cursor(), Some(at(&f, f.math)));
    run(&mut s, "math enter");
    assert!(s.navigator().is_math_mode());
    assert_eq!(s.cursor(), Some(at(&f, f.math_items[0])));

    assert_eq!(run(&mut s, "math domain"), vec!["Domain: MathSpeak"]);
    assert_eq!(run(&mut s, "math traversal"), vec!["Traversal: syntax tree"]);
    assert_eq!(run(&mut s, "math explore"), vec!["Explore on"]);

    let out = run(&mut s, "math exit");
    assert_eq!(out[0], "Group");
    assert!(!s.navigator().is_math_mode());
    assert_eq!(s.cursor(), Some(at(&f, f.p4)));
}

#[test]
fn test_set_rebuilds_navigator_keeping_granularity() {
    let f = fixture();
    let mut s = session(&f);
    let out = run(&mut s, "granularity word\nset linewidth=40");
    assert_eq!(out.last().map(String::as_str), Some("Set linewidth=40"));
    assert_eq!(s.settings().line_width, 40);
    assert_eq!(s.navigator().granularity(), Granularity::Word);

    let err = s.run_script("set linewidth=0").unwrap_err();
    assert_eq!(err.kind, crate::error::ErrorType::Settings);
}

#[test]
fn test_store_and_restore() {
    let f = fixture();
    let mut s = session(&f);
    run(&mut s, "granularity word\nstore\ngranularity group");
    assert_eq!(
        s.store().get("granularity"),
        Some(&serde_json::json!(Granularity::Word.rank()))
    );

    run(&mut s, "restore");
    assert_eq!(s.navigator().granularity(), Granularity::Word);
}

#[test]
fn test_session_reads_store_on_start() {
    let f = fixture();
    let mut store = SessionStore::new();
    store.set("granularity", Granularity::Sentence.rank());
    let s = Session::with_store(f.doc.clone(), NavSettings::default(), store);
    assert_eq!(s.navigator().granularity(), Granularity::Sentence);
    assert_eq!(s.cursor().map(|c| c.start.node), Some(f.heading_text));
}

#[test]
fn test_reset_returns_to_top() {
    let f = fixture();
    let mut s = session(&f);
    run(&mut s, "granularity word\nsubnav on\nnext\nnext");
    run(&mut s, "reset");
    assert_eq!(s.navigator().granularity(), Granularity::Group);
    assert!(!s.navigator().is_subnavigating());
    assert_eq!(s.cursor(), Some(at(&f, f.heading)));
}

#[test]
fn test_script_error_stops_before_running() {
    let f = fixture();
    let mut s = session(&f);
    let err = s.run_script("next\nbogus").unwrap_err();
    assert!(err.contains_msg("line 2"));
    assert_eq!(s.cursor(), Some(at(&f, f.heading)));
}

#[test]
fn test_empty_document() {
    let mut s = Session::new(Document::new(), NavSettings::default());
    assert_eq!(s.cursor(), None);
    assert_eq!(run(&mut s, "next"), vec!["Empty document"]);
    assert_eq!(run(&mut s, "top"), vec!["Empty document"]);
    assert_eq!(s.current(), None);
}

#[test]
fn test_save_state_records_granularity() {
    let f = fixture();
    let mut s = session(&f);
    run(&mut s, "granularity visual");
    s.save_state();
    assert_eq!(
        s.store().get("granularity"),
        Some(&serde_json::json!(Granularity::Visual.rank()))
    );
}

#[test]
fn test_set_keeps_live_math_state() {
    let f = fixture();
    let mut s = session(&f);
    run(&mut s, "math domain\nmath traversal\nmath explore\nset linewidth=40");

    assert_eq!(run(&mut s, "math domain"), vec!["Domain: ClearSpeak"]);
    assert_eq!(run(&mut s, "math traversal"), vec!["Traversal: leaf"]);
    assert_eq!(run(&mut s, "math explore"), vec!["Explore off"]);
    assert_eq!(s.settings().line_width, 40);
}

#[test]
fn test_set_math_setting_overrides_live_state() {
    let f = fixture();
    let mut s = session(&f);
    run(&mut s, "math domain\nset mathdomain=default");
    assert_eq!(run(&mut s, "math domain"), vec!["Domain: MathSpeak"]);
}

#[test]
fn test_top_and_bottom_leave_math_mode() {
    let f = fixture();
    let mut s = session(&f);
    run(&mut s, &format!("node {}\nmath enter", f.math));
    assert!(s.navigator().is_math_mode());

    let out = run(&mut s, "top");
    assert_ne!(out, vec!["Empty document"]);
    assert!(!s.navigator().is_math_mode());
    assert_eq!(s.cursor(), Some(at(&f, f.heading)));

    run(&mut s, &format!("node {}\nmath enter\nbottom", f.math));
    assert!(!s.navigator().is_math_mode());
    assert_eq!(s.cursor(), Some(at(&f, f.image).with_reversed(true)));
}
