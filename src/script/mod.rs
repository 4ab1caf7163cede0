//! Navigation command scripts
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! next | prev                 move one unit
//! granularity <name|rank>     set the granularity
//! more | less                 one step more / less granular
//! subnav on|off               toggle subnavigation
//! table enter [force] [top]   enter table mode
//! table exit
//! table first|last|row-first|row-last|col-first|col-last
//! table next-row|prev-row|next-col|prev-col|headers|where
//! math enter
//! math exit [back]
//! math domain|traversal|explore
//! find link|heading|button    next object inside one
//! top | bottom                sync to the page start / end
//! act                         activate the current unit
//! node <id>                   jump to a node
//! set <name>=<value>          change a setting
//! store | restore             save / load granularity in the session store
//! reset                       back to the initial state
//! ```

pub mod session;

pub use session::Session;

use crate::error::{ErrorType, NavError, Result};
use crate::granularity::Granularity;
use crate::navigator::TableEntry;

/// Table mode command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCommand {
    Enter(TableEntry),
    Exit,
    FirstCell,
    LastCell,
    RowFirst,
    RowLast,
    ColFirst,
    ColLast,
    NextRow,
    PrevRow,
    NextCol,
    PrevCol,
    Headers,
    Location,
}

/// Math mode command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathCommand {
    Enter,
    Exit { back: bool },
    CycleDomain,
    CycleTraversal,
    ToggleExplore,
}

/// What `find` looks for in the ancestor chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindTarget {
    Link,
    Heading,
    Button,
}

impl FindTarget {
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Link => "links",
            Self::Heading => "headings",
            Self::Button => "buttons",
        }
    }
}

/// Parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    Granularity(Granularity),
    MoreGranular,
    LessGranular,
    Subnav(bool),
    Table(TableCommand),
    Math(MathCommand),
    Find(FindTarget),
    Top,
    Bottom,
    Act,
    Node(usize),
    Set(String),
    Store,
    Restore,
    Reset,
}

fn parse_error(code: &str, message: String) -> NavError {
    NavError::new(ErrorType::Parse, code, message)
}

fn missing(command: &str, what: &str) -> NavError {
    parse_error("MISSING_ARGUMENT", format!("{command}: expected {what}"))
}

fn invalid(command: &str, arg: &str) -> NavError {
    parse_error("INVALID_ARGUMENT", format!("{command}: unexpected argument '{arg}'"))
}

/// Parse one script line; `Ok(None)` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<NavCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let name = parts[0].to_lowercase();
    let args = &parts[1..];

    let no_args = |cmd: NavCommand| match args.first() {
        Some(arg) => Err(invalid(&name, arg)),
        None => Ok(cmd),
    };

    let command = match name.as_str() {
        "next" | "n" => no_args(NavCommand::Next)?,
        "prev" | "p" => no_args(NavCommand::Prev)?,
        "more" => no_args(NavCommand::MoreGranular)?,
        "less" => no_args(NavCommand::LessGranular)?,
        "top" => no_args(NavCommand::Top)?,
        "bottom" => no_args(NavCommand::Bottom)?,
        "act" => no_args(NavCommand::Act)?,
        "store" => no_args(NavCommand::Store)?,
        "restore" => no_args(NavCommand::Restore)?,
        "reset" => no_args(NavCommand::Reset)?,
        "granularity" | "gran" => {
            let arg = args.first().ok_or_else(|| missing(&name, "a granularity"))?;
            NavCommand::Granularity(arg.parse()?)
        }
        "subnav" => match args {
            ["on"] => NavCommand::Subnav(true),
            ["off"] => NavCommand::Subnav(false),
            [] => return Err(missing(&name, "on or off")),
            [arg, ..] => return Err(invalid(&name, arg)),
        },
        "table" => NavCommand::Table(parse_table(args)?),
        "math" => NavCommand::Math(parse_math(args)?),
        "find" => match args {
            ["link"] => NavCommand::Find(FindTarget::Link),
            ["heading"] => NavCommand::Find(FindTarget::Heading),
            ["button"] => NavCommand::Find(FindTarget::Button),
            [] => return Err(missing(&name, "link, heading or button")),
            [arg, ..] => return Err(invalid(&name, arg)),
        },
        "node" => {
            let arg = args.first().ok_or_else(|| missing(&name, "a node id"))?;
            let id = arg
                .parse()
                .map_err(|_| parse_error("INVALID_ARGUMENT", format!("node: invalid id '{arg}'")))?;
            NavCommand::Node(id)
        }
        "set" => match args {
            [assignment] if assignment.contains('=') => NavCommand::Set((*assignment).to_string()),
            [] => return Err(missing(&name, "name=value")),
            [arg, ..] => return Err(invalid(&name, arg)),
        },
        _ => {
            return Err(parse_error(
                "UNKNOWN_COMMAND",
                format!("Unknown command: {}", parts[0]),
            ))
        }
    };
    Ok(Some(command))
}

fn parse_table(args: &[&str]) -> Result<TableCommand> {
    let (sub, rest) = args.split_first().ok_or_else(|| missing("table", "a subcommand"))?;
    if *sub == "enter" {
        let mut entry = TableEntry::default();
        for flag in rest {
            match *flag {
                "force" => entry.force = true,
                "top" => entry.from_top = true,
                other => return Err(invalid("table enter", other)),
            }
        }
        return Ok(TableCommand::Enter(entry));
    }
    if let Some(extra) = rest.first() {
        return Err(invalid("table", extra));
    }
    Ok(match *sub {
        "exit" => TableCommand::Exit,
        "first" => TableCommand::FirstCell,
        "last" => TableCommand::LastCell,
        "row-first" => TableCommand::RowFirst,
        "row-last" => TableCommand::RowLast,
        "col-first" => TableCommand::ColFirst,
        "col-last" => TableCommand::ColLast,
        "next-row" => TableCommand::NextRow,
        "prev-row" => TableCommand::PrevRow,
        "next-col" => TableCommand::NextCol,
        "prev-col" => TableCommand::PrevCol,
        "headers" => TableCommand::Headers,
        "where" => TableCommand::Location,
        other => return Err(invalid("table", other)),
    })
}

fn parse_math(args: &[&str]) -> Result<MathCommand> {
    match args {
        ["enter"] => Ok(MathCommand::Enter),
        ["exit"] => Ok(MathCommand::Exit { back: false }),
        ["exit", "back"] => Ok(MathCommand::Exit { back: true }),
        ["domain"] => Ok(MathCommand::CycleDomain),
        ["traversal"] => Ok(MathCommand::CycleTraversal),
        ["explore"] => Ok(MathCommand::ToggleExplore),
        [] => Err(missing("math", "a subcommand")),
        [.., last] => Err(invalid("math", last)),
    }
}

/// Parse a whole script, reporting the line number of the first error
pub fn parse_script(script: &str) -> Result<Vec<NavCommand>> {
    let mut commands = Vec::new();
    for (idx, line) in script.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(cmd)) => commands.push(cmd),
            Ok(None) => {}
            Err(mut err) => {
                err.message = format!("line {}: {}", idx + 1, err.message);
                return Err(err);
            }
        }
    }
    Ok(commands)
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
