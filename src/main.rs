//! navscript - run a navigation command script against a document
//!
//! ```text
//! navscript <document.json> [script] [--braille] [--settings <file.json>] [--state <file>]
//! ```
//!
//! Without a script file, commands are read from stdin. Each output line
//! is what a screen reader would speak (or show on a braille display).

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use monster_nav::document::Document;
use monster_nav::script::Session;
use monster_nav::settings::NavSettings;
use monster_nav::store::{FileStorage, SessionStore};

const USAGE: &str =
    "usage: navscript <document.json> [script] [--braille] [--settings <file.json>] [--state <file>]";

struct Config {
    document: PathBuf,
    script: Option<PathBuf>,
    settings: Option<PathBuf>,
    state: Option<PathBuf>,
    braille: bool,
}

fn parse_args() -> Result<Config> {
    let mut args = std::env::args().skip(1);
    let mut positional = Vec::new();
    let mut settings = None;
    let mut state = None;
    let mut braille = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--braille" | "-b" => braille = true,
            "--settings" => {
                let path = args.next().context("--settings requires a path argument")?;
                settings = Some(PathBuf::from(path));
            }
            "--state" => {
                let path = args.next().context("--state requires a path argument")?;
                state = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n{USAGE}"),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    let Some(document) = positional.next() else {
        bail!("missing document path\n{USAGE}");
    };
    let script = positional.next();
    if let Some(extra) = positional.next() {
        bail!("unexpected argument '{}'\n{USAGE}", extra.display());
    }

    Ok(Config {
        document,
        script,
        settings,
        state,
        braille,
    })
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("NAV_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = parse_args()?;

    let source = std::fs::read_to_string(&config.document)
        .with_context(|| format!("reading {}", config.document.display()))?;
    let doc = Document::from_json(&source)
        .with_context(|| format!("loading {}", config.document.display()))?;

    let settings = match &config.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            NavSettings::from_json(&json)?
        }
        None => NavSettings::default(),
    };

    let storage = config.state.as_ref().map(FileStorage::new);
    let store = match &storage {
        Some(backend) => SessionStore::load(backend)?,
        None => SessionStore::new(),
    };

    let script = match &config.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading script from stdin")?;
            input
        }
    };

    let mut session = Session::with_store(doc, settings, store).with_braille(config.braille);
    tracing::debug!(nodes = session.document().len(), "document loaded");

    if let Some(line) = session.current() {
        println!("{line}");
    }
    for line in session.run_script(&script)? {
        println!("{line}");
    }

    if let Some(backend) = &storage {
        session.save_state();
        session.store().save(backend)?;
    }
    Ok(())
}
