// File: ./src/cli.rs
//! Command-line parsing, help text and logger setup for the binary.
use crate::config::Config;
use crate::model::{DedupePolicy, IdentityPolicy};
use anyhow::{Result, anyhow};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::fmt::Write;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    Rollup,
    /// Print the config path, writing defaults first if the file is missing.
    Config,
    Help,
}

/// Parsed command line. `None` fields leave the config value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub command: Command,
    pub root: Option<PathBuf>,
    pub notes_dir: Option<PathBuf>,
    pub insert: Option<PathBuf>,
    pub identity_policy: Option<IdentityPolicy>,
    pub dedupe_policy: Option<DedupePolicy>,
    pub flat: bool,
    pub sort: bool,
    pub no_dedupe: bool,
    pub no_override: bool,
    pub chronological: bool,
    pub include_today: bool,
    pub json: bool,
    pub verbose: bool,
}

impl Args {
    /// Parse arguments, excluding the binary name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Args::default();
        let mut iter = args.into_iter().map(Into::into);

        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .ok_or_else(|| anyhow!("Missing value for {}", flag))
            };
            match arg.as_str() {
                "-h" | "--help" | "help" => out.command = Command::Help,
                "config" => out.command = Command::Config,
                "-r" | "--root" => out.root = Some(PathBuf::from(value(arg.as_str())?)),
                "-d" | "--dir" => out.notes_dir = Some(PathBuf::from(value(arg.as_str())?)),
                "-i" | "--insert" => out.insert = Some(PathBuf::from(value(arg.as_str())?)),
                "--policy" => {
                    let v = value(arg.as_str())?;
                    out.dedupe_policy = Some(
                        DedupePolicy::from_str(&v)
                            .map_err(|_| anyhow!("Unknown dedupe policy '{}'", v))?,
                    );
                }
                "--strict" => out.identity_policy = Some(IdentityPolicy::Strict),
                "--lenient" => out.identity_policy = Some(IdentityPolicy::Lenient),
                "--flat" => out.flat = true,
                "--sort" => out.sort = true,
                "--no-dedupe" => out.no_dedupe = true,
                "--no-override" => out.no_override = true,
                "--chrono" => out.chronological = true,
                "--include-today" => out.include_today = true,
                "--json" => out.json = true,
                "-v" | "--verbose" => out.verbose = true,
                other => return Err(anyhow!("Unknown argument '{}'", other)),
            }
        }

        Ok(out)
    }

    /// Fold command-line overrides into a loaded config.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(dir) = &self.notes_dir {
            cfg.notes_dir = Some(dir.clone());
        }
        if let Some(p) = self.identity_policy {
            cfg.identity_policy = p;
        }
        if let Some(p) = self.dedupe_policy {
            cfg.aggregate.dedupe_policy = p;
        }
        if self.flat {
            cfg.aggregate.group_by_date = false;
        }
        if self.sort {
            cfg.aggregate.sort_alphabetically = true;
        }
        if self.no_dedupe {
            cfg.aggregate.dedupe = false;
        }
        if self.no_override {
            cfg.aggregate.override_with_newer_checked = false;
        }
        if self.chronological {
            cfg.aggregate.reverse_chronological = false;
        }
        if self.include_today {
            cfg.include_today = true;
        }
        if self.verbose {
            cfg.log_level = "debug".to_string();
        }
    }
}

/// Log to stderr so stdout stays clean for the rendered tasks.
pub fn init_logging(level: log::LevelFilter) {
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

pub fn help_text(binary_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "agg-daily-tasks v{} - Roll up unchecked tasks from daily notes",
        env!("CARGO_PKG_VERSION")
    );
    out.push('\n');
    let _ = writeln!(out, "USAGE:");
    let _ = writeln!(out, "    {} [OPTIONS]", binary_name);
    let _ = writeln!(out, "    {} config [--root <path>]", binary_name);
    let _ = writeln!(out, "    {} --help", binary_name);
    out.push('\n');
    let _ = writeln!(out, "OPTIONS:");
    let _ = writeln!(out, "    -d, --dir <path>      Folder searched, with subfolders, for YYYY-MM-DD.md notes (default: .)");
    let _ = writeln!(out, "    -i, --insert <file>   Insert the result into a note instead of printing it.");
    let _ = writeln!(out, "                          Replaces the marker line, or appends if absent.");
    let _ = writeln!(out, "    -r, --root <path>     Use a different directory for config.");
    let _ = writeln!(out, "    --policy <name>       oldest-wins (default) or newest-wins, see RULES");
    let _ = writeln!(out, "    --strict              Abort when a note name is not a valid date");
    let _ = writeln!(out, "    --lenient             Skip notes whose name is not a valid date");
    let _ = writeln!(out, "    --flat                One list, no date headings");
    let _ = writeln!(out, "    --sort                Sort tasks alphabetically");
    let _ = writeln!(out, "    --no-dedupe           Keep every occurrence of a repeated task");
    let _ = writeln!(out, "    --no-override         Ignore checks made on newer notes");
    let _ = writeln!(out, "    --chrono              Oldest date first");
    let _ = writeln!(out, "    --include-today       Also read today's note");
    let _ = writeln!(out, "    --json                Print the surviving tasks as JSON");
    let _ = writeln!(out, "    -v, --verbose         Debug logging on stderr");
    let _ = writeln!(out, "    -h, --help            Show this help message.");
    out.push('\n');
    let _ = writeln!(out, "RULES:");
    let _ = writeln!(out, "    A task checked on a date hides the same task left open on older dates.");
    let _ = writeln!(out, "    A task open on several dates is listed once, under the oldest of them.");
    let _ = writeln!(
        out,
        "    With --policy newest-wins it is listed under the most recent date instead."
    );
    out
}

pub fn print_help(binary_name: &str) {
    print!("{}", help_text(binary_name));
}
