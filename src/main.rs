use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use welth::{
    format, is_keystroke_allowed, validate_json, Account, AccountSummary, Error, GrammarKind,
    Key, RecordKind, Transaction,
};

#[derive(Parser)]
#[command(name = "welth", version)]
#[command(about = "Format bank codes, gate keystrokes and validate account payloads")]
struct Cli {
    /// Log filter (e.g. `debug`, `welth=trace`); defaults to RUST_LOG, then `warn`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a value against a grammar (`ifsc` or `account-number`)
    Format {
        grammar: GrammarKind,
        #[arg(allow_hyphen_values = true)]
        raw: String,
    },
    /// Decide whether a key may be inserted at a cursor position
    Gate {
        grammar: GrammarKind,
        /// Current field value
        #[arg(long, default_value = "")]
        value: String,
        /// Cursor position; defaults to the end of the value
        #[arg(long)]
        cursor: Option<usize>,
        /// DOM-style key name: `a`, `5`, `Backspace`, `ArrowLeft`, ...
        #[arg(long, allow_hyphen_values = true)]
        key: String,
    },
    /// Validate an `account` or `transaction` JSON payload (file or stdin)
    Validate {
        record: RecordKind,
        path: Option<PathBuf>,
    },
    /// Print the account header from `{ "account": .., "transactions": [..] }`
    Summary { path: Option<PathBuf> },
    /// Dump a grammar table as JSON
    Grammar { grammar: GrammarKind },
}

#[derive(Deserialize)]
struct AccountPage {
    account: Account,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Command::Format { grammar, raw } => {
            println!("{}", format(grammar.grammar(), &raw));
            Ok(ExitCode::SUCCESS)
        }
        Command::Gate {
            grammar,
            value,
            cursor,
            key,
        } => {
            let cursor = cursor.unwrap_or_else(|| value.chars().count());
            let key = Key::parse(&key);
            let allowed = is_keystroke_allowed(grammar.grammar(), &value, cursor, &key);
            debug!(grammar = %grammar.grammar(), cursor, %key, allowed, "gate decision");
            if allowed {
                println!("allowed");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("blocked");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Validate { record, path } => run_validate(record, path.as_deref()),
        Command::Summary { path } => run_summary(path.as_deref()),
        Command::Grammar { grammar } => {
            println!("{}", serde_json::to_string_pretty(grammar.grammar())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_validate(record: RecordKind, path: Option<&Path>) -> Result<ExitCode> {
    let payload = read_input(path)?;
    info!(%record, bytes = payload.len(), "validating payload");

    match validate_json(record, &payload) {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Validation(issues)) => {
            for issue in &issues {
                println!("{}", issue);
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).context("could not validate payload"),
    }
}

fn run_summary(path: Option<&Path>) -> Result<ExitCode> {
    let payload = read_input(path)?;
    let page: AccountPage =
        serde_json::from_str(&payload).context("expected { \"account\": .., \"transactions\": [..] }")?;

    let summary = AccountSummary::new(&page.account, &page.transactions);
    println!("{}", summary);
    Ok(ExitCode::SUCCESS)
}

/// Read a file, or stdin when no path (or `-`) is given
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
