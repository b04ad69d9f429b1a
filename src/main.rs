mod config;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use eventwhisper_evtx::{filter_events, list_evtx_files};
use eventwhisper_types::{FilterRequest, Param};

use crate::config::Config;

/// Eventwhisper - Filtered, bounded access to Windows event logs
#[derive(Parser, Debug)]
#[command(name = "eventwhisper")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to $EVENTWHISPER_CONFIG, then built-in limits)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List .evtx files in a directory
    List {
        #[arg(value_name = "DIR")]
        directory: String,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Filter records of one .evtx file, one JSON object per line
    Filter {
        #[arg(value_name = "FILE")]
        provider: String,

        /// Earliest record time (inclusive)
        #[arg(long)]
        start: Option<String>,

        /// Latest record time (inclusive)
        #[arg(long)]
        end: Option<String>,

        /// Maximum records to return
        #[arg(long)]
        limit: Option<String>,

        /// Maximum records to examine
        #[arg(long)]
        scan_limit: Option<String>,

        /// Event ids to keep, e.g. "1,3" or "[4624, 4625]"
        #[arg(long)]
        event_ids: Option<String>,

        /// Keep records containing any of these terms
        #[arg(long)]
        contains: Vec<String>,

        /// Drop records containing any of these terms
        #[arg(long)]
        not_contains: Vec<String>,

        /// Dotted paths to project, e.g. Event.System.EventID
        #[arg(long)]
        fields: Vec<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(args);

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

fn run(args: Args) -> Result<()> {
    let config = Config::resolve(args.config.as_deref()).context("failed to load configuration")?;

    let lines = match args.command {
        Command::List { directory, recursive } => list_evtx_files(&directory, recursive),
        Command::Filter {
            provider,
            start,
            end,
            limit,
            scan_limit,
            event_ids,
            contains,
            not_contains,
            fields,
        } => {
            let request = FilterRequest {
                start: start.into(),
                end: end.into(),
                results_limit: limit.into(),
                scan_limit: scan_limit.into(),
                event_ids: event_ids.into(),
                contains: list_param(contains),
                not_contains: list_param(not_contains),
                fields: list_param(fields),
            };
            filter_events(&provider, &request, &config.limits)
        }
    };

    let mut out = BufWriter::new(io::stdout().lock());
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    Ok(())
}

/// Repeated flags become a list; an absent flag stays unset
fn list_param(values: Vec<String>) -> Param {
    if values.is_empty() {
        Param::Null
    } else {
        Param::from(values)
    }
}
