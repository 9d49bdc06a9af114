mod actions;
mod commands;
mod config;
mod diagnostics;
mod diff_view;
mod error;
mod logger;
mod registry;
mod settle;
mod types;
mod urls;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::commands::{Action, DiffArgs, ViewArgs};
use crate::types::IgnoreLevel;

#[derive(Parser)]
#[command(name = "spotcheck", about = "Labels, links, and actions for spotcheck mismatches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete every issue attached to a mismatch
    DeleteIssues {
        mismatch_id: i64,
        /// Print the request instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Render the diff between two text files
    Diff {
        /// Reference text
        left: PathBuf,
        /// Observed text
        right: PathBuf,
        /// Print the settled layout as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        view: ViewFlags,
    },
    /// Set the ignore level of a mismatch
    Ignore {
        mismatch_id: i64,
        #[arg(value_enum)]
        level: IgnoreLevel,
        /// Print the request instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the labels for a data source and report type
    Labels {
        /// Data source tag, e.g. LBDC or NYSENATE (all known sources if omitted)
        data_source: Option<String>,
        /// Report type tag, e.g. LBDC_DAYBREAK
        #[arg(long)]
        report_type: Option<String>,
    },
    /// Print content and reference links for a JSON file of mismatches
    Links {
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show labels, links, and the diff for one mismatch
    Show {
        file: PathBuf,
        mismatch_id: i64,
        #[command(flatten)]
        view: ViewFlags,
    },
    /// Attach a mismatch to a tracking issue
    Track {
        mismatch_id: i64,
        issue_id: String,
        /// Print the request instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Detach a mismatch from a tracking issue
    Untrack {
        mismatch_id: i64,
        issue_id: String,
        /// Print the request instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Layout switches shared by `diff` and `show`.
#[derive(Args)]
struct ViewFlags {
    /// Viewport width used to measure wrapped lines
    #[arg(long, default_value_t = 80)]
    columns: usize,
    /// Never lay the diff out as a preformatted block
    #[arg(long)]
    no_pre: bool,
    /// Hide the line number gutter
    #[arg(long)]
    no_line_numbers: bool,
    /// Don't word-wrap inline diffs
    #[arg(long)]
    no_wrap: bool,
}

impl ViewFlags {
    /// Convert parsed flags into command arguments.
    const fn to_view_args(&self) -> ViewArgs {
        return ViewArgs {
            columns: self.columns,
            force_inline: self.no_pre,
            no_line_numbers: self.no_line_numbers,
            no_wrap: self.no_wrap,
        };
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let result = match &cli.command {
        Commands::DeleteIssues { mismatch_id, dry_run } => {
            commands::action(*mismatch_id, &Action::DeleteIssues, *dry_run)
        },
        Commands::Diff { left, right, json, view } => commands::diff(&DiffArgs {
            json: *json,
            left,
            right,
            view: view.to_view_args(),
        }),
        Commands::Ignore { mismatch_id, level, dry_run } => {
            commands::action(*mismatch_id, &Action::Ignore(*level), *dry_run)
        },
        Commands::Labels { data_source, report_type } => {
            commands::labels(data_source.as_deref(), report_type.as_deref());
            Ok(())
        },
        Commands::Links { file, json } => commands::links(file, *json),
        Commands::Show { file, mismatch_id, view } => commands::show(file, *mismatch_id, &view.to_view_args()),
        Commands::Track { mismatch_id, issue_id, dry_run } => {
            commands::action(*mismatch_id, &Action::Track(issue_id), *dry_run)
        },
        Commands::Untrack { mismatch_id, issue_id, dry_run } => {
            commands::action(*mismatch_id, &Action::Untrack(issue_id), *dry_run)
        },
    };

    return match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ error::Error::ActionRejected { .. }) => {
            diagnostics::print_error(&e);
            ExitCode::from(1)
        },
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(2)
        },
    };
}
