//! CLI commands: labels, links, diff, and mismatch actions.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::actions::{self, ActionRequest, HttpTransport, MismatchActionClient};
use crate::config::Config;
use crate::diff_view::{DiffLayout, DiffOptions, MismatchDiffView};
use crate::error;
use crate::registry;
use crate::settle::{SettleTimer, WrappedTextMeasurer};
use crate::types::{DataSource, IgnoreLevel, Mismatch};
use crate::urls::UrlResolver;

/// One mismatch mutation requested on the command line.
pub enum Action<'a> {
    /// Delete every issue attached to the mismatch.
    DeleteIssues,
    /// Set the ignore level.
    Ignore(IgnoreLevel),
    /// Attach to a tracking issue.
    Track(&'a str),
    /// Detach from a tracking issue.
    Untrack(&'a str),
}

/// Arguments of the diff command.
pub struct DiffArgs<'a> {
    /// Print the layout as JSON.
    pub json: bool,
    /// File holding the left (reference) text.
    pub left: &'a Path,
    /// File holding the right (observed) text.
    pub right: &'a Path,
    /// Layout switches.
    pub view: ViewArgs,
}

/// Layout switches shared by `diff` and `show`.
pub struct ViewArgs {
    /// Rendered viewport width in characters.
    pub columns: usize,
    /// Never use preformatted layout.
    pub force_inline: bool,
    /// Hide the line number gutter.
    pub no_line_numbers: bool,
    /// Disable word wrapping of inline content.
    pub no_wrap: bool,
}

/// Labels and links for one mismatch.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkRow {
    /// Comparison heading for the data source.
    comparison: &'static str,
    /// Short label for the report type.
    content_label: &'static str,
    /// Link to the observed content, if one can be built.
    content_url: Option<String>,
    /// Label of the observed side.
    data_label: &'static str,
    /// Server-side mismatch identifier.
    mismatch_id: i64,
    /// Kind of mismatch.
    mismatch_type: String,
    /// Whether Open Legislation is the reference side.
    open_leg_reference: bool,
    /// Label of the reference side.
    ref_label: &'static str,
    /// Link to the reference content, if one can be built.
    reference_url: Option<String>,
}

/// Build and send (or print, with `dry_run`) one mismatch action.
///
/// # Errors
///
/// Returns config errors, transport errors, or `Error::ActionRejected`.
pub fn action(mismatch_id: i64, action: &Action<'_>, dry_run: bool) -> Result<(), error::Error> {
    let config = Config::load(&PathBuf::from("."))?;
    let client = MismatchActionClient::new(&config.paths.admin_api);
    let request = match action {
        Action::DeleteIssues => client.delete_all_issues(mismatch_id),
        Action::Ignore(level) => client.ignore(mismatch_id, *level),
        Action::Track(issue_id) => client.track(mismatch_id, issue_id),
        Action::Untrack(issue_id) => client.untrack(mismatch_id, issue_id),
    };

    if dry_run {
        print_request(&request, &config.paths.server)?;
        return Ok(());
    }

    let transport = HttpTransport::new(&config.paths.server);
    let response = actions::perform(&transport, &config.paths.server, &request)?;
    println!("{} {} -> {}", request.method.as_str(), request.url(&config.paths.server)?, response.status);
    return Ok(());
}

/// Render the left/right diff of two files, settling the layout first.
///
/// # Errors
///
/// Returns `Error::FileNotFound` or `Error::Io` for unreadable inputs,
/// or `Error::Json` if JSON output fails.
pub fn diff(args: &DiffArgs<'_>) -> Result<(), error::Error> {
    let config = Config::load(&PathBuf::from("."))?;
    let left = trim_final_newline(read_input(args.left)?);
    let right = trim_final_newline(read_input(args.right)?);

    let layout = settle_layout(&config, &args.view, &left, &right);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        print_layout(&layout, args.view.columns);
    }
    return Ok(());
}

/// Print the labels registered for a data source (every known source when
/// none is given) and, optionally, a report type.
pub fn labels(data_source: Option<&str>, report_type: Option<&str>) {
    let tags: Vec<&str> = match data_source {
        Some(tag) => vec![tag],
        None => DataSource::ALL.iter().map(|s| return s.tag()).collect(),
    };
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("source:     {tag}");
        println!("comparison: {}", registry::comparison_label(tag));
        println!("reference:  {}", registry::ref_label(tag));
        println!("data:       {}", registry::data_label(tag));
        println!("ol-ref:     {}", registry::is_open_leg_reference(tag));
    }
    if let Some(report_type) = report_type {
        println!("content:    {}", registry::report_type_label(report_type));
    }
}

/// Print labels and links for every mismatch in a JSON file.
///
/// # Errors
///
/// Returns `Error::FileNotFound`, `Error::Io`, `Error::MismatchParse`,
/// or `Error::Json` if JSON output fails.
pub fn links(file: &Path, json: bool) -> Result<(), error::Error> {
    let config = Config::load(&PathBuf::from("."))?;
    let mismatches = read_mismatches(file)?;

    let resolver = UrlResolver::new(&config.paths);
    let rows: Vec<LinkRow> = mismatches.iter().map(|m| return link_row(&resolver, m)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for row in &rows {
        print_link_row(row);
    }
    return Ok(());
}

/// Resolve labels and both links for one mismatch.
fn link_row(resolver: &UrlResolver<'_>, mismatch: &Mismatch) -> LinkRow {
    let key = mismatch.content_key();
    if key.is_none() {
        log::warn!("mismatch {}: unrecognized content key", mismatch.mismatch_id);
    }
    let content_url = key
        .as_ref()
        .and_then(|k| return resolver.content_url(k, &mismatch.data_source, &mismatch.content_type));
    let reference_url = key
        .as_ref()
        .and_then(|k| return resolver.reference_url(k, &mismatch.data_source, &mismatch.content_type));

    return LinkRow {
        comparison: registry::comparison_label(&mismatch.data_source),
        content_label: registry::report_type_label(&mismatch.ref_type),
        content_url,
        data_label: registry::data_label(&mismatch.data_source),
        mismatch_id: mismatch.mismatch_id,
        mismatch_type: mismatch.mismatch_type.clone(),
        open_leg_reference: registry::is_open_leg_reference(&mismatch.data_source),
        ref_label: registry::ref_label(&mismatch.data_source),
        reference_url,
    };
}

/// Print one mismatch's heading and both links.
fn print_link_row(row: &LinkRow) {
    println!("#{} {} [{}] {}", row.mismatch_id, row.content_label, row.comparison, row.mismatch_type);
    println!("  {}: {}", row.ref_label, row.reference_url.as_deref().unwrap_or("-"));
    println!("  {}: {}", row.data_label, row.content_url.as_deref().unwrap_or("-"));
}

/// Print a settled layout: numbered wrapped rows when a gutter is shown,
/// otherwise the flattened text as is. Change markers can push the marked
/// text onto more rows than were measured, so every row is numbered.
fn print_layout(layout: &DiffLayout, columns: usize) {
    let text = layout.rendered_text();
    if layout.gutter.is_empty() {
        println!("{text}");
        return;
    }
    let rows = wrap_rows(&text, columns);
    let width = rows.len().max(layout.gutter.len()).to_string().len();
    for (number, row) in (1_usize..).zip(rows.iter()) {
        println!("{number:>width$} │ {row}");
    }
}

/// Print a request without sending it.
///
/// # Errors
///
/// Returns `Error::InvalidServer` for a bad origin or `Error::Json` if
/// serialization fails.
fn print_request(request: &ActionRequest, origin: &str) -> Result<(), error::Error> {
    let url = request.url(origin)?;
    println!("{}", serde_json::to_string_pretty(request)?);
    println!("{} {url}", request.method.as_str());
    return Ok(());
}

/// Read and parse a JSON array of mismatch records.
///
/// # Errors
///
/// Returns `Error::FileNotFound`, `Error::Io`, or `Error::MismatchParse`.
fn read_mismatches(file: &Path) -> Result<Vec<Mismatch>, error::Error> {
    let content = read_input(file)?;
    let mismatches: Vec<Mismatch> =
        serde_json::from_str(&content).map_err(|e| return error::Error::MismatchParse {
            file: file.to_path_buf(),
            reason: e.to_string(),
        })?;
    log::debug!("read {} mismatches from {}", mismatches.len(), file.display());
    return Ok(mismatches);
}

/// Read an input file, naming it if it doesn't exist.
///
/// # Errors
///
/// Returns `Error::FileNotFound` for a missing file or `Error::Io` otherwise.
fn read_input(path: &Path) -> Result<String, error::Error> {
    return match std::fs::read_to_string(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(error::Error::FileNotFound { path: path.to_path_buf() })
        },
        Err(e) => Err(error::Error::Io(e)),
        Ok(c) => Ok(c),
    };
}

/// Run the diff view over one pair of inputs until every pending
/// measurement has fired, and return the settled layout.
fn settle_layout(config: &Config, args: &ViewArgs, left: &str, right: &str) -> DiffLayout {
    let mut options = DiffOptions::from_settings(&config.diff);
    options.force_inline = args.force_inline;
    options.show_line_numbers = options.show_line_numbers && !args.no_line_numbers;
    options.wrap = !args.no_wrap;

    let measurer = WrappedTextMeasurer::new(args.columns, config.diff.line_height);
    let mut view = MismatchDiffView::new(options);
    let mut timer = SettleTimer::new(Duration::from_millis(config.diff.settle_ms));

    if let Some(ticket) = view.set_inputs(left, right) {
        timer.schedule(ticket);
    }
    while let Some(ticket) = timer.wait_next() {
        view.apply_measurer(ticket, &measurer);
    }
    log::debug!("diff settled: preformatted={} lines={}", view.is_preformatted(), view.lines());
    return view.render();
}

/// Print labels, links, and the settled diff for one mismatch in a JSON file.
///
/// # Errors
///
/// Returns `Error::FileNotFound`, `Error::Io`, `Error::MismatchParse`,
/// or `Error::MismatchNotFound` when no record has the given id.
pub fn show(file: &Path, mismatch_id: i64, args: &ViewArgs) -> Result<(), error::Error> {
    let config = Config::load(&PathBuf::from("."))?;
    let mismatches = read_mismatches(file)?;
    let mismatch = mismatches
        .iter()
        .find(|m| return m.mismatch_id == mismatch_id)
        .ok_or_else(|| return error::Error::MismatchNotFound { file: file.to_path_buf(), mismatch_id })?;

    let resolver = UrlResolver::new(&config.paths);
    print_link_row(&link_row(&resolver, mismatch));
    println!();
    let layout = settle_layout(&config, args, &mismatch.reference_data, &mismatch.observed_data);
    print_layout(&layout, args.columns);
    return Ok(());
}

/// Drop one trailing line ending, which text files carry but which is not
/// part of the compared value.
fn trim_final_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    return text;
}

/// Split text into rows of at most `columns` characters, one or more per
/// logical line. A final newline opens no row.
fn wrap_rows(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let text = text.strip_suffix('\n').unwrap_or(text);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        rows.extend(chars.chunks(columns).map(|chunk| return chunk.iter().collect::<String>()));
    }
    return rows;
}
