use std::fmt::Write as _;

use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is
/// one, how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::ActionRejected { method, url, status, body } => render_action_rejected(method, url, *status, body),
        Error::FileNotFound { path } => format!("\
# Error: File Not Found

`{}` does not exist.
", path.display()),
        Error::Http(e) => format!("\
# Error: Admin API Unreachable

{e}

## Fix

Check `server` and `admin_api` under `[paths]` in `.spotcheck.toml`.
"),
        Error::InvalidServer { server, reason } => format!("\
# Error: Invalid Server URL

`{server}` can't be used as the admin API origin: {reason}

## Fix

Set `server` under `[paths]` in `.spotcheck.toml` to an absolute URL such as
`http://localhost:8080`.
"),
        Error::MismatchNotFound { file, mismatch_id } => format!("\
# Error: Mismatch Not Found

No record in `{}` has `mismatchId` {mismatch_id}.

## Fix

List the records and their ids:

    spotcheck links {}
", file.display(), file.display()),
        Error::MismatchParse { file, reason } => format!("\
# Error: Invalid Mismatch Records

Could not parse `{}`: {reason}

## Fix

The file must hold a JSON array of mismatch objects, each with at least
`mismatchId`, `dataSource`, and `contentType`.
", file.display()),
        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Correct or remove `.spotcheck.toml`; every key in it is optional.
"),
        _ => render_generic(e),
    }
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::Json(e) => format!("\
# Error: JSON Output

{e}
"),
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_action_rejected(method: &str, url: &str, status: u16, body: &str) -> String {
    let mut out = format!("\
# Error: Action Rejected

`{method} {url}` returned status {status}.
");
    if !body.trim().is_empty() {
        out.push_str("\n## Response\n\n");
        for line in body.lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}
