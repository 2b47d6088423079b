use std::fmt::Write;
use std::io::IsTerminal;

use anyhow::Result;

use crate::repo_status::RepoStatus;

pub type Symbols = [&'static str; 4];

pub const SYMBOLS_FANCY: Symbols = ["✓", "📝", "⬆", "❌"];
pub const SYMBOLS_PLAIN: Symbols = ["[OK]", "[M]", "[P]", "[X]"];

pub fn get_symbols() -> &'static Symbols {
    // Check environment variable first (explicit override)
    if std::env::var("DIRT_PLAIN_TEXT").is_ok() {
        return &SYMBOLS_PLAIN;
    }

    if std::env::var("DIRT_FANCY").is_ok() {
        return &SYMBOLS_FANCY;
    }

    if !std::io::stdout().is_terminal() {
        return &SYMBOLS_PLAIN;
    }

    if std::env::var("NO_COLOR").is_ok() {
        return &SYMBOLS_PLAIN;
    }

    if let Ok(term) = std::env::var("TERM") {
        let term = term.to_lowercase();
        if term == "dumb" || term == "vt100" || term.contains("linux") {
            return &SYMBOLS_PLAIN;
        }
    }

    &SYMBOLS_FANCY
}

pub fn render_line(status: &RepoStatus, symbols: &Symbols) -> String {
    let [ok, modified, unpushed, error] = symbols;
    let path = status.path.display();

    if let Some(err) = &status.error {
        return format!("{error} {path}: unknown ({err})");
    }

    match (status.uncommitted_changes, status.unpushed_commits) {
        (false, false) => format!("{ok} {path}: clean"),
        (true, false) => format!("{modified} {path}: uncommitted changes"),
        (false, true) => format!("{unpushed} {path}: unpushed commits"),
        (true, true) => format!("{modified} {path}: uncommitted changes, unpushed commits"),
    }
}

/// Plain text report. Clean repositories are listed only when `show_all` is set.
pub fn render(statuses: &[RepoStatus], show_all: bool, symbols: &Symbols) -> String {
    let mut out = String::new();

    for status in statuses {
        if show_all || status.needs_attention() {
            let _ = writeln!(out, "{}", render_line(status, symbols));
        }
    }

    let uncommitted = statuses.iter().filter(|s| s.uncommitted_changes).count();
    let unpushed = statuses.iter().filter(|s| s.unpushed_commits).count();
    let unknown = statuses.iter().filter(|s| !s.is_known()).count();

    if !out.is_empty() {
        out.push('\n');
    }
    if statuses.is_empty() {
        out.push_str("No repositories found\n");
        return out;
    }

    let _ = write!(out, "Scanned {} repositories", statuses.len());
    if uncommitted == 0 && unpushed == 0 && unknown == 0 {
        out.push_str(", all clean\n");
        return out;
    }
    if uncommitted > 0 {
        let _ = write!(out, ", {uncommitted} with uncommitted changes");
    }
    if unpushed > 0 {
        let _ = write!(out, ", {unpushed} with unpushed commits");
    }
    if unknown > 0 {
        let _ = write!(out, ", {unknown} could not be checked");
    }
    out.push('\n');
    out
}

pub fn render_json(statuses: &[RepoStatus]) -> Result<String> {
    Ok(serde_json::to_string_pretty(statuses)?)
}
