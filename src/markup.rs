//! Line-oriented rewriting of beamer `columns`/`block` environments
//! into pandoc fenced divs and headings.
//!
//! One command per line is assumed and nesting balance is not
//! validated; malformed nesting simply emits mismatched markers.

use regex::Regex;
use std::sync::LazyLock;

static RE_COLUMNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\\begin\{columns\}(?:\[([^\]]*)\])?").expect("valid columns regex")
});
static RE_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\\begin\{column\}(?:\[([^\]]*)\])?\{(.+)\}").expect("valid column regex")
});
static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\\begin\{(alert|example|)block\}\{(.*)\}").expect("valid block regex")
});
static RE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\\end\{((?:alert|example|)block|columns?)\}").expect("valid end regex")
});
static RE_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]*(?:\.[0-9]*)?)(.*)$").expect("valid width regex"));

/// Convert a beamer column width to an HTML-friendly one;
/// `0.5\textwidth` becomes `50%`, other units pass through
fn width_to_html(width: &str) -> String {
    let trimmed = width.trim();
    if let Some(cap) = RE_WIDTH.captures(trimmed) {
        let (number, unit) = (&cap[1], &cap[2]);
        if unit == "\\textwidth" || unit == "\\linewidth" {
            if let Ok(fraction) = number.parse::<f64>() {
                let percent = (fraction * 1e6).round() / 1e4;
                return format!("{percent}%");
            }
        }
    }
    trimmed.to_string()
}

/// Rewrite one source line. `None` means the line is swallowed (block
/// ends have no markdown counterpart); everything unrecognized passes
/// through with trailing whitespace trimmed.
pub fn rewrite_line(line: &str) -> Option<String> {
    if let Some(cap) = RE_COLUMNS.captures(line) {
        let options = cap.get(1).map_or("", |g| g.as_str());
        return Some(format!(":::::: {{.columns options=\"{options}\"}}"));
    }

    if let Some(cap) = RE_COLUMN.captures(line) {
        let placement = cap.get(1).map_or("", |g| g.as_str());
        let width = width_to_html(&cap[2]);
        return Some(format!(
            "::: {{.column width=\"{width}\" placement=\"{placement}\"}}"
        ));
    }

    if let Some(cap) = RE_BLOCK.captures(line) {
        let title = &cap[2];
        return Some(match &cap[1] {
            // slide-level 2 convention
            "" => format!("\\subsubsection{{{title}}}"),
            "alert" => format!("### {title} {{.alert}}"),
            _ => format!("### {title} {{.example}}"),
        });
    }

    if let Some(cap) = RE_END.captures(line) {
        return match &cap[1] {
            "columns" => Some("::::::".to_string()),
            "column" => Some(":::".to_string()),
            // block environments opened as sections; nothing to close
            _ => None,
        };
    }

    Some(line.trim_end().to_string())
}

/// Rewrite a whole source buffer, one line at a time
pub fn rewrite(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    for line in source.lines() {
        if let Some(rendered) = rewrite_line(line) {
            output.push_str(&rendered);
            output.push('\n');
        }
    }
    output
}
