//! Rewriting of multi-line `\includegraphics` / `\uncovergraphics`
//! statements into single-line commands with explicit, resolved paths.
//!
//! The output feeds an HTML slide build, so resolution prefers
//! HTML-friendly extensions and only falls back to `.pdf`.

use crate::graphics::resolve::{explicit_extension, find_with_extension, resolve_abspath};
use crate::graphics::scan::{match_from_captures, Command, RE_INCLUDE};
use crate::result::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions a reveal.js build can use directly, in priority order
pub const ALLOWED_EXT_HTML: [&str; 10] = [
    ".svg", ".png", ".jpg", ".gif", ".jpeg", ".SVG", ".PNG", ".JPG", ".GIF", ".JPEG",
];

static RE_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("valid return regex"));
static RE_PDF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.pdf$").expect("valid pdf regex"));

fn rewrite_include(cap: &regex::Captures, source_dir: &Path) -> Result<String> {
    let include = match_from_captures(cap);
    if include.command == Command::MultiInclude {
        return Err(Error::UnsupportedCommand(include.command.to_string()));
    }

    let abspath = resolve_abspath(&include.raw_path, source_dir);
    let (file, ext) = explicit_extension(&include, &abspath)?;
    let mut filename = file.to_string_lossy().into_owned();

    if ext.is_none() || ext.as_deref() == Some(".pdf") {
        // Probe for an HTML-friendly variant of the same stem before
        // settling for a pdf.
        let stem = RE_PDF.replace(&filename, "").into_owned();
        let mut allowed: Vec<&str> = ALLOWED_EXT_HTML.to_vec();
        allowed.push(".pdf");
        match find_with_extension(Path::new(&stem), &allowed, true).into_iter().next() {
            Some(found) => filename = found.to_string_lossy().into_owned(),
            None => log::error!("No files for {filename}"),
        }
    }

    if filename.ends_with(".pdf") {
        log::warn!(
            "Only a \"pdf\" found for {:?}. Convert with inkscape.",
            include.raw_path
        );
        let output_svg = RE_PDF.replace(&filename, ".svg").into_owned();
        // The svg is a conversion target; never clobber an existing one.
        if Path::new(&output_svg).exists() {
            return Err(Error::WouldOverwrite(output_svg.into()));
        }
        filename = output_svg;
    }

    let overlay = include.overlay.as_deref().unwrap_or("");
    let options = include.options.as_deref().unwrap_or("");
    let rewritten = format!("\\includegraphics{overlay}{options}{{{filename}}}");

    // Drop the newlines that made the command multi-line.
    Ok(RE_RETURN.replace_all(&rewritten, " ").into_owned())
}

/// Replace every include command in `source` with its single-line,
/// resolved form. Text outside the matches is untouched, so running
/// the filter on its own output is a no-op.
///
/// # Errors
/// Fails on `\multiinclude` (no single-line form exists), on invalid
/// explicit extensions, and when a pdf-to-svg substitution would
/// overwrite an existing file.
pub fn normalize(source: &str, source_dir: &Path) -> Result<String> {
    let mut output = String::with_capacity(source.len());
    let mut last = 0;

    for cap in RE_INCLUDE.captures_iter(source) {
        let whole = cap.get(0).map_or(0..0, |m| m.range());
        output.push_str(&source[last..whole.start]);
        output.push_str(&rewrite_include(&cap, source_dir)?);
        last = whole.end;
    }
    output.push_str(&source[last..]);

    Ok(output)
}
