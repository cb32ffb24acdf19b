//! Expansion of `\multiinclude` numeric filename ranges.

use crate::result::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// The three options are captured by independent sub-patterns so their
// order inside the bracket block does not matter.
static RE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"format\s*=\s*([-0-9a-zA-Z]+)\s*[,\]]").expect("valid format regex"));
static RE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"start\s*=\s*([0-9]+)\s*[,\]]").expect("valid start regex"));
static RE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"end\s*=\s*([0-9]+)\s*[,\]]").expect("valid end regex"));

/// Filenames produced for one `\multiinclude`, plus the extension the
/// `format=` option dictated (when given, no further probing applies)
#[derive(Debug)]
pub struct Expansion {
    pub files: Vec<PathBuf>,
    pub format_ext: Option<String>,
}

fn frame_name(stem: &str, number: impl std::fmt::Display, format_ext: Option<&str>) -> PathBuf {
    match format_ext {
        // \multiinclude's own convention (MetaPost output) is a bare
        // numeric suffix; format= switches to <stem>-<N>.<ext>
        Some(ext) => PathBuf::from(format!("{stem}-{number}{ext}")),
        None => PathBuf::from(format!("{stem}.{number}")),
    }
}

/// Enumerate the files a `\multiinclude` stands for.
///
/// With `end=` the range `[start, end]` is enumerated without touching
/// the filesystem. Without it the stem's directory is listed and every
/// entry matching the frame pattern with a numeric suffix ≥ `start` is
/// kept. An empty result means no files exist for this include.
///
/// # Errors
/// Fails if a captured `start=`/`end=` value does not fit an integer.
pub fn expand_multiinclude(abs_stem: &Path, raw_options: &str) -> Result<Expansion> {
    let start = match RE_START.captures(raw_options) {
        Some(cap) => cap[1].parse::<u64>()?,
        None => 0,
    };
    let format_ext = RE_FORMAT
        .captures(raw_options)
        .map(|cap| format!(".{}", &cap[1]));

    let stem = abs_stem.to_string_lossy();

    if let Some(cap) = RE_END.captures(raw_options) {
        let end = cap[1].parse::<u64>()?;
        let files = (start..=end)
            .map(|number| frame_name(&stem, number, format_ext.as_deref()))
            .collect();
        return Ok(Expansion { files, format_ext });
    }

    // Open-ended sequence: discover frames on disk. regex::escape
    // keeps literal metacharacters in the path (%, dots, ...) from
    // being misread as pattern syntax.
    let dir = abs_stem.parent().unwrap_or_else(|| Path::new("/"));
    let name = abs_stem
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let frame_pattern = match &format_ext {
        Some(ext) => format!(
            "^{}-([0-9]+){}$",
            regex::escape(&name),
            regex::escape(ext)
        ),
        None => format!("^{}\\.([0-9]+)$", regex::escape(&name)),
    };
    let frame_regex = Regex::new(&frame_pattern).expect("valid frame regex");

    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if let Some(cap) = frame_regex.captures(&file_name) {
                if cap[1].parse::<u64>()? >= start {
                    files.push(dir.join(file_name.as_ref()));
                }
            }
        }
    }

    Ok(Expansion { files, format_ext })
}
