//! Extraction of image-inclusion commands from LaTeX source.
//!
//! Comments are stripped first, then a single compound pattern matches
//! `\includegraphics`, `\uncovergraphics` and `\multiinclude` with their
//! overlay, option and path groups. LaTeX is not parsed in general; the
//! pattern covers the quasi-grammar these three commands actually use.

use crate::result::{Error, Result};
use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

/// Unescaped `%` through end of line. A `\%` is a literal percent.
static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|[^\\])%[^\r\n]*").expect("valid comment regex"));

/// Independent occurrence counter for the structural self-check.
static RE_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(includegraphics|multiinclude|uncovergraphics)\b").expect("valid command regex")
});

/// The compound include pattern. Groups:
/// 1 command, 2 overlay, 3 options, 4 path (shortest match), 5 the
/// trailing `}.ext` construct when an extension was appended outside
/// the path braces. The option block may span lines and nest brackets
/// one level deep.
pub(crate) static RE_INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\\(includegraphics|multiinclude|uncovergraphics)\s*(<.*>\s*)?(\[[^\[\]]*(?:\[[^\]]*\][^\[\]]*)*\]\s*)?\{\s*(.+?)(\}\.[a-zA-Z0-9]+)?\s*\}",
    )
    .expect("valid include regex")
});

/// The three recognized image-inclusion commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    IncludeGraphics,
    UncoverGraphics,
    MultiInclude,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Command::IncludeGraphics => "includegraphics",
            Command::UncoverGraphics => "uncovergraphics",
            Command::MultiInclude => "multiinclude",
        };
        write!(f, "{name}")
    }
}

/// One parsed include-command invocation, in source order
#[derive(Debug, Clone)]
pub struct IncludeMatch {
    /// The full matched text
    pub full_text: String,
    pub command: Command,
    /// Raw `<...>` overlay specification, trailing whitespace included
    pub overlay: Option<String>,
    /// Raw `[...]` option block, trailing whitespace included
    pub options: Option<String>,
    /// Path text between the braces
    pub raw_path: String,
    /// Extension (with leading dot) when one was given explicitly
    pub explicit_ext: Option<String>,
}

/// Result of scanning a whole source buffer
#[derive(Debug)]
pub struct ScanOutcome {
    pub matches: Vec<IncludeMatch>,
    /// Command occurrences including commented-out ones
    pub total: usize,
    /// Command occurrences after comment stripping
    pub uncommented: usize,
}

impl ScanOutcome {
    /// Check the structural invariant: every un-commented command must
    /// have produced exactly one match.
    ///
    /// # Errors
    /// Fails with [`Error::MalformedInclude`] when the compound pattern
    /// missed a command, which indicates malformed or unusually
    /// formatted source.
    pub fn verify(&self) -> Result {
        if self.matches.len() == self.uncommented {
            Ok(())
        } else {
            Err(Error::MalformedInclude {
                found: self.matches.len(),
                expected: self.uncommented,
            })
        }
    }
}

/// Remove comment suffixes, line by line
pub fn strip_comments(source: &str) -> String {
    RE_COMMENT.replace_all(source, "$1").into_owned()
}

pub(crate) fn match_from_captures(cap: &Captures) -> IncludeMatch {
    let command = match &cap[1] {
        "multiinclude" => Command::MultiInclude,
        "uncovergraphics" => Command::UncoverGraphics,
        _ => Command::IncludeGraphics,
    };

    let mut raw_path = cap[4].to_string();
    // An extension matched outside the path braces means the lazy path
    // group stopped one `}` early; give the brace back to the path.
    let explicit_ext = match cap.get(5) {
        Some(group) => {
            raw_path.push('}');
            Some(group.as_str().trim_start_matches('}').to_string())
        }
        None => None,
    };

    IncludeMatch {
        full_text: cap[0].to_string(),
        command,
        overlay: cap.get(2).map(|g| g.as_str().to_string()),
        options: cap.get(3).map(|g| g.as_str().to_string()),
        raw_path,
        explicit_ext,
    }
}

/// Scan a source buffer for include commands.
///
/// Comments are stripped before matching, so commented-out commands
/// contribute nothing. Call [`ScanOutcome::verify`] afterwards to
/// enforce the match-count invariant.
pub fn scan(source: &str) -> ScanOutcome {
    let total = RE_COMMAND.find_iter(source).count();
    let stripped = strip_comments(source);
    let uncommented = RE_COMMAND.find_iter(&stripped).count();

    let matches = RE_INCLUDE
        .captures_iter(&stripped)
        .map(|cap| match_from_captures(&cap))
        .collect();

    ScanOutcome {
        matches,
        total,
        uncommented,
    }
}
