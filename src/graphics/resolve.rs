//! Mapping of raw include paths to absolute on-disk files.

use crate::graphics::scan::IncludeMatch;
use crate::result::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Extensions an include may resolve to, in priority order
pub const ALLOWED_EXT: [&str; 12] = [
    ".png", ".jpg", ".pdf", ".gif", ".eps", ".jpeg", ".PNG", ".JPG", ".PDF", ".GIF", ".EPS",
    ".JPEG",
];

/// Strip the LaTeX `\string` escape token and any stray brace or
/// whitespace wrapping around a path
pub fn clean_raw_path(raw_path: &str) -> String {
    raw_path
        .replace("\\string", "")
        .trim_start_matches(['{', '\t', ' '])
        .trim_end_matches(['}', '\t', ' '])
        .to_string()
}

/// Expand a leading `~` or `~user` to the relevant home directory.
/// No other shell expansion is performed.
fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if let Some(rest) = path.strip_prefix('~') {
        // ~user: a sibling of the current home directory
        let (user, tail) = match rest.split_once('/') {
            Some((user, tail)) => (user, Some(tail)),
            None => (rest, None),
        };
        if let Some(base) = dirs::home_dir().and_then(|home| home.parent().map(Path::to_path_buf)) {
            let mut expanded = base.join(user);
            if let Some(tail) = tail {
                expanded.push(tail);
            }
            return expanded;
        }
    }
    PathBuf::from(path)
}

/// Lexical normalization: drop `.` components and fold `..` without
/// touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }
    normalized
}

/// Turn a raw path fragment into an absolute path.
///
/// The fragment is cleaned with [`clean_raw_path`], `~` shorthand is
/// expanded, absolute paths pass through unchanged and relative ones
/// are joined to `source_dir` (itself resolved against the current
/// working directory).
pub fn resolve_abspath(raw_path: &str, source_dir: &Path) -> PathBuf {
    let path = expand_home(&clean_raw_path(raw_path));
    if path.is_absolute() {
        return path;
    }

    let joined = source_dir.join(path);
    if joined.is_absolute() {
        normalize(&joined)
    } else {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        normalize(&cwd.join(joined))
    }
}

/// Existence via lstat: regular files and symlinks count, including
/// broken symlinks
pub fn exists_as_file(path: &Path) -> bool {
    std::fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_file() || meta.file_type().is_symlink())
        .unwrap_or(false)
}

/// Probe `stem + ext` for each allowed extension in priority order.
///
/// Returns every existing candidate, or only the first when
/// `first_only` is set. An empty result is left for the caller to
/// judge.
pub fn find_with_extension(stem: &Path, allowed: &[&str], first_only: bool) -> Vec<PathBuf> {
    let stem = stem.to_string_lossy();
    let mut files = Vec::new();

    for ext in allowed {
        let candidate = PathBuf::from(format!("{stem}{ext}"));
        if exists_as_file(&candidate) {
            files.push(candidate);
            if first_only {
                break;
            }
        }
    }

    files
}

/// Resolve the authoritative extension of an `includegraphics` or
/// `uncovergraphics` match.
///
/// A `}.ext` group wins outright; otherwise an extension embedded in
/// the path text is validated against [`ALLOWED_EXT`]. A `None`
/// extension in the result means the caller should probe the
/// filesystem.
///
/// # Errors
/// Fails with [`Error::InvalidExtension`] when the path carries an
/// extension outside the allowed set.
pub fn explicit_extension(
    include: &IncludeMatch,
    abspath: &Path,
) -> Result<(PathBuf, Option<String>)> {
    if let Some(ext) = &include.explicit_ext {
        let mut filename = abspath.as_os_str().to_os_string();
        filename.push(ext);
        return Ok((PathBuf::from(filename), Some(ext.clone())));
    }

    if !include.raw_path.ends_with('}') {
        let cleaned = clean_raw_path(&include.raw_path);
        if let Some(ext) = Path::new(&cleaned).extension() {
            let ext = format!(".{}", ext.to_string_lossy());
            if !ALLOWED_EXT.contains(&ext.as_str()) {
                return Err(Error::InvalidExtension {
                    ext,
                    path: include.raw_path.clone(),
                });
            }
            return Ok((abspath.to_path_buf(), Some(ext)));
        }
    }

    Ok((abspath.to_path_buf(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::scan::scan;
    use std::fs::File;
    use std::os::unix::fs::symlink;

    #[test]
    fn absolute_paths_pass_through() {
        assert_eq!(
            resolve_abspath("/usr/share/fig", Path::new("/tmp")),
            PathBuf::from("/usr/share/fig")
        );
    }

    #[test]
    fn relative_paths_join_the_source_dir() {
        assert_eq!(
            resolve_abspath("fig/plot", Path::new("/slides/deck")),
            PathBuf::from("/slides/deck/fig/plot")
        );
    }

    #[test]
    fn parent_components_are_folded() {
        assert_eq!(
            resolve_abspath("../fig/./plot", Path::new("/slides/deck")),
            PathBuf::from("/slides/fig/plot")
        );
    }

    #[test]
    fn string_token_and_braces_are_stripped() {
        assert_eq!(clean_raw_path("{\\string~/fig }"), "~/fig");
        assert_eq!(clean_raw_path("\t{fig}\t"), "fig");
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home directory");
        assert_eq!(resolve_abspath("~/fig", Path::new(".")), home.join("fig"));
    }

    #[test]
    fn extension_priority_returns_the_only_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("plot");
        File::create(dir.path().join("plot.png")).expect("create png");

        let found = find_with_extension(&stem, &ALLOWED_EXT, false);
        assert_eq!(found, vec![dir.path().join("plot.png")]);
    }

    #[test]
    fn first_only_stops_at_the_highest_priority_match() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("plot");
        File::create(dir.path().join("plot.pdf")).expect("create pdf");
        File::create(dir.path().join("plot.png")).expect("create png");

        let found = find_with_extension(&stem, &ALLOWED_EXT, true);
        assert_eq!(found, vec![dir.path().join("plot.png")]);
    }

    #[test]
    fn broken_symlinks_count_as_existing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let link = dir.path().join("plot.png");
        symlink(dir.path().join("gone.png"), &link).expect("symlink");

        assert!(exists_as_file(&link));
        let found = find_with_extension(&dir.path().join("plot"), &ALLOWED_EXT, false);
        assert_eq!(found, vec![link]);
    }

    #[test]
    fn explicit_extension_is_authoritative() {
        let outcome = scan("\\includegraphics{{fig/plot}.png}\n");
        let (file, ext) = explicit_extension(&outcome.matches[0], Path::new("/src/fig/plot"))
            .expect("resolves");
        assert_eq!(file, PathBuf::from("/src/fig/plot.png"));
        assert_eq!(ext.as_deref(), Some(".png"));
    }

    #[test]
    fn embedded_extension_is_validated() {
        let outcome = scan("\\includegraphics{fig/plot.tikz}\n");
        let err = explicit_extension(&outcome.matches[0], Path::new("/src/fig/plot.tikz"))
            .expect_err("rejects");
        assert!(matches!(err, Error::InvalidExtension { ext, .. } if ext == ".tikz"));
    }

    #[test]
    fn embedded_allowed_extension_skips_probing() {
        let outcome = scan("\\includegraphics{fig/plot.png}\n");
        let (file, ext) = explicit_extension(&outcome.matches[0], Path::new("/src/fig/plot.png"))
            .expect("resolves");
        assert_eq!(file, PathBuf::from("/src/fig/plot.png"));
        assert_eq!(ext.as_deref(), Some(".png"));
    }
}
