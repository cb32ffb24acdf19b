//! Resolution of scanned include matches to on-disk files.

use crate::graphics::expand::expand_multiinclude;
use crate::graphics::resolve::{
    exists_as_file, explicit_extension, find_with_extension, resolve_abspath, ALLOWED_EXT,
};
use crate::graphics::scan::{Command, IncludeMatch};
use crate::result::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Strictness and probing behavior for [`resolve_matches`]
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    /// Promote missing-file warnings to hard failures
    pub strict: bool,
    /// Verify resolved paths against the filesystem
    pub check_files: bool,
    /// Keep only the highest-priority extension match per stem
    pub first_only: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions {
            strict: false,
            check_files: true,
            first_only: false,
        }
    }
}

fn missing(path: PathBuf, strict: bool) -> Result {
    if strict {
        Err(Error::MissingFile(path))
    } else {
        log::warn!("No files for {}", path.display());
        Ok(())
    }
}

/// Map every scanned match to its files and accumulate them into a
/// deduplicated, lexicographically sorted set.
///
/// Matches without an authoritative extension are probed against
/// [`ALLOWED_EXT`]; matches with one are only checked for existence.
/// With `check_files` off no filesystem access happens at all and the
/// literal resolved paths are reported.
///
/// # Errors
/// Fails on an invalid explicit extension, and on any missing file
/// when `strict` is set.
pub fn resolve_matches(
    matches: &[IncludeMatch],
    source_dir: &Path,
    opts: &ListOptions,
) -> Result<BTreeSet<PathBuf>> {
    let mut resolved = BTreeSet::new();

    for include in matches {
        let abspath = resolve_abspath(&include.raw_path, source_dir);

        let (files, ext) = match include.command {
            Command::MultiInclude => {
                let options = include.options.as_deref().unwrap_or("");
                let expansion = expand_multiinclude(&abspath, options)?;
                if expansion.files.is_empty() {
                    missing(abspath, opts.strict)?;
                    continue;
                }
                (expansion.files, expansion.format_ext)
            }
            Command::IncludeGraphics | Command::UncoverGraphics => {
                let (file, ext) = explicit_extension(include, &abspath)?;
                (vec![file], ext)
            }
        };

        if !opts.check_files {
            resolved.extend(files);
            continue;
        }

        if ext.is_none() {
            for stem in files {
                let found = find_with_extension(&stem, &ALLOWED_EXT, opts.first_only);
                if found.is_empty() {
                    missing(stem, opts.strict)?;
                } else {
                    resolved.extend(found);
                }
            }
        } else {
            for file in files {
                if exists_as_file(&file) {
                    resolved.insert(file);
                } else {
                    missing(file, opts.strict)?;
                }
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::scan::scan;
    use std::fs::File;

    fn resolve(source: &str, dir: &Path, opts: &ListOptions) -> Result<BTreeSet<PathBuf>> {
        let outcome = scan(source);
        outcome.verify()?;
        resolve_matches(&outcome.matches, dir, opts)
    }

    #[test]
    fn listing_is_sorted_and_deduplicated() {
        let dir = tempfile::tempdir().expect("tempdir");
        File::create(dir.path().join("b.png")).expect("create b");
        File::create(dir.path().join("a.png")).expect("create a");

        let files = resolve(
            "\\includegraphics{b}\n\\includegraphics{a}\n\\includegraphics{b}\n",
            dir.path(),
            &ListOptions::default(),
        )
        .expect("resolves");

        let files: Vec<PathBuf> = files.into_iter().collect();
        assert_eq!(files, vec![dir.path().join("a.png"), dir.path().join("b.png")]);
    }

    #[test]
    fn missing_files_warn_by_default_and_fail_in_strict_mode() {
        let dir = tempfile::tempdir().expect("tempdir");

        let lenient = resolve(
            "\\includegraphics{ghost}\n",
            dir.path(),
            &ListOptions::default(),
        )
        .expect("lenient mode continues");
        assert!(lenient.is_empty());

        let strict = resolve(
            "\\includegraphics{ghost}\n",
            dir.path(),
            &ListOptions {
                strict: true,
                ..ListOptions::default()
            },
        );
        assert!(matches!(strict, Err(Error::MissingFile(_))));
    }

    #[test]
    fn no_check_reports_literal_paths() {
        let files = resolve(
            "\\includegraphics{ghost.png}\n",
            Path::new("/elsewhere"),
            &ListOptions {
                check_files: false,
                ..ListOptions::default()
            },
        )
        .expect("resolves without filesystem access");
        assert_eq!(
            files.into_iter().collect::<Vec<PathBuf>>(),
            vec![PathBuf::from("/elsewhere/ghost.png")]
        );
    }

    #[test]
    fn uniq_keeps_one_file_per_stem() {
        let dir = tempfile::tempdir().expect("tempdir");
        File::create(dir.path().join("plot.png")).expect("create png");
        File::create(dir.path().join("plot.pdf")).expect("create pdf");

        let all = resolve(
            "\\includegraphics{plot}\n",
            dir.path(),
            &ListOptions::default(),
        )
        .expect("resolves");
        assert_eq!(all.len(), 2);

        let uniq = resolve(
            "\\includegraphics{plot}\n",
            dir.path(),
            &ListOptions {
                first_only: true,
                ..ListOptions::default()
            },
        )
        .expect("resolves");
        assert_eq!(
            uniq.into_iter().collect::<Vec<PathBuf>>(),
            vec![dir.path().join("plot.png")]
        );
    }

    #[test]
    fn multiinclude_frames_are_probed_for_extensions() {
        let dir = tempfile::tempdir().expect("tempdir");
        File::create(dir.path().join("anim.0.png")).expect("create frame");
        File::create(dir.path().join("anim.1.png")).expect("create frame");

        let files = resolve(
            "\\multiinclude[start=0,end=1]{anim}\n",
            dir.path(),
            &ListOptions::default(),
        )
        .expect("resolves");
        assert_eq!(
            files.into_iter().collect::<Vec<PathBuf>>(),
            vec![
                dir.path().join("anim.0.png"),
                dir.path().join("anim.1.png"),
            ]
        );
    }

    #[test]
    fn multiinclude_format_frames_only_need_to_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        File::create(dir.path().join("anim-0.png")).expect("create frame");

        let strict = ListOptions {
            strict: true,
            ..ListOptions::default()
        };
        let files = resolve(
            "\\multiinclude[format=png,end=0]{anim}\n",
            dir.path(),
            &strict,
        )
        .expect("resolves");
        assert_eq!(
            files.into_iter().collect::<Vec<PathBuf>>(),
            vec![dir.path().join("anim-0.png")]
        );

        let missing = resolve(
            "\\multiinclude[format=png,end=1]{anim}\n",
            dir.path(),
            &strict,
        );
        assert!(matches!(missing, Err(Error::MissingFile(_))));
    }

    #[test]
    fn open_ended_multiinclude_without_frames_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");

        let strict = resolve(
            "\\multiinclude{anim}\n",
            dir.path(),
            &ListOptions {
                strict: true,
                ..ListOptions::default()
            },
        );
        assert!(matches!(strict, Err(Error::MissingFile(_))));
    }
}
