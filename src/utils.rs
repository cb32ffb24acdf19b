use crate::result::Result;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read a whole source file into memory; `None` or `-` means stdin
pub fn read_source(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Directory against which an input's relative include paths are
/// resolved: an explicit override wins, then the input file's own
/// directory, then the current directory (always the case for stdin)
pub fn source_dir(input: Option<&Path>, override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    input
        .filter(|path| path.as_os_str() != "-")
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdin_resolves_against_the_current_directory() {
        assert_eq!(source_dir(None, None), PathBuf::from("."));
        assert_eq!(source_dir(Some(Path::new("-")), None), PathBuf::from("."));
    }

    #[test]
    fn files_resolve_against_their_own_directory() {
        assert_eq!(
            source_dir(Some(Path::new("/slides/deck.tex")), None),
            PathBuf::from("/slides")
        );
        assert_eq!(source_dir(Some(Path::new("deck.tex")), None), PathBuf::from("."));
    }

    #[test]
    fn an_override_wins() {
        assert_eq!(
            source_dir(Some(Path::new("/slides/deck.tex")), Some(Path::new("/render"))),
            PathBuf::from("/render")
        );
    }
}
