use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// Input/Output error
    Io(std::io::Error),
    /// Parsing error
    Parsing(std::num::ParseIntError),
    /// The include pattern missed at least one un-commented command
    MalformedInclude { found: usize, expected: usize },
    /// A referenced graphic has no file on disk
    MissingFile(PathBuf),
    /// An include-like command with no known rewrite
    UnsupportedCommand(String),
    /// An explicit extension outside the allowed set
    InvalidExtension { ext: String, path: String },
    /// A conversion target already exists on disk
    WouldOverwrite(PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "Io error: {err}"),
            Error::Parsing(err) => write!(f, "Parsing error: {err}"),
            Error::MalformedInclude { found, expected } => write!(
                f,
                "Parsed {found} include commands but counted {expected} un-commented occurrences"
            ),
            Error::MissingFile(path) => write!(f, "No files for {}", path.display()),
            Error::UnsupportedCommand(cmd) => write!(f, "Unsupported command \\{cmd}"),
            Error::InvalidExtension { ext, path } => {
                write!(f, "Invalid includegraphics extension {ext:?} ({path})")
            }
            Error::WouldOverwrite(path) => {
                write!(f, "Refusing to overwrite existing file {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::Parsing(err)
    }
}

pub type Result<T = ()> = std::result::Result<T, Error>;
