use clap::Parser;
use std::path::PathBuf;

pub enum Args<'a> {
    Slides(&'a SlideArg),
    Includes(&'a IncludeArg),
    Figures(&'a FigureArg),
}

impl<'a> Args<'a> {
    #[must_use]
    pub fn verbose(&self) -> bool {
        match self {
            Args::Slides(args) => args.verbose,
            Args::Includes(args) => args.verbose,
            Args::Figures(args) => args.verbose,
        }
    }
}

/// Initialize logging for a binary; verbose mode lowers the filter so
/// informational diagnostics show up too
pub fn init_logger(args: &Args) {
    let level = if args.verbose() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .init();
}

/// Arguments for converting beamer columns/blocks into reveal.js fenced divs
#[derive(Parser)]
#[command(author, version, about)]
pub struct SlideArg {
    /// LaTeX source to convert (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Arguments for normalizing include commands into single-line form
#[derive(Parser)]
#[command(author, version, about)]
pub struct IncludeArg {
    /// LaTeX source to normalize (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Arguments for listing the figure files a LaTeX source includes
#[derive(Parser)]
#[command(author, version, about)]
pub struct FigureArg {
    /// LaTeX sources to inspect ("-" for stdin)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Turn missing-file warnings into hard failures
    #[arg(long = "raise")]
    pub strict: bool,

    /// Print the literal resolved paths without checking the filesystem
    #[arg(long = "no-check", alias = "no-file-check")]
    pub no_check: bool,

    /// Directory used to resolve relative paths (defaults to each input's directory)
    #[arg(long)]
    pub src_dir: Option<PathBuf>,

    /// Report only the highest-priority extension match per stem
    #[arg(long)]
    pub uniq: bool,

    /// Verbose mode
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
