use anyhow::{Context, Result};
use beamer2reveal::args::{init_logger, Args, FigureArg};
use beamer2reveal::graphics::{resolve_matches, scan, ListOptions};
use beamer2reveal::utils;
use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

fn process(args: &FigureArg) -> Result<()> {
    let opts = ListOptions {
        strict: args.strict,
        check_files: !args.no_check,
        first_only: args.uniq,
    };

    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut commands = 0;

    for input in &args.inputs {
        let source = utils::read_source(Some(input))
            .with_context(|| format!("reading {}", input.display()))?;
        let source_dir = utils::source_dir(Some(input), args.src_dir.as_deref());

        let outcome = scan(&source);
        eprintln!(
            "Found {} include commands ({} uncommented).",
            outcome.total, outcome.uncommented
        );
        outcome.verify()?;

        commands += outcome.matches.len();
        files.extend(resolve_matches(&outcome.matches, &source_dir, &opts)?);
    }

    for file in &files {
        println!("{}", file.display());
    }
    eprintln!("Found {} files for {commands} include commands", files.len());

    Ok(())
}

fn main() {
    let args = FigureArg::parse();
    init_logger(&Args::Figures(&args));

    if let Err(err) = process(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
