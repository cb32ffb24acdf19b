use anyhow::{Context, Result};
use beamer2reveal::args::{init_logger, Args, IncludeArg};
use beamer2reveal::{normalize, utils};
use clap::Parser;

fn process(args: &IncludeArg) -> Result<()> {
    let input = args.input.as_deref();
    let source = utils::read_source(input).context("reading input")?;
    let source_dir = utils::source_dir(input, None);

    print!("{}", normalize::normalize(&source, &source_dir)?);
    Ok(())
}

fn main() {
    let args = IncludeArg::parse();
    init_logger(&Args::Includes(&args));

    if let Err(err) = process(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
