use anyhow::{Context, Result};
use beamer2reveal::args::{init_logger, Args, SlideArg};
use beamer2reveal::{markup, utils};
use clap::Parser;

fn process(args: &SlideArg) -> Result<()> {
    let source = utils::read_source(args.input.as_deref()).context("reading input")?;
    print!("{}", markup::rewrite(&source));
    Ok(())
}

fn main() {
    let args = SlideArg::parse();
    init_logger(&Args::Slides(&args));

    if let Err(err) = process(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
