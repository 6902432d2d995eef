// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use imdb_scrape::{cli::{self, CliArgs}, log};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    log::init(args.source.verbose);

    let summary = cli::run(&args).wrap_err("scrape failed")?;
    cli::display(&summary.chart, &args).wrap_err("could not show the chart")?;
    Ok(())
}
