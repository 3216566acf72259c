pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod render;
pub mod row;
pub mod snapshot;
pub mod sort;
pub mod task;

use std::ffi::OsString;

use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli = cli::GlobalCli::parse_from(
    raw_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting snaptask CLI"
  );

  let cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  debug!(
    ?cfg.loaded_file,
    "configuration resolved"
  );

  clock::init_project_timezone(
    cfg.timezone.as_deref()
  );

  commands::dispatch(&cli, &cfg)
}
