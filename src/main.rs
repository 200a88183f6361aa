mod cli;
mod config;
mod convert;
mod logging;
mod next_cmd;
mod resolve_cmd;
mod terms_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Resolve(args) => resolve_cmd::run(args),
        Command::Terms(args) => terms_cmd::run(args),
        Command::Next(args) => next_cmd::run(args),
    }
}
