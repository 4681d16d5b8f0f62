use anyhow::Result;
use clap::Parser;

use dots::cli::{self, Cli};
use dots::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    match args.command {
        cli::Command::Init => commands::init::run(&args.global, &log),
        cli::Command::List => commands::list::run(&args.global, &log),
        cli::Command::Add(opts) => commands::add::run(&args.global, &opts, &log),
        cli::Command::Rm(opts) => commands::rm::run(&args.global, &opts, &log),
        cli::Command::Sync(opts) => commands::sync::run(&args.global, &opts, &log),
    }
}
