mod cli;
mod logging;
mod tui;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()

use cli::commands::{data_dir, run_cli};
use cli::opts::Cli;

fn main() -> Result<()> {
    let args = Cli::parse();

    if let Err(e) = logging::init_logging(&data_dir(&args), &args.log_level) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::info!(store = ?args.store, "flashdeck starting");

    run_cli(args)
}
