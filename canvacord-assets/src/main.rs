mod cli;
mod commands;
mod ui;

use anyhow::Result;
use canvacord_assets_lib::logging::initialize_logging;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.global_args.verbose);
    cli.run().await
}
