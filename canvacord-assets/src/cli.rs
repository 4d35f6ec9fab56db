use anyhow::Result;
use canvacord_assets_lib::config::{ASSETS_DIR_ENV, Config};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{install::InstallCommand, status::StatusCommand};

#[derive(Parser)]
#[command(name = "canvacord-assets")]
#[command(about = "Download the image and font assets used by Canvacord")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(clap::Args, Clone)]
pub struct GlobalArgs {
    /// Directory the assets are installed into
    #[arg(long, global = true, env = ASSETS_DIR_ENV)]
    pub assets_dir: Option<PathBuf>,

    /// Location of the asset manifest
    #[arg(long, global = true)]
    pub manifest_url: Option<String>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn config(&self) -> Config {
        Config::setup(self.assets_dir.as_deref(), self.manifest_url.as_deref())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the manifest and every asset it lists
    #[command(alias = "build")]
    Install(InstallCommand),

    /// Show which installed assets are present on disk
    Status(StatusCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Install(cmd) => cmd.run(self.global_args).await,
            Commands::Status(cmd) => cmd.run(self.global_args).await,
        }
    }
}
