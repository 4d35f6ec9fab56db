use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::Result;
use canvacord_assets_lib::installer::{self, BuildOutcome};
use canvacord_assets_lib::remote::HttpAssetClient;
use clap::Args;

#[derive(Args)]
pub struct InstallCommand {
    /// Download everything again even if the assets are already installed
    #[arg(long, short)]
    pub force: bool,
}

impl InstallCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = global_args.config();
        let client = HttpAssetClient::new(&config)?;
        tracing::debug!("Installing assets into {}", config.assets_dir.display());

        match installer::build(&config, &client, self.force).await? {
            BuildOutcome::Installed { images, fonts } => {
                ui::success(&format!(
                    "Installed {images} images and {fonts} fonts to {}",
                    config.assets_dir.display()
                ));
            }
            BuildOutcome::Skipped => {
                ui::tip("Run `canvacord-assets install --force` to download everything again.");
            }
            BuildOutcome::ManifestUnavailable => {
                ui::tip(&format!(
                    "Check that {} is reachable, then run the install again.",
                    config.manifest_url
                ));
            }
        }

        Ok(())
    }
}
