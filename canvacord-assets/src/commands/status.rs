use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::Result;
use canvacord_assets_lib::installer::{self, InstallationStatus};
use chrono::{DateTime, Local};
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct StatusCommand {
    /// Only list assets that are missing
    #[arg(long)]
    pub missing: bool,
}

impl StatusCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = global_args.config();

        let Some(status) = installer::installation_status(&config)? else {
            ui::warning(&format!(
                "No assets installed in {}",
                config.assets_dir.display()
            ));
            ui::tip("Run `canvacord-assets install` to download them.");
            return Ok(());
        };

        ui::info(&format!(
            "{} {}",
            "Assets:".cyan(),
            config.assets_dir.display()
        ));
        ui::info(&manifest_age_message(&status, Local::now()));
        tracing::info!("");

        for asset in &status.assets {
            if asset.present && self.missing {
                continue;
            }
            let marker = if asset.present {
                "✓".green()
            } else {
                "✗".red()
            };
            ui::info(&format!(
                "  {} {:<5} {}",
                marker,
                asset.kind.to_string().dimmed(),
                asset.name
            ));
        }

        tracing::info!("");
        let missing = status.missing().count();
        if missing == 0 {
            ui::success(&format!("All {} assets are installed", status.assets.len()));
        } else {
            ui::warning(&format!(
                "{missing} of {} assets are missing",
                status.assets.len()
            ));
            ui::tip("Run `canvacord-assets install --force` to download them again.");
        }

        Ok(())
    }
}

fn manifest_age_message(status: &InstallationStatus, now: DateTime<Local>) -> String {
    match status.manifest_modified {
        Some(modified) => {
            let local_time = modified.with_timezone(&Local);
            let days_ago = now.signed_duration_since(local_time).num_days().max(0);
            format!(
                "{} {} {} {}",
                "Manifest:".cyan(),
                "installed".dimmed(),
                format!("{days_ago}").green().bold(),
                "days ago.".dimmed(),
            )
        }
        None => format!(
            "{} {}",
            "Manifest:".cyan(),
            "installation time unknown.".dimmed()
        ),
    }
}
