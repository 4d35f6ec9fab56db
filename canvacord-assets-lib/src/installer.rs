use crate::config::Config;
use crate::download_client::AssetClient;
use crate::manifest::{self, AssetEntry, AssetKind, Manifest};
use crate::report;
use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// How an installation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A manifest was already installed and no rebuild was forced
    Skipped,
    /// The manifest could not be fetched or understood; nothing was written
    ManifestUnavailable,
    /// Every listed asset was downloaded
    Installed { images: usize, fonts: usize },
}

/// Installs the manifest and every asset it lists into `config.assets_dir`.
///
/// Downloads run one at a time, images before fonts, in manifest order. The
/// first failed download aborts the run and is returned as the error.
pub async fn build<C: AssetClient>(
    config: &Config,
    download_client: &C,
    force: bool,
) -> Result<BuildOutcome> {
    config.ensure_directories()?;

    if force {
        report::pending("Rebuilding forcefully as --force was supplied!");
    }

    if !force && config.manifest_file.exists() {
        report::success("Assets installation skipped since metadata is already available!");
        return Ok(BuildOutcome::Skipped);
    }

    report::pending("Downloading assets...");

    let (document, manifest) = match fetch_manifest(download_client).await {
        Ok(fetched) => fetched,
        Err(e) => {
            report::failure("Failed assets installation!");
            tracing::warn!("{}", format!("{e:#}").dimmed());
            return Ok(BuildOutcome::ManifestUnavailable);
        }
    };

    manifest::persist(&config.manifest_file, &document)?;
    report::success("Successfully downloaded metadata!");
    tracing::debug!(
        "Manifest lists {} images and {} fonts",
        manifest.images.len(),
        manifest.fonts.len()
    );

    report::pending("Downloading images...");
    let images = download_all(config, download_client, AssetKind::Image, &manifest.images).await?;

    report::pending("Downloading fonts...");
    let fonts = download_all(config, download_client, AssetKind::Font, &manifest.fonts).await?;

    Ok(BuildOutcome::Installed { images, fonts })
}

async fn fetch_manifest<C: AssetClient>(download_client: &C) -> Result<(Value, Manifest)> {
    let document = download_client.fetch_manifest().await?;
    let manifest = Manifest::from_json_value(&document)?;
    Ok((document, manifest))
}

async fn download_all<C: AssetClient>(
    config: &Config,
    download_client: &C,
    kind: AssetKind,
    entries: &[AssetEntry],
) -> Result<usize> {
    let dir = config.dir_for(kind);

    for entry in entries {
        download_client
            .download_asset(entry, &dir.join(&entry.name))
            .await?;
        report::success(&format!(
            "Successfully downloaded {}",
            entry.name.bright_cyan()
        ));
    }

    Ok(entries.len())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledAsset {
    pub kind: AssetKind,
    pub name: String,
    pub path: PathBuf,
    pub present: bool,
}

/// Local view of an installation, read from the persisted manifest.
#[derive(Debug, Clone)]
pub struct InstallationStatus {
    pub manifest_modified: Option<DateTime<Utc>>,
    pub assets: Vec<InstalledAsset>,
}

impl InstallationStatus {
    pub fn missing(&self) -> impl Iterator<Item = &InstalledAsset> {
        self.assets.iter().filter(|asset| !asset.present)
    }

    pub fn is_complete(&self) -> bool {
        self.missing().next().is_none()
    }
}

/// Checks every entry of the installed manifest against the files on disk.
/// Returns `None` when nothing has been installed yet.
pub fn installation_status(config: &Config) -> Result<Option<InstallationStatus>> {
    if !config.manifest_file.exists() {
        return Ok(None);
    }

    let manifest = Manifest::load(&config.manifest_file)?;
    let manifest_modified = fs::metadata(&config.manifest_file)
        .and_then(|metadata| metadata.modified())
        .ok()
        .map(DateTime::<Utc>::from);

    let assets = manifest
        .entries()
        .map(|(kind, entry)| {
            let path = config.dir_for(kind).join(&entry.name);
            InstalledAsset {
                kind,
                name: entry.name.clone(),
                present: path.is_file(),
                path,
            }
        })
        .collect();

    Ok(Some(InstallationStatus {
        manifest_modified,
        assets,
    }))
}
