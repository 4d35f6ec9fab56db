use crate::manifest::AssetKind;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST_URL: &str =
    "https://raw.githubusercontent.com/DevAndromeda/canvacord/assets/datasrc.json";

/// Environment variable the CLI reads to override the asset root.
pub const ASSETS_DIR_ENV: &str = "CANVACORD_ASSETS";

#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for the installed assets
    pub assets_dir: PathBuf,

    /// Directory where downloaded images are stored
    pub images_dir: PathBuf,

    /// Directory where downloaded fonts are stored
    pub fonts_dir: PathBuf,

    /// Local copy of the remote manifest; its presence marks a finished install
    pub manifest_file: PathBuf,

    /// Where the manifest is fetched from
    pub manifest_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new_for_path(&Self::default_assets_dir())
    }
}

impl Config {
    pub fn new_for_path(assets_dir: &Path) -> Self {
        Self {
            assets_dir: assets_dir.to_path_buf(),
            images_dir: assets_dir.join(AssetKind::Image.dir_name()),
            fonts_dir: assets_dir.join(AssetKind::Font.dir_name()),
            manifest_file: assets_dir.join("meta.json"),
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
        }
    }

    /// Builds a Config from optional overrides, falling back to
    /// [Self::default_assets_dir] and [DEFAULT_MANIFEST_URL].
    pub fn setup(assets_dir: Option<&Path>, manifest_url: Option<&str>) -> Self {
        let assets_dir = assets_dir
            .map(|d| d.to_path_buf())
            .unwrap_or_else(Self::default_assets_dir);
        let config = Self::new_for_path(&assets_dir);

        match manifest_url {
            Some(url) => Self {
                manifest_url: url.to_string(),
                ..config
            },
            None => config,
        }
    }

    pub fn default_assets_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"))
            .join("canvacord")
            .join("assets")
    }

    pub fn dir_for(&self, kind: AssetKind) -> &Path {
        match kind {
            AssetKind::Image => &self.images_dir,
            AssetKind::Font => &self.fonts_dir,
        }
    }

    /// Creates the asset root and both category directories. Safe to call repeatedly.
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.assets_dir, &self.fonts_dir, &self.images_dir] {
            std::fs::create_dir_all(dir)
                .context(format!("Failed to create asset directory: {:?}", dir))?;
        }
        Ok(())
    }
}
