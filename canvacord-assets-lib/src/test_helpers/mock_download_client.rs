use crate::download_client::AssetClient;
use crate::error::InstallError;
use crate::manifest::AssetEntry;
use anyhow::{Context, anyhow};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Builds a manifest document with `images` PNG entries and `fonts` TTF entries.
pub fn sample_manifest(images: usize, fonts: usize) -> Value {
    let images: Vec<_> = (0..images)
        .map(|i| {
            json!({
                "name": format!("image-{i}.png"),
                "url": format!("https://example.com/images/image-{i}.png"),
            })
        })
        .collect();
    let fonts: Vec<_> = (0..fonts)
        .map(|i| {
            json!({
                "name": format!("font-{i}.ttf"),
                "url": format!("https://example.com/fonts/font-{i}.ttf"),
            })
        })
        .collect();
    json!({ "data": { "images": images, "fonts": fonts } })
}

/// Serves a fixed manifest and writes placeholder files instead of downloading.
/// Every request is recorded and logged as `request <what>`: `"manifest"` for the
/// manifest, the URL for assets.
pub struct MockAssetClient {
    manifest: Option<Value>,
    failing_url: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl MockAssetClient {
    pub fn new(manifest: Value) -> Self {
        Self {
            manifest: Some(manifest),
            failing_url: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A client whose manifest request fails like an unreachable host.
    pub fn unavailable() -> Self {
        Self {
            manifest: None,
            ..Self::new(Value::Null)
        }
    }

    /// Answers requests for `url` with a 404.
    pub fn failing_on(self, url: &str) -> Self {
        Self {
            failing_url: Some(url.to_string()),
            ..self
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: &str) {
        tracing::info!("request {}", request);
        self.requests.lock().unwrap().push(request.to_string());
    }
}

impl AssetClient for MockAssetClient {
    async fn fetch_manifest(&self) -> anyhow::Result<Value> {
        self.record("manifest");
        self.manifest
            .clone()
            .ok_or_else(|| anyhow!("error sending request: connection refused"))
    }

    async fn download_asset(&self, entry: &AssetEntry, output_path: &Path) -> anyhow::Result<()> {
        self.record(&entry.url);

        if self.failing_url.as_deref() == Some(entry.url.as_str()) {
            return Err(InstallError::DownloadFailed {
                status: 404,
                url: entry.url.clone(),
            }
            .into());
        }

        fs::write(output_path, format!("contents of {}", entry.name))
            .context(format!("Failed to write asset: {:?}", output_path))?;
        Ok(())
    }
}
