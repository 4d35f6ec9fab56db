use crate::manifest::AssetEntry;
use anyhow::Result;
use serde_json::Value;
use std::path::Path;

pub trait AssetClient {
    /// Fetches the raw manifest document.
    fn fetch_manifest(&self) -> impl Future<Output = Result<Value>> + Send;

    /// Downloads one asset to `output_path`. On error nothing is left at `output_path`.
    fn download_asset(
        &self,
        entry: &AssetEntry,
        output_path: &Path,
    ) -> impl Future<Output = Result<()>> + Send;
}
