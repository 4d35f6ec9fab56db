use thiserror::Error;

/// Failures of an installation run that callers may want to match on.
///
/// Operations return `anyhow::Result`; use `downcast_ref::<InstallError>()`
/// to recover one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstallError {
    #[error("[HTTP{status}] Could not download {url}!")]
    DownloadFailed { status: u16, url: String },

    #[error("Asset name '{0}' is not a plain file name")]
    UnsafeAssetName(String),

    #[error("Asset name '{0}' is listed more than once")]
    DuplicateAssetName(String),

    #[error("Manifest is malformed: {0}")]
    InvalidManifest(String),
}
