use crate::config::Config;
use crate::download_client::AssetClient;
use crate::error::InstallError;
use crate::logging::{progress_bar_style, spinner_style};
use crate::manifest::AssetEntry;
use anyhow::{Context, Result, bail};
use futures_util::StreamExt;
use reqwest::{Client, Response};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Fetches the manifest and assets over plain HTTP GET requests.
pub struct HttpAssetClient {
    manifest_url: String,
    client: Client,
}

impl AssetClient for HttpAssetClient {
    #[instrument(skip_all)]
    async fn fetch_manifest(&self) -> Result<Value> {
        let current_span = tracing::Span::current();
        current_span.pb_set_style(&spinner_style("{msg}")?);
        current_span.pb_set_message("Fetching asset manifest...");

        let response = self
            .client
            .get(&self.manifest_url)
            .send()
            .await
            .context(format!("Could not reach {}", self.manifest_url))?;

        if !response.status().is_success() {
            bail!("Manifest request failed: {}", response.status());
        }

        let document = response
            .json::<Value>()
            .await
            .context("Manifest response is not valid JSON")?;
        Ok(document)
    }

    #[instrument(skip_all)]
    async fn download_asset(&self, entry: &AssetEntry, output_path: &Path) -> Result<()> {
        let current_span = tracing::Span::current();
        current_span.pb_set_style(&progress_bar_style()?);
        current_span.pb_set_message(&format!("Downloading {}...", entry.name));
        current_span.pb_set_finish_message(&format!("Downloading {}... Complete!", entry.name));

        let response = self
            .client
            .get(&entry.url)
            .send()
            .await
            .context(format!("Could not download {}", entry.url))?;

        let status = response.status();
        let download_failed = || InstallError::DownloadFailed {
            status: status.as_u16(),
            url: entry.url.clone(),
        };

        if !status.is_success() {
            return Err(download_failed().into());
        }

        if let Some(length) = response.content_length() {
            current_span.pb_set_length(length);
        }

        // The destination only ever holds complete files
        let partial = partial_path(output_path);
        let result: Result<()> = match write_body(response, &partial).await {
            Ok(0) => Err(download_failed().into()),
            Ok(_) => tokio::fs::rename(&partial, output_path)
                .await
                .context(format!("Failed to move download into place: {:?}", output_path)),
            Err(e) => Err(e),
        };

        if result.is_err() {
            let _ = tokio::fs::remove_file(&partial).await;
        }
        result
    }
}

impl HttpAssetClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("canvacord-assets/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            manifest_url: config.manifest_url.clone(),
            client,
        })
    }
}

/// Streams the response body into `path`, returning the number of bytes written.
async fn write_body(response: Response, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path)
        .await
        .context(format!("Failed to create file: {:?}", path))?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        tracing::Span::current().pb_set_position(downloaded);
    }

    file.flush().await?;
    Ok(downloaded)
}

fn partial_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    output_path.with_file_name(name)
}
