//! Artifact download: fetch the CDN URL and write the bytes to disk.
//!
//! The CDN link is pre-signed, so the request carries no API headers. It gets
//! a longer read timeout than API calls because translated PDFs can be large.

use crate::config::ClientConfig;
use crate::error::AnyPdfError;
use std::path::Path;
use tracing::info;

/// Download `url` and write the body verbatim to `output_path`, creating
/// missing parent directories. Returns the number of bytes written.
pub async fn download_to_file(
    config: &ClientConfig,
    url: &str,
    output_path: &Path,
) -> Result<u64, AnyPdfError> {
    info!("Downloading translated file from {}...", url);

    let download_failed = |reason: String| AnyPdfError::DownloadFailed {
        url: url.to_string(),
        reason,
    };
    let map_transport = |e: reqwest::Error| {
        if e.is_timeout() {
            AnyPdfError::DownloadTimeout {
                url: url.to_string(),
                secs: config.download_read_timeout.as_secs(),
            }
        } else {
            download_failed(e.to_string())
        }
    };

    let client = reqwest::Client::builder()
        .connect_timeout(config.download_connect_timeout)
        .read_timeout(config.download_read_timeout)
        .build()
        .map_err(|e| download_failed(e.to_string()))?;

    let response = client.get(url).send().await.map_err(map_transport)?;

    if !response.status().is_success() {
        return Err(download_failed(format!("HTTP {}", response.status())));
    }

    let bytes = response.bytes().await.map_err(map_transport)?;

    let write_failed = |source: std::io::Error| AnyPdfError::OutputWriteFailed {
        path: output_path.to_path_buf(),
        source,
    };
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
    }
    tokio::fs::write(output_path, &bytes)
        .await
        .map_err(write_failed)?;

    info!(
        "Translated PDF successfully downloaded to: {}",
        output_path.display()
    );
    Ok(bytes.len() as u64)
}
