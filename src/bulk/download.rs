//! Streaming a bulk operation result file to local storage.

use std::io::{Seek, SeekFrom};

use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use super::errors::BulkOperationError;

/// Downloads the JSONL file at `url` into a new temporary file.
///
/// The body is written chunk by chunk, so memory use does not grow with the
/// export size. The returned file is positioned at offset zero and is
/// deleted when dropped, whether or not it was read successfully.
///
/// The URL is a pre-signed storage URL; pass a client that does not add the
/// shop's access token to requests, such as
/// [`HttpClient::inner`](crate::clients::HttpClient::inner). Nothing is
/// retried here.
///
/// # Errors
///
/// Returns [`BulkOperationError::Download`] for transport failures,
/// [`BulkOperationError::DownloadStatus`] for non-success responses and
/// [`BulkOperationError::Io`] if the temporary file cannot be written.
pub async fn download_to_tempfile(
    client: &reqwest::Client,
    url: &str,
) -> Result<NamedTempFile, BulkOperationError> {
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(BulkOperationError::Download)?;

    let status = response.status();
    if !status.is_success() {
        return Err(BulkOperationError::DownloadStatus {
            code: status.as_u16(),
        });
    }

    let mut temp = tempfile::Builder::new()
        .prefix("bulk-operation-")
        .suffix(".jsonl")
        .tempfile()?;

    let mut file = tokio::fs::File::from_std(temp.reopen()?);
    let mut written: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(BulkOperationError::Download)?
    {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    drop(file);

    temp.as_file_mut().seek(SeekFrom::Start(0))?;

    tracing::debug!(bytes = written, path = %temp.path().display(), "Downloaded bulk result");

    Ok(temp)
}
