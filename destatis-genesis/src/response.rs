//! Materialization of binary answers into temporary files

use futures::StreamExt;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{GenesisError, Result};
use crate::models::StatusResponse;

/// File name extension for a response content type; unknown types map to `bin`
pub fn extension_for(content_type: &str) -> &'static str {
    match essence(content_type).as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        "text/csv" | "application/csv" => "csv",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => "xlsx",
        "application/vnd.ms-excel" => "xls",
        "application/zip" | "application/x-zip-compressed" => "zip",
        "application/pdf" => "pdf",
        "application/json" => "json",
        "text/plain" => "txt",
        "text/html" => "html",
        _ => "bin",
    }
}

/// Whether a content type announces a JSON document
pub fn is_json(content_type: &str) -> bool {
    let essence = essence(content_type);
    essence == "application/json" || essence.ends_with("+json")
}

fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// A response body stored in a temporary file
///
/// The file is removed when the handle is dropped unless it was moved away
/// with [`DownloadedFile::persist`] or kept with [`DownloadedFile::keep`].
#[derive(Debug)]
pub struct DownloadedFile {
    path: TempPath,
    content_type: String,
    len: u64,
}

impl DownloadedFile {
    /// Stream a response body into a new temporary file
    ///
    /// The file lands in `temp_dir` when given, in the system temp directory
    /// otherwise, and carries the extension matching the content type.
    pub async fn from_response(response: reqwest::Response, temp_dir: Option<&Path>) -> Result<Self> {
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let suffix = format!(".{}", extension_for(&content_type));
        let mut builder = tempfile::Builder::new();
        builder.prefix("genesis-").suffix(&suffix);
        let temp = match temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        let (file, path) = temp.into_parts();

        let mut file = tokio::fs::File::from_std(file);
        let mut stream = response.bytes_stream();
        let mut len = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            len += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(path = %path.display(), %content_type, bytes = len, "stored response body");

        Ok(Self {
            path,
            content_type,
            len,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content type the web service announced
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Extension of the temporary file, without the dot
    pub fn extension(&self) -> &'static str {
        extension_for(&self.content_type)
    }

    /// Size of the stored body in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub async fn read(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(self.path()).await?)
    }

    pub async fn read_to_string(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(self.path()).await?)
    }

    /// Move the file to `destination`, replacing whatever is there
    pub async fn persist(self, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let destination = destination.as_ref().to_path_buf();
        match self.path.persist(&destination) {
            Ok(()) => Ok(destination),
            Err(err) => {
                // rename does not work across file systems; fall back to a copy
                let source: &Path = &err.path;
                tokio::fs::copy(source, &destination).await?;
                Ok(destination)
            }
        }
    }

    /// Keep the file at its temporary location
    pub fn keep(self) -> Result<PathBuf> {
        self.path.keep().map_err(|e| GenesisError::Io(e.error))
    }
}

/// Answer of an endpoint that normally returns a file
///
/// When the database decides to run the request as a background job, or has
/// nothing to render, it answers with a status document instead.
#[derive(Debug)]
pub enum FileResponse {
    File(DownloadedFile),
    Status(StatusResponse),
}

impl FileResponse {
    pub fn is_file(&self) -> bool {
        matches!(self, FileResponse::File(_))
    }

    pub fn file(&self) -> Option<&DownloadedFile> {
        match self {
            FileResponse::File(file) => Some(file),
            FileResponse::Status(_) => None,
        }
    }

    pub fn into_file(self) -> Option<DownloadedFile> {
        match self {
            FileResponse::File(file) => Some(file),
            FileResponse::Status(_) => None,
        }
    }

    pub fn status(&self) -> Option<&StatusResponse> {
        match self {
            FileResponse::File(_) => None,
            FileResponse::Status(status) => Some(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_from_content_types() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("text/csv; charset=UTF-8"), "csv");
        assert_eq!(
            extension_for("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            "xlsx"
        );
        assert_eq!(extension_for("application/zip"), "zip");
        assert_eq!(extension_for("Text/Plain"), "txt");
        assert_eq!(extension_for("application/x-unknown"), "bin");
        assert_eq!(extension_for(""), "bin");
    }

    #[test]
    fn json_detection() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json;charset=UTF-8"));
        assert!(is_json("application/problem+json"));
        assert!(!is_json("text/csv"));
        assert!(!is_json("text/plain"));
    }
}
