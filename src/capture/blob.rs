//! File-backed blob publication
//!
//! Native analog of object-URL creation: ordered segments are concatenated
//! into a single file under a directory and exposed as a percent-encoded
//! `file://` URL.

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use uuid::Uuid;

use crate::capture::traits::{BlobStore, PublishedBlob};
use crate::utils::error::RecorderError;

/// Blob store writing artifacts into a directory
pub struct FileBlobStore {
    dir: PathBuf,
    // Keeps the backing directory alive for stores created with
    // `in_temp_dir`.
    _temp: Option<tempfile::TempDir>,
}

impl FileBlobStore {
    /// Store artifacts under `dir`, created on first publish
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            _temp: None,
        }
    }

    /// Store artifacts in a fresh temporary directory, removed on drop
    pub fn in_temp_dir() -> Result<Self, RecorderError> {
        let temp = tempfile::tempdir()?;
        Ok(Self {
            dir: temp.path().to_path_buf(),
            _temp: Some(temp),
        })
    }

    /// Directory artifacts are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_url(path: &Path) -> String {
        let mut url = String::from("file://");
        for component in path.iter() {
            let part = component.to_string_lossy();
            if part == "/" {
                continue;
            }
            url.push('/');
            url.push_str(&urlencoding::encode(&part));
        }
        url
    }

    fn extension_for(mime_type: &str) -> &'static str {
        if mime_type.starts_with("video/webm") {
            "webm"
        } else if mime_type.starts_with("video/mp4") {
            "mp4"
        } else {
            "bin"
        }
    }
}

impl BlobStore for FileBlobStore {
    fn publish(&self, segments: &[Bytes], mime_type: &str) -> Result<PublishedBlob, RecorderError> {
        fs::create_dir_all(&self.dir)?;

        let total: usize = segments.iter().map(|segment| segment.len()).sum();
        let mut data = Vec::with_capacity(total);
        for segment in segments {
            data.extend_from_slice(segment);
        }

        let name = format!("blob-{}.{}", Uuid::new_v4(), Self::extension_for(mime_type));
        let path = self.dir.join(name);
        fs::write(&path, &data)?;
        tracing::debug!("Published {} byte artifact to {:?}", data.len(), path);

        Ok(PublishedBlob {
            url: Self::file_url(&path),
            size_bytes: data.len() as u64,
        })
    }
}
