//! On-disk archive layout and artifact writing
//!
//! A run writes into a dated root directory, `WebCrawlerData_<YYYYMMDD>`,
//! containing `texts/` (one file per fetched page) and `images/` (one file
//! per downloaded image). The root is created on startup and reused if a run
//! already produced it the same day.
//!
//! Artifact names derive deterministically from the source URL: a truncated
//! SHA-256 fingerprint plus an extension, with a `_N` suffix loop so that
//! distinct inputs can never overwrite each other.

use chrono::Local;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Image extensions accepted straight from the URL path
const IMAGE_EXTS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".svg"];

/// Storage-specific errors
///
/// These are per-artifact failures; the orchestrator counts them and keeps
/// going. Only the initial directory creation is fatal.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes extracted text and downloaded images under the run's output root
#[derive(Debug)]
pub struct StorageWriter {
    root: PathBuf,
    texts_dir: PathBuf,
    images_dir: PathBuf,
}

impl StorageWriter {
    /// Creates the dated output root under `parent` and its subdirectories
    ///
    /// # Arguments
    ///
    /// * `parent` - Directory under which `WebCrawlerData_<YYYYMMDD>` is
    ///   created (or reused if it already exists)
    ///
    /// # Returns
    ///
    /// * `Ok(StorageWriter)` - The archive directories exist and are writable
    /// * `Err(StorageError)` - Directory creation failed; the run must abort
    pub fn create(parent: &Path) -> Result<Self, StorageError> {
        let date = Local::now().format("%Y%m%d");
        let root = parent.join(format!("WebCrawlerData_{}", date));
        let texts_dir = root.join("texts");
        let images_dir = root.join("images");

        for dir in [&texts_dir, &images_dir] {
            fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(Self {
            root,
            texts_dir,
            images_dir,
        })
    }

    /// The run's output root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persists the extracted text of one page
    ///
    /// The file starts with a metadata header (source URL, depth, fetch
    /// timestamp) followed by a separator rule and the payload.
    pub fn write_text(&self, source_url: &Url, depth: u32, text: &str) -> Result<PathBuf, StorageError> {
        let stem = url_fingerprint(source_url);
        let path = self.unique_path(&self.texts_dir, &stem, ".txt");

        let mut contents = format!(
            "URL: {}\nDepth: {}\nFetched: {}\n{}\n\n",
            source_url,
            depth,
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(50)
        );
        contents.push_str(text);
        contents.push('\n');

        fs::write(&path, contents).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Persists one downloaded image
    ///
    /// The extension comes from the URL path when it is a known image
    /// extension, otherwise from the Content-Type, defaulting to `.jpg`.
    pub fn write_image(
        &self,
        image_url: &Url,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<PathBuf, StorageError> {
        let stem = url_fingerprint(image_url);
        let ext = image_extension(image_url, content_type);
        let path = self.unique_path(&self.images_dir, &stem, ext);

        fs::write(&path, bytes).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Picks a path under `dir` that does not exist yet
    ///
    /// Fingerprints of distinct URLs collide only if SHA-256 prefixes do, but
    /// the suffix loop keeps even that case from overwriting anything.
    fn unique_path(&self, dir: &Path, stem: &str, ext: &str) -> PathBuf {
        let candidate = dir.join(format!("{}{}", stem, ext));
        if !candidate.exists() {
            return candidate;
        }

        let mut n = 1u32;
        loop {
            let candidate = dir.join(format!("{}_{}{}", stem, n, ext));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Deterministic file-name stem for a URL
fn url_fingerprint(url: &Url) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_str().as_bytes());
    hex::encode(hasher.finalize())[..16].to_string()
}

/// Chooses a file extension for an image from its URL path or Content-Type
fn image_extension(url: &Url, content_type: &str) -> &'static str {
    let path = url.path().to_ascii_lowercase();
    for ext in IMAGE_EXTS {
        if path.ends_with(ext) {
            return ext;
        }
    }

    if content_type.contains("jpeg") {
        ".jpg"
    } else if content_type.contains("png") {
        ".png"
    } else if content_type.contains("gif") {
        ".gif"
    } else if content_type.contains("webp") {
        ".webp"
    } else if content_type.contains("bmp") {
        ".bmp"
    } else if content_type.contains("svg") {
        ".svg"
    } else {
        ".jpg"
    }
}
