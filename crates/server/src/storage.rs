// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Photo storage on the local filesystem.

use std::path::{Path, PathBuf};

use participium_api::{ApiError, PhotoStorage, PhotoUpload, StoredPhoto};
use time::OffsetDateTime;
use tracing::{debug, error, warn};

/// Extensions kept from client file names; anything else is stored as `.bin`.
const KNOWN_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Writes uploads into one directory under collision-free names.
#[derive(Debug, Clone)]
pub struct DiskPhotoStorage {
    directory: PathBuf,
    public_base_url: String,
}

impl DiskPhotoStorage {
    /// Creates `directory` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>, public_base_url: &str) -> std::io::Result<Self> {
        let directory: PathBuf = directory.into();
        std::fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| KNOWN_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or_else(|| String::from("bin"))
}

impl PhotoStorage for DiskPhotoStorage {
    fn store(&self, upload: &PhotoUpload) -> Result<StoredPhoto, ApiError> {
        let timestamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        let filename: String = format!(
            "{timestamp}_{:016x}.{}",
            rand::random::<u64>(),
            extension_of(&upload.original_name)
        );
        let path: PathBuf = self.directory.join(&filename);

        std::fs::write(&path, &upload.bytes).map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to write photo");
            ApiError::Internal {
                message: format!("Failed to store photo: {e}"),
            }
        })?;
        debug!(filename = %filename, bytes = upload.bytes.len(), "Photo stored");

        Ok(StoredPhoto {
            url: format!("{}/{filename}", self.public_base_url),
            filename,
        })
    }

    fn discard(&self, photo: &StoredPhoto) {
        let path: PathBuf = self.directory.join(&photo.filename);
        match std::fs::remove_file(&path) {
            Ok(()) => debug!(filename = %photo.filename, "Photo discarded"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to discard photo"),
        }
    }
}
