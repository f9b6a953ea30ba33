// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for captured photos and videos
//!
//! Raw files handed back by the camera live in a temporary location. They
//! are copied into app-owned storage under a name derived from the capture
//! timestamp, then registered with the media library. A failed
//! registration never undoes the local copy.

use crate::app::state::{Artifact, ArtifactKind, PersistedArtifact};
use crate::constants::storage::{PHOTO_EXTENSION, VIDEO_EXTENSION};
use crate::errors::StorageError;
use chrono::{DateTime, Local};
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Filesystem collaborator
pub trait FileStore: Send + Sync {
    /// Writable directory for stable artifact copies
    fn base_dir(&self) -> &Path;

    fn copy_file(
        &self,
        source: PathBuf,
        destination: PathBuf,
    ) -> BoxFuture<'_, Result<(), StorageError>>;
}

/// Media library collaborator (camera roll / gallery)
pub trait MediaLibrary: Send + Sync {
    fn save(&self, path: PathBuf) -> BoxFuture<'_, Result<(), StorageError>>;
}

/// File name for an artifact captured at `timestamp`
///
/// e.g. `IMG_20260118_093012_451.jpg`, `VID_20260118_093012_451.mov`
pub fn artifact_file_name(kind: ArtifactKind, timestamp: &DateTime<Local>) -> String {
    format!(
        "{}_{}.{}",
        kind.prefix(),
        timestamp.format("%Y%m%d_%H%M%S_%3f"),
        kind.extension()
    )
}

/// Copy a raw capture into app storage and register it with the library
///
/// Storage failures are absorbed: the returned artifact always exists,
/// pointing at the raw file when the copy failed.
pub async fn persist_artifact(
    files: &dyn FileStore,
    library: &dyn MediaLibrary,
    kind: ArtifactKind,
    source: PathBuf,
    timestamp: DateTime<Local>,
) -> PersistedArtifact {
    let destination = files.base_dir().join(artifact_file_name(kind, &timestamp));

    let mut artifact = Artifact {
        kind,
        source_path: source.clone(),
        destination_path: None,
        in_media_library: false,
        timestamp,
    };

    if let Err(err) = files.copy_file(source, destination.clone()).await {
        error!(error = %err, "Failed to copy capture into storage");
        return PersistedArtifact {
            artifact,
            storage_error: Some(err),
        };
    }
    artifact.destination_path = Some(destination.clone());
    debug!(path = %destination.display(), "Capture copied into storage");

    let storage_error = match library.save(destination.clone()).await {
        Ok(()) => {
            artifact.in_media_library = true;
            info!(path = %destination.display(), "Capture saved to media library");
            None
        }
        Err(err) => {
            warn!(error = %err, "Media library registration failed, keeping local copy");
            Some(err)
        }
    };

    PersistedArtifact {
        artifact,
        storage_error,
    }
}

/// `tokio::fs` backed file store rooted at a directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }
}

impl FileStore for LocalStorage {
    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn copy_file(
        &self,
        source: PathBuf,
        destination: PathBuf,
    ) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move { copy_into(&source, &destination).await })
    }
}

/// Media library that files photos and videos into separate gallery folders
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    photos_dir: PathBuf,
    videos_dir: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(photos_dir: PathBuf, videos_dir: PathBuf) -> Self {
        Self {
            photos_dir,
            videos_dir,
        }
    }

    fn folder_for(&self, path: &Path) -> Result<&Path, StorageError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            PHOTO_EXTENSION => Ok(&self.photos_dir),
            VIDEO_EXTENSION => Ok(&self.videos_dir),
            other => Err(StorageError::MediaLibraryFailed {
                path: path.to_path_buf(),
                reason: format!("unsupported media type '{}'", other),
            }),
        }
    }
}

impl MediaLibrary for DirectoryLibrary {
    fn save(&self, path: PathBuf) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            let folder = self.folder_for(&path)?;
            let Some(file_name) = path.file_name() else {
                return Err(StorageError::MediaLibraryFailed {
                    path: path.clone(),
                    reason: "path has no file name".into(),
                });
            };
            let target = folder.join(file_name);
            copy_into(&path, &target)
                .await
                .map_err(|e| StorageError::MediaLibraryFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                })
        })
    }
}

async fn copy_into(source: &Path, destination: &Path) -> Result<(), StorageError> {
    let copy_failed = |reason: String| StorageError::CopyFailed {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        reason,
    };

    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::DirectoryUnavailable(format!("{}: {}", parent.display(), e))
        })?;
    }
    tokio::fs::copy(source, destination)
        .await
        .map_err(|e| copy_failed(e.to_string()))?;
    Ok(())
}
