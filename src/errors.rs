// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera screen
//!
//! None of these are fatal. Each is absorbed at the component that hits it
//! and surfaced as state (the `Error` capture phase, the `last_error` slot)
//! or as a log event.

use crate::backends::camera::types::{CameraPosition, LensKind};
use std::fmt;
use std::path::PathBuf;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Device resolution errors
    Device(DeviceError),
    /// Photo capture errors
    Capture(CaptureError),
    /// Recording-related errors
    Recording(RecordingError),
    /// Storage/media library errors
    Storage(StorageError),
    /// Configuration errors
    Config(String),
}

/// Device resolution errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// No hardware at the requested position
    DeviceUnavailable {
        position: CameraPosition,
        lens: LensKind,
    },
    /// The resolved device reports no capture formats
    NoFormat(String),
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The camera collaborator rejected or failed the capture
    Failed(String),
    /// No device is resolved, so nothing can be captured
    CameraUnavailable,
}

/// Recording-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingError {
    /// Failed to start recording
    StartFailed(String),
    /// Failed to stop recording
    StopFailed(String),
    /// Recording failed mid-session
    Failed(String),
    /// The collaborator dropped the recording without resolving it
    Interrupted,
}

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Copying the raw artifact into application storage failed
    CopyFailed {
        source: PathBuf,
        destination: PathBuf,
        reason: String,
    },
    /// The media library refused the file
    MediaLibraryFailed { path: PathBuf, reason: String },
    /// A storage directory could not be created or resolved
    DirectoryUnavailable(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Device(e) => write!(f, "Device error: {}", e),
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Recording(e) => write!(f, "Recording error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::DeviceUnavailable { position, lens } => {
                write!(f, "No {} camera available ({} requested)", position, lens)
            }
            DeviceError::NoFormat(device) => write!(f, "Device {} has no formats", device),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Failed(msg) => write!(f, "Capture failed: {}", msg),
            CaptureError::CameraUnavailable => write!(f, "No camera available for capture"),
        }
    }
}

impl fmt::Display for RecordingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingError::StartFailed(msg) => write!(f, "Failed to start recording: {}", msg),
            RecordingError::StopFailed(msg) => write!(f, "Failed to stop recording: {}", msg),
            RecordingError::Failed(msg) => write!(f, "Recording failed: {}", msg),
            RecordingError::Interrupted => write!(f, "Recording ended without a result"),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::CopyFailed {
                source,
                destination,
                reason,
            } => write!(
                f,
                "Failed to copy {} to {}: {}",
                source.display(),
                destination.display(),
                reason
            ),
            StorageError::MediaLibraryFailed { path, reason } => {
                write!(f, "Media library rejected {}: {}", path.display(), reason)
            }
            StorageError::DirectoryUnavailable(msg) => {
                write!(f, "Storage directory unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for DeviceError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for RecordingError {}
impl std::error::Error for StorageError {}

// Conversions from sub-errors to AppError
impl From<DeviceError> for AppError {
    fn from(err: DeviceError) -> Self {
        AppError::Device(err)
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<RecordingError> for AppError {
    fn from(err: RecordingError) -> Self {
        AppError::Recording(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
