// SPDX-License-Identifier: GPL-3.0-only

//! Screen state types and messages

use crate::app::format_picker::Capabilities;
use crate::app::options::CaptureOptions;
use crate::backends::camera::CaptureDevice;
use crate::constants::ZoomPreset;
use crate::errors::{AppError, CaptureError, RecordingError, StorageError};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Photo or video capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Photo,
    Video,
}

/// Capture session phase
///
/// Photo: `Idle → Capturing → Idle`.
/// Video: `Idle → Recording → Finalizing → Idle`.
/// Failures pass through `Error` on their way back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePhase {
    #[default]
    Idle,
    Capturing,
    Recording,
    Finalizing,
    Error,
}

impl CapturePhase {
    /// A photo or recording operation is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            CapturePhase::Capturing | CapturePhase::Recording | CapturePhase::Finalizing
        )
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, CapturePhase::Recording | CapturePhase::Finalizing)
    }
}

/// Tag distinguishing successive capture/recording attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Photo,
    Video,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Photo => crate::constants::storage::PHOTO_EXTENSION,
            ArtifactKind::Video => crate::constants::storage::VIDEO_EXTENSION,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Photo => crate::constants::storage::PHOTO_PREFIX,
            ArtifactKind::Video => crate::constants::storage::VIDEO_PREFIX,
        }
    }
}

/// The most recent capture
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    /// File the camera produced
    pub source_path: PathBuf,
    /// Stable copy in app storage; `None` when the copy failed
    pub destination_path: Option<PathBuf>,
    /// Whether the media library accepted the stable copy
    pub in_media_library: bool,
    pub timestamp: DateTime<Local>,
}

impl Artifact {
    /// Path to show in the thumbnail and review overlay
    ///
    /// Falls back to the camera's file when the stable copy is missing, so
    /// the user can still see what was captured.
    pub fn display_path(&self) -> &Path {
        self.destination_path
            .as_deref()
            .unwrap_or(self.source_path.as_path())
    }
}

/// Outcome of moving a raw capture into storage
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedArtifact {
    pub artifact: Artifact,
    /// Copy or media-library failure that was absorbed along the way
    pub storage_error: Option<StorageError>,
}

/// Everything the screen reacts to
///
/// UI input comes in through [`crate::app::CameraScreen::update`]; the
/// completion variants are posted by background tasks.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Mode & Options =====
    SetMode(CameraMode),
    ToggleFlash,
    ToggleHdr,
    ToggleSound,
    /// Flip between the back ultra-wide and front wide-angle cameras
    ToggleLens,
    /// Screen width / height changed
    ScreenGeometryChanged(f64),
    /// The platform reported a new set of capture devices
    DevicesChanged(Vec<CaptureDevice>),

    // ===== Zoom =====
    PinchBegin,
    PinchUpdate(f64),
    PinchEnd,
    ZoomPreset(ZoomPreset),

    // ===== Capture =====
    /// The big round button; meaning depends on mode and phase
    PressShutter,
    StartPhoto,
    StartRecording,
    StopRecording,
    PhotoCaptured {
        generation: Generation,
        result: Result<PersistedArtifact, CaptureError>,
    },
    RecordingFinished {
        generation: Generation,
        result: Result<PersistedArtifact, RecordingError>,
    },
    /// Leave the `Error` phase
    RecoverFromError(Generation),

    // ===== Overlays =====
    OpenReview,
    CloseReview,
    ToggleFpsPicker,
    CloseFpsPicker,
    /// Pick an fps in the picker; applies it and closes the picker
    SelectFps(u32),
}

/// Plain-data view of the screen for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSnapshot {
    pub mounted: bool,
    pub mode: CameraMode,
    pub phase: CapturePhase,
    pub zoom_factor: f64,
    pub options: CaptureOptions,
    pub capabilities: Capabilities,
    /// `None` renders the "no device" fallback
    pub device_name: Option<String>,
    pub format_label: Option<String>,
    pub review_visible: bool,
    pub fps_picker_visible: bool,
    pub thumbnail: Option<PathBuf>,
    pub last_error: Option<AppError>,
}
