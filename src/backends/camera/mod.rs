// SPDX-License-Identifier: MPL-2.0

//! Camera device collaborator
//!
//! The screen never renders or drives sensor hardware itself. Everything it
//! needs from the camera goes through [`CameraBackend`]:
//!
//! ```text
//! ┌─────────────────────┐
//! │    CameraScreen     │
//! └──────────┬──────────┘
//!            │ Arc<dyn CameraBackend>
//!            ▼
//! ┌─────────────────────┐
//! │ CameraBackend Trait │  ← enumerate, photo, record, zoom
//! └──────────┬──────────┘
//!            │
//!            ▼
//!     ┌────────────┐
//!     │ Simulated  │  ← in-process implementation used by the CLI
//!     └────────────┘
//! ```

pub mod simulated;
pub mod types;

pub use types::*;

use crate::errors::{CaptureError, RecordingError};
use futures::future::BoxFuture;
use std::path::PathBuf;
use tokio::sync::oneshot;

/// Resolves exactly once per recording attempt with the raw file or the error
/// that ended the recording.
pub type RecordingCompletion = oneshot::Receiver<Result<PathBuf, RecordingError>>;

/// Operations the screen consumes from the platform camera
pub trait CameraBackend: Send + Sync {
    // ===== Enumeration =====

    /// Every camera the host exposes
    fn enumerate_devices(&self) -> Vec<CaptureDevice>;

    // ===== Capture: Photo =====

    /// Take a still with the given options
    ///
    /// Suspends until the sensor pipeline hands back a file.
    fn capture_photo(&self, options: PhotoOptions) -> BoxFuture<'_, Result<RawCapture, CaptureError>>;

    // ===== Capture: Video =====

    /// Begin recording
    ///
    /// Returns immediately. The completion receiver resolves later, either
    /// with the finished file or with the error that ended the recording.
    fn start_recording(
        &self,
        options: RecordingOptions,
    ) -> Result<RecordingCompletion, RecordingError>;

    /// Ask the active recording to finish
    ///
    /// The finished file arrives through the completion returned by
    /// [`CameraBackend::start_recording`], not through this call.
    fn stop_recording(&self) -> BoxFuture<'_, Result<(), RecordingError>>;

    // ===== Zoom =====

    /// Apply a zoom factor to the live device. Fire-and-forget.
    fn set_zoom(&self, factor: f64);
}
