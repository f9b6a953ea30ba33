// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles the shutter, photo capture, and video recording. Camera and
//! storage calls run in spawned tasks; each posts exactly one completion
//! message tagged with the generation it was started under.

use crate::app::CameraScreen;
use crate::app::state::{ArtifactKind, CameraMode, Generation, Message, PersistedArtifact};
use crate::errors::{AppError, CaptureError, RecordingError};
use crate::storage::persist_artifact;
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

impl CameraScreen {
    // =========================================================================
    // Capture Operations Handlers
    // =========================================================================

    /// Shutter button
    ///
    /// In photo mode it takes a picture, or stops a recording that is still
    /// running. In video mode it toggles recording. A press while finalizing
    /// is ignored.
    pub(crate) fn handle_press_shutter(&mut self) {
        match (self.capture.mode(), self.session.phase()) {
            (_, phase) if phase.is_recording() => self.handle_stop_recording(),
            (CameraMode::Photo, _) => self.handle_start_photo(),
            (CameraMode::Video, _) => self.handle_start_recording(),
        }
    }

    pub(crate) fn handle_start_photo(&mut self) {
        if self.selector.device().is_none() {
            warn!("No camera device, photo not taken");
            self.session.note_error(CaptureError::CameraUnavailable.into());
            return;
        }
        let Some(generation) = self.session.begin_photo() else {
            return;
        };

        let options = self.capture.photo_options(&self.selector.capabilities());
        info!(%generation, flash = ?options.flash, hdr = options.hdr, "Capturing photo...");

        let camera = Arc::clone(&self.collaborators.camera);
        let files = Arc::clone(&self.collaborators.files);
        let library = Arc::clone(&self.collaborators.library);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let result = match camera.capture_photo(options).await {
                Ok(raw) => Ok(persist_artifact(
                    files.as_ref(),
                    library.as_ref(),
                    ArtifactKind::Photo,
                    raw.path,
                    Local::now(),
                )
                .await),
                Err(err) => Err(err),
            };
            if sender
                .send(Message::PhotoCaptured { generation, result })
                .is_err()
            {
                debug!(%generation, "Screen gone before photo completed");
            }
        });
    }

    pub(crate) fn handle_start_recording(&mut self) {
        if self.selector.device().is_none() {
            warn!("No camera device, recording not started");
            self.session
                .note_error(RecordingError::StartFailed("no camera device".into()).into());
            return;
        }
        let Some(generation) = self.session.begin_recording() else {
            return;
        };

        let options = self.capture.recording_options(&self.selector.capabilities());
        let completion = match self.collaborators.camera.start_recording(options) {
            Ok(completion) => completion,
            Err(err) => {
                error!(error = %err, "Failed to start recording");
                self.fail_and_recover(generation, err.into());
                return;
            }
        };
        info!(%generation, fps = options.fps, hdr = options.hdr, torch = options.torch, "Recording started");

        let files = Arc::clone(&self.collaborators.files);
        let library = Arc::clone(&self.collaborators.library);
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let result = match completion.await {
                Ok(Ok(raw)) => Ok(persist_artifact(
                    files.as_ref(),
                    library.as_ref(),
                    ArtifactKind::Video,
                    raw,
                    Local::now(),
                )
                .await),
                Ok(Err(err)) => Err(err),
                // The backend dropped the sender without finishing
                Err(_) => Err(RecordingError::Interrupted),
            };
            if sender
                .send(Message::RecordingFinished { generation, result })
                .is_err()
            {
                debug!(%generation, "Screen gone before recording completed");
            }
        });
    }

    /// Ask the camera to stop; the recording's completion ends the session
    pub(crate) fn handle_stop_recording(&mut self) {
        let Some(generation) = self.session.request_stop() else {
            return;
        };
        info!(%generation, "Stopping recording...");

        let camera = Arc::clone(&self.collaborators.camera);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            if let Err(err) = camera.stop_recording().await {
                error!(error = %err, "Failed to stop recording");
                warn!(%generation, "Camera may still be recording, the next start can fail");
                let _ = sender.send(Message::RecordingFinished {
                    generation,
                    result: Err(err),
                });
            }
        });
    }

    pub(crate) fn handle_photo_captured(
        &mut self,
        generation: Generation,
        result: Result<PersistedArtifact, CaptureError>,
    ) {
        match result {
            Ok(persisted) => {
                let storage_error = persisted.storage_error;
                if self.session.complete_photo(generation, persisted.artifact)
                    && let Some(err) = storage_error
                {
                    self.session.note_error(err.into());
                }
            }
            Err(err) => {
                error!(%generation, error = %err, "Photo capture failed");
                self.fail_and_recover(generation, err.into());
            }
        }
    }

    pub(crate) fn handle_recording_finished(
        &mut self,
        generation: Generation,
        result: Result<PersistedArtifact, RecordingError>,
    ) {
        match result {
            Ok(persisted) => {
                let storage_error = persisted.storage_error;
                if self.session.complete_recording(generation, persisted.artifact)
                    && let Some(err) = storage_error
                {
                    self.session.note_error(err.into());
                }
            }
            Err(err) => {
                error!(%generation, error = %err, "Recording failed");
                self.fail_and_recover(generation, err.into());
            }
        }
    }

    pub(crate) fn handle_recover_from_error(&mut self, generation: Generation) {
        self.session.recover(generation);
    }

    /// Enter `Error` and queue the way back to `Idle`
    fn fail_and_recover(&mut self, generation: Generation, error: AppError) {
        if self.session.fail(generation, error) {
            self.post(Message::RecoverFromError(generation));
        }
    }
}
