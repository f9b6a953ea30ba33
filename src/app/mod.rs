// SPDX-License-Identifier: GPL-3.0-only

//! The camera screen
//!
//! [`CameraScreen`] is the explicit per-screen state: created when the
//! screen mounts, torn down when the user navigates away. UI input is fed
//! synchronously through [`CameraScreen::update`]; camera and storage work
//! runs in spawned tasks that post their results back as [`Message`]s,
//! which the owner drains with [`CameraScreen::handle_next`]. One consumer
//! applies every message, so the screen state is only ever touched from a
//! single logical thread.

pub mod format_picker;
mod handlers;
pub mod options;
pub mod overlay;
pub mod session;
pub mod state;
mod update;
pub mod zoom;

pub use format_picker::{Capabilities, DeviceSelector, Selection};
pub use options::{CaptureModeModel, CaptureOptions};
pub use overlay::{FpsPickerOverlay, ReviewOverlay};
pub use session::CaptureSessionMachine;
pub use state::{
    Artifact, ArtifactKind, CameraMode, CapturePhase, Generation, Message, ScreenSnapshot,
};
pub use zoom::{ZoomController, ZoomState};

use crate::backends::camera::{CameraBackend, CaptureDevice, CaptureFormat};
use crate::config::Config;
use crate::constants::DEFAULT_SCREEN_ASPECT_RATIO;
use crate::errors::DeviceError;
use crate::storage::{FileStore, MediaLibrary};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Collaborators the screen drives
#[derive(Clone)]
pub struct Collaborators {
    pub camera: Arc<dyn CameraBackend>,
    pub files: Arc<dyn FileStore>,
    pub library: Arc<dyn MediaLibrary>,
}

/// State and logic of one camera screen instance
pub struct CameraScreen {
    collaborators: Collaborators,
    /// Device and format resolution
    selector: DeviceSelector,
    /// Mode and option toggles
    capture: CaptureModeModel,
    zoom: ZoomController,
    session: CaptureSessionMachine,
    review: ReviewOverlay,
    fps_picker: FpsPickerOverlay,
    mounted: bool,
    torn_down: bool,
    zoom_applier: Option<JoinHandle<()>>,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
}

impl CameraScreen {
    /// Build the screen state from the collaborators and saved settings
    pub fn new(collaborators: Collaborators, config: &Config) -> Self {
        let capture = CaptureModeModel::from_config(config);
        let selector = DeviceSelector::new(
            collaborators.camera.enumerate_devices(),
            config.lens_preference,
            DEFAULT_SCREEN_ASPECT_RATIO,
            capture.options().fps,
        );
        let zoom = ZoomController::new(selector.device());
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            collaborators,
            selector,
            capture,
            zoom,
            session: CaptureSessionMachine::new(),
            review: ReviewOverlay::default(),
            fps_picker: FpsPickerOverlay::default(),
            mounted: false,
            torn_down: false,
            zoom_applier: None,
            sender,
            receiver,
        }
    }

    /// Activate the screen and start the zoom path
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self) {
        if self.torn_down {
            warn!("Screen already torn down, create a new one instead");
            return;
        }
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.zoom_applier = Some(zoom::spawn_zoom_applier(
            Arc::clone(&self.collaborators.camera),
            self.zoom.subscribe(),
        ));
        info!(device = ?self.selector.device().map(|d| &d.name), "Camera screen mounted");
    }

    /// Navigate away
    ///
    /// Captures already in flight keep running in the background, but
    /// nothing they report will reach this screen any more.
    pub fn unmount(&mut self) {
        if self.torn_down {
            return;
        }
        self.mounted = false;
        self.torn_down = true;
        self.session.clear_artifact();
        self.review.close();
        self.fps_picker.close();
        if let Some(handle) = self.zoom_applier.take() {
            handle.abort();
        }
        info!(phase = ?self.session.phase(), "Camera screen torn down");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Sender for posting messages from other event sources
    pub fn sender(&self) -> mpsc::UnboundedSender<Message> {
        self.sender.clone()
    }

    /// Wait for the next posted message and apply it
    ///
    /// Returns false only if the channel is closed.
    pub async fn handle_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(message) => {
                self.update(message);
                true
            }
            None => false,
        }
    }

    /// Apply messages until no capture or recording is in flight
    pub async fn settle(&mut self) {
        while self.session.phase() != CapturePhase::Idle && !self.torn_down {
            if !self.handle_next().await {
                break;
            }
        }
    }

    // ===== Read access for rendering =====

    pub fn phase(&self) -> CapturePhase {
        self.session.phase()
    }

    pub fn mode(&self) -> CameraMode {
        self.capture.mode()
    }

    pub fn options(&self) -> CaptureOptions {
        self.capture.options()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.selector.capabilities()
    }

    pub fn zoom_state(&self) -> ZoomState {
        self.zoom.state()
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom.current_factor()
    }

    pub fn device(&self) -> Option<&CaptureDevice> {
        self.selector.device()
    }

    pub fn format(&self) -> Option<&CaptureFormat> {
        self.selector.format()
    }

    /// Why no device is shown, if none is
    pub fn device_error(&self) -> Option<&DeviceError> {
        self.selector.selection().err()
    }

    pub fn last_artifact(&self) -> Option<&Artifact> {
        self.session.last_artifact()
    }

    pub fn review_content(&self) -> Option<&Artifact> {
        self.review.content(self.session.last_artifact())
    }

    pub fn is_review_visible(&self) -> bool {
        self.review.is_visible()
    }

    pub fn is_fps_picker_visible(&self) -> bool {
        self.fps_picker.is_visible()
    }

    pub fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot {
            mounted: self.mounted,
            mode: self.capture.mode(),
            phase: self.session.phase(),
            zoom_factor: self.zoom.current_factor(),
            options: self.capture.options(),
            capabilities: self.selector.capabilities(),
            device_name: self.selector.device().map(|d| d.name.clone()),
            format_label: self.selector.format().map(|f| f.to_string()),
            review_visible: self.review.is_visible(),
            fps_picker_visible: self.fps_picker.is_visible(),
            thumbnail: self
                .session
                .last_artifact()
                .map(|a| a.display_path().to_path_buf()),
            last_error: self.session.last_error().cloned(),
        }
    }

    /// Current toggles folded back into `base` for saving
    pub fn to_config(&self, base: &Config) -> Config {
        let options = self.capture.options();
        Config {
            lens_preference: self.selector.lens_preference(),
            fps: options.fps,
            shutter_sound: options.shutter_sound,
            flash: options.flash,
            hdr: options.hdr,
            ..base.clone()
        }
    }

    fn post(&self, message: Message) {
        if self.sender.send(message).is_err() {
            debug!("Screen receiver gone, message dropped");
        }
    }
}

impl Drop for CameraScreen {
    fn drop(&mut self) {
        if let Some(handle) = self.zoom_applier.take() {
            handle.abort();
        }
    }
}
