// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The `update()` function is a dispatcher; the handling code for each
//! message lives in the `handlers` submodules:
//!
//! - `handlers::camera`: mode, option toggles, camera selection, zoom
//! - `handlers::capture`: shutter, photo capture, video recording
//! - `handlers::ui`: review and fps-picker overlays

use crate::app::CameraScreen;
use crate::app::state::Message;
use tracing::debug;

impl CameraScreen {
    /// Main message handler - routes messages to the handler methods.
    ///
    /// Never blocks: anything that waits on the camera or storage is
    /// spawned and reports back through a later message.
    pub fn update(&mut self, message: Message) {
        if self.torn_down {
            debug!(?message, "Screen torn down, message discarded");
            return;
        }

        match message {
            // ===== Mode & Options =====
            Message::SetMode(mode) => self.handle_set_mode(mode),
            Message::ToggleFlash => self.handle_toggle_flash(),
            Message::ToggleHdr => self.handle_toggle_hdr(),
            Message::ToggleSound => self.handle_toggle_sound(),
            Message::ToggleLens => self.handle_toggle_lens(),
            Message::ScreenGeometryChanged(ratio) => self.handle_screen_geometry_changed(ratio),
            Message::DevicesChanged(devices) => self.handle_devices_changed(devices),

            // ===== Zoom =====
            Message::PinchBegin => self.handle_pinch_begin(),
            Message::PinchUpdate(scale) => self.handle_pinch_update(scale),
            Message::PinchEnd => self.handle_pinch_end(),
            Message::ZoomPreset(preset) => self.handle_zoom_preset(preset),

            // ===== Capture =====
            Message::PressShutter => self.handle_press_shutter(),
            Message::StartPhoto => self.handle_start_photo(),
            Message::StartRecording => self.handle_start_recording(),
            Message::StopRecording => self.handle_stop_recording(),
            Message::PhotoCaptured { generation, result } => {
                self.handle_photo_captured(generation, result)
            }
            Message::RecordingFinished { generation, result } => {
                self.handle_recording_finished(generation, result)
            }
            Message::RecoverFromError(generation) => self.handle_recover_from_error(generation),

            // ===== Overlays =====
            Message::OpenReview => self.handle_open_review(),
            Message::CloseReview => self.handle_close_review(),
            Message::ToggleFpsPicker => self.handle_toggle_fps_picker(),
            Message::CloseFpsPicker => self.handle_close_fps_picker(),
            Message::SelectFps(fps) => self.handle_select_fps(fps),
        }
    }
}
