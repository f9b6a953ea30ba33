// SPDX-License-Identifier: GPL-3.0-only

//! Camera selection, mode, option toggles, and zoom

use crate::app::CameraScreen;
use crate::app::state::CameraMode;
use crate::backends::camera::CaptureDevice;
use crate::constants::ZoomPreset;
use tracing::{debug, info, warn};

impl CameraScreen {
    // =========================================================================
    // Mode & Option Handlers
    // =========================================================================

    pub(crate) fn handle_set_mode(&mut self, mode: CameraMode) {
        self.capture.set_mode(mode, &self.session.phase());
    }

    pub(crate) fn handle_toggle_flash(&mut self) {
        self.capture.toggle_flash(&self.selector.capabilities());
    }

    pub(crate) fn handle_toggle_hdr(&mut self) {
        self.capture.toggle_hdr(&self.selector.capabilities());
    }

    pub(crate) fn handle_toggle_sound(&mut self) {
        self.capture.toggle_sound();
    }

    // =========================================================================
    // Device Selection Handlers
    // =========================================================================

    /// Flip between the back and front cameras
    pub(crate) fn handle_toggle_lens(&mut self) {
        let phase = self.session.phase();
        if phase.is_busy() {
            warn!(?phase, "Cannot switch camera during an active capture");
            return;
        }
        let preference = self.selector.lens_preference().flipped();
        info!(?preference, "Switching camera");
        if self.selector.set_lens_preference(preference) {
            self.on_device_changed();
        }
    }

    pub(crate) fn handle_screen_geometry_changed(&mut self, aspect_ratio: f64) {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            debug!(aspect_ratio, "Ignoring degenerate screen geometry");
            return;
        }
        if self.selector.set_screen_aspect_ratio(aspect_ratio) {
            self.on_device_changed();
        }
    }

    pub(crate) fn handle_devices_changed(&mut self, devices: Vec<CaptureDevice>) {
        info!(count = devices.len(), "Camera list changed");
        if self.selector.set_devices(devices) {
            self.on_device_changed();
        } else {
            // Same device, but its reported limits may have changed
            self.clamp_fps_to_device();
        }
    }

    /// Zoom restarts from the new device's neutral factor and the stored
    /// fps is lowered to what the new device can deliver
    fn on_device_changed(&mut self) {
        match self.selector.selection() {
            Ok(selection) => info!(
                device = %selection.device.name,
                format = %selection.format,
                "Active camera changed"
            ),
            Err(err) => warn!(error = %err, "No usable camera"),
        }
        self.zoom.rebind(self.selector.device());
        self.clamp_fps_to_device();
    }

    fn clamp_fps_to_device(&mut self) {
        let requested = self.capture.options().fps;
        let fps = self
            .capture
            .clamp_fps(self.selector.capabilities().device_max_fps);
        if fps != requested && self.selector.set_target_fps(fps) {
            self.zoom.rebind(self.selector.device());
        }
    }

    // =========================================================================
    // Zoom Handlers
    // =========================================================================

    pub(crate) fn handle_pinch_begin(&mut self) {
        self.zoom.on_gesture_begin();
    }

    pub(crate) fn handle_pinch_update(&mut self, scale: f64) {
        self.zoom.on_gesture_update(scale);
    }

    pub(crate) fn handle_pinch_end(&mut self) {
        self.zoom.on_gesture_end();
    }

    pub(crate) fn handle_zoom_preset(&mut self, preset: ZoomPreset) {
        let factor = self.zoom.set_preset(preset);
        debug!(preset = preset.display_name(), factor, "Zoom preset applied");
    }
}
