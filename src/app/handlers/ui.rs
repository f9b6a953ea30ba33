// SPDX-License-Identifier: GPL-3.0-only

//! Review and fps-picker overlay handlers

use crate::app::CameraScreen;
use tracing::{debug, info};

impl CameraScreen {
    pub(crate) fn handle_open_review(&mut self) {
        self.review.open(self.session.last_artifact());
    }

    pub(crate) fn handle_close_review(&mut self) {
        self.review.close();
    }

    /// The picker is only offered on cameras that can do more than 30 fps
    pub(crate) fn handle_toggle_fps_picker(&mut self) {
        if !self.fps_picker.is_visible() && !self.selector.capabilities().supports_60_fps {
            debug!("Fps picker not opened: camera has a single frame rate");
            return;
        }
        self.fps_picker.toggle();
    }

    pub(crate) fn handle_close_fps_picker(&mut self) {
        self.fps_picker.close();
    }

    /// Apply the picked fps and close the picker in one step
    pub(crate) fn handle_select_fps(&mut self, fps: u32) {
        let device_max_fps = self.selector.capabilities().device_max_fps;
        let Ok(stored) = self.capture.set_fps(fps, device_max_fps) else {
            return;
        };
        if self.selector.set_target_fps(stored) {
            self.zoom.rebind(self.selector.device());
        }
        self.fps_picker.close();
        info!(
            fps = stored,
            format = ?self.selector.format().map(|f| f.to_string()),
            "Frame rate selected"
        );
    }
}
