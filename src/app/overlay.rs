// SPDX-License-Identifier: GPL-3.0-only

//! Review and fps-picker overlays
//!
//! Both overlays only own a visibility flag. The review overlay's content is
//! whatever the session's last artifact is at render time, so it can never
//! outlive the session.

use crate::app::state::Artifact;
use tracing::debug;

/// Full-screen review of the last capture
#[derive(Debug, Clone, Default)]
pub struct ReviewOverlay {
    visible: bool,
}

impl ReviewOverlay {
    /// Opens only when there is something to show
    pub fn open(&mut self, last_artifact: Option<&Artifact>) -> bool {
        if last_artifact.is_none() {
            debug!("Review not opened: nothing captured yet");
            return false;
        }
        self.visible = true;
        true
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Content to render, if open
    pub fn content<'a>(&self, last_artifact: Option<&'a Artifact>) -> Option<&'a Artifact> {
        if self.visible { last_artifact } else { None }
    }
}

/// Frame-rate picker
#[derive(Debug, Clone, Default)]
pub struct FpsPickerOverlay {
    visible: bool,
}

impl FpsPickerOverlay {
    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
