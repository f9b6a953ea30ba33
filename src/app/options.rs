// SPDX-License-Identifier: GPL-3.0-only

//! Capture mode and option toggles

use crate::app::format_picker::Capabilities;
use crate::app::state::{CameraMode, CapturePhase};
use crate::backends::camera::types::{
    FlashMode, PhotoOptions, QualityPrioritization, RecordingOptions,
};
use crate::config::Config;
use crate::constants::{ALLOWED_FPS, DEFAULT_FPS};
use tracing::{debug, info, warn};

/// User-facing capture toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    pub flash: FlashMode,
    pub hdr: bool,
    pub shutter_sound: bool,
    /// Requested fps, already clamped to what the device can deliver
    pub fps: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            flash: FlashMode::Off,
            hdr: false,
            shutter_sound: true,
            fps: DEFAULT_FPS,
        }
    }
}

/// Why an fps request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpsRejection {
    /// Not one of [`ALLOWED_FPS`]
    NotOffered(u32),
}

/// Current mode plus the option toggles
#[derive(Debug, Clone, Default)]
pub struct CaptureModeModel {
    mode: CameraMode,
    options: CaptureOptions,
}

impl CaptureModeModel {
    /// Seed toggles from persisted config
    pub fn from_config(config: &Config) -> Self {
        let fps = if ALLOWED_FPS.contains(&config.fps) {
            config.fps
        } else {
            DEFAULT_FPS
        };
        Self {
            mode: CameraMode::default(),
            options: CaptureOptions {
                flash: config.flash,
                hdr: config.hdr,
                shutter_sound: config.shutter_sound,
                fps,
            },
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn options(&self) -> CaptureOptions {
        self.options
    }

    /// Switch photo/video; refused while a capture or recording is running
    pub fn set_mode(&mut self, mode: CameraMode, phase: &CapturePhase) -> bool {
        if phase.is_busy() {
            warn!(?mode, ?phase, "Cannot switch mode during an active capture");
            return false;
        }
        if self.mode != mode {
            info!(from = ?self.mode, to = ?mode, "Camera mode changed");
            self.mode = mode;
        }
        true
    }

    pub fn toggle_flash(&mut self, caps: &Capabilities) -> bool {
        if !caps.supports_flash {
            debug!("Flash toggle ignored: device has no flash");
            return false;
        }
        self.options.flash = self.options.flash.toggled();
        info!(flash = ?self.options.flash, "Flash toggled");
        true
    }

    pub fn toggle_hdr(&mut self, caps: &Capabilities) -> bool {
        if !caps.supports_hdr {
            debug!("HDR toggle ignored: format has no HDR");
            return false;
        }
        self.options.hdr = !self.options.hdr;
        info!(hdr = self.options.hdr, "HDR toggled");
        true
    }

    pub fn toggle_sound(&mut self) {
        self.options.shutter_sound = !self.options.shutter_sound;
        info!(shutter_sound = self.options.shutter_sound, "Shutter sound toggled");
    }

    /// Request a frame rate
    ///
    /// Only [`ALLOWED_FPS`] values are accepted. A value above what the
    /// device can deliver is clamped down to the device maximum. Returns the
    /// fps actually stored.
    pub fn set_fps(&mut self, fps: u32, device_max_fps: u32) -> Result<u32, FpsRejection> {
        if !ALLOWED_FPS.contains(&fps) {
            warn!(fps, "Rejected fps outside the offered set");
            return Err(FpsRejection::NotOffered(fps));
        }
        let stored = if device_max_fps > 0 {
            fps.min(device_max_fps)
        } else {
            fps
        };
        if stored != fps {
            info!(requested = fps, stored, "Fps clamped to device maximum");
        }
        self.options.fps = stored;
        Ok(stored)
    }

    /// Lower the stored fps to `device_max_fps` after a device change
    ///
    /// Returns the fps now stored. A maximum of 0 means no device, and the
    /// request is kept for when one appears.
    pub fn clamp_fps(&mut self, device_max_fps: u32) -> u32 {
        if device_max_fps > 0 && self.options.fps > device_max_fps {
            info!(from = self.options.fps, to = device_max_fps, "Fps lowered for new device");
            self.options.fps = device_max_fps;
        }
        self.options.fps
    }

    /// Photo options with capability gating applied
    pub fn photo_options(&self, caps: &Capabilities) -> PhotoOptions {
        PhotoOptions {
            flash: if caps.supports_flash {
                self.options.flash
            } else {
                FlashMode::Off
            },
            shutter_sound: self.options.shutter_sound,
            hdr: caps.supports_hdr && self.options.hdr,
            quality_prioritization: QualityPrioritization::Speed,
        }
    }

    /// Recording options with capability gating applied
    pub fn recording_options(&self, caps: &Capabilities) -> RecordingOptions {
        RecordingOptions {
            fps: caps.effective_fps(self.options.fps),
            hdr: caps.supports_video_hdr && self.options.hdr,
            torch: caps.supports_flash && self.options.flash == FlashMode::On,
        }
    }
}
