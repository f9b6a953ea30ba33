// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Frame rates the fps picker offers
pub const ALLOWED_FPS: [u32; 2] = [30, 60];

/// Frame rate used until the user picks one
pub const DEFAULT_FPS: u32 = 30;

/// Gesture "raw" domain mapped onto the device zoom range
///
/// `origin * scale` values at or below the lower bound give the device's
/// minimum zoom, values at or above the upper bound give its maximum.
pub const ZOOM_GESTURE_DOMAIN: (f64, f64) = (1.0, 10.0);

/// Quick zoom buttons shown under the preview
pub const ZOOM_PRESETS: [ZoomPreset; 3] = [ZoomPreset::Min, ZoomPreset::Mid, ZoomPreset::Max];

/// Aspect ratio assumed when the surrounding UI has not reported geometry
pub const DEFAULT_SCREEN_ASPECT_RATIO: f64 = 9.0 / 19.5;

/// Storage naming
pub mod storage {
    /// Prefix for stored stills
    pub const PHOTO_PREFIX: &str = "IMG";
    /// Prefix for stored recordings
    pub const VIDEO_PREFIX: &str = "VID";
    /// Extension for stored stills
    pub const PHOTO_EXTENSION: &str = "jpg";
    /// Extension for stored recordings
    pub const VIDEO_EXTENSION: &str = "mov";
    /// Directory name used under the platform data/picture/video dirs
    pub const APP_DIR_NAME: &str = "camera-screen";
}

/// Quick zoom presets
///
/// The labels match the buttons the user sees; the levels are device zoom
/// factors and are clamped into the active device's range when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPreset {
    /// "0x" button, lands on the device minimum after clamping
    Min,
    /// "5x" button
    Mid,
    /// "10x" button
    Max,
}

impl ZoomPreset {
    /// Zoom factor requested by this preset
    pub fn level(&self) -> f64 {
        match self {
            ZoomPreset::Min => 0.0,
            ZoomPreset::Mid => 5.0,
            ZoomPreset::Max => 10.0,
        }
    }

    /// Button label
    pub fn display_name(&self) -> &'static str {
        match self {
            ZoomPreset::Min => "0x",
            ZoomPreset::Mid => "5x",
            ZoomPreset::Max => "10x",
        }
    }
}
