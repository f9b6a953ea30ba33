// SPDX-License-Identifier: GPL-3.0-only
// Shared types for the camera device collaborator

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which side of the phone a camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CameraPosition {
    /// Rear-facing camera
    #[default]
    Back,
    /// Selfie camera
    Front,
}

impl std::fmt::Display for CameraPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraPosition::Back => write!(f, "back"),
            CameraPosition::Front => write!(f, "front"),
        }
    }
}

/// Physical lens behind a camera device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LensKind {
    UltraWideAngle,
    WideAngle,
    Telephoto,
}

impl std::fmt::Display for LensKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LensKind::UltraWideAngle => write!(f, "ultra-wide-angle"),
            LensKind::WideAngle => write!(f, "wide-angle"),
            LensKind::Telephoto => write!(f, "telephoto"),
        }
    }
}

/// The pair the lens toggle flips between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LensPreference {
    /// Back camera, ultra-wide lens
    #[default]
    Back,
    /// Front camera, wide-angle lens
    Front,
}

impl LensPreference {
    /// Position and lens kind this preference asks for
    pub fn target(self) -> (CameraPosition, LensKind) {
        match self {
            LensPreference::Back => (CameraPosition::Back, LensKind::UltraWideAngle),
            LensPreference::Front => (CameraPosition::Front, LensKind::WideAngle),
        }
    }

    /// The other side
    pub fn flipped(self) -> Self {
        match self {
            LensPreference::Back => LensPreference::Front,
            LensPreference::Front => LensPreference::Back,
        }
    }
}

/// A concrete resolution / fps combination a device can produce
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptureFormat {
    pub width: u32,
    pub height: u32,
    pub min_fps: u32,
    pub max_fps: u32,
    pub supports_photo_hdr: bool,
    pub supports_video_hdr: bool,
}

impl CaptureFormat {
    /// Total pixel count
    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Orientation-independent aspect ratio (always >= 1.0)
    pub fn aspect_ratio(&self) -> f64 {
        let long = self.width.max(self.height) as f64;
        let short = self.width.min(self.height).max(1) as f64;
        long / short
    }
}

impl std::fmt::Display for CaptureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} @ {}fps", self.width, self.height, self.max_fps)
    }
}

/// A physical camera as reported by the device collaborator
///
/// Immutable once resolved; switching lens preference resolves a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureDevice {
    pub id: String,
    pub name: String,
    pub position: CameraPosition,
    pub lens: LensKind,
    pub has_flash: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub neutral_zoom: f64,
    pub formats: Vec<CaptureFormat>,
}

impl CaptureDevice {
    /// Highest fps any of this device's formats can deliver
    pub fn max_supported_fps(&self) -> u32 {
        self.formats.iter().map(|f| f.max_fps).max().unwrap_or(0)
    }
}

/// Flash setting for a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashMode {
    #[default]
    Off,
    On,
}

impl FlashMode {
    /// Off <-> On
    pub fn toggled(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Off,
        }
    }
}

/// What the photo pipeline should optimise for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPrioritization {
    #[default]
    Speed,
}

/// Options handed to the collaborator's photo capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoOptions {
    pub flash: FlashMode,
    pub shutter_sound: bool,
    pub hdr: bool,
    pub quality_prioritization: QualityPrioritization,
}

/// Options handed to the collaborator's recording start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingOptions {
    pub fps: u32,
    pub hdr: bool,
    pub torch: bool,
}

/// Raw file produced by the collaborator, before it is copied into app storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCapture {
    pub path: PathBuf,
}
