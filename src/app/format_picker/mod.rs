// SPDX-License-Identifier: GPL-3.0-only

//! Device and format resolution
//!
//! [`DeviceSelector`] turns the lens preference, screen geometry and fps
//! target into one active device and format. Inputs change only through its
//! setters, and every setter re-runs the selection, so the derived
//! [`Capabilities`] can never describe a stale device.

pub mod preferences;

pub use preferences::{resolve_device, select_format};

use crate::backends::camera::types::{CaptureDevice, CaptureFormat, LensPreference};
use crate::errors::DeviceError;
use tracing::{info, warn};

/// Capability flags used to gate UI affordances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub supports_flash: bool,
    /// Photo HDR on the active format
    pub supports_hdr: bool,
    /// Video HDR on the active format
    pub supports_video_hdr: bool,
    /// Any format of the device reaches 60 fps
    pub supports_60_fps: bool,
    /// Highest fps across all of the device's formats
    pub device_max_fps: u32,
    /// Highest fps of the active format
    pub format_max_fps: u32,
}

impl Capabilities {
    fn derive(device: &CaptureDevice, format: &CaptureFormat) -> Self {
        let device_max_fps = device.max_supported_fps();
        Self {
            supports_flash: device.has_flash,
            supports_hdr: format.supports_photo_hdr,
            supports_video_hdr: format.supports_video_hdr,
            supports_60_fps: device_max_fps >= 60,
            device_max_fps,
            format_max_fps: format.max_fps,
        }
    }

    /// Fps the camera will actually run at for a requested value
    pub fn effective_fps(&self, requested: u32) -> u32 {
        if self.format_max_fps == 0 {
            requested
        } else {
            requested.min(self.format_max_fps)
        }
    }
}

/// A resolved device together with its active format
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub device: CaptureDevice,
    pub format: CaptureFormat,
}

impl Selection {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::derive(&self.device, &self.format)
    }
}

/// Resolves the active device and format
#[derive(Debug, Clone)]
pub struct DeviceSelector {
    lens_preference: LensPreference,
    screen_aspect_ratio: f64,
    target_fps: u32,
    devices: Vec<CaptureDevice>,
    selection: Result<Selection, DeviceError>,
}

impl DeviceSelector {
    pub fn new(
        devices: Vec<CaptureDevice>,
        lens_preference: LensPreference,
        screen_aspect_ratio: f64,
        target_fps: u32,
    ) -> Self {
        let selection = compute(&devices, lens_preference, screen_aspect_ratio, target_fps);
        Self {
            lens_preference,
            screen_aspect_ratio,
            target_fps,
            devices,
            selection,
        }
    }

    pub fn lens_preference(&self) -> LensPreference {
        self.lens_preference
    }

    pub fn selection(&self) -> Result<&Selection, &DeviceError> {
        self.selection.as_ref()
    }

    pub fn device(&self) -> Option<&CaptureDevice> {
        self.selection.as_ref().ok().map(|s| &s.device)
    }

    pub fn format(&self) -> Option<&CaptureFormat> {
        self.selection.as_ref().ok().map(|s| &s.format)
    }

    /// Capabilities of the current selection; all false without a device
    pub fn capabilities(&self) -> Capabilities {
        self.selection
            .as_ref()
            .map(Selection::capabilities)
            .unwrap_or_default()
    }

    /// Returns true when the resolved device changed
    pub fn set_lens_preference(&mut self, preference: LensPreference) -> bool {
        self.lens_preference = preference;
        self.recompute()
    }

    pub fn set_screen_aspect_ratio(&mut self, ratio: f64) -> bool {
        self.screen_aspect_ratio = ratio;
        self.recompute()
    }

    pub fn set_target_fps(&mut self, fps: u32) -> bool {
        self.target_fps = fps;
        self.recompute()
    }

    /// Replace the device list (e.g. after a hotplug) and reselect
    pub fn set_devices(&mut self, devices: Vec<CaptureDevice>) -> bool {
        self.devices = devices;
        self.recompute()
    }

    /// Re-run selection; returns true when the resolved device changed
    fn recompute(&mut self) -> bool {
        let previous_id = self.device().map(|d| d.id.clone());
        self.selection = compute(
            &self.devices,
            self.lens_preference,
            self.screen_aspect_ratio,
            self.target_fps,
        );
        let current_id = self.device().map(|d| d.id.clone());
        previous_id != current_id
    }
}

fn compute(
    devices: &[CaptureDevice],
    preference: LensPreference,
    aspect_ratio: f64,
    fps: u32,
) -> Result<Selection, DeviceError> {
    let (position, lens) = preference.target();
    let device = match resolve_device(devices, position, lens) {
        Ok(device) => device,
        Err(err) => {
            warn!(error = %err, "No camera device for current preference");
            return Err(err);
        }
    };

    let format = select_format(&device.formats, fps, aspect_ratio)
        .ok_or_else(|| DeviceError::NoFormat(device.id.clone()))?;

    info!(device = %device.name, format = %format, "Active camera selection");
    Ok(Selection { device, format })
}
