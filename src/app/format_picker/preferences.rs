// SPDX-License-Identifier: GPL-3.0-only

//! Device and format selection policy

use crate::backends::camera::types::{CameraPosition, CaptureDevice, CaptureFormat, LensKind};
use crate::errors::DeviceError;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Pick the device for a position and lens kind
///
/// Devices at the requested position with the requested lens win; another
/// lens at the same position is the fallback. Ties go to the lowest id so
/// the result never depends on enumeration order.
pub fn resolve_device(
    devices: &[CaptureDevice],
    position: CameraPosition,
    lens: LensKind,
) -> Result<CaptureDevice, DeviceError> {
    let device = devices
        .iter()
        .filter(|d| d.position == position)
        .min_by(|a, b| {
            (a.lens != lens)
                .cmp(&(b.lens != lens))
                .then_with(|| a.id.cmp(&b.id))
        })
        .cloned()
        .ok_or(DeviceError::DeviceUnavailable { position, lens })?;

    if device.lens != lens {
        info!(
            requested = %lens,
            using = %device.lens,
            device = %device.id,
            "Requested lens not present, falling back within position"
        );
    } else {
        debug!(device = %device.id, %position, %lens, "Resolved camera device");
    }
    Ok(device)
}

/// Pick the best format for the requested fps and aspect ratio
///
/// Ranking, most significant first:
/// 1. formats reaching `target_fps` beat those that don't; among the latter
///    the one closest below wins
/// 2. closest aspect ratio (orientation-independent)
/// 3. largest resolution
/// 4. least fps surplus over the target
pub fn select_format(
    formats: &[CaptureFormat],
    target_fps: u32,
    target_aspect_ratio: f64,
) -> Option<CaptureFormat> {
    let target_aspect = normalize_aspect(target_aspect_ratio);

    let best = formats
        .iter()
        .min_by(|a, b| compare_formats(a, b, target_fps, target_aspect))
        .cloned()?;

    debug!(
        format = %best,
        target_fps,
        target_aspect,
        "Selected capture format"
    );
    Some(best)
}

fn compare_formats(a: &CaptureFormat, b: &CaptureFormat, fps: u32, aspect: f64) -> Ordering {
    fps_shortfall(a, fps)
        .cmp(&fps_shortfall(b, fps))
        .then_with(|| aspect_distance(a, aspect).total_cmp(&aspect_distance(b, aspect)))
        .then_with(|| b.pixels().cmp(&a.pixels()))
        .then_with(|| a.max_fps.cmp(&b.max_fps))
}

fn fps_shortfall(format: &CaptureFormat, fps: u32) -> u32 {
    fps.saturating_sub(format.max_fps)
}

fn aspect_distance(format: &CaptureFormat, aspect: f64) -> f64 {
    (format.aspect_ratio() - aspect).abs()
}

/// Portrait screens report ratios below 1; formats are compared landscape
fn normalize_aspect(ratio: f64) -> f64 {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 1.0;
    }
    if ratio < 1.0 { 1.0 / ratio } else { ratio }
}
