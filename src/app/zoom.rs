// SPDX-License-Identifier: GPL-3.0-only

//! Pinch-to-zoom mapping
//!
//! The gesture does not pass its scale through as a zoom factor. It
//! multiplies the factor captured at gesture start, then maps the product
//! from [`ZOOM_GESTURE_DOMAIN`] linearly onto the device range, clamping at
//! both ends.
//!
//! Every change is published on a `watch` channel. A dedicated task
//! ([`spawn_zoom_applier`]) forwards the latest value to the device, so the
//! zoom path never waits behind the screen's message loop or a capture.

use crate::backends::camera::{CameraBackend, CaptureDevice};
use crate::constants::{ZOOM_GESTURE_DOMAIN, ZoomPreset};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Linear interpolation of `value` from `domain` onto `range`, clamped to `range`
pub fn clamp_interpolate(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let (d0, d1) = domain;
    let (r0, r1) = range;
    if (d1 - d0).abs() < f64::EPSILON {
        return r0;
    }
    let t = ((value - d0) / (d1 - d0)).clamp(0.0, 1.0);
    let mapped = r0 + t * (r1 - r0);
    // Guard against range bounds given in either order
    mapped.clamp(r0.min(r1), r0.max(r1))
}

/// Zoom state owned by the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub current_factor: f64,
    /// Snapshot of `current_factor` at gesture begin; `None` outside a gesture
    pub gesture_origin: Option<f64>,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

/// Maps pinch gestures and preset buttons to the device zoom factor
#[derive(Debug)]
pub struct ZoomController {
    state: ZoomState,
    sender: watch::Sender<f64>,
}

impl ZoomController {
    /// Controller bound to `device`, starting at its neutral zoom
    pub fn new(device: Option<&CaptureDevice>) -> Self {
        let state = bounds_for(device);
        let (sender, _) = watch::channel(state.current_factor);
        Self { state, sender }
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    pub fn current_factor(&self) -> f64 {
        self.state.current_factor
    }

    /// Receiver for the low-latency zoom path
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.sender.subscribe()
    }

    /// Re-bind to a newly resolved device
    ///
    /// Resets to the device's neutral zoom and drops any gesture in progress.
    pub fn rebind(&mut self, device: Option<&CaptureDevice>) {
        self.state = bounds_for(device);
        debug!(
            min = self.state.min_zoom,
            max = self.state.max_zoom,
            factor = self.state.current_factor,
            "Zoom bounds rebound"
        );
        self.publish();
    }

    pub fn on_gesture_begin(&mut self) {
        self.state.gesture_origin = Some(self.state.current_factor);
        trace!(origin = self.state.current_factor, "Pinch began");
    }

    /// Apply a pinch update; `scale` is relative to gesture start
    pub fn on_gesture_update(&mut self, scale: f64) -> f64 {
        let Some(origin) = self.state.gesture_origin else {
            debug!(scale, "Pinch update without a gesture in progress, ignoring");
            return self.state.current_factor;
        };
        if !scale.is_finite() {
            return self.state.current_factor;
        }

        let raw = origin * scale;
        self.state.current_factor = clamp_interpolate(
            raw,
            ZOOM_GESTURE_DOMAIN,
            (self.state.min_zoom, self.state.max_zoom),
        );
        trace!(raw, factor = self.state.current_factor, "Pinch update");
        self.publish();
        self.state.current_factor
    }

    pub fn on_gesture_end(&mut self) {
        self.state.gesture_origin = None;
    }

    /// Set the factor directly, clamped to the device range
    pub fn set_level(&mut self, level: f64) -> f64 {
        if !level.is_finite() {
            return self.state.current_factor;
        }
        self.state.current_factor = level.clamp(self.state.min_zoom, self.state.max_zoom);
        debug!(level, factor = self.state.current_factor, "Zoom level set");
        self.publish();
        self.state.current_factor
    }

    pub fn set_preset(&mut self, preset: ZoomPreset) -> f64 {
        self.set_level(preset.level())
    }

    fn publish(&self) {
        // send_replace never fails, even with no receiver alive
        self.sender.send_replace(self.state.current_factor);
    }
}

/// Zoom bounds for `device`; non-finite limits collapse to a fixed 1x
fn bounds_for(device: Option<&CaptureDevice>) -> ZoomState {
    let (min_zoom, max_zoom, neutral) = match device {
        Some(d) if d.min_zoom.is_finite() && d.max_zoom.is_finite() => {
            let min = d.min_zoom.min(d.max_zoom);
            let max = d.min_zoom.max(d.max_zoom);
            let neutral = if d.neutral_zoom.is_finite() {
                d.neutral_zoom
            } else {
                min
            };
            (min, max, neutral)
        }
        Some(d) => {
            warn!(
                device = %d.id,
                min = d.min_zoom,
                max = d.max_zoom,
                "Device reports unusable zoom bounds, zoom disabled"
            );
            (1.0, 1.0, 1.0)
        }
        None => (1.0, 1.0, 1.0),
    };
    ZoomState {
        current_factor: neutral.clamp(min_zoom, max_zoom),
        gesture_origin: None,
        min_zoom,
        max_zoom,
    }
}

/// Forward zoom changes to the device until the controller is dropped or the
/// task is aborted. Bursts of updates collapse to the latest value.
pub fn spawn_zoom_applier(
    camera: Arc<dyn CameraBackend>,
    mut receiver: watch::Receiver<f64>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        camera.set_zoom(*receiver.borrow_and_update());
        while receiver.changed().await.is_ok() {
            let factor = *receiver.borrow_and_update();
            camera.set_zoom(factor);
        }
        debug!("Zoom applier stopped");
    })
}
