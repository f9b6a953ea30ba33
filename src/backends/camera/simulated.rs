// SPDX-License-Identifier: GPL-3.0-only

//! In-process camera used by the CLI
//!
//! Exposes a fixed set of phone-like devices. Photos are real JPEG files
//! rendered from a gradient test pattern (scaled by the current zoom);
//! recordings are placeholder files describing what would have been
//! captured. Everything is written into a scratch directory, which plays
//! the role of the platform camera's temporary output.

use super::{CameraBackend, RecordingCompletion};
use crate::backends::camera::types::{
    CameraPosition, CaptureDevice, CaptureFormat, FlashMode, LensKind, PhotoOptions, RawCapture,
    RecordingOptions,
};
use crate::errors::{CaptureError, RecordingError};
use futures::future::BoxFuture;
use image::{Rgb, RgbImage};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Dimensions of the rendered test pattern
const PATTERN_WIDTH: u32 = 640;
const PATTERN_HEIGHT: u32 = 480;
const PATTERN_JPEG_QUALITY: u8 = 90;

struct ActiveRecording {
    completion: oneshot::Sender<Result<PathBuf, RecordingError>>,
    path: PathBuf,
    options: RecordingOptions,
    started: Instant,
}

/// Simulated phone camera
pub struct SimulatedCamera {
    devices: Vec<CaptureDevice>,
    scratch_dir: PathBuf,
    /// Current zoom factor as f64 bits, written from the zoom path
    zoom_bits: AtomicU64,
    recording: Mutex<Option<ActiveRecording>>,
}

impl SimulatedCamera {
    /// Create a camera with the default device set, writing into `scratch_dir`
    pub fn new(scratch_dir: PathBuf) -> Self {
        Self::with_devices(scratch_dir, default_devices())
    }

    /// Create a camera exposing exactly `devices`
    pub fn with_devices(scratch_dir: PathBuf, devices: Vec<CaptureDevice>) -> Self {
        Self {
            devices,
            scratch_dir,
            zoom_bits: AtomicU64::new(1.0f64.to_bits()),
            recording: Mutex::new(None),
        }
    }

    /// Zoom factor last applied through [`CameraBackend::set_zoom`]
    pub fn zoom(&self) -> f64 {
        f64::from_bits(self.zoom_bits.load(Ordering::Relaxed))
    }

    fn scratch_path(&self, extension: &str) -> PathBuf {
        self.scratch_dir
            .join(format!("{}.{}", uuid::Uuid::new_v4(), extension))
    }
}

impl CameraBackend for SimulatedCamera {
    fn enumerate_devices(&self) -> Vec<CaptureDevice> {
        self.devices.clone()
    }

    fn capture_photo(
        &self,
        options: PhotoOptions,
    ) -> BoxFuture<'_, Result<RawCapture, CaptureError>> {
        let path = self.scratch_path("jpg");
        let zoom = self.zoom();
        let scratch_dir = self.scratch_dir.clone();

        Box::pin(async move {
            debug!(?options, zoom, "Simulated photo capture");

            tokio::fs::create_dir_all(&scratch_dir)
                .await
                .map_err(|e| CaptureError::Failed(format!("scratch dir: {}", e)))?;

            let data = tokio::task::spawn_blocking(move || render_pattern(zoom, options.flash))
                .await
                .map_err(|e| CaptureError::Failed(format!("Render task error: {}", e)))??;

            tokio::fs::write(&path, data)
                .await
                .map_err(|e| CaptureError::Failed(format!("Failed to write photo: {}", e)))?;

            info!(path = %path.display(), "Simulated photo written");
            Ok(RawCapture { path })
        })
    }

    fn start_recording(
        &self,
        options: RecordingOptions,
    ) -> Result<RecordingCompletion, RecordingError> {
        let mut slot = self
            .recording
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if slot.is_some() {
            return Err(RecordingError::StartFailed(
                "a recording is already active".into(),
            ));
        }

        std::fs::create_dir_all(&self.scratch_dir)
            .map_err(|e| RecordingError::StartFailed(format!("scratch dir: {}", e)))?;

        let (tx, rx) = oneshot::channel();
        let path = self.scratch_path("mov");
        info!(path = %path.display(), fps = options.fps, "Simulated recording started");

        *slot = Some(ActiveRecording {
            completion: tx,
            path,
            options,
            started: Instant::now(),
        });
        Ok(rx)
    }

    fn stop_recording(&self) -> BoxFuture<'_, Result<(), RecordingError>> {
        let active = self
            .recording
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        Box::pin(async move {
            let Some(active) = active else {
                return Err(RecordingError::StopFailed("no active recording".into()));
            };

            let elapsed = active.started.elapsed();
            let body = format!(
                "simulated recording\nfps={}\nhdr={}\ntorch={}\nduration_ms={}\n",
                active.options.fps,
                active.options.hdr,
                active.options.torch,
                elapsed.as_millis()
            );

            let result = tokio::fs::write(&active.path, body)
                .await
                .map(|_| active.path.clone())
                .map_err(|e| RecordingError::Failed(format!("Failed to write video: {}", e)));

            if active.completion.send(result).is_err() {
                warn!("Recording completion dropped before the result arrived");
            }
            Ok(())
        })
    }

    fn set_zoom(&self, factor: f64) {
        self.zoom_bits.store(factor.to_bits(), Ordering::Relaxed);
    }
}

/// Render the test pattern, cropped towards the centre by `zoom`
fn render_pattern(zoom: f64, flash: FlashMode) -> Result<Vec<u8>, CaptureError> {
    let zoom = zoom.max(1.0);
    let boost = if flash == FlashMode::On { 40.0 } else { 0.0 };
    let (cx, cy) = (PATTERN_WIDTH as f64 / 2.0, PATTERN_HEIGHT as f64 / 2.0);

    let image = RgbImage::from_fn(PATTERN_WIDTH, PATTERN_HEIGHT, |x, y| {
        let sx = cx + (x as f64 - cx) / zoom;
        let sy = cy + (y as f64 - cy) / zoom;
        let r = (sx / PATTERN_WIDTH as f64 * 215.0 + boost).min(255.0) as u8;
        let g = (sy / PATTERN_HEIGHT as f64 * 215.0 + boost).min(255.0) as u8;
        let b = ((sx + sy) as u32 % 256) as u8;
        Rgb([r, g, b])
    });

    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, PATTERN_JPEG_QUALITY);
    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CaptureError::Failed(format!("JPEG encoding failed: {}", e)))?;

    Ok(buffer)
}

/// Phone-like device set: ultra-wide and wide on the back, wide on the front
pub fn default_devices() -> Vec<CaptureDevice> {
    let format = |width, height, max_fps, photo_hdr, video_hdr| CaptureFormat {
        width,
        height,
        min_fps: 1,
        max_fps,
        supports_photo_hdr: photo_hdr,
        supports_video_hdr: video_hdr,
    };

    vec![
        CaptureDevice {
            id: "back-ultra-wide".into(),
            name: "Back Ultra Wide Camera".into(),
            position: CameraPosition::Back,
            lens: LensKind::UltraWideAngle,
            has_flash: true,
            min_zoom: 1.0,
            max_zoom: 10.0,
            neutral_zoom: 1.0,
            formats: vec![
                format(4032, 3024, 30, true, false),
                format(3840, 2160, 60, false, true),
                format(1920, 1080, 60, true, true),
                format(1280, 720, 120, false, false),
            ],
        },
        CaptureDevice {
            id: "back-wide".into(),
            name: "Back Camera".into(),
            position: CameraPosition::Back,
            lens: LensKind::WideAngle,
            has_flash: true,
            min_zoom: 1.0,
            max_zoom: 16.0,
            neutral_zoom: 1.0,
            formats: vec![
                format(4032, 3024, 30, true, false),
                format(1920, 1080, 60, true, true),
            ],
        },
        CaptureDevice {
            id: "front-wide".into(),
            name: "Front Camera".into(),
            position: CameraPosition::Front,
            lens: LensKind::WideAngle,
            has_flash: false,
            min_zoom: 1.0,
            max_zoom: 4.0,
            neutral_zoom: 1.0,
            formats: vec![
                format(3088, 2316, 30, true, false),
                format(1920, 1080, 30, false, false),
            ],
        },
    ]
}
