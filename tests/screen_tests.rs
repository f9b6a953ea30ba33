// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests driving the camera screen through its messages

use camera_screen::app::state::{ArtifactKind, CameraMode};
use camera_screen::backends::camera::{
    CameraBackend, CameraPosition, CaptureDevice, CaptureFormat, FlashMode, LensKind,
    LensPreference, PhotoOptions, RawCapture, RecordingCompletion, RecordingOptions,
};
use camera_screen::errors::{AppError, CaptureError, DeviceError, RecordingError, StorageError};
use camera_screen::storage::{DirectoryLibrary, LocalStorage};
use camera_screen::{CameraScreen, CapturePhase, Collaborators, Config, Message, ZoomPreset};
use futures::future::BoxFuture;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

// ===== Scripted camera =====

#[derive(Default)]
struct Calls {
    photos: AtomicUsize,
    starts: AtomicUsize,
    stops: AtomicUsize,
    zoom: Mutex<Vec<f64>>,
    last_photo: Mutex<Option<PhotoOptions>>,
    last_recording: Mutex<Option<RecordingOptions>>,
}

struct ScriptedCamera {
    devices: Vec<CaptureDevice>,
    photo: Result<PathBuf, CaptureError>,
    video: PathBuf,
    /// Drop the recording's completion on stop instead of resolving it
    abandon_on_stop: bool,
    /// Reject stop requests and leave the recording running
    fail_stop: bool,
    pending: Mutex<Option<oneshot::Sender<Result<PathBuf, RecordingError>>>>,
    calls: Calls,
}

impl CameraBackend for ScriptedCamera {
    fn enumerate_devices(&self) -> Vec<CaptureDevice> {
        self.devices.clone()
    }

    fn capture_photo(
        &self,
        options: PhotoOptions,
    ) -> BoxFuture<'_, Result<RawCapture, CaptureError>> {
        self.calls.photos.fetch_add(1, Ordering::SeqCst);
        *self.calls.last_photo.lock().unwrap() = Some(options);
        let result = self.photo.clone().map(|path| RawCapture { path });
        Box::pin(async move { result })
    }

    fn start_recording(
        &self,
        options: RecordingOptions,
    ) -> Result<RecordingCompletion, RecordingError> {
        self.calls.starts.fetch_add(1, Ordering::SeqCst);
        *self.calls.last_recording.lock().unwrap() = Some(options);
        let (sender, receiver) = oneshot::channel();
        *self.pending.lock().unwrap() = Some(sender);
        Ok(receiver)
    }

    fn stop_recording(&self) -> BoxFuture<'_, Result<(), RecordingError>> {
        self.calls.stops.fetch_add(1, Ordering::SeqCst);
        if self.fail_stop {
            return Box::pin(async { Err(RecordingError::StopFailed("encoder stuck".into())) });
        }
        let sender = self.pending.lock().unwrap().take();
        Box::pin(async move {
            match sender {
                Some(sender) if !self.abandon_on_stop => {
                    let _ = sender.send(Ok(self.video.clone()));
                    Ok(())
                }
                Some(_) => Ok(()),
                None => Err(RecordingError::StopFailed("no active recording".into())),
            }
        })
    }

    fn set_zoom(&self, factor: f64) {
        self.calls.zoom.lock().unwrap().push(factor);
    }
}

// ===== Fixtures =====

fn format(width: u32, height: u32, max_fps: u32, hdr: bool) -> CaptureFormat {
    CaptureFormat {
        width,
        height,
        min_fps: 1,
        max_fps,
        supports_photo_hdr: hdr,
        supports_video_hdr: hdr,
    }
}

fn device(id: &str, position: CameraPosition, lens: LensKind, flash: bool) -> CaptureDevice {
    CaptureDevice {
        id: id.into(),
        name: id.into(),
        position,
        lens,
        has_flash: flash,
        min_zoom: 1.0,
        max_zoom: 10.0,
        neutral_zoom: 1.0,
        formats: vec![format(1920, 1080, 60, true), format(4032, 3024, 30, true)],
    }
}

fn phone_devices() -> Vec<CaptureDevice> {
    let mut front = device("front", CameraPosition::Front, LensKind::WideAngle, false);
    front.max_zoom = 4.0;
    front.formats = vec![format(1920, 1080, 30, false)];
    vec![
        device("back-uw", CameraPosition::Back, LensKind::UltraWideAngle, true),
        front,
    ]
}

struct Harness {
    screen: CameraScreen,
    camera: Arc<ScriptedCamera>,
    root: PathBuf,
}

fn scratch() -> PathBuf {
    let root = std::env::temp_dir().join(format!("camera-screen-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&root).unwrap();
    root
}

fn harness_with(devices: Vec<CaptureDevice>, configure: impl FnOnce(&mut ScriptedCamera)) -> Harness {
    let root = scratch();
    let photo = root.join("photo1.jpg");
    let video = root.join("clip.mov");
    std::fs::write(&photo, b"jpeg").unwrap();
    std::fs::write(&video, b"mov").unwrap();

    let mut camera = ScriptedCamera {
        devices,
        photo: Ok(photo),
        video,
        abandon_on_stop: false,
        fail_stop: false,
        pending: Mutex::new(None),
        calls: Calls::default(),
    };
    configure(&mut camera);
    let camera = Arc::new(camera);

    let collaborators = Collaborators {
        camera: camera.clone(),
        files: Arc::new(LocalStorage::new(root.join("store"))),
        library: Arc::new(DirectoryLibrary::new(root.join("photos"), root.join("videos"))),
    };
    let mut screen = CameraScreen::new(collaborators, &Config::default());
    screen.mount();

    Harness {
        screen,
        camera,
        root,
    }
}

fn harness() -> Harness {
    harness_with(phone_devices(), |_| {})
}

async fn settle(screen: &mut CameraScreen) {
    tokio::time::timeout(SETTLE_TIMEOUT, screen.settle())
        .await
        .expect("screen settled");
}

// ===== Photo =====

#[tokio::test]
async fn test_photo_capture_stores_artifact() {
    let Harness {
        mut screen,
        camera,
        root,
    } = harness();

    assert_eq!(screen.phase(), CapturePhase::Idle);
    screen.update(Message::PressShutter);
    assert_eq!(screen.phase(), CapturePhase::Capturing);

    settle(&mut screen).await;

    assert_eq!(screen.phase(), CapturePhase::Idle);
    assert_eq!(camera.calls.photos.load(Ordering::SeqCst), 1);
    let artifact = screen.last_artifact().expect("photo stored");
    assert_eq!(artifact.kind, ArtifactKind::Photo);
    assert_eq!(artifact.source_path, root.join("photo1.jpg"));
    let stored = artifact.destination_path.as_ref().expect("copied");
    assert!(stored.starts_with(root.join("store")));
    let name = stored.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("IMG_") && name.ends_with(".jpg"), "{name}");
    assert!(artifact.in_media_library);
    assert!(screen.snapshot().last_error.is_none());
}

#[tokio::test]
async fn test_photo_options_follow_toggles_and_capabilities() {
    let Harness {
        mut screen, camera, ..
    } = harness();

    screen.update(Message::ToggleFlash);
    screen.update(Message::ToggleHdr);
    screen.update(Message::ToggleSound);
    screen.update(Message::StartPhoto);
    settle(&mut screen).await;

    let options = camera.calls.last_photo.lock().unwrap().expect("photo taken");
    assert_eq!(options.flash, FlashMode::On);
    assert!(options.hdr);
    assert!(!options.shutter_sound);
}

#[tokio::test]
async fn test_flash_toggle_ignored_without_flash() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::ToggleLens);
    assert_eq!(screen.device().map(|d| d.id.as_str()), Some("front"));
    screen.update(Message::ToggleFlash);
    assert_eq!(screen.options().flash, FlashMode::Off);
    assert!(!screen.capabilities().supports_flash);
}

#[tokio::test]
async fn test_mode_switch_rejected_while_capturing() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::StartPhoto);
    screen.update(Message::SetMode(CameraMode::Video));
    assert_eq!(screen.mode(), CameraMode::Photo);

    settle(&mut screen).await;
    screen.update(Message::SetMode(CameraMode::Video));
    assert_eq!(screen.mode(), CameraMode::Video);
}

#[tokio::test]
async fn test_second_photo_rejected_while_capturing() {
    let Harness {
        mut screen, camera, ..
    } = harness();

    screen.update(Message::StartPhoto);
    screen.update(Message::StartPhoto);
    screen.update(Message::StartRecording);
    settle(&mut screen).await;

    assert_eq!(camera.calls.photos.load(Ordering::SeqCst), 1);
    assert_eq!(camera.calls.starts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_capture_failure_goes_through_error_to_idle() {
    let Harness { mut screen, .. } = harness_with(phone_devices(), |camera| {
        camera.photo = Err(CaptureError::Failed("sensor busy".into()));
    });

    screen.update(Message::PressShutter);
    assert!(screen.handle_next().await);
    assert_eq!(screen.phase(), CapturePhase::Error);

    settle(&mut screen).await;
    assert_eq!(screen.phase(), CapturePhase::Idle);
    assert!(screen.last_artifact().is_none());
    assert!(matches!(
        screen.snapshot().last_error,
        Some(AppError::Capture(CaptureError::Failed(_)))
    ));
}

#[tokio::test]
async fn test_copy_failure_keeps_raw_file_visible() {
    let Harness { mut screen, .. } = harness_with(phone_devices(), |camera| {
        camera.photo = Ok(PathBuf::from("/nonexistent/camera-screen/raw.jpg"));
    });

    screen.update(Message::PressShutter);
    settle(&mut screen).await;

    let artifact = screen.last_artifact().expect("artifact kept");
    assert!(artifact.destination_path.is_none());
    assert!(!artifact.in_media_library);
    assert_eq!(
        artifact.display_path(),
        PathBuf::from("/nonexistent/camera-screen/raw.jpg").as_path()
    );
    assert!(matches!(
        screen.snapshot().last_error,
        Some(AppError::Storage(StorageError::CopyFailed { .. }))
    ));
}

// ===== Video =====

#[tokio::test]
async fn test_recording_start_is_idempotent() {
    let Harness {
        mut screen, camera, ..
    } = harness();

    screen.update(Message::SetMode(CameraMode::Video));
    screen.update(Message::StartRecording);
    screen.update(Message::StartRecording);

    assert_eq!(screen.phase(), CapturePhase::Recording);
    assert_eq!(camera.calls.starts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_recording_round_trip_via_shutter() {
    let Harness {
        mut screen, camera, ..
    } = harness();

    screen.update(Message::SetMode(CameraMode::Video));
    screen.update(Message::PressShutter);
    assert_eq!(screen.phase(), CapturePhase::Recording);

    screen.update(Message::PressShutter);
    assert_eq!(screen.phase(), CapturePhase::Finalizing);
    settle(&mut screen).await;

    assert_eq!(camera.calls.stops.load(Ordering::SeqCst), 1);
    let artifact = screen.last_artifact().expect("video stored");
    assert_eq!(artifact.kind, ArtifactKind::Video);
    let name = artifact
        .destination_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .expect("copied");
    assert!(name.starts_with("VID_") && name.ends_with(".mov"), "{name}");
}

#[tokio::test]
async fn test_shutter_stops_recording_after_rejected_mode_switch() {
    let Harness {
        mut screen, camera, ..
    } = harness();

    screen.update(Message::SetMode(CameraMode::Video));
    screen.update(Message::StartRecording);
    // Mode is locked while recording, so the shutter must still stop it
    screen.update(Message::SetMode(CameraMode::Photo));
    assert_eq!(screen.mode(), CameraMode::Video);
    screen.update(Message::PressShutter);
    settle(&mut screen).await;

    assert_eq!(camera.calls.photos.load(Ordering::SeqCst), 0);
    assert_eq!(
        screen.last_artifact().map(|a| a.kind),
        Some(ArtifactKind::Video)
    );
}

#[tokio::test]
async fn test_new_photo_replaces_video_artifact() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::StartRecording);
    screen.update(Message::StopRecording);
    settle(&mut screen).await;
    assert_eq!(
        screen.last_artifact().map(|a| a.kind),
        Some(ArtifactKind::Video)
    );

    screen.update(Message::StartPhoto);
    settle(&mut screen).await;
    assert_eq!(
        screen.last_artifact().map(|a| a.kind),
        Some(ArtifactKind::Photo)
    );
}

#[tokio::test]
async fn test_abandoned_recording_is_interrupted() {
    let Harness { mut screen, .. } = harness_with(phone_devices(), |camera| {
        camera.abandon_on_stop = true;
    });

    screen.update(Message::StartRecording);
    screen.update(Message::StopRecording);
    settle(&mut screen).await;

    assert_eq!(screen.phase(), CapturePhase::Idle);
    assert!(screen.last_artifact().is_none());
    assert!(matches!(
        screen.snapshot().last_error,
        Some(AppError::Recording(RecordingError::Interrupted))
    ));
}

#[tokio::test]
async fn test_failed_stop_returns_to_idle_without_artifact() {
    let Harness {
        mut screen, camera, ..
    } = harness_with(phone_devices(), |camera| {
        camera.fail_stop = true;
    });

    screen.update(Message::StartRecording);
    screen.update(Message::StopRecording);
    assert_eq!(screen.phase(), CapturePhase::Finalizing);
    settle(&mut screen).await;

    assert_eq!(camera.calls.stops.load(Ordering::SeqCst), 1);
    assert_eq!(screen.phase(), CapturePhase::Idle);
    assert!(screen.last_artifact().is_none());
    assert!(matches!(
        screen.snapshot().last_error,
        Some(AppError::Recording(RecordingError::StopFailed(_)))
    ));
}

#[tokio::test]
async fn test_recording_options_use_selected_fps() {
    let Harness {
        mut screen, camera, ..
    } = harness();

    screen.update(Message::SelectFps(60));
    screen.update(Message::StartRecording);

    let options = camera.calls.last_recording.lock().unwrap().expect("started");
    assert_eq!(options.fps, 60);
    assert!(!options.torch);
}

// ===== Zoom =====

#[tokio::test]
async fn test_pinch_reaches_camera() {
    let Harness {
        mut screen, camera, ..
    } = harness();

    screen.update(Message::PinchBegin);
    screen.update(Message::PinchUpdate(5.0));
    screen.update(Message::PinchEnd);
    assert!((screen.zoom_factor() - 5.0).abs() < 1e-9);

    tokio::time::timeout(SETTLE_TIMEOUT, async {
        loop {
            if camera.calls.zoom.lock().unwrap().last() == Some(&5.0) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("zoom applied");
}

#[tokio::test]
async fn test_zoom_stays_in_device_range() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::ZoomPreset(ZoomPreset::Max));
    assert_eq!(screen.zoom_factor(), 10.0);
    screen.update(Message::ZoomPreset(ZoomPreset::Min));
    assert_eq!(screen.zoom_factor(), 1.0);

    for scale in [0.01, 0.5, 3.0, 50.0, f64::NAN] {
        screen.update(Message::PinchBegin);
        screen.update(Message::PinchUpdate(scale));
        let state = screen.zoom_state();
        assert!(state.current_factor >= state.min_zoom);
        assert!(state.current_factor <= state.max_zoom);
    }
}

#[tokio::test]
async fn test_lens_switch_resets_zoom_to_new_range() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::ZoomPreset(ZoomPreset::Max));
    screen.update(Message::ToggleLens);

    let state = screen.zoom_state();
    assert_eq!(state.max_zoom, 4.0);
    assert_eq!(state.current_factor, 1.0);
}

// ===== Device selection =====

#[tokio::test]
async fn test_missing_front_camera_reports_unavailable() {
    let back_only = vec![device(
        "back-uw",
        CameraPosition::Back,
        LensKind::UltraWideAngle,
        true,
    )];
    let Harness {
        mut screen, camera, ..
    } = harness_with(back_only, |_| {});

    screen.update(Message::ToggleLens);
    assert!(screen.device().is_none());
    assert!(matches!(
        screen.device_error(),
        Some(DeviceError::DeviceUnavailable {
            position: CameraPosition::Front,
            ..
        })
    ));
    assert_eq!(screen.snapshot().device_name, None);

    // No device, no capture
    screen.update(Message::PressShutter);
    assert_eq!(screen.phase(), CapturePhase::Idle);
    assert_eq!(camera.calls.photos.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_back_preference_falls_back_to_other_back_lens() {
    let devices = vec![
        device("back-wide", CameraPosition::Back, LensKind::WideAngle, true),
        device("front", CameraPosition::Front, LensKind::WideAngle, false),
    ];
    let Harness { screen, .. } = harness_with(devices, |_| {});

    assert_eq!(screen.device().map(|d| d.id.as_str()), Some("back-wide"));
}

#[tokio::test]
async fn test_lens_switch_rejected_while_recording() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::StartRecording);
    screen.update(Message::ToggleLens);
    assert_eq!(screen.device().map(|d| d.id.as_str()), Some("back-uw"));
}

#[tokio::test]
async fn test_devices_changed_reselects() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::DevicesChanged(Vec::new()));
    assert!(screen.device().is_none());

    screen.update(Message::DevicesChanged(phone_devices()));
    assert_eq!(screen.device().map(|d| d.id.as_str()), Some("back-uw"));
}

#[tokio::test]
async fn test_geometry_picks_matching_aspect_ratio() {
    let Harness { mut screen, .. } = harness();

    // 4:3 portrait screen prefers the 4032x3024 format at 30 fps
    screen.update(Message::ScreenGeometryChanged(3.0 / 4.0));
    assert_eq!(screen.format().map(|f| f.width), Some(4032));

    // 16:9 prefers 1920x1080
    screen.update(Message::ScreenGeometryChanged(9.0 / 16.0));
    assert_eq!(screen.format().map(|f| f.width), Some(1920));
}

// ===== Overlays =====

#[tokio::test]
async fn test_review_overlay_shows_last_capture() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::OpenReview);
    assert!(!screen.is_review_visible());

    screen.update(Message::StartPhoto);
    settle(&mut screen).await;
    screen.update(Message::OpenReview);
    assert!(screen.is_review_visible());
    assert_eq!(
        screen.review_content().map(|a| a.kind),
        Some(ArtifactKind::Photo)
    );

    screen.update(Message::CloseReview);
    assert!(screen.review_content().is_none());
}

#[tokio::test]
async fn test_fps_selection_closes_picker() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::ToggleFpsPicker);
    assert!(screen.is_fps_picker_visible());

    screen.update(Message::SelectFps(60));
    assert_eq!(screen.options().fps, 60);
    assert!(!screen.is_fps_picker_visible());
    assert_eq!(screen.format().map(|f| f.max_fps), Some(60));
}

#[tokio::test]
async fn test_unsupported_fps_is_rejected() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::ToggleFpsPicker);
    screen.update(Message::SelectFps(24));
    assert_eq!(screen.options().fps, 30);
    assert!(screen.is_fps_picker_visible());
}

#[tokio::test]
async fn test_fps_clamped_on_thirty_fps_camera() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::ToggleLens);
    assert!(!screen.capabilities().supports_60_fps);
    screen.update(Message::ToggleFpsPicker);
    assert!(!screen.is_fps_picker_visible());

    screen.update(Message::SelectFps(60));
    assert_eq!(screen.options().fps, 30);
}

#[tokio::test]
async fn test_lens_switch_lowers_fps_to_new_device() {
    let Harness {
        mut screen, camera, ..
    } = harness();

    screen.update(Message::SelectFps(60));
    assert_eq!(screen.options().fps, 60);

    screen.update(Message::ToggleLens);
    assert_eq!(screen.device().map(|d| d.id.as_str()), Some("front"));
    assert!(screen.options().fps <= screen.capabilities().format_max_fps);
    assert_eq!(screen.snapshot().options.fps, 30);
    assert_eq!(screen.format().map(|f| f.max_fps), Some(30));

    screen.update(Message::StartRecording);
    let options = camera.calls.last_recording.lock().unwrap().expect("started");
    assert_eq!(options.fps, 30);
}

// ===== Lifecycle =====

#[tokio::test]
async fn test_completion_after_teardown_is_discarded() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::StartPhoto);
    screen.unmount();
    let sender = screen.sender();

    // Let the capture task post its result, then apply it
    tokio::time::sleep(Duration::from_millis(50)).await;
    let _ = tokio::time::timeout(Duration::from_millis(200), screen.handle_next()).await;
    sender.send(Message::OpenReview).unwrap();
    let _ = tokio::time::timeout(Duration::from_millis(200), screen.handle_next()).await;

    assert!(screen.is_torn_down());
    assert!(screen.last_artifact().is_none());
    assert!(!screen.is_review_visible());
    assert!(!screen.snapshot().mounted);
}

#[tokio::test]
async fn test_unmount_clears_review() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::StartPhoto);
    settle(&mut screen).await;
    screen.update(Message::OpenReview);
    screen.update(Message::ToggleFpsPicker);

    screen.unmount();
    assert!(!screen.is_review_visible());
    assert!(!screen.is_fps_picker_visible());
    assert!(screen.last_artifact().is_none());

    screen.update(Message::OpenReview);
    assert!(!screen.is_review_visible());
}

#[tokio::test]
async fn test_config_round_trip_from_screen() {
    let Harness { mut screen, .. } = harness();

    screen.update(Message::ToggleLens);
    screen.update(Message::ToggleSound);
    let config = screen.to_config(&Config::default());
    assert_eq!(config.lens_preference, LensPreference::Front);
    assert!(!config.shutter_sound);
}
