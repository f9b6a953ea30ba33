// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! Each command drives a [`CameraScreen`] over the simulated camera exactly
//! the way a UI would: messages in, snapshot out.
//! - Listing available cameras
//! - Taking photos
//! - Recording videos

use camera_screen::app::state::CameraMode;
use camera_screen::backends::camera::simulated::SimulatedCamera;
use camera_screen::backends::camera::types::{FlashMode, LensPreference};
use camera_screen::backends::camera::CameraBackend;
use camera_screen::storage::{DirectoryLibrary, LocalStorage};
use camera_screen::{CameraScreen, CapturePhase, Collaborators, Config, Message};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Options shared by the capture commands
pub struct CaptureArgs {
    pub front: bool,
    pub fps: Option<u32>,
    pub flash: bool,
    pub hdr: bool,
    pub output: Option<PathBuf>,
}

/// List all available cameras
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    let camera = SimulatedCamera::new(scratch_dir());
    let devices = camera.enumerate_devices();

    if devices.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for device in &devices {
        println!("  [{}] {}", device.id, device.name);
        println!(
            "      Position: {}, lens: {}, flash: {}",
            device.position,
            device.lens,
            if device.has_flash { "yes" } else { "no" }
        );
        println!(
            "      Zoom: {:.1}x - {:.1}x",
            device.min_zoom, device.max_zoom
        );

        let mut formats = device.formats.clone();
        formats.sort_by_key(|f| std::cmp::Reverse(f.pixels()));
        let display: Vec<String> = formats.iter().take(3).map(|f| f.to_string()).collect();
        if !display.is_empty() {
            println!("      Formats: {}", display.join(", "));
        }
        println!();
    }

    Ok(())
}

/// Take a photo
pub async fn take_photo(args: CaptureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut screen = open_screen(&args)?;
    screen.update(Message::SetMode(CameraMode::Photo));

    println!("Capturing...");
    screen.update(Message::PressShutter);
    if screen.phase() != CapturePhase::Capturing {
        return Err("Camera did not start capturing".into());
    }
    screen.settle().await;

    let result = report(&screen);
    screen.unmount();
    result
}

/// Record a video for `duration` seconds or until Ctrl+C
pub async fn record_video(
    args: CaptureArgs,
    duration: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut screen = open_screen(&args)?;
    screen.update(Message::SetMode(CameraMode::Video));

    let options = screen.options();
    println!("Frame rate: {}fps", screen.capabilities().effective_fps(options.fps));
    println!("Duration: {} seconds", duration);

    // Set up Ctrl+C handler
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_clone = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_clone.store(true, Ordering::SeqCst);
    })?;

    println!();
    println!("Recording... (press Ctrl+C to stop early)");
    screen.update(Message::PressShutter);
    if screen.phase() != CapturePhase::Recording {
        return Err("Camera did not start recording".into());
    }

    let start = Instant::now();
    let target_duration = Duration::from_secs(duration);
    while start.elapsed() < target_duration && screen.phase() == CapturePhase::Recording {
        if stop_flag.load(Ordering::SeqCst) {
            println!();
            println!("Stopping early...");
            break;
        }

        let elapsed = start.elapsed().as_secs();
        print!("\rRecording: {:02}:{:02}", elapsed / 60, elapsed % 60);
        std::io::Write::flush(&mut std::io::stdout())?;

        // Keep applying completions so a failed recording ends the loop
        tokio::select! {
            _ = screen.handle_next() => {}
            _ = tokio::time::sleep(Duration::from_millis(100)) => {}
        }
    }
    println!();

    screen.update(Message::PressShutter);
    screen.settle().await;

    let result = report(&screen);
    screen.unmount();
    result
}

fn open_screen(args: &CaptureArgs) -> Result<CameraScreen, Box<dyn std::error::Error>> {
    let mut config = Config::load();
    if args.front {
        config.lens_preference = LensPreference::Front;
    }
    if args.flash {
        config.flash = FlashMode::On;
    }
    if args.hdr {
        config.hdr = true;
    }
    if let Some(dir) = &args.output {
        config.library_dir = Some(dir.clone());
    }

    let collaborators = Collaborators {
        camera: Arc::new(SimulatedCamera::new(scratch_dir())),
        files: Arc::new(LocalStorage::new(config.storage_dir())),
        library: Arc::new(DirectoryLibrary::new(
            config.photos_dir(),
            config.videos_dir(),
        )),
    };

    let mut screen = CameraScreen::new(collaborators, &config);
    screen.mount();
    if let Some(err) = screen.device_error() {
        return Err(err.to_string().into());
    }
    if let Some(fps) = args.fps {
        screen.update(Message::SelectFps(fps));
    }

    let snapshot = screen.snapshot();
    if let Some(name) = &snapshot.device_name {
        println!("Using camera: {}", name);
    }
    if let Some(format) = &snapshot.format_label {
        println!("Capture format: {}", format);
    }
    Ok(screen)
}

fn report(screen: &CameraScreen) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = screen.snapshot();
    match (screen.last_artifact(), snapshot.last_error) {
        (Some(artifact), error) => {
            println!("Saved: {}", artifact.display_path().display());
            if let Some(err) = error {
                println!("Warning: {}", err);
            }
            Ok(())
        }
        (None, Some(err)) => Err(err.into()),
        (None, None) => Err("Nothing was captured".into()),
    }
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join("camera-screen")
}
