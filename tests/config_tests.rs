// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use camera_screen::Config;
use camera_screen::backends::camera::types::{FlashMode, LensPreference};
use std::path::PathBuf;

fn scratch_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("camera-screen-config-{}", uuid::Uuid::new_v4()))
        .join("config.json")
}

#[test]
fn test_config_default() {
    let config = Config::default();

    // Check sensible defaults
    assert_eq!(config.lens_preference, LensPreference::Back);
    assert_eq!(config.fps, 30, "30 fps should be the default frame rate");
    assert!(config.shutter_sound, "Shutter sound should be on by default");
    assert_eq!(config.flash, FlashMode::Off);
    assert!(!config.hdr);
}

#[test]
fn test_config_save_and_load() {
    let path = scratch_file();
    let config = Config {
        lens_preference: LensPreference::Front,
        fps: 60,
        shutter_sound: false,
        flash: FlashMode::On,
        hdr: true,
        storage_dir: Some(PathBuf::from("/data/captures")),
        library_dir: None,
    };

    config.save_to(&path).expect("config saved");
    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_missing_config_uses_defaults() {
    assert_eq!(Config::load_from(&scratch_file()), Config::default());
}

#[test]
fn test_corrupt_config_uses_defaults() {
    let path = scratch_file();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_partial_config_fills_defaults() {
    let path = scratch_file();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{ "fps": 60 }"#).unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.fps, 60);
    assert!(config.shutter_sound);
}

#[test]
fn test_library_dir_splits_photos_and_videos() {
    let config = Config {
        library_dir: Some(PathBuf::from("/gallery")),
        ..Config::default()
    };
    assert_eq!(config.photos_dir(), PathBuf::from("/gallery/photos"));
    assert_eq!(config.videos_dir(), PathBuf::from("/gallery/videos"));
}
