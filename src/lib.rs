// SPDX-License-Identifier: MPL-2.0

//! Camera Screen - the state and control layer of a phone-style camera screen
//!
//! This library owns everything behind the viewfinder: which physical
//! camera and format are active, photo/video mode and its toggles, pinch and
//! preset zoom, the capture session state machine, and the hand-off of
//! finished captures to app storage and the media library.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: The [`CameraScreen`] model, its messages and handlers
//! - [`backends`]: Camera backend abstraction plus a simulated camera
//! - [`config`]: Persisted user settings
//! - [`storage`]: Artifact naming, copying, and media library registration
//! - [`errors`]: Error types shared by all of the above
//!
//! # Example
//!
//! ```ignore
//! let mut screen = CameraScreen::new(collaborators, &Config::load());
//! screen.mount();
//! screen.update(Message::PressShutter);
//! screen.settle().await;
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod storage;

// Re-export commonly used types
pub use app::{CameraMode, CameraScreen, CapturePhase, Collaborators, Message, ScreenSnapshot};
pub use config::Config;
pub use constants::ZoomPreset;
pub use errors::{AppError, AppResult};
