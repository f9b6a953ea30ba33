// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer
//!
//! The app layer only talks to [`camera::CameraBackend`]. Platform
//! implementations plug in behind it; [`camera::simulated`] is the one
//! shipped here, used by the CLI and the tests.

pub mod camera;
