// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Handlers are grouped by functional domain and implemented as methods
//! on [`crate::app::CameraScreen`].

pub mod camera;
pub mod capture;
pub mod ui;
