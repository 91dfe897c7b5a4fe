// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # Neoden Camera HTTP Bridge Library
//!
//! This library exposes the two cameras of a Neoden pick-and-place machine
//! over HTTP. All sensor behaviour lives in the vendor `neodencamera`
//! driver, which is loaded at runtime through the `neodencamera-sys`
//! bindings; this crate only initializes the driver, maps HTTP requests
//! onto driver calls and re-encodes captured frames as PNG.
//!
//! ## Features
//!
//! - **Driver Boundary**: The [`driver::CameraDriver`] trait wraps the eight
//!   `img_*` driver calls, with a vendor-backed and a simulated
//!   implementation.
//! - **Camera Validation**: Only the downward (ID 1) and upward (ID 5)
//!   cameras are addressable.
//! - **PNG Transport**: Raw GRAY8 frames are encoded losslessly as PNG.
//!
//! ## Example
//!
//! ```no_run
//! use neoden_camera::{
//!     driver::SimulatedDriver,
//!     server::{router, AppState},
//!     startup::initialize_cameras,
//! };
//! use std::{sync::Arc, time::Duration};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = Arc::new(SimulatedDriver::default());
//! let cameras = initialize_cameras(driver.clone(), Duration::from_secs(5), 2).await?;
//! let app = router(AppState::new(driver, cameras));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Safety
//!
//! The driver is foreign code reached through raw function pointers. All
//! unsafe calls are confined to [`driver::NeodenDriver`].

pub mod args;
pub mod camera;
pub mod driver;
pub mod image;
pub mod server;
pub mod startup;
