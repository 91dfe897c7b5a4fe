// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Safe seam over the Neoden camera driver call surface.
//!
//! Every method maps one-to-one onto a driver symbol and returns the raw
//! driver status. For the per-camera calls the driver echoes the camera id;
//! the value is only ever logged, never interpreted.

mod neoden;
mod simulated;

pub use neoden::{DriverError, NeodenDriver};
pub use simulated::{DriverCall, SensorSettings, SimulatedDriver};

use crate::camera::CameraId;

/// Blocking interface to the camera driver.
///
/// Implementations are shared between request handlers as
/// `Arc<dyn CameraDriver>` and called from the blocking thread pool. No
/// additional locking is layered on top; whatever thread-safety the driver
/// itself provides is what callers get.
pub trait CameraDriver: Send + Sync {
    /// `img_init`: detects the attached cameras and returns how many were
    /// found.
    fn init(&self) -> i32;

    /// `img_set_wh`: sets the sensor readout resolution.
    fn set_width_height(&self, camera: CameraId, width: i32, height: i32) -> i32;

    /// `img_readAsy`: reads one GRAY8 frame into `buf`, waiting at most
    /// `timeout` milliseconds.
    fn read_async(&self, camera: CameraId, buf: &mut [u8], timeout: i32) -> i32;

    /// `img_led`: switches the ring light mode.
    fn led(&self, camera: CameraId, mode: i32) -> i32;

    /// `img_reset`
    fn reset(&self, camera: CameraId) -> i32;

    /// `img_set_exp`
    fn set_exposure(&self, camera: CameraId, exposure: i32) -> i32;

    /// `img_set_gain`
    fn set_gain(&self, camera: CameraId, gain: i32) -> i32;

    /// `img_set_lt`: sets the vendor tuning pair.
    fn set_lt(&self, camera: CameraId, a2: i32, a3: i32) -> i32;
}
