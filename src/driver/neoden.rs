// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use super::CameraDriver;
use crate::camera::CameraId;
use neodencamera_sys::{libloading, neodencamera as neoden_library};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to load camera driver {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
}

/// Camera driver backed by the vendor `neodencamera` library.
///
/// The library is opened once and kept loaded for the lifetime of the
/// value. All calls go straight through to the driver without any
/// serialisation.
pub struct NeodenDriver {
    lib: neoden_library,
    path: PathBuf,
}

impl NeodenDriver {
    /// Loads the driver library and resolves all of its symbols.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The library cannot be found or opened
    /// - Any of the `img_*` symbols is missing from the library
    pub fn new<P: AsRef<OsStr>>(path: P) -> Result<Self, DriverError> {
        let path = PathBuf::from(path.as_ref());
        // SAFETY: the library is the vendor camera driver; its exported
        // symbols match the signatures declared in neodencamera-sys.
        let lib = unsafe { neoden_library::new(&path) }.map_err(|source| DriverError::Load {
            path: path.clone(),
            source,
        })?;
        debug!("Neoden driver loaded from {}", path.display());
        Ok(Self { lib, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CameraDriver for NeodenDriver {
    #[instrument(level = "debug", skip(self))]
    fn init(&self) -> i32 {
        unsafe { self.lib.img_init() }
    }

    #[instrument(level = "debug", skip(self))]
    fn set_width_height(&self, camera: CameraId, width: i32, height: i32) -> i32 {
        unsafe { self.lib.img_set_wh(camera.raw(), width, height) }
    }

    #[instrument(level = "debug", skip(self, buf), fields(len = buf.len()))]
    fn read_async(&self, camera: CameraId, buf: &mut [u8], timeout: i32) -> i32 {
        let len = i32::try_from(buf.len()).unwrap_or(i32::MAX);
        // SAFETY: buf is valid for writes of len bytes and outlives the call.
        unsafe {
            self.lib
                .img_readAsy(camera.raw(), buf.as_mut_ptr(), len, timeout)
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn led(&self, camera: CameraId, mode: i32) -> i32 {
        unsafe { self.lib.img_led(camera.raw(), mode) }
    }

    #[instrument(level = "debug", skip(self))]
    fn reset(&self, camera: CameraId) -> i32 {
        unsafe { self.lib.img_reset(camera.raw()) }
    }

    #[instrument(level = "debug", skip(self))]
    fn set_exposure(&self, camera: CameraId, exposure: i32) -> i32 {
        unsafe { self.lib.img_set_exp(camera.raw(), exposure) }
    }

    #[instrument(level = "debug", skip(self))]
    fn set_gain(&self, camera: CameraId, gain: i32) -> i32 {
        unsafe { self.lib.img_set_gain(camera.raw(), gain) }
    }

    #[instrument(level = "debug", skip(self))]
    fn set_lt(&self, camera: CameraId, a2: i32, a3: i32) -> i32 {
        unsafe { self.lib.img_set_lt(camera.raw(), a2, a3) }
    }
}
