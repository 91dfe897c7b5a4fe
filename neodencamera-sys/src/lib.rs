// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Low-level bindings for the Neoden camera driver (`neodencamera`).
//!
//! The driver is a vendor shared library which is loaded at runtime, so the
//! bindings follow the bindgen `--dynamic-loading --dynamic-link-require-all`
//! layout: every symbol is resolved when the library is opened and a missing
//! symbol fails the load instead of the first call.
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use libc::{c_int, c_uchar};
use std::ffi::{OsStr, OsString};

pub use libloading;

/// Base name of the driver library, without platform prefix or suffix.
pub const LIBRARY_NAME: &str = "neodencamera";

/// Platform file name of the driver library (`neodencamera.dll` on Windows,
/// `libneodencamera.so` on Linux).
pub fn library_filename() -> OsString {
    libloading::library_filename(LIBRARY_NAME)
}

pub type img_init_fn = unsafe extern "system" fn() -> c_int;
pub type img_set_wh_fn = unsafe extern "system" fn(camera: c_int, width: c_int, height: c_int) -> c_int;
pub type img_readAsy_fn = unsafe extern "system" fn(
    camera: c_int,
    buffer: *mut c_uchar,
    length: c_int,
    timeout: c_int,
) -> c_int;
pub type img_led_fn = unsafe extern "system" fn(camera: c_int, mode: c_int) -> c_int;
pub type img_reset_fn = unsafe extern "system" fn(camera: c_int) -> c_int;
pub type img_set_exp_fn = unsafe extern "system" fn(camera: c_int, exposure: c_int) -> c_int;
pub type img_set_gain_fn = unsafe extern "system" fn(camera: c_int, gain: c_int) -> c_int;
pub type img_set_lt_fn = unsafe extern "system" fn(camera: c_int, a2: c_int, a3: c_int) -> c_int;

pub struct neodencamera {
    __library: ::libloading::Library,
    pub img_init: img_init_fn,
    pub img_set_wh: img_set_wh_fn,
    pub img_readAsy: img_readAsy_fn,
    pub img_led: img_led_fn,
    pub img_reset: img_reset_fn,
    pub img_set_exp: img_set_exp_fn,
    pub img_set_gain: img_set_gain_fn,
    pub img_set_lt: img_set_lt_fn,
}

impl neodencamera {
    /// Opens the driver library at `path` and resolves all symbols.
    ///
    /// # Safety
    ///
    /// Loading a library runs its initialisation routines. The caller must
    /// ensure `path` names a genuine Neoden camera driver whose exported
    /// symbols match the signatures declared here.
    pub unsafe fn new<P>(path: P) -> Result<Self, ::libloading::Error>
    where
        P: AsRef<OsStr>,
    {
        let library = ::libloading::Library::new(path)?;
        Self::from_library(library)
    }

    /// Resolves all symbols from an already opened library.
    ///
    /// # Safety
    ///
    /// See [`neodencamera::new`].
    pub unsafe fn from_library<L>(library: L) -> Result<Self, ::libloading::Error>
    where
        L: Into<::libloading::Library>,
    {
        let __library = library.into();
        let img_init = __library.get::<img_init_fn>(b"img_init\0").map(|sym| *sym)?;
        let img_set_wh = __library.get::<img_set_wh_fn>(b"img_set_wh\0").map(|sym| *sym)?;
        let img_readAsy = __library
            .get::<img_readAsy_fn>(b"img_readAsy\0")
            .map(|sym| *sym)?;
        let img_led = __library.get::<img_led_fn>(b"img_led\0").map(|sym| *sym)?;
        let img_reset = __library.get::<img_reset_fn>(b"img_reset\0").map(|sym| *sym)?;
        let img_set_exp = __library
            .get::<img_set_exp_fn>(b"img_set_exp\0")
            .map(|sym| *sym)?;
        let img_set_gain = __library
            .get::<img_set_gain_fn>(b"img_set_gain\0")
            .map(|sym| *sym)?;
        let img_set_lt = __library
            .get::<img_set_lt_fn>(b"img_set_lt\0")
            .map(|sym| *sym)?;
        Ok(neodencamera {
            __library,
            img_init,
            img_set_wh,
            img_readAsy,
            img_led,
            img_reset,
            img_set_exp,
            img_set_gain,
            img_set_lt,
        })
    }

    /// Detects the attached cameras and returns how many were found.
    pub unsafe fn img_init(&self) -> c_int {
        (self.img_init)()
    }

    pub unsafe fn img_set_wh(&self, camera: c_int, width: c_int, height: c_int) -> c_int {
        (self.img_set_wh)(camera, width, height)
    }

    /// Reads one frame into `buffer`, waiting at most `timeout` milliseconds.
    ///
    /// # Safety
    ///
    /// `buffer` must be valid for writes of `length` bytes.
    pub unsafe fn img_readAsy(
        &self,
        camera: c_int,
        buffer: *mut c_uchar,
        length: c_int,
        timeout: c_int,
    ) -> c_int {
        (self.img_readAsy)(camera, buffer, length, timeout)
    }

    pub unsafe fn img_led(&self, camera: c_int, mode: c_int) -> c_int {
        (self.img_led)(camera, mode)
    }

    pub unsafe fn img_reset(&self, camera: c_int) -> c_int {
        (self.img_reset)(camera)
    }

    pub unsafe fn img_set_exp(&self, camera: c_int, exposure: c_int) -> c_int {
        (self.img_set_exp)(camera, exposure)
    }

    pub unsafe fn img_set_gain(&self, camera: c_int, gain: c_int) -> c_int {
        (self.img_set_gain)(camera, gain)
    }

    pub unsafe fn img_set_lt(&self, camera: c_int, a2: c_int, a3: c_int) -> c_int {
        (self.img_set_lt)(camera, a2, a3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_filename_is_platform_specific() {
        let name = library_filename();
        let name = name.to_string_lossy();
        assert!(name.contains(LIBRARY_NAME));
        #[cfg(target_os = "linux")]
        assert_eq!(name, "libneodencamera.so");
        #[cfg(windows)]
        assert_eq!(name, "neodencamera.dll");
    }

    #[test]
    fn missing_library_fails_to_load() {
        let res = unsafe { neodencamera::new("/nonexistent/libneodencamera.so") };
        assert!(res.is_err());
    }
}
