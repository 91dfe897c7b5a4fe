// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::startup::{MIN_CAMERAS, STARTUP_DELAY};
use clap::Parser;
use std::{
    ffi::OsString,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

/// Command-line arguments for the Neoden Camera HTTP Bridge.
///
/// Arguments can be specified via command line or environment variables.
///
/// # Example
///
/// ```bash
/// # Via command line
/// neoden-camera --port 8080 --driver C:\\neoden\\neodencamera.dll
///
/// # Via environment variables
/// export PORT=8080
/// export MOCK=true
/// neoden-camera
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// HTTP listen port
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// HTTP listen address
    #[arg(long, env = "BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Path to the Neoden camera driver library (defaults to the platform
    /// name of neodencamera on the library search path)
    #[arg(long, env = "NEODEN_DRIVER")]
    pub driver: Option<PathBuf>,

    /// Seconds to wait for the driver before detecting cameras
    #[arg(long, env = "STARTUP_DELAY", default_value_t = STARTUP_DELAY.as_secs())]
    pub startup_delay: u64,

    /// Minimum number of cameras the driver must detect
    #[arg(long, env = "MIN_CAMERAS", default_value_t = MIN_CAMERAS)]
    pub min_cameras: i32,

    /// Use a simulated driver instead of the vendor library
    #[arg(long, env = "MOCK")]
    pub mock: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable Tokio async runtime console for debugging
    #[arg(long, env = "TOKIO_CONSOLE")]
    pub tokio_console: bool,

    /// Enable Tracy profiler for performance analysis
    #[arg(long, env = "TRACY")]
    pub tracy: bool,
}

impl Args {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay)
    }

    /// Driver library to load, falling back to the platform library name.
    pub fn driver_path(&self) -> OsString {
        match &self.driver {
            Some(path) => path.clone().into_os_string(),
            None => neodencamera_sys::library_filename(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["neoden-camera"]).unwrap();
        assert_eq!(args.socket_addr(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(args.startup_delay(), Duration::from_secs(5));
        assert_eq!(args.min_cameras, 2);
        assert!(!args.mock);
        assert_eq!(args.driver_path(), neodencamera_sys::library_filename());
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "neoden-camera",
            "--port",
            "9000",
            "--bind",
            "127.0.0.1",
            "--driver",
            "/opt/neoden/libneodencamera.so",
            "--startup-delay",
            "0",
            "--mock",
        ])
        .unwrap();
        assert_eq!(args.socket_addr(), "127.0.0.1:9000".parse().unwrap());
        assert_eq!(args.startup_delay(), Duration::ZERO);
        assert!(args.mock);
        assert_eq!(
            args.driver_path(),
            OsString::from("/opt/neoden/libneodencamera.so")
        );
    }
}
