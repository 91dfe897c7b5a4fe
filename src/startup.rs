// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{camera::CameraId, driver::CameraDriver};
use std::{sync::Arc, time::Duration};
use tokio::task::JoinError;
use tracing::{info, warn};

/// Cameras the driver must report before the bridge starts serving.
pub const MIN_CAMERAS: i32 = 2;

/// Delay before `img_init`; the driver needs time after load before it can
/// detect the cameras.
pub const STARTUP_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("detected {detected} cameras, at least {required} required")]
    TooFewCameras { detected: i32, required: i32 },
    #[error("camera initialization did not complete: {0}")]
    Init(#[from] JoinError),
}

/// Waits `delay`, initializes the driver and checks the camera count.
///
/// Returns the number of cameras reported by `img_init`.
///
/// # Errors
///
/// Returns [`StartupError::TooFewCameras`] when the driver detects fewer
/// than `min_cameras` cameras.
pub async fn initialize_cameras(
    driver: Arc<dyn CameraDriver>,
    delay: Duration,
    min_cameras: i32,
) -> Result<i32, StartupError> {
    info!("Starting up in {} seconds...", delay.as_secs_f32());
    tokio::time::sleep(delay).await;

    let cameras = tokio::task::spawn_blocking(move || driver.init()).await?;
    if cameras < min_cameras {
        warn!("Bummer, detected {} cameras...", cameras);
        return Err(StartupError::TooFewCameras {
            detected: cameras,
            required: min_cameras,
        });
    }

    for camera in CameraId::ALL {
        info!(
            "{} facing camera: ID {}",
            match camera {
                CameraId::Down => "Downward",
                CameraId::Up => "Upward",
            },
            camera
        );
    }
    info!("img_init detected {} cameras", cameras);

    Ok(cameras)
}
