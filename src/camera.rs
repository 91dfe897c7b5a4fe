// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use serde::Serialize;
use std::{fmt, str::FromStr};

/// Returned when a camera id does not name one of the two sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid camera")]
pub struct InvalidCamera;

/// Identifier of one of the two Neoden sensors.
///
/// The driver addresses the cameras by fixed ids: `1` is the downward
/// facing camera on the placement head and `5` is the upward facing camera
/// under the machine bed. Every other id is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "i32")]
pub enum CameraId {
    /// Head camera looking down at the board (ID 1)
    Down = 1,
    /// Bed camera looking up at the nozzle (ID 5)
    Up = 5,
}

impl CameraId {
    pub const ALL: [CameraId; 2] = [CameraId::Down, CameraId::Up];

    /// Raw id passed to the driver.
    pub const fn raw(self) -> i32 {
        self as i32
    }

    pub const fn facing(self) -> &'static str {
        match self {
            CameraId::Down => "down",
            CameraId::Up => "up",
        }
    }
}

impl TryFrom<i32> for CameraId {
    type Error = InvalidCamera;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CameraId::Down),
            5 => Ok(CameraId::Up),
            _ => Err(InvalidCamera),
        }
    }
}

impl From<CameraId> for i32 {
    fn from(camera: CameraId) -> Self {
        camera.raw()
    }
}

impl FromStr for CameraId {
    type Err = InvalidCamera;

    /// Unparseable ids are treated as `0`, which is never a valid camera.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CameraId::try_from(s.parse::<i32>().unwrap_or(0))
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_known_ids() {
        for id in -10..=100 {
            let res = CameraId::try_from(id);
            if id == 1 || id == 5 {
                assert_eq!(res.map(CameraId::raw), Ok(id));
            } else {
                assert_eq!(res, Err(InvalidCamera), "id {id} should be rejected");
            }
        }
        assert!(CameraId::try_from(i32::MAX).is_err());
        assert!(CameraId::try_from(i32::MIN).is_err());
    }

    #[test]
    fn parses_path_segments() {
        assert_eq!("1".parse(), Ok(CameraId::Down));
        assert_eq!("5".parse(), Ok(CameraId::Up));
        assert_eq!("+5".parse(), Ok(CameraId::Up));
        assert_eq!("0".parse::<CameraId>(), Err(InvalidCamera));
        assert_eq!("2".parse::<CameraId>(), Err(InvalidCamera));
        assert_eq!("".parse::<CameraId>(), Err(InvalidCamera));
        assert_eq!("down".parse::<CameraId>(), Err(InvalidCamera));
        assert_eq!(" 1".parse::<CameraId>(), Err(InvalidCamera));
        assert_eq!("1.0".parse::<CameraId>(), Err(InvalidCamera));
    }

    #[test]
    fn displays_raw_id() {
        assert_eq!(CameraId::Down.to_string(), "1");
        assert_eq!(CameraId::Up.to_string(), "5");
        assert_eq!(InvalidCamera.to_string(), "Invalid camera");
    }
}
