// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use super::CameraDriver;
use crate::camera::CameraId;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::trace;

/// One call received by a [`SimulatedDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Init,
    SetWidthHeight {
        camera: CameraId,
        width: i32,
        height: i32,
    },
    ReadAsync {
        camera: CameraId,
        len: usize,
        timeout: i32,
    },
    Led {
        camera: CameraId,
        mode: i32,
    },
    Reset {
        camera: CameraId,
    },
    SetExposure {
        camera: CameraId,
        exposure: i32,
    },
    SetGain {
        camera: CameraId,
        gain: i32,
    },
    SetLt {
        camera: CameraId,
        a2: i32,
        a3: i32,
    },
}

/// Last values written to a simulated sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSettings {
    pub width: i32,
    pub height: i32,
    pub led: i32,
    pub exposure: i32,
    pub gain: i32,
    pub lt: (i32, i32),
    pub frames: u32,
}

#[derive(Default)]
struct State {
    calls: Vec<DriverCall>,
    sensors: HashMap<CameraId, SensorSettings>,
}

/// Stand-in for the vendor driver on machines without the hardware.
///
/// Every call is recorded and echoed back the way the real driver does
/// (camera id for per-camera calls, the configured camera count for
/// `init`). Frames are filled with a diagonal ramp that shifts by one grey
/// level per captured frame, so consecutive captures are distinguishable.
pub struct SimulatedDriver {
    cameras: i32,
    state: Mutex<State>,
}

impl SimulatedDriver {
    pub fn new(cameras: i32) -> Self {
        Self {
            cameras,
            state: Mutex::new(State::default()),
        }
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<DriverCall> {
        self.lock().calls.clone()
    }

    pub fn settings(&self, camera: CameraId) -> SensorSettings {
        self.lock()
            .sensors
            .get(&camera)
            .copied()
            .unwrap_or_default()
    }

    /// Pixel value the ramp holds at (`x`, `y`) for the given frame number.
    pub fn ramp(x: usize, y: usize, frame: u32) -> u8 {
        (x.wrapping_add(y).wrapping_add(frame as usize) & 0xff) as u8
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // the state stays consistent even if a recording thread panicked
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record<F>(&self, call: DriverCall, camera: CameraId, update: F) -> i32
    where
        F: FnOnce(&mut SensorSettings),
    {
        trace!("{:?}", call);
        let mut state = self.lock();
        state.calls.push(call);
        update(state.sensors.entry(camera).or_default());
        camera.raw()
    }
}

impl Default for SimulatedDriver {
    fn default() -> Self {
        Self::new(2)
    }
}

impl CameraDriver for SimulatedDriver {
    fn init(&self) -> i32 {
        self.lock().calls.push(DriverCall::Init);
        self.cameras
    }

    fn set_width_height(&self, camera: CameraId, width: i32, height: i32) -> i32 {
        let call = DriverCall::SetWidthHeight {
            camera,
            width,
            height,
        };
        self.record(call, camera, |s| {
            s.width = width;
            s.height = height;
        })
    }

    fn read_async(&self, camera: CameraId, buf: &mut [u8], timeout: i32) -> i32 {
        let call = DriverCall::ReadAsync {
            camera,
            len: buf.len(),
            timeout,
        };
        let mut frame = 0;
        let ret = self.record(call, camera, |s| {
            frame = s.frames;
            s.frames = s.frames.wrapping_add(1);
        });

        // rows follow the last resolution set; fall back to one long row
        let width = match self.settings(camera).width {
            w if w > 0 => w as usize,
            _ => buf.len().max(1),
        };
        for (i, px) in buf.iter_mut().enumerate() {
            *px = Self::ramp(i % width, i / width, frame);
        }
        ret
    }

    fn led(&self, camera: CameraId, mode: i32) -> i32 {
        self.record(DriverCall::Led { camera, mode }, camera, |s| s.led = mode)
    }

    fn reset(&self, camera: CameraId) -> i32 {
        self.record(DriverCall::Reset { camera }, camera, |s| {
            *s = SensorSettings::default()
        })
    }

    fn set_exposure(&self, camera: CameraId, exposure: i32) -> i32 {
        let call = DriverCall::SetExposure { camera, exposure };
        self.record(call, camera, |s| s.exposure = exposure)
    }

    fn set_gain(&self, camera: CameraId, gain: i32) -> i32 {
        self.record(DriverCall::SetGain { camera, gain }, camera, |s| {
            s.gain = gain
        })
    }

    fn set_lt(&self, camera: CameraId, a2: i32, a3: i32) -> i32 {
        self.record(DriverCall::SetLt { camera, a2, a3 }, camera, |s| {
            s.lt = (a2, a3)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_camera_and_records_calls() {
        let driver = SimulatedDriver::new(3);
        assert_eq!(driver.init(), 3);
        assert_eq!(driver.set_gain(CameraId::Up, 12), 5);
        assert_eq!(driver.led(CameraId::Down, 2), 1);
        assert_eq!(
            driver.calls(),
            vec![
                DriverCall::Init,
                DriverCall::SetGain {
                    camera: CameraId::Up,
                    gain: 12
                },
                DriverCall::Led {
                    camera: CameraId::Down,
                    mode: 2
                },
            ]
        );
        assert_eq!(driver.settings(CameraId::Up).gain, 12);
        assert_eq!(driver.settings(CameraId::Down).led, 2);
    }

    #[test]
    fn reset_clears_settings() {
        let driver = SimulatedDriver::default();
        driver.set_exposure(CameraId::Down, 400);
        driver.set_lt(CameraId::Down, 7, 9);
        assert_eq!(driver.settings(CameraId::Down).lt, (7, 9));
        driver.reset(CameraId::Down);
        assert_eq!(driver.settings(CameraId::Down), SensorSettings::default());
    }

    #[test]
    fn frames_follow_resolution_and_advance() {
        let driver = SimulatedDriver::default();
        driver.set_width_height(CameraId::Up, 4, 2);

        let mut buf = [0u8; 8];
        driver.read_async(CameraId::Up, &mut buf, 100);
        assert_eq!(buf, [0, 1, 2, 3, 1, 2, 3, 4]);

        driver.read_async(CameraId::Up, &mut buf, 100);
        assert_eq!(buf, [1, 2, 3, 4, 2, 3, 4, 5]);
        assert_eq!(driver.settings(CameraId::Up).frames, 2);
    }
}
