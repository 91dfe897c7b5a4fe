// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use image::ImageFormat;
use neoden_camera::{
    camera::CameraId,
    driver::{CameraDriver, NeodenDriver},
    image::{encode_png, Frame, FrameError, MAX_FRAME_PIXELS},
};
use serial_test::serial;
use std::{error::Error, time::Instant};

fn decode(png: &[u8]) -> Result<image::GrayImage, Box<dyn Error>> {
    Ok(image::load_from_memory_with_format(png, ImageFormat::Png)?.to_luma8())
}

#[test]
fn test_png_roundtrip() -> Result<(), Box<dyn Error>> {
    for (width, height) in [(1, 1), (7, 3), (640, 480), (1280, 1024)] {
        let pixels: Vec<u8> = (0..width * height)
            .map(|i| (i * 31 % 251) as u8)
            .collect();
        let frame = Frame::from_pixels(width, height, pixels.clone())?;

        let png = frame.encode_png()?;
        let decoded = decode(&png)?;

        assert_eq!(decoded.width(), frame.width());
        assert_eq!(decoded.height(), frame.height());
        assert_eq!(decoded.into_raw(), pixels, "{width}x{height} not lossless");
        assert_eq!(frame.into_pixels(), pixels);
    }

    Ok(())
}

#[test]
fn test_png_extremes() -> Result<(), Box<dyn Error>> {
    for value in [0u8, 255] {
        let pixels = vec![value; 64 * 48];
        let png = encode_png(&pixels, 64, 48)?;
        assert_eq!(decode(&png)?.into_raw(), pixels);
    }

    Ok(())
}

#[test]
fn test_png_is_grayscale() -> Result<(), Box<dyn Error>> {
    let png = Frame::new(16, 16)?.encode_png()?;
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory_with_format(&png, ImageFormat::Png)?;
    assert_eq!(img.color(), image::ColorType::L8);

    Ok(())
}

#[test]
fn test_png_length_mismatch() {
    assert!(encode_png(&[0u8; 10], 4, 4).is_err());
    assert!(encode_png(&[0u8; 20], 4, 4).is_err());
}

#[test]
fn test_frame_sizes() -> Result<(), Box<dyn Error>> {
    let frame = Frame::new(1920, 1080)?;
    println!("{}", frame);
    assert_eq!(frame.width(), 1920);
    assert_eq!(frame.height(), 1080);
    assert_eq!(frame.size(), 2073600);
    assert!(frame.as_slice().iter().all(|&p| p == 0));
    assert_eq!(frame.to_string(), "1920x1080 GRAY8");

    for (w, h) in [(0, 480), (640, 0), (-1, 480), (640, -480), (0, 0)] {
        assert_eq!(
            Frame::new(w, h),
            Err(FrameError::InvalidSize {
                width: w,
                height: h
            })
        );
    }

    assert!(Frame::new(i32::MAX, i32::MAX).is_err());
    assert!(Frame::new(MAX_FRAME_PIXELS as i32, 2).is_err());
    assert!(Frame::new(MAX_FRAME_PIXELS as i32, 1).is_ok());

    Ok(())
}

#[test]
fn test_frame_from_pixels() {
    assert!(Frame::from_pixels(4, 4, vec![0; 16]).is_ok());

    assert_eq!(
        Frame::from_pixels(0, 5, vec![]),
        Err(FrameError::InvalidSize {
            width: 0,
            height: 5
        })
    );
    assert_eq!(
        Frame::from_pixels(5, 0, vec![]),
        Err(FrameError::InvalidSize {
            width: 5,
            height: 0
        })
    );
    assert_eq!(
        Frame::from_pixels(MAX_FRAME_PIXELS as u32, 2, vec![]),
        Err(FrameError::InvalidSize {
            width: MAX_FRAME_PIXELS as i32,
            height: 2
        })
    );
    assert_eq!(
        Frame::from_pixels(u32::MAX, u32::MAX, vec![]),
        Err(FrameError::InvalidSize {
            width: i32::MAX,
            height: i32::MAX
        })
    );

    assert_eq!(
        Frame::from_pixels(4, 4, vec![0; 15]),
        Err(FrameError::LengthMismatch {
            width: 4,
            height: 4,
            expected: 16,
            actual: 15
        })
    );
}

#[test]
#[serial]
#[ignore = "camera test is disabled by default (run with --include-ignored to enable)"]
fn test_capture() -> Result<(), Box<dyn Error>> {
    let driver = NeodenDriver::new(neodencamera_sys::library_filename())?;
    let cameras = driver.init();
    println!("driver {} detected {} cameras", driver.path().display(), cameras);
    assert!(cameras >= 2);

    let camera = CameraId::Down;
    driver.set_width_height(camera, 1024, 1024);

    let now = Instant::now();
    let mut frame = Frame::new(1024, 1024)?;
    driver.read_async(camera, frame.as_slice_mut(), 1000);
    let png = frame.encode_png()?;
    let elapsed = now.elapsed();

    std::fs::write("camera.png", &png)?;

    println!(
        "saved camera.png resolution: {} size: {} elapsed: {:.2?}",
        frame,
        png.len(),
        elapsed
    );

    Ok(())
}
