use criterion::{criterion_group, criterion_main, Criterion};
use neoden_camera::{
    camera::CameraId,
    driver::{CameraDriver, SimulatedDriver},
    image::Frame,
};

fn benchmark_png(frame: &Frame) {
    let _ = frame.encode_png().unwrap();
}

pub fn benchmark_encode(c: &mut Criterion) {
    let driver = SimulatedDriver::default();
    let mut group = c.benchmark_group("png");
    for dim in [(320, 240), (640, 480), (1024, 1024), (1280, 1024), (2048, 2048)].iter() {
        driver.set_width_height(CameraId::Down, dim.0, dim.1);
        let mut frame = Frame::new(dim.0, dim.1).unwrap();
        driver.read_async(CameraId::Down, frame.as_slice_mut(), 0);
        group.bench_with_input(format!("{}x{}", dim.0, dim.1), &frame, |b, frame| {
            b.iter(|| benchmark_png(frame))
        });
    }
}

criterion_group!(benches, benchmark_encode);
criterion_main!(benches);
