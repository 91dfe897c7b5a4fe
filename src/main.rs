// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use neoden_camera::{
    args::Args,
    driver::{CameraDriver, NeodenDriver, SimulatedDriver},
    server::{router, AppState},
    startup::initialize_cameras,
};
use std::{error::Error, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, Layer};

fn init_tracing(args: &Args) -> Result<(), Box<dyn Error>> {
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let stdout_log = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(level);

    #[cfg(target_os = "linux")]
    let journald = match tracing_journald::layer() {
        Ok(layer) => Some(layer.with_filter(level)),
        Err(e) => {
            eprintln!("journald unavailable: {e}");
            None
        }
    };
    #[cfg(not(target_os = "linux"))]
    let journald: Option<tracing_subscriber::layer::Identity> = None;

    let console = args
        .tokio_console
        .then(console_subscriber::spawn::<tracing_subscriber::Registry>);

    let tracy = if args.tracy {
        tracy_client::Client::start();
        Some(tracing_tracy::TracyLayer::default().with_filter(level))
    } else {
        None
    };

    let subscriber = tracing_subscriber::registry()
        .with(console)
        .with(stdout_log)
        .with(journald)
        .with(tracy);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => warn!("unable to listen for shutdown signal: {e}"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(&args)?;
    info!("Neoden Camera HTTP Bridge");

    let driver: Arc<dyn CameraDriver> = if args.mock {
        info!("using simulated camera driver");
        Arc::new(SimulatedDriver::default())
    } else {
        let driver = NeodenDriver::new(args.driver_path())?;
        info!("loaded camera driver {}", driver.path().display());
        Arc::new(driver)
    };

    let cameras =
        match initialize_cameras(driver.clone(), args.startup_delay(), args.min_cameras).await {
            Ok(cameras) => cameras,
            Err(e) => {
                error!("{e}");
                return Err(e.into());
            }
        };

    let app = router(AppState::new(driver, cameras));
    let addr = args.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
