// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! HTTP routes for the camera bridge.
//!
//! Every camera route lives under `/cameras/{camera_id}/` and maps onto a
//! single driver call. Routes match only when all of their query parameters
//! are present; a present but malformed integer is passed to the driver as
//! `0`. Driver return codes are logged and never reach the client.

use crate::{
    camera::{CameraId, InvalidCamera},
    driver::CameraDriver,
    image::{Frame, FrameError},
};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use std::{collections::HashMap, sync::Arc};
use tokio::task::JoinError;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Cache-Control value sent with every captured frame.
pub const NO_CACHE: &str = "no-store, no-cache, must-revalidate, post-check=0, pre-check=0";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidCamera(#[from] InvalidCamera),
    #[error("404 page not found")]
    MissingParameter(&'static str),
    #[error("404 page not found")]
    NotFound,
    #[error("Invalid frame size")]
    Frame(#[from] FrameError),
    #[error("Error encoding PNG")]
    Encode(#[from] ::image::ImageError),
    #[error("Driver call failed")]
    Driver(#[from] JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error bodies are plain text terminated by a newline, as written by Go's
/// `http.Error`, which existing clients of the camera service expect.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::MissingParameter(name) => debug!("missing query parameter {}", name),
            ApiError::NotFound => debug!("no route"),
            ApiError::InvalidCamera(_) => debug!("{}", self),
            ApiError::Frame(e) => error!("{}", e),
            ApiError::Encode(e) => error!("Error encoding PNG: {}", e),
            ApiError::Driver(e) => error!("driver call did not complete: {}", e),
        }
        let headers = [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ];
        (self.status(), headers, format!("{self}\n")).into_response()
    }
}

/// Shared handler state: the driver handle and the detected camera count.
#[derive(Clone)]
pub struct AppState {
    driver: Arc<dyn CameraDriver>,
    detected: i32,
}

impl AppState {
    pub fn new(driver: Arc<dyn CameraDriver>, detected: i32) -> Self {
        Self { driver, detected }
    }

    /// Runs a driver call on the blocking pool.
    async fn call<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn CameraDriver) -> T + Send + 'static,
    {
        let driver = self.driver.clone();
        Ok(tokio::task::spawn_blocking(move || f(driver.as_ref())).await?)
    }
}

/// Query string of a camera request.
struct Params(HashMap<String, String>);

impl Params {
    /// Integer value of `name`, `0` when it does not parse.
    fn int(&self, name: &'static str) -> Result<i32, ApiError> {
        self.0
            .get(name)
            .map(|v| v.parse().unwrap_or(0))
            .ok_or(ApiError::MissingParameter(name))
    }
}

/// Builds the bridge router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/cameras", get(list_cameras))
        .route(
            "/cameras/{camera_id}/imgSetWidthHeight",
            any(img_set_width_height),
        )
        .route("/cameras/{camera_id}/imgReadAsy", any(img_read_asy))
        .route("/cameras/{camera_id}/imgLed", any(img_led))
        .route("/cameras/{camera_id}/imgReset", any(img_reset))
        .route("/cameras/{camera_id}/imgSetExposure", any(img_set_exposure))
        .route("/cameras/{camera_id}/imgSetGain", any(img_set_gain))
        .route("/cameras/{camera_id}/imgSetLt", any(img_set_lt))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn list_cameras(State(state): State<AppState>) -> Json<Value> {
    let cameras: Vec<Value> = CameraId::ALL
        .iter()
        .map(|c| json!({ "id": c, "facing": c.facing() }))
        .collect();
    Json(json!({ "detected": state.detected, "cameras": cameras }))
}

/// `imgSetWidthHeight?width=&height=`
async fn img_set_width_height(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<StatusCode, ApiError> {
    let params = Params(params);
    let (width, height) = (params.int("width")?, params.int("height")?);
    let camera: CameraId = camera_id.parse()?;

    info!(
        "imgSetWidthHeight camera:{} width:{} height:{}",
        camera, width, height
    );
    let ret = state
        .call(move |d| d.set_width_height(camera, width, height))
        .await?;
    debug!("img_set_wh returned {}", ret);
    Ok(StatusCode::OK)
}

/// `imgReadAsy?width=&height=&timeout=`
///
/// Captures one frame and returns it as a grayscale PNG.
async fn img_read_asy(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let params = Params(params);
    let (width, height, timeout) = (
        params.int("width")?,
        params.int("height")?,
        params.int("timeout")?,
    );
    let camera: CameraId = camera_id.parse()?;

    info!(
        "imgReadAsy camera:{} width:{} height:{} timeout:{}",
        camera, width, height, timeout
    );
    let mut frame = Frame::new(width, height)?;
    let (ret, png) = state
        .call(move |d| {
            let ret = d.read_async(camera, frame.as_slice_mut(), timeout);
            (ret, frame.encode_png())
        })
        .await?;
    debug!("img_readAsy returned {}", ret);
    let png = png?;

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (header::LAST_MODIFIED, http_date(chrono::Utc::now())),
        (header::CACHE_CONTROL, NO_CACHE.to_string()),
        (header::PRAGMA, "no-cache".to_string()),
    ];
    Ok((headers, png).into_response())
}

/// `imgLed?mode=`
async fn img_led(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<StatusCode, ApiError> {
    let mode = Params(params).int("mode")?;
    let camera: CameraId = camera_id.parse()?;

    info!("imgLed camera:{} mode:{}", camera, mode);
    let ret = state.call(move |d| d.led(camera, mode)).await?;
    debug!("img_led returned {}", ret);
    Ok(StatusCode::OK)
}

/// `imgReset`
async fn img_reset(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let camera: CameraId = camera_id.parse()?;

    info!("imgReset camera:{}", camera);
    let ret = state.call(move |d| d.reset(camera)).await?;
    debug!("img_reset returned {}", ret);
    Ok(StatusCode::OK)
}

/// `imgSetExposure?exposure=`
async fn img_set_exposure(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<StatusCode, ApiError> {
    let exposure = Params(params).int("exposure")?;
    let camera: CameraId = camera_id.parse()?;

    info!("imgSetExposure camera:{} exposure:{}", camera, exposure);
    let ret = state
        .call(move |d| d.set_exposure(camera, exposure))
        .await?;
    debug!("img_set_exp returned {}", ret);
    Ok(StatusCode::OK)
}

/// `imgSetGain?gain=`
async fn img_set_gain(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<StatusCode, ApiError> {
    let gain = Params(params).int("gain")?;
    let camera: CameraId = camera_id.parse()?;

    info!("imgSetGain camera:{} gain:{}", camera, gain);
    let ret = state.call(move |d| d.set_gain(camera, gain)).await?;
    debug!("img_set_gain returned {}", ret);
    Ok(StatusCode::OK)
}

/// `imgSetLt?a2=&a3=`
async fn img_set_lt(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<StatusCode, ApiError> {
    let params = Params(params);
    let (a2, a3) = (params.int("a2")?, params.int("a3")?);
    let camera: CameraId = camera_id.parse()?;

    info!("imgSetLt camera:{} a2:{} a3:{}", camera, a2, a3);
    let ret = state.call(move |d| d.set_lt(camera, a2, a3)).await?;
    debug!("img_set_lt returned {}", ret);
    Ok(StatusCode::OK)
}

/// Formats `t` as an RFC 7231 HTTP date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn http_date(t: chrono::DateTime<chrono::Utc>) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
