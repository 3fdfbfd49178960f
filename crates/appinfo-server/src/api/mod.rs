//! Application metadata API.
//!
//! - `GET /info` : git, build and uptime snapshot
//! - fallback    : JSON 404 for anything unrouted

use axum::{extract::State, http::Uri, Json};

use appinfo_core::error::AppInfoError;
use appinfo_core::InfoResponse;

use crate::app_state::AppState;
use crate::error::ApiError;

#[tracing::instrument(level = "debug", skip_all)]
pub async fn get_info(State(state): State<AppState>) -> Json<InfoResponse> {
    let info = state.info().get_info();
    tracing::debug!(uptime_secs = info.uptime.seconds, "info served");
    Json(info)
}

pub async fn not_found(uri: Uri) -> ApiError {
    AppInfoError::NotFound(uri.path().to_string()).into()
}
