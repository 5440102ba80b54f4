use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use barangay_portal_core::notifications::CountResult;
use barangay_portal_core::watermarks::NotificationModule;
use serde::Serialize;

use super::VIEWER_ID_HEADER;
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Serialize)]
struct MarkViewedResponse {
    success: bool,
}

fn viewer_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(VIEWER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

async fn get_notification_counts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<CountResult> {
    let counts = match viewer_id(&headers) {
        Some(id) => state.badge_service.get_notification_counts(&id),
        None => CountResult::degraded(),
    };
    Json(counts)
}

async fn mark_as_viewed(
    Path(module): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<MarkViewedResponse>> {
    let module = NotificationModule::from_str(&module)?;
    let id = viewer_id(&headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing viewer id".to_string()))?;
    let success = state.badge_service.mark_as_viewed(&id, module).await;
    Ok(Json(MarkViewedResponse { success }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications/counts", get(get_notification_counts))
        .route("/notifications/{module}/viewed", post(mark_as_viewed))
}
