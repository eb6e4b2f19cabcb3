use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::Identity;
use crate::inbound::http::router::AppState;

pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(post_id): Path<i64>,
) -> Result<ApiSuccess<ToggleLikeResponseData>, ApiError> {
    state
        .post_service
        .toggle_like(PostId(post_id), identity.user_id)
        .await
        .map_err(ApiError::from)
        .map(|like_count| {
            ApiSuccess::new(StatusCode::CREATED, ToggleLikeResponseData { like_count })
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleLikeResponseData {
    pub like_count: i64,
}
