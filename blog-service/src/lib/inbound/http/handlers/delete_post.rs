use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::Identity;
use crate::inbound::http::router::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .post_service
        .delete_post(PostId(post_id), identity.user_id)
        .await
        .map_err(ApiError::from)?;

    // 204 carries no body, so no response envelope here.
    Ok(StatusCode::NO_CONTENT)
}
