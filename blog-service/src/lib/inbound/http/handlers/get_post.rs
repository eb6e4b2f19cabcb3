use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::Preview;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<ApiSuccess<GetPostResponseData>, ApiError> {
    state
        .post_service
        .get_post(PostId(post_id))
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetPostResponseData {
    pub id: i64,
    pub text: Option<String>,
    pub files: Option<String>,
    pub link: Option<String>,
    pub preview: Option<Preview>,
    pub author_id: i64,
    pub like_count: i64,
}

impl From<&Post> for GetPostResponseData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.0,
            text: post.text.clone(),
            files: post.files.clone(),
            link: post.link.clone(),
            preview: post.preview.clone(),
            author_id: post.author_id.0,
            like_count: post.like_count,
        }
    }
}
