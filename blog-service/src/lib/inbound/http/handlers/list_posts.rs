use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::PageRequest;
use crate::domain::post::models::Post;
use crate::domain::post::models::Preview;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> Result<ApiSuccess<ListPostsResponseData>, ApiError> {
    let page = PageRequest::new(
        params.page.unwrap_or(0),
        params.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
    );
    state
        .post_service
        .list_posts(page)
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            ApiSuccess::new(
                StatusCode::OK,
                ListPostsResponseData {
                    posts: posts.iter().map(PostData::from).collect(),
                },
            )
        })
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListPostsParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPostsResponseData {
    pub posts: Vec<PostData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostData {
    pub id: i64,
    pub text: Option<String>,
    pub files: Option<String>,
    pub link: Option<String>,
    pub preview: Option<Preview>,
    pub author_id: i64,
    pub like_count: i64,
}

impl From<&Post> for PostData {
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
