use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::Preview;
use crate::domain::post::ports::MediaStore;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::Identity;
use crate::inbound::http::router::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    mut multipart: Multipart,
) -> Result<ApiSuccess<CreatePostResponseData>, ApiError> {
    let mut text = None;
    let mut link = None;
    let mut raw_files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "text" => {
                text = Some(field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?)
                    .filter(|t: &String| !t.is_empty());
            }
            "link" => {
                link = Some(field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?)
                    .filter(|l: &String| !l.is_empty());
            }
            "files" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                raw_files.push((content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    // Validate the mix before any upload touches the media store, so a
    // rejected request leaves no orphan files behind.
    CreatePostCommand::ensure_exactly_one(text.is_some(), !raw_files.is_empty(), link.is_some())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let mut stored_files = Vec::new();
    for (content_type, data) in raw_files {
        let path = state
            .media_store
            .store(identity.user_id, &content_type, data)
            .await
            .map_err(|e| ApiError::InternalServerError(e.to_string()))?;
        stored_files.push(path);
    }

    let files = if stored_files.is_empty() {
        None
    } else {
        Some(stored_files.join(", "))
    };

    let command = CreatePostCommand::new(text, files, link)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .post_service
        .create_post(command, identity.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePostResponseData {
    pub id: i64,
    pub text: Option<String>,
    pub files: Option<String>,
    pub link: Option<String>,
    pub preview: Option<Preview>,
    pub author_id: i64,
    pub like_count: i64,
}

impl From<&Post> for CreatePostResponseData {
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
