use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::post::errors::MediaError;
use crate::domain::post::ports::MediaStore;
use crate::domain::user::models::UserId;

/// Filesystem media store.
///
/// Picks the stored path up front and performs the actual write as a
/// detached task, so post creation never waits on disk. A failed write is
/// logged and the path stays dangling; the response has already named it.
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn store(
        &self,
        owner: UserId,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, MediaError> {
        let (subdir, extension) = if content_type.starts_with("image") {
            ("image", "png")
        } else {
            ("video", "mp4")
        };

        let directory = self.root.join(subdir);
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;

        let path = directory.join(format!("{}_{}.{}", owner, Uuid::new_v4(), extension));
        let stored_path = path.to_string_lossy().into_owned();

        tokio::spawn(async move {
            if let Err(e) = tokio::fs::write(&path, &data).await {
                tracing::error!(path = %path.display(), error = %e, "media write failed");
            }
        });

        Ok(stored_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_names_by_content_type() {
        let dir = std::env::temp_dir().join(format!("media-test-{}", Uuid::new_v4()));
        let store = FsMediaStore::new(&dir);

        let image_path = store
            .store(UserId(1), "image/png", b"png bytes".to_vec())
            .await
            .unwrap();
        let video_path = store
            .store(UserId(1), "video/mp4", b"mp4 bytes".to_vec())
            .await
            .unwrap();

        assert!(image_path.contains("image"));
        assert!(image_path.ends_with(".png"));
        assert!(video_path.contains("video"));
        assert!(video_path.ends_with(".mp4"));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
