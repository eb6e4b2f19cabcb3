use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::LikeLedger;
use crate::domain::user::models::UserId;

/// Postgres like ledger.
///
/// The whole toggle runs in one transaction under a `FOR UPDATE` lock on
/// the post row, so all toggles on a post serialize and the cached counter
/// equals the membership cardinality at every commit. The composite primary
/// key on (user_id, post_id) backstops the membership check.
pub struct PostgresLikeLedger {
    pool: PgPool,
}

impl PostgresLikeLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeLedger for PostgresLikeLedger {
    async fn toggle(&self, user_id: UserId, post_id: PostId) -> Result<i64, PostError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let locked_post: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT id FROM posts WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(post_id.0)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        if locked_post.is_none() {
            return Err(PostError::NotFound(post_id.0));
        }

        let liked: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id.0)
        .bind(post_id.0)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let like_count: i64 = if liked.is_some() {
            sqlx::query(
                r#"
                DELETE FROM likes WHERE user_id = $1 AND post_id = $2
                "#,
            )
            .bind(user_id.0)
            .bind(post_id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

            sqlx::query_scalar(
                r#"
                UPDATE posts SET like_count = like_count - 1 WHERE id = $1 RETURNING like_count
                "#,
            )
            .bind(post_id.0)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?
        } else {
            sqlx::query(
                r#"
                INSERT INTO likes (user_id, post_id) VALUES ($1, $2)
                "#,
            )
            .bind(user_id.0)
            .bind(post_id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

            sqlx::query_scalar(
                r#"
                UPDATE posts SET like_count = like_count + 1 WHERE id = $1 RETURNING like_count
                "#,
            )
            .bind(post_id.0)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?
        };

        tx.commit()
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(like_count)
    }
}
