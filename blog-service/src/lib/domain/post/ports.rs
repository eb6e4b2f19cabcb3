use async_trait::async_trait;

use crate::domain::post::errors::MediaError;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::PageRequest;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::Preview;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post for an authenticated author.
    ///
    /// A link post gets a best-effort preview; preview failure never fails
    /// creation.
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn create_post(
        &self,
        command: CreatePostCommand,
        author_id: UserId,
    ) -> Result<Post, PostError>;

    /// Retrieve a single post.
    ///
    /// # Errors
    /// * `NotFound` - post does not exist
    /// * `DatabaseError` - storage operation failed
    async fn get_post(&self, id: PostId) -> Result<Post, PostError>;

    /// Page through the feed in insertion order.
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn list_posts(&self, page: PageRequest) -> Result<Vec<Post>, PostError>;

    /// Delete a post; only its author may.
    ///
    /// # Errors
    /// * `NotFound` - post does not exist
    /// * `Forbidden` - requester is not the author
    /// * `DatabaseError` - storage operation failed
    async fn delete_post(&self, id: PostId, requester_id: UserId) -> Result<(), PostError>;

    /// Toggle the requester's like on a post, returning the new count.
    ///
    /// # Errors
    /// * `NotFound` - post does not exist
    /// * `DatabaseError` - storage operation failed
    async fn toggle_like(&self, post_id: PostId, user_id: UserId) -> Result<i64, PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post with an initial like count of zero.
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn create(&self, post: NewPost) -> Result<Post, PostError>;

    /// Retrieve a post by identifier (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Retrieve a page of posts in id order.
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn list(&self, page: PageRequest) -> Result<Vec<Post>, PostError>;

    /// Remove a post; dependent like rows cascade in storage.
    ///
    /// # Errors
    /// * `NotFound` - post does not exist
    /// * `DatabaseError` - storage operation failed
    async fn delete(&self, id: PostId) -> Result<(), PostError>;
}

/// The like ledger: membership set plus the cached counter it backs.
#[async_trait]
pub trait LikeLedger: Send + Sync + 'static {
    /// Atomically flip the (user, post) membership and adjust the counter.
    ///
    /// Insert-and-increment when absent, remove-and-decrement when present,
    /// as one unit: concurrent toggles on the same post serialize, and the
    /// counter always equals the membership cardinality at commit.
    ///
    /// # Returns
    /// The post's like count after the toggle.
    ///
    /// # Errors
    /// * `NotFound` - post does not exist
    /// * `DatabaseError` - storage operation failed
    async fn toggle(&self, user_id: UserId, post_id: PostId) -> Result<i64, PostError>;
}

/// Best-effort link preview scraping.
#[async_trait]
pub trait PreviewFetcher: Send + Sync + 'static {
    /// Fetch and parse a preview for `link` on behalf of `owner`.
    ///
    /// Infallible by contract: every failure mode degrades to
    /// `Preview::NotFound` and is logged inside the implementation.
    async fn fetch(&self, link: &str, owner: UserId) -> Preview;
}

/// Storage for uploaded and scraped media files.
#[async_trait]
pub trait MediaStore: Send + Sync + 'static {
    /// Pick a stored path for the payload and schedule the write.
    ///
    /// The write itself happens in the background; a failure there is
    /// logged and never reaches the caller.
    ///
    /// # Returns
    /// The path the file will live at.
    ///
    /// # Errors
    /// * `Io` - the destination could not be prepared
    async fn store(
        &self,
        owner: UserId,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, MediaError>;
}
