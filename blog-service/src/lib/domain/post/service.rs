use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::PageRequest;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::LikeLedger;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::post::ports::PreviewFetcher;
use crate::domain::user::models::UserId;

/// Domain service for the post feed and like toggling.
///
/// The repository owns post rows, the ledger owns like membership and the
/// cached counter; this service only orchestrates.
pub struct PostService<PR, LL, PF>
where
    PR: PostRepository,
    LL: LikeLedger,
    PF: PreviewFetcher,
{
    repository: Arc<PR>,
    like_ledger: Arc<LL>,
    preview_fetcher: Arc<PF>,
}

impl<PR, LL, PF> PostService<PR, LL, PF>
where
    PR: PostRepository,
    LL: LikeLedger,
    PF: PreviewFetcher,
{
    pub fn new(repository: Arc<PR>, like_ledger: Arc<LL>, preview_fetcher: Arc<PF>) -> Self {
        Self {
            repository,
            like_ledger,
            preview_fetcher,
        }
    }
}

#[async_trait]
impl<PR, LL, PF> PostServicePort for PostService<PR, LL, PF>
where
    PR: PostRepository,
    LL: LikeLedger,
    PF: PreviewFetcher,
{
    async fn create_post(
        &self,
        command: CreatePostCommand,
        author_id: UserId,
    ) -> Result<Post, PostError> {
        // Best-effort: the fetcher degrades to the NotFound sentinel on its
        // own, so a dead link still produces a post.
        let preview = match command.link.as_deref() {
            Some(link) => Some(self.preview_fetcher.fetch(link, author_id).await),
            None => None,
        };

        let post = self
            .repository
            .create(NewPost {
                text: command.text,
                files: command.files,
                link: command.link,
                preview,
                author_id,
            })
            .await?;

        tracing::debug!(post_id = %post.id, author_id = %author_id, "post created");
        Ok(post)
    }

    async fn get_post(&self, id: PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.0))
    }

    async fn list_posts(&self, page: PageRequest) -> Result<Vec<Post>, PostError> {
        self.repository.list(page).await
    }

    async fn delete_post(&self, id: PostId, requester_id: UserId) -> Result<(), PostError> {
        let post = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.0))?;

        if post.author_id != requester_id {
            return Err(PostError::Forbidden);
        }

        // Like rows go with the post via the FK cascade.
        self.repository.delete(id).await
    }

    async fn toggle_like(&self, post_id: PostId, user_id: UserId) -> Result<i64, PostError> {
        self.like_ledger.toggle(user_id, post_id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::post::models::Preview;

    mock! {
        pub TestPostRepository {}

        #[async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(&self, post: NewPost) -> Result<Post, PostError>;
            async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;
            async fn list(&self, page: PageRequest) -> Result<Vec<Post>, PostError>;
            async fn delete(&self, id: PostId) -> Result<(), PostError>;
        }
    }

    mock! {
        pub TestLikeLedger {}

        #[async_trait]
        impl LikeLedger for TestLikeLedger {
            async fn toggle(&self, user_id: UserId, post_id: PostId) -> Result<i64, PostError>;
        }
    }

    mock! {
        pub TestPreviewFetcher {}

        #[async_trait]
        impl PreviewFetcher for TestPreviewFetcher {
            async fn fetch(&self, link: &str, owner: UserId) -> Preview;
        }
    }

    fn stored(new_post: NewPost, id: i64) -> Post {
        Post {
            id: PostId(id),
            text: new_post.text,
            files: new_post.files,
            link: new_post.link,
            preview: new_post.preview,
            author_id: new_post.author_id,
            like_count: 0,
        }
    }

    fn service(
        repository: MockTestPostRepository,
        ledger: MockTestLikeLedger,
        fetcher: MockTestPreviewFetcher,
    ) -> PostService<MockTestPostRepository, MockTestLikeLedger, MockTestPreviewFetcher> {
        PostService::new(Arc::new(repository), Arc::new(ledger), Arc::new(fetcher))
    }

    #[tokio::test]
    async fn test_text_post_skips_preview() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_create()
            .withf(|p| p.text.as_deref() == Some("hello") && p.preview.is_none())
            .times(1)
            .returning(|p| Ok(stored(p, 1)));

        let mut fetcher = MockTestPreviewFetcher::new();
        fetcher.expect_fetch().times(0);

        let service = service(repository, MockTestLikeLedger::new(), fetcher);
        let command = CreatePostCommand::new(Some("hello".into()), None, None).unwrap();

        let post = service.create_post(command, UserId(1)).await.unwrap();
        assert_eq!(post.like_count, 0);
        assert_eq!(post.author_id, UserId(1));
    }

    #[tokio::test]
    async fn test_link_post_gets_preview() {
        let mut fetcher = MockTestPreviewFetcher::new();
        fetcher
            .expect_fetch()
            .with(eq("https://example.com"), eq(UserId(7)))
            .times(1)
            .returning(|_, _| Preview::Found {
                description: "an example".to_string(),
                file: Some("media/image/7_x.png".to_string()),
            });

        let mut repository = MockTestPostRepository::new();
        repository
            .expect_create()
            .withf(|p| matches!(p.preview, Some(Preview::Found { .. })))
            .times(1)
            .returning(|p| Ok(stored(p, 2)));

        let service = service(repository, MockTestLikeLedger::new(), fetcher);
        let command =
            CreatePostCommand::new(None, None, Some("https://example.com".into())).unwrap();

        let post = service.create_post(command, UserId(7)).await.unwrap();
        assert!(matches!(post.preview, Some(Preview::Found { .. })));
    }

    #[tokio::test]
    async fn test_dead_link_still_creates_post() {
        let mut fetcher = MockTestPreviewFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_, _| Preview::NotFound);

        let mut repository = MockTestPostRepository::new();
        repository
            .expect_create()
            .withf(|p| p.preview == Some(Preview::NotFound))
            .times(1)
            .returning(|p| Ok(stored(p, 3)));

        let service = service(repository, MockTestLikeLedger::new(), fetcher);
        let command = CreatePostCommand::new(None, None, Some("https://gone".into())).unwrap();

        assert!(service.create_post(command, UserId(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(
            repository,
            MockTestLikeLedger::new(),
            MockTestPreviewFetcher::new(),
        );

        let result = service.get_post(PostId(42)).await;
        assert!(matches!(result, Err(PostError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_by_non_author_is_forbidden() {
        let mut repository = MockTestPostRepository::new();
        repository.expect_find_by_id().times(1).returning(|id| {
            Ok(Some(Post {
                id,
                text: Some("mine".into()),
                files: None,
                link: None,
                preview: None,
                author_id: UserId(1),
                like_count: 0,
            }))
        });
        repository.expect_delete().times(0);

        let service = service(
            repository,
            MockTestLikeLedger::new(),
            MockTestPreviewFetcher::new(),
        );

        let result = service.delete_post(PostId(1), UserId(2)).await;
        assert!(matches!(result, Err(PostError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_by_author_succeeds() {
        let mut repository = MockTestPostRepository::new();
        repository.expect_find_by_id().times(1).returning(|id| {
            Ok(Some(Post {
                id,
                text: Some("mine".into()),
                files: None,
                link: None,
                preview: None,
                author_id: UserId(1),
                like_count: 3,
            }))
        });
        repository
            .expect_delete()
            .with(eq(PostId(1)))
            .times(1)
            .returning(|_| Ok(()));

        let service = service(
            repository,
            MockTestLikeLedger::new(),
            MockTestPreviewFetcher::new(),
        );

        assert!(service.delete_post(PostId(1), UserId(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_toggle_like_delegates_to_ledger() {
        let mut ledger = MockTestLikeLedger::new();
        let mut toggle_count = 0;
        ledger
            .expect_toggle()
            .with(eq(UserId(1)), eq(PostId(9)))
            .times(2)
            .returning(move |_, _| {
                toggle_count += 1;
                Ok(if toggle_count % 2 == 1 { 1 } else { 0 })
            });

        let service = service(
            MockTestPostRepository::new(),
            ledger,
            MockTestPreviewFetcher::new(),
        );

        // Two toggles return the count to its starting value.
        assert_eq!(service.toggle_like(PostId(9), UserId(1)).await.unwrap(), 1);
        assert_eq!(service.toggle_like(PostId(9), UserId(1)).await.unwrap(), 0);
    }
}
