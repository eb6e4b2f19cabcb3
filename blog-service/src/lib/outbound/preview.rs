use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use scraper::Html;
use scraper::Selector;

use crate::domain::post::models::Preview;
use crate::domain::post::ports::MediaStore;
use crate::domain::post::ports::PreviewFetcher;
use crate::domain::user::models::UserId;

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Link preview fetcher backed by an HTTP client.
///
/// Pulls the page, reads `og:description` (falling back to the plain meta
/// description) and `og:image`, and stores the image through the media
/// store. Every failure mode degrades to `Preview::NotFound`; a dead link
/// must never fail the post creation it decorates.
pub struct HttpPreviewFetcher<MS>
where
    MS: MediaStore,
{
    client: reqwest::Client,
    media: Arc<MS>,
}

impl<MS> HttpPreviewFetcher<MS>
where
    MS: MediaStore,
{
    pub fn new(media: Arc<MS>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client, media })
    }

    /// Download the preview image and hand it to the media store.
    async fn fetch_image(&self, url: &str, owner: UserId) -> Option<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| tracing::warn!(url, error = %e, "preview image fetch failed"))
            .ok()?;

        if !response.status().is_success() {
            tracing::warn!(url, status = %response.status(), "preview image fetch failed");
            return None;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image")
            .to_string();
        let data = response.bytes().await.ok()?.to_vec();

        match self.media.store(owner, &content_type, data).await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(url, error = %e, "preview image store failed");
                None
            }
        }
    }
}

#[async_trait]
impl<MS> PreviewFetcher for HttpPreviewFetcher<MS>
where
    MS: MediaStore,
{
    async fn fetch(&self, link: &str, owner: UserId) -> Preview {
        if !link.starts_with("http") {
            tracing::warn!(link, "preview skipped: not an http(s) link");
            return Preview::NotFound;
        }

        let response = match self.client.get(link).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(link, error = %e, "preview fetch failed");
                return Preview::NotFound;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(link, status = %response.status(), "preview fetch failed");
            return Preview::NotFound;
        }

        let html = match response.text().await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(link, error = %e, "preview body unreadable");
                return Preview::NotFound;
            }
        };

        let (description, image_url) = parse_content(&html);

        let Some(description) = description else {
            return Preview::NotFound;
        };

        let file = match image_url.filter(|url| url.starts_with("http")) {
            Some(url) => self.fetch_image(&url, owner).await,
            None => None,
        };

        Preview::Found { description, file }
    }
}

/// Extract the description and image URL from page metadata.
///
/// Synchronous on purpose: the parsed document is not `Send` and must not
/// live across an await point.
fn parse_content(html: &str) -> (Option<String>, Option<String>) {
    let document = Html::parse_document(html);

    let description = meta_content(&document, r#"meta[property="og:description"]"#)
        .or_else(|| meta_content(&document, r#"meta[name="description"]"#));
    let image_url = meta_content(&document, r#"meta[property="og:image"]"#);

    (description, image_url)
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()?
        .value()
        .attr("content")
        .map(str::to_string)
}
