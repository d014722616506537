// Conditional feed fetcher.
// Sends cache validators from the previous run and treats 304 as "nothing new".

use std::time::Duration;

use reqwest::{
    Client, StatusCode,
    header::{
        ACCEPT, ETAG, HeaderMap, HeaderName, HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH,
        LAST_MODIFIED, USER_AGENT,
    },
};
use tracing::debug;

use crate::cache::CacheState;
use crate::error::{PulseError, Result};

use super::parser::parse_feed;
use super::types::Post;

const FEED_TIMEOUT: Duration = Duration::from_secs(15);
const FEED_ACCEPT: &str =
    "application/rss+xml, application/atom+xml, application/xml;q=0.9, */*;q=0.8";
const FEED_USER_AGENT: &str = concat!("readme-pulse/", env!("CARGO_PKG_VERSION"));

/// Outcome of a conditional feed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFetch {
    /// Host answered 304; the rendered block must be left alone.
    Unchanged,
    /// Complete posts, capped to the requested count.
    Fetched(Vec<Post>),
}

/// HTTP client for syndication feeds.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(FEED_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(FEED_ACCEPT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(FEED_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch `url`, updating the validators in `state` on a 200 response.
    pub async fn fetch(
        &self,
        url: &str,
        max_items: usize,
        state: &mut CacheState,
    ) -> Result<FeedFetch> {
        let mut request = self.client.get(url);
        if let Some(etag) = &state.rss_etag {
            request = request.header(IF_NONE_MATCH, HeaderValue::from_str(etag)?);
        }
        if let Some(last_modified) = &state.rss_last_modified {
            request = request.header(IF_MODIFIED_SINCE, HeaderValue::from_str(last_modified)?);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_MODIFIED => {
                debug!(url, "feed not modified");
                return Ok(FeedFetch::Unchanged);
            }
            status => {
                return Err(PulseError::Status {
                    what: "feed",
                    status: status.as_u16(),
                    body: response.text().await.unwrap_or_default(),
                });
            }
        }

        if let Some(etag) = header_string(response.headers(), ETAG) {
            state.rss_etag = Some(etag);
        }
        if let Some(last_modified) = header_string(response.headers(), LAST_MODIFIED) {
            state.rss_last_modified = Some(last_modified);
        }

        let body = response.bytes().await?;
        let posts: Vec<Post> = parse_feed(&body)?
            .into_iter()
            .filter(Post::is_complete)
            .take(max_items)
            .collect();

        debug!(url, count = posts.len(), "feed fetched");
        Ok(FeedFetch::Fetched(posts))
    }
}

fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{SAMPLE_RSS, serve};
    use axum::{
        Router,
        http::{HeaderMap as AxumHeaders, StatusCode as AxumStatus, header},
        response::{IntoResponse, Response},
        routing::get,
    };

    const ETAG_VALUE: &str = "\"v1\"";
    const LAST_MODIFIED_VALUE: &str = "Sat, 18 Oct 2025 16:58:12 GMT";

    async fn conditional_feed(headers: AxumHeaders) -> Response {
        let fresh = headers
            .get(header::IF_NONE_MATCH)
            .is_some_and(|v| v == ETAG_VALUE);
        if fresh {
            return AxumStatus::NOT_MODIFIED.into_response();
        }
        (
            [
                (header::ETAG, ETAG_VALUE),
                (header::LAST_MODIFIED, LAST_MODIFIED_VALUE),
                (header::CONTENT_TYPE, "application/rss+xml"),
            ],
            SAMPLE_RSS,
        )
            .into_response()
    }

    async fn feed_server() -> String {
        let router = Router::new()
            .route("/rss", get(conditional_feed))
            .route("/broken", get(|| async { AxumStatus::BAD_GATEWAY }));
        serve(router).await
    }

    #[tokio::test]
    async fn test_fetch_filters_caps_and_records_validators() {
        let base = feed_server().await;
        let client = FeedClient::new().unwrap();
        let mut state = CacheState::default();

        let outcome = client
            .fetch(&format!("{base}/rss"), 2, &mut state)
            .await
            .unwrap();

        let FeedFetch::Fetched(posts) = outcome else {
            panic!("expected posts, got {outcome:?}");
        };
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Shipping a tiny CLI");
        assert_eq!(posts[1].title, "Notes on feeds");
        assert_eq!(state.rss_etag.as_deref(), Some(ETAG_VALUE));
        assert_eq!(state.rss_last_modified.as_deref(), Some(LAST_MODIFIED_VALUE));
    }

    #[tokio::test]
    async fn test_not_modified_is_unchanged() {
        let base = feed_server().await;
        let client = FeedClient::new().unwrap();
        let mut state = CacheState {
            rss_etag: Some(ETAG_VALUE.to_string()),
            ..Default::default()
        };
        let before = state.clone();

        let outcome = client
            .fetch(&format!("{base}/rss"), 5, &mut state)
            .await
            .unwrap();

        assert_eq!(outcome, FeedFetch::Unchanged);
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn test_error_status_fails() {
        let base = feed_server().await;
        let client = FeedClient::new().unwrap();
        let mut state = CacheState::default();

        let err = client
            .fetch(&format!("{base}/broken"), 5, &mut state)
            .await
            .unwrap_err();

        assert!(matches!(err, PulseError::Status { status: 502, .. }));
        assert_eq!(state, CacheState::default());
    }
}
