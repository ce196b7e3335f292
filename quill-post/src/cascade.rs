//! Best-effort comment cascade
//!
//! After a post is deleted, its comments live in a different service and
//! are cleaned up with a single at-most-once call. Failure here never
//! surfaces to the client that deleted the post: stale comments may
//! outlive their post, and no reconciliation job exists. The comment
//! service's delete-by-post endpoint is idempotent, so a later sweep
//! could reuse it without protocol changes.

use std::time::Duration;

/// Client for the comment service's delete-by-post endpoint.
#[derive(Clone)]
pub struct CascadeClient {
    base_url: String,
    http: reqwest::Client,
}

impl CascadeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build cascade HTTP client");

        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Ask the comment service to drop every comment of a deleted post.
    ///
    /// Timeouts, connection errors and upstream 5xx are logged and
    /// swallowed; the caller's delete response is already decided.
    pub async fn notify_post_deleted(&self, post_id: &str) {
        let url = format!("{}/api/comments/post/{}", self.base_url, post_id);

        match self.http.delete(&url).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(post_id, "Comment cascade completed");
            }
            Ok(response) => {
                tracing::warn!(
                    post_id,
                    status = %response.status(),
                    "Comment cascade rejected, leaving comments orphaned"
                );
            }
            Err(e) => {
                tracing::warn!(
                    post_id,
                    error = %e,
                    "Comment cascade failed, leaving comments orphaned"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_notify_hits_delete_by_post() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/comments/post/post-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        CascadeClient::new(server.uri(), Duration::from_millis(250))
            .notify_post_deleted("post-1")
            .await;
    }

    #[tokio::test]
    async fn test_notify_swallows_upstream_failure() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        // Must not panic or surface anything.
        CascadeClient::new(server.uri(), Duration::from_millis(250))
            .notify_post_deleted("post-1")
            .await;
    }

    #[tokio::test]
    async fn test_notify_swallows_unreachable_service() {
        CascadeClient::new("http://127.0.0.1:1", Duration::from_millis(250))
            .notify_post_deleted("post-1")
            .await;
    }
}
