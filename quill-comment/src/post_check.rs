//! Post existence check
//!
//! A comment may only be created against a post that exists right now.
//! The check is a single bounded call to the post service; an unreachable
//! post service is indistinguishable from a missing post for the caller,
//! so both surface as 404 rather than a generic 5xx.

use quill_common::{AppError, Result};
use std::time::Duration;

/// Client for the post service's read endpoint.
#[derive(Clone)]
pub struct PostClient {
    base_url: String,
    http: reqwest::Client,
}

impl PostClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build post HTTP client");

        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Fail with NotFound unless the post service confirms the post.
    pub async fn ensure_exists(&self, post_id: &str) -> Result<()> {
        let url = format!("{}/api/posts/{}", self.base_url, post_id);

        let confirmed = match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(post_id, error = %e, "Post existence check failed");
                false
            }
        };

        if confirmed {
            Ok(())
        } else {
            Err(AppError::NotFound("Post not found".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PostClient {
        PostClient::new(server.uri(), Duration::from_millis(250))
    }

    #[tokio::test]
    async fn test_existing_post_confirmed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/posts/post-1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(client_for(&server).ensure_exists("post-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).ensure_exists("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unreachable_post_service_is_not_found() {
        let client = PostClient::new("http://127.0.0.1:1", Duration::from_millis(250));
        let err = client.ensure_exists("post-1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_slow_post_service_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let err = client_for(&server).ensure_exists("post-1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
