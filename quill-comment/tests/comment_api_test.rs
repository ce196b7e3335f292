//! Comment API integration tests
//!
//! The identity and post services are played by wiremock. Cancellation
//! model under test: bounded timeouts only; client disconnects are not
//! propagated to upstream calls.

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use quill_comment::post_check::PostClient;
use quill_comment::repository::MemoryCommentRepository;
use quill_comment::server::{build_router, AppState};
use quill_common::VerifyClient;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_millis(250);

struct TestApp {
    router: Router,
    auth: MockServer,
    posts: MockServer,
}

impl TestApp {
    async fn spawn() -> Self {
        let auth = MockServer::start().await;
        let posts = MockServer::start().await;

        let state = AppState {
            verifier: VerifyClient::new(auth.uri(), TIMEOUT),
            posts: PostClient::new(posts.uri(), TIMEOUT),
            comments: Arc::new(MemoryCommentRepository::new()),
        };

        Self {
            router: build_router(state),
            auth,
            posts,
        }
    }

    async fn allow_token(&self, token: &str, id: &str, username: &str) {
        Mock::given(method("GET"))
            .and(path("/api/auth/verify"))
            .and(header("x-auth-token", token))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "isValid": true,
                "user": {
                    "id": id,
                    "username": username,
                    "email": format!("{username}@example.com"),
                }
            })))
            .mount(&self.auth)
            .await;
    }

    async fn post_exists(&self, post_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/posts/{post_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": post_id })))
            .mount(&self.posts)
            .await;
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_comment(&self, token: &str, post_id: &str, content: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                "/api/comments",
                Some(token),
                Some(json!({ "content": content, "postId": post_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;
    let (status, body) = app.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Comment service is running");
}

#[tokio::test]
async fn test_create_without_token() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .request(
            "POST",
            "/api/comments",
            None,
            Some(json!({ "content": "c", "postId": "post-1" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token, authorization denied");
}

#[tokio::test]
async fn test_create_checks_post_existence() {
    let app = TestApp::spawn().await;
    app.allow_token("ada-token", "user-1", "ada").await;
    app.post_exists("post-1").await;

    let created = app.create_comment("ada-token", "post-1", "Nice post").await;
    assert_eq!(created["postId"], "post-1");
    assert_eq!(created["ownerId"], "user-1");
    assert_eq!(created["author"], "ada");
}

#[tokio::test]
async fn test_create_against_missing_post() {
    let app = TestApp::spawn().await;
    app.allow_token("ada-token", "user-1", "ada").await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.posts)
        .await;

    let (status, body) = app
        .request(
            "POST",
            "/api/comments",
            Some("ada-token"),
            Some(json!({ "content": "c", "postId": "missing" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found");
}

#[tokio::test]
async fn test_create_with_unreachable_post_service_is_not_found() {
    // UpstreamUnavailable on the existence check surfaces as the most
    // specific client error, not a 5xx.
    let app = TestApp::spawn().await;
    app.allow_token("ada-token", "user-1", "ada").await;

    let state = AppState {
        verifier: VerifyClient::new(app.auth.uri(), TIMEOUT),
        posts: PostClient::new("http://127.0.0.1:1", TIMEOUT),
        comments: Arc::new(MemoryCommentRepository::new()),
    };
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/comments")
                .header("x-auth-token", "ada-token")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "content": "c", "postId": "post-1" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_by_post_is_public() {
    let app = TestApp::spawn().await;
    app.allow_token("ada-token", "user-1", "ada").await;
    app.post_exists("post-1").await;

    app.create_comment("ada-token", "post-1", "first").await;
    app.create_comment("ada-token", "post-1", "second").await;

    let (status, comments) = app
        .request("GET", "/api/comments/post/post-1", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let contents: Vec<&str> = comments
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["second", "first"]);

    let (status, empty) = app
        .request("GET", "/api/comments/post/other", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!([]));
}

#[tokio::test]
async fn test_update_owner_gates() {
    let app = TestApp::spawn().await;
    app.allow_token("ada-token", "user-1", "ada").await;
    app.allow_token("bob-token", "user-2", "bob").await;
    app.post_exists("post-1").await;

    let created = app.create_comment("ada-token", "post-1", "Original").await;
    let id = created["id"].as_str().unwrap();

    // Non-owner forbidden, comment unchanged.
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/comments/{id}"),
            Some("bob-token"),
            Some(json!({ "content": "Hijacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User not authorized to update this comment");

    // Owner updates.
    let (status, updated) = app
        .request(
            "PUT",
            &format!("/api/comments/{id}"),
            Some("ada-token"),
            Some(json!({ "content": "Edited" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], "Edited");
}

#[tokio::test]
async fn test_update_missing_comment_outranks_ownership() {
    let app = TestApp::spawn().await;
    app.allow_token("bob-token", "user-2", "bob").await;

    let (status, body) = app
        .request(
            "PUT",
            "/api/comments/missing",
            Some("bob-token"),
            Some(json!({ "content": "X" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Comment not found");
}

#[tokio::test]
async fn test_delete_comment() {
    let app = TestApp::spawn().await;
    app.allow_token("ada-token", "user-1", "ada").await;
    app.post_exists("post-1").await;

    let created = app.create_comment("ada-token", "post-1", "c").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app
        .request(
            "DELETE",
            &format!("/api/comments/{id}"),
            Some("ada-token"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Comment deleted successfully");

    let (_, comments) = app
        .request("GET", "/api/comments/post/post-1", None, None)
        .await;
    assert_eq!(comments, json!([]));
}

#[tokio::test]
async fn test_delete_by_post_is_idempotent_cascade_target() {
    let app = TestApp::spawn().await;
    app.allow_token("ada-token", "user-1", "ada").await;
    app.post_exists("post-1").await;
    app.post_exists("post-2").await;

    app.create_comment("ada-token", "post-1", "a").await;
    app.create_comment("ada-token", "post-1", "b").await;
    app.create_comment("ada-token", "post-2", "keep").await;

    // No token required: this is the internal cascade surface.
    let (status, body) = app
        .request("DELETE", "/api/comments/post/post-1", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Comments deleted successfully");

    let (_, gone) = app
        .request("GET", "/api/comments/post/post-1", None, None)
        .await;
    assert_eq!(gone, json!([]));

    let (_, kept) = app
        .request("GET", "/api/comments/post/post-2", None, None)
        .await;
    assert_eq!(kept.as_array().unwrap().len(), 1);

    // Deleting again (zero matches) is still success.
    let (status, _) = app
        .request("DELETE", "/api/comments/post/post-1", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
}
