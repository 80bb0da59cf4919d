#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use kennel_api::auth::jwt::{generate_access_token, JwtConfig};
use kennel_api::auth::password::hash_password;
use kennel_api::config::{LogFormat, ServerConfig};
use kennel_api::router::build_app_router;
use kennel_api::state::AppState;
use kennel_db::models::account::{Account, CreateAccount};
use kennel_db::repositories::AccountRepo;

pub const TEST_PASSWORD: &str = "secret-pass";

/// Build a test `ServerConfig` writing uploads into `upload_dir`.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        upload_dir,
        owner: None,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            secret: "test-jwt-secret".to_string(),
            expiry_days: 7,
        },
    }
}

/// The full router plus the temporary upload directory it writes into.
///
/// The directory is removed when the `TestApp` is dropped.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub uploads: TempDir,
}

impl TestApp {
    /// A fresh handle to the router (`oneshot` consumes it).
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Mint a token for `account` with the app's JWT settings.
    pub fn token_for(&self, account: &Account) -> String {
        generate_access_token(account.id, &self.config.jwt).expect("token generation")
    }

    /// Number of files currently in the upload directory.
    pub fn stored_uploads(&self) -> usize {
        std::fs::read_dir(self.uploads.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Build the production router (same middleware stack as `main.rs`) over
/// `pool` with a throwaway upload directory.
pub fn build_test_app(pool: SqlitePool) -> TestApp {
    let uploads = tempfile::tempdir().expect("create upload dir");
    let config = test_config(uploads.path().to_path_buf());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        config,
        uploads,
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Insert an account directly. Its password is [`TEST_PASSWORD`].
pub async fn create_account(pool: &SqlitePool, phone: &str, role: &str) -> Account {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    AccountRepo::create(
        pool,
        &CreateAccount {
            phone: phone.to_string(),
            password_hash,
            name: format!("Account {phone}"),
            role: role.to_string(),
        },
    )
    .await
    .expect("account creation should succeed")
}

/// An owner account and a bearer token for it.
pub async fn owner_with_token(test: &TestApp, pool: &SqlitePool, phone: &str) -> (Account, String) {
    let account = create_account(pool, phone, "owner").await;
    let token = test.token_for(&account);
    (account, token)
}

/// A buyer account and a bearer token for it.
pub async fn user_with_token(test: &TestApp, pool: &SqlitePool, phone: &str) -> (Account, String) {
    let account = create_account(pool, phone, "user").await;
    let token = test.token_for(&account);
    (account, token)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::GET, uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let req = request(Method::POST, uri, None)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    let req = request(Method::POST, uri, Some(token))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::PUT, uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::DELETE, uri, Some(token)).body(Body::empty()).unwrap()).await
}

/// Send a multipart form with `method`, authenticated when `token` is set.
pub async fn send_form(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    form: MultipartForm,
) -> Response {
    let (content_type, body) = form.finish();
    let req = request(method, uri, token)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "----kennel-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// A small fake JPEG under `name`.
    pub fn jpeg(self, name: &str, file_name: &str) -> Self {
        self.file(name, file_name, "image/jpeg", b"\xFF\xD8\xFF\xE0fake-jpeg")
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={BOUNDARY}"), self.body)
    }
}

/// The text fields of a valid puppy listing.
pub fn puppy_form(name: &str) -> MultipartForm {
    MultipartForm::new()
        .text("name", name)
        .text("breed", "Maltipoo")
        .text("age", "3")
        .text("gender", "female")
        .text("color", "Apricot")
        .text("price", "85000")
        .text("description", "Playful and fully vaccinated puppy.")
}

/// Create an available puppy through the API and return its JSON.
pub async fn create_puppy(test: &TestApp, token: &str, name: &str) -> serde_json::Value {
    let response = send_form(
        test.app(),
        Method::POST,
        "/api/puppies",
        Some(token),
        puppy_form(name).jpeg("images", "front.jpg"),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
