#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use landing_api::config::ServerConfig;
use landing_api::router::build_app_router;
use landing_api::state::AppState;
use landing_db::models::client::{Client, CreateClient};
use landing_db::models::contact::{Contact, CreateContact};
use landing_db::models::project::{CreateProject, Project};
use landing_db::models::subscriber::{CreateSubscriber, Subscriber};
use landing_db::{MemoryStore, Store};
use landing_pipeline::{UploadConfig, UploadStorage};
use tempfile::TempDir;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(uploads_dir: &Path, staging_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        uploads_dir: uploads_dir.to_path_buf(),
        staging_dir: staging_dir.to_path_buf(),
        max_upload_bytes: 10 * 1024 * 1024,
    }
}

/// A router wired to its own upload directory and document store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn Store>,
    pub uploads_dir: PathBuf,
    pub staging_dir: PathBuf,
    _tmp: TempDir,
}

impl TestApp {
    /// A fresh handle on the router; `oneshot` consumes it.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Every file currently in the upload directory, sorted.
    pub fn upload_files(&self) -> Vec<String> {
        file_names(&self.uploads_dir)
    }

    /// Every raw upload still in the staging directory, sorted.
    pub fn staged_files(&self) -> Vec<String> {
        file_names(&self.staging_dir)
    }

    /// Wait for detached cleanup tasks to leave exactly `expected` behind
    /// and nothing in staging.
    pub async fn wait_for_uploads(&self, expected: &[String]) {
        for _ in 0..200 {
            if self.upload_files() == expected && self.staged_files().is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(self.upload_files(), expected);
        assert_eq!(self.staged_files(), Vec::<String>::new());
    }

    /// Resolve a stored `uploads/...` path to the file on disk.
    pub fn stored_file(&self, relative_path: &str) -> PathBuf {
        let name = relative_path
            .strip_prefix("uploads/")
            .unwrap_or_else(|| panic!("unexpected stored path {relative_path}"));
        self.uploads_dir.join(name)
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Build the full application router over an in-memory store.
pub async fn build_test_app() -> TestApp {
    build_test_app_with_store(Arc::new(MemoryStore::new())).await
}

/// Build the full application router with the same middleware stack that
/// production uses, over the given store.
pub async fn build_test_app_with_store(store: Arc<dyn Store>) -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let uploads_dir = tmp.path().join("uploads");
    let staging_dir = tmp.path().join("staging");
    let config = test_config(&uploads_dir, &staging_dir);

    let uploads = UploadStorage::init(UploadConfig {
        dir: uploads_dir.clone(),
        staging_dir: staging_dir.clone(),
        ..UploadConfig::default()
    })
    .await
    .unwrap();

    let state = AppState {
        store: Arc::clone(&store),
        uploads: Arc::new(uploads),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        uploads_dir,
        staging_dir,
        _tmp: tmp,
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part]) -> Response<Body> {
    let (content_type, body) = multipart_body(parts);
    post_raw(app, uri, &content_type, body).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "landing-test-boundary";

pub enum Part {
    Text(&'static str, &'static str),
    File {
        name: &'static str,
        filename: &'static str,
        content_type: &'static str,
        bytes: Vec<u8>,
    },
}

impl Part {
    pub fn image(filename: &'static str, content_type: &'static str, bytes: Vec<u8>) -> Self {
        Part::File {
            name: "image",
            filename,
            content_type,
            bytes,
        }
    }
}

pub fn multipart_body(parts: &[Part]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// Encode a `width` x `height` gradient in `format`.
pub fn test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    });
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut bytes, format)
        .unwrap();
    bytes.into_inner()
}

// ---------------------------------------------------------------------------
// Store that refuses writes
// ---------------------------------------------------------------------------

/// Delegates reads to a [`MemoryStore`] and fails every insert and ping.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
}

#[async_trait]
impl Store for FailingStore {
    async fn create_client(&self, _input: &CreateClient) -> Result<Client, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn list_clients(&self) -> Result<Vec<Client>, sqlx::Error> {
        self.inner.list_clients().await
    }

    async fn create_project(&self, _input: &CreateProject) -> Result<Project, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, sqlx::Error> {
        self.inner.list_projects().await
    }

    async fn create_contact(&self, _input: &CreateContact) -> Result<Contact, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, sqlx::Error> {
        self.inner.list_contacts().await
    }

    async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        self.inner.find_subscriber_by_email(email).await
    }

    async fn create_subscriber(
        &self,
        _input: &CreateSubscriber,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }

    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, sqlx::Error> {
        self.inner.list_subscribers().await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolClosed)
    }
}
