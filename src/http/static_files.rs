//! Static file serving.
//!
//! # Responsibilities
//! - Serve files under the configured root via `ServeDir`
//! - Serve `index.html` for directories and redirect `/dir` to `/dir/`
//! - Render an HTML listing for directories without an index
//!
//! # Design Decisions
//! - `ServeDir` owns path validation and all file error statuses
//! - The listing is checked first and only claims slash-terminated paths
//!   that resolve to a directory without `index.html`

use std::path::{Component, Path, PathBuf};

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::config::FilesConfig;
use crate::http::listing;

const INDEX_FILE: &str = "index.html";

/// File-serving half of the dispatcher.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    serve_dir: ServeDir,
    directory_listing: bool,
}

impl StaticFiles {
    pub fn new(config: &FilesConfig) -> Self {
        Self {
            root: config.root.clone(),
            serve_dir: ServeDir::new(&config.root).append_index_html_on_directories(true),
            directory_listing: config.directory_listing,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Answer a request the way a plain file server would.
    pub async fn serve(&self, request: Request<Body>) -> Response {
        let method = request.method();
        if self.directory_listing && (method == Method::GET || method == Method::HEAD) {
            if let Some(dir) = self.listable_directory(request.uri().path()).await {
                return self.render_listing(request.uri().path(), &dir).await;
            }
        }

        match self.serve_dir.clone().oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    }

    async fn render_listing(&self, uri_path: &str, dir: &Path) -> Response {
        let display_path = percent_decode_str(uri_path).decode_utf8_lossy();
        match listing::read_entries(dir).await {
            Ok(entries) => listing::render(&display_path, &entries).into_response(),
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "Directory listing failed");
                (StatusCode::NOT_FOUND, "No permission to list directory").into_response()
            }
        }
    }

    /// Directory to list for `uri_path`, if it is one without an index.
    async fn listable_directory(&self, uri_path: &str) -> Option<PathBuf> {
        if !uri_path.ends_with('/') {
            return None;
        }
        let dir = resolve(&self.root, uri_path)?;
        let metadata = tokio::fs::metadata(&dir).await.ok()?;
        if !metadata.is_dir() || tokio::fs::try_exists(dir.join(INDEX_FILE)).await.unwrap_or(false) {
            return None;
        }
        Some(dir)
    }
}

/// Map a request path onto `root`, refusing anything that could escape it.
fn resolve(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(uri_path).decode_utf8().ok()?;
    let mut path = root.to_path_buf();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(path)
}
