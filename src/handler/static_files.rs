//! Static file serving module
//!
//! Serves the front-end from the configured directory with `ETag` support.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve static files from a directory mounted at `mount`
pub async fn serve_directory(
    ctx: &RequestContext<'_>,
    dir: &str,
    mount: &str,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    match load_from_directory(dir, ctx.path, mount, index_files).await {
        Some((content, content_type)) => {
            if ctx.access_log {
                logger::log_debug(&format!("Serving {} ({} bytes)", ctx.path, content.len()));
            }
            build_static_file_response(
                content,
                content_type,
                ctx.if_none_match.as_deref(),
                ctx.is_head,
            )
        }
        None => http::build_404_response(),
    }
}

/// Load a file from `static_dir`, resolving index files for directories
pub async fn load_from_directory(
    static_dir: &str,
    path: &str,
    mount: &str,
    index_files: &[String],
) -> Option<(Vec<u8>, &'static str)> {
    let decoded = urlencoding::decode(path).ok()?;
    let relative_path = decoded
        .strip_prefix(mount.trim_end_matches('/'))
        .unwrap_or(&*decoded)
        .trim_start_matches('/');

    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    let mut file_path = static_dir_canonical.join(relative_path);
    if file_path.is_dir() {
        file_path = index_files
            .iter()
            .map(|index| file_path.join(index))
            .find(|candidate| candidate.is_file())?;
    }

    // Missing files are an ordinary 404
    let file_path_canonical = file_path.canonicalize().ok()?;
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type =
        mime::get_content_type(file_path_canonical.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Build static file response, answering 304 when the client copy is current
fn build_static_file_response(
    data: Vec<u8>,
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::build_cached_response(Bytes::from(data), content_type, &etag, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Mergington</h1>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();
        std::fs::create_dir(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("css").join("styles.css"), "body{}").unwrap();
        dir
    }

    fn index_files() -> Vec<String> {
        vec!["index.html".to_string()]
    }

    #[tokio::test]
    async fn test_load_file_under_mount() {
        let dir = static_dir();
        let root = dir.path().to_str().unwrap();

        let (content, content_type) =
            load_from_directory(root, "/static/app.js", "/static", &index_files())
                .await
                .unwrap();
        assert_eq!(content, b"console.log(1);");
        assert_eq!(content_type, "application/javascript");

        let (_, content_type) =
            load_from_directory(root, "/static/css/styles.css", "/static", &index_files())
                .await
                .unwrap();
        assert_eq!(content_type, "text/css; charset=utf-8");
    }

    #[tokio::test]
    async fn test_directory_resolves_index() {
        let dir = static_dir();
        let root = dir.path().to_str().unwrap();

        for path in ["/static", "/static/"] {
            let (content, _) = load_from_directory(root, path, "/static", &index_files())
                .await
                .unwrap();
            assert_eq!(content, b"<h1>Mergington</h1>");
        }
        assert!(load_from_directory(root, "/static/css/", "/static", &index_files())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_traversal_and_missing() {
        let dir = static_dir();
        let root = dir.path().join("css");
        let root = root.to_str().unwrap();

        assert!(load_from_directory(root, "/static/../app.js", "/static", &index_files())
            .await
            .is_none());
        assert!(load_from_directory(root, "/static/%2E%2E/app.js", "/static", &index_files())
            .await
            .is_none());
        assert!(load_from_directory(root, "/static/missing.js", "/static", &index_files())
            .await
            .is_none());
    }

    #[test]
    fn test_etag_round_trip_gives_304() {
        let data = b"body{}".to_vec();
        let etag = cache::generate_etag(&data);
        let resp = build_static_file_response(data, "text/css", Some(&etag), false);
        assert_eq!(resp.status(), hyper::StatusCode::NOT_MODIFIED);
    }
}
