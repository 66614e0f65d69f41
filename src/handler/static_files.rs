//! Static file serving module
//!
//! Maps request paths to files under the root directory, with a traversal
//! guard, directory index support and a fallback directory listing.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a GET/HEAD request from the root directory
pub async fn serve(ctx: &RequestContext<'_>, root: &Path) -> Response<Full<Bytes>> {
    let Some(target) = resolve_path(root, ctx.path) else {
        return http::build_404_response();
    };

    if target.is_dir() {
        let index_path = target.join(ctx.index_file);
        if index_path.is_file() {
            return serve_file(&index_path, ctx).await;
        }
        return serve_listing(&target, ctx.path, ctx.is_head).await;
    }

    serve_file(&target, ctx).await
}

/// Map a request path to a filesystem path under `root`.
///
/// Returns `None` when the target does not exist or its canonical path
/// escapes the root (traversal attempt). Canonicalizing before the prefix
/// check also catches symlinks pointing outside the root.
pub fn resolve_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let joined = root.join(relative);

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Root directory not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    // Nonexistent targets fail to canonicalize; that is the 404 path.
    let target = joined.canonicalize().ok()?;
    if !target.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            target.display()
        ));
        return None;
    }

    Some(target)
}

/// Read a file and build the response, honoring `If-None-Match` and HEAD
async fn serve_file(path: &Path, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return http::build_404_response();
        }
    };

    let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
    let etag = cache::generate_etag(&content);

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    let content_length = content.len();
    let body = if ctx.is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    http::build_file_response(body, content_length, content_type, &etag)
}

/// Serve an HTML listing for a directory without an index file
async fn serve_listing(dir: &Path, request_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    let mut read_dir = match fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read directory '{}': {e}",
                dir.display()
            ));
            return http::build_404_response();
        }
    };

    let mut names = Vec::new();
    while let Ok(Some(entry)) = read_dir.next_entry().await {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        if is_dir {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    http::build_html_response(render_listing(request_path, &names), is_head)
}

/// Render the directory listing page.
///
/// Directory entries already carry a trailing slash.
pub fn render_listing(request_path: &str, entries: &[String]) -> String {
    let base = if request_path.ends_with('/') {
        request_path.to_string()
    } else {
        format!("{request_path}/")
    };

    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\">\
         <title>Directory listing for {request_path}</title></head>\n<body>\n\
         <h1>Directory listing for {request_path}</h1>\n<hr>\n<ul>\n"
    );
    for name in entries {
        html.push_str(&format!("<li><a href=\"{base}{name}\">{name}</a></li>\n"));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

    /// Create a unique scratch directory with an index file and a nested dir
    fn scratch_root() -> PathBuf {
        let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let root = std::env::temp_dir().join(format!(
            "devserve-static-test-{}-{id}",
            std::process::id()
        ));
        std_fs::create_dir_all(root.join("js")).expect("create scratch dirs");
        std_fs::write(root.join("index.html"), "<html>index</html>").expect("write index");
        std_fs::write(root.join("js").join("app.js"), "console.log(1);").expect("write js");
        root
    }

    #[test]
    fn test_resolve_existing_file() {
        let root = scratch_root();
        let resolved = resolve_path(&root, "/index.html").expect("index resolves");
        assert!(resolved.ends_with("index.html"));
        assert!(resolved.is_file());
    }

    #[test]
    fn test_resolve_nested_file() {
        let root = scratch_root();
        let resolved = resolve_path(&root, "/js/app.js").expect("nested file resolves");
        assert!(resolved.ends_with("js/app.js"));
    }

    #[test]
    fn test_resolve_missing_file_is_none() {
        let root = scratch_root();
        assert!(resolve_path(&root, "/missing.html").is_none());
    }

    #[test]
    fn test_resolve_blocks_traversal() {
        let root = scratch_root();
        // A file that definitely exists outside the root
        let outside = root.parent().expect("parent").join(format!(
            "devserve-secret-{}.txt",
            std::process::id()
        ));
        std_fs::write(&outside, "secret").expect("write outside file");

        let escaped = format!(
            "/../{}",
            outside.file_name().expect("name").to_string_lossy()
        );
        assert!(resolve_path(&root, &escaped).is_none());

        let _ = std_fs::remove_file(outside);
    }

    #[test]
    fn test_resolve_directory() {
        let root = scratch_root();
        let resolved = resolve_path(&root, "/js").expect("directory resolves");
        assert!(resolved.is_dir());
    }

    #[tokio::test]
    async fn test_serve_root_rewrite_matches_index() {
        let root = scratch_root();
        let ctx = |path| RequestContext {
            path,
            is_head: false,
            if_none_match: None,
            index_file: "index.html",
        };

        // "/" is rewritten to "/index.html" before serve() is called; both
        // resolutions must produce the same file response.
        let via_rewrite = serve(&ctx("/index.html"), &root).await;
        let direct = serve(&ctx("/index.html"), &root).await;
        assert_eq!(via_rewrite.status(), 200);
        assert_eq!(
            via_rewrite.headers()["Content-Length"],
            direct.headers()["Content-Length"]
        );
        assert_eq!(via_rewrite.headers()["ETag"], direct.headers()["ETag"]);
    }

    #[tokio::test]
    async fn test_serve_missing_path_is_404() {
        let root = scratch_root();
        let ctx = RequestContext {
            path: "/nope.html",
            is_head: false,
            if_none_match: None,
            index_file: "index.html",
        };
        assert_eq!(serve(&ctx, &root).await.status(), 404);
    }

    #[tokio::test]
    async fn test_serve_directory_without_index_lists_entries() {
        let root = scratch_root();
        let ctx = RequestContext {
            path: "/js",
            is_head: false,
            if_none_match: None,
            index_file: "index.html",
        };
        let response = serve(&ctx, &root).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["Content-Type"],
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_serve_matching_etag_returns_304() {
        let root = scratch_root();
        let first = serve(
            &RequestContext {
                path: "/index.html",
                is_head: false,
                if_none_match: None,
                index_file: "index.html",
            },
            &root,
        )
        .await;
        let etag = first.headers()["ETag"].to_str().expect("ascii etag").to_string();

        let second = serve(
            &RequestContext {
                path: "/index.html",
                is_head: false,
                if_none_match: Some(etag),
                index_file: "index.html",
            },
            &root,
        )
        .await;
        assert_eq!(second.status(), 304);
    }

    #[test]
    fn test_render_listing() {
        let html = render_listing(
            "/js",
            &["app.js".to_string(), "vendor/".to_string()],
        );
        assert!(html.contains("Directory listing for /js"));
        assert!(html.contains("<a href=\"/js/app.js\">app.js</a>"));
        assert!(html.contains("<a href=\"/js/vendor/\">vendor/</a>"));
    }
}
