//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: root rewrite, method dispatch,
//! CORS application and access logging.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, cors};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::borrow::Cow;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Request path after the root rewrite
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    /// File served when the path resolves to a directory
    pub index_file: &'a str,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let raw_path = req.uri().path().to_owned();
    let is_head = method == Method::HEAD;

    let path = rewrite_root(&raw_path, &state.config.serve.index_file);

    let response = match method {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: &path,
                is_head,
                if_none_match: req
                    .headers()
                    .get("if-none-match")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
                index_file: &state.config.serve.index_file,
            };
            static_files::serve(&ctx, &state.root).await
        }
        Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    // Last step before the response leaves: no status or path is exempt.
    let response = cors::apply(response);

    if state.config.logging.access_log {
        let mut entry =
            AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), raw_path);
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        logger::log_access(&entry);
    }

    Ok(response)
}

/// Rewrite the root path to the index file; every other path passes through.
pub fn rewrite_root<'a>(path: &'a str, index_file: &str) -> Cow<'a, str> {
    if path == "/" {
        Cow::Owned(format!("/{index_file}"))
    } else {
        Cow::Borrowed(path)
    }
}
