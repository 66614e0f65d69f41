//! HTTP protocol layer module
//!
//! Protocol-level building blocks decoupled from the file-serving logic:
//! CORS headers, MIME lookup, ETag handling and response builders.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_file_response,
    build_html_response, build_options_response,
};
