//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the activities API and the static asset mount.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_cached_response, build_detail_response, build_health_response,
    build_options_response, build_redirect_response,
};
