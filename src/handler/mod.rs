//! Request handler module
//!
//! Routes requests to the activities API, the front-end asset mount, and the
//! health endpoints.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
