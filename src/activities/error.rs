//! Errors surfaced by signup and unregister

use hyper::StatusCode;

use crate::mirror::MirrorError;

/// Failure of an activity operation.
///
/// The `Display` text is returned to the caller as the `detail` field.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("Invalid student email domain. Must use @mergington.edu")]
    InvalidEmailDomain,
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student is already signed up for this activity")]
    AlreadyRegistered,
    #[error("Student is not signed up for this activity")]
    NotRegistered,
    #[error("Missing required query parameter: email")]
    MissingEmail,
    #[error("Database update failed: {0}")]
    Mirror(#[from] MirrorError),
}

impl ActivityError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEmailDomain | Self::AlreadyRegistered | Self::NotRegistered => {
                StatusCode::BAD_REQUEST
            }
            Self::ActivityNotFound => StatusCode::NOT_FOUND,
            Self::MissingEmail => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Mirror(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
