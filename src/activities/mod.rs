//! Activities domain
//!
//! Activity records, seed data, email validation, the synchronized store and
//! the signup sheet that ties the store to the mirror.

mod email;
mod error;
mod model;
mod seed;
mod sheet;
mod store;

pub use email::{is_student_email, STUDENT_EMAIL_DOMAIN};
pub use error::ActivityError;
pub use model::{Activity, ActivityCatalog};
pub use seed::seed_activities;
pub use sheet::SignupSheet;
pub use store::ActivityStore;

#[cfg(test)]
pub(crate) use sheet::tests::FailingMirror;
