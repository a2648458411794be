//! Student email validation

/// Institutional suffix every student address carries
pub const STUDENT_EMAIL_DOMAIN: &str = "@mergington.edu";

/// Check that `email` belongs to a Mergington student.
///
/// Comparison is case-insensitive and only looks at the suffix.
pub fn is_student_email(email: &str) -> bool {
    email.to_lowercase().ends_with(STUDENT_EMAIL_DOMAIN)
}
