//! Shared error plumbing.

/// Grepable error code attached to structured log lines.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}
