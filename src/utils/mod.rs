//! Small shared helpers.

pub mod log_sanitizer;
