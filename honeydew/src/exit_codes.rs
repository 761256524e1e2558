//! Stable exit codes for the honeydew CLI.

/// Run completed and the push succeeded.
pub const OK: i32 = 0;
/// Any failure, including a failed close of the tracked file.
pub const FAILURE: i32 = 1;
