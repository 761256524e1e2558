//! Side-effecting operations: filesystem and git subprocesses.

pub mod git;
pub mod repo;
pub mod tracked_file;
