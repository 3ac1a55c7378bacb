//! Command implementations
//!
//! Organized into two categories:
//!
//! - `plumbing`: low-level object inspection (cat-file)
//! - `porcelain`: user-facing version control workflows (commit, checkout,
//!   log, branch, gc, sync)
//!
//! Each file extends `Repository` with one command; the CLI frontend in
//! `main` only parses argv and dispatches here.

pub mod plumbing;
pub mod porcelain;
