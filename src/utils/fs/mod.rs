//! File system helpers for library batches.
//!
//! - [`atomic_write`]: replace a file's contents without a partial-write window
//! - [`find_libraries`]: collect `.lbr` files from a directory
//!
//! # Examples
//!
//! ```rust,no_run
//! use lbrmeta::utils::fs::{atomic_write, find_libraries};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! for library in find_libraries(Path::new("libraries"), false)? {
//!     let content = std::fs::read(&library)?;
//!     atomic_write(&library, &content)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod discovery;

pub use atomic::atomic_write;
pub use discovery::find_libraries;
