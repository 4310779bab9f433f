//! Utilities shared by the batch driver.
//!
//! - [`fs`] - atomic writes and library discovery
//! - [`progress`] - progress bars and spinners

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, find_libraries};
pub use progress::ProgressBar;
