//! Core types shared by every lbrmeta module.
//!
//! This module holds the crate-level error taxonomy and the helpers that turn
//! errors into the colored messages printed by the CLI.
//!
//! - [`LbrError`]: failures that abort a file or the whole run
//! - [`ErrorContext`]: an error with optional details and suggestion
//! - [`user_friendly_error`]: maps any `anyhow::Error` to an [`ErrorContext`]

pub mod error;
pub mod error_formatting;

pub use error::{ErrorContext, LbrError};
pub use error_formatting::{create_error_context, user_friendly_error};
