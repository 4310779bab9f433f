//! Error handling for lbrmeta
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** for the failures callers branch on
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`LbrError`] - Enumerated error types for run- and file-level failures
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for display
//!
//! Per-link failures are not part of [`LbrError`]: they are modelled by
//! [`ResolveError`](crate::resolver::ResolveError) and never escalate past the
//! part definition that owns the link.
//!
//! # Examples
//!
//! ```rust,no_run
//! use lbrmeta::core::{LbrError, ErrorContext};
//!
//! let context = ErrorContext::new(LbrError::InvalidDirectory {
//!     path: "/no/such/dir".to_string(),
//! })
//! .with_suggestion("Pass an existing directory, or use --file for a single library");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for lbrmeta operations
///
/// # Error Categories
///
/// ## Run-level (abort the whole run)
/// - [`InvalidDirectory`] - The directory to scan does not exist
/// - [`ConfigError`] - Configuration file or values are unusable
///
/// ## File-level (skip the file, continue the batch)
/// - [`MalformedDocument`] - Not a parsable EAGLE library
/// - [`FileSystemError`] - The library could not be read or written
///
/// [`InvalidDirectory`]: LbrError::InvalidDirectory
/// [`ConfigError`]: LbrError::ConfigError
/// [`MalformedDocument`]: LbrError::MalformedDocument
/// [`FileSystemError`]: LbrError::FileSystemError
#[derive(Error, Debug)]
pub enum LbrError {
    /// The path passed in directory mode is not an existing directory
    #[error("Invalid value [{path}] passed as directory")]
    InvalidDirectory {
        /// The path as given on the command line, made absolute when possible
        path: String,
    },

    /// The input file is not a recognizable EAGLE library
    ///
    /// Raised before any mutation; the file is left untouched.
    #[error("{path} is not a valid EAGLE library")]
    MalformedDocument {
        /// Path of the rejected file
        path: String,
        /// Why the document was rejected
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// File system operation failed
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "read", "write")
        operation: String,
        /// The path involved
        path: String,
    },

    /// Generic error for anything that has no dedicated variant
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// Adds an optional suggestion and optional details to an [`LbrError`] so the
/// CLI can explain what went wrong and how to fix it.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: LbrError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: LbrError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}
