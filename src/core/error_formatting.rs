//! Error formatting utilities for lbrmeta
//!
//! Converts internal errors into clear, actionable messages for users.

use super::error::{ErrorContext, LbrError};

/// Convert any error into a user-friendly format with contextual suggestions
///
/// Walks the error chain looking for an [`LbrError`]; anything else is shown
/// as a generic failure with the full chain as details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Finds an LbrError attached with `.context(...)` too.
    if let Some(lbr_error) = error.downcast_ref::<LbrError>() {
        return with_cause(create_error_context(lbr_error), &error);
    }

    for cause in error.chain() {
        if let Some(lbr_error) = cause.downcast_ref::<LbrError>() {
            return create_error_context(lbr_error);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(LbrError::Other {
                message: io_error.to_string(),
            })
            .with_suggestion("Check file permissions on the library and the log file");
        }
    }

    let details = error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>().join(": ");
    let context = ErrorContext::new(LbrError::Other {
        message: error.to_string(),
    });
    if details.is_empty() {
        context
    } else {
        context.with_details(details)
    }
}

/// Fill empty details with the underlying causes of `error`.
fn with_cause(context: ErrorContext, error: &anyhow::Error) -> ErrorContext {
    let causes = error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>().join(": ");
    if causes.is_empty() || context.details.is_some() {
        context
    } else {
        context.with_details(causes)
    }
}

/// Create a user-friendly error context from an [`LbrError`]
pub fn create_error_context(error: &LbrError) -> ErrorContext {
    match error {
        LbrError::InvalidDirectory {
            path,
        } => ErrorContext::new(LbrError::InvalidDirectory {
            path: path.clone(),
        })
        .with_details("Verify that the passed argument is a valid directory that exists")
        .with_suggestion("Use --file to update a single library instead of a directory"),
        LbrError::MalformedDocument {
            path,
            reason,
        } => ErrorContext::new(LbrError::MalformedDocument {
            path: path.clone(),
            reason: reason.clone(),
        })
        .with_details(format!("Modifications will not be made to it ({reason})")),
        LbrError::ConfigError {
            message,
        } => ErrorContext::new(LbrError::ConfigError {
            message: message.clone(),
        })
        .with_suggestion("Check the configuration file passed with --config"),
        LbrError::FileSystemError {
            operation,
            path,
        } => ErrorContext::new(LbrError::FileSystemError {
            operation: operation.clone(),
            path: path.clone(),
        })
        .with_suggestion("Check that the path exists and you have the necessary permissions"),
        LbrError::Other {
            message,
        } => ErrorContext::new(LbrError::Other {
            message: message.clone(),
        }),
    }
}
