//! Shared error reporting.
//!
//! Errors that the user can fix (bad configuration, missing rasterizer) show their
//! own message; everything else shows the operation that failed and keeps the
//! details at debug level.

/// Errors that know whether their message is meant for the user.
///
/// When `is_user_actionable()` is true, `user_message()` must return `Some`.
pub trait ContextualError: std::error::Error {
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<&str>;
}

/// Message shown to the user for `error` raised during `operation_context`
pub fn user_facing_message<E: ContextualError>(error: &E, operation_context: &str) -> String {
    match error.user_message().filter(|_| error.is_user_actionable()) {
        Some(message) => message.to_string(),
        None => format!("{}: {}", operation_context, error),
    }
}

/// Log `error` at error level with context, details at debug level
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    if error.is_user_actionable() {
        if let Some(user_msg) = error.user_message() {
            log::error!("{}", user_msg);
        } else {
            log::error!("{}", operation_context);
        }
    } else {
        log::error!("{}: {}", operation_context, error);
    }
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
