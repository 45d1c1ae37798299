//! Platform error classification. Telegram reports the expired-query race as
//! a Bad Request whose description starts with a fixed phrase; that one class
//! becomes [`PlatformError::StaleQuery`] here, at the client boundary, so the
//! rest of the pipeline never inspects error strings.

use kbot_core::{KbotError, PlatformError};
use teloxide::RequestError;
use tracing::error;

/// Description prefix Telegram uses when a callback or inline answer arrives
/// after the query expired. The wire form carries a `400: ` status prefix.
const STALE_QUERY_PREFIX: &str = "Bad Request: query is too old";

/// Classifies an API error description into a structured platform error.
pub fn classify_api_description(description: String) -> PlatformError {
    let trimmed = description
        .strip_prefix("400: ")
        .unwrap_or(description.as_str());
    if trimmed.starts_with(STALE_QUERY_PREFIX) {
        PlatformError::StaleQuery(description)
    } else {
        PlatformError::Api(description)
    }
}

/// Maps a teloxide request error into a structured platform error.
pub fn classify_request_error(err: RequestError) -> PlatformError {
    match err {
        RequestError::Api(api) => classify_api_description(api.to_string()),
        RequestError::Network(e) => PlatformError::Network(e.to_string()),
        other => PlatformError::Api(other.to_string()),
    }
}

/// The global error filter: stale-query races are dropped silently, every
/// other per-update error is logged in full. Returns whether it logged.
pub fn should_report(err: &KbotError) -> bool {
    !err.is_stale_query()
}

/// Logs a per-update failure unless the filter drops it. The update loop
/// continues either way; a failed update is abandoned, never retried.
pub(crate) fn report(err: &KbotError) {
    if should_report(err) {
        error!(error = %err, "Update processing failed");
    }
}
