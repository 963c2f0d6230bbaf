use serde::Serialize;
use tracing::{Level, debug};

/// Logs `value` as pretty JSON at debug level, skipping serialization
/// entirely when debug is disabled.
pub(crate) fn debug_pretty_json<T>(label: &str, value: &T)
where
    T: Serialize,
{
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    match serde_json::to_string_pretty(value) {
        Ok(json) => debug!(label, "\n{json}"),
        Err(error) => debug!(label, %error, "pretty serialize failed"),
    }
}
