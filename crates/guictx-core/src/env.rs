//! Environment variable helpers
//!
//! Used by `ContextConfig::from_env`. Values are trimmed before parsing, and a
//! variable that is set but unparsable is reported once with `tracing::warn!`
//! before falling back to the default, so a typo in `GUICTX_*` is visible.
//!
//! ```ignore
//! use guictx_core::env::{env_get, env_get_bool};
//!
//! let tasks_ms: u64 = env_get("GUICTX_TASKS_INTERVAL_MS", 50);
//! let isolate = env_get_bool("GUICTX_ISOLATE_PANICS", true);
//! ```

use std::fmt::Display;
use std::str::FromStr;

/// Parse `key` as `T`, or return `default` when unset or invalid
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, default = %default, "ignoring unparsable environment value");
            default
        }
    }
}

/// Read `key` as a flag
///
/// "1", "true", "yes", "on" are true and "0", "false", "no", "off" are false
/// (case-insensitive). Unset or anything else yields `default`.
pub fn env_get_bool(key: &str, default: bool) -> bool {
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, default, "ignoring unrecognised flag value");
            default
        }
    }
}

/// Read `key` as a string; unset or blank yields `default`
pub fn env_get_str(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().to_owned(),
        _ => default.to_owned(),
    }
}
