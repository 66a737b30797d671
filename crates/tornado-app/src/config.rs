//! Host runtime configuration from the environment (not gameplay tuning).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tornado_core::constants::DEFAULT_POOL_CAPACITY;

/// Path of the TOML upgrade settings. Unset means built-in tuning.
pub fn settings_path() -> Option<PathBuf> {
    env::var("TORNADO_SETTINGS").ok().map(PathBuf::from)
}

pub fn seed() -> u64 {
    parse_or(env::var("TORNADO_SEED").ok(), 42)
}

/// How long the headless run lasts.
pub fn run_duration() -> Duration {
    Duration::from_secs_f32(parse_or(env::var("TORNADO_RUN_SECS").ok(), 20.0f32).max(0.0))
}

pub fn pool_capacity() -> usize {
    parse_or(env::var("TORNADO_POOL_CAPACITY").ok(), DEFAULT_POOL_CAPACITY)
}

/// Interval between scripted weapon level-ups (0 disables them).
pub fn level_up_every() -> Duration {
    Duration::from_secs_f32(
        parse_or(env::var("TORNADO_LEVEL_UP_EVERY_SECS").ok(), 5.0f32).max(0.0),
    )
}

/// Parse `value`, falling back to `default` when unset or malformed.
pub fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or::<u64>(None, 42), 42);
        assert_eq!(parse_or(Some("7".to_string()), 42u64), 7);
        assert_eq!(parse_or(Some(" 12 ".to_string()), 0usize), 12);
        assert_eq!(parse_or(Some("soon".to_string()), 2.5f32), 2.5);
        assert_eq!(parse_or(Some("-1".to_string()), 3usize), 3);
    }
}
