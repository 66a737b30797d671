//! Error types for pooling and configuration loading.
//!
//! Tick-path failures (pool exhaustion, double release) are logged and
//! absorbed by the engine; these types carry the detail to the log line.

use std::fmt;
use std::path::PathBuf;

use crate::types::{InstanceId, PrototypeId};

/// Instance pool failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// All instances of the prototype are live and the pool is at capacity.
    Exhausted {
        prototype: PrototypeId,
        capacity: usize,
    },
    /// The prototype was never registered with the pool.
    UnknownPrototype(PrototypeId),
    /// The handle does not belong to this pool.
    UnknownInstance(InstanceId),
    /// The instance is already back in the pool.
    AlreadyReleased(InstanceId),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Exhausted {
                prototype,
                capacity,
            } => write!(
                f,
                "pool exhausted for prototype {}: all {} instances are live",
                prototype.0, capacity
            ),
            PoolError::UnknownPrototype(prototype) => {
                write!(f, "prototype {} is not registered with the pool", prototype.0)
            }
            PoolError::UnknownInstance(id) => {
                write!(f, "instance {} does not belong to this pool", id.0)
            }
            PoolError::AlreadyReleased(id) => {
                write!(f, "instance {} was already released", id.0)
            }
        }
    }
}

impl std::error::Error for PoolError {}

/// Upgrade settings loading/validation failures.
#[derive(Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The settings text is not valid TOML for the settings schema.
    Parse(String),
    /// A value is outside its accepted range.
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse(msg) => write!(f, "failed to parse settings: {}", msg),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
