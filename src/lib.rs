//! RIGMARK - whole-machine benchmark engine
//!
//! Runs four fixed, deterministic workloads (compute, memory, storage and
//! image processing), converts the measured wall-clock times into normalized
//! integer scores and classifies the compute score into a qualitative
//! performance tier.

use std::fmt;

// Public re-exports
pub mod bench;
pub mod config;
pub mod io;
pub mod models;
pub mod util;
pub mod workload;

/// Storage workload phase, carried by [`RigmarkError::Storage`] so callers
/// can tell which filesystem operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoragePhase {
    /// Creating the scratch file
    Create,
    /// Writing the test buffer out
    Write,
    /// Reading the file back
    Read,
    /// Removing the scratch file
    Remove,
}

impl StoragePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoragePhase::Create => "create",
            StoragePhase::Write => "write",
            StoragePhase::Read => "read",
            StoragePhase::Remove => "remove",
        }
    }
}

// Common error types
#[derive(Debug)]
pub enum RigmarkError {
    /// I/O operation failed
    Io(std::io::Error),
    /// Configuration validation or parsing error
    Config(String),
    /// A workload buffer could not be allocated
    Allocation(String),
    /// Storage workload failed; the phase identifies the failed operation
    Storage {
        phase: StoragePhase,
        source: std::io::Error,
    },
    /// Benchmark execution error
    Benchmark(String),
    /// The run was cancelled between workloads
    Cancelled,
}

impl fmt::Display for RigmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RigmarkError::Io(err) => write!(f, "I/O error: {}", err),
            RigmarkError::Config(msg) => write!(f, "Configuration error: {}", msg),
            RigmarkError::Allocation(msg) => write!(f, "Allocation failure: {}", msg),
            RigmarkError::Storage { phase, source } => {
                write!(
                    f,
                    "Storage workload failed during {}: {}",
                    phase.as_str(),
                    source
                )
            }
            RigmarkError::Benchmark(msg) => write!(f, "Benchmark error: {}", msg),
            RigmarkError::Cancelled => write!(f, "Benchmark run cancelled"),
        }
    }
}

impl std::error::Error for RigmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RigmarkError::Io(err) => Some(err),
            RigmarkError::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RigmarkError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::OutOfMemory => {
                RigmarkError::Allocation(format!("Out of memory: {}", err))
            }
            _ => RigmarkError::Io(err),
        }
    }
}

impl From<toml::de::Error> for RigmarkError {
    fn from(err: toml::de::Error) -> Self {
        RigmarkError::Config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for RigmarkError {
    fn from(err: toml::ser::Error) -> Self {
        RigmarkError::Config(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for RIGMARK operations
pub type Result<T> = std::result::Result<T, RigmarkError>;

// Common constants
pub const APP_NAME: &str = "rigmark";
pub const CONFIG_FILE: &str = "rigmark.toml";
pub const TEMP_FILE_PREFIX: &str = "RIGMARK_TMP_";
