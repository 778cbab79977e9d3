//! Workload configuration
//!
//! Holds the fixed workload sizes the scores are calibrated against, plus
//! loading, saving and validation of user overrides.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{RigmarkError, Result, APP_NAME, CONFIG_FILE};

/// Operations performed by the compute workload.
pub const DEFAULT_COMPUTE_OPS: u64 = 10_000_000;
/// Buffer size shared by the memory and storage workloads (100 MiB).
pub const DEFAULT_BUFFER_BYTES: usize = 100 * 1024 * 1024;
/// Write/read repetitions in the memory workload.
pub const DEFAULT_MEMORY_PASSES: u32 = 5;
/// Frames processed by the image workload.
pub const DEFAULT_IMAGE_FRAMES: u32 = 100;
/// Edge length of the square frames the image workload processes.
pub const DEFAULT_IMAGE_SIZE: u32 = 1280;

/// Benchmark workload sizes.
///
/// The defaults are the calibration constants scores are comparable under;
/// the builder methods exist for scaled-down test runs and must not be used
/// when results are meant to be compared across machines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Pseudo-arithmetic operations for the compute workload
    pub compute_ops: u64,
    /// Memory workload buffer size in bytes
    pub memory_bytes: usize,
    /// Write/read repetitions over the memory buffer
    pub memory_passes: u32,
    /// Storage workload file size in bytes
    pub storage_bytes: usize,
    /// Directory the storage workload places its scratch file in
    pub scratch_dir: PathBuf,
    /// Frames processed by the image workload
    pub image_frames: u32,
    /// Square frame edge length in pixels
    pub image_size: u32,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            compute_ops: DEFAULT_COMPUTE_OPS,
            memory_bytes: DEFAULT_BUFFER_BYTES,
            memory_passes: DEFAULT_MEMORY_PASSES,
            storage_bytes: DEFAULT_BUFFER_BYTES,
            scratch_dir: std::env::temp_dir(),
            image_frames: DEFAULT_IMAGE_FRAMES,
            image_size: DEFAULT_IMAGE_SIZE,
        }
    }
}

impl WorkloadConfig {
    /// Create a configuration with the standard workload sizes
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.compute_ops == 0 {
            return Err(RigmarkError::Config(
                "Compute operation count must be greater than 0".to_string(),
            ));
        }

        // The memory workload exercises the first half of its buffer
        if self.memory_bytes < 2 {
            return Err(RigmarkError::Config(
                "Memory buffer must be at least 2 bytes".to_string(),
            ));
        }

        if self.memory_passes == 0 {
            return Err(RigmarkError::Config(
                "Memory pass count must be greater than 0".to_string(),
            ));
        }

        if self.storage_bytes == 0 {
            return Err(RigmarkError::Config(
                "Storage file size must be greater than 0".to_string(),
            ));
        }

        if !self.scratch_dir.is_dir() {
            return Err(RigmarkError::Config(format!(
                "Scratch directory does not exist: {}",
                self.scratch_dir.display()
            )));
        }

        if self.image_frames == 0 {
            return Err(RigmarkError::Config(
                "Image frame count must be greater than 0".to_string(),
            ));
        }

        if self.image_size < 8 {
            return Err(RigmarkError::Config(
                "Image size must be at least 8 pixels".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the compute operation count
    pub fn with_compute_ops(mut self, ops: u64) -> Self {
        self.compute_ops = ops;
        self
    }

    /// Set the memory buffer size
    pub fn with_memory_bytes(mut self, bytes: usize) -> Self {
        self.memory_bytes = bytes;
        self
    }

    /// Set the memory pass count
    pub fn with_memory_passes(mut self, passes: u32) -> Self {
        self.memory_passes = passes;
        self
    }

    /// Set the storage file size
    pub fn with_storage_bytes(mut self, bytes: usize) -> Self {
        self.storage_bytes = bytes;
        self
    }

    /// Set the scratch directory for the storage workload
    pub fn with_scratch_dir(mut self, dir: PathBuf) -> Self {
        self.scratch_dir = dir;
        self
    }

    /// Set the image frame count
    pub fn with_image_frames(mut self, frames: u32) -> Self {
        self.image_frames = frames;
        self
    }

    /// Set the image frame edge length
    pub fn with_image_size(mut self, size: u32) -> Self {
        self.image_size = size;
        self
    }

    /// Load configuration from the standard config file location.
    /// Returns the default configuration if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            RigmarkError::Config(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            RigmarkError::Config(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                RigmarkError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RigmarkError::Config(format!("Failed to serialize configuration: {}", e)))?;

        fs::write(&config_path, content).map_err(|e| {
            RigmarkError::Config(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/rigmark/rigmark.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            RigmarkError::Config("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
