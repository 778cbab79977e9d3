//! I/O helpers
//!
//! Scratch-file handling for the storage workload.

pub mod temp;

pub use temp::TempFile;
