//! Library configuration.

use std::path::PathBuf;

/// Library configuration.
#[derive(Debug, Clone)]
pub struct BibConfig {
    /// Data directory for persistence
    pub data_dir: PathBuf,
    /// Maximum retry attempts for transient I/O errors
    pub persistence_max_retries: u32,
    /// Delay between retry attempts in milliseconds
    pub persistence_retry_delay_ms: u64,
}

impl Default for BibConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            persistence_max_retries: 3,      // Default retry attempts
            persistence_retry_delay_ms: 100, // 100ms delay between retries
        }
    }
}
