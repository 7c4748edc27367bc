//! Decoder configuration
//!
//! # Usage Example
//!
//! ```rust
//! use swima_core::SwimaConfig;
//!
//! let config = SwimaConfig::builder()
//!     .max_attr_size(64 * 1024)
//!     .build();
//! assert_eq!(config.max_attr_size(), 65536);
//! ```

use serde::{Deserialize, Serialize};

/// Maximum size of a SWID inventory attribute: 100 MB
pub const SWID_MAX_ATTR_SIZE: usize = 100_000_000;

/// Limits applied when decoding received attributes
///
/// The declared attribute length comes from the outer PA-TNC envelope
/// before any value bytes are parsed. A declared length above
/// `max_attr_size` is rejected on the first `process()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwimaConfig {
    max_attr_size: usize,
}

impl SwimaConfig {
    /// Create a builder starting from the default configuration
    pub fn builder() -> SwimaConfigBuilder {
        SwimaConfigBuilder::new()
    }

    /// Get the maximum accepted attribute length in bytes
    pub fn max_attr_size(&self) -> usize {
        self.max_attr_size
    }
}

impl Default for SwimaConfig {
    fn default() -> Self {
        Self {
            max_attr_size: SWID_MAX_ATTR_SIZE,
        }
    }
}

/// Builder for [`SwimaConfig`]
#[derive(Debug, Clone, Default)]
pub struct SwimaConfigBuilder {
    config: SwimaConfig,
}

impl SwimaConfigBuilder {
    /// Create a new builder with default settings
    ///
    /// # Default Settings
    /// - Max attribute size: 100 000 000 bytes
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum accepted attribute length
    pub fn max_attr_size(mut self, max_attr_size: usize) -> Self {
        self.config.max_attr_size = max_attr_size;
        self
    }

    /// Build the configuration
    pub fn build(self) -> SwimaConfig {
        self.config
    }
}
