//! Configuration for ftwire
//!
//! Centralized codec configuration with sensible defaults.

use crate::FILE_TRANSFER_CODE;

/// Codec configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Framing
    // -------------------------------------------------------------------------
    /// Protocol identifier written as a bare leading token
    pub prefix_code: u32,

    /// Prepend `prefix_code` when encoding
    pub include_prefix: bool,

    /// Remove a leading `prefix_code` token before decoding
    ///
    /// Accepts both `<code>` on its own and `<code>;...`.
    pub strip_prefix: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix_code: FILE_TRANSFER_CODE,
            include_prefix: false,
            strip_prefix: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the protocol identifier code
    pub fn prefix_code(mut self, code: u32) -> Self {
        self.config.prefix_code = code;
        self
    }

    /// Emit the prefix code on encode
    pub fn include_prefix(mut self, include: bool) -> Self {
        self.config.include_prefix = include;
        self
    }

    /// Strip the prefix code on decode
    pub fn strip_prefix(mut self, strip: bool) -> Self {
        self.config.strip_prefix = strip;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
