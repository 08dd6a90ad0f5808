//! # ftwire
//!
//! Text wire codec for terminal file transmission commands:
//! - One typed command record per escape sequence payload
//! - `key=value` pairs joined by `;`, with `;;` escaping inside text values
//! - Base64 for binary-safe fields, zero values omitted
//! - A single static field registry shared by encoder and decoder
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Transfer protocol state machine                 │
//! │                    (external caller)                         │
//! └──────────────┬──────────────────────────────▲───────────────┘
//!                │ FileTransmissionCommand      │
//!                ▼                              │
//!         ┌─────────────┐                ┌─────────────┐
//!         │   Encoder   │                │   Decoder   │
//!         └──────┬──────┘                └──────▲──────┘
//!                │                              │
//!                │      ┌──────────────┐        │
//!                └─────►│   Registry   │◄───────┘
//!                       │  + Enums     │
//!                       └──────────────┘
//!                │                              │
//!                ▼  "ac=file;n=a.txt;sz=42"     │
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  Framing layer (external)                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{EnumParseError, FtError, Result};
pub use config::Config;
pub use protocol::{
    decode_command, encode_command, Codec, FileTransmissionCommand, WireEnum,
};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ftwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Escape code identifying file transfer payloads to the framing layer
pub const FILE_TRANSFER_CODE: u32 = 5113;
