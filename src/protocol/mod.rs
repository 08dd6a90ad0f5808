//! Protocol Module
//!
//! Defines the text wire format of file transmission commands.
//!
//! ## Protocol Format
//!
//! ```text
//! ┌──────────────┬─────┬───────────┬─────┬───────────┬─────┐
//! │ [prefix code]│  ;  │ key=value │  ;  │ key=value │ ... │
//! └──────────────┴─────┴───────────┴─────┴───────────┴─────┘
//! ```
//!
//! ### Fields
//! - ac:  action (enum)             - id:  session id (text)
//! - zip: compression (enum)        - fid: file id (text)
//! - ft:  file type (enum)          - pw:  bypass password (base64)
//! - tt:  transmission type (enum)  - n:   name (text)
//! - q:   quiet level (enum)        - st:  status (base64)
//! - mod: mtime in ns (signed)      - pr:  parent (text)
//! - prm: permission bits           - sz:  size (unsigned)
//! - d:   data (base64)
//!
//! ### Escaping
//! `;` inside text values is written as `;;`. Base64 values never contain `;`.

mod command;
mod enums;
mod registry;
mod sanitize;
mod codec;

pub use command::{FileTransmissionCommand, Mtime, Permissions};
pub use enums::{Action, Compression, FileType, QuietLevel, TransmissionType, WireEnum};
pub use registry::{registry, Accessor, FieldDescriptor, FieldKind, FieldRegistry};
pub use sanitize::strip_escape_codes;
pub use codec::{decode_command, encode_command, encode_with_prefix, Codec, SEPARATOR};
