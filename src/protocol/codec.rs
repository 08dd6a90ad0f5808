//! Protocol codec
//!
//! Encoding and decoding of commands to and from the text wire format.
//!
//! ## Wire Format
//! ```text
//! [<code>;]<key>=<value>[;<key>=<value>...]
//! ```
//!
//! ### Values by Field Kind
//! - text:        escape sequences stripped, `;` doubled
//! - base64 text: standard alphabet, no padding
//! - bytes:       standard alphabet, no padding
//! - uint64:      decimal
//! - duration:    signed decimal nanoseconds
//! - permissions: decimal, masked to `0o777`
//! - enum:        canonical variant name
//!
//! Fields at their zero value are never written.

use std::borrow::Cow;
use std::num::ParseIntError;
use std::str::FromStr;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use bytes::Bytes;

use super::command::{FileTransmissionCommand, Mtime, Permissions};
use super::registry::{registry, Accessor, FieldDescriptor};
use super::sanitize::strip_escape_codes;
use crate::config::Config;
use crate::error::{FtError, Result};
use crate::FILE_TRANSFER_CODE;

/// Pair separator
pub const SEPARATOR: char = ';';

/// Standard alphabet, never padded, lenient about trailing bits
const WIRE_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

// =============================================================================
// Encoding
// =============================================================================

/// Encode a command, optionally prefixed with [`FILE_TRANSFER_CODE`]
pub fn encode_command(command: &FileTransmissionCommand, include_prefix: bool) -> String {
    encode_with_prefix(command, include_prefix.then_some(FILE_TRANSFER_CODE))
}

/// Encode a command with an explicit prefix code
pub fn encode_with_prefix(command: &FileTransmissionCommand, prefix: Option<u32>) -> String {
    let mut out = String::new();
    let mut first = true;

    if let Some(code) = prefix {
        out.push_str(&code.to_string());
        first = false;
    }

    for field in registry().iter() {
        let Some(value) = render_value(field, command) else {
            continue;
        };
        if !first {
            out.push(SEPARATOR);
        }
        first = false;
        out.push_str(field.name);
        out.push('=');
        out.push_str(&value);
    }

    out
}

/// Wire value of one field, `None` when the field is omitted
fn render_value<'a>(
    field: &FieldDescriptor,
    command: &'a FileTransmissionCommand,
) -> Option<Cow<'a, str>> {
    let value = match field.accessor {
        Accessor::Text { get, .. } => {
            let text = get(command);
            if field.base64 {
                Cow::Owned(WIRE_BASE64.encode(text.as_bytes()))
            } else {
                escape_semicolons(strip_escape_codes(text))
            }
        }
        Accessor::Bytes { get, .. } => Cow::Owned(WIRE_BASE64.encode(get(command))),
        Accessor::Uint64 { get, .. } => match get(command) {
            0 => return None,
            n => Cow::Owned(n.to_string()),
        },
        Accessor::Duration { get, .. } => {
            let mtime = get(command);
            if mtime.is_zero() {
                return None;
            }
            Cow::Owned(mtime.as_nanos().to_string())
        }
        Accessor::Permissions { get, .. } => {
            let perms = get(command);
            if perms.is_zero() {
                return None;
            }
            Cow::Owned(perms.bits().to_string())
        }
        Accessor::Enum { get, .. } => Cow::Borrowed(get(command)?),
    };

    (!value.is_empty()).then_some(value)
}

fn escape_semicolons(text: Cow<'_, str>) -> Cow<'_, str> {
    if text.contains(SEPARATOR) {
        Cow::Owned(text.replace(';', ";;"))
    } else {
        text
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// One `key=value` span found by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawPair<'a> {
    key: &'a str,
    value: &'a str,
    /// The value contains at least one `;;`
    escaped: bool,
}

/// Left to right scanner over `key=value` pairs
///
/// A `;` only ends a value when it is not followed by another `;`. Text
/// before an `=` belongs to the key, separators included, so a trailing
/// token without `=` yields nothing. Keys are never empty: an `=` in the
/// first key position is taken as part of the key.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = RawPair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();
        let key_start = self.pos;

        // Seeking key end; an `=` right at the key start cannot end an empty key
        let search_from = (key_start + 1).min(bytes.len());
        let Some(offset) = bytes[search_from..].iter().position(|&b| b == b'=') else {
            self.pos = bytes.len();
            return None;
        };
        let key_end = search_from + offset;
        let val_start = key_end + 1;

        // Seeking value end
        let mut escaped = false;
        let mut i = val_start;
        while i < bytes.len() {
            if bytes[i] == b';' {
                if bytes.get(i + 1) == Some(&b';') {
                    escaped = true;
                    i += 2;
                    continue;
                }
                self.pos = i + 1;
                return Some(RawPair {
                    key: &self.input[key_start..key_end],
                    value: &self.input[val_start..i],
                    escaped,
                });
            }
            i += 1;
        }

        // Final pair has no trailing separator
        self.pos = bytes.len();
        Some(RawPair {
            key: &self.input[key_start..key_end],
            value: &self.input[val_start..],
            escaped,
        })
    }
}

/// Decode a command; any bad field aborts the whole decode
pub fn decode_command(serialized: &str) -> Result<FileTransmissionCommand> {
    let mut command = FileTransmissionCommand::default();

    for pair in Scanner::new(serialized) {
        tracing::trace!(key = pair.key, escaped = pair.escaped, "decoding field");
        if let Err(err) = apply_value(&mut command, pair) {
            tracing::debug!(field = ?err.field(), error = %err, "rejected file transmission command");
            return Err(err);
        }
    }

    Ok(command)
}

fn apply_value(command: &mut FileTransmissionCommand, pair: RawPair<'_>) -> Result<()> {
    let field = registry()
        .get(pair.key)
        .ok_or_else(|| FtError::UnknownField {
            field: pair.key.to_string(),
        })?;

    match field.accessor {
        Accessor::Text { set, .. } => {
            let value = if field.base64 {
                let raw = decode_base64(field, pair.value)?;
                String::from_utf8(raw).map_err(|err| FtError::InvalidEncoding {
                    field: field.name.to_string(),
                    reason: err.to_string(),
                })?
            } else if pair.escaped {
                pair.value.replace(";;", ";")
            } else {
                pair.value.to_string()
            };
            set(command, value);
        }
        Accessor::Bytes { set, .. } => {
            set(command, Bytes::from(decode_base64(field, pair.value)?));
        }
        Accessor::Uint64 { set, .. } => {
            set(command, parse_unsigned::<u64>(field, pair.value)?);
        }
        Accessor::Duration { set, .. } => {
            set(command, Mtime::from_nanos(parse_number::<i64>(field, pair.value)?));
        }
        Accessor::Permissions { set, .. } => {
            set(command, Permissions::from_mode(parse_unsigned::<u32>(field, pair.value)?));
        }
        Accessor::Enum { set, .. } => {
            set(command, pair.value).map_err(|err| FtError::InvalidEnumValue {
                field: field.name.to_string(),
                value: err.value,
            })?;
        }
    }

    Ok(())
}

fn decode_base64(field: &FieldDescriptor, value: &str) -> Result<Vec<u8>> {
    WIRE_BASE64
        .decode(value)
        .map_err(|err| FtError::InvalidEncoding {
            field: field.name.to_string(),
            reason: err.to_string(),
        })
}

fn parse_number<T>(field: &FieldDescriptor, value: &str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    value.parse::<T>().map_err(|err| FtError::InvalidNumber {
        field: field.name.to_string(),
        value: value.to_string(),
        reason: err.to_string(),
    })
}

/// Digits only; a leading `+` is rejected like any other sign
fn parse_unsigned<T>(field: &FieldDescriptor, value: &str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    if value.starts_with('+') {
        return Err(FtError::InvalidNumber {
            field: field.name.to_string(),
            value: value.to_string(),
            reason: "unsigned value must not carry a sign".to_string(),
        });
    }
    parse_number(field, value)
}

// =============================================================================
// Configured Codec
// =============================================================================

/// Encoder/decoder pair driven by a [`Config`]
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: Config,
}

impl Codec {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encode, prefixing the configured code when `include_prefix` is set
    pub fn encode(&self, command: &FileTransmissionCommand) -> String {
        let prefix = self
            .config
            .include_prefix
            .then_some(self.config.prefix_code);
        encode_with_prefix(command, prefix)
    }

    /// Decode, removing a leading prefix code first when `strip_prefix` is set
    pub fn decode(&self, serialized: &str) -> Result<FileTransmissionCommand> {
        let body = if self.config.strip_prefix {
            self.strip_prefix(serialized)
        } else {
            serialized
        };
        decode_command(body)
    }

    fn strip_prefix<'a>(&self, serialized: &'a str) -> &'a str {
        let code = self.config.prefix_code.to_string();
        match serialized.strip_prefix(code.as_str()) {
            Some("") => "",
            Some(rest) => rest.strip_prefix(SEPARATOR).unwrap_or(serialized),
            None => serialized,
        }
    }
}
