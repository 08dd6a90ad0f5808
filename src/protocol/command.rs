//! Command definitions
//!
//! The single record exchanged by the file transfer protocol. Every field is
//! optional on the wire: a field at its zero value is simply not sent.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::enums::{Action, Compression, FileType, QuietLevel, TransmissionType, WireEnum};

/// Modification time as signed nanoseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mtime(i64);

impl Mtime {
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert a wall clock time, saturating outside the i64 nanosecond range
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self::from(after),
            Err(err) => {
                let before = i64::try_from(err.duration().as_nanos()).unwrap_or(i64::MAX);
                Self(-before)
            }
        }
    }
}

impl From<Duration> for Mtime {
    fn from(d: Duration) -> Self {
        Self(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
    }
}

/// POSIX permission bits; anything outside `0o777` is dropped
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Permissions(u32);

impl Permissions {
    /// Mask covering the significant permission bits
    pub const MASK: u32 = 0o777;

    /// Keep only the permission bits of a full file mode
    pub const fn from_mode(mode: u32) -> Self {
        Self(mode & Self::MASK)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Permissions {
    fn from(mode: u32) -> Self {
        Self::from_mode(mode)
    }
}

impl From<Permissions> for u32 {
    fn from(p: Permissions) -> Self {
        p.0
    }
}

impl fmt::Debug for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permissions({:#o})", self.0)
    }
}

fn is_zero_enum<E: WireEnum>(e: &E) -> bool {
    e.is_zero()
}

fn is_zero_u64(n: &u64) -> bool {
    *n == 0
}

/// A single file transmission command
///
/// `data` never appears in the `Debug` or `Display` renderings, only its
/// length does in `Debug`. `Debug` also hides the bypass password.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileTransmissionCommand {
    #[serde(rename = "ac", default, skip_serializing_if = "is_zero_enum")]
    pub action: Action,

    #[serde(rename = "zip", default, skip_serializing_if = "is_zero_enum")]
    pub compression: Compression,

    #[serde(rename = "ft", default, skip_serializing_if = "is_zero_enum")]
    pub file_type: FileType,

    #[serde(rename = "tt", default, skip_serializing_if = "is_zero_enum")]
    pub transmission_type: TransmissionType,

    #[serde(rename = "q", default, skip_serializing_if = "is_zero_enum")]
    pub quiet: QuietLevel,

    /// Session identifier
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Identifier of a file within the session
    #[serde(rename = "fid", default, skip_serializing_if = "String::is_empty")]
    pub file_id: String,

    /// Password used to bypass the confirmation prompt
    #[serde(rename = "pw", default, skip_serializing_if = "String::is_empty")]
    pub bypass: String,

    #[serde(rename = "n", default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(rename = "st", default, skip_serializing_if = "String::is_empty")]
    pub status: String,

    #[serde(rename = "pr", default, skip_serializing_if = "String::is_empty")]
    pub parent: String,

    #[serde(rename = "mod", default, skip_serializing_if = "Mtime::is_zero")]
    pub mtime: Mtime,

    #[serde(rename = "prm", default, skip_serializing_if = "Permissions::is_zero")]
    pub permissions: Permissions,

    #[serde(rename = "sz", default, skip_serializing_if = "is_zero_u64")]
    pub size: u64,

    #[serde(skip)]
    pub data: Bytes,
}

impl FileTransmissionCommand {
    /// Create a command with only the action set
    pub fn new(action: Action) -> Self {
        Self {
            action,
            ..Self::default()
        }
    }

    /// Create a cancel command for a session
    pub fn cancel(id: impl Into<String>) -> Self {
        Self {
            action: Action::Cancel,
            id: id.into(),
            ..Self::default()
        }
    }

    /// Create a status reply for a file in a session
    pub fn status(
        id: impl Into<String>,
        file_id: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            action: Action::Status,
            id: id.into(),
            file_id: file_id.into(),
            status: status.into(),
            ..Self::default()
        }
    }

    /// Create a data chunk for a file in a session
    pub fn data_chunk(id: impl Into<String>, file_id: impl Into<String>, data: Bytes) -> Self {
        Self {
            action: Action::Data,
            id: id.into(),
            file_id: file_id.into(),
            data,
            ..Self::default()
        }
    }

    /// True when every field is at its zero value
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Debug for FileTransmissionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileTransmissionCommand")
            .field("action", &self.action)
            .field("compression", &self.compression)
            .field("file_type", &self.file_type)
            .field("transmission_type", &self.transmission_type)
            .field("quiet", &self.quiet)
            .field("id", &self.id)
            .field("file_id", &self.file_id)
            .field("bypass", &if self.bypass.is_empty() { "" } else { "<redacted>" })
            .field("name", &self.name)
            .field("status", &self.status)
            .field("parent", &self.parent)
            .field("mtime", &self.mtime)
            .field("permissions", &self.permissions)
            .field("size", &self.size)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Compact JSON keyed by wire names, zero fields and data left out
impl fmt::Display for FileTransmissionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
