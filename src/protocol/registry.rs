//! Field registry
//!
//! The one place where the wire fields of a [`FileTransmissionCommand`] are
//! declared. Both the encoder and the decoder walk this table, so adding a
//! field means adding one descriptor here.
//!
//! The table is built on first use and never mutated afterwards; concurrent
//! first callers block until the single initialisation finishes.

use std::collections::HashMap;

use bytes::Bytes;
use once_cell::sync::Lazy;

use super::command::{FileTransmissionCommand, Mtime, Permissions};
use super::enums::{Action, Compression, FileType, QuietLevel, TransmissionType, WireEnum};
use crate::error::EnumParseError;

type Cmd = FileTransmissionCommand;

/// Value kind of a wire field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Bytes,
    Uint64,
    Duration,
    Permissions,
    Enum,
}

/// Typed getter/setter pair for one field
#[derive(Clone, Copy)]
pub enum Accessor {
    Text {
        get: fn(&Cmd) -> &str,
        set: fn(&mut Cmd, String),
    },
    Bytes {
        get: fn(&Cmd) -> &Bytes,
        set: fn(&mut Cmd, Bytes),
    },
    Uint64 {
        get: fn(&Cmd) -> u64,
        set: fn(&mut Cmd, u64),
    },
    Duration {
        get: fn(&Cmd) -> Mtime,
        set: fn(&mut Cmd, Mtime),
    },
    Permissions {
        get: fn(&Cmd) -> Permissions,
        set: fn(&mut Cmd, Permissions),
    },
    /// `get` yields `None` for the zero variant
    Enum {
        get: fn(&Cmd) -> Option<&'static str>,
        set: fn(&mut Cmd, &str) -> Result<(), EnumParseError>,
    },
}

impl Accessor {
    pub fn kind(&self) -> FieldKind {
        match self {
            Accessor::Text { .. } => FieldKind::Text,
            Accessor::Bytes { .. } => FieldKind::Bytes,
            Accessor::Uint64 { .. } => FieldKind::Uint64,
            Accessor::Duration { .. } => FieldKind::Duration,
            Accessor::Permissions { .. } => FieldKind::Permissions,
            Accessor::Enum { .. } => FieldKind::Enum,
        }
    }
}

impl std::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Accessor::{:?}", self.kind())
    }
}

/// Description of one wire field
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Key used on the wire
    pub name: &'static str,

    /// Value is base64 on the wire instead of escaped text
    pub base64: bool,

    pub accessor: Accessor,
}

impl FieldDescriptor {
    pub fn kind(&self) -> FieldKind {
        self.accessor.kind()
    }
}

fn wire_value<E: WireEnum>(e: E) -> Option<&'static str> {
    (!e.is_zero()).then(|| e.to_wire_str())
}

fn text(name: &'static str, get: fn(&Cmd) -> &str, set: fn(&mut Cmd, String)) -> FieldDescriptor {
    FieldDescriptor {
        name,
        base64: false,
        accessor: Accessor::Text { get, set },
    }
}

fn base64_text(
    name: &'static str,
    get: fn(&Cmd) -> &str,
    set: fn(&mut Cmd, String),
) -> FieldDescriptor {
    FieldDescriptor {
        base64: true,
        ..text(name, get, set)
    }
}

fn field(name: &'static str, accessor: Accessor) -> FieldDescriptor {
    FieldDescriptor {
        name,
        base64: matches!(accessor, Accessor::Bytes { .. }),
        accessor,
    }
}

/// Immutable table of wire fields, in emission order
#[derive(Debug)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    by_name: HashMap<&'static str, usize>,
}

impl FieldRegistry {
    fn build() -> Self {
        let fields = vec![
            field(
                "ac",
                Accessor::Enum {
                    get: |c| wire_value(c.action),
                    set: |c, v| {
                        c.action = Action::from_wire_str(v)?;
                        Ok(())
                    },
                },
            ),
            field(
                "zip",
                Accessor::Enum {
                    get: |c| wire_value(c.compression),
                    set: |c, v| {
                        c.compression = Compression::from_wire_str(v)?;
                        Ok(())
                    },
                },
            ),
            field(
                "ft",
                Accessor::Enum {
                    get: |c| wire_value(c.file_type),
                    set: |c, v| {
                        c.file_type = FileType::from_wire_str(v)?;
                        Ok(())
                    },
                },
            ),
            field(
                "tt",
                Accessor::Enum {
                    get: |c| wire_value(c.transmission_type),
                    set: |c, v| {
                        c.transmission_type = TransmissionType::from_wire_str(v)?;
                        Ok(())
                    },
                },
            ),
            field(
                "q",
                Accessor::Enum {
                    get: |c| wire_value(c.quiet),
                    set: |c, v| {
                        c.quiet = QuietLevel::from_wire_str(v)?;
                        Ok(())
                    },
                },
            ),
            text("id", |c| c.id.as_str(), |c, v| c.id = v),
            text("fid", |c| c.file_id.as_str(), |c, v| c.file_id = v),
            base64_text("pw", |c| c.bypass.as_str(), |c, v| c.bypass = v),
            text("n", |c| c.name.as_str(), |c, v| c.name = v),
            base64_text("st", |c| c.status.as_str(), |c, v| c.status = v),
            text("pr", |c| c.parent.as_str(), |c, v| c.parent = v),
            field(
                "mod",
                Accessor::Duration {
                    get: |c| c.mtime,
                    set: |c, v| c.mtime = v,
                },
            ),
            field(
                "prm",
                Accessor::Permissions {
                    get: |c| c.permissions,
                    set: |c, v| c.permissions = v,
                },
            ),
            field(
                "sz",
                Accessor::Uint64 {
                    get: |c| c.size,
                    set: |c, v| c.size = v,
                },
            ),
            field(
                "d",
                Accessor::Bytes {
                    get: |c| &c.data,
                    set: |c, v| c.data = v,
                },
            ),
        ];

        let by_name: HashMap<_, _> = fields
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.name, idx))
            .collect();
        assert_eq!(by_name.len(), fields.len(), "duplicate wire field name");

        Self { fields, by_name }
    }

    /// Look up a field by wire name
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Fields in emission order
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

static REGISTRY: Lazy<FieldRegistry> = Lazy::new(FieldRegistry::build);

/// The process-wide field registry
pub fn registry() -> &'static FieldRegistry {
    &REGISTRY
}
