//! Enum codecs
//!
//! Closed enumerations carried by a command. On the wire each variant is its
//! canonical name, never its ordinal. The first variant of every enum is the
//! zero value and is omitted by the encoder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EnumParseError;

/// Two-way mapping between an enum and its canonical wire names
pub trait WireEnum: Sized + Copy + Default + PartialEq + 'static {
    /// Every variant, zero value first
    const VARIANTS: &'static [Self];

    /// Canonical wire name of this variant
    fn to_wire_str(self) -> &'static str;

    /// Parse a canonical wire name (exact, case-sensitive)
    fn from_wire_str(s: &str) -> Result<Self, EnumParseError> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.to_wire_str() == s)
            .ok_or_else(|| EnumParseError {
                value: s.to_string(),
            })
    }

    /// True for the zero (absent) variant
    fn is_zero(self) -> bool {
        self == Self::default()
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[repr(u8)]
        pub enum $name {
            #[default]
            $(
                $(#[$vmeta])*
                $variant
            ),+
        }

        impl WireEnum for $name {
            const VARIANTS: &'static [Self] = &[$($name::$variant),+];

            fn to_wire_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.to_wire_str())
            }
        }

        impl FromStr for $name {
            type Err = EnumParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_wire_str(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.to_wire_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_wire_str(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Kind of operation a command requests
    pub enum Action {
        Invalid => "invalid",
        File => "file",
        Data => "data",
        EndData => "end_data",
        Receive => "receive",
        Send => "send",
        Cancel => "cancel",
        Status => "status",
        Finish => "finish",
    }
}

wire_enum! {
    /// Compression applied to data chunks
    pub enum Compression {
        None => "none",
        Zlib => "zlib",
    }
}

wire_enum! {
    /// Type of filesystem entry being transferred
    pub enum FileType {
        Regular => "regular",
        Symlink => "symlink",
        Directory => "directory",
        /// Hard link to an entry sent earlier in the session
        Hardlink => "link",
    }
}

wire_enum! {
    /// How file contents are transmitted
    pub enum TransmissionType {
        Simple => "simple",
        Rsync => "rsync",
    }
}

wire_enum! {
    /// Which replies the receiving side suppresses, in increasing order
    pub enum QuietLevel {
        None => "none",
        Acknowledgements => "acknowledgements",
        Errors => "errors",
    }
}

impl FileType {
    /// Three letter tag used in transfer listings
    pub fn short_text(self) -> &'static str {
        match self {
            FileType::Regular => "fil",
            FileType::Directory => "dir",
            FileType::Symlink => "sym",
            FileType::Hardlink => "lnk",
        }
    }

    /// Terminal color name used in transfer listings
    pub fn color(self) -> &'static str {
        match self {
            FileType::Regular => "yellow",
            FileType::Directory => "magenta",
            FileType::Symlink => "blue",
            FileType::Hardlink => "green",
        }
    }
}

impl QuietLevel {
    /// Acknowledgement replies are suppressed
    pub fn suppresses_acknowledgements(self) -> bool {
        self >= QuietLevel::Acknowledgements
    }

    /// Error replies are suppressed
    pub fn suppresses_errors(self) -> bool {
        self >= QuietLevel::Errors
    }
}

impl PartialOrd for QuietLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QuietLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}
