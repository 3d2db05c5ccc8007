//! Shared types and enums used across coordclean.
//! Includes the `Check` identifiers, the `EqualMode` comparison and the
//! validated `Iso3` country code.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A coordinate test that can be run against every record
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Check {
    /// Coordinates present, finite and within lat/lon bounds. Always run.
    #[value(skip)]
    Validity,
    Zeros,
    Equal,
    Centroids,
    Seas,
    Countries,
    Duplicates,
}

impl Check {
    /// Checks run when nothing else is configured (validity is implicit)
    pub const DEFAULTS: [Check; 4] = [Check::Seas, Check::Zeros, Check::Equal, Check::Centroids];

    /// Name of the optional per-check flag column
    pub fn flag_column(&self) -> &'static str {
        match self {
            Check::Validity => "cc_val",
            Check::Zeros => "cc_zer",
            Check::Equal => "cc_equ",
            Check::Centroids => "cc_cen",
            Check::Seas => "cc_sea",
            Check::Countries => "cc_con",
            Check::Duplicates => "cc_dpl",
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Check::Validity => "validity",
            Check::Zeros => "zeros",
            Check::Equal => "equal",
            Check::Centroids => "centroids",
            Check::Seas => "seas",
            Check::Countries => "countries",
            Check::Duplicates => "duplicates",
        };
        write!(f, "{}", s)
    }
}

/// How the `equal` check compares latitude with longitude
#[derive(Copy, Clone, PartialEq, Eq, Default, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EqualMode {
    /// latitude == longitude
    #[default]
    Identical,
    /// |latitude| == |longitude|
    Absolute,
}

impl std::fmt::Display for EqualMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EqualMode::Identical => write!(f, "identical"),
            EqualMode::Absolute => write!(f, "absolute"),
        }
    }
}

/// Three-letter ISO 3166-1 alpha-3 country code, always uppercase ASCII
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iso3([u8; 3]);

impl Iso3 {
    /// Accepts exactly three ASCII letters in any case
    pub fn new(code: &str) -> Option<Self> {
        let bytes = code.trim().as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return None;
        }
        Some(Iso3([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl std::fmt::Display for Iso3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for Iso3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Iso3({})", self.as_str())
    }
}

impl Serialize for Iso3 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Iso3 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Iso3::new(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO3 code: {raw:?}")))
    }
}
