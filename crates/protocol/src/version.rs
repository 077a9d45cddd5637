//! Numeric client version encoding
//!
//! A client version is packed into a single integer as base-100 digits:
//! `major * 1_000_000 + minor * 10_000 + revision * 100 + build`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier for the major component
pub const MAJOR_FACTOR: u32 = 1_000_000;
/// Multiplier for the minor component
pub const MINOR_FACTOR: u32 = 10_000;
/// Multiplier for the revision component
pub const REVISION_FACTOR: u32 = 100;

/// Client version split into its four components
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientVersion {
    pub major: u32,
    pub minor: u8,
    pub revision: u8,
    pub build: u8,
}

impl ClientVersion {
    pub const fn new(major: u32, minor: u8, revision: u8, build: u8) -> Self {
        Self {
            major,
            minor,
            revision,
            build,
        }
    }

    /// Decompose a packed version number
    pub const fn from_encoded(version: u32) -> Self {
        Self {
            major: version / MAJOR_FACTOR,
            minor: ((version / MINOR_FACTOR) % 100) as u8,
            revision: ((version / REVISION_FACTOR) % 100) as u8,
            build: (version % 100) as u8,
        }
    }

    /// Pack into the integer form used on the wire.
    ///
    /// Components above 99 are not rejected; they spill into the next digit
    /// pair exactly as the positional encoding implies. A major above 4294
    /// wraps.
    pub const fn encoded(&self) -> u32 {
        self.major
            .wrapping_mul(MAJOR_FACTOR)
            .wrapping_add(self.minor as u32 * MINOR_FACTOR)
            .wrapping_add(self.revision as u32 * REVISION_FACTOR)
            .wrapping_add(self.build as u32)
    }
}

impl From<u32> for ClientVersion {
    fn from(version: u32) -> Self {
        Self::from_encoded(version)
    }
}

impl From<ClientVersion> for u32 {
    fn from(version: ClientVersion) -> Self {
        version.encoded()
    }
}

/// Renders `major.minor.revision`, with `.build` appended only when build is non-zero
impl fmt::Display for ClientVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)?;
        if self.build != 0 {
            write!(f, ".{}", self.build)?;
        }
        Ok(())
    }
}

/// Render a packed version number as a dotted string
pub fn format_version(version: u32) -> String {
    ClientVersion::from_encoded(version).to_string()
}
