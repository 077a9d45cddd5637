//! Subversion protocol library for devault-subver
//!
//! This crate formats and parses the BIP-14 subversion string that a node
//! advertises in the `version` handshake message, and defines the client
//! identity (name, packed version, build description) that goes into it.
//! It performs no I/O.
//!
//! # Example
//!
//! ```
//! use protocol::{format_sub_version, format_version, unformat_sub_version};
//!
//! assert_eq!(format_version(1_020_304), "1.2.3.4");
//!
//! let subver = format_sub_version("DeVault Core", 1_000_100, &["EB32.0"]);
//! assert_eq!(subver, "/DeVault Core:1.0.1(EB32.0)/");
//! assert_eq!(unformat_sub_version(&subver), 1_000_100);
//! ```
//!
//! # Parse modes
//!
//! Deployed peers treat an unparsable subversion as version `0`. Callers that
//! need to know why decoding failed can opt into strict parsing:
//!
//! ```
//! use protocol::{ParseMode, SubVersionError};
//!
//! assert_eq!(ParseMode::Compatible.unformat("/DeVault Core:1.0.1/"), Ok(0));
//! assert_eq!(
//!     ParseMode::Strict.unformat("/DeVault Core:1.0.1/"),
//!     Err(SubVersionError::CommentBlock { pieces: 1 })
//! );
//! ```

pub mod build_info;
pub mod error;
pub mod subversion;
pub mod version;

pub use build_info::{
    CLIENT_NAME, CLIENT_VERSION, client_build, format_full_version, user_agent,
};
pub use error::{Result, SubVersionError};
pub use subversion::{
    ParseMode, SubVersion, UNPARSABLE, format_sub_version, is_round_trip_safe, parse_sub_version,
    unformat_sub_version,
};
pub use version::{ClientVersion, format_version};
