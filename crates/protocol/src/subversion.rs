//! BIP-14 subversion string formatting and parsing
//!
//! The subversion field of the `version` handshake message identifies the
//! client as `/<name>:<version>(<comment>; <comment>)/`. See
//! <https://github.com/bitcoin/bips/blob/master/bip-0014.mediawiki>.
//!
//! Parsing comes in two flavours selected by [`ParseMode`]:
//! [`unformat_sub_version`] returns `0` on any malformed input, which is what
//! existing peers expect, while [`parse_sub_version`] reports why the input
//! was rejected. Both accept exactly the same strings.

use crate::error::{Result, SubVersionError};
use crate::version::{ClientVersion, MAJOR_FACTOR, MINOR_FACTOR, REVISION_FACTOR};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use tracing::{debug, trace};

/// Characters that break parsing or the subversion shape when they appear in a comment
pub const RESERVED_COMMENT_CHARS: [char; 4] = [':', '(', ')', '/'];

/// Value returned by [`unformat_sub_version`] when the input cannot be decoded
pub const UNPARSABLE: u32 = 0;

/// Owned subversion fields, rendered through `Display`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubVersion {
    pub name: String,
    pub version: u32,
    #[serde(default)]
    pub comments: Vec<String>,
}

impl SubVersion {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
            comments: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }
}

impl fmt::Display for SubVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rendered {
            name: &self.name,
            version: self.version,
            comments: &self.comments,
        }
        .fmt(f)
    }
}

/// Borrowed view used to render without taking ownership of the fields
struct Rendered<'a, S> {
    name: &'a str,
    version: u32,
    comments: &'a [S],
}

impl<S: AsRef<str>> fmt::Display for Rendered<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}:{}", self.name, ClientVersion::from_encoded(self.version))?;
        if let Some((first, rest)) = self.comments.split_first() {
            write!(f, "({}", first.as_ref())?;
            for comment in rest {
                write!(f, "; {}", comment.as_ref())?;
            }
            f.write_char(')')?;
        }
        f.write_char('/')
    }
}

/// Format the subversion field.
///
/// The comment block is left out entirely when `comments` is empty. Comments
/// are written verbatim; use [`is_round_trip_safe`] to check them first if the
/// result must be parseable again.
pub fn format_sub_version<S: AsRef<str>>(name: &str, version: u32, comments: &[S]) -> String {
    Rendered {
        name,
        version,
        comments,
    }
    .to_string()
}

/// Whether a comment avoids every reserved delimiter
pub fn is_round_trip_safe(comment: &str) -> bool {
    !comment.contains(RESERVED_COMMENT_CHARS)
}

/// Recover the packed version from a subversion string such as
/// `/DeVault Core:1.0.1(EB32.0)/`.
///
/// Returns [`UNPARSABLE`] (`0`) for any malformed input, so a genuine version
/// `0.0.0` cannot be told apart from garbage. Inputs without a comment block
/// and versions with a fourth (build) component are rejected, and the build
/// component is never reconstructed. Use [`parse_sub_version`] to learn why an
/// input was rejected.
pub fn unformat_sub_version(input: &str) -> u32 {
    match parse_sub_version(input) {
        Ok(version) => version,
        Err(e) => {
            debug!(input, error = %e, "Unparsable subversion, using sentinel");
            UNPARSABLE
        }
    }
}

/// Decode a subversion string, reporting the first structural or numeric failure.
///
/// Accepts exactly the inputs for which [`unformat_sub_version`] returns a
/// real version.
pub fn parse_sub_version(input: &str) -> Result<u32> {
    // Drop the "/<name>" prefix
    let after_name = match split_exact::<2>(input, ':') {
        Ok([_, rest]) => rest,
        Err(pieces) => return Err(SubVersionError::NameSeparator { pieces }),
    };

    // Drop the "(<comments>)/" suffix
    let digits = match split_exact::<2>(after_name, '(') {
        Ok([digits, _]) => digits,
        Err(pieces) => return Err(SubVersionError::CommentBlock { pieces }),
    };

    let components = split_exact::<3>(digits, '.')
        .map_err(|pieces| SubVersionError::VersionComponents { pieces })?;

    let major = parse_component(0, components[0])?;
    let minor = parse_component(1, components[1])?;
    let revision = parse_component(2, components[2])?;

    let value = i64::from(MAJOR_FACTOR) * major
        + i64::from(MINOR_FACTOR) * minor
        + i64::from(REVISION_FACTOR) * revision;
    let version =
        u32::try_from(value).map_err(|_| SubVersionError::VersionOutOfRange { value })?;

    trace!(input, version, "Decoded subversion");
    Ok(version)
}

/// Split on every occurrence of `sep`, requiring exactly `N` pieces.
///
/// On mismatch returns the number of pieces actually found.
fn split_exact<const N: usize>(input: &str, sep: char) -> std::result::Result<[&str; N], usize> {
    let pieces: Vec<&str> = input.split(sep).collect();
    let found = pieces.len();
    pieces.try_into().map_err(|_| found)
}

/// Parse a component the way C `stoi` does: leading whitespace and a sign are
/// allowed, at least one digit is required, anything after the digits is ignored.
fn parse_component(position: usize, text: &str) -> Result<i64> {
    let trimmed =
        text.trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r'));
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return Err(SubVersionError::InvalidComponent {
            position,
            text: text.to_string(),
        });
    }

    let out_of_range = || SubVersionError::ComponentOutOfRange {
        position,
        text: text.to_string(),
    };
    let magnitude: i64 = unsigned[..end].parse().map_err(|_| out_of_range())?;
    let value = if negative { -magnitude } else { magnitude };
    if i32::try_from(value).is_err() {
        return Err(out_of_range());
    }
    Ok(value)
}

/// How malformed subversion strings are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Malformed input decodes to `0`, matching what deployed peers do
    #[default]
    Compatible,
    /// Malformed input is an error
    Strict,
}

impl ParseMode {
    /// Decode `input` according to this mode.
    ///
    /// Never fails in [`ParseMode::Compatible`].
    pub fn unformat(self, input: &str) -> Result<u32> {
        match self {
            ParseMode::Compatible => Ok(unformat_sub_version(input)),
            ParseMode::Strict => parse_sub_version(input),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMode::Compatible => f.write_str("compatible"),
            ParseMode::Strict => f.write_str("strict"),
        }
    }
}
