//! Client identity reported to peers
//!
//! The name is the same for every build flavour so that the daemon and the GUI
//! cannot be told apart from the network.
//!
//! The build description is taken from the build environment when available:
//! * `BUILD_DESC` is used verbatim (typically `git describe` output)
//! * otherwise `BUILD_SUFFIX` gives `v<maj>.<min>.<rev>.<build>-<suffix>`
//! * otherwise `v<maj>.<min>.<rev>.<build>-unk`
//!
//! [`CLIENT_VERSION_SUFFIX`] is appended in every case.

use crate::subversion::SubVersion;
use crate::version::ClientVersion;

/// Name of the client reported in the `version` message
pub const CLIENT_NAME: &str = "DeVault Core";

pub const CLIENT_VERSION_MAJOR: u32 = 1;
pub const CLIENT_VERSION_MINOR: u8 = 2;
pub const CLIENT_VERSION_REVISION: u8 = 1;
pub const CLIENT_VERSION_BUILD: u8 = 0;

/// Appended to the build description
pub const CLIENT_VERSION_SUFFIX: &str = "";

/// Current client version
pub const CLIENT_VERSION: ClientVersion = ClientVersion::new(
    CLIENT_VERSION_MAJOR,
    CLIENT_VERSION_MINOR,
    CLIENT_VERSION_REVISION,
    CLIENT_VERSION_BUILD,
);

/// Build description from the compile-time environment
pub fn client_build() -> String {
    describe_build(option_env!("BUILD_DESC"), option_env!("BUILD_SUFFIX"))
}

fn describe_build(build_desc: Option<&str>, build_suffix: Option<&str>) -> String {
    let desc = match (build_desc, build_suffix) {
        (Some(desc), _) => desc.to_string(),
        (None, suffix) => format!(
            "v{}.{}.{}.{}-{}",
            CLIENT_VERSION.major,
            CLIENT_VERSION.minor,
            CLIENT_VERSION.revision,
            CLIENT_VERSION.build,
            suffix.unwrap_or("unk")
        ),
    };
    desc + CLIENT_VERSION_SUFFIX
}

/// Full version string shown to users
pub fn format_full_version() -> String {
    client_build()
}

/// Subversion this client advertises, with the given comments
pub fn user_agent<S: AsRef<str>>(comments: &[S]) -> SubVersion {
    SubVersion {
        name: CLIENT_NAME.to_string(),
        version: CLIENT_VERSION.encoded(),
        comments: comments.iter().map(|c| c.as_ref().to_string()).collect(),
    }
}
