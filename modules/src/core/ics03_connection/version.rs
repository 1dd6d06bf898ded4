use core::fmt;

use serde::{Deserialize, Serialize};

use ibc_verify_proto::ibc::core::connection::v1::Version as RawVersion;
use ibc_verify_proto::protobuf::Protobuf;

use crate::core::ics03_connection::error::Error;

/// Channel orderings a connection of the default version may carry.
const DEFAULT_FEATURES: [&str; 2] = ["ORDER_ORDERED", "ORDER_UNORDERED"];

/// Stores the identifier and the features supported by a version
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// unique version identifier
    identifier: String,
    /// list of features compatible with the specified identifier
    features: Vec<String>,
}

impl Version {
    pub fn new(identifier: String, features: Vec<String>) -> Self {
        Self {
            identifier,
            features,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Checks whether or not the given feature is supported in this version
    pub fn is_supported_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Checks that `proposed` narrows this version: same identifier, and every feature it
    /// lists is one this version supports.
    pub fn allows(&self, proposed: &Version) -> bool {
        self.identifier == proposed.identifier
            && proposed
                .features
                .iter()
                .all(|f| self.is_supported_feature(f))
    }
}

impl Protobuf<RawVersion> for Version {}

impl TryFrom<RawVersion> for Version {
    type Error = Error;

    fn try_from(value: RawVersion) -> Result<Self, Self::Error> {
        if value.identifier.trim().is_empty() {
            return Err(Error::empty_versions());
        }
        if value.features.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::empty_features());
        }
        Ok(Version {
            identifier: value.identifier,
            features: value.features,
        })
    }
}

impl From<Version> for RawVersion {
    fn from(value: Version) -> Self {
        Self {
            identifier: value.identifier,
            features: value.features,
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version {
            identifier: "1".to_string(),
            features: DEFAULT_FEATURES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Version {{ identifier: {}, features: [{}] }}",
            self.identifier,
            self.features.join(", ")
        )
    }
}

/// Returns the lists of supported versions
pub fn get_compatible_versions() -> Vec<Version> {
    vec![Version::default()]
}

/// Checks that `proposed` is allowed by one of the `offered` versions.
pub fn is_supported_version(offered: &[Version], proposed: &Version) -> bool {
    offered.iter().any(|v| v.allows(proposed))
}

/// Selects a version from the intersection of locally supported and counterparty versions.
///
/// Among the identifiers both sides support, the lowest one wins. The picked version carries
/// the features both sides list for it.
pub fn pick_version(
    supported_versions: &[Version],
    counterparty_versions: &[Version],
) -> Result<Version, Error> {
    let mut intersection: Vec<Version> = supported_versions
        .iter()
        .filter_map(|s| {
            counterparty_versions
                .iter()
                .find(|c| c.identifier == s.identifier)
                .map(|c| {
                    Version::new(
                        s.identifier.clone(),
                        s.features
                            .iter()
                            .filter(|f| c.is_supported_feature(f))
                            .cloned()
                            .collect(),
                    )
                })
        })
        .collect();

    intersection.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    intersection
        .into_iter()
        .next()
        .ok_or_else(Error::no_common_version)
}
