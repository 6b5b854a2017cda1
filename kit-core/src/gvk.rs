//! Type information structs for identifying resource kinds.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to parse group version: {0}")]
/// Failed to parse group version.
pub struct ParseGroupVersionError(pub String);

/// A resource (plural, lowercase) within an API group
///
/// This is what a registry is bound to, and what errors about a resource refer to.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct GroupResource {
    /// API group, empty for the core group
    pub group: String,
    /// Plural resource name
    pub resource: String,
}

impl GroupResource {
    /// Construct from an explicit group and resource
    pub fn new(group: &str, resource: &str) -> Self {
        Self {
            group: group.to_string(),
            resource: resource.to_string(),
        }
    }

    /// Whether neither group nor resource is set
    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.resource.is_empty()
    }
}

/// Formats as `resource.group`, or just `resource` for the core group
impl fmt::Display for GroupResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.resource)
        } else {
            write!(f, "{}.{}", self.resource, self.group)
        }
    }
}

/// A kind within an API group, without a version
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct GroupKind {
    /// API group, empty for the core group
    pub group: String,
    /// Kind
    pub kind: String,
}

impl GroupKind {
    /// Construct from an explicit group and kind
    pub fn new(group: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            kind: kind.to_string(),
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

/// Core information about an API Resource.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupVersionKind {
    /// API group
    pub group: String,
    /// Version
    pub version: String,
    /// Kind
    pub kind: String,
}

impl GroupVersionKind {
    /// Construct from explicit group, version, and kind
    pub fn gvk(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Generate the apiVersion string used in a kind's yaml
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Drops the version
    pub fn group_kind(&self) -> GroupKind {
        GroupKind::new(&self.group, &self.kind)
    }
}

impl FromStr for GroupVersionKind {
    type Err = ParseGroupVersionError;

    /// Parses `group/version/Kind`, or `version/Kind` for the core group
    fn from_str(gvk: &str) -> Result<Self, Self::Err> {
        let (group, version, kind) = match *gvk.split('/').collect::<Vec<_>>().as_slice() {
            [g, v, k] if !v.is_empty() && !k.is_empty() => (g, v, k),
            [v, k] if !v.is_empty() && !k.is_empty() => ("", v, k),
            _ => return Err(ParseGroupVersionError(gvk.into())),
        };
        Ok(Self::gvk(group, version, kind))
    }
}
