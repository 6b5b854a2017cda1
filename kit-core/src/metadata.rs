//! Metadata structs and the field documentation attached to them.
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Error, Result};

/// Type information that is flattened into every kubernetes object
#[derive(Deserialize, Serialize, Clone, Default, Debug, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    /// The version of the API
    pub api_version: String,

    /// The name of the API
    pub kind: String,
}

impl TypeMeta {
    /// Construct from an explicit apiVersion and kind
    pub fn new(api_version: &str, kind: &str) -> Self {
        Self {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Human-readable descriptions of the standard `ObjectMeta` fields
///
/// Table column definitions for metadata-derived columns take their description from here.
/// The defaults carry the upstream apimachinery documentation; an apiserver can override
/// individual entries at startup with [`MetadataDescriptions::from_yaml`] and then share the
/// value read-only.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct MetadataDescriptions(BTreeMap<String, String>);

const DEFAULT_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "name",
        "Name must be unique within a namespace. Is required when creating resources, although some resources may allow a client to request the generation of an appropriate name automatically. Name is primarily intended for creation idempotence and configuration definition. Cannot be updated. More info: https://kubernetes.io/docs/concepts/overview/working-with-objects/names#names",
    ),
    (
        "generateName",
        "GenerateName is an optional prefix, used by the server, to generate a unique name ONLY IF the Name field has not been provided. If this field is used, the name returned to the client will be different than the name passed. This value will also be combined with a unique suffix. The provided value has the same validation rules as the Name field, and may be truncated by the length of the suffix required to make the value unique on the server.",
    ),
    (
        "namespace",
        "Namespace defines the space within which each name must be unique. An empty namespace is equivalent to the \"default\" namespace, but \"default\" is the canonical representation. Not all objects are required to be scoped to a namespace - the value of this field for those objects will be empty.\n\nMust be a DNS_LABEL. Cannot be updated. More info: https://kubernetes.io/docs/concepts/overview/working-with-objects/namespaces",
    ),
    (
        "uid",
        "UID is the unique in time and space value for this object. It is typically generated by the server on successful creation of a resource and is not allowed to change on PUT operations.\n\nPopulated by the system. Read-only. More info: https://kubernetes.io/docs/concepts/overview/working-with-objects/names#uids",
    ),
    (
        "resourceVersion",
        "An opaque value that represents the internal version of this object that can be used by clients to determine when objects have changed. May be used for optimistic concurrency, change detection, and the watch operation on a resource or set of resources. Clients must treat these values as opaque and passed unmodified back to the server. They may only be valid for a particular resource or set of resources.\n\nPopulated by the system. Read-only. Value must be treated as opaque by clients and .",
    ),
    (
        "generation",
        "A sequence number representing a specific generation of the desired state. Populated by the system. Read-only.",
    ),
    (
        "creationTimestamp",
        "CreationTimestamp is a timestamp representing the server time when this object was created. It is not guaranteed to be set in happens-before order across separate operations. Clients may not set this value. It is represented in RFC3339 form and is in UTC.\n\nPopulated by the system. Read-only. Null for lists. More info: https://git.k8s.io/community/contributors/devel/sig-architecture/api-conventions.md#metadata",
    ),
    (
        "deletionTimestamp",
        "DeletionTimestamp is RFC 3339 date and time at which this resource will be deleted. This field is set by the server when a graceful deletion is requested by the user, and is not directly settable by a client.",
    ),
    (
        "labels",
        "Map of string keys and values that can be used to organize and categorize (scope and select) objects. May match selectors of replication controllers and services. More info: https://kubernetes.io/docs/concepts/overview/working-with-objects/labels",
    ),
    (
        "annotations",
        "Annotations is an unstructured key value map stored with a resource that may be set by external tools to store and retrieve arbitrary metadata. They are not queryable and should be preserved when modifying objects. More info: https://kubernetes.io/docs/concepts/overview/working-with-objects/annotations",
    ),
    (
        "ownerReferences",
        "List of objects depended by this object. If ALL objects in the list have been deleted, this object will be garbage collected. If this object is managed by a controller, then an entry in this list will point to this controller, with the controller field set to true. There cannot be more than one managing controller.",
    ),
    (
        "finalizers",
        "Must be empty before the object is deleted from the registry. Each entry is an identifier for the responsible component that will remove the entry from the list. If the deletionTimestamp of the object is non-nil, entries in this list can only be removed. Finalizers may be processed and removed in any order.",
    ),
];

impl Default for MetadataDescriptions {
    fn default() -> Self {
        Self(
            DEFAULT_DESCRIPTIONS
                .iter()
                .map(|(field, desc)| (field.to_string(), desc.to_string()))
                .collect(),
        )
    }
}

impl MetadataDescriptions {
    /// Returns the description for a metadata field in its JSON spelling, or `""` when unknown
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or_default()
    }

    /// Overrides the description of a single field
    #[must_use]
    pub fn with(mut self, field: &str, description: &str) -> Self {
        self.0.insert(field.to_string(), description.to_string());
        self
    }

    /// Loads a YAML mapping of `field: description` on top of the defaults
    ///
    /// Fields not mentioned keep their upstream description.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let overrides: BTreeMap<String, String> =
            serde_yaml::from_str(yaml).map_err(Error::ParseDescriptions)?;
        tracing::debug!(overrides = overrides.len(), "loaded metadata descriptions");
        let mut descriptions = Self::default();
        descriptions.0.extend(overrides);
        Ok(descriptions)
    }
}
