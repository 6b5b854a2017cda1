//! Shared types and traits for plugging resource kinds into a generic apiserver registry
//!
//! This crate carries no registry behavior of its own. It defines the [`Object`] model
//! that registry strategies operate on, the optional [`capability`] traits an object can
//! opt into, and the wire types (tables, statuses, selectors) those strategies produce.
//!
//! The strategies themselves live in `apiserver-kit-rest`; everything here is
//! re-exported from `apiserver-kit` under `apiserver_kit::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod capability;

pub mod fields;

pub mod gvk;
pub use gvk::{GroupKind, GroupResource, GroupVersionKind};

pub mod labels;

pub mod metadata;
pub use metadata::{ListMeta, MetadataDescriptions, ObjectMeta, TypeMeta};

pub mod names;

pub mod object;
pub use object::{HasStatus, List, Object, ObjectList};

pub mod request;
pub use request::{RequestContext, RequestInfo};

pub mod response;
pub use response::Status;

pub mod table;
pub use table::{Table, TableColumnDefinition, TableOptions, TableRow};

pub mod validation;
pub use validation::{ErrorList, FieldError};

mod error;
pub use error::Error;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
