//! The object model registry strategies operate on.
//!
//! An [`Object`] is any resource value handed to a strategy by the apiserver. Besides
//! metadata access it exposes one probe method per [`capability`](crate::capability).
//! Every probe defaults to `None`; a type opts into a capability by implementing the
//! capability trait and overriding the matching probe to return `Some(self)`:
//!
//! ```
//! use apiserver_kit_core::{
//!     capability::Canonicalizer,
//!     ObjectMeta, Object,
//! };
//! use serde::Serialize;
//!
//! #[derive(Serialize, Debug, Default)]
//! struct Widget {
//!     metadata: ObjectMeta,
//!     colors: Vec<String>,
//! }
//!
//! impl Canonicalizer for Widget {
//!     fn canonicalize(&mut self) {
//!         self.colors.sort();
//!     }
//! }
//!
//! impl Object for Widget {
//!     fn meta(&self) -> Option<&ObjectMeta> {
//!         Some(&self.metadata)
//!     }
//!
//!     fn meta_mut(&mut self) -> Option<&mut ObjectMeta> {
//!         Some(&mut self.metadata)
//!     }
//!
//!     fn as_canonicalizer(&mut self) -> Option<&mut dyn Canonicalizer> {
//!         Some(self)
//!     }
//! }
//!
//! let mut w = Widget::default();
//! assert!((&mut w as &mut dyn Object).as_canonicalizer().is_some());
//! assert!((&w as &dyn Object).as_validater().is_none());
//! ```
use crate::{
    capability::{
        AllowCreateOnUpdater, AllowUnconditionalUpdater, Canonicalizer, NameGenerator, PrepareForCreate,
        PrepareForUpdate, Scoper, StatusSubResource, TableConverter, ValidateUpdater, Validater,
    },
    metadata::{ListMeta, ObjectMeta},
};
use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use serde::{Deserialize, Serialize};
use std::{any::Any, fmt};

/// Type-erased access to the concrete value behind a `dyn Object`
///
/// Implemented for every sized `'static` type; there is no need to implement it by hand.
pub trait AsAny: Any {
    /// Upcast to `&dyn Any`
    fn as_any(&self) -> &dyn Any;
    /// Upcast to `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// The Rust type name of the concrete value, for diagnostics
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Serialization of an object into the raw form embedded in table rows
///
/// Implemented for every `Serialize` type; there is no need to implement it by hand.
pub trait ToRaw {
    /// Serialize into a [`RawExtension`], `None` if serialization fails
    fn to_raw(&self) -> Option<RawExtension>;
}

impl<T: Serialize> ToRaw for T {
    fn to_raw(&self) -> Option<RawExtension> {
        serde_json::to_value(self).ok().map(RawExtension)
    }
}

/// A resource value (or collection of them) handled by a registry strategy
///
/// Each `as_*` probe answers "does this value implement capability X" and must be a pure
/// type check: return `Some(self)` or `None`, never mutate, never fail.
pub trait Object: AsAny + ToRaw + fmt::Debug + Send + Sync {
    /// Identity metadata, `None` for values that have none (such as lists)
    fn meta(&self) -> Option<&ObjectMeta>;

    /// Mutable identity metadata, `None` for values that have none
    fn meta_mut(&mut self) -> Option<&mut ObjectMeta>;

    /// Probe: is this value a collection of objects
    fn as_list(&self) -> Option<&dyn List> {
        None
    }

    /// Probe for [`NameGenerator`]
    fn as_name_generator(&self) -> Option<&dyn NameGenerator> {
        None
    }

    /// Probe for [`Scoper`]
    fn as_scoper(&self) -> Option<&dyn Scoper> {
        None
    }

    /// Probe for [`PrepareForCreate`]
    fn as_prepare_for_create(&mut self) -> Option<&mut dyn PrepareForCreate> {
        None
    }

    /// Probe for [`PrepareForUpdate`]
    fn as_prepare_for_update(&mut self) -> Option<&mut dyn PrepareForUpdate> {
        None
    }

    /// Probe for [`StatusSubResource`]
    fn as_status_subresource(&self) -> Option<&dyn StatusSubResource> {
        None
    }

    /// Probe for [`Validater`]
    fn as_validater(&self) -> Option<&dyn Validater> {
        None
    }

    /// Probe for [`ValidateUpdater`]
    fn as_validate_updater(&self) -> Option<&dyn ValidateUpdater> {
        None
    }

    /// Probe for [`Canonicalizer`]
    fn as_canonicalizer(&mut self) -> Option<&mut dyn Canonicalizer> {
        None
    }

    /// Probe for [`TableConverter`]
    fn as_table_converter(&self) -> Option<&dyn TableConverter> {
        None
    }

    /// Probe for [`AllowCreateOnUpdater`]
    fn as_allow_create_on_updater(&self) -> Option<&dyn AllowCreateOnUpdater> {
        None
    }

    /// Probe for [`AllowUnconditionalUpdater`]
    fn as_allow_unconditional_updater(&self) -> Option<&dyn AllowUnconditionalUpdater> {
        None
    }
}

impl dyn Object {
    /// Returns a reference to the concrete value if it is of type `K`
    pub fn downcast_ref<K: Object>(&self) -> Option<&K> {
        self.as_any().downcast_ref::<K>()
    }

    /// Returns a mutable reference to the concrete value if it is of type `K`
    pub fn downcast_mut<K: Object>(&mut self) -> Option<&mut K> {
        self.as_any_mut().downcast_mut::<K>()
    }

    /// `resourceVersion` from the object's or list's metadata
    pub fn resource_version(&self) -> Option<&str> {
        match self.as_list() {
            Some(list) => list.list_meta().resource_version.as_deref(),
            None => self.meta()?.resource_version.as_deref(),
        }
    }
}

/// An ordered collection of objects
pub trait List {
    /// The collection's own metadata (resourceVersion, continue token, remaining count)
    fn list_meta(&self) -> &ListMeta;

    /// Number of items
    fn len(&self) -> usize;

    /// Whether the collection has no items
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the items in order
    fn items(&self) -> Box<dyn Iterator<Item = &dyn Object> + '_>;
}

/// A generic object list
///
/// Any `Vec` of objects can be handed to a strategy as a collection through this type.
/// Wrap it in a newtype when the collection itself should opt into capabilities
/// (for example rendering a summary table of its own).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ObjectList<T> {
    /// ListMeta - resourceVersion, continue and remainingItemCount
    #[serde(default)]
    pub metadata: ListMeta,

    /// The items we are actually interested in.
    #[serde(bound(deserialize = "Vec<T>: Deserialize<'de>"))]
    pub items: Vec<T>,
}

impl<T> ObjectList<T> {
    /// A list of `items` with empty list metadata
    pub fn new(items: Vec<T>) -> Self {
        Self {
            metadata: ListMeta::default(),
            items,
        }
    }

    /// `iter` returns an Iterator over the elements of this ObjectList
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// `iter_mut` returns an Iterator of mutable references to the elements of this ObjectList
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}

impl<T> IntoIterator for ObjectList<T> {
    type IntoIter = ::std::vec::IntoIter<Self::Item>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ObjectList<T> {
    type IntoIter = ::std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Object> List for ObjectList<T> {
    fn list_meta(&self) -> &ListMeta {
        &self.metadata
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Object> + '_> {
        Box::new(self.items.iter().map(|item| item as &dyn Object))
    }
}

impl<T: Object + Serialize> Object for ObjectList<T> {
    fn meta(&self) -> Option<&ObjectMeta> {
        None
    }

    fn meta_mut(&mut self) -> Option<&mut ObjectMeta> {
        None
    }

    fn as_list(&self) -> Option<&dyn List> {
        Some(self)
    }
}

/// A trait to access the `status` of a resource.
///
/// Types implementing it get [`copy_status`](crate::capability::copy_status) for free
/// when opting into [`StatusSubResource`].
pub trait HasStatus {
    /// The type of the `status` object
    type Status;

    /// Returns an optional reference to the `status` of the object
    fn status(&self) -> Option<&Self::Status>;

    /// Returns an optional mutable reference to the `status` of the object
    fn status_mut(&mut self) -> &mut Option<Self::Status>;
}
