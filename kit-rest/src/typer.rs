//! Type information for objects handed to a strategy.
use apiserver_kit_core::{GroupVersionKind, Object};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
};
use thiserror::Error;

/// Errors from resolving the kind of an object
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// The Rust type of the object was never registered
    #[error("no kind is registered for the type {0}")]
    NotRegistered(&'static str),

    /// The strategy was built without a type information provider
    #[error("no type information provider is configured")]
    NoTyper,
}

/// Resolves objects to the kinds they are served as
pub trait ObjectTyper: Send + Sync {
    /// All kinds `obj` is known as, preferred kind first
    fn object_kinds(&self, obj: &dyn Object) -> Result<Vec<GroupVersionKind>, TypeError>;

    /// Whether objects of `gvk` can be handled
    fn recognizes(&self, gvk: &GroupVersionKind) -> bool;
}

/// An [`ObjectTyper`] backed by an explicit Rust type to kind mapping
///
/// ```
/// # use apiserver_kit_core::{GroupVersionKind, ObjectList};
/// # use apiserver_kit_rest::{ObjectTyper, TypeRegistry};
/// # #[derive(serde::Serialize, Debug)]
/// # struct Order { metadata: apiserver_kit_core::ObjectMeta }
/// # impl apiserver_kit_core::Object for Order {
/// #     fn meta(&self) -> Option<&apiserver_kit_core::ObjectMeta> { Some(&self.metadata) }
/// #     fn meta_mut(&mut self) -> Option<&mut apiserver_kit_core::ObjectMeta> { Some(&mut self.metadata) }
/// # }
/// let registry = TypeRegistry::new()
///     .with::<Order>(GroupVersionKind::gvk("arc.bwi.de", "v1alpha1", "Order"))
///     .with::<ObjectList<Order>>(GroupVersionKind::gvk("arc.bwi.de", "v1alpha1", "OrderList"));
/// assert!(registry.recognizes(&GroupVersionKind::gvk("arc.bwi.de", "v1alpha1", "Order")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    kinds: HashMap<TypeId, Vec<GroupVersionKind>>,
}

impl TypeRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `K` as `gvk`, additional registrations of the same type add aliases
    #[must_use]
    pub fn with<K: Object>(mut self, gvk: GroupVersionKind) -> Self {
        self.register::<K>(gvk);
        self
    }

    /// Register `K` as `gvk` in place
    pub fn register<K: Object>(&mut self, gvk: GroupVersionKind) {
        tracing::debug!(type_name = std::any::type_name::<K>(), kind = %gvk.kind, "registering kind");
        self.kinds.entry(TypeId::of::<K>()).or_default().push(gvk);
    }
}

impl ObjectTyper for TypeRegistry {
    fn object_kinds(&self, obj: &dyn Object) -> Result<Vec<GroupVersionKind>, TypeError> {
        self.kinds
            .get(&Any::type_id(obj.as_any()))
            .cloned()
            .ok_or_else(|| TypeError::NotRegistered(obj.type_name()))
    }

    fn recognizes(&self, gvk: &GroupVersionKind) -> bool {
        self.kinds.values().flatten().any(|known| known == gvk)
    }
}
