//! Optional hooks a resource type can opt into to override default strategy behavior.
//!
//! None of these are required. A registry strategy probes an [`Object`] for each of them
//! through the matching `Object::as_*` method and falls back to its own default when the
//! probe answers `None`.
//!
//! Hooks that inspect the bound *sample* object ([`NameGenerator`], [`Scoper`],
//! [`AllowCreateOnUpdater`], [`AllowUnconditionalUpdater`]) describe the resource kind as a
//! whole. All others are probed on the object the request is about.
use crate::{
    object::HasStatus,
    validation::ErrorList,
    Object, RequestContext, Result, Table, TableOptions,
};

/// Generates names for objects created with only `metadata.generateName` set
pub trait NameGenerator {
    /// Returns a name derived from `base`
    ///
    /// The result should be unique with high probability; uniqueness is not verified here.
    fn generate_name(&self, base: &str) -> String;
}

/// Declares whether a resource kind lives in namespaces
pub trait Scoper {
    /// `true` if objects of this kind are namespaced
    fn namespace_scoped(&self) -> bool;
}

/// Normalization applied on create, before validation
pub trait PrepareForCreate {
    /// Normalize the object in place.
    ///
    /// Typically clears status, since external callers must not set an initial status.
    /// Should not remove fields whose presence would be a validation error.
    fn prepare_for_create(&mut self, ctx: &RequestContext);
}

/// Normalization applied on update, before validation
pub trait PrepareForUpdate {
    /// Normalize the incoming object in place, with the stored object for context
    fn prepare_for_update(&mut self, ctx: &RequestContext, old: &dyn Object);
}

/// Marks a kind whose status is only writable through the `status` subresource
///
/// On a regular update the stored status is copied over whatever status the request
/// carried, before any [`PrepareForUpdate`] hook runs.
pub trait StatusSubResource {
    /// Copy this object's status onto `target`
    ///
    /// Implementations downcast `target` to their own type and leave it untouched otherwise.
    /// [`copy_status`] does exactly that for types implementing [`HasStatus`].
    fn copy_status_to(&self, target: &mut dyn Object);
}

/// Validation on create
pub trait Validater {
    /// Returns every validation failure, an empty list means valid
    ///
    /// Invoked after defaulting, before the object is persisted. Must not mutate.
    fn validate(&self, ctx: &RequestContext) -> ErrorList;
}

/// Validation on update
pub trait ValidateUpdater {
    /// Returns every validation failure of this update against the stored `old` object
    fn validate_update(&self, ctx: &RequestContext, old: &dyn Object) -> ErrorList;
}

/// Mutation into a canonical form
pub trait Canonicalizer {
    /// Rewrite the object so equal objects compare equal (sorted sets, normalized casing, ...)
    ///
    /// Invoked after validation succeeded and before the object is persisted.
    fn canonicalize(&mut self);
}

/// Custom table rendering for `kubectl get`-style listings
pub trait TableConverter {
    /// Render this object (or collection) as a table
    fn convert_to_table(&self, ctx: &RequestContext, options: Option<&TableOptions>) -> Result<Table>;
}

/// Allows a PUT to create an object that does not exist yet
pub trait AllowCreateOnUpdater {
    /// `true` if create-on-update is allowed
    fn allow_create_on_update(&self) -> bool;
}

/// Allows updates without a `resourceVersion` precondition
pub trait AllowUnconditionalUpdater {
    /// `true` if an update without `resourceVersion` should overwrite unconditionally
    fn allow_unconditional_update(&self) -> bool;
}

/// Copies `from`'s status onto `target` when `target` is the same type
///
/// A ready-made body for [`StatusSubResource::copy_status_to`]:
///
/// ```
/// # use apiserver_kit_core::{capability::{copy_status, StatusSubResource}, HasStatus, Object, ObjectMeta};
/// # #[derive(serde::Serialize, Debug)]
/// # struct Job { metadata: ObjectMeta, status: Option<String> }
/// # impl HasStatus for Job {
/// #     type Status = String;
/// #     fn status(&self) -> Option<&String> { self.status.as_ref() }
/// #     fn status_mut(&mut self) -> &mut Option<String> { &mut self.status }
/// # }
/// # impl Object for Job {
/// #     fn meta(&self) -> Option<&ObjectMeta> { Some(&self.metadata) }
/// #     fn meta_mut(&mut self) -> Option<&mut ObjectMeta> { Some(&mut self.metadata) }
/// # }
/// impl StatusSubResource for Job {
///     fn copy_status_to(&self, target: &mut dyn Object) {
///         copy_status(self, target)
///     }
/// }
/// ```
pub fn copy_status<K>(from: &K, target: &mut dyn Object)
where
    K: HasStatus + Object,
    K::Status: Clone,
{
    match target.downcast_mut::<K>() {
        Some(target) => *target.status_mut() = from.status().cloned(),
        None => tracing::trace!(
            from = from.type_name(),
            to = (*target).type_name(),
            "skipping status copy between different types"
        ),
    }
}
