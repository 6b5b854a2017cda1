//! The contracts a generic registry consumes from a per-kind strategy.
//!
//! A registry calls these hooks around every create, update, delete and list request.
//! [`DefaultStrategy`] implements all of them by probing objects for
//! [`capability`](apiserver_kit_core::capability) traits; [`PrepareForUpdaterStrategy`]
//! replaces the update normalization of any other strategy.
use crate::{storage::SelectionPredicate, typer::ObjectTyper};
use apiserver_kit_core::{
    capability::{NameGenerator, Scoper},
    fields, labels, ErrorList, Object, RequestContext, Result, Table, TableOptions,
};

mod default;
pub use default::DefaultStrategy;

mod update;
pub use update::{PrepareForUpdateFn, PrepareForUpdaterStrategy};

/// Rewrites objects into their canonical form before they are persisted
///
/// Distinct from the per-object [`Canonicalizer`](apiserver_kit_core::capability::Canonicalizer):
/// this is the kind-wide hook the registry calls, handed the object to rewrite.
pub trait StrategyCanonicalizer {
    /// Canonicalize `obj` in place
    fn canonicalize(&self, obj: &mut dyn Object);
}

/// Hooks run by the registry when an object is created
pub trait RestCreateStrategy: ObjectTyper + NameGenerator + Scoper + StrategyCanonicalizer {
    /// Normalize `obj` before validation
    fn prepare_for_create(&self, ctx: &RequestContext, obj: &mut dyn Object);

    /// Validate `obj`, an empty list means it may be persisted
    fn validate(&self, ctx: &RequestContext, obj: &dyn Object) -> ErrorList;

    /// Non-fatal warnings to return to the client alongside the created object
    fn warnings_on_create(&self, ctx: &RequestContext, obj: &dyn Object) -> Vec<String>;
}

/// Hooks run by the registry when an object is updated
pub trait RestUpdateStrategy: ObjectTyper + Scoper + StrategyCanonicalizer {
    /// Whether a PUT of a missing object creates it
    fn allow_create_on_update(&self) -> bool;

    /// Normalize the incoming `obj` before validation, with the stored `old` for context
    fn prepare_for_update(&self, ctx: &RequestContext, obj: &mut dyn Object, old: &dyn Object);

    /// Validate the transition from `old` to `obj`
    fn validate_update(&self, ctx: &RequestContext, obj: &dyn Object, old: &dyn Object) -> ErrorList;

    /// Non-fatal warnings to return to the client alongside the updated object
    fn warnings_on_update(&self, ctx: &RequestContext, obj: &dyn Object, old: &dyn Object) -> Vec<String>;

    /// Whether an update without `resourceVersion` overwrites unconditionally
    fn allow_unconditional_update(&self) -> bool;
}

/// Hooks run by the registry when an object is deleted
pub trait RestDeleteStrategy: ObjectTyper {}

/// Renders objects and lists for table output
pub trait TableConvertor: Send + Sync {
    /// Render `obj` as a table
    fn convert_to_table(
        &self,
        ctx: &RequestContext,
        obj: &dyn Object,
        options: Option<&TableOptions>,
    ) -> Result<Table>;
}

/// Everything a registry needs from a kind
pub trait Strategy: RestCreateStrategy + RestUpdateStrategy + RestDeleteStrategy + TableConvertor {
    /// The predicate list and watch requests are filtered with
    fn selection_predicate(&self, label: labels::Selector, field: fields::Selector) -> SelectionPredicate {
        SelectionPredicate::new(label, field)
    }
}
