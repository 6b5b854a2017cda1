use super::{RestUpdateStrategy, StrategyCanonicalizer};
use crate::typer::{ObjectTyper, TypeError};
use apiserver_kit_core::{capability::Scoper, ErrorList, GroupVersionKind, Object, RequestContext};
use std::{fmt, sync::Arc};

/// Replacement update normalization: `(ctx, new, old)`
pub type PrepareForUpdateFn = dyn Fn(&RequestContext, &mut dyn Object, &dyn Object) + Send + Sync;

/// Wraps an update strategy and swaps out its `prepare_for_update`
///
/// With an override configured, `prepare_for_update` calls only the override; the wrapped
/// strategy's own normalization, including any status copy it does, is skipped. Without
/// one, `prepare_for_update` does nothing. Everything else forwards to the wrapped strategy.
///
/// ```
/// use apiserver_kit_core::{GroupResource, RequestContext};
/// use apiserver_kit_rest::{DefaultStrategy, PrepareForUpdaterStrategy, RestUpdateStrategy};
/// # #[derive(serde::Serialize, Debug, Default)]
/// # struct Order { metadata: apiserver_kit_core::ObjectMeta }
/// # impl apiserver_kit_core::Object for Order {
/// #     fn meta(&self) -> Option<&apiserver_kit_core::ObjectMeta> { Some(&self.metadata) }
/// #     fn meta_mut(&mut self) -> Option<&mut apiserver_kit_core::ObjectMeta> { Some(&mut self.metadata) }
/// # }
///
/// let strategy = PrepareForUpdaterStrategy::new(DefaultStrategy::new(GroupResource::new("arc.bwi.de", "orders")))
///     .with_override(|_, new, old| {
///         if let (Some(new), Some(old)) = (new.meta_mut(), old.meta()) {
///             new.labels = old.labels.clone();
///         }
///     });
///
/// let (mut new, old) = (Order::default(), Order::default());
/// strategy.prepare_for_update(&RequestContext::new(), &mut new, &old);
/// ```
#[derive(Clone)]
pub struct PrepareForUpdaterStrategy<S> {
    inner: S,
    override_fn: Option<Arc<PrepareForUpdateFn>>,
}

impl<S: fmt::Debug> fmt::Debug for PrepareForUpdaterStrategy<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrepareForUpdaterStrategy")
            .field("inner", &self.inner)
            .field("override", &self.override_fn.is_some())
            .finish()
    }
}

impl<S: RestUpdateStrategy> PrepareForUpdaterStrategy<S> {
    /// Wrap `inner` without an override
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            override_fn: None,
        }
    }

    /// Use `f` as update normalization
    #[must_use]
    pub fn with_override<F>(mut self, f: F) -> Self
    where
        F: Fn(&RequestContext, &mut dyn Object, &dyn Object) + Send + Sync + 'static,
    {
        self.override_fn = Some(Arc::new(f));
        self
    }

    /// The wrapped strategy
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap, dropping the override
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RestUpdateStrategy> ObjectTyper for PrepareForUpdaterStrategy<S> {
    fn object_kinds(&self, obj: &dyn Object) -> Result<Vec<GroupVersionKind>, TypeError> {
        self.inner.object_kinds(obj)
    }

    fn recognizes(&self, gvk: &GroupVersionKind) -> bool {
        self.inner.recognizes(gvk)
    }
}

impl<S: RestUpdateStrategy> Scoper for PrepareForUpdaterStrategy<S> {
    fn namespace_scoped(&self) -> bool {
        self.inner.namespace_scoped()
    }
}

impl<S: RestUpdateStrategy> StrategyCanonicalizer for PrepareForUpdaterStrategy<S> {
    fn canonicalize(&self, obj: &mut dyn Object) {
        self.inner.canonicalize(obj)
    }
}

impl<S: RestUpdateStrategy> RestUpdateStrategy for PrepareForUpdaterStrategy<S> {
    fn allow_create_on_update(&self) -> bool {
        self.inner.allow_create_on_update()
    }

    fn prepare_for_update(&self, ctx: &RequestContext, obj: &mut dyn Object, old: &dyn Object) {
        match &self.override_fn {
            Some(f) => f(ctx, obj, old),
            None => tracing::trace!("no update override configured"),
        }
    }

    fn validate_update(&self, ctx: &RequestContext, obj: &dyn Object, old: &dyn Object) -> ErrorList {
        self.inner.validate_update(ctx, obj, old)
    }

    fn warnings_on_update(&self, ctx: &RequestContext, obj: &dyn Object, old: &dyn Object) -> Vec<String> {
        self.inner.warnings_on_update(ctx, obj, old)
    }

    fn allow_unconditional_update(&self) -> bool {
        self.inner.allow_unconditional_update()
    }
}
