use super::{
    RestCreateStrategy, RestDeleteStrategy, RestUpdateStrategy, Strategy, StrategyCanonicalizer, TableConvertor,
};
use crate::{
    table::DefaultTableConvertor,
    typer::{ObjectTyper, TypeError},
};
use apiserver_kit_core::{
    capability::{NameGenerator, Scoper},
    names::SimpleNameGenerator,
    Error, ErrorList, GroupResource, GroupVersionKind, List, MetadataDescriptions, Object, RequestContext,
    Result, Table, TableOptions,
};
use std::{fmt, sync::Arc};

/// A strategy for any resource kind, driven by the capabilities its objects opt into
///
/// Every hook probes the relevant object for the matching
/// [`capability`](apiserver_kit_core::capability) trait and delegates to it; objects that
/// did not opt in get a generic default. Kind-wide hooks (name generation, scoping,
/// create-on-update, unconditional update) probe the bound *sample* object; without one
/// they always fall back.
///
/// ```
/// use apiserver_kit_core::{GroupResource, RequestContext};
/// use apiserver_kit_rest::{DefaultStrategy, RestUpdateStrategy};
/// # #[derive(serde::Serialize, Debug, Default)]
/// # struct Order { metadata: apiserver_kit_core::ObjectMeta }
/// # impl apiserver_kit_core::Object for Order {
/// #     fn meta(&self) -> Option<&apiserver_kit_core::ObjectMeta> { Some(&self.metadata) }
/// #     fn meta_mut(&mut self) -> Option<&mut apiserver_kit_core::ObjectMeta> { Some(&mut self.metadata) }
/// # }
///
/// let strategy = DefaultStrategy::new(GroupResource::new("arc.bwi.de", "orders"))
///     .with_object(Order::default());
/// assert!(!strategy.allow_create_on_update());
///
/// let (mut new, old) = (Order::default(), Order::default());
/// strategy.prepare_for_update(&RequestContext::new(), &mut new, &old);
/// ```
#[derive(Clone)]
pub struct DefaultStrategy {
    object: Option<Arc<dyn Object>>,
    typer: Option<Arc<dyn ObjectTyper>>,
    table_convertor: Arc<dyn TableConvertor>,
    resource: GroupResource,
}

impl Default for DefaultStrategy {
    fn default() -> Self {
        Self::new(GroupResource::default())
    }
}

impl fmt::Debug for DefaultStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultStrategy")
            .field("object", &self.object.as_deref().map(|o| o.type_name()))
            .field("typer", &self.typer.is_some())
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

impl DefaultStrategy {
    /// A strategy for `resource` without a sample object or type information
    ///
    /// Tables fall back to a [`DefaultTableConvertor`] bound to `resource`.
    pub fn new(resource: GroupResource) -> Self {
        Self {
            object: None,
            typer: None,
            table_convertor: Arc::new(DefaultTableConvertor::new(resource.clone())),
            resource,
        }
    }

    /// Bind the sample object probed by the kind-wide hooks
    #[must_use]
    pub fn with_object<K: Object>(mut self, sample: K) -> Self {
        self.object = Some(Arc::new(sample));
        self
    }

    /// Resolve kinds through `typer`
    #[must_use]
    pub fn with_typer<T: ObjectTyper + 'static>(mut self, typer: T) -> Self {
        self.typer = Some(Arc::new(typer));
        self
    }

    /// Render objects without a table converter of their own through `convertor`
    #[must_use]
    pub fn with_table_convertor<C: TableConvertor + 'static>(mut self, convertor: C) -> Self {
        self.table_convertor = Arc::new(convertor);
        self
    }

    /// Fall back to a [`DefaultTableConvertor`] using custom column descriptions
    #[must_use]
    pub fn with_descriptions(self, descriptions: MetadataDescriptions) -> Self {
        let convertor = DefaultTableConvertor::new(self.resource.clone()).with_descriptions(descriptions);
        self.with_table_convertor(convertor)
    }

    /// The resource this strategy is bound to
    pub fn resource(&self) -> &GroupResource {
        &self.resource
    }

    fn sample(&self) -> Option<&dyn Object> {
        self.object.as_deref()
    }

    /// Renders a list item by item when its items opt into [`TableConverter`]
    ///
    /// [`TableConverter`]: apiserver_kit_core::capability::TableConverter
    fn convert_items(
        &self,
        ctx: &RequestContext,
        list: &dyn List,
        options: Option<&TableOptions>,
    ) -> Result<Table> {
        let mut table = Table::default();
        for item in list.items() {
            let Some(converter) = item.as_table_converter() else {
                tracing::debug!(item = item.type_name(), "list item cannot be rendered as a table");
                return Err(Error::NotAcceptable {
                    resource: ctx.group_resource_or(&self.resource),
                });
            };
            let rendered = converter.convert_to_table(ctx, options)?;
            table.column_definitions = rendered.column_definitions;
            table.rows.extend(rendered.rows);
        }
        table.set_list_meta(list.list_meta());
        Ok(table)
    }
}

impl ObjectTyper for DefaultStrategy {
    fn object_kinds(&self, obj: &dyn Object) -> Result<Vec<GroupVersionKind>, TypeError> {
        self.typer.as_ref().ok_or(TypeError::NoTyper)?.object_kinds(obj)
    }

    fn recognizes(&self, gvk: &GroupVersionKind) -> bool {
        self.typer.as_ref().is_some_and(|typer| typer.recognizes(gvk))
    }
}

impl NameGenerator for DefaultStrategy {
    fn generate_name(&self, base: &str) -> String {
        match self.sample().and_then(|o| o.as_name_generator()) {
            Some(generator) => generator.generate_name(base),
            None => SimpleNameGenerator.generate_name(base),
        }
    }
}

impl Scoper for DefaultStrategy {
    fn namespace_scoped(&self) -> bool {
        self.sample()
            .and_then(|o| o.as_scoper())
            .is_none_or(|scoper| scoper.namespace_scoped())
    }
}

impl StrategyCanonicalizer for DefaultStrategy {
    fn canonicalize(&self, obj: &mut dyn Object) {
        if let Some(canonicalizer) = obj.as_canonicalizer() {
            canonicalizer.canonicalize();
        }
    }
}

impl RestCreateStrategy for DefaultStrategy {
    fn prepare_for_create(&self, ctx: &RequestContext, obj: &mut dyn Object) {
        if let Some(hook) = obj.as_prepare_for_create() {
            hook.prepare_for_create(ctx);
        }
    }

    fn validate(&self, ctx: &RequestContext, obj: &dyn Object) -> ErrorList {
        match obj.as_validater() {
            Some(validater) => validater.validate(ctx),
            None => ErrorList::new(),
        }
    }

    fn warnings_on_create(&self, _: &RequestContext, _: &dyn Object) -> Vec<String> {
        vec![]
    }
}

impl RestUpdateStrategy for DefaultStrategy {
    fn allow_create_on_update(&self) -> bool {
        self.sample()
            .and_then(|o| o.as_allow_create_on_updater())
            .is_some_and(|o| o.allow_create_on_update())
    }

    /// Copies the stored status onto `obj`, then runs `obj`'s own update hook
    ///
    /// The status copy happens whenever `obj` opts into
    /// [`StatusSubResource`](apiserver_kit_core::capability::StatusSubResource), so a regular
    /// update can never change status. The copy is made by `old`; if `old` does not opt in
    /// as well there is nothing to copy from and `obj` keeps its status.
    fn prepare_for_update(&self, ctx: &RequestContext, obj: &mut dyn Object, old: &dyn Object) {
        if obj.as_status_subresource().is_some() {
            match old.as_status_subresource() {
                Some(old_status) => old_status.copy_status_to(obj),
                None => tracing::trace!(old = old.type_name(), "stored object has no status to copy"),
            }
        }
        if let Some(hook) = obj.as_prepare_for_update() {
            hook.prepare_for_update(ctx, old);
        }
    }

    fn validate_update(&self, ctx: &RequestContext, obj: &dyn Object, old: &dyn Object) -> ErrorList {
        match obj.as_validate_updater() {
            Some(validater) => validater.validate_update(ctx, old),
            None => ErrorList::new(),
        }
    }

    fn warnings_on_update(&self, _: &RequestContext, _: &dyn Object, _: &dyn Object) -> Vec<String> {
        vec![]
    }

    fn allow_unconditional_update(&self) -> bool {
        self.sample()
            .and_then(|o| o.as_allow_unconditional_updater())
            .is_some_and(|o| o.allow_unconditional_update())
    }
}

impl RestDeleteStrategy for DefaultStrategy {}

impl TableConvertor for DefaultStrategy {
    fn convert_to_table(
        &self,
        ctx: &RequestContext,
        obj: &dyn Object,
        options: Option<&TableOptions>,
    ) -> Result<Table> {
        let mut table = if let Some(converter) = obj.as_table_converter() {
            tracing::trace!(object = obj.type_name(), "rendering table through object");
            let mut table = converter.convert_to_table(ctx, options)?;
            if let Some(rv) = obj.resource_version() {
                table.metadata.resource_version = Some(rv.to_string());
            }
            table
        } else if let Some(list) = obj.as_list().filter(|list| {
            list.items()
                .next()
                .is_some_and(|first| first.as_table_converter().is_some())
        }) {
            tracing::trace!(list = obj.type_name(), items = list.len(), "rendering table through list items");
            self.convert_items(ctx, list, options)?
        } else {
            tracing::trace!(object = obj.type_name(), "rendering default table");
            self.table_convertor.convert_to_table(ctx, obj, options)?
        };
        if TableOptions::suppresses_headers(options) {
            table.column_definitions.clear();
        }
        Ok(table)
    }
}

impl Strategy for DefaultStrategy {}
