//! Object fixtures shared by the unit tests of this crate.
use apiserver_kit_core::{
    capability::{
        copy_status, AllowCreateOnUpdater, AllowUnconditionalUpdater, Canonicalizer, NameGenerator,
        PrepareForCreate, PrepareForUpdate, Scoper, StatusSubResource, TableConverter, ValidateUpdater,
        Validater,
    },
    validation::{FieldError, Path},
    ErrorList, HasStatus, List, Object, ObjectList, ObjectMeta, RequestContext, Result, Table,
    TableColumnDefinition, TableOptions, TableRow,
};
use serde::Serialize;
use serde_json::json;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Counts hook invocations across clones of a fixture
#[derive(Clone, Debug, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn meta(name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.into()),
        ..ObjectMeta::default()
    }
}

/// Opts into every per-object capability
#[derive(Serialize, Clone, Debug, Default)]
pub struct TestObj {
    pub metadata: ObjectMeta,
    pub status: Option<String>,
    pub flag: bool,
    #[serde(skip)]
    pub calls: Calls,
}

impl TestObj {
    pub fn new(name: &str, status: &str) -> Self {
        Self {
            metadata: meta(name),
            status: Some(status.into()),
            ..Self::default()
        }
    }
}

impl HasStatus for TestObj {
    type Status = String;

    fn status(&self) -> Option<&String> {
        self.status.as_ref()
    }

    fn status_mut(&mut self) -> &mut Option<String> {
        &mut self.status
    }
}

impl StatusSubResource for TestObj {
    fn copy_status_to(&self, target: &mut dyn Object) {
        copy_status(self, target)
    }
}

impl PrepareForCreate for TestObj {
    fn prepare_for_create(&mut self, _: &RequestContext) {
        self.calls.hit();
        self.flag = true;
    }
}

impl PrepareForUpdate for TestObj {
    fn prepare_for_update(&mut self, _: &RequestContext, _: &dyn Object) {
        self.calls.hit();
        self.flag = true;
    }
}

impl Validater for TestObj {
    fn validate(&self, _: &RequestContext) -> ErrorList {
        self.calls.hit();
        vec![FieldError::invalid(&Path::new("spec"), "bad", "invalid")].into()
    }
}

impl ValidateUpdater for TestObj {
    fn validate_update(&self, _: &RequestContext, old: &dyn Object) -> ErrorList {
        self.calls.hit();
        let old_name = old.meta().and_then(|m| m.name.clone()).unwrap_or_default();
        vec![FieldError::invalid(&Path::new("metadata").child("name"), old_name, "immutable")].into()
    }
}

impl Canonicalizer for TestObj {
    fn canonicalize(&mut self) {
        self.calls.hit();
        self.flag = true;
    }
}

impl TableConverter for TestObj {
    fn convert_to_table(&self, _: &RequestContext, _: Option<&TableOptions>) -> Result<Table> {
        self.calls.hit();
        Ok(Table::new(
            vec![
                TableColumnDefinition::new("Name", "string"),
                TableColumnDefinition::new("Status", "string"),
            ],
            vec![TableRow::new([
                json!(self.metadata.name.clone().unwrap_or_default()),
                json!(self.status.clone().unwrap_or_default()),
            ])],
        ))
    }
}

impl Object for TestObj {
    fn meta(&self) -> Option<&ObjectMeta> {
        Some(&self.metadata)
    }

    fn meta_mut(&mut self) -> Option<&mut ObjectMeta> {
        Some(&mut self.metadata)
    }

    fn as_prepare_for_create(&mut self) -> Option<&mut dyn PrepareForCreate> {
        Some(self)
    }

    fn as_prepare_for_update(&mut self) -> Option<&mut dyn PrepareForUpdate> {
        Some(self)
    }

    fn as_status_subresource(&self) -> Option<&dyn StatusSubResource> {
        Some(self)
    }

    fn as_validater(&self) -> Option<&dyn Validater> {
        Some(self)
    }

    fn as_validate_updater(&self) -> Option<&dyn ValidateUpdater> {
        Some(self)
    }

    fn as_canonicalizer(&mut self) -> Option<&mut dyn Canonicalizer> {
        Some(self)
    }

    fn as_table_converter(&self) -> Option<&dyn TableConverter> {
        Some(self)
    }
}

/// Opts into nothing
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct BareObj {
    pub metadata: ObjectMeta,
    pub status: Option<String>,
}

impl Object for BareObj {
    fn meta(&self) -> Option<&ObjectMeta> {
        Some(&self.metadata)
    }

    fn meta_mut(&mut self) -> Option<&mut ObjectMeta> {
        Some(&mut self.metadata)
    }
}

/// Carries no identity metadata at all
#[derive(Serialize, Clone, Debug, Default)]
pub struct Anonymous;

impl Object for Anonymous {
    fn meta(&self) -> Option<&ObjectMeta> {
        None
    }

    fn meta_mut(&mut self) -> Option<&mut ObjectMeta> {
        None
    }
}

/// A sample object overriding the kind-wide hooks
#[derive(Serialize, Clone, Debug, Default)]
pub struct Sample {
    pub cluster_scoped: bool,
    #[serde(skip)]
    pub calls: Calls,
}

impl NameGenerator for Sample {
    fn generate_name(&self, base: &str) -> String {
        self.calls.hit();
        format!("{base}-GEN")
    }
}

impl Scoper for Sample {
    fn namespace_scoped(&self) -> bool {
        self.calls.hit();
        !self.cluster_scoped
    }
}

impl AllowCreateOnUpdater for Sample {
    fn allow_create_on_update(&self) -> bool {
        self.calls.hit();
        true
    }
}

impl AllowUnconditionalUpdater for Sample {
    fn allow_unconditional_update(&self) -> bool {
        self.calls.hit();
        true
    }
}

impl Object for Sample {
    fn meta(&self) -> Option<&ObjectMeta> {
        None
    }

    fn meta_mut(&mut self) -> Option<&mut ObjectMeta> {
        None
    }

    fn as_name_generator(&self) -> Option<&dyn NameGenerator> {
        Some(self)
    }

    fn as_scoper(&self) -> Option<&dyn Scoper> {
        Some(self)
    }

    fn as_allow_create_on_updater(&self) -> Option<&dyn AllowCreateOnUpdater> {
        Some(self)
    }

    fn as_allow_unconditional_updater(&self) -> Option<&dyn AllowUnconditionalUpdater> {
        Some(self)
    }
}

/// A list that renders a one-row summary of itself instead of a row per item
#[derive(Serialize, Clone, Debug, Default)]
pub struct SummaryList(pub ObjectList<TestObj>);

impl TableConverter for SummaryList {
    fn convert_to_table(&self, _: &RequestContext, _: Option<&TableOptions>) -> Result<Table> {
        Ok(Table::new(
            vec![
                TableColumnDefinition::new("Count", "integer"),
                TableColumnDefinition::new("Resource", "string"),
            ],
            vec![TableRow::new([json!(self.0.items.len()), json!("testobjs")])],
        ))
    }
}

impl Object for SummaryList {
    fn meta(&self) -> Option<&ObjectMeta> {
        None
    }

    fn meta_mut(&mut self) -> Option<&mut ObjectMeta> {
        None
    }

    fn as_list(&self) -> Option<&dyn List> {
        Some(&self.0)
    }

    fn as_table_converter(&self) -> Option<&dyn TableConverter> {
        Some(self)
    }
}
