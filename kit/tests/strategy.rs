//! Integration tests for the strategy adapters.

use apiserver_kit::{
    core::{
        capability::{
            copy_status, NameGenerator, PrepareForCreate, PrepareForUpdate, Scoper, StatusSubResource,
            TableConverter, Validater,
        },
        validation::{FieldError, Path},
        ErrorList, GroupResource, GroupVersionKind, HasStatus, ObjectList, ObjectMeta, RequestInfo, Result,
        Table, TableColumnDefinition, TableOptions, TableRow,
    },
    rest::{
        ObjectTyper, RestCreateStrategy, RestUpdateStrategy, StrategyCanonicalizer, TableConvertor,
        TypeRegistry,
    },
    DefaultStrategy, Object, PrepareForUpdaterStrategy, RequestContext,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
struct OrderSpec {
    artifacts: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
struct OrderStatus {
    phase: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
struct Order {
    metadata: ObjectMeta,
    spec: OrderSpec,
    status: Option<OrderStatus>,
}

impl Order {
    fn new(name: &str, artifacts: &[&str]) -> Self {
        Self {
            metadata: ObjectMeta {
                name: Some(name.into()),
                namespace: Some("default".into()),
                ..ObjectMeta::default()
            },
            spec: OrderSpec {
                artifacts: artifacts.iter().map(ToString::to_string).collect(),
            },
            status: None,
        }
    }

    fn with_phase(mut self, phase: &str) -> Self {
        self.status = Some(OrderStatus { phase: phase.into() });
        self
    }
}

impl HasStatus for Order {
    type Status = OrderStatus;

    fn status(&self) -> Option<&OrderStatus> {
        self.status.as_ref()
    }

    fn status_mut(&mut self) -> &mut Option<OrderStatus> {
        &mut self.status
    }
}

impl StatusSubResource for Order {
    fn copy_status_to(&self, target: &mut dyn Object) {
        copy_status(self, target)
    }
}

impl PrepareForCreate for Order {
    fn prepare_for_create(&mut self, _: &RequestContext) {
        self.status = None;
        self.metadata.generation = Some(1);
    }
}

impl PrepareForUpdate for Order {
    fn prepare_for_update(&mut self, _: &RequestContext, old: &dyn Object) {
        let Some(old) = old.downcast_ref::<Order>() else {
            return;
        };
        let generation = old.metadata.generation.unwrap_or(1);
        self.metadata.generation = Some(if old.spec == self.spec { generation } else { generation + 1 });
    }
}

impl Validater for Order {
    fn validate(&self, ctx: &RequestContext) -> ErrorList {
        let mut errs = ErrorList::new();
        if ctx.is_cancelled() {
            return errs;
        }
        let path = Path::new("spec").child("artifacts");
        if self.spec.artifacts.is_empty() {
            errs.push(FieldError::required(&path, "at least one artifact is required"));
        }
        for (i, artifact) in self.spec.artifacts.iter().enumerate() {
            if artifact.is_empty() {
                errs.push(FieldError::invalid(&path.index(i), "", "must not be empty"));
            }
        }
        errs
    }
}

impl TableConverter for Order {
    fn convert_to_table(&self, _: &RequestContext, _: Option<&TableOptions>) -> Result<Table> {
        let phase = self.status.as_ref().map(|s| s.phase.clone()).unwrap_or_default();
        Ok(Table::new(
            vec![
                TableColumnDefinition::new("Name", "string").format("name"),
                TableColumnDefinition::new("Artifacts", "integer"),
                TableColumnDefinition::new("Phase", "string"),
            ],
            vec![TableRow::new([
                json!(self.metadata.name),
                json!(self.spec.artifacts.len()),
                json!(phase),
            ])],
        ))
    }
}

impl Object for Order {
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

    fn as_table_converter(&self) -> Option<&dyn TableConverter> {
        Some(self)
    }
}

fn gvk() -> GroupVersionKind {
    GroupVersionKind::gvk("arc.bwi.de", "v1alpha1", "Order")
}

fn strategy() -> DefaultStrategy {
    DefaultStrategy::new(GroupResource::new("arc.bwi.de", "orders"))
        .with_object(Order::default())
        .with_typer(TypeRegistry::new().with::<Order>(gvk()))
}

#[test]
fn create_flow() {
    let s = strategy();
    let ctx = RequestContext::new();

    let name = s.generate_name("order-");
    assert!(name.starts_with("order-"));
    let mut order = Order::new(&name, &["b", "a"]).with_phase("Done");

    s.prepare_for_create(&ctx, &mut order);
    assert_eq!(order.status, None);
    assert_eq!(order.metadata.generation, Some(1));
    assert!(s.validate(&ctx, &order).is_empty());
    s.canonicalize(&mut order);
    assert!(s.warnings_on_create(&ctx, &order).is_empty());
    assert_eq!(s.object_kinds(&order).unwrap(), vec![gvk()]);
    assert!(s.namespace_scoped());
}

#[test]
fn invalid_orders_become_a_status() {
    let s = strategy();
    let order = Order::new("broken", &["a", ""]);
    let errs = s.validate(&RequestContext::new(), &order);
    assert_eq!(errs.len(), 1);

    let status = errs.to_status(&gvk().group_kind(), "broken");
    assert_eq!(status.code, 422);
    assert_eq!(status.reason, "Invalid");
    let causes = status.details.unwrap().causes;
    assert_eq!(causes.len(), 1);
    assert_eq!(causes[0].field, "spec.artifacts[1]");
}

#[test]
fn cancelled_requests_are_visible_to_hooks() {
    let token = CancellationToken::new();
    let ctx = RequestContext::new().with_cancellation(token.clone());
    let empty = Order::new("empty", &[]);
    assert_eq!(strategy().validate(&ctx, &empty).len(), 1);
    token.cancel();
    assert!(strategy().validate(&ctx, &empty).is_empty());
}

#[test]
fn update_flow_keeps_stored_status() {
    let s = strategy();
    let ctx = RequestContext::new();
    let mut old = Order::new("o", &["a"]).with_phase("Running");
    old.metadata.generation = Some(3);

    let mut new = Order::new("o", &["a", "b"]).with_phase("Done");
    s.prepare_for_update(&ctx, &mut new, &old);
    assert_eq!(new.status, old.status);
    assert_eq!(new.metadata.generation, Some(4));

    let mut unchanged = Order::new("o", &["a"]);
    s.prepare_for_update(&ctx, &mut unchanged, &old);
    assert_eq!(unchanged.metadata.generation, Some(3));

    assert!(s.validate_update(&ctx, &new, &old).is_empty());
    assert!(!s.allow_create_on_update());
    assert!(!s.allow_unconditional_update());
}

#[test]
fn override_replaces_update_normalization() {
    let s = PrepareForUpdaterStrategy::new(strategy()).with_override(|_, new, old| {
        if let (Some(new), Some(old)) = (new.downcast_mut::<Order>(), old.downcast_ref::<Order>()) {
            new.status.clone_from(&old.status);
            new.metadata.generation = Some(100);
        }
    });
    let old = Order::new("o", &["a"]).with_phase("Running");
    let mut new = Order::new("o", &["a", "b"]);
    s.prepare_for_update(&RequestContext::new(), &mut new, &old);
    assert_eq!(new.status, old.status);
    assert_eq!(new.metadata.generation, Some(100));
}

#[test]
fn list_tables() {
    let mut list = ObjectList::new(vec![
        Order::new("a", &["x"]).with_phase("Running"),
        Order::new("b", &["x", "y"]),
        Order::new("c", &[]).with_phase("Failed"),
    ]);
    list.metadata.resource_version = Some("100".into());
    let table = strategy().convert_to_table(&RequestContext::new(), &list, None).unwrap();

    assert_eq!(table.types.kind, "Table");
    let columns: Vec<_> = table.column_definitions.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(columns, ["Name", "Artifacts", "Phase"]);
    let rows: Vec<_> = table.rows.iter().map(|r| r.cells.clone()).collect();
    assert_eq!(
        rows,
        vec![
            vec![json!("a"), json!(1), json!("Running")],
            vec![json!("b"), json!(2), json!("")],
            vec![json!("c"), json!(0), json!("Failed")],
        ]
    );
    assert_eq!(table.metadata.resource_version.as_deref(), Some("100"));
}

#[test]
fn unrenderable_objects_answer_406() {
    #[derive(Serialize, Debug)]
    struct Opaque;

    impl Object for Opaque {
        fn meta(&self) -> Option<&ObjectMeta> {
            None
        }

        fn meta_mut(&mut self) -> Option<&mut ObjectMeta> {
            None
        }
    }

    let ctx = RequestContext::new().with_request_info(RequestInfo {
        verb: "get".into(),
        api_group: "arc.bwi.de".into(),
        resource: "opaques".into(),
        ..RequestInfo::default()
    });
    let err = DefaultStrategy::default()
        .convert_to_table(&ctx, &Opaque, None)
        .unwrap_err();
    let status = err.status();
    assert_eq!(status.code, 406);
    assert_eq!(status.reason, "NotAcceptable");
    assert_eq!(status.details.unwrap().kind, "opaques");
}

#[tokio::test]
async fn strategies_are_shared_across_tasks() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let s = Arc::new(strategy());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let s = s.clone();
            tokio::spawn(async move {
                let ctx = RequestContext::new();
                let mut order = Order::new(&format!("order-{i}"), &["a"]);
                s.prepare_for_create(&ctx, &mut order);
                assert!(s.validate(&ctx, &order).is_empty());
                let table = s.convert_to_table(&ctx, &order, None).unwrap();
                tracing::debug!(order = i, rows = table.rows.len(), "rendered");
                table.rows[0].cells[0].clone()
            })
        })
        .collect();

    let mut names = Vec::new();
    for handle in handles {
        names.push(handle.await.unwrap());
    }
    assert_eq!(names.len(), 8);
    assert_eq!(names[3], json!("order-3"));
}
