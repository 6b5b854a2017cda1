//! Generic table rendering for kinds without a table converter of their own.
use crate::strategy::TableConvertor;
use apiserver_kit_core::{
    Error, GroupResource, MetadataDescriptions, Object, RequestContext, Result, Table, TableColumnDefinition,
    TableOptions, TableRow,
};
use serde_json::Value;

/// RFC 3339 form of the zero time, rendered for objects without a creation timestamp
const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

/// Renders any object or list as a `Name` / `Created At` table
///
/// Each row embeds the serialized object it was rendered from. Column descriptions
/// come from the bound [`MetadataDescriptions`].
#[derive(Clone, Debug, Default)]
pub struct DefaultTableConvertor {
    resource: GroupResource,
    descriptions: MetadataDescriptions,
}

impl DefaultTableConvertor {
    /// A convertor that reports `resource` in its errors
    pub fn new(resource: GroupResource) -> Self {
        Self {
            resource,
            descriptions: MetadataDescriptions::default(),
        }
    }

    /// Use custom column descriptions
    #[must_use]
    pub fn with_descriptions(mut self, descriptions: MetadataDescriptions) -> Self {
        self.descriptions = descriptions;
        self
    }

    fn columns(&self) -> Vec<TableColumnDefinition> {
        vec![
            TableColumnDefinition::new("Name", "string")
                .format("name")
                .description(self.descriptions.get("name")),
            TableColumnDefinition::new("Created At", "date")
                .description(self.descriptions.get("creationTimestamp")),
        ]
    }

    fn row(&self, ctx: &RequestContext, obj: &dyn Object) -> Result<TableRow> {
        let meta = obj.meta().ok_or_else(|| Error::NotAcceptable {
            resource: ctx.group_resource_or(&self.resource),
        })?;
        let name = meta.name.clone().unwrap_or_default();
        // Time serializes as RFC 3339 in UTC with second precision
        let created = meta
            .creation_timestamp
            .as_ref()
            .and_then(|ts| serde_json::to_value(ts).ok())
            .unwrap_or_else(|| Value::from(ZERO_TIME));
        Ok(TableRow::new([Value::from(name), created]).with_object(obj.to_raw()))
    }
}

impl TableConvertor for DefaultTableConvertor {
    fn convert_to_table(
        &self,
        ctx: &RequestContext,
        obj: &dyn Object,
        options: Option<&TableOptions>,
    ) -> Result<Table> {
        let mut table = Table::default();
        match obj.as_list() {
            Some(list) => {
                table.rows = list
                    .items()
                    .map(|item| self.row(ctx, item))
                    .collect::<Result<_>>()?;
                table.set_list_meta(list.list_meta());
            }
            None => {
                table.rows = vec![self.row(ctx, obj)?];
                table.metadata.resource_version = obj.resource_version().map(Into::into);
            }
        }
        if !TableOptions::suppresses_headers(options) {
            table.column_definitions = self.columns();
        }
        Ok(table)
    }
}
