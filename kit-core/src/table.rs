//! The `meta.k8s.io/v1` Table wire types used by list endpoints for human-readable output.
use crate::metadata::{ListMeta, TypeMeta};
use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use serde::{Deserialize, Serialize};

/// apiVersion of [`Table`]
pub const TABLE_API_VERSION: &str = "meta.k8s.io/v1";
/// kind of [`Table`]
pub const TABLE_KIND: &str = "Table";

/// A tabular rendering of an object or a list of objects
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// The type fields
    #[serde(flatten)]
    pub types: TypeMeta,

    /// resourceVersion, continue and remainingItemCount of the rendered collection
    #[serde(default)]
    pub metadata: ListMeta,

    /// Describes each column of the rows, empty when headers were suppressed
    #[serde(default)]
    pub column_definitions: Vec<TableColumnDefinition>,

    /// One row per rendered object
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            types: TypeMeta::new(TABLE_API_VERSION, TABLE_KIND),
            metadata: ListMeta::default(),
            column_definitions: vec![],
            rows: vec![],
        }
    }
}

impl Table {
    /// A table with the given columns and rows and empty list metadata
    pub fn new(column_definitions: Vec<TableColumnDefinition>, rows: Vec<TableRow>) -> Self {
        Self {
            column_definitions,
            rows,
            ..Self::default()
        }
    }

    /// Copies resourceVersion, continue and remainingItemCount from a collection's metadata
    pub fn set_list_meta(&mut self, meta: &ListMeta) {
        self.metadata.resource_version = meta.resource_version.clone();
        self.metadata.continue_ = meta.continue_.clone();
        self.metadata.remaining_item_count = meta.remaining_item_count;
    }
}

/// A column of a [`Table`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnDefinition {
    /// Human-readable column name
    pub name: String,

    /// OpenAPI type of the cells: `string`, `integer`, `number`, `boolean` or `date`
    #[serde(rename = "type")]
    pub type_: String,

    /// Optional OpenAPI format modifier, such as `name` for object names
    #[serde(default)]
    pub format: String,

    /// Human-readable description of the column
    #[serde(default)]
    pub description: String,

    /// Relative importance, 0 is shown by default and higher values only in wide output
    #[serde(default)]
    pub priority: i32,
}

impl TableColumnDefinition {
    /// A priority-0 column without format or description
    pub fn new(name: &str, type_: &str) -> Self {
        Self {
            name: name.to_string(),
            type_: type_.to_string(),
            ..Self::default()
        }
    }

    /// Sets the format modifier
    #[must_use]
    pub fn format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    /// Sets the description
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the priority
    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A row of a [`Table`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// One value per column definition, in column order
    pub cells: Vec<serde_json::Value>,

    /// The object the row was rendered from, if included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<RawExtension>,
}

impl TableRow {
    /// A row with the given cells and no embedded object
    pub fn new<I, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<serde_json::Value>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            object: None,
        }
    }

    /// Embeds the raw object
    #[must_use]
    pub fn with_object(mut self, object: Option<RawExtension>) -> Self {
        self.object = object;
        self
    }
}

/// Options a client passes when asking for a table
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    /// Omit column definitions from the response
    #[serde(default)]
    pub no_headers: bool,
}

impl TableOptions {
    /// Whether `options` asks for headers to be suppressed
    pub fn suppresses_headers(options: Option<&TableOptions>) -> bool {
        options.is_some_and(|opts| opts.no_headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn wire_shape() {
        let mut table = Table::new(
            vec![
                TableColumnDefinition::new("Name", "string").format("name").description("the name"),
                TableColumnDefinition::new("Age", "integer").priority(1),
            ],
            vec![TableRow::new([json!("a"), json!(3)]).with_object(Some(RawExtension(json!({"kind": "Foo"}))))],
        );
        table.set_list_meta(&ListMeta {
            resource_version: Some("12".into()),
            continue_: Some("tok".into()),
            remaining_item_count: Some(4),
            ..ListMeta::default()
        });
        assert_json_eq!(
            serde_json::to_value(&table).unwrap(),
            json!({
                "apiVersion": "meta.k8s.io/v1",
                "kind": "Table",
                "metadata": { "resourceVersion": "12", "continue": "tok", "remainingItemCount": 4 },
                "columnDefinitions": [
                    { "name": "Name", "type": "string", "format": "name", "description": "the name", "priority": 0 },
                    { "name": "Age", "type": "integer", "format": "", "description": "", "priority": 1 }
                ],
                "rows": [
                    { "cells": ["a", 3], "object": { "kind": "Foo" } }
                ]
            })
        );
    }

    #[test]
    fn options() {
        let opts: TableOptions = serde_json::from_value(json!({ "noHeaders": true })).unwrap();
        assert!(TableOptions::suppresses_headers(Some(&opts)));
        assert!(!TableOptions::suppresses_headers(Some(&TableOptions::default())));
        assert!(!TableOptions::suppresses_headers(None));
    }
}
