//! Storage-side filtering of objects by label and field selectors.
use apiserver_kit_core::{
    fields::{self, Fields},
    labels::{self, Labels},
    Error, Object, Result,
};

/// Extracts the labels and selectable fields of an object
pub type AttrFunc = fn(&dyn Object) -> Result<(Labels, Fields)>;

/// Labels plus `metadata.name` and `metadata.namespace` of an object
///
/// Only fields that are set are returned; an unset namespace simply does not appear.
/// Fails with [`Error::MissingObjectMeta`] for values without identity metadata.
pub fn get_attrs(obj: &dyn Object) -> Result<(Labels, Fields)> {
    let meta = obj.meta().ok_or(Error::MissingObjectMeta)?;
    let labels = meta.labels.clone().unwrap_or_default();
    let mut fields = Fields::new();
    if let Some(name) = &meta.name {
        fields.insert("metadata.name".into(), name.clone());
    }
    if let Some(ns) = &meta.namespace {
        fields.insert("metadata.namespace".into(), ns.clone());
    }
    Ok((labels, fields))
}

/// Decides whether stored objects are part of a list or watch result
#[derive(Clone, Debug)]
pub struct SelectionPredicate {
    /// Label requirements
    pub label: labels::Selector,
    /// Field requirements
    pub field: fields::Selector,
    /// How labels and fields are read from an object
    pub get_attrs: AttrFunc,
}

impl Default for SelectionPredicate {
    fn default() -> Self {
        Self::new(labels::Selector::everything(), fields::Selector::everything())
    }
}

impl SelectionPredicate {
    /// A predicate reading attributes with [`get_attrs`]
    pub fn new(label: labels::Selector, field: fields::Selector) -> Self {
        Self {
            label,
            field,
            get_attrs,
        }
    }

    /// Whether the predicate selects every object
    pub fn empty(&self) -> bool {
        self.label.selects_all() && self.field.selects_all()
    }

    /// Whether `obj` satisfies both selectors
    ///
    /// An empty predicate matches without inspecting the object at all.
    pub fn matches(&self, obj: &dyn Object) -> Result<bool> {
        if self.empty() {
            return Ok(true);
        }
        let (labels, fields) = (self.get_attrs)(obj)?;
        let matched = self.label.matches(&labels) && self.field.matches(&fields);
        tracing::trace!(label = %self.label, field = %self.field, matched, "evaluated selection predicate");
        Ok(matched)
    }
}
