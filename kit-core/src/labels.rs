//! Label selectors, as used when listing and watching through a registry.
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, LabelSelectorRequirement};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

/// The label set of an object
pub type Labels = BTreeMap<String, String>;

/// A single label requirement
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Expression {
    /// The label is set to one of the values
    In(String, BTreeSet<String>),
    /// The label is unset or set to none of the values
    NotIn(String, BTreeSet<String>),
    /// The label is set to exactly this value
    Equal(String, String),
    /// The label is unset or set to another value
    NotEqual(String, String),
    /// The label is set
    Exists(String),
    /// The label is unset
    DoesNotExist(String),
    /// A requirement that could not be understood; never matches
    Invalid,
}

/// A conjunction of label [`Expression`]s
///
/// The empty selector selects everything.
#[derive(Clone, Debug, Eq, PartialEq, Default, Deserialize, Serialize)]
pub struct Selector(Vec<Expression>);

impl Selector {
    /// The selector that matches every label set
    pub fn everything() -> Self {
        Self::default()
    }

    /// Whether this selector matches every label set
    pub fn selects_all(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether all expressions match `labels`
    pub fn matches(&self, labels: &Labels) -> bool {
        self.0.iter().all(|expr| expr.matches(labels))
    }

    /// Add another requirement
    #[must_use]
    pub fn and(mut self, expr: Expression) -> Self {
        self.0.push(expr);
        self
    }
}

/// Renders the selector in the `labelSelector` query parameter syntax
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exprs: Vec<String> = self
            .0
            .iter()
            .filter(|&e| e != &Expression::Invalid)
            .map(ToString::to_string)
            .collect();
        f.write_str(&exprs.join(","))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |values: &BTreeSet<String>| values.iter().cloned().collect::<Vec<_>>().join(",");
        match self {
            Expression::In(key, values) => write!(f, "{key} in ({})", join(values)),
            Expression::NotIn(key, values) => write!(f, "{key} notin ({})", join(values)),
            Expression::Equal(key, value) => write!(f, "{key}={value}"),
            Expression::NotEqual(key, value) => write!(f, "{key}!={value}"),
            Expression::Exists(key) => write!(f, "{key}"),
            Expression::DoesNotExist(key) => write!(f, "!{key}"),
            Expression::Invalid => Ok(()),
        }
    }
}

impl Expression {
    fn matches(&self, labels: &Labels) -> bool {
        match self {
            Expression::In(key, values) => labels.get(key).is_some_and(|v| values.contains(v)),
            Expression::NotIn(key, values) => labels.get(key).is_none_or(|v| !values.contains(v)),
            Expression::Exists(key) => labels.contains_key(key),
            Expression::DoesNotExist(key) => !labels.contains_key(key),
            Expression::Equal(key, value) => labels.get(key) == Some(value),
            Expression::NotEqual(key, value) => labels.get(key) != Some(value),
            Expression::Invalid => false,
        }
    }
}

impl FromIterator<(String, String)> for Selector {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| Expression::Equal(k, v)).collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Selector {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl FromIterator<Expression> for Selector {
    fn from_iter<T: IntoIterator<Item = Expression>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Expression> for Selector {
    fn from(value: Expression) -> Self {
        Self(vec![value])
    }
}

impl From<LabelSelector> for Selector {
    fn from(value: LabelSelector) -> Self {
        let mut selector: Selector = value.match_labels.unwrap_or_default().into_iter().collect();
        selector
            .0
            .extend(value.match_expressions.into_iter().flatten().map(Expression::from));
        selector
    }
}

impl From<LabelSelectorRequirement> for Expression {
    fn from(requirement: LabelSelectorRequirement) -> Self {
        let key = requirement.key;
        let values = requirement.values.map(|values| values.into_iter().collect());
        match (requirement.operator.as_str(), values) {
            ("In", Some(values)) => Expression::In(key, values),
            ("NotIn", Some(values)) => Expression::NotIn(key, values),
            ("Exists", _) => Expression::Exists(key),
            ("DoesNotExist", _) => Expression::DoesNotExist(key),
            _ => Expression::Invalid,
        }
    }
}
