//! Field selectors over the selectable attributes of an object.
use crate::{Error, Result};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Selectable field values of an object, keyed by JSON path (`metadata.name`)
pub type Fields = BTreeMap<String, String>;

/// A single field requirement
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// The field equals the value
    Equal(String, String),
    /// The field differs from the value
    NotEqual(String, String),
}

impl Requirement {
    fn matches(&self, fields: &Fields) -> bool {
        // unset fields compare as the empty string
        let get = |field: &str| fields.get(field).map(String::as_str).unwrap_or_default();
        match self {
            Requirement::Equal(field, value) => get(field) == value,
            Requirement::NotEqual(field, value) => get(field) != value,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Equal(field, value) => write!(f, "{field}={value}"),
            Requirement::NotEqual(field, value) => write!(f, "{field}!={value}"),
        }
    }
}

/// A conjunction of field [`Requirement`]s
///
/// Parsed from the `fieldSelector` query syntax, `metadata.name=foo,metadata.namespace!=bar`.
/// The empty selector selects everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector(Vec<Requirement>);

impl Selector {
    /// The selector that matches every object
    pub fn everything() -> Self {
        Self::default()
    }

    /// Whether this selector matches every object
    pub fn selects_all(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether all requirements hold for `fields`
    pub fn matches(&self, fields: &Fields) -> bool {
        self.0.iter().all(|req| req.matches(fields))
    }

    /// The value this selector pins `field` to, if it has an equality requirement on it
    pub fn requires_exact_match(&self, field: &str) -> Option<&str> {
        self.0.iter().find_map(|req| match req {
            Requirement::Equal(f, value) if f == field => Some(value.as_str()),
            _ => None,
        })
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut requirements = vec![];
        for term in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (field, value, negated) = if let Some((field, value)) = term.split_once("!=") {
                (field, value, true)
            } else if let Some((field, value)) = term.split_once("==") {
                (field, value, false)
            } else if let Some((field, value)) = term.split_once('=') {
                (field, value, false)
            } else {
                return Err(Error::InvalidFieldSelector(s.into()));
            };
            let (field, value) = (field.trim(), value.trim());
            if field.is_empty() {
                return Err(Error::InvalidFieldSelector(s.into()));
            }
            requirements.push(if negated {
                Requirement::NotEqual(field.into(), value.into())
            } else {
                Requirement::Equal(field.into(), value.into())
            });
        }
        Ok(Self(requirements))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&terms.join(","))
    }
}

impl FromIterator<Requirement> for Selector {
    fn from_iter<T: IntoIterator<Item = Requirement>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Requirement> for Selector {
    fn from(value: Requirement) -> Self {
        Self(vec![value])
    }
}
