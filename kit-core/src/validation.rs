//! Field-path-tagged validation errors returned from validation hooks.
//!
//! Validation never short-circuits: hooks collect every problem into an [`ErrorList`]
//! and the apiserver reports all of them at once.
use crate::{
    gvk::GroupKind,
    response::{reason, Status, StatusCause, StatusDetails},
};
use serde_json::Value;
use std::fmt;

/// Path to a field within an object, rendered as `spec.containers[0].env[FOO]`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path(String);

impl Path {
    /// The root of a path, usually `metadata`, `spec` or `status`
    pub fn new(root: &str) -> Self {
        Self(root.to_string())
    }

    /// A nested field
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self::new(name)
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// An element of a list
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// An entry of a map
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}[{key}]", self.0))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The category of a [`FieldError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// A required field was not set
    Required,
    /// The value is malformed or out of range
    Invalid,
    /// The field may not be set in this context
    Forbidden,
    /// A referenced entity does not exist
    NotFound,
    /// A value that must be unique appeared more than once
    Duplicate,
    /// The value is not one of the supported values
    NotSupported,
    /// The value is longer than allowed
    TooLong,
    /// A list has more items than allowed
    TooMany,
    /// The value has the wrong type
    TypeInvalid,
    /// Validation itself failed
    Internal,
}

impl ErrorType {
    /// The machine-readable reason used in a [`StatusCause`]
    pub fn reason(self) -> &'static str {
        match self {
            ErrorType::Required => "FieldValueRequired",
            ErrorType::Invalid => "FieldValueInvalid",
            ErrorType::Forbidden => "FieldValueForbidden",
            ErrorType::NotFound => "FieldValueNotFound",
            ErrorType::Duplicate => "FieldValueDuplicate",
            ErrorType::NotSupported => "FieldValueNotSupported",
            ErrorType::TooLong => "FieldValueTooLong",
            ErrorType::TooMany => "FieldValueTooMany",
            ErrorType::TypeInvalid => "FieldValueTypeInvalid",
            ErrorType::Internal => "InternalError",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ErrorType::Required => "Required value",
            ErrorType::Invalid | ErrorType::TypeInvalid => "Invalid value",
            ErrorType::Forbidden => "Forbidden",
            ErrorType::NotFound => "Not found",
            ErrorType::Duplicate => "Duplicate value",
            ErrorType::NotSupported => "Unsupported value",
            ErrorType::TooLong => "Too long",
            ErrorType::TooMany => "Too many",
            ErrorType::Internal => "Internal error",
        }
    }

    // these never echo the offending value back
    fn omits_value(self) -> bool {
        matches!(
            self,
            ErrorType::Required | ErrorType::Forbidden | ErrorType::TooLong | ErrorType::Internal
        )
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure on one field
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    /// What went wrong
    pub error_type: ErrorType,
    /// Path of the offending field
    pub field: String,
    /// The offending value, when it is worth echoing back
    pub bad_value: Option<Value>,
    /// Additional human-readable detail
    pub detail: String,
}

impl FieldError {
    fn new(error_type: ErrorType, path: &Path, bad_value: Option<Value>, detail: impl Into<String>) -> Self {
        Self {
            error_type,
            field: path.to_string(),
            bad_value,
            detail: detail.into(),
        }
    }

    /// A required field is missing
    pub fn required(path: &Path, detail: impl Into<String>) -> Self {
        Self::new(ErrorType::Required, path, None, detail)
    }

    /// A field has an invalid value
    pub fn invalid(path: &Path, value: impl Into<Value>, detail: impl Into<String>) -> Self {
        Self::new(ErrorType::Invalid, path, Some(value.into()), detail)
    }

    /// A field may not be set
    pub fn forbidden(path: &Path, detail: impl Into<String>) -> Self {
        Self::new(ErrorType::Forbidden, path, None, detail)
    }

    /// A referenced entity was not found
    pub fn not_found(path: &Path, value: impl Into<Value>) -> Self {
        Self::new(ErrorType::NotFound, path, Some(value.into()), "")
    }

    /// A value is duplicated
    pub fn duplicate(path: &Path, value: impl Into<Value>) -> Self {
        Self::new(ErrorType::Duplicate, path, Some(value.into()), "")
    }

    /// A value is not one of `valid`
    pub fn not_supported(path: &Path, value: impl Into<Value>, valid: &[&str]) -> Self {
        let detail = if valid.is_empty() {
            String::new()
        } else {
            let quoted: Vec<String> = valid.iter().map(|v| format!("{v:?}")).collect();
            format!("supported values: {}", quoted.join(", "))
        };
        Self::new(ErrorType::NotSupported, path, Some(value.into()), detail)
    }

    /// A value is longer than `max` characters
    pub fn too_long(path: &Path, max: usize) -> Self {
        Self::new(
            ErrorType::TooLong,
            path,
            None,
            format!("may not be more than {max} bytes"),
        )
    }

    /// A list has `actual` items but may have at most `max`
    pub fn too_many(path: &Path, actual: usize, max: usize) -> Self {
        Self::new(
            ErrorType::TooMany,
            path,
            Some(actual.into()),
            format!("must have at most {max} items"),
        )
    }

    /// A value has the wrong type
    pub fn type_invalid(path: &Path, value: impl Into<Value>, detail: impl Into<String>) -> Self {
        Self::new(ErrorType::TypeInvalid, path, Some(value.into()), detail)
    }

    /// Validation of a field failed for reasons unrelated to its value
    pub fn internal(path: &Path, err: &dyn std::error::Error) -> Self {
        Self::new(ErrorType::Internal, path, None, err.to_string())
    }

    /// The message without the field path, as used in a [`StatusCause`]
    pub fn body(&self) -> String {
        let mut body = match (&self.bad_value, self.error_type.omits_value()) {
            (Some(value), false) => format!("{}: {value}", self.error_type),
            _ => self.error_type.to_string(),
        };
        if !self.detail.is_empty() {
            body.push_str(": ");
            body.push_str(&self.detail);
        }
        body
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.body())
    }
}

impl std::error::Error for FieldError {}

/// Every validation failure found on an object, empty when the object is valid
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    /// An empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Record another failure
    pub fn push(&mut self, err: FieldError) {
        self.0.push(err);
    }

    /// Number of failures
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the object passed validation
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the failures
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Aggregates every failure into a 422 `Invalid` status
    ///
    /// The message reads `Kind.group "name" is invalid: ...` and each failure becomes a cause.
    pub fn to_status(&self, kind: &GroupKind, name: &str) -> Status {
        let aggregate = match self.0.as_slice() {
            [single] => single.to_string(),
            many => {
                let msgs: Vec<String> = many.iter().map(ToString::to_string).collect();
                format!("[{}]", msgs.join(", "))
            }
        };
        let causes = self
            .0
            .iter()
            .map(|err| StatusCause {
                reason: err.error_type.reason().to_string(),
                message: err.body(),
                field: err.field.clone(),
            })
            .collect();
        Status::failure(&format!("{kind} {name:?} is invalid: {aggregate}"), reason::INVALID)
            .with_code(422)
            .with_details(StatusDetails {
                name: name.to_string(),
                group: kind.group.clone(),
                kind: kind.kind.clone(),
                causes,
            })
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<T: IntoIterator<Item = FieldError>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<T: IntoIterator<Item = FieldError>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<FieldError>> for ErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ErrorList {
    type IntoIter = std::vec::IntoIter<FieldError>;
    type Item = FieldError;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type IntoIter = std::slice::Iter<'a, FieldError>;
    type Item = &'a FieldError;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
