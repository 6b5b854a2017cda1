//! Status objects returned to apiserver callers
use serde::{Deserialize, Serialize};

/// Machine-readable reasons carried on a failed [`Status`]
///
/// Each reason maps to a single HTTP status code.
pub mod reason {
    /// The request was malformed and can never succeed as sent.
    ///
    /// Status code 400
    pub const BAD_REQUEST: &str = "BadRequest";

    /// The representation asked for (for example a Table) cannot be produced for this resource.
    ///
    /// Status code 406
    pub const NOT_ACCEPTABLE: &str = "NotAcceptable";

    /// A create or update carried invalid data.
    ///
    /// The `causes` of the details enumerate every offending field.
    /// Status code 422
    pub const INVALID: &str = "Invalid";

    /// An unexpected server-side failure.
    ///
    /// Status code 500
    pub const INTERNAL_ERROR: &str = "InternalError";
}

/// A Kubernetes-style status object
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Status {
    /// Status of the operation
    ///
    /// One of: `Success` or `Failure`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusSummary>,

    /// Suggested HTTP return code (0 if unset)
    #[serde(default, skip_serializing_if = "is_u16_zero")]
    pub code: u16,

    /// A human-readable description of the status of this operation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// A machine-readable description of why this operation is in the `Failure` status
    ///
    /// See [`reason`] for the values produced by this crate.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// Extended data associated with the reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

impl Status {
    /// Returns a successful `Status`
    pub fn success() -> Self {
        Status {
            status: Some(StatusSummary::Success),
            ..Status::default()
        }
    }

    /// Returns an unsuccessful `Status`
    pub fn failure(message: &str, reason: &str) -> Self {
        Status {
            status: Some(StatusSummary::Failure),
            message: message.to_string(),
            reason: reason.to_string(),
            ..Status::default()
        }
    }

    /// Sets an explicit HTTP status code
    #[must_use]
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    /// Adds details to the `Status`
    #[must_use]
    pub fn with_details(mut self, details: StatusDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Checks if this `Status` represents success
    pub fn is_success(&self) -> bool {
        self.status == Some(StatusSummary::Success)
    }

    /// Checks if this `Status` represents failure
    pub fn is_failure(&self) -> bool {
        self.status == Some(StatusSummary::Failure)
    }
}

/// Overall status of the operation - whether it succeeded or not
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatusSummary {
    /// Operation succeeded
    Success,
    /// Operation failed
    Failure,
}

/// Status details object on the [`Status`] object
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    /// The name of the resource the status is about, when there is a single one
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The group of the resource the status is about
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    /// The kind (or resource) the status is about
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Individual causes, one per failing field
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<StatusCause>,
}

/// Status cause object on the [`StatusDetails`] object
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
pub struct StatusCause {
    /// A machine-readable description of the cause, such as `FieldValueInvalid`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// A human-readable description of the cause
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// The field that caused the failure, as named by its JSON serialization
    ///
    /// May include dot and postfix notation for nested attributes. Arrays are zero-indexed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
}

fn is_u16_zero(&v: &u16) -> bool {
    v == 0
}
