use crate::{
    gvk::GroupResource,
    response::{reason, Status, StatusDetails},
};
use thiserror::Error;

/// Errors raised while rendering, matching or configuring resource objects.
///
/// Validation problems are not errors in this sense; they are returned as an
/// [`ErrorList`](crate::validation::ErrorList) from the validation hooks.
#[derive(Error, Debug)]
pub enum Error {
    /// The object could not be rendered as a table because it lacks identity metadata.
    ///
    /// Maps to an HTTP 406 at the apiserver boundary and is never retried.
    #[error("the resource {resource} does not support being converted to a Table")]
    NotAcceptable {
        /// The resource that was being rendered
        resource: GroupResource,
    },

    /// The object carries no `ObjectMeta` to extract selectable attributes from.
    #[error("object does not carry object metadata")]
    MissingObjectMeta,

    /// A field selector string could not be parsed.
    #[error("invalid field selector: {0:?}")]
    InvalidFieldSelector(String),

    /// Metadata field descriptions could not be loaded.
    #[error("failed to parse metadata descriptions: {0}")]
    ParseDescriptions(#[source] serde_yaml::Error),
}

impl Error {
    /// Builds the `Status` an apiserver should answer with for this error
    pub fn status(&self) -> Status {
        let message = self.to_string();
        match self {
            Error::NotAcceptable { resource } => Status::failure(&message, reason::NOT_ACCEPTABLE)
                .with_code(406)
                .with_details(StatusDetails {
                    group: resource.group.clone(),
                    kind: resource.resource.clone(),
                    ..StatusDetails::default()
                }),
            Error::InvalidFieldSelector(_) => {
                Status::failure(&message, reason::BAD_REQUEST).with_code(400)
            }
            Error::MissingObjectMeta | Error::ParseDescriptions(_) => {
                Status::failure(&message, reason::INTERNAL_ERROR).with_code(500)
            }
        }
    }
}
