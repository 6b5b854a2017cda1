//! Request-scoped context handed to every strategy hook.
use crate::gvk::GroupResource;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// What the apiserver resolved the current request to
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestInfo {
    /// `get`, `list`, `create`, `update`, ...
    pub verb: String,
    /// API group, empty for the core group
    pub api_group: String,
    /// API version
    pub api_version: String,
    /// Plural resource name
    pub resource: String,
    /// Subresource such as `status`, empty when none
    pub subresource: String,
    /// Namespace of the request, empty for cluster-scoped requests
    pub namespace: String,
    /// Object name, empty for collection requests
    pub name: String,
}

impl RequestInfo {
    /// The group and resource addressed by the request
    pub fn group_resource(&self) -> GroupResource {
        GroupResource::new(&self.api_group, &self.resource)
    }
}

/// Request-scoped cancellation, deadline and request information
///
/// Strategies pass this through to the capability hooks they delegate to. Honoring
/// cancellation is up to those hooks; the strategies themselves never block.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    info: Option<RequestInfo>,
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl RequestContext {
    /// A context without request information, deadline or cancellation
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the resolved request information
    #[must_use]
    pub fn with_request_info(mut self, info: RequestInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Attach a deadline after which the request is considered cancelled
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Tie cancellation to an existing token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The resolved request, if the apiserver provided one
    pub fn request_info(&self) -> Option<&RequestInfo> {
        self.info.as_ref()
    }

    /// The deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The token that signals cancellation of this request
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Whether the request was cancelled or its deadline has passed
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// `bound` if set, otherwise the group and resource of the current request
    pub fn group_resource_or(&self, bound: &GroupResource) -> GroupResource {
        match &self.info {
            Some(info) if bound.is_empty() => info.group_resource(),
            _ => bound.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn cancellation() {
        let token = CancellationToken::new();
        let ctx = RequestContext::new().with_cancellation(token.child_token());
        assert!(!ctx.is_cancelled());
        token.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn deadline() {
        let past = Instant::now();
        assert!(RequestContext::new().with_deadline(past).is_cancelled());
        let future = Instant::now() + Duration::from_secs(3600);
        assert!(!RequestContext::new().with_deadline(future).is_cancelled());
    }

    #[test]
    fn group_resource_fallback() {
        let ctx = RequestContext::new().with_request_info(RequestInfo {
            verb: "list".into(),
            api_group: "arc.bwi.de".into(),
            resource: "orders".into(),
            ..RequestInfo::default()
        });
        assert_eq!(
            ctx.group_resource_or(&GroupResource::default()),
            GroupResource::new("arc.bwi.de", "orders")
        );
        let bound = GroupResource::new("arc", "testobjs");
        assert_eq!(ctx.group_resource_or(&bound), bound);
        assert_eq!(
            RequestContext::new().group_resource_or(&GroupResource::default()),
            GroupResource::default()
        );
    }
}
