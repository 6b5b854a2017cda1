//! apiserver-kit is an umbrella-crate for plugging resource kinds into a generic apiserver registry.
//!
//! # Overview
//!
//! A generic registry stores any resource kind but asks a per-kind *strategy* how to create,
//! update, validate and render it. Rather than writing one strategy per kind, a kind opts into
//! the behavior it needs by implementing small capability traits on its own type; a single
//! [`DefaultStrategy`](crate::rest::DefaultStrategy) probes for those and falls back to generic
//! behavior everywhere else.
//!
//! The main modules are:
//!
//! - [`core`](crate::core) with the [`Object`](crate::core::Object) model, the
//!   [`capability`](crate::core::capability) traits and the wire types (tables, statuses,
//!   selectors, validation errors)
//! - [`rest`](crate::rest) with the strategy contracts, [`DefaultStrategy`](crate::rest::DefaultStrategy)
//!   and [`PrepareForUpdaterStrategy`](crate::rest::PrepareForUpdaterStrategy)
//!
//! # Opting into capabilities
//!
//! ```
//! use apiserver_kit::{
//!     core::{
//!         capability::{Validater, Canonicalizer},
//!         validation::{FieldError, Path},
//!         ErrorList, GroupResource, Object, ObjectMeta, RequestContext,
//!     },
//!     rest::{DefaultStrategy, RestCreateStrategy, StrategyCanonicalizer},
//! };
//! use serde::Serialize;
//!
//! #[derive(Serialize, Debug, Default)]
//! struct Order {
//!     metadata: ObjectMeta,
//!     artifacts: Vec<String>,
//! }
//!
//! impl Validater for Order {
//!     fn validate(&self, _: &RequestContext) -> ErrorList {
//!         let mut errs = ErrorList::new();
//!         if self.artifacts.is_empty() {
//!             errs.push(FieldError::required(&Path::new("artifacts"), "at least one artifact"));
//!         }
//!         errs
//!     }
//! }
//!
//! impl Canonicalizer for Order {
//!     fn canonicalize(&mut self) {
//!         self.artifacts.sort();
//!         self.artifacts.dedup();
//!     }
//! }
//!
//! impl Object for Order {
//!     fn meta(&self) -> Option<&ObjectMeta> {
//!         Some(&self.metadata)
//!     }
//!
//!     fn meta_mut(&mut self) -> Option<&mut ObjectMeta> {
//!         Some(&mut self.metadata)
//!     }
//!
//!     fn as_validater(&self) -> Option<&dyn Validater> {
//!         Some(self)
//!     }
//!
//!     fn as_canonicalizer(&mut self) -> Option<&mut dyn Canonicalizer> {
//!         Some(self)
//!     }
//! }
//!
//! let strategy = DefaultStrategy::new(GroupResource::new("arc.bwi.de", "orders"));
//! let ctx = RequestContext::new();
//!
//! let mut order = Order::default();
//! assert_eq!(strategy.validate(&ctx, &order).len(), 1);
//!
//! order.artifacts = vec!["b".into(), "a".into(), "b".into()];
//! assert!(strategy.validate(&ctx, &order).is_empty());
//! strategy.canonicalize(&mut order);
//! assert_eq!(order.artifacts, ["a", "b"]);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Re-exports from [`apiserver-kit-core`](apiserver_kit_core)
#[doc(inline)]
pub use apiserver_kit_core as core;

/// Re-exports from [`apiserver-kit-rest`](apiserver_kit_rest)
#[doc(inline)]
pub use apiserver_kit_rest as rest;

/// Re-export of the `k8s-openapi` version the metadata types come from
pub use k8s_openapi;

pub use crate::core::{Object, RequestContext};
pub use crate::rest::{DefaultStrategy, PrepareForUpdaterStrategy, Strategy};
