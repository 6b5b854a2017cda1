//! Registry strategies for resource kinds served by a generic apiserver
//!
//! A generic apiserver registry stores any resource kind, but needs a strategy per kind to
//! answer kind-specific questions: is it namespaced, how are new names generated, what does
//! validation say, how is it rendered as a table. The traits in [`strategy`] are that contract.
//!
//! [`DefaultStrategy`] implements the whole contract for any kind without per-kind code: at
//! each hook it probes the object for the matching
//! [`capability`](apiserver_kit_core::capability) and delegates to it, falling back to a
//! generic default when the object has not opted in.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod storage;
pub use storage::{get_attrs, SelectionPredicate};

pub mod strategy;
pub use strategy::{
    DefaultStrategy, PrepareForUpdaterStrategy, RestCreateStrategy, RestDeleteStrategy, RestUpdateStrategy,
    Strategy, StrategyCanonicalizer, TableConvertor,
};

pub mod table;
pub use table::DefaultTableConvertor;

pub mod typer;
pub use typer::{ObjectTyper, TypeError, TypeRegistry};

#[cfg(test)]
mod testing;
