//! # kotoba-search
//!
//! Resolves a free-form query to dictionary entries without the caller
//! having to say where to look.
//!
//! - [`condition::plan`] expands a [`SearchRequest`] into an ordered list of
//!   concrete [`SearchCondition`]s (field x extent x case sensitivity).
//! - [`Resolver`] evaluates them in order against a published store and
//!   returns the first non-empty result.
//! - [`matcher`] builds the regular expressions used for word-boundary
//!   verification and for pattern mode.

pub mod condition;
pub mod error;
pub mod matcher;
pub mod resolver;

pub use condition::{DEFAULT_LIMIT, SearchCondition, SearchRequest, plan};
pub use error::SearchError;
pub use resolver::{Resolution, Resolver};
