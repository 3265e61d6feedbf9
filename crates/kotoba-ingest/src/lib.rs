//! # kotoba-ingest
//!
//! Turns a JMdict document into a published dictionary store.
//!
//! - [`parser::EntryParser`] pulls one [`Entry`](kotoba_core::model::Entry)
//!   at a time out of the XML event stream, registering the DTD entity
//!   declarations with the session's abbreviation table on the way.
//! - [`session::BuildSession`] carries the per-build state: the abbreviation
//!   table, the completed-entry counter and the progress observer.
//! - [`build::build_store`] runs the whole pipeline into a staging store and
//!   publishes it only once every step succeeded.

pub mod build;
pub mod error;
pub mod parser;
pub mod progress;
pub mod session;

pub use build::{BuildOptions, BuildReport, DEFAULT_BATCH_SIZE, build_store, ingest};
pub use error::IngestError;
pub use progress::{NoProgress, ProgressObserver};
pub use session::BuildSession;
