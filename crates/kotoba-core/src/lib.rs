//! # kotoba-core
//!
//! Core types shared across all kotoba crates:
//! - Lexical object model (entries, kanji spellings, readings, senses)
//! - Abbreviation catalogue and the long-to-short tag resolver
//! - Search vocabulary (fields and match extents)
//! - Cross-cutting error types

pub mod abbrev;
pub mod errors;
pub mod model;
pub mod query;
