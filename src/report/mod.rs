//! Report renderers for extraction results.
//!
//! - [`terminal`] — colored tables per manifest; respects `--verbose` / `--quiet`.
//!
//! JSON output is the serialized [`ExtractionResult`](deptree::models::ExtractionResult) itself.

pub mod terminal;
