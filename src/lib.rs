//! `deptree` — normalized dependency trees from ecosystem graph dumps.
//!
//! Callers hand over already-fetched [`models::Manifest`]s and get back an
//! [`models::ExtractionResult`] shaped as `result[0].details[i].resolved`.
//!
//! | Ecosystem | Input | Extractor |
//! |---|---|---|
//! | Maven | `mvn dependency:tree -DoutputType=dot` | [`extractor::maven`] |
//! | npm | `npm list --json` | [`extractor::npm`] |
//! | PyPI | pre-resolved JSON (passed through) | [`extractor::pypi`] |
//! | Go | `go mod graph` | [`extractor::golang`] |
//!
//! ```
//! use deptree::extractor::{extract, ExtractOptions};
//! use deptree::models::{Ecosystem, Manifest};
//!
//! let graph = "\"a:b:jar:1.0\" ;\n\"a:b:jar:1.0\" -> \"c:d:jar:2.0:compile\" ;\n";
//! let manifests = [Manifest::new("/repo/dependencies.txt", "dependencies.txt", graph)];
//! let result = extract(Ecosystem::Maven, &manifests, false, ExtractOptions::default()).unwrap();
//! assert_eq!(result.details().count(), 1);
//! ```

pub mod config;
pub mod coordinate;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod models;

pub use error::ExtractError;
pub use extractor::{extract, ExtractOptions, Extractor};
