//! Parsers for ecosystem-specific dependency identities.
//!
//! - [`maven`]: colon-delimited `group:artifact[:packaging][:classifier]:version[:scope]`
//! - [`golang`]: `module@version` strings plus semantic-version cleanup

pub mod golang;
pub mod maven;
