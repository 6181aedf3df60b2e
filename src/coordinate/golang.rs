use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::models::Ecosystem;

/// A parsed `module@version` token from `go mod graph` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoCoordinate {
    /// The token exactly as it appeared in the graph.
    pub from: String,
    pub package: String,
    pub given_version: String,
    pub is_semver: bool,
    pub version: String,
}

impl GoCoordinate {
    /// Split on `@`. No `@` means a bare module path (the main module);
    /// two or more is an error.
    pub fn parse(token: &str) -> Result<Self, ExtractError> {
        let mut parts = token.split('@');
        let package = parts.next().unwrap_or_default();
        let given_version = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(ExtractError::coordinate(Ecosystem::Golang, token));
        }

        let (is_semver, version) = clean_version(given_version);
        Ok(Self {
            from: token.to_string(),
            package: package.to_string(),
            given_version: given_version.to_string(),
            is_semver,
            version,
        })
    }
}

/// Normalize a Go module version.
///
/// Strips a leading `v` when a digit follows it, drops build metadata (`+...`)
/// and re-renders valid semantic versions canonically. Returns whether the
/// result is a valid semantic version.
///
/// A `v` not followed by a digit is kept (`"vfoo"` stays `"vfoo"`), so that
/// applying it to its own output is a no-op even for inputs like `"vv1.0.0"`.
pub fn clean_version(version: &str) -> (bool, String) {
    let version = match version.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => version,
    };
    let version = version.split('+').next().unwrap_or_default();

    match Version::parse(version) {
        Ok(parsed) => (true, parsed.to_string()),
        Err(_) => (false, version.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_module_with_version() {
        let c = GoCoordinate::parse("github.com/pkg/errors@v0.9.1").unwrap();
        assert_eq!(c.package, "github.com/pkg/errors");
        assert_eq!(c.given_version, "v0.9.1");
        assert_eq!(c.version, "0.9.1");
        assert!(c.is_semver);
        assert_eq!(format!("{}@{}", c.package, c.given_version), c.from);
    }

    #[test]
    fn test_parse_bare_module() {
        let c = GoCoordinate::parse("example.com/root").unwrap();
        assert_eq!(c.package, "example.com/root");
        assert_eq!(c.given_version, "");
        assert_eq!(c.version, "");
        assert!(!c.is_semver);
    }

    #[test]
    fn test_parse_rejects_double_at() {
        let err = GoCoordinate::parse("a@v1@v2").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MalformedCoordinate { ecosystem: Ecosystem::Golang, .. }
        ));
    }

    #[test]
    fn test_clean_version_drops_build_metadata() {
        assert_eq!(clean_version("v1.2.3+meta"), (true, "1.2.3".to_string()));
        assert_eq!(
            clean_version("v1.2.3-rc.1+build.5"),
            (true, "1.2.3-rc.1".to_string())
        );
        assert_eq!(
            clean_version("v2.0.0+incompatible"),
            (true, "2.0.0".to_string())
        );
    }

    #[test]
    fn test_clean_version_keeps_pseudo_versions() {
        let (ok, v) = clean_version("v0.0.0-20190620085101-78d2af792bab");
        assert!(ok);
        assert_eq!(v, "0.0.0-20190620085101-78d2af792bab");
    }

    #[test]
    fn test_clean_version_non_semver() {
        assert_eq!(clean_version("v1.2"), (false, "1.2".to_string()));
        assert_eq!(clean_version("latest+x"), (false, "latest".to_string()));
        assert_eq!(clean_version(""), (false, String::new()));
    }

    #[test]
    fn test_clean_version_keeps_v_before_non_digit() {
        assert_eq!(clean_version("vfoo"), (false, "vfoo".to_string()));
        assert_eq!(clean_version("vv1.0.0"), (false, "vv1.0.0".to_string()));
    }

    #[test]
    fn test_clean_version_is_idempotent() {
        for v in [
            "v1.2.3+meta",
            "1.2.3",
            "vv1.0.0",
            "v",
            "v+1",
            "1.2.3+",
            "v1.0.0-alpha.1",
            "junk",
            "",
        ] {
            let once = clean_version(v);
            assert_eq!(clean_version(&once.1), once, "input {:?}", v);
        }
    }
}
