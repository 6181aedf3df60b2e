use crate::error::ExtractError;
use crate::models::Ecosystem;

/// A parsed Maven coordinate. Fields absent at the given arity are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MavenCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub packaging: String,
    pub classifier: String,
    pub version: String,
    pub scope: String,
}

impl MavenCoordinate {
    /// Parse a coordinate by its colon count:
    ///
    /// | colons | layout |
    /// |---|---|
    /// | 1 | `group:artifact` |
    /// | 2 | `group:artifact:version` |
    /// | 3 | `group:artifact:packaging:version` |
    /// | 4 | `group:artifact:packaging:version:scope` |
    /// | 5 | `group:artifact:packaging:classifier:version:scope` |
    pub fn parse(coordinate: &str) -> Result<Self, ExtractError> {
        let parts: Vec<&str> = coordinate.split(':').collect();
        let owned = |i: usize| parts[i].to_string();

        let parsed = match parts.len() {
            2 => MavenCoordinate {
                group_id: owned(0),
                artifact_id: owned(1),
                ..Default::default()
            },
            3 => MavenCoordinate {
                group_id: owned(0),
                artifact_id: owned(1),
                version: owned(2),
                ..Default::default()
            },
            4 => MavenCoordinate {
                group_id: owned(0),
                artifact_id: owned(1),
                packaging: owned(2),
                version: owned(3),
                ..Default::default()
            },
            5 => MavenCoordinate {
                group_id: owned(0),
                artifact_id: owned(1),
                packaging: owned(2),
                version: owned(3),
                scope: owned(4),
                ..Default::default()
            },
            6 => MavenCoordinate {
                group_id: owned(0),
                artifact_id: owned(1),
                packaging: owned(2),
                classifier: owned(3),
                version: owned(4),
                scope: owned(5),
            },
            _ => return Err(ExtractError::coordinate(Ecosystem::Maven, coordinate)),
        };

        Ok(parsed)
    }

    /// Canonical `group:artifact` package name.
    pub fn package(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    pub fn is_test_scope(&self) -> bool {
        self.scope == "test"
    }
}

impl std::fmt::Display for MavenCoordinate {
    /// Render using the shortest layout that holds every non-empty field.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (g, a) = (&self.group_id, &self.artifact_id);
        if !self.classifier.is_empty() {
            write!(
                f,
                "{}:{}:{}:{}:{}:{}",
                g, a, self.packaging, self.classifier, self.version, self.scope
            )
        } else if !self.scope.is_empty() {
            write!(f, "{}:{}:{}:{}:{}", g, a, self.packaging, self.version, self.scope)
        } else if !self.packaging.is_empty() {
            write!(f, "{}:{}:{}:{}", g, a, self.packaging, self.version)
        } else if !self.version.is_empty() {
            write!(f, "{}:{}:{}", g, a, self.version)
        } else {
            write!(f, "{}:{}", g, a)
        }
    }
}
