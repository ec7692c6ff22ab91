use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Scope assigned to artifacts whose scope was not given explicitly.
pub const DEFAULT_SCOPE: &str = "compile";

/// A direct dependency identified by its Maven coordinates and usage scope.
///
/// The release identity is `(group_id, artifact_id, version)`. The scope only
/// describes how the dependency is used, so two artifacts differing only in
/// scope are still distinct report rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ArtifactRecord")]
pub struct Artifact {
    group_id: Arc<str>,
    artifact_id: Arc<str>,
    version: Arc<str>,
    scope: Arc<str>,
}

/// Wire shape of an artifact; deserialized artifacts go through [`Artifact::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactRecord {
    group_id: String,
    artifact_id: String,
    version: String,
    #[serde(default)]
    scope: String,
}

impl TryFrom<ArtifactRecord> for Artifact {
    type Error = String;

    fn try_from(record: ArtifactRecord) -> Result<Self, String> {
        Self::new(record.group_id, record.artifact_id, record.version, record.scope)
    }
}

impl Artifact {
    /// Create a new artifact, rejecting empty coordinates.
    ///
    /// Every part is trimmed, and a blank scope becomes [`DEFAULT_SCOPE`].
    pub fn new(
        group_id: impl AsRef<str>,
        artifact_id: impl AsRef<str>,
        version: impl AsRef<str>,
        scope: impl AsRef<str>,
    ) -> Result<Self, String> {
        let artifact = Self {
            group_id: Arc::from(group_id.as_ref().trim()),
            artifact_id: Arc::from(artifact_id.as_ref().trim()),
            version: Arc::from(version.as_ref().trim()),
            scope: match scope.as_ref().trim() {
                "" => Arc::from(DEFAULT_SCOPE),
                scope => Arc::from(scope),
            },
        };

        artifact.validate()?;
        Ok(artifact)
    }

    /// Check that the release coordinates are all present.
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("groupId", &self.group_id),
            ("artifactId", &self.artifact_id),
            ("version", &self.version),
        ] {
            if value.is_empty() {
                return Err(format!("artifact '{self}' has an empty {field}"));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The name shown in reports, `groupId:artifactId`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

impl FromStr for Artifact {
    type Err = String;

    /// Parse `GROUP:ARTIFACT:VERSION[:SCOPE]`.
    fn from_str(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group_id, artifact_id, version] => Self::new(group_id, artifact_id, version, DEFAULT_SCOPE),
            [group_id, artifact_id, version, scope] => Self::new(group_id, artifact_id, version, scope),
            _ => Err(format!(
                "invalid artifact '{s}': expected GROUP:ARTIFACT:VERSION or GROUP:ARTIFACT:VERSION:SCOPE"
            )),
        }
    }
}

impl Display for Artifact {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}:{}:{}", self.group_id, self.artifact_id, self.version, self.scope)
    }
}
