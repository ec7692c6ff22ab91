//! Loading the artifact list handed over by the build tool.

use crate::Result;
use crate::facts::Artifact;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::Deserialize;
use std::fs;

/// Project identity, used only for titling the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

impl ProjectInfo {
    /// `name version`, skipping whichever part is missing.
    #[must_use]
    pub fn label(&self) -> String {
        [self.name.as_deref(), self.version.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The JSON document listing a project's direct dependencies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactsFile {
    #[serde(default)]
    pub project: ProjectInfo,

    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl ArtifactsFile {
    /// Read and check an artifacts file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any artifact
    /// has a blank groupId, artifactId or version
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading artifacts file '{path}'"))?;
        serde_json::from_str(&text).into_app_err_with(|| format!("parsing artifacts file '{path}'"))
    }
}

/// Everything a report run needs from its inputs.
#[derive(Debug, Clone, Default)]
pub struct ReportInput {
    pub project: ProjectInfo,
    pub artifacts: Vec<Artifact>,
}

impl ReportInput {
    /// Merge the optional artifacts file with the command-line artifacts.
    ///
    /// File artifacts come first, then command-line ones, each in their given
    /// order. Explicit project fields win over the file's.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifacts file cannot be loaded
    pub fn gather(
        artifacts_file: Option<&Utf8Path>,
        cli_artifacts: &[Artifact],
        project_name: Option<&str>,
        project_version: Option<&str>,
    ) -> Result<Self> {
        let file = artifacts_file.map(ArtifactsFile::load).transpose()?.unwrap_or_default();

        let project = ProjectInfo {
            name: project_name.map(str::to_string).or(file.project.name),
            version: project_version.map(str::to_string).or(file.project.version),
        };

        let mut artifacts = file.artifacts;
        artifacts.extend_from_slice(cli_artifacts);

        Ok(Self { project, artifacts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn write_file(dir: &tempfile::TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join("artifacts.json")).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_label() {
        let project = ProjectInfo {
            name: Some("shop".to_string()),
            version: Some("2.1.0".to_string()),
        };
        assert_eq!(project.label(), "shop 2.1.0");

        let project = ProjectInfo {
            name: Some("shop".to_string()),
            version: None,
        };
        assert_eq!(project.label(), "shop");

        assert_eq!(ProjectInfo::default().label(), "");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_file_with_default_scope() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_file(
            &tmp,
            r#"{
                "project": {"name": "shop", "version": "1.0"},
                "artifacts": [
                    {"groupId": "org.a", "artifactId": "lib1", "version": "1.0", "scope": "test"},
                    {"groupId": "org.a", "artifactId": "lib2", "version": "2.0"}
                ]
            }"#,
        );

        let file = ArtifactsFile::load(&path).unwrap();
        assert_eq!(file.project.label(), "shop 1.0");
        assert_eq!(file.artifacts.len(), 2);
        assert_eq!(file.artifacts[0].scope(), "test");
        assert_eq!(file.artifacts[1].scope(), "compile");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_empty_coordinates() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_file(&tmp, r#"{"artifacts": [{"groupId": "", "artifactId": "lib1", "version": "1.0"}]}"#);
        assert!(ArtifactsFile::load(&path).is_err());

        let path = write_file(&tmp, r#"{"artifacts": [{"groupId": "   ", "artifactId": "lib1", "version": "1.0"}]}"#);
        assert!(ArtifactsFile::load(&path).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_malformed_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_file(&tmp, "{ not json");
        assert!(ArtifactsFile::load(&path).is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_gather_orders_file_before_cli() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_file(
            &tmp,
            r#"{"project": {"name": "shop"}, "artifacts": [{"groupId": "org.a", "artifactId": "lib1", "version": "1.0"}]}"#,
        );
        let cli: Artifact = "org.b:lib2:2.0".parse().unwrap();

        let input = ReportInput::gather(Some(&path), &[cli], None, Some("3.0")).unwrap();

        assert_eq!(input.project.label(), "shop 3.0");
        let names: Vec<_> = input.artifacts.iter().map(Artifact::display_name).collect();
        assert_eq!(names, vec!["org.a:lib1", "org.b:lib2"]);
    }

    #[test]
    fn test_gather_without_inputs_is_empty() {
        let input = ReportInput::gather(None, &[], Some("shop"), None).unwrap();
        assert!(input.artifacts.is_empty());
        assert_eq!(input.project.label(), "shop");
    }
}
