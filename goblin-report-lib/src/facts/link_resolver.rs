use super::Artifact;
use url::Url;

const LOG_TARGET: &str = "     links";

/// Host serving the artifact overview pages.
pub const DEFAULT_LINK_BASE_URL: &str = "http://central.sonatype.com";

/// Derives the overview page URL for an artifact.
///
/// Links point at `/artifact/{groupId}/{artifactId}`; the version is left out so
/// the page covers every release.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base_url: Url,
}

impl LinkResolver {
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// The overview page for `artifact`, or `None` when its coordinates can't form a link.
    #[must_use]
    pub fn resolve(&self, artifact: &Artifact) -> Option<Url> {
        let group_id = artifact.group_id();
        let artifact_id = artifact.artifact_id();

        if !is_valid_segment(group_id) || !is_valid_segment(artifact_id) {
            log::debug!(target: LOG_TARGET, "No link for '{}': coordinates are not valid path segments", artifact.display_name());
            return None;
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().ok()?;
            let _ = segments.pop_if_empty().extend(["artifact", group_id, artifact_id]);
        }

        Some(url)
    }
}

impl Default for LinkResolver {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_LINK_BASE_URL).expect("default link base URL is valid"))
    }
}

/// Maven coordinates are limited to ASCII alphanumerics plus `.`, `-` and `_`.
fn is_valid_segment(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}
