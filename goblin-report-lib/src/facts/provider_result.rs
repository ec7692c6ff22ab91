use std::sync::Arc;

/// Outcome of asking the metrics service about one release.
#[derive(Debug, Clone)]
pub enum ProviderResult<T> {
    /// The service knew the release and returned data.
    Found(T),

    /// The service has no record of the release.
    ReleaseNotFound,

    /// Talking to the service failed for this release.
    Error(Arc<ohno::AppError>),
}

impl<T> ProviderResult<T> {
    /// Returns `true` if the result is `Found`.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns a reference to the contained data if `Found`, otherwise `None`.
    #[must_use]
    pub const fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Found(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the contained data if `Found`, otherwise `None`.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(data) => Some(data),
            _ => None,
        }
    }
}
