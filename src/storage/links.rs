//! Download link resolution.

use url::Url;

use crate::error::{EngineError, EngineResult};

/// Produces a download link for a document.
///
/// Links are opaque strings to the rest of the engine.
pub trait LinkResolver: Send + Sync {
    /// Returns the link for the document `id`.
    fn resolve(&self, id: &str) -> EngineResult<String>;
}

/// Builds links by appending the document id as a path segment of a base URL.
///
/// # Example
///
/// ```
/// use stipend_engine::storage::{BaseUrlLinkResolver, LinkResolver};
///
/// let resolver = BaseUrlLinkResolver::new("https://files.example.com/uploads").unwrap();
/// assert_eq!(
///     resolver.resolve("a b.xlsx").unwrap(),
///     "https://files.example.com/uploads/a%20b.xlsx"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BaseUrlLinkResolver {
    base: Url,
}

impl BaseUrlLinkResolver {
    /// Creates a resolver for `base`.
    ///
    /// Fails if `base` is not an absolute URL that can carry path segments.
    pub fn new(base: &str) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::LinkError {
            id: base.to_string(),
            message,
        };

        let url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }
        Ok(Self { base: url })
    }
}

impl LinkResolver for BaseUrlLinkResolver {
    fn resolve(&self, id: &str) -> EngineResult<String> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| EngineError::LinkError {
                id: id.to_string(),
                message: "base URL cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .push(id);
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_base() {
        let resolver = BaseUrlLinkResolver::new("http://localhost:8080/files/").unwrap();
        assert_eq!(
            resolver.resolve("a.xlsx").unwrap(),
            "http://localhost:8080/files/a.xlsx"
        );
    }

    #[test]
    fn test_id_is_percent_encoded() {
        let resolver = BaseUrlLinkResolver::new("http://localhost:8080/files").unwrap();
        let link = resolver.resolve("ACG_식대 정리_홍길동.xlsx").unwrap();

        assert!(link.starts_with("http://localhost:8080/files/ACG_"));
        assert!(!link.contains(' '));
        assert!(link.contains("%20"));
    }

    #[test]
    fn test_id_cannot_escape_base_path() {
        let resolver = BaseUrlLinkResolver::new("http://localhost:8080/files/").unwrap();
        let link = resolver.resolve("../admin?x=1#y").unwrap();

        assert!(link.starts_with("http://localhost:8080/files/"));
        assert!(!link.contains('?'));
        assert!(!link.contains('#'));
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        assert!(matches!(
            BaseUrlLinkResolver::new("not a url"),
            Err(EngineError::LinkError { .. })
        ));
        assert!(matches!(
            BaseUrlLinkResolver::new("mailto:files@example.com"),
            Err(EngineError::LinkError { .. })
        ));
    }
}
