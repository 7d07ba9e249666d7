use crate::utils::error::{RowError, RowResult};
use url::Url;

pub const DEFAULT_VIEWER_PREFIX: &str = "https://gcsim.app/viewer/share/";
pub const DEFAULT_API_PREFIX: &str = "https://viewer.gcsim.workers.dev/";

/// Maps a share link onto the API by swapping the viewer prefix for the API
/// prefix. A link without the prefix comes back unchanged.
pub fn derive_api_url(link: &str) -> String {
    LinkDeriver::default().derive(link)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDeriver {
    viewer_prefix: String,
    api_prefix: String,
}

impl Default for LinkDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWER_PREFIX, DEFAULT_API_PREFIX)
    }
}

impl LinkDeriver {
    pub fn new(viewer_prefix: impl Into<String>, api_prefix: impl Into<String>) -> Self {
        Self {
            viewer_prefix: viewer_prefix.into(),
            api_prefix: api_prefix.into(),
        }
    }

    pub fn derive(&self, link: &str) -> String {
        link.replacen(&self.viewer_prefix, &self.api_prefix, 1)
    }

    /// Derives the fetch URL for a row and rejects links the substitution
    /// did not recognize.
    pub fn resolve(&self, link: Option<&str>) -> RowResult<String> {
        let link = link
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| RowError::invalid_link("share link is missing"))?;

        let derived = self.derive(link);
        if derived == link || derived.contains(&self.viewer_prefix) {
            return Err(RowError::invalid_link(format!(
                "'{}' does not start with {}",
                link, self.viewer_prefix
            )));
        }

        let token = derived.strip_prefix(&self.api_prefix).ok_or_else(|| {
            RowError::invalid_link(format!(
                "'{}' does not start with {}",
                link, self.viewer_prefix
            ))
        })?;
        if token.is_empty() || token.contains(char::is_whitespace) {
            return Err(RowError::invalid_link(format!(
                "'{}' has no usable share token",
                link
            )));
        }

        Url::parse(&derived)
            .map_err(|e| RowError::invalid_link(format!("'{}' is not a valid URL: {}", derived, e)))?;

        Ok(derived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RowErrorKind;

    #[test]
    fn test_derive_share_link() {
        assert_eq!(
            derive_api_url("https://gcsim.app/viewer/share/perm_ABC123"),
            "https://viewer.gcsim.workers.dev/perm_ABC123"
        );
    }

    #[test]
    fn test_derive_without_prefix_is_passthrough() {
        let link = "https://example.com/something/else";
        assert_eq!(derive_api_url(link), link);
    }

    #[test]
    fn test_resolve_accepts_share_link() {
        let deriver = LinkDeriver::default();
        let url = deriver
            .resolve(Some("https://gcsim.app/viewer/share/perm_AY1MdsFpZipK4qxYP4cLn"))
            .unwrap();
        assert_eq!(url, "https://viewer.gcsim.workers.dev/perm_AY1MdsFpZipK4qxYP4cLn");
    }

    #[test]
    fn test_resolve_custom_api_prefix() {
        let deriver = LinkDeriver::new(DEFAULT_VIEWER_PREFIX, "http://127.0.0.1:8080/");
        let url = deriver
            .resolve(Some("https://gcsim.app/viewer/share/perm_X"))
            .unwrap();
        assert_eq!(url, "http://127.0.0.1:8080/perm_X");
    }

    #[test]
    fn test_resolve_rejects_unrecognized_links() {
        let deriver = LinkDeriver::default();
        let cases = [
            None,
            Some(""),
            Some("   "),
            Some("https://example.com/viewer/share/perm_X"),
            Some("https://gcsim.app/viewer/share/"),
            Some("see https://gcsim.app/viewer/share/perm_X"),
            Some("https://gcsim.app/viewer/share/https://gcsim.app/viewer/share/x"),
        ];

        for link in cases {
            let err = deriver.resolve(link).unwrap_err();
            assert_eq!(err.kind, RowErrorKind::InvalidLink, "link {:?}", link);
        }
    }
}
