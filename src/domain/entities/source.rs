//! Source-resolution strategies: how an image identifier becomes a fetchable URL.

use super::{ImageId, ImageVariant};

/// Default CDN serving images by identifier.
pub const DEFAULT_CDN_BASE: &str = "https://lh3.googleusercontent.com/d";

/// Maps an identifier to a URL for a given rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStrategy {
    /// Fetch straight from the third-party CDN.
    Direct {
        /// CDN base, e.g. `https://lh3.googleusercontent.com/d`.
        cdn_base: String,
    },
    /// Fetch through the gallery API's image proxy.
    Proxy {
        /// API origin, e.g. `http://localhost:8080`.
        api_base: String,
    },
}

impl SourceStrategy {
    /// Direct strategy against the default CDN.
    #[must_use]
    pub fn direct_default() -> Self {
        Self::Direct {
            cdn_base: DEFAULT_CDN_BASE.to_string(),
        }
    }

    /// Builds the URL for one fetch attempt.
    ///
    /// `cache_bust` must differ between attempts. The direct CDN ignores
    /// sizing so both renditions share a URL; the proxy selects the large
    /// rendition with `size=large` and relies on `Cache-Control` for freshness.
    #[must_use]
    pub fn url_for(&self, id: &ImageId, variant: ImageVariant, cache_bust: &str) -> String {
        match self {
            Self::Direct { cdn_base } => {
                format!("{}/{}?cb={cache_bust}", cdn_base.trim_end_matches('/'), id)
            }
            Self::Proxy { api_base } => {
                let base = format!("{}/api/images/{}/proxy", api_base.trim_end_matches('/'), id);
                match variant {
                    ImageVariant::Thumbnail => base,
                    ImageVariant::Large => format!("{base}?size=large"),
                }
            }
        }
    }

    /// Short label for logs and the status bar.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Direct { .. } => "direct",
            Self::Proxy { .. } => "proxy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ImageId {
        ImageId::new(s).unwrap()
    }

    #[test]
    fn test_direct_url_has_cache_bust() {
        let strategy = SourceStrategy::direct_default();
        let url = strategy.url_for(&id("A1"), ImageVariant::Thumbnail, "1700000000000");
        assert_eq!(
            url,
            "https://lh3.googleusercontent.com/d/A1?cb=1700000000000"
        );
    }

    #[test]
    fn test_direct_large_matches_thumbnail() {
        let strategy = SourceStrategy::Direct {
            cdn_base: "https://cdn.example/d/".to_string(),
        };
        assert_eq!(
            strategy.url_for(&id("A1"), ImageVariant::Large, "7"),
            strategy.url_for(&id("A1"), ImageVariant::Thumbnail, "7")
        );
    }

    #[test]
    fn test_proxy_urls() {
        let strategy = SourceStrategy::Proxy {
            api_base: "http://localhost:8080/".to_string(),
        };
        assert_eq!(
            strategy.url_for(&id("XYZ9"), ImageVariant::Thumbnail, "1"),
            "http://localhost:8080/api/images/XYZ9/proxy"
        );
        assert_eq!(
            strategy.url_for(&id("XYZ9"), ImageVariant::Large, "1"),
            "http://localhost:8080/api/images/XYZ9/proxy?size=large"
        );
    }
}
