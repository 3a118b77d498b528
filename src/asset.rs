//! Image and icon asset collaborator.
//!
//! The design panel's "upload" and "generate" tabs resolve to either an image
//! URL or an SVG markup string, which the session then hands to the selection
//! model. The only production implementation is a placeholder; a real asset
//! service plugs in behind `AssetService`.

#[cfg(test)]
#[path = "asset_test.rs"]
mod asset_test;

/// Errors produced by an asset collaborator.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The request carried no usable input.
    #[error("empty asset request")]
    Empty,

    /// The resolved image source is not a usable URL.
    #[error("invalid image url: {0}")]
    InvalidUrl(String),

    /// The resolved icon is not SVG markup.
    #[error("invalid icon markup")]
    InvalidMarkup,

    /// The asset service could not be reached.
    #[error("asset service unavailable: {0}")]
    Unavailable(String),
}

impl AssetError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "E_ASSET_EMPTY",
            Self::InvalidUrl(_) => "E_ASSET_URL",
            Self::InvalidMarkup => "E_ASSET_MARKUP",
            Self::Unavailable(_) => "E_ASSET_UNAVAILABLE",
        }
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Resolves uploads and generation prompts into assets.
#[async_trait::async_trait]
pub trait AssetService: Send + Sync {
    /// Upload an image and return the URL it is served from.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if the upload fails.
    async fn upload_image(&self, file_name: &str, bytes: &[u8]) -> Result<String, AssetError>;

    /// Generate an icon from a text prompt and return its SVG markup.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if generation fails.
    async fn generate_icon(&self, prompt: &str) -> Result<String, AssetError>;
}

/// Placeholder service: serves uploads from a fixed CDN prefix and
/// "generates" a circle icon.
#[derive(Clone, Debug)]
pub struct PlaceholderAssets {
    base_url: String,
}

impl Default for PlaceholderAssets {
    fn default() -> Self {
        Self { base_url: "https://assets.example.com/uploads".into() }
    }
}

impl PlaceholderAssets {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }
}

#[async_trait::async_trait]
impl AssetService for PlaceholderAssets {
    async fn upload_image(&self, file_name: &str, bytes: &[u8]) -> Result<String, AssetError> {
        let name = file_name.trim();
        if name.is_empty() || bytes.is_empty() {
            return Err(AssetError::Empty);
        }
        let slug: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c.to_ascii_lowercase() } else { '-' })
            .collect();
        Ok(format!("{}/{slug}", self.base_url))
    }

    async fn generate_icon(&self, prompt: &str) -> Result<String, AssetError> {
        if prompt.trim().is_empty() {
            return Err(AssetError::Empty);
        }
        Ok(r#"<svg viewBox="0 0 24 24" fill="currentColor"><circle cx="12" cy="12" r="10"/></svg>"#.to_string())
    }
}

/// Accept an image source the preview can load.
///
/// # Errors
///
/// Returns [`AssetError::InvalidUrl`] unless the source is an http(s) URL, a
/// data image URL, or a root-relative path.
pub fn validate_image_url(raw: &str) -> Result<&str, AssetError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(AssetError::Empty);
    }
    let accepted = ["https://", "http://", "data:image/", "/"].iter().any(|prefix| url.starts_with(prefix));
    if accepted && !url.chars().any(char::is_whitespace) {
        Ok(url)
    } else {
        Err(AssetError::InvalidUrl(url.to_string()))
    }
}

/// Accept icon markup that is a single SVG element.
///
/// # Errors
///
/// Returns [`AssetError::InvalidMarkup`] unless the markup is an `<svg>` element.
pub fn validate_icon_markup(raw: &str) -> Result<&str, AssetError> {
    let markup = raw.trim();
    if markup.is_empty() {
        return Err(AssetError::Empty);
    }
    let opens = markup.to_ascii_lowercase().starts_with("<svg");
    let closes = markup.ends_with("</svg>") || markup.ends_with("/>");
    if opens && closes { Ok(markup) } else { Err(AssetError::InvalidMarkup) }
}
