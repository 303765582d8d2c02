/// Name the tool is published and cached under.
pub const TOOL_NAME: &str = "inspequte";

/// Tag prefix carried by the CLI's own releases. Other artifacts hosted in
/// the same repository (e.g. the Gradle plugin) are tagged differently.
pub const RELEASE_TAG_PREFIX: &str = "inspequte-v";

/// `owner/name` of the repository the releases are published in.
pub const TOOL_REPOSITORY: &str = "KengoTODA/inspequte";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub const ACCEPT: &str = "application/vnd.github+json";

pub const USER_AGENT: &str = "setup-inspequte";

/// Upper bound the registry allows for a single listing page.
pub const RELEASES_PER_PAGE: u32 = 100;

/// Where release metadata is fetched from and how requests authenticate.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// API base, e.g. `https://api.github.com` or an enterprise `/api/v3` root.
    pub api_url: String,
    /// `owner/name` of the release repository.
    pub repository: String,
    /// Optional bearer token, raises the anonymous rate limit.
    pub token: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            repository: TOOL_REPOSITORY.to_string(),
            token: None,
        }
    }
}

impl RegistryConfig {
    /// Builds a config for `api_url`, dropping empty tokens.
    pub fn new(api_url: &str, token: Option<String>) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            repository: TOOL_REPOSITORY.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }
}
