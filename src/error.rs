use thiserror::Error;
use crate::config::TOOL_NAME;

/// Result type used across the setup pipeline.
pub type Result<T> = std::result::Result<T, SetupError>;

/// Everything that can abort a setup run.
///
/// The `Display` text of each variant is what ends up in front of the user
/// as the run's single failure message, so keep it stable.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The host platform/arch pair has no published build.
    #[error("Unsupported platform/arch combination: {platform}/{arch}")]
    UnsupportedPlatform { platform: String, arch: String },

    /// The registry answered a single-tag lookup with a non-success status.
    #[error("Failed to fetch {} release {}: {} {}", TOOL_NAME, .tag, .status, .status_text)]
    ReleaseFetch {
        tag: String,
        status: u16,
        status_text: String,
    },

    /// The registry answered the release listing with a non-success status.
    #[error("Failed to fetch {} releases: {} {}", TOOL_NAME, .status, .status_text)]
    ReleasesFetch { status: u16, status_text: String },

    /// The configured API base cannot carry the release endpoints.
    #[error("Invalid release registry API URL: {0}")]
    InvalidApiUrl(String),

    /// The request never produced a usable response (DNS, TLS, bad JSON, ...).
    #[error("Release registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A pinned release exists but carries nothing for this target.
    #[error("No downloadable {} asset found for {} in {}", TOOL_NAME, .triple, .tag)]
    AssetNotFound { triple: String, tag: String },

    /// No eligible release in the listing carries an asset for this target.
    #[error("No stable {} release includes an asset for {}", TOOL_NAME, .triple)]
    NoStableRelease { triple: String },

    /// Download, extraction or cache storage failed. The whole context chain
    /// is shown, outermost first.
    #[error("{0:#}")]
    ToolCache(anyhow::Error),

    /// Writing an output or PATH entry back to the runner failed.
    #[error("Failed to write runner {what}: {source}")]
    Runner {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl From<anyhow::Error> for SetupError {
    fn from(err: anyhow::Error) -> Self {
        SetupError::ToolCache(err)
    }
}

impl SetupError {
    pub(crate) fn runner(what: &'static str, source: std::io::Error) -> Self {
        SetupError::Runner { what, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_message() {
        let err = SetupError::UnsupportedPlatform {
            platform: "linux".to_string(),
            arch: "ppc64".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported platform/arch combination: linux/ppc64"
        );
    }

    #[test]
    fn test_fetch_messages_embed_status() {
        let single = SetupError::ReleaseFetch {
            tag: "inspequte-v1.0.0".to_string(),
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(
            single.to_string(),
            "Failed to fetch inspequte release inspequte-v1.0.0: 404 Not Found"
        );

        let list = SetupError::ReleasesFetch {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(
            list.to_string(),
            "Failed to fetch inspequte releases: 500 Internal Server Error"
        );
    }

    #[test]
    fn test_tool_cache_error_is_transparent() {
        let err = SetupError::from(anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_tool_cache_error_keeps_cause() {
        let err = SetupError::from(
            anyhow::anyhow!("404 Not Found").context("Failed to download https://example.com/a.tar.gz"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to download https://example.com/a.tar.gz: 404 Not Found"
        );
    }
}
