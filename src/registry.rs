use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Deserializer};
use tracing::debug;
use crate::config::{self, RegistryConfig, RELEASES_PER_PAGE};
use crate::error::{Result, SetupError};

/// A downloadable file attached to a release.
///
/// Every field is optional: registry data is only checked where it is used.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: Option<String>,
    pub browser_download_url: Option<String>,
}

/// A published release as the registry reports it.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub tag_name: Option<String>,
    /// Display name, not necessarily equal to the tag.
    pub name: Option<String>,
    pub draft: Option<bool>,
    pub prerelease: Option<bool>,
    /// Missing and `null` both read as no assets.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assets: Vec<ReleaseAsset>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<ReleaseAsset>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ReleaseAsset>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Source of release metadata for the tool's repository.
pub trait ReleaseSource {
    /// Fetches the release published under exactly `tag`.
    fn release_by_tag(&self, tag: &str) -> Result<Release>;

    /// Fetches the most recent releases, newest first, at most one page.
    fn releases(&self) -> Result<Vec<Release>>;
}

/// [`ReleaseSource`] backed by the GitHub REST API.
pub struct GitHubReleases {
    client: Client,
    config: RegistryConfig,
}

impl GitHubReleases {
    /// Creates a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let client = Client::builder().user_agent(config::USER_AGENT).build()?;
        Ok(Self { client, config })
    }

    /// URL of the single-release endpoint; the tag is percent-encoded as one
    /// path segment.
    pub fn release_url(&self, tag: &str) -> Result<Url> {
        let mut url = self.repository_url()?;
        url.path_segments_mut()
            .map_err(|_| invalid_api_url(&self.config.api_url))?
            .extend(["releases", "tags", tag]);
        Ok(url)
    }

    /// URL of the release listing endpoint.
    pub fn releases_url(&self) -> Result<Url> {
        let mut url = self.repository_url()?;
        url.path_segments_mut()
            .map_err(|_| invalid_api_url(&self.config.api_url))?
            .push("releases");
        url.query_pairs_mut()
            .append_pair("per_page", &RELEASES_PER_PAGE.to_string());
        Ok(url)
    }

    fn repository_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_url)
            .map_err(|_| invalid_api_url(&self.config.api_url))?;
        url.path_segments_mut()
            .map_err(|_| invalid_api_url(&self.config.api_url))?
            .pop_if_empty()
            .push("repos")
            .extend(self.config.repository.split('/'));
        Ok(url)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        debug!(%url, "Fetching release metadata");
        let request = self.client.get(url).header(ACCEPT, config::ACCEPT);
        match &self.config.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }
}

impl ReleaseSource for GitHubReleases {
    fn release_by_tag(&self, tag: &str) -> Result<Release> {
        let response = self.get(self.release_url(tag)?).send()?;
        if let Some((status, status_text)) = failed_status(response.status()) {
            return Err(SetupError::ReleaseFetch {
                tag: tag.to_string(),
                status,
                status_text,
            });
        }
        Ok(response.json()?)
    }

    fn releases(&self) -> Result<Vec<Release>> {
        let response = self.get(self.releases_url()?).send()?;
        if let Some((status, status_text)) = failed_status(response.status()) {
            return Err(SetupError::ReleasesFetch { status, status_text });
        }
        Ok(response.json()?)
    }
}

/// Numeric code and reason phrase of a non-success status.
pub(crate) fn failed_status(status: StatusCode) -> Option<(u16, String)> {
    if status.is_success() {
        return None;
    }
    let reason = status.canonical_reason().unwrap_or_default();
    Some((status.as_u16(), reason.to_string()))
}

fn invalid_api_url(api_url: &str) -> SetupError {
    SetupError::InvalidApiUrl(api_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_url() {
        let releases = GitHubReleases::new(RegistryConfig::default()).unwrap();
        assert_eq!(
            releases.release_url("inspequte-v0.16.0").unwrap().as_str(),
            "https://api.github.com/repos/KengoTODA/inspequte/releases/tags/inspequte-v0.16.0"
        );
    }

    #[test]
    fn test_release_url_encodes_tag() {
        let releases = GitHubReleases::new(RegistryConfig::default()).unwrap();
        let url = releases.release_url("inspequte-v1.0.0/../x y").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/KengoTODA/inspequte/releases/tags/inspequte-v1.0.0%2F..%2Fx%20y"
        );
    }

    #[test]
    fn test_releases_url() {
        let releases = GitHubReleases::new(RegistryConfig::default()).unwrap();
        assert_eq!(
            releases.releases_url().unwrap().as_str(),
            "https://api.github.com/repos/KengoTODA/inspequte/releases?per_page=100"
        );
    }

    #[test]
    fn test_enterprise_api_root() {
        let config = RegistryConfig::new("https://ghe.example.com/api/v3/", None);
        let releases = GitHubReleases::new(config).unwrap();
        assert_eq!(
            releases.releases_url().unwrap().as_str(),
            "https://ghe.example.com/api/v3/repos/KengoTODA/inspequte/releases?per_page=100"
        );
    }

    #[test]
    fn test_failed_status() {
        assert_eq!(failed_status(StatusCode::OK), None);
        assert_eq!(
            failed_status(StatusCode::INTERNAL_SERVER_ERROR),
            Some((500, "Internal Server Error".to_string()))
        );
        assert_eq!(
            failed_status(StatusCode::NOT_FOUND),
            Some((404, "Not Found".to_string()))
        );
    }

    #[test]
    fn test_release_tolerates_partial_json() {
        let release: Release = serde_json::from_str(
            r#"{"tag_name": "inspequte-v0.13.0", "assets": [{"name": "a.tar.gz"}], "extra": 1}"#,
        )
        .unwrap();
        assert_eq!(release.tag_name.as_deref(), Some("inspequte-v0.13.0"));
        assert_eq!(release.draft, None);
        assert_eq!(release.assets[0].browser_download_url, None);

        let empty: Release = serde_json::from_str("{}").unwrap();
        assert!(empty.assets.is_empty());
    }

    #[test]
    fn test_release_with_null_assets() {
        let release: Release =
            serde_json::from_str(r#"{"tag_name": "inspequte-v1.0.0", "assets": null}"#).unwrap();
        assert_eq!(release.tag_name.as_deref(), Some("inspequte-v1.0.0"));
        assert!(release.assets.is_empty());

        let listing: Vec<Release> = serde_json::from_str(
            r#"[{"tag_name": "inspequte-v2.0.0", "assets": null}, {"tag_name": "inspequte-v1.0.0", "assets": []}]"#,
        )
        .unwrap();
        assert_eq!(listing.len(), 2);
    }
}
