use tracing::debug;
use crate::config::RELEASE_TAG_PREFIX;
use crate::error::{Result, SetupError};
use crate::registry::{Release, ReleaseAsset, ReleaseSource};
use crate::target::InstallTarget;
use crate::version::normalize_version_input;

/// A release tag together with the archive to download for this target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub tag: String,
    pub download_url: String,
}

/// Returns the first asset, in registry order, packaged for `target`.
///
/// An asset matches when its name ends in `-<triple>.<ext>` for the primary
/// triple or one of the aliases and it has a download URL.
pub fn find_release_asset<'a>(
    release: &'a Release,
    target: &InstallTarget,
) -> Option<&'a ReleaseAsset> {
    let extension = target.archive.extension();
    release.assets.iter().find(|asset| {
        let Some(name) = asset.name.as_deref() else {
            return false;
        };
        let matches_target = target
            .triples()
            .any(|triple| name.ends_with(&format!("-{triple}.{extension}")));
        matches_target && non_empty(asset.browser_download_url.as_deref()).is_some()
    })
}

/// Whether `release` belongs to the CLI rather than another artifact
/// published from the same repository.
pub fn is_cli_release(release: &Release) -> bool {
    let has_prefix = |value: Option<&str>| value.is_some_and(|v| v.starts_with(RELEASE_TAG_PREFIX));
    has_prefix(release.tag_name.as_deref()) || has_prefix(release.name.as_deref())
}

/// Resolves `version_input` to a concrete download for `target`.
///
/// A non-empty input pins the release by tag. An empty input walks the
/// listing newest first, skipping drafts, prereleases, untagged releases
/// and releases of other artifacts, and takes the first one that ships an
/// asset for `target`.
///
/// # Errors
///
/// Fetch errors from `source` are returned as is. A pinned release without
/// a matching asset yields [`SetupError::AssetNotFound`]; an exhausted
/// listing yields [`SetupError::NoStableRelease`].
pub fn resolve_release_asset<S: ReleaseSource + ?Sized>(
    source: &S,
    version_input: &str,
    target: &InstallTarget,
) -> Result<ResolvedAsset> {
    if !version_input.is_empty() {
        let tag = normalize_version_input(version_input);
        let release = source.release_by_tag(&tag)?;
        return resolved(&release, target).ok_or_else(|| SetupError::AssetNotFound {
            triple: target.triple.to_string(),
            tag,
        });
    }

    for release in source.releases()? {
        if !is_stable_cli_release(&release) {
            debug!(tag = ?release.tag_name, "Skipping release");
            continue;
        }
        match resolved(&release, target) {
            Some(asset) => return Ok(asset),
            None => debug!(tag = ?release.tag_name, triple = target.triple, "Release has no asset for target"),
        }
    }

    Err(SetupError::NoStableRelease {
        triple: target.triple.to_string(),
    })
}

fn is_stable_cli_release(release: &Release) -> bool {
    non_empty(release.tag_name.as_deref()).is_some()
        && !release.draft.unwrap_or(false)
        && !release.prerelease.unwrap_or(false)
        && is_cli_release(release)
}

fn resolved(release: &Release, target: &InstallTarget) -> Option<ResolvedAsset> {
    let tag = non_empty(release.tag_name.as_deref())?;
    let asset = find_release_asset(release, target)?;
    let download_url = non_empty(asset.browser_download_url.as_deref())?;
    Some(ResolvedAsset {
        tag: tag.to_string(),
        download_url: download_url.to_string(),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
