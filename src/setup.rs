use std::path::PathBuf;
use tracing::info;
use crate::config::TOOL_NAME;
use crate::error::{Result, SetupError};
use crate::registry::ReleaseSource;
use crate::resolve::resolve_release_asset;
use crate::runner::Runner;
use crate::target::{resolve_install_target, ArchiveKind, Host};
use crate::tool_cache::ToolCache;
use crate::version::to_cache_version;

/// A finished install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    /// Release tag that was installed, e.g. `inspequte-v0.16.0`.
    pub tag: String,
    /// Directory to put on `PATH`.
    pub tool_path: PathBuf,
    /// Whether the tool was already in the cache.
    pub cached: bool,
}

/// Resolves the release for `version_input` and makes sure it is in the
/// tool cache, downloading it only on a cache miss.
///
/// # Errors
///
/// Returns the first error raised by target resolution, release lookup or
/// the tool cache. Nothing is retried.
pub fn install<S, C>(
    host: &Host,
    version_input: &str,
    source: &S,
    cache: &C,
) -> Result<Installed>
where
    S: ReleaseSource + ?Sized,
    C: ToolCache + ?Sized,
{
    let target = resolve_install_target(&host.platform, &host.arch)?;
    let resolved = resolve_release_asset(source, version_input, &target)?;
    let cache_version = to_cache_version(&resolved.tag);

    info!("Setting up {TOOL_NAME} {} for {}", resolved.tag, target.triple);

    if let Some(cached_path) = cache.find(TOOL_NAME, &cache_version, &host.arch) {
        info!("Using cached {TOOL_NAME} at {}", cached_path.display());
        return Ok(Installed {
            tag: resolved.tag,
            tool_path: cached_path,
            cached: true,
        });
    }

    info!("Downloading {TOOL_NAME} from {}", resolved.download_url);
    let archive = cache.download_tool(&resolved.download_url)?;
    let extracted = match target.archive {
        ArchiveKind::TarGz => cache.extract_tar(&archive)?,
        ArchiveKind::Zip => cache.extract_zip(&archive)?,
    };
    let tool_path = cache.cache_dir(&extracted, TOOL_NAME, &cache_version, &host.arch)?;

    Ok(Installed {
        tag: resolved.tag,
        tool_path,
        cached: false,
    })
}

/// Runs the installer as a runner step.
///
/// Reads the `version` input, and on success adds the install to `PATH` and
/// sets the `version` output. Any error is reported once through
/// [`Runner::set_failed`]; this function itself never fails.
pub fn run<R, S, C>(runner: &mut R, host: &Host, source: &S, cache: &C) -> Option<Installed>
where
    R: Runner + ?Sized,
    S: ReleaseSource + ?Sized,
    C: ToolCache + ?Sized,
{
    let outcome = install(host, &runner.input("version"), source, cache)
        .and_then(|installed| publish(runner, installed));
    match outcome {
        Ok(installed) => Some(installed),
        Err(err) => {
            runner.set_failed(&err.to_string());
            None
        }
    }
}

fn publish<R: Runner + ?Sized>(runner: &mut R, installed: Installed) -> Result<Installed> {
    runner
        .publish(&installed.tool_path, &installed.tag)
        .map_err(|e| SetupError::runner("outputs", e))?;
    Ok(installed)
}
