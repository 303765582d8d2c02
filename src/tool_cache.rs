use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use tracing::debug;
use walkdir::WalkDir;
use crate::config::USER_AGENT;

/// Download, unpack and store operations the installer relies on.
///
/// Implementations are treated as reliable black boxes; a failure simply
/// aborts the run with the error's message.
pub trait ToolCache {
    /// Path of a complete cached install for the key, if any.
    fn find(&self, tool: &str, version: &str, arch: &str) -> Option<PathBuf>;

    /// Downloads `url` to a local file and returns its path.
    fn download_tool(&self, url: &str) -> Result<PathBuf>;

    /// Unpacks a gzip-compressed tarball into a fresh directory.
    fn extract_tar(&self, archive: &Path) -> Result<PathBuf>;

    /// Unpacks a zip archive into a fresh directory.
    fn extract_zip(&self, archive: &Path) -> Result<PathBuf>;

    /// Stores the tree at `dir` under the key and returns the stored path.
    fn cache_dir(&self, dir: &Path, tool: &str, version: &str, arch: &str) -> Result<PathBuf>;
}

/// [`ToolCache`] laid out like the hosted runners' tool cache:
/// `<root>/<tool>/<version>/<arch>/` plus a `<arch>.complete` marker.
pub struct RunnerToolCache {
    root: PathBuf,
    temp: PathBuf,
    client: Client,
    token: Option<String>,
}

impl RunnerToolCache {
    /// Creates a cache rooted at `root` that unpacks into `temp`.
    pub fn new<P: Into<PathBuf>>(root: P, temp: P, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Could not create HTTP client")?;
        Ok(Self {
            root: root.into(),
            temp: temp.into(),
            client,
            token,
        })
    }

    /// Cache root used when the runner does not provide one.
    pub fn default_root() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "inspequte", "setup-inspequte")
            .ok_or_else(|| anyhow!("Could not get project directories"))?;
        Ok(dirs.cache_dir().join("tool-cache"))
    }

    fn tool_dir(&self, tool: &str, version: &str, arch: &str) -> PathBuf {
        self.root.join(tool).join(version).join(arch)
    }

    fn marker(&self, tool: &str, version: &str, arch: &str) -> PathBuf {
        self.root.join(tool).join(version).join(format!("{arch}.complete"))
    }

    fn scratch_dir(&self, prefix: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.temp)
            .with_context(|| format!("Could not create temp dir {:?}", self.temp))?;
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(&self.temp)
            .with_context(|| format!("Could not create directory in {:?}", self.temp))?;
        Ok(dir.keep())
    }
}

impl ToolCache for RunnerToolCache {
    fn find(&self, tool: &str, version: &str, arch: &str) -> Option<PathBuf> {
        if tool.is_empty() || version.is_empty() {
            return None;
        }
        let dir = self.tool_dir(tool, version, arch);
        let complete = dir.is_dir() && self.marker(tool, version, arch).is_file();
        debug!(path = %dir.display(), complete, "Tool cache lookup");
        complete.then_some(dir)
    }

    fn download_tool(&self, url: &str) -> Result<PathBuf> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let bytes = request
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .with_context(|| format!("Failed to download {url}"))?;

        let dir = self.scratch_dir("download-")?;
        let path = dir.join(archive_file_name(url));
        let mut file = File::create(&path)
            .with_context(|| format!("Could not create download file {:?}", path))?;
        file.write_all(&bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "Downloaded archive");
        Ok(path)
    }

    fn extract_tar(&self, archive: &Path) -> Result<PathBuf> {
        let dest = self.scratch_dir("extract-")?;
        let file = File::open(archive)
            .with_context(|| format!("Could not open archive {:?}", archive))?;
        tar::Archive::new(GzDecoder::new(file))
            .unpack(&dest)
            .with_context(|| format!("Failed to extract {:?}", archive))?;
        debug!(path = %dest.display(), "Extracted tarball");
        Ok(dest)
    }

    fn extract_zip(&self, archive: &Path) -> Result<PathBuf> {
        let dest = self.scratch_dir("extract-")?;
        let file = File::open(archive)
            .with_context(|| format!("Could not open archive {:?}", archive))?;
        zip::ZipArchive::new(file)
            .and_then(|mut zip| zip.extract(&dest))
            .with_context(|| format!("Failed to extract {:?}", archive))?;
        debug!(path = %dest.display(), "Extracted zip");
        Ok(dest)
    }

    fn cache_dir(&self, dir: &Path, tool: &str, version: &str, arch: &str) -> Result<PathBuf> {
        if !dir.is_dir() {
            return Err(anyhow!("Source directory {:?} does not exist", dir));
        }
        let dest = self.tool_dir(tool, version, arch);
        let marker = self.marker(tool, version, arch);
        if marker.exists() {
            std::fs::remove_file(&marker)?;
        }
        if dest.exists() {
            std::fs::remove_dir_all(&dest)
                .with_context(|| format!("Could not clear cache dir {:?}", dest))?;
        }
        std::fs::create_dir_all(&dest)
            .with_context(|| format!("Could not create cache dir {:?}", dest))?;

        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry?;
            let target = dest.join(entry.path().strip_prefix(dir)?);
            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)?;
            } else {
                std::fs::copy(entry.path(), &target)
                    .with_context(|| format!("Could not copy {:?}", entry.path()))?;
            }
        }

        File::create(&marker)
            .with_context(|| format!("Could not create marker {:?}", marker))?;
        debug!(path = %dest.display(), "Stored tool in cache");
        Ok(dest)
    }
}

/// Last path segment of `url`, ignoring any query or fragment.
fn archive_file_name(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "archive".to_string())
}
