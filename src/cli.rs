use std::path::PathBuf;
use clap::{ArgAction, Parser};
use setup_inspequte::DEFAULT_API_URL;

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    /// Version to install (`1.2.3`, `v1.2.3` or `inspequte-v1.2.3`). Empty installs the latest stable release
    #[clap(long, env = "INPUT_VERSION", default_value = "")]
    pub tool_version: String,

    /// Runner platform (`linux`, `darwin`, `win32`). Defaults to the host
    #[clap(long)]
    pub platform: Option<String>,

    /// Runner architecture (`x64`, `arm64`). Defaults to the host
    #[clap(long)]
    pub arch: Option<String>,

    /// Base URL of the release registry API
    #[clap(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Token used to authenticate registry requests and downloads
    #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Root of the tool cache
    #[clap(long, env = "RUNNER_TOOL_CACHE")]
    pub tool_cache: Option<PathBuf>,

    /// Scratch directory for downloads and extraction
    #[clap(long, env = "RUNNER_TEMP")]
    pub temp_dir: Option<PathBuf>,

    /// File receiving step outputs
    #[clap(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,

    /// File receiving PATH additions
    #[clap(long, env = "GITHUB_PATH")]
    pub github_path: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
