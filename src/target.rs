use crate::error::{Result, SetupError};

/// Archive format a release asset is packed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    TarGz,
    Zip,
}

impl ArchiveKind {
    /// File extension used in asset names, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveKind::TarGz => "tar.gz",
            ArchiveKind::Zip => "zip",
        }
    }
}

/// What to look for in a release for the current runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    /// Canonical target triple, e.g. `x86_64-unknown-linux-gnu`.
    pub triple: &'static str,
    /// Same target under other architecture spellings (`amd64` vs `x86_64`).
    pub aliases: &'static [&'static str],
    pub archive: ArchiveKind,
}

impl InstallTarget {
    /// Primary triple first, then aliases in order.
    pub fn triples(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.triple).chain(self.aliases.iter().copied())
    }
}

/// Maps a runner platform/arch pair (`linux`/`darwin`/`win32`, `x64`/`arm64`)
/// to the release target it installs.
///
/// # Errors
///
/// Returns [`SetupError::UnsupportedPlatform`] for any pair without a
/// published build.
pub fn resolve_install_target(platform: &str, arch: &str) -> Result<InstallTarget> {
    let target = match (platform, arch) {
        ("linux", "x64") => InstallTarget {
            triple: "x86_64-unknown-linux-gnu",
            aliases: &["amd64-unknown-linux-gnu"],
            archive: ArchiveKind::TarGz,
        },
        ("linux", "arm64") => InstallTarget {
            triple: "aarch64-unknown-linux-gnu",
            aliases: &["arm64-unknown-linux-gnu"],
            archive: ArchiveKind::TarGz,
        },
        ("darwin", "arm64") => InstallTarget {
            triple: "aarch64-apple-darwin",
            aliases: &["arm64-apple-darwin"],
            archive: ArchiveKind::TarGz,
        },
        ("darwin", "x64") => InstallTarget {
            triple: "x86_64-apple-darwin",
            aliases: &["amd64-apple-darwin"],
            archive: ArchiveKind::TarGz,
        },
        ("win32", "x64") => InstallTarget {
            triple: "x86_64-pc-windows-msvc",
            aliases: &["amd64-pc-windows-msvc"],
            archive: ArchiveKind::Zip,
        },
        _ => {
            return Err(SetupError::UnsupportedPlatform {
                platform: platform.to_string(),
                arch: arch.to_string(),
            });
        }
    };
    Ok(target)
}

/// Platform and architecture of the machine, in runner naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub platform: String,
    pub arch: String,
}

impl Host {
    pub fn new(platform: &str, arch: &str) -> Self {
        Self {
            platform: platform.to_string(),
            arch: arch.to_string(),
        }
    }

    /// Describes the machine this binary runs on.
    ///
    /// Values without a runner spelling are kept as Rust reports them, so an
    /// unsupported host still shows up by name in the error.
    pub fn current() -> Self {
        let platform = match std::env::consts::OS {
            "macos" => "darwin",
            "windows" => "win32",
            other => other,
        };
        let arch = match std::env::consts::ARCH {
            "x86_64" => "x64",
            "aarch64" => "arm64",
            "x86" => "ia32",
            other => other,
        };
        Self::new(platform, arch)
    }
}
