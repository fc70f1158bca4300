use anyhow::{Context, bail};
use serde::{Deserialize, Deserializer};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const CONFIG_PATH_ENV: &str = "ARCHTHUMB_CONFIG_PATH";
pub const OUTPUT_DIR_ENV: &str = "ARCHTHUMB_OUTPUT_DIR";
pub const HTTP_TIMEOUT_ENV: &str = "ARCHTHUMB_HTTP_TIMEOUT";

/// Source that produced the extractor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    Explicit(PathBuf),
    EnvPath(PathBuf),
    File(PathBuf),
}

/// Settings for one extraction run. Every field has a default, so an absent
/// config file is fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Directory receiving `video-<id>.<ext>` files.
    pub output_dir: PathBuf,
    /// Directories searched by `find` when none are given on the command
    /// line, in priority order.
    pub lookup_dirs: Vec<PathBuf>,
    /// Per-request timeout for thumbnail downloads, e.g. `"30s"`.
    #[serde(deserialize_with = "deserialize_duration")]
    pub http_timeout: Duration,
    pub user_agent: String,
    /// Quality used when re-encoding downloaded thumbnails (1-100).
    pub jpeg_quality: u8,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("thumbnails"),
            lookup_dirs: Vec::new(),
            http_timeout: Duration::from_secs(30),
            user_agent: concat!("archthumb/", env!("CARGO_PKG_VERSION")).to_owned(),
            jpeg_quality: 90,
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

impl ExtractorConfig {
    /// Resolve configuration in this order:
    /// 1) `explicit` (the `--config` flag),
    /// 2) `$ARCHTHUMB_CONFIG_PATH`,
    /// 3) `archthumb.toml` or `config/archthumb.toml` in the working directory,
    /// 4) defaults.
    ///
    /// Environment overrides are applied on top and the result is validated.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<(Self, ConfigSource)> {
        let (mut config, source) = Self::locate(explicit)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok((config, source))
    }

    fn locate(explicit: Option<&Path>) -> anyhow::Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
        }

        if let Ok(path_str) = env::var(CONFIG_PATH_ENV)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read config from {}", path.display())
        })?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `ARCHTHUMB_*` overrides; `lookup` is `std::env::var` outside of
    /// tests.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(HTTP_TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            self.http_timeout = humantime::parse_duration(raw.trim())
                .with_context(|| format!("invalid {HTTP_TIMEOUT_ENV} value `{raw}`"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            bail!("jpeg_quality must be between 1 and 100, got {}", self.jpeg_quality);
        }
        if self.http_timeout.is_zero() {
            bail!("http_timeout must be greater than zero");
        }
        if self.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }
        Ok(())
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &["archthumb.toml", "config/archthumb.toml"];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}
