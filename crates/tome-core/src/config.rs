//! Project layout and the optional `tome.toml`.
//!
//! Resolution order for the project root:
//! 1. explicit path (the CLI `--root` flag)
//! 2. `TOME_PROJECT_ROOT` environment variable
//! 3. the current directory

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use tome_model::Domain;

use crate::error::{PipelineError, Result};
use crate::pipeline::Slice;

/// Environment variable for overriding the project root.
pub const ROOT_ENV_VAR: &str = "TOME_PROJECT_ROOT";

/// Config file name, looked up at the project root.
pub const CONFIG_FILE: &str = "tome.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub baseline_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            reports_dir: PathBuf::from("reports"),
            baseline_dir: PathBuf::from("data/_baseline"),
        }
    }
}

/// Per-domain file name overrides. Relative paths resolve against `data_dir`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomainOverrides {
    pub base: Option<PathBuf>,
    pub custom: Option<PathBuf>,
    pub base_normalized: Option<PathBuf>,
    pub custom_normalized: Option<PathBuf>,
    pub merged: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    paths: PathsConfig,
    domains: BTreeMap<String, DomainOverrides>,
}

/// Every file the pipeline touches for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPaths {
    pub domain: Domain,
    /// Raw base (SRD) dataset.
    pub base: PathBuf,
    /// Raw custom dataset.
    pub custom: PathBuf,
    pub base_normalized: PathBuf,
    pub custom_normalized: PathBuf,
    /// Aggregated base + custom artifact.
    pub merged: PathBuf,
}

impl DomainPaths {
    pub fn raw(&self, slice: Slice) -> &Path {
        match slice {
            Slice::Base => &self.base,
            Slice::Custom => &self.custom,
        }
    }

    pub fn normalized(&self, slice: Slice) -> &Path {
        match slice {
            Slice::Base => &self.base_normalized,
            Slice::Custom => &self.custom_normalized,
        }
    }
}

/// Resolved project configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub root: PathBuf,
    pub paths: PathsConfig,
    pub domains: BTreeMap<Domain, DomainOverrides>,
}

impl ProjectConfig {
    /// Defaults rooted at `root`, ignoring any config file.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            paths: PathsConfig::default(),
            domains: BTreeMap::new(),
        }
    }

    /// Pick the project root from an explicit path, the environment, or the cwd.
    pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
        if let Some(root) = explicit {
            return root.to_path_buf();
        }
        if let Ok(root) = std::env::var(ROOT_ENV_VAR)
            && !root.trim().is_empty()
        {
            return PathBuf::from(root);
        }
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Load `tome.toml` from `root`; a missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            debug!(root = %root.display(), "no config file, using defaults");
            return Ok(Self::with_root(root));
        }
        let text = fs::read_to_string(&path).map_err(|source| PipelineError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        Self::parse(root, &text).map_err(|message| PipelineError::ConfigInvalid { path, message })
    }

    fn parse(root: &Path, text: &str) -> std::result::Result<Self, String> {
        let file: ConfigFile = toml::from_str(text).map_err(|err| format!("{err}"))?;
        let mut domains = BTreeMap::new();
        for (name, overrides) in file.domains {
            let domain: Domain = name.parse().map_err(|err| format!("[domains.{name}]: {err}"))?;
            domains.insert(domain, overrides);
        }
        Ok(Self {
            root: root.to_path_buf(),
            paths: file.paths,
            domains,
        })
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(&self.paths.data_dir)
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join(&self.paths.reports_dir)
    }

    pub fn baseline_dir(&self) -> PathBuf {
        self.root.join(&self.paths.baseline_dir)
    }

    pub fn domain_paths(&self, domain: Domain) -> DomainPaths {
        let data = self.data_dir();
        let name = domain.as_str();
        let overrides = self.domains.get(&domain).cloned().unwrap_or_default();
        let pick = |custom: Option<PathBuf>, default: String| {
            data.join(custom.unwrap_or_else(|| PathBuf::from(default)))
        };
        DomainPaths {
            domain,
            base: pick(overrides.base, format!("{name}-SRD.js")),
            custom: pick(overrides.custom, format!("{name}-custom.js")),
            base_normalized: pick(
                overrides.base_normalized,
                format!("{name}-SRD.normalized.json"),
            ),
            custom_normalized: pick(
                overrides.custom_normalized,
                format!("{name}-custom.normalized.json"),
            ),
            merged: pick(overrides.merged, format!("{name}.normalized.json")),
        }
    }
}
