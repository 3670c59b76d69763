use crate::address::Syntax;
use crate::charset::{Charset, DEFAULT_ENCODING};
use crate::decoder::AddressParameter;
use crate::stage::{DecodeStage, PERCENT_BEFORE_BASE64};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// How a raw parameter is decoded: encoding plus ordered stage list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Character encoding for percent-decoded and Base64-decoded octets.
    pub encoding: String,
    /// Stages tried in order; the first one that yields a parseable address wins.
    pub stages: Vec<DecodeStage>,
    /// Treat `+` as an encoded space during percent-decoding (HTML form encoding).
    pub plus_as_space: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            stages: PERCENT_BEFORE_BASE64.to_vec(),
            plus_as_space: false,
        }
    }
}

impl DecodeConfig {
    pub fn with_stages(stages: impl Into<Vec<DecodeStage>>) -> Self {
        Self {
            stages: stages.into(),
            ..Self::default()
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Problems worth a warning. None of them is fatal: an unsupported
    /// encoding only fails the stages that need it, and an empty stage list
    /// rejects every present value.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if Charset::for_label(&self.encoding).is_none() {
            out.push(format!("unsupported encoding {:?}", self.encoding));
        }
        if self.stages.is_empty() {
            out.push("no decode stages configured".to_string());
        }
        out
    }
}

/// One declared parameter: syntax, required flag and decode rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallSiteConfig {
    pub syntax: Syntax,
    pub required: bool,
    pub decode: DecodeConfig,
}

impl Default for CallSiteConfig {
    fn default() -> Self {
        Self {
            syntax: Syntax::Url,
            required: true,
            decode: DecodeConfig::default(),
        }
    }
}

impl CallSiteConfig {
    /// Binds this declaration to a parameter name.
    pub fn parameter(&self, name: impl Into<String>) -> AddressParameter {
        AddressParameter {
            name: name.into(),
            required: self.required,
            syntax: self.syntax,
            config: self.decode.clone(),
        }
    }
}

/// Global configuration loaded from `~/.config/addrdec/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddrdecConfig {
    /// Used when no named site is selected (or the name is unknown).
    #[serde(default)]
    pub defaults: CallSiteConfig,
    /// Named call sites, e.g. `[sites.redirect]`.
    #[serde(default)]
    pub sites: BTreeMap<String, CallSiteConfig>,
}

impl AddrdecConfig {
    /// The named call site, falling back to `defaults`.
    pub fn call_site(&self, name: Option<&str>) -> &CallSiteConfig {
        match name {
            Some(name) => self.sites.get(name).unwrap_or_else(|| {
                tracing::warn!("unknown call site {:?}, using defaults", name);
                &self.defaults
            }),
            None => &self.defaults,
        }
    }

    /// Serializes the configuration as written to the config file.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn log_warnings(&self) {
        for warning in self.defaults.decode.warnings() {
            tracing::warn!("config [defaults]: {}", warning);
        }
        for (name, site) in &self.sites {
            for warning in site.decode.warnings() {
                tracing::warn!("config [sites.{}]: {}", name, warning);
            }
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("addrdec")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<AddrdecConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AddrdecConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    cfg.log_warnings();
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AddrdecConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AddrdecConfig::default();
        let toml = default_cfg.to_toml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}
