//! Pinyin-specific configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `libime_core::Config` (flattened via serde)
//! - Where to load the dictionary from, if not the built-in table
//!
//! # Example
//!
//! ```rust
//! use tonepinyin::PinyinConfig;
//!
//! let config = PinyinConfig::from_toml_str("page_size = 5\ndictionary_path = \"dict.json\"").unwrap();
//! assert_eq!(config.base.page_size, 5);
//! assert!(config.data_dir.is_none());
//! ```
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PinyinConfig {
    /// Base configuration fields (page size, selection keys)
    #[serde(flatten)]
    pub base: libime_core::Config,

    /// JSON dictionary file (`{"zhong1 guo2": ["中国"], ...}`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_path: Option<PathBuf>,

    /// Directory holding compiled `dictionary.fst` + `dictionary.bincode`.
    /// Takes precedence over `dictionary_path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl PinyinConfig {
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
