//! libime-core
//!
//! Core dictionary, segmentation types, candidate paging and configuration
//! shared by phonetic input crates (tonepinyin).
//!
//! Public API:
//! - `Dictionary` - syllable key → ordered candidate words
//! - `Segmentation` - one partition of an input into syllable tokens
//! - `PageCursor` - fixed-size paging over a candidate set
//! - `Engine` - generic convert / lookup / paging pipeline over a `SyllableParser`
//! - `TrieNode` - vocabulary trie used by parsers
//! - `Config` - paging and selection settings
use serde::{Deserialize, Serialize};

pub mod trie;
pub use trie::TrieNode;

pub mod segmentation;
pub use segmentation::Segmentation;

pub mod dictionary;
pub use dictionary::Dictionary;

pub mod paging;
pub use paging::{Page, PageCursor};

pub mod engine;
pub use engine::{Conversion, ConvertError, Engine, SyllableParser};

/// Number of candidates shown per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Generic configuration for conversion and candidate display.
///
/// Language crates embed this (see `PinyinConfig` in tonepinyin) and add their
/// own fields next to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Candidates per page. Zero is treated as one.
    pub page_size: usize,

    /// Keys for selecting candidates on the current page (default: "123456789").
    /// First char selects the 1st candidate on the page, etc.
    pub select_keys: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            select_keys: "123456789".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        use anyhow::Context;

        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).with_context(|| format!("write config {}", path.display()))
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Page size with the zero case folded to one.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Set the selection keys string. Empty strings are ignored.
    ///
    /// # Example
    /// ```
    /// # use libime_core::Config;
    /// let mut config = Config::default();
    /// config.set_select_keys("asdfghjkl"); // Use home row keys
    /// assert_eq!(config.selection_key_index('d'), Some(2));
    /// ```
    pub fn set_select_keys(&mut self, keys: &str) {
        if !keys.is_empty() {
            self.select_keys = keys.to_string();
        }
    }

    /// Get the current selection keys.
    pub fn select_keys(&self) -> &str {
        &self.select_keys
    }

    /// Check if a character is a selection key and return its index (0-based).
    /// Returns None if the character is not a selection key.
    pub fn selection_key_index(&self, ch: char) -> Option<usize> {
        self.select_keys.chars().position(|c| c == ch)
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize raw user input for segmentation.
    ///
    /// Applies NFC, folds full-width ASCII to half-width, trims surrounding
    /// whitespace and lowercases ASCII letters.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        let composed: String = s.nfc().collect();
        to_halfwidth(&composed).trim().to_ascii_lowercase()
    }

    /// Normalize a dictionary key: lowercase, with every whitespace run
    /// collapsed to a single space.
    pub fn normalize_key(key: &str) -> String {
        key.split_whitespace()
            .map(|t| t.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Convert full-width characters back to ASCII (half-width).
    ///
    /// - Ideographic space (　) → ASCII space
    /// - Full-width range (！-～) → ASCII (0x21-0x7E)
    ///
    /// Everything else passes through unchanged.
    pub fn to_halfwidth(s: &str) -> String {
        s.chars()
            .map(|ch| match ch {
                '\u{3000}' => ' ',
                '\u{FF01}'..='\u{FF5E}' => {
                    let code = ch as u32;
                    char::from_u32(code - 0xFF01 + 0x21).unwrap_or(ch)
                }
                _ => ch,
            })
            .collect()
    }
}
