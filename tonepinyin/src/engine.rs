//! Pinyin conversion engine
//!
//! Thin wrapper around the generic `libime_core::Engine<Parser>` that knows
//! where pinyin dictionaries come from.

use std::path::Path;
use std::sync::Arc;

use libime_core::{Config, Conversion, ConvertError, Dictionary, PageCursor, Segmentation};

use crate::config::PinyinConfig;
use crate::data::DEFAULT_DICTIONARY;
use crate::parser::Parser;

/// File name of the compiled key index inside a data directory.
pub const DICTIONARY_FST: &str = "dictionary.fst";
/// File name of the compiled payloads inside a data directory.
pub const DICTIONARY_BINCODE: &str = "dictionary.bincode";

/// Public engine for tonepinyin.
///
/// The parser vocabulary is taken from the dictionary's single-syllable keys.
/// Cloning is cheap; clones share the same inner engine.
#[derive(Debug, Clone)]
pub struct Engine {
    inner: Arc<libime_core::Engine<Parser>>,
}

impl Engine {
    pub fn new(dictionary: Arc<Dictionary>, config: Config) -> Self {
        let parser = Parser::from_dictionary(&dictionary);
        Self {
            inner: Arc::new(libime_core::Engine::new(dictionary, parser, config)),
        }
    }

    /// Engine over the built-in table with default configuration.
    pub fn with_default_dictionary() -> Self {
        Self::new(Arc::clone(&*DEFAULT_DICTIONARY), Config::default())
    }

    /// Load a JSON dictionary file.
    pub fn from_json<P: AsRef<Path>>(path: P, config: Config) -> anyhow::Result<Self> {
        let dict = Dictionary::load_json(path)?;
        Ok(Self::new(Arc::new(dict), config))
    }

    /// Load compiled artifacts from a data directory.
    ///
    /// Expected layout (data-dir):
    ///  - dictionary.fst       (key index)
    ///  - dictionary.bincode   (candidate payloads)
    pub fn from_data_dir<P: AsRef<Path>>(data_dir: P, config: Config) -> anyhow::Result<Self> {
        let data_dir = data_dir.as_ref();
        let dict = Dictionary::load_from_fst_bincode(
            data_dir.join(DICTIONARY_FST),
            data_dir.join(DICTIONARY_BINCODE),
        )?;
        tracing::debug!(data_dir = %data_dir.display(), "loaded compiled dictionary");
        Ok(Self::new(Arc::new(dict), config))
    }

    /// Pick the dictionary source from `config`: data dir, then JSON file,
    /// then the built-in table.
    pub fn from_config(config: &PinyinConfig) -> anyhow::Result<Self> {
        let base = config.base.clone();
        if let Some(dir) = &config.data_dir {
            return Self::from_data_dir(dir, base);
        }
        if let Some(path) = &config.dictionary_path {
            return Self::from_json(path, base);
        }
        Ok(Self::new(Arc::clone(&*DEFAULT_DICTIONARY), base))
    }

    pub fn dictionary(&self) -> &Dictionary {
        self.inner.dictionary()
    }

    pub fn parser(&self) -> &Parser {
        self.inner.parser()
    }

    pub fn config(&self) -> &Config {
        self.inner.config()
    }

    /// Normalize raw text and select the first segmentation.
    pub fn convert(&self, raw: &str) -> Result<Segmentation, ConvertError> {
        self.inner.convert(raw)
    }

    /// Every segmentation of the normalized input, in search order.
    pub fn segmentations(&self, raw: &str) -> Vec<Segmentation> {
        self.inner.segmentations(raw)
    }

    pub fn candidates_for(&self, segmentation: &Segmentation) -> Vec<String> {
        self.inner.candidates_for(segmentation)
    }

    pub fn start_paging(&self, candidates: Vec<String>) -> PageCursor {
        self.inner.start_paging(candidates)
    }

    /// Main input API: convert, look up and return a fresh page cursor.
    ///
    /// # Example
    /// ```
    /// # use tonepinyin::Engine;
    /// let engine = Engine::with_default_dictionary();
    /// let conv = engine.input("zhong1guo2").unwrap();
    /// assert_eq!(conv.cursor.current_page().words, &["中国".to_string()]);
    /// ```
    pub fn input(&self, raw: &str) -> Result<Conversion, ConvertError> {
        self.inner.input(raw)
    }
}
