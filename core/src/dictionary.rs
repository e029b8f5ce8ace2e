//! Syllable-key dictionary.
//!
//! Maps a space-joined syllable key (`"zhong1 guo2"`) to an ordered list of
//! candidate words. Single-syllable keys double as the token vocabulary that
//! parsers segment against.
//!
//! Entries live either in an in-memory map or in compiled artifacts:
//! - `*.fst`: key → payload index (`fst::Map`)
//! - `*.bincode`: `Vec<Vec<String>>` payloads indexed by the fst value

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use anyhow::Context;
use fst::{Map, MapBuilder, Streamer};

use crate::utils::normalize_key;
use crate::Segmentation;

/// Read-only lookup table from syllable keys to candidate words.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    // In-memory entries, preferred over artifacts on key collision
    map: AHashMap<String, Vec<String>>,
    // FST map for key -> payload index lookups
    fst_map: Option<Map<Vec<u8>>>,
    // Bincode-decoded payloads (index -> words)
    payloads: Option<Vec<Vec<String>>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `word` to the candidates of `key`.
    ///
    /// The key is normalized first; empty keys and empty words are dropped.
    pub fn insert<K: AsRef<str>, V: Into<String>>(&mut self, key: K, word: V) {
        let key = normalize_key(key.as_ref());
        let word = word.into();
        if key.is_empty() || word.is_empty() {
            tracing::warn!(key = %key, word = %word, "skipping empty dictionary entry");
            return;
        }
        self.map.entry(key).or_default().push(word);
    }

    /// Build a dictionary from `(key, words)` pairs, preserving word order.
    pub fn from_entries<I, K, W, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, W)>,
        K: AsRef<str>,
        W: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut dict = Dictionary::new();
        for (key, words) in entries {
            for word in words {
                dict.insert(key.as_ref(), word);
            }
        }
        dict
    }

    /// Parse a JSON object of `key -> [word, ...]`.
    ///
    /// Raw keys that normalize to the same key are merged in the sorted order
    /// of the raw keys.
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let raw: BTreeMap<String, Vec<String>> =
            serde_json::from_str(content).context("parse dictionary json")?;
        Ok(Self::from_entries(raw))
    }

    /// Read a JSON dictionary file (see [`Dictionary::from_json_str`]).
    pub fn load_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read dictionary {}", path.display()))?;
        let dict = Self::from_json_str(&content)
            .with_context(|| format!("load dictionary {}", path.display()))?;
        tracing::debug!(path = %path.display(), keys = dict.len(), "loaded json dictionary");
        Ok(dict)
    }

    /// Exact-match lookup of an already joined key.
    ///
    /// Returns an empty vector when the key is absent.
    pub fn lookup_key(&self, key: &str) -> Vec<String> {
        if let Some(words) = self.map.get(key) {
            return words.clone();
        }

        if let (Some(map), Some(payloads)) = (&self.fst_map, &self.payloads) {
            if let Some(idx) = map.get(key) {
                if let Some(words) = payloads.get(idx as usize) {
                    return words.clone();
                }
            }
        }

        Vec::new()
    }

    /// Resolve a segmentation by its space-joined key. No prefix or partial
    /// matching: `["zhong1", "guo2"]` only finds the `"zhong1 guo2"` entry.
    pub fn lookup(&self, segmentation: &Segmentation) -> Vec<String> {
        self.lookup_key(&segmentation.key())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
            || self
                .fst_map
                .as_ref()
                .is_some_and(|map| map.contains_key(key))
    }

    /// Keys made of exactly one token. This is the vocabulary parsers
    /// segment against.
    pub fn vocabulary(&self) -> AHashSet<String> {
        self.keys()
            .into_iter()
            .filter(|key| !key.contains(' '))
            .collect()
    }

    /// Every key, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.entries().into_keys().collect()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty() && self.fst_map.as_ref().map_or(true, |m| m.is_empty())
    }

    /// All entries merged from artifacts and memory, in key order.
    fn entries(&self) -> BTreeMap<String, Vec<String>> {
        let mut merged = BTreeMap::new();

        if let (Some(map), Some(payloads)) = (&self.fst_map, &self.payloads) {
            let mut stream = map.stream();
            while let Some((key, idx)) = stream.next() {
                let (Ok(key), Some(words)) = (std::str::from_utf8(key), payloads.get(idx as usize))
                else {
                    continue;
                };
                merged.insert(key.to_string(), words.clone());
            }
        }

        for (key, words) in &self.map {
            merged.insert(key.clone(), words.clone());
        }
        merged
    }

    /// Write the dictionary as fst + bincode artifacts.
    pub fn write_fst_bincode<P: AsRef<Path>>(&self, fst_path: P, bincode_path: P) -> anyhow::Result<()> {
        let fst_path = fst_path.as_ref();
        let bincode_path = bincode_path.as_ref();

        let entries = self.entries();
        let file = File::create(fst_path)
            .with_context(|| format!("create fst {}", fst_path.display()))?;
        let mut builder = MapBuilder::new(BufWriter::new(file)).context("start fst builder")?;
        let mut payloads: Vec<Vec<String>> = Vec::with_capacity(entries.len());
        for (idx, (key, words)) in entries.into_iter().enumerate() {
            builder
                .insert(&key, idx as u64)
                .with_context(|| format!("insert fst key {key:?}"))?;
            payloads.push(words);
        }
        builder.finish().context("finish fst")?;

        let bytes = bincode::serialize(&payloads).context("serialize payloads")?;
        std::fs::write(bincode_path, bytes)
            .with_context(|| format!("write bincode {}", bincode_path.display()))?;

        tracing::debug!(
            fst = %fst_path.display(),
            bincode = %bincode_path.display(),
            keys = payloads.len(),
            "wrote dictionary artifacts"
        );
        Ok(())
    }

    /// Load a dictionary from fst + bincode artifacts.
    ///
    /// - fst_path: file mapping keys to payload indices
    /// - bincode_path: file containing `Vec<Vec<String>>`
    pub fn load_from_fst_bincode<P: AsRef<Path>>(fst_path: P, bincode_path: P) -> anyhow::Result<Self> {
        let fst_path = fst_path.as_ref();
        let bincode_path = bincode_path.as_ref();

        let buf = std::fs::read(fst_path)
            .with_context(|| format!("read fst {}", fst_path.display()))?;
        let map = Map::new(buf).with_context(|| format!("decode fst {}", fst_path.display()))?;

        let buf = std::fs::read(bincode_path)
            .with_context(|| format!("read bincode {}", bincode_path.display()))?;
        let payloads: Vec<Vec<String>> = bincode::deserialize(&buf)
            .with_context(|| format!("decode bincode {}", bincode_path.display()))?;

        if map.len() != payloads.len() {
            tracing::warn!(
                fst_keys = map.len(),
                payloads = payloads.len(),
                "dictionary artifacts disagree on entry count"
            );
        }

        Ok(Self {
            map: AHashMap::new(),
            fst_map: Some(map),
            payloads: Some(payloads),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        Dictionary::from_entries([
            ("zhong1", vec!["中", "忠", "终"]),
            ("guo2", vec!["国", "果"]),
            ("zhong1 guo2", vec!["中国"]),
        ])
    }

    #[test]
    fn lookup_is_exact() {
        let dict = sample();
        assert_eq!(dict.lookup(&Segmentation::from(["zhong1"])), vec!["中", "忠", "终"]);
        assert_eq!(dict.lookup(&Segmentation::from(["zhong1", "guo2"])), vec!["中国"]);
        assert!(dict.lookup(&Segmentation::from(["guo2", "zhong1"])).is_empty());
        assert!(dict.lookup_key("zhong").is_empty());
    }

    #[test]
    fn insert_preserves_order_and_normalizes_key() {
        let mut dict = Dictionary::new();
        dict.insert("Ren2  Min2", "人民");
        dict.insert("ren2 min2", "仁民");
        dict.insert("", "空");
        dict.insert("ren2", "");
        assert_eq!(dict.lookup_key("ren2 min2"), vec!["人民", "仁民"]);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn vocabulary_keeps_single_tokens() {
        let vocab = sample().vocabulary();
        assert!(vocab.contains("zhong1"));
        assert!(vocab.contains("guo2"));
        assert!(!vocab.contains("zhong1 guo2"));
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn json_keys_are_normalized() {
        let dict = Dictionary::from_json_str(r#"{ "REN2   MIN2": ["人民"], "ren2": ["人", "仁"] }"#).unwrap();
        assert_eq!(dict.lookup_key("ren2 min2"), vec!["人民"]);
        assert_eq!(dict.lookup_key("ren2"), vec!["人", "仁"]);
        assert!(dict.contains_key("ren2"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Dictionary::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn artifacts_round_trip() {
        let dir = std::env::temp_dir();
        let fst_path = dir.join(format!("libime_dict_{}.fst", std::process::id()));
        let bin_path = dir.join(format!("libime_dict_{}.bincode", std::process::id()));

        sample().write_fst_bincode(&fst_path, &bin_path).unwrap();
        let loaded = Dictionary::load_from_fst_bincode(&fst_path, &bin_path).unwrap();

        assert_eq!(loaded.lookup_key("zhong1"), vec!["中", "忠", "终"]);
        assert_eq!(loaded.lookup_key("zhong1 guo2"), vec!["中国"]);
        assert!(loaded.lookup_key("ren2").is_empty());
        assert_eq!(loaded.keys(), sample().keys());
        assert!(loaded.vocabulary().contains("guo2"));
        assert_eq!(loaded.len(), 3);
        assert!(!loaded.is_empty());

        let _ = std::fs::remove_file(&fst_path);
        let _ = std::fs::remove_file(&bin_path);
    }

    #[test]
    fn missing_artifacts_report_path() {
        let err = Dictionary::load_from_fst_bincode("/nonexistent/a.fst", "/nonexistent/a.bincode")
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/a.fst"));
    }
}
