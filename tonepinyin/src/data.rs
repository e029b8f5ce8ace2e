//! Built-in dictionary.
//!
//! Toned and untoned keys share one table. Word order is display order.

use std::sync::Arc;

use libime_core::Dictionary;
use once_cell::sync::Lazy;
use phf::phf_map;

static BUILTIN_ENTRIES: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "zhong1" => &["中", "忠", "终", "钟", "仲", "众", "肿", "冢", "踵", "螽", "种"],
    "guo2" => &["国", "果", "过", "锅", "郭", "裹", "帼"],
    "zhong1 guo2" => &["中国"],
    "ren2" => &["人", "仁", "忍"],
    "min2" => &["民", "敏", "闽"],
    "ren2 min2" => &["人民"],
    "zhong1 guo2 ren2" => &["中国人"],
    "ni3" => &["你", "拟", "尼", "泥"],
    "hao3" => &["好", "郝"],
    "ni3 hao3" => &["你好"],
    "wo3" => &["我"],
    "ai4" => &["爱", "碍", "艾"],
    "wo3 ai4 ni3" => &["我爱你"],
    "zhong" => &["中"],
    "guo" => &["国"],
    "zhong guo" => &["中国"],
    "ren" => &["人"],
    "min" => &["民"],
    "ren min" => &["人民"],
    "zhong guo ren" => &["中国人"],
    "ni" => &["你"],
    "hao" => &["好"],
    "ni hao" => &["你好"],
    "wo" => &["我"],
    "ai" => &["爱"],
    "wo ai ni" => &["我爱你"],
};

/// Process-wide built-in dictionary, built once on first use.
pub static DEFAULT_DICTIONARY: Lazy<Arc<Dictionary>> = Lazy::new(|| Arc::new(builtin_dictionary()));

/// Build a fresh copy of the built-in dictionary.
pub fn builtin_dictionary() -> Dictionary {
    Dictionary::from_entries(
        BUILTIN_ENTRIES
            .entries()
            .map(|(key, words)| (*key, words.iter().copied())),
    )
}
