//! tonepinyin crate root
//!
//! Tonal pinyin input conversion: the syllable `Parser` (exhaustive
//! segmentation over a dictionary-defined vocabulary), the built-in
//! dictionary, and a high-level `Engine` composing them with the shared
//! `libime-core` types.
//!
//! ```
//! use tonepinyin::{ConvertError, Engine};
//!
//! let engine = Engine::with_default_dictionary();
//! let seg = engine.convert("renmin").unwrap();
//! assert_eq!(engine.candidates_for(&seg), vec!["人民".to_string()]);
//! assert!(matches!(engine.convert("abc123"), Err(ConvertError::NotRecognized(_))));
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod parser;

pub use libime_core::{
    Config, Conversion, ConvertError, Dictionary, Page, PageCursor, Segmentation,
};

pub use config::PinyinConfig;
pub use data::{builtin_dictionary, DEFAULT_DICTIONARY};
pub use engine::{Engine, DICTIONARY_BINCODE, DICTIONARY_FST};
pub use parser::{is_syllable_token, segment, Parser};
