// core/src/engine.rs
//
// Generic conversion engine that works with any syllable parser.
// Pipeline: normalize -> segment -> pick first segmentation -> lookup -> page.

use std::sync::Arc;

use crate::{utils, Config, Dictionary, PageCursor, Segmentation};

/// Trait that syllable parsers must implement to work with the generic Engine.
pub trait SyllableParser {
    /// Every segmentation of `input`, in the parser's deterministic order.
    ///
    /// `input` is already normalized. Empty input yields one empty
    /// segmentation.
    fn segment_all(&self, input: &str) -> Vec<Segmentation>;

    /// The first segmentation `segment_all` would produce, if any.
    fn segment_first(&self, input: &str) -> Option<Segmentation> {
        self.segment_all(input).into_iter().next()
    }
}

/// Expected, non-fatal ways a conversion request can end without candidates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("input is empty")]
    EmptyInput,
    #[error("`{0}` cannot be split into known syllables")]
    NotRecognized(String),
    #[error("no candidates found for `{0}`")]
    NoCandidates(String),
}

/// Result of a successful conversion: the chosen segmentation and a fresh
/// cursor over its candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub segmentation: Segmentation,
    pub cursor: PageCursor,
}

/// Generic engine combining a parser with a shared read-only dictionary.
///
/// Holds no mutable state; every call is evaluated from scratch, so one
/// engine can serve concurrent callers. Each caller owns the `PageCursor` it
/// gets back.
#[derive(Debug, Clone)]
pub struct Engine<P> {
    dictionary: Arc<Dictionary>,
    parser: P,
    config: Config,
}

impl<P: SyllableParser> Engine<P> {
    pub fn new(dictionary: Arc<Dictionary>, parser: P, config: Config) -> Self {
        Self {
            dictionary,
            parser,
            config,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize `raw` and pick the first segmentation in parser order.
    pub fn convert(&self, raw: &str) -> Result<Segmentation, ConvertError> {
        let input = utils::normalize(raw);
        if input.is_empty() {
            return Err(ConvertError::EmptyInput);
        }

        match self.parser.segment_first(&input) {
            Some(seg) => {
                tracing::debug!(input = %input, segmentation = %seg, "converted");
                Ok(seg)
            }
            None => {
                tracing::debug!(input = %input, "not recognized");
                Err(ConvertError::NotRecognized(input))
            }
        }
    }

    /// Every segmentation of the normalized input, in parser order.
    pub fn segmentations(&self, raw: &str) -> Vec<Segmentation> {
        self.parser.segment_all(&utils::normalize(raw))
    }

    /// Candidates for `segmentation`; empty when the dictionary has no entry.
    pub fn candidates_for(&self, segmentation: &Segmentation) -> Vec<String> {
        self.dictionary.lookup(segmentation)
    }

    /// A fresh cursor on page 0 using the configured page size.
    pub fn start_paging(&self, candidates: Vec<String>) -> PageCursor {
        PageCursor::with_config(candidates, &self.config)
    }

    /// Full pipeline: convert, look up, and start paging.
    pub fn input(&self, raw: &str) -> Result<Conversion, ConvertError> {
        let segmentation = self.convert(raw)?;
        let candidates = self.candidates_for(&segmentation);
        if candidates.is_empty() {
            tracing::debug!(key = %segmentation.key(), "no candidates");
            return Err(ConvertError::NoCandidates(segmentation.key()));
        }
        let cursor = self.start_paging(candidates);
        Ok(Conversion {
            segmentation,
            cursor,
        })
    }
}
