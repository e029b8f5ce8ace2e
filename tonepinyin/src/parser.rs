// tonepinyin/src/parser.rs
//
// Tonal pinyin segmentation.
// - Vocabulary stored in a TrieNode; only tokens shaped like `[a-z]+[1-4]?`
//   are admitted
// - Exhaustive depth-first backtracking, shortest token first
//
// Ordering: at each position candidate tokens are tried by increasing length,
// so results are ordered by first-token length, then recursively by the
// remaining tokens. `Engine::convert` keeps the first one.

use libime_core::{Dictionary, Segmentation, SyllableParser, TrieNode};
use once_cell::sync::Lazy;
use regex::Regex;

static SYLLABLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+[1-4]?$").expect("syllable pattern is a valid regex"));

/// True if `token` is lowercase letters with an optional trailing tone 1-4.
pub fn is_syllable_token(token: &str) -> bool {
    SYLLABLE_PATTERN.is_match(token)
}

/// Enumerate every segmentation of `input` over `vocabulary`.
///
/// Vocabulary entries that are not syllable tokens are ignored. See
/// [`Parser::segment_all`] for ordering and edge cases.
pub fn segment<I, S>(input: &str, vocabulary: I) -> Vec<Segmentation>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Parser::from_vocabulary(vocabulary).segment_all(input)
}

/// Segmenter over a fixed syllable vocabulary.
///
/// Public entrypoints:
/// - `Parser::insert_syllable` / `Parser::from_dictionary` to seed the vocabulary
/// - `Parser::segment_all` for every segmentation in search order
/// - `Parser::segment_first` for the first one only
#[derive(Debug, Default, Clone)]
pub struct Parser {
    trie: TrieNode,
}

impl Parser {
    /// Create a parser with an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser and insert a list of syllables.
    pub fn with_syllables<T: AsRef<str>>(syllables: &[T]) -> Self {
        Self::from_vocabulary(syllables)
    }

    pub fn from_vocabulary<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut p = Parser::new();
        for s in vocabulary {
            p.insert_syllable(s.as_ref());
        }
        p
    }

    /// Use the single-token keys of `dict` as vocabulary.
    pub fn from_dictionary(dict: &Dictionary) -> Self {
        let p = Self::from_vocabulary(dict.vocabulary());
        tracing::debug!(syllables = p.syllable_count(), "parser vocabulary ready");
        p
    }

    /// Insert a single syllable. Returns false when `syllable` does not look
    /// like a syllable token and was skipped.
    pub fn insert_syllable(&mut self, syllable: &str) -> bool {
        let key = syllable.trim().to_ascii_lowercase();
        if !is_syllable_token(&key) {
            tracing::warn!(token = %syllable, "skipping vocabulary entry that is not a syllable");
            return false;
        }
        self.trie.insert(&key);
        true
    }

    /// True if the vocabulary contains exactly `syllable`.
    pub fn contains_syllable(&self, syllable: &str) -> bool {
        self.trie.contains_word(syllable)
    }

    pub fn syllable_count(&self) -> usize {
        self.trie.len()
    }

    /// Every way to split `input` into vocabulary tokens.
    ///
    /// `input` must already be normalized. Concatenating the tokens of any
    /// result gives back `input`. Returns an empty vector when no full split
    /// exists, and a single empty segmentation for empty input.
    pub fn segment_all(&self, input: &str) -> Vec<Segmentation> {
        let chars: Vec<char> = input.chars().collect();
        let mut out = Vec::new();
        self.search(&chars, 0, &mut Vec::new(), &mut out, false);
        out
    }

    /// First result of [`Parser::segment_all`], without exploring the rest.
    pub fn segment_first(&self, input: &str) -> Option<Segmentation> {
        let chars: Vec<char> = input.chars().collect();
        let mut out = Vec::with_capacity(1);
        self.search(&chars, 0, &mut Vec::new(), &mut out, true);
        out.pop()
    }

    // Returns true once the search should stop.
    fn search<'a>(
        &'a self,
        chars: &[char],
        start: usize,
        path: &mut Vec<&'a str>,
        out: &mut Vec<Segmentation>,
        first_only: bool,
    ) -> bool {
        if start == chars.len() {
            out.push(Segmentation::new(path.iter().map(|t| t.to_string()).collect()));
            return first_only;
        }

        for (end, token) in self.trie.walk_prefixes(chars, start) {
            path.push(token);
            let stop = self.search(chars, end, path, out, first_only);
            path.pop();
            if stop {
                return true;
            }
        }
        false
    }
}

impl SyllableParser for Parser {
    fn segment_all(&self, input: &str) -> Vec<Segmentation> {
        Parser::segment_all(self, input)
    }

    fn segment_first(&self, input: &str) -> Option<Segmentation> {
        Parser::segment_first(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(segs: &[Segmentation]) -> Vec<Vec<&str>> {
        segs.iter()
            .map(|s| s.tokens().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn syllable_pattern() {
        assert!(is_syllable_token("zhong1"));
        assert!(is_syllable_token("guo"));
        assert!(is_syllable_token("a4"));
        assert!(!is_syllable_token("zhong5"));
        assert!(!is_syllable_token("zhong12"));
        assert!(!is_syllable_token("1"));
        assert!(!is_syllable_token("Zhong"));
        assert!(!is_syllable_token("zhong guo"));
        assert!(!is_syllable_token(""));
    }

    #[test]
    fn non_syllable_vocabulary_entries_are_rejected() {
        let mut parser = Parser::new();
        assert!(parser.insert_syllable(" Ren2 "));
        assert!(!parser.insert_syllable("ren2 min2"));
        assert!(!parser.insert_syllable("x9"));
        assert!(parser.contains_syllable("ren2"));
        assert_eq!(parser.syllable_count(), 1);
    }

    #[test]
    fn shortest_first_token_comes_first() {
        let parser = Parser::with_syllables(&["xi", "an", "xian"]);
        let segs = parser.segment_all("xian");
        assert_eq!(texts(&segs), vec![vec!["xi", "an"], vec!["xian"]]);
        assert_eq!(parser.segment_first("xian"), segs.first().cloned());
    }

    #[test]
    fn ordering_is_recursive() {
        let parser = Parser::with_syllables(&["a", "aa", "aaa"]);
        let segs = parser.segment_all("aaa");
        assert_eq!(
            texts(&segs),
            vec![
                vec!["a", "a", "a"],
                vec!["a", "aa"],
                vec!["aa", "a"],
                vec!["aaa"],
            ]
        );
    }

    #[test]
    fn empty_input_yields_one_empty_segmentation() {
        let parser = Parser::with_syllables(&["ren"]);
        let segs = parser.segment_all("");
        assert_eq!(segs.len(), 1);
        assert!(segs[0].is_empty());
        assert_eq!(parser.segment_first(""), Some(Segmentation::default()));
    }

    #[test]
    fn dead_end_yields_nothing() {
        let parser = Parser::with_syllables(&["ren", "min"]);
        assert!(parser.segment_all("renmi").is_empty());
        assert_eq!(parser.segment_first("renmi"), None);
    }

    #[test]
    fn free_function_matches_parser() {
        let vocab = ["zhong1", "guo2"];
        assert_eq!(
            segment("zhong1guo2", vocab),
            vec![Segmentation::from(["zhong1", "guo2"])]
        );
    }

    #[test]
    fn dictionary_vocabulary_excludes_phrases() {
        let dict = Dictionary::from_entries([
            ("ren", vec!["人"]),
            ("min", vec!["民"]),
            ("ren min", vec!["人民"]),
        ]);
        let parser = Parser::from_dictionary(&dict);
        assert_eq!(parser.syllable_count(), 2);
        assert!(!parser.contains_syllable("ren min"));
    }
}
