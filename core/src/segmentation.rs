//! A single partition of normalized input into syllable tokens.

use std::fmt;

/// Ordered syllable tokens whose concatenation reproduces the input they were
/// cut from.
///
/// The dictionary key for a segmentation is its tokens joined by a single
/// space (see [`Segmentation::key`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Segmentation {
    tokens: Vec<String>,
}

impl Segmentation {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// An empty segmentation only arises from empty input.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Dictionary lookup key: tokens joined by one space.
    pub fn key(&self) -> String {
        self.tokens.join(" ")
    }

    /// Tokens joined without separator; equals the segmented input.
    pub fn concat(&self) -> String {
        self.tokens.concat()
    }
}

impl From<Vec<String>> for Segmentation {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl From<&[&str]> for Segmentation {
    fn from(tokens: &[&str]) -> Self {
        Self::new(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Segmentation {
    fn from(tokens: [&str; N]) -> Self {
        Self::new(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl fmt::Display for Segmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join("'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_and_concat() {
        let seg = Segmentation::from(["zhong1", "guo2"]);
        assert_eq!(seg.key(), "zhong1 guo2");
        assert_eq!(seg.concat(), "zhong1guo2");
        assert_eq!(seg.len(), 2);
        assert_eq!(seg.to_string(), "zhong1'guo2");
    }

    #[test]
    fn empty_segmentation() {
        let seg = Segmentation::default();
        assert!(seg.is_empty());
        assert_eq!(seg.key(), "");
        assert_eq!(seg.concat(), "");
    }
}
