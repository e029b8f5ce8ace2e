/// Prefix trie over syllable tokens.
use std::collections::HashMap;

/// A character trie holding the token vocabulary of a parser.
///
/// `walk_prefixes` reports every vocabulary token that starts at a given
/// position, shortest first. Parsers rely on that order for deterministic
/// segmentation.
///
/// # Example
/// ```
/// use libime_core::trie::TrieNode;
///
/// let trie: TrieNode = ["ren", "ren2", "min"].into_iter().collect();
///
/// assert!(trie.contains_word("ren2"));
/// assert!(!trie.contains_word("re"));
///
/// let input: Vec<char> = "ren2min".chars().collect();
/// let ends: Vec<usize> = trie.walk_prefixes(&input, 0).into_iter().map(|(end, _)| end).collect();
/// assert_eq!(ends, vec![3, 4]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// Set when a vocabulary token ends at this node.
    word: Option<String>,
}

impl TrieNode {
    /// Create a new empty trie root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token. Inserting the same token twice is a no-op.
    pub fn insert(&mut self, token: &str) {
        let mut node = self;
        for ch in token.chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.word.is_none() {
            node.word = Some(token.to_string());
        }
    }

    /// True only if `word` was inserted as a complete token, not just a prefix.
    pub fn contains_word(&self, word: &str) -> bool {
        let mut node = self;
        for ch in word.chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.word.is_some()
    }

    /// Number of tokens stored below (and including) this node.
    pub fn len(&self) -> usize {
        usize::from(self.word.is_some()) + self.children.values().map(TrieNode::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_none() && self.children.is_empty()
    }

    /// Walk the trie from `start` in `input` and return every token found.
    ///
    /// Each item is `(end, token)` where `end` is the exclusive character index
    /// after the match. Results come out in increasing `end` order.
    pub fn walk_prefixes<'a>(&'a self, input: &[char], start: usize) -> Vec<(usize, &'a str)> {
        let mut res = Vec::new();
        let mut node = self;
        for (offset, ch) in input.iter().enumerate().skip(start) {
            match node.children.get(ch) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(word) = &node.word {
                res.push((offset + 1, word.as_str()));
            }
        }
        res
    }
}

impl<S: AsRef<str>> FromIterator<S> for TrieNode {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = TrieNode::new();
        for token in iter {
            trie.insert(token.as_ref());
        }
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let trie: TrieNode = ["zhong", "zhong1", "guo2"].into_iter().collect();

        assert!(trie.contains_word("zhong"));
        assert!(trie.contains_word("zhong1"));
        assert!(trie.contains_word("guo2"));
        assert!(!trie.contains_word("zh"));
        assert!(!trie.contains_word("guo"));
        assert!(!trie.contains_word("zhong12"));
    }

    #[test]
    fn len_counts_distinct_tokens() {
        let mut trie = TrieNode::new();
        assert!(trie.is_empty());
        trie.insert("ren");
        trie.insert("ren");
        trie.insert("ren2");
        assert_eq!(trie.len(), 2);
        assert!(!trie.is_empty());
    }

    #[test]
    fn walk_prefixes_shortest_first() {
        let trie: TrieNode = ["zhong1", "z", "zhong", "zh"].into_iter().collect();
        let input: Vec<char> = "zhong1guo2".chars().collect();

        let prefixes = trie.walk_prefixes(&input, 0);
        assert_eq!(prefixes, vec![(1, "z"), (2, "zh"), (5, "zhong"), (6, "zhong1")]);
    }

    #[test]
    fn walk_prefixes_from_offset() {
        let trie: TrieNode = ["ren", "min"].into_iter().collect();
        let input: Vec<char> = "renmin".chars().collect();

        assert_eq!(trie.walk_prefixes(&input, 3), vec![(6, "min")]);
        assert!(trie.walk_prefixes(&input, 1).is_empty());
        assert!(trie.walk_prefixes(&input, 6).is_empty());
    }

    #[test]
    fn walk_prefixes_handles_multibyte_chars() {
        let trie: TrieNode = ["中", "中国"].into_iter().collect();
        let input: Vec<char> = "中国人".chars().collect();
        assert_eq!(trie.walk_prefixes(&input, 0), vec![(1, "中"), (2, "中国")]);
    }
}
