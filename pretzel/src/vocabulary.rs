use std::collections::BTreeSet;

use hashbrown::HashMap;

/// Set of distinct tokens used as features.
///
/// Tokens are kept in ascending order so that identifiers do not depend on the order in which
/// the training documents were seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
    ids: HashMap<String, usize>,
}

impl Vocabulary {
    /// Creates a vocabulary from tokens. Duplicates are merged.
    ///
    /// # Examples
    ///
    /// ```
    /// use pretzel::Vocabulary;
    ///
    /// let v = Vocabulary::new(["rock", "book", "rock"]);
    /// assert_eq!(2, v.len());
    /// assert_eq!(Some(0), v.id("book"));
    /// assert_eq!(None, v.id("pretzles"));
    /// ```
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: BTreeSet<String> = tokens.into_iter().map(Into::into).collect();
        Self::from_sorted(words.into_iter().collect())
    }

    // `words` must be sorted and unique.
    pub(crate) fn from_sorted(words: Vec<String>) -> Self {
        let ids = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Self { words, ids }
    }

    /// Gets the identifier of a token.
    pub fn id(&self, token: &str) -> Option<usize> {
        self.ids.get(token).copied()
    }

    /// Checks whether the token belongs to the vocabulary.
    pub fn contains(&self, token: &str) -> bool {
        self.ids.contains_key(token)
    }

    /// Gets the token with the given identifier.
    pub fn word(&self, id: usize) -> Option<&str> {
        self.words.get(id).map(String::as_str)
    }

    /// Gets all tokens in identifier order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub(crate) fn into_words(self) -> Vec<String> {
        self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_independent() {
        let v1 = Vocabulary::new(["supreme", "beings", "leisure", "rock"]);
        let v2 = Vocabulary::new(["rock", "leisure", "beings", "supreme", "rock"]);
        assert_eq!(v1, v2);
        assert_eq!(&["beings", "leisure", "rock", "supreme"], v1.words());
    }

    #[test]
    fn test_lookup() {
        let v = Vocabulary::new(["jesus", "cheeto", "tyrant"]);
        assert_eq!(Some(0), v.id("cheeto"));
        assert_eq!(Some("tyrant"), v.word(2));
        assert_eq!(None, v.word(3));
        assert!(v.contains("jesus"));
        assert!(!v.contains("Jesus"));
    }

    #[test]
    fn test_empty() {
        let v = Vocabulary::new(Vec::<String>::new());
        assert!(v.is_empty());
    }
}
