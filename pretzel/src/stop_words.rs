use hashbrown::HashSet;

use crate::document::Document;

/// Set of tokens ignored when building the vocabulary and when scoring.
///
/// Matching is exact and case-sensitive. Normalize texts beforehand if case should not matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stop-word list.
    ///
    /// Words are separated by whitespace. Lines starting with `#` are comments.
    ///
    /// # Examples
    ///
    /// ```
    /// use pretzel::StopWords;
    ///
    /// let sw = StopWords::from_text("# articles\na the\nof\n");
    /// assert_eq!(3, sw.len());
    /// assert!(sw.contains("of"));
    /// assert!(!sw.contains("#"));
    /// ```
    pub fn from_text(text: &str) -> Self {
        text.lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::split_whitespace)
            .collect()
    }

    /// Adds a word. Returns `false` if it was already present.
    pub fn insert<S>(&mut self, word: S) -> bool
    where
        S: Into<String>,
    {
        self.words.insert(word.into())
    }

    /// Checks whether `token` is a stop word.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Returns the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Checks whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over the tokens of `document` that are not stop words.
    pub fn retained<'a>(&'a self, document: &'a Document) -> impl Iterator<Item = &'a str> + 'a {
        document
            .tokens()
            .iter()
            .map(String::as_str)
            .filter(move |token| !self.contains(token))
    }

    /// Gets the words in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut words: Vec<_> = self.words.iter().cloned().collect();
        words.sort_unstable();
        words
    }
}

impl<S> FromIterator<S> for StopWords
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
