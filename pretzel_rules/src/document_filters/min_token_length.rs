use pretzel::Document;

use crate::DocumentFilter;

/// Removes tokens shorter than a given number of characters.
#[derive(Clone, Copy)]
pub struct MinTokenLengthFilter {
    min_len: usize,
}

impl MinTokenLengthFilter {
    /// Creates a new MinTokenLengthFilter.
    ///
    /// # Arguments
    ///
    /// * `min_len` - Minimum number of characters a token must have to be kept.
    ///
    /// # Returns
    ///
    /// A new MinTokenLengthFilter.
    pub const fn new(min_len: usize) -> Self {
        Self { min_len }
    }
}

impl DocumentFilter for MinTokenLengthFilter {
    fn filter(&self, mut document: Document) -> Document {
        document
            .tokens_mut()
            .retain(|token| token.chars().count() >= self.min_len);
        document
    }
}
