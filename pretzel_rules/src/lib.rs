//! Rule base filters for Pretzel.
//!
//! String filters normalize raw text before it is split into a [`pretzel::Document`].
//! Document filters rewrite the tokens of an existing document.
//!
//! ## Examples
//!
//! ```
//! use pretzel::Document;
//! use pretzel_rules::{
//!     document_filters::MinTokenLengthFilter,
//!     string_filters::{LowercaseFilter, PunctuationFilter},
//!     DocumentFilter, StringFilter,
//! };
//!
//! let text = LowercaseFilter.filter("This book is AWESOME!!");
//! let text = PunctuationFilter.filter(text);
//! let d = MinTokenLengthFilter::new(3).filter(Document::from_raw(text));
//! assert_eq!(&["this", "book", "awesome"], d.tokens());
//! ```

pub mod document_filters;
pub mod string_filters;

use pretzel::Document;

/// Filter for raw strings.
pub trait StringFilter<S>
where
    S: AsRef<str>,
{
    /// Filter a specified string.
    ///
    /// # Arguments:
    ///
    /// * `string` - Input string.
    ///
    /// # Returns
    ///
    /// A processed string.
    fn filter(&self, string: S) -> String;
}

/// Filter for [`Document`].
pub trait DocumentFilter {
    /// Filter a specified document.
    ///
    /// # Arguments:
    ///
    /// * `document` - Input document.
    ///
    /// # Returns
    ///
    /// A processed document.
    fn filter(&self, document: Document) -> Document;
}
