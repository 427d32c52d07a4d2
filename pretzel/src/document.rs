use std::fmt;
use std::str::FromStr;

use crate::errors::{PretzelError, Result};

/// Document class.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Class {
    /// Positive class.
    Positive = 0,

    /// Negative class.
    Negative = 1,
}

impl Class {
    /// Both classes, in the order scores are reported.
    pub const ALL: [Self; 2] = [Self::Positive, Self::Negative];

    /// Gets the label string of the class.
    ///
    /// # Examples
    ///
    /// ```
    /// use pretzel::Class;
    ///
    /// assert_eq!("positive", Class::Positive.as_str());
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }

    /// Gets the other class.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Class {
    type Err = PretzelError;

    /// Parses a label.
    ///
    /// # Errors
    ///
    /// [`PretzelError::UnknownClass`] will be returned if `label` is neither `positive` nor
    /// `negative`.
    fn from_str(label: &str) -> Result<Self> {
        match label {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            _ => Err(PretzelError::unknown_class(label)),
        }
    }
}

/// Ordered sequence of whitespace-separated tokens.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Document {
    pub(crate) tokens: Vec<String>,
}

impl Document {
    /// Creates a new [`Document`] by splitting a string on whitespace.
    ///
    /// # Arguments
    ///
    /// * `text` - A raw string.
    ///
    /// # Returns
    ///
    /// A new [`Document`]. An empty or blank `text` gives a document without tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use pretzel::Document;
    ///
    /// let d = Document::from_raw("this book  is awesome");
    /// assert_eq!(&["this", "book", "is", "awesome"], d.tokens());
    /// ```
    pub fn from_raw<S>(text: S) -> Self
    where
        S: AsRef<str>,
    {
        Self {
            tokens: text
                .as_ref()
                .split_whitespace()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Creates a new [`Document`] from tokens.
    ///
    /// Tokens containing whitespace are not split again.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Gets the tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Gets a mutable reference to the tokens.
    pub fn tokens_mut(&mut self) -> &mut Vec<String> {
        &mut self.tokens
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Checks whether the document has no token.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Joins the tokens with single spaces.
    pub fn to_raw_string(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Document with a class label.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LabeledDocument {
    pub(crate) document: Document,
    pub(crate) class: Class,
}

impl LabeledDocument {
    /// Creates a new [`LabeledDocument`].
    pub fn new(document: Document, class: Class) -> Self {
        Self { document, class }
    }

    /// Creates a new [`LabeledDocument`] from a label string and a raw text.
    ///
    /// # Errors
    ///
    /// [`PretzelError::UnknownClass`] will be returned if `label` is not a known class.
    pub fn from_label<S>(label: &str, text: S) -> Result<Self>
    where
        S: AsRef<str>,
    {
        Ok(Self::new(Document::from_raw(text), label.parse()?))
    }

    /// Parses a corpus line of the form `label<TAB>text`.
    ///
    /// # Errors
    ///
    /// This function will return an error variant when:
    ///
    /// * `line` contains no tab character. ([`PretzelError::InvalidArgument`])
    /// * the label is not a known class. ([`PretzelError::UnknownClass`])
    ///
    /// # Examples
    ///
    /// ```
    /// use pretzel::{Class, LabeledDocument};
    ///
    /// let d = LabeledDocument::from_tsv_line("negative\tharry potter books suck").unwrap();
    /// assert_eq!(Class::Negative, d.class());
    /// assert_eq!(4, d.document().len());
    ///
    /// assert!(LabeledDocument::from_tsv_line("neutral\tmeh").is_err());
    /// ```
    pub fn from_tsv_line(line: &str) -> Result<Self> {
        let (label, text) = line.split_once('\t').ok_or_else(|| {
            PretzelError::invalid_argument("line", "expected `label<TAB>text`")
        })?;
        Self::from_label(label.trim(), text)
    }

    /// Gets the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Gets a mutable reference to the document.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Gets the class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Splits into the document and the class.
    pub fn into_parts(self) -> (Document, Class) {
        (self.document, self.class)
    }
}
