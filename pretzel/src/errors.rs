//! Definition of errors.

use std::fmt;

use thiserror::Error;

use crate::document::Class;

pub type Result<T, E = PretzelError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PretzelError {
    #[error(transparent)]
    DegenerateModel(#[from] DegenerateModelError),

    #[error(transparent)]
    EmptyVocabulary(#[from] EmptyVocabularyError),

    #[error(transparent)]
    UnknownClass(#[from] UnknownClassError),

    #[error(transparent)]
    InvalidModel(#[from] InvalidModelError),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    DecodeError(#[from] bincode::error::DecodeError),

    #[error(transparent)]
    EncodeError(#[from] bincode::error::EncodeError),
}

impl PretzelError {
    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn unknown_class<S>(label: S) -> Self
    where
        S: Into<String>,
    {
        Self::UnknownClass(UnknownClassError {
            label: label.into(),
        })
    }
}

/// A factor of the likelihood product that is exactly zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZeroFactor {
    /// Class whose likelihood collapses.
    pub class: Class,

    /// Vocabulary token responsible for the collapse.
    pub token: String,

    /// `true` if the token occurs in the document and `P(token|class) = 0`, `false` if it is
    /// absent and `P(token|class) = 1`.
    pub present: bool,
}

impl fmt::Display for ZeroFactor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let state = if self.present { "present" } else { "absent" };
        write!(f, "{} ({})", self.token, state)
    }
}

/// Error used when an unsmoothed estimate collapses a class likelihood to exactly zero.
#[derive(Debug, Error)]
pub struct DegenerateModelError {
    pub(crate) factors: Vec<ZeroFactor>,
}

impl DegenerateModelError {
    /// Gets the zero factors that collapsed the likelihoods.
    pub fn factors(&self) -> &[ZeroFactor] {
        &self.factors
    }

    /// Checks whether the likelihood of the given class collapsed.
    pub fn is_collapsed(&self, class: Class) -> bool {
        self.factors.iter().any(|f| f.class == class)
    }
}

impl fmt::Display for DegenerateModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DegenerateModelError: zero-probability factors")?;
        for class in Class::ALL {
            let mut tokens = self.factors.iter().filter(|z| z.class == class).peekable();
            if tokens.peek().is_none() {
                continue;
            }
            write!(f, "; {}:", class)?;
            for z in tokens {
                write!(f, " {}", z)?;
            }
        }
        Ok(())
    }
}

/// Error used when the stop-word filter removes every token of the training set.
#[derive(Debug, Error)]
#[error("EmptyVocabularyError: no token remains after removing stop words")]
pub struct EmptyVocabularyError;

/// Error used when a label is neither `positive` nor `negative`.
#[derive(Debug, Error)]
#[error("UnknownClassError: {label:?}")]
pub struct UnknownClassError {
    /// The rejected label.
    pub(crate) label: String,
}

/// Error used when the model is invalid.
#[derive(Debug, Error)]
#[error("InvalidModelError: {msg}")]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

/// Error used when the argument is invalid.
#[derive(Debug, Error)]
#[error("InvalidArgumentError: {arg}: {msg}")]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}
