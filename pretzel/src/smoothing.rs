use std::fmt;
use std::str::FromStr;

use bincode::{Decode, Encode};

use crate::errors::{PretzelError, Result};

/// Additive smoothing of the Bernoulli word likelihoods.
///
/// With a pseudo-count `α`, `P(w|c) = (n_c(w) + α) / (N_c + 2α)`, where `n_c(w)` is the number
/// of documents of class `c` containing `w` and `N_c` the number of documents of class `c`.
/// The denominator adds `2α` because each word has two outcomes, present and absent.
#[derive(Clone, Copy, Debug, PartialEq, Decode, Encode)]
pub enum Smoothing {
    /// Raw relative frequency. Likelihoods of exactly 0 or 1 make the model degenerate for
    /// documents that contradict them.
    None,

    /// Add-one smoothing (`α = 1`).
    Laplace,

    /// Add-`α` smoothing with a user-defined positive `α`.
    Lidstone(f64),
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::None
    }
}

impl Smoothing {
    /// Gets the pseudo-count.
    pub fn alpha(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Laplace => 1.0,
            Self::Lidstone(alpha) => alpha,
        }
    }

    pub(crate) fn validate(self) -> Result<()> {
        match self {
            Self::None | Self::Laplace => Ok(()),
            Self::Lidstone(alpha) if alpha.is_finite() && alpha > 0.0 => Ok(()),
            Self::Lidstone(alpha) => Err(PretzelError::invalid_argument(
                "smoothing",
                format!("alpha must be a finite positive number, but got {}", alpha),
            )),
        }
    }

    /// Estimates `P(w|c)` from a document count.
    ///
    /// # Arguments
    ///
    /// * `n_docs_with_word` - Number of documents of the class containing the word.
    /// * `n_docs` - Number of documents of the class. Must be positive.
    pub fn estimate(self, n_docs_with_word: u32, n_docs: u32) -> f64 {
        let alpha = self.alpha();
        (f64::from(n_docs_with_word) + alpha) / (f64::from(n_docs) + 2.0 * alpha)
    }
}

impl fmt::Display for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Laplace => f.write_str("laplace"),
            Self::Lidstone(alpha) => write!(f, "{}", alpha),
        }
    }
}

impl FromStr for Smoothing {
    type Err = &'static str;

    /// Parses `none`, `laplace`, or a positive pseudo-count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "laplace" => Ok(Self::Laplace),
            _ => {
                let alpha: f64 = s
                    .parse()
                    .map_err(|_| "Smoothing must be `none`, `laplace`, or a positive number.")?;
                let smoothing = Self::Lidstone(alpha);
                smoothing
                    .validate()
                    .map_err(|_| "Smoothing pseudo-count must be a finite positive number.")?;
                Ok(smoothing)
            }
        }
    }
}
