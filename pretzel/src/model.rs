use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::document::Class;
use crate::errors::{PretzelError, Result};
use crate::smoothing::Smoothing;
use crate::vocabulary::Vocabulary;

/// Magic number.
const MODEL_MAGIC: &[u8] = b"PretzelBernoulliNB 0.1\n";

/// Upper bound of the bytes allocated while decoding a model.
const MODEL_SIZE_LIMIT: usize = 1 << 30;

/// Document frequencies and estimated likelihoods of a vocabulary token.
#[derive(Clone, Copy, Debug, PartialEq, Decode, Encode)]
pub struct WordStats {
    pub(crate) n_positive: u32,
    pub(crate) n_negative: u32,
    pub(crate) p_positive: f64,
    pub(crate) p_negative: f64,
}

impl WordStats {
    /// Gets the number of training documents of `class` containing the token.
    pub fn n_docs(&self, class: Class) -> u32 {
        match class {
            Class::Positive => self.n_positive,
            Class::Negative => self.n_negative,
        }
    }

    /// Gets the estimated `P(token|class)`.
    pub fn likelihood(&self, class: Class) -> f64 {
        match class {
            Class::Positive => self.p_positive,
            Class::Negative => self.p_negative,
        }
    }
}

/// Class priors estimated by relative frequency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassPriors {
    positive: f64,
    negative: f64,
}

impl ClassPriors {
    pub(crate) fn from_counts(n_positive: u32, n_negative: u32) -> Self {
        let n = f64::from(n_positive) + f64::from(n_negative);
        Self {
            positive: f64::from(n_positive) / n,
            negative: f64::from(n_negative) / n,
        }
    }

    /// Gets `P(class)`.
    pub fn prior(&self, class: Class) -> f64 {
        match class {
            Class::Positive => self.positive,
            Class::Negative => self.negative,
        }
    }
}

/// Model data.
///
/// A model holds the vocabulary, per-token document counts and likelihoods, the class document
/// counts, the stop words removed before counting, and the smoothing used for estimation.
/// It is immutable; use [`Classifier`](crate::Classifier) to score documents.
#[derive(Clone, Debug, PartialEq, Decode, Encode)]
pub struct Model {
    // sorted and unique
    pub(crate) vocabulary: Vec<String>,
    // aligned with `vocabulary`
    pub(crate) word_stats: Vec<WordStats>,
    pub(crate) n_positive: u32,
    pub(crate) n_negative: u32,
    // sorted and unique
    pub(crate) stop_words: Vec<String>,
    pub(crate) smoothing: Smoothing,
}

impl Model {
    /// Builds a model from document counts.
    ///
    /// `counts[i]` holds the positive and negative document frequencies of the `i`-th word.
    pub(crate) fn from_counts(
        vocabulary: Vocabulary,
        counts: Vec<[u32; 2]>,
        n_positive: u32,
        n_negative: u32,
        stop_words: Vec<String>,
        smoothing: Smoothing,
    ) -> Result<Self> {
        if n_positive == 0 || n_negative == 0 {
            return Err(PretzelError::invalid_argument(
                "examples",
                format!(
                    "each class needs at least one document, but got {} positive and {} negative",
                    n_positive, n_negative,
                ),
            ));
        }
        smoothing.validate()?;
        let word_stats = counts
            .into_iter()
            .map(|[n_pos, n_neg]| WordStats {
                n_positive: n_pos,
                n_negative: n_neg,
                p_positive: smoothing.estimate(n_pos, n_positive),
                p_negative: smoothing.estimate(n_neg, n_negative),
            })
            .collect();
        Ok(Self {
            vocabulary: vocabulary.into_words(),
            word_stats,
            n_positive,
            n_negative,
            stop_words,
            smoothing,
        })
    }

    /// Re-estimates all likelihoods from the stored counts with another smoothing.
    ///
    /// # Errors
    ///
    /// [`PretzelError::InvalidArgument`] will be returned if the pseudo-count is not a finite
    /// positive number.
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Result<Self> {
        smoothing.validate()?;
        for stats in &mut self.word_stats {
            stats.p_positive = smoothing.estimate(stats.n_positive, self.n_positive);
            stats.p_negative = smoothing.estimate(stats.n_negative, self.n_negative);
        }
        log::debug!(
            "re-estimated {} likelihoods: {} -> {}",
            self.word_stats.len(),
            self.smoothing,
            smoothing,
        );
        self.smoothing = smoothing;
        Ok(self)
    }

    /// Gets the vocabulary in ascending order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Gets the statistics of a token, or `None` if it is not in the vocabulary.
    pub fn word_stats(&self, token: &str) -> Option<&WordStats> {
        self.vocabulary
            .binary_search_by(|w| w.as_str().cmp(token))
            .ok()
            .map(|i| &self.word_stats[i])
    }

    /// Iterates over vocabulary tokens and their statistics in ascending token order.
    pub fn iter_word_stats(&self) -> impl Iterator<Item = (&str, &WordStats)> {
        self.vocabulary
            .iter()
            .map(String::as_str)
            .zip(&self.word_stats)
    }

    /// Gets the number of training documents of a class.
    pub fn n_docs(&self, class: Class) -> u32 {
        match class {
            Class::Positive => self.n_positive,
            Class::Negative => self.n_negative,
        }
    }

    /// Gets the class priors.
    pub fn priors(&self) -> ClassPriors {
        ClassPriors::from_counts(self.n_positive, self.n_negative)
    }

    /// Gets the stop words in ascending order.
    pub fn stop_words(&self) -> &[String] {
        &self.stop_words
    }

    /// Gets the smoothing used to estimate the likelihoods.
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Exports the model data.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        let config = bincode::config::standard();
        bincode::encode_into_std_write(self, wtr, config)?;
        Ok(())
    }

    /// Creates a model from a reader.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Returns
    ///
    /// A model data read from `rdr`.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    /// [`PretzelError::InvalidModel`] will be returned if the data is not a valid model.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0; MODEL_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if magic.as_slice() != MODEL_MAGIC {
            return Err(PretzelError::invalid_model(
                "The magic number of the input model mismatches.",
            ));
        }
        let config = bincode::config::standard().with_limit::<MODEL_SIZE_LIMIT>();
        let model: Self = bincode::decode_from_std_read(rdr, config)?;
        model.verify()?;
        Ok(model)
    }

    fn verify(&self) -> Result<()> {
        if self.vocabulary.len() != self.word_stats.len() {
            return Err(PretzelError::invalid_model(
                "the statistics table is not aligned with the vocabulary",
            ));
        }
        if self.vocabulary.is_empty() {
            return Err(PretzelError::invalid_model("the vocabulary is empty"));
        }
        if self.vocabulary.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PretzelError::invalid_model(
                "the vocabulary is not sorted or contains duplicates",
            ));
        }
        if self.n_positive == 0 || self.n_negative == 0 {
            return Err(PretzelError::invalid_model("a class has no document"));
        }
        self.smoothing
            .validate()
            .map_err(|e| PretzelError::invalid_model(e.to_string()))?;
        for (word, stats) in self.iter_word_stats() {
            if stats.n_positive > self.n_positive || stats.n_negative > self.n_negative {
                return Err(PretzelError::invalid_model(format!(
                    "document frequency of {:?} exceeds the number of documents",
                    word
                )));
            }
            for p in [stats.p_positive, stats.p_negative] {
                if !(0.0..=1.0).contains(&p) {
                    return Err(PretzelError::invalid_model(format!(
                        "likelihood of {:?} is out of range: {}",
                        word, p
                    )));
                }
            }
        }
        Ok(())
    }
}
