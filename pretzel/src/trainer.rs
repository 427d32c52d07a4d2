use hashbrown::{HashMap, HashSet};

use crate::document::{Class, Document, LabeledDocument};
use crate::errors::{EmptyVocabularyError, PretzelError, Result};
use crate::model::Model;
use crate::smoothing::Smoothing;
use crate::stop_words::StopWords;
use crate::vocabulary::Vocabulary;

/// Trainer.
///
/// Counts, for every token left after stop-word removal, the number of documents of each class
/// in which it occurs at least once. Documents are independent of each other, so the resulting
/// model does not depend on the order in which they are pushed.
///
/// # Examples
///
/// ```
/// use pretzel::{Class, Document, Smoothing, StopWords, Trainer};
///
/// let stop_words: StopWords = ["is", "this"].into_iter().collect();
/// let mut trainer = Trainer::new(stop_words).smoothing(Smoothing::Laplace);
/// trainer.push_document(&Document::from_raw("this book is awesome"), Class::Positive);
/// trainer.push_document(&Document::from_raw("harry potter books suck"), Class::Negative);
///
/// let model = trainer.train().unwrap();
/// assert_eq!(6, model.vocabulary().len());
/// ```
pub struct Trainer {
    stop_words: StopWords,
    smoothing: Smoothing,
    counts: HashMap<String, [u32; 2]>,
    n_docs: [u32; 2],
}

impl Trainer {
    /// Creates a new trainer.
    ///
    /// # Arguments
    ///
    /// * `stop_words` - Tokens excluded from the vocabulary.
    ///
    /// # Returns
    ///
    /// A trainer without smoothing.
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            smoothing: Smoothing::None,
            counts: HashMap::new(),
            n_docs: [0; 2],
        }
    }

    /// Sets the smoothing used to estimate likelihoods.
    pub fn smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Adds a document to the dataset.
    ///
    /// # Arguments
    ///
    /// * `document` - A document.
    /// * `class` - The class of the document.
    pub fn push_document(&mut self, document: &Document, class: Class) {
        let tokens: HashSet<&str> = self.stop_words.retained(document).collect();
        for token in tokens {
            if let Some(counts) = self.counts.get_mut(token) {
                counts[class as usize] += 1;
            } else {
                let mut counts = [0; 2];
                counts[class as usize] = 1;
                self.counts.insert(token.to_string(), counts);
            }
        }
        self.n_docs[class as usize] += 1;
    }

    /// Adds a labeled document to the dataset.
    pub fn push_labeled(&mut self, example: &LabeledDocument) {
        self.push_document(example.document(), example.class());
    }

    /// Gets the number of distinct non-stop-word tokens seen so far.
    pub fn n_features(&self) -> usize {
        self.counts.len()
    }

    /// Gets the number of documents pushed so far.
    pub fn n_documents(&self) -> u32 {
        self.n_docs.iter().sum()
    }

    /// Estimates the model.
    ///
    /// # Returns
    ///
    /// A trained model.
    ///
    /// # Errors
    ///
    /// This function will return an error variant when:
    ///
    /// * no document has been pushed. ([`PretzelError::InvalidArgument`])
    /// * every token is a stop word. ([`PretzelError::EmptyVocabulary`])
    /// * a class has no document. ([`PretzelError::InvalidArgument`])
    /// * the smoothing pseudo-count is invalid. ([`PretzelError::InvalidArgument`])
    pub fn train(self) -> Result<Model> {
        if self.n_documents() == 0 {
            return Err(PretzelError::invalid_argument(
                "examples",
                "no training document",
            ));
        }
        if self.counts.is_empty() {
            return Err(EmptyVocabularyError.into());
        }

        let vocabulary = Vocabulary::new(self.counts.keys().cloned());
        let counts = vocabulary
            .words()
            .iter()
            .map(|w| self.counts[w.as_str()])
            .collect();
        log::debug!(
            "vocabulary: {} tokens, documents: {} positive, {} negative, smoothing: {}",
            vocabulary.len(),
            self.n_docs[Class::Positive as usize],
            self.n_docs[Class::Negative as usize],
            self.smoothing,
        );
        Model::from_counts(
            vocabulary,
            counts,
            self.n_docs[Class::Positive as usize],
            self.n_docs[Class::Negative as usize],
            self.stop_words.to_sorted_vec(),
            self.smoothing,
        )
    }
}

/// Fits a model from `(label, text)` pairs.
///
/// Texts are split on whitespace. Labels must be `positive` or `negative`.
///
/// # Errors
///
/// [`PretzelError::UnknownClass`] will be returned on the first unknown label. See
/// [`Trainer::train`] for the other errors.
///
/// # Examples
///
/// ```
/// use pretzel::{fit, Class, Smoothing, StopWords};
///
/// let stop_words: StopWords = ["is", "this", "of"].into_iter().collect();
/// let model = fit(
///     [
///         ("positive", "this book is awesome"),
///         ("negative", "harry potter books suck"),
///     ],
///     &stop_words,
///     Smoothing::None,
/// )
/// .unwrap();
/// let stats = model.word_stats("book").unwrap();
/// assert_eq!(1.0, stats.likelihood(Class::Positive));
/// assert_eq!(0.0, stats.likelihood(Class::Negative));
/// ```
pub fn fit<I, L, S>(examples: I, stop_words: &StopWords, smoothing: Smoothing) -> Result<Model>
where
    I: IntoIterator<Item = (L, S)>,
    L: AsRef<str>,
    S: AsRef<str>,
{
    let mut trainer = Trainer::new(stop_words.clone()).smoothing(smoothing);
    for (label, text) in examples {
        let class: Class = label.as_ref().parse()?;
        trainer.push_document(&Document::from_raw(text), class);
    }
    trainer.train()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITCOM: [(&str, &str); 6] = [
        ("positive", "this book is awesome"),
        ("negative", "harry potter books suck"),
        ("negative", "these pretzles are making me thirsty"),
        ("negative", "they choppin my fingers off Ira"),
        ("positive", "supreme beings of leisure rock"),
        ("negative", "cheeto jesus is a tyrant"),
    ];

    fn stop_words() -> StopWords {
        ["a", "this", "me", "are", "of", "is", "my", "these", "they"]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_fit_sitcom() {
        let model = fit(SITCOM, &stop_words(), Smoothing::None).unwrap();

        assert_eq!(20, model.vocabulary().len());
        let book = model.word_stats("book").unwrap();
        assert_eq!(0.5, book.likelihood(Class::Positive));
        assert_eq!(0.0, book.likelihood(Class::Negative));
        let harry = model.word_stats("harry").unwrap();
        assert_eq!(0.0, harry.likelihood(Class::Positive));
        assert_eq!(0.25, harry.likelihood(Class::Negative));

        let priors = model.priors();
        assert!((priors.prior(Class::Positive) - 2.0 / 6.0).abs() < 1e-12);
        assert!((priors.prior(Class::Negative) - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_excludes_stop_words() {
        let model = fit(SITCOM, &stop_words(), Smoothing::None).unwrap();
        for w in ["a", "this", "me", "are", "of", "is", "my", "these", "they"] {
            assert!(model.word_stats(w).is_none());
        }
        assert_eq!(9, model.stop_words().len());
    }

    #[test]
    fn test_fit_likelihoods_in_unit_interval() {
        for smoothing in [Smoothing::None, Smoothing::Laplace, Smoothing::Lidstone(0.1)] {
            let model = fit(SITCOM, &stop_words(), smoothing).unwrap();
            for (_, stats) in model.iter_word_stats() {
                for class in Class::ALL {
                    let p = stats.likelihood(class);
                    assert!((0.0..=1.0).contains(&p));
                }
            }
            let priors = model.priors();
            let sum = priors.prior(Class::Positive) + priors.prior(Class::Negative);
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_fit_order_independent() {
        let forward = fit(SITCOM, &stop_words(), Smoothing::Laplace).unwrap();
        let mut reversed = SITCOM;
        reversed.reverse();
        let backward = fit(reversed, &stop_words(), Smoothing::Laplace).unwrap();
        let mut rotated = SITCOM;
        rotated.rotate_left(2);
        let rotated = fit(rotated, &stop_words(), Smoothing::Laplace).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn test_counts_presence_once_per_document() {
        let model = fit(
            [
                ("positive", "rock rock rock"),
                ("positive", "rock"),
                ("negative", "jazz"),
            ],
            &StopWords::new(),
            Smoothing::None,
        )
        .unwrap();
        let rock = model.word_stats("rock").unwrap();
        assert_eq!(2, rock.n_docs(Class::Positive));
        assert_eq!(1.0, rock.likelihood(Class::Positive));
    }

    #[test]
    fn test_fit_unknown_class() {
        let e = fit(
            [("positive", "awesome"), ("neutral", "fine")],
            &StopWords::new(),
            Smoothing::None,
        )
        .unwrap_err();
        assert!(matches!(e, PretzelError::UnknownClass(_)));
    }

    #[test]
    fn test_fit_empty_vocabulary() {
        let e = fit(
            [("positive", "this is"), ("negative", "these are my")],
            &stop_words(),
            Smoothing::None,
        )
        .unwrap_err();
        assert!(matches!(e, PretzelError::EmptyVocabulary(_)));
    }

    #[test]
    fn test_fit_no_examples() {
        let e = fit(
            Vec::<(&str, &str)>::new(),
            &stop_words(),
            Smoothing::None,
        )
        .unwrap_err();
        assert!(matches!(e, PretzelError::InvalidArgument(_)));
    }

    #[test]
    fn test_fit_single_class() {
        let e = fit(
            [("positive", "awesome book"), ("positive", "rock")],
            &stop_words(),
            Smoothing::None,
        )
        .unwrap_err();
        assert!(matches!(e, PretzelError::InvalidArgument(_)));
    }

    #[test]
    fn test_trainer_counters() {
        let mut trainer = Trainer::new(stop_words());
        trainer.push_labeled(&LabeledDocument::from_tsv_line("positive\tthis book is awesome").unwrap());
        trainer.push_document(&Document::from_raw("book of books"), Class::Negative);
        assert_eq!(2, trainer.n_documents());
        assert_eq!(3, trainer.n_features());
    }
}
