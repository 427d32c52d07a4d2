use std::fmt;
use std::str::FromStr;

use crate::document::{Class, Document};
use crate::errors::{DegenerateModelError, Result, ZeroFactor};
use crate::model::Model;
use crate::stop_words::StopWords;
use crate::vocabulary::Vocabulary;

/// Policy applied when both classes get exactly the same score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Leaves the decision undefined.
    #[default]
    Undecided,

    /// Picks the class with the larger prior. Equal priors stay undecided.
    Prior,

    /// Always picks the given class.
    Always(Class),
}

impl FromStr for TieBreak {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undecided" => Ok(Self::Undecided),
            "prior" => Ok(Self::Prior),
            "positive" => Ok(Self::Always(Class::Positive)),
            "negative" => Ok(Self::Always(Class::Negative)),
            _ => Err("Tie-break must be one of `undecided`, `prior`, `positive`, `negative`."),
        }
    }
}

/// Score of a class for a document, kept in log space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassScore {
    log_likelihood: f64,
    log_prior: f64,
}

impl ClassScore {
    /// Gets `ln P(document|class)`.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Gets `ln P(class)`.
    pub fn log_prior(&self) -> f64 {
        self.log_prior
    }

    /// Gets `ln (P(document|class) × P(class))`.
    pub fn log_score(&self) -> f64 {
        self.log_likelihood + self.log_prior
    }

    /// Gets `P(document|class)`. May underflow to zero for long vocabularies.
    pub fn likelihood(&self) -> f64 {
        self.log_likelihood.exp()
    }

    /// Gets the unnormalized posterior `P(document|class) × P(class)`. May underflow to zero for
    /// long vocabularies; compare [`Self::log_score`] instead.
    pub fn score(&self) -> f64 {
        self.log_score().exp()
    }
}

/// Document with per-class scores and a decision.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredDocument {
    document: Document,
    scores: [ClassScore; 2],
    decision: Option<Class>,
}

impl ScoredDocument {
    /// Gets the scored document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Gets the score of a class.
    pub fn score(&self, class: Class) -> &ClassScore {
        &self.scores[class as usize]
    }

    /// Gets the normalized posterior `P(class|document)`.
    pub fn posterior(&self, class: Class) -> f64 {
        let pos = self.scores[Class::Positive as usize].log_score();
        let neg = self.scores[Class::Negative as usize].log_score();
        let max = pos.max(neg);
        let log_evidence = max + ((pos - max).exp() + (neg - max).exp()).ln();
        (self.scores[class as usize].log_score() - log_evidence).exp()
    }

    /// Gets the predicted class, or `None` if the scores tie and the tie-break policy leaves it
    /// undecided.
    pub fn decision(&self) -> Option<Class> {
        self.decision
    }
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.decision {
            Some(class) => write!(f, "{}", class)?,
            None => write!(f, "undecided")?,
        }
        for class in Class::ALL {
            write!(f, "\t{}={:.6}", class, self.score(class).log_score())?;
        }
        Ok(())
    }
}

/// Bernoulli Naive Bayes classifier.
///
/// The likelihood of a document under class `c` is the product over all vocabulary tokens `t`
/// of `P(t|c)` if `t` occurs in the document and `1 - P(t|c)` otherwise. Tokens outside the
/// vocabulary are ignored.
///
/// # Examples
///
/// ```
/// use pretzel::{fit, Class, Classifier, Document, Smoothing, StopWords};
///
/// let model = fit(
///     [
///         ("positive", "awesome book"),
///         ("positive", "awesome rock"),
///         ("negative", "books suck"),
///     ],
///     &StopWords::new(),
///     Smoothing::Laplace,
/// )
/// .unwrap();
/// let classifier = Classifier::new(model);
///
/// let s = classifier.classify(&Document::from_raw("an awesome book")).unwrap();
/// assert_eq!(Some(Class::Positive), s.decision());
/// ```
pub struct Classifier {
    vocabulary: Vocabulary,
    stop_words: StopWords,
    likelihoods: Vec<[f64; 2]>,
    // ln P(t|c) - ln (1 - P(t|c)), 0 when P(t|c) = 1
    log_odds: Vec<[f64; 2]>,
    // sum of ln (1 - P(t|c)) over tokens with P(t|c) < 1
    log_absent_sum: [f64; 2],
    // tokens with P(t|c) = 1
    certain: [Vec<usize>; 2],
    log_priors: [f64; 2],
    tie_break: TieBreak,
}

impl Classifier {
    /// Creates a new classifier.
    ///
    /// # Arguments
    ///
    /// * `model` - A model data.
    ///
    /// # Returns
    ///
    /// A new classifier leaving ties undecided.
    pub fn new(model: Model) -> Self {
        let priors = model.priors();
        let mut log_odds = Vec::with_capacity(model.word_stats.len());
        let mut likelihoods = Vec::with_capacity(model.word_stats.len());
        let mut log_absent_sum = [0.0; 2];
        let mut certain = [vec![], vec![]];
        for (id, stats) in model.word_stats.iter().enumerate() {
            let mut odds = [0.0; 2];
            let mut ps = [0.0; 2];
            for class in Class::ALL {
                let c = class as usize;
                let p = stats.likelihood(class);
                ps[c] = p;
                if p >= 1.0 {
                    certain[c].push(id);
                } else {
                    log_absent_sum[c] += (1.0 - p).ln();
                    odds[c] = p.ln() - (1.0 - p).ln();
                }
            }
            likelihoods.push(ps);
            log_odds.push(odds);
        }
        Self {
            vocabulary: Vocabulary::from_sorted(model.vocabulary),
            stop_words: model.stop_words.into_iter().collect(),
            likelihoods,
            log_odds,
            log_absent_sum,
            certain,
            log_priors: [
                priors.prior(Class::Positive).ln(),
                priors.prior(Class::Negative).ln(),
            ],
            tie_break: TieBreak::Undecided,
        }
    }

    /// Sets the tie-break policy.
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Gets the vocabulary of the underlying model.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Scores a document.
    ///
    /// # Arguments
    ///
    /// * `document` - A document.
    ///
    /// # Returns
    ///
    /// The document with its per-class scores and the decision.
    ///
    /// # Errors
    ///
    /// [`PretzelError::DegenerateModel`](crate::PretzelError::DegenerateModel) will be returned
    /// if a likelihood factor is exactly zero for any class, i.e. the document contains a token
    /// never seen in that class or lacks a token seen in every document of that class.
    pub fn classify(&self, document: &Document) -> Result<ScoredDocument> {
        let mut present: Vec<usize> = self
            .stop_words
            .retained(document)
            .filter_map(|token| self.vocabulary.id(token))
            .collect();
        present.sort_unstable();
        present.dedup();

        let factors = self.zero_factors(&present);
        if !factors.is_empty() {
            log::trace!("degenerate document: {:?}", document.tokens());
            return Err(DegenerateModelError { factors }.into());
        }

        let mut log_likelihood = self.log_absent_sum;
        for &id in &present {
            for (ll, odds) in log_likelihood.iter_mut().zip(self.log_odds[id]) {
                *ll += odds;
            }
        }
        let scores = [
            ClassScore {
                log_likelihood: log_likelihood[0],
                log_prior: self.log_priors[0],
            },
            ClassScore {
                log_likelihood: log_likelihood[1],
                log_prior: self.log_priors[1],
            },
        ];
        Ok(ScoredDocument {
            document: document.clone(),
            decision: self.decide(&scores),
            scores,
        })
    }

    /// Splits `text` on whitespace and scores it. See [`Self::classify`].
    pub fn classify_text(&self, text: &str) -> Result<ScoredDocument> {
        self.classify(&Document::from_raw(text))
    }

    // `present` must be sorted.
    fn zero_factors(&self, present: &[usize]) -> Vec<ZeroFactor> {
        let mut factors = vec![];
        for class in Class::ALL {
            let c = class as usize;
            for &id in present {
                if self.likelihoods[id][c] <= 0.0 {
                    factors.push((class, id, true));
                }
            }
            for &id in &self.certain[c] {
                if present.binary_search(&id).is_err() {
                    factors.push((class, id, false));
                }
            }
        }
        factors.sort_unstable();
        factors
            .into_iter()
            .map(|(class, id, present)| ZeroFactor {
                class,
                token: self.vocabulary.words()[id].clone(),
                present,
            })
            .collect()
    }

    fn decide(&self, scores: &[ClassScore; 2]) -> Option<Class> {
        let pos = scores[Class::Positive as usize].log_score();
        let neg = scores[Class::Negative as usize].log_score();
        compare_log_scores(pos, neg).or_else(|| match self.tie_break {
            TieBreak::Undecided => None,
            TieBreak::Always(class) => Some(class),
            TieBreak::Prior => compare_log_scores(
                self.log_priors[Class::Positive as usize],
                self.log_priors[Class::Negative as usize],
            ),
        })
    }
}

/// Relative tolerance under which two log scores are considered equal.
///
/// Both classes sum the same terms in different orders, so equal scores may differ by a few
/// ulps.
const TIE_TOLERANCE: f64 = 1e-12;

/// Returns the class with the larger log score, or `None` if the scores tie.
fn compare_log_scores(pos: f64, neg: f64) -> Option<Class> {
    if (pos - neg).abs() <= TIE_TOLERANCE * pos.abs().max(neg.abs()) {
        None
    } else if pos > neg {
        Some(Class::Positive)
    } else {
        Some(Class::Negative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::errors::PretzelError;
    use crate::smoothing::Smoothing;
    use crate::trainer::fit;

    const SITCOM: [(&str, &str); 6] = [
        ("positive", "this book is awesome"),
        ("negative", "harry potter books suck"),
        ("negative", "these pretzles are making me thirsty"),
        ("negative", "they choppin my fingers off Ira"),
        ("positive", "supreme beings of leisure rock"),
        ("negative", "cheeto jesus is a tyrant"),
    ];

    const CHEETO: &str = "just had my first cheeto ever it was awesome";

    fn sitcom_model(smoothing: Smoothing) -> Model {
        let stop_words: StopWords = ["a", "this", "me", "are", "of", "is", "my", "these", "they"]
            .into_iter()
            .collect();
        fit(SITCOM, &stop_words, smoothing).unwrap()
    }

    #[test]
    fn test_classify_degenerate() {
        let classifier = Classifier::new(sitcom_model(Smoothing::None));
        let e = classifier.classify_text(CHEETO).unwrap_err();
        let e = match e {
            PretzelError::DegenerateModel(e) => e,
            e => panic!("unexpected error: {}", e),
        };
        assert_eq!(
            &[
                ZeroFactor {
                    class: Class::Positive,
                    token: "cheeto".to_string(),
                    present: true,
                },
                ZeroFactor {
                    class: Class::Negative,
                    token: "awesome".to_string(),
                    present: true,
                },
            ],
            e.factors(),
        );
    }

    #[test]
    fn test_classify_one_class_degenerate() {
        // "harry" never occurs in positive documents; nothing collapses the negative class.
        let classifier = Classifier::new(sitcom_model(Smoothing::None));
        let e = classifier.classify_text("harry").unwrap_err();
        let e = match e {
            PretzelError::DegenerateModel(e) => e,
            e => panic!("unexpected error: {}", e),
        };
        assert!(e.is_collapsed(Class::Positive));
        assert!(!e.is_collapsed(Class::Negative));
    }

    #[test]
    fn test_classify_absent_certain_token() {
        let model = fit(
            [("positive", "rock on"), ("positive", "rock"), ("negative", "jazz")],
            &StopWords::new(),
            Smoothing::None,
        )
        .unwrap();
        let classifier = Classifier::new(model);
        let e = classifier.classify_text("on").unwrap_err();
        assert_eq!(
            "DegenerateModelError: zero-probability factors; positive: rock (absent); negative: jazz (absent) on (present)",
            e.to_string(),
        );
    }

    #[test]
    fn test_classify_laplace() {
        let classifier = Classifier::new(sitcom_model(Smoothing::Laplace));
        let s = classifier.classify_text(CHEETO).unwrap();
        assert_eq!(Some(Class::Negative), s.decision());

        // positive: 0.25 * 0.5 * 0.5^5 * 0.75^13 * 2/6
        let expected_pos = 0.25f64.ln()
            + 0.5f64.ln()
            + 5.0 * 0.5f64.ln()
            + 13.0 * 0.75f64.ln()
            + (2.0f64 / 6.0).ln();
        // negative: 1/3 * 1/6 * (5/6)^5 * (2/3)^13 * 4/6
        let expected_neg = (1.0f64 / 3.0).ln()
            + (1.0f64 / 6.0).ln()
            + 5.0 * (5.0f64 / 6.0).ln()
            + 13.0 * (2.0f64 / 3.0).ln()
            + (4.0f64 / 6.0).ln();
        assert!((s.score(Class::Positive).log_score() - expected_pos).abs() < 1e-9);
        assert!((s.score(Class::Negative).log_score() - expected_neg).abs() < 1e-9);

        let sum = s.posterior(Class::Positive) + s.posterior(Class::Negative);
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(s.posterior(Class::Negative) > 0.5);
    }

    #[test]
    fn test_classify_linear_score() {
        let classifier = Classifier::new(sitcom_model(Smoothing::Laplace));
        let s = classifier.classify_text("book").unwrap();
        let score = s.score(Class::Positive);
        let expected = score.likelihood() * 2.0 / 6.0;
        assert!(((score.score() - expected) / expected).abs() < 1e-12);
        assert!(score.score() > 0.0);
    }

    #[test]
    fn test_classify_idempotent() {
        let classifier = Classifier::new(sitcom_model(Smoothing::Laplace));
        let d = Document::from_raw(CHEETO);
        let s1 = classifier.classify(&d).unwrap();
        let s2 = classifier.classify(&d).unwrap();
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_classify_ignores_unknown_and_repeated_tokens() {
        let classifier = Classifier::new(sitcom_model(Smoothing::Laplace));
        let s1 = classifier.classify_text("awesome").unwrap();
        let s2 = classifier.classify_text("awesome awesome unseen is").unwrap();
        assert_eq!(s1.scores, s2.scores);
    }

    #[test]
    fn test_tie_break() {
        let model = fit(
            [("positive", "up"), ("negative", "down")],
            &StopWords::new(),
            Smoothing::Laplace,
        )
        .unwrap();
        let classifier = Classifier::new(model.clone());
        let s = classifier.classify_text("").unwrap();
        assert_eq!(None, s.decision());
        assert_eq!("undecided", s.to_string().split('\t').next().unwrap());

        // equal priors
        let classifier = Classifier::new(model.clone()).tie_break(TieBreak::Prior);
        assert_eq!(None, classifier.classify_text("").unwrap().decision());

        let classifier = Classifier::new(model).tie_break(TieBreak::Always(Class::Negative));
        assert_eq!(
            Some(Class::Negative),
            classifier.classify_text("").unwrap().decision()
        );
    }

    #[test]
    fn test_tie_break_prior() {
        let model = fit(
            [
                ("positive", "up"),
                ("negative", "down"),
                ("negative", "down"),
                ("positive", "up"),
                ("negative", "sideways"),
            ],
            &StopWords::new(),
            Smoothing::Laplace,
        )
        .unwrap();
        let classifier = Classifier::new(model).tie_break(TieBreak::Prior);
        let scores = [
            ClassScore {
                log_likelihood: -1.0,
                log_prior: -0.5,
            },
            ClassScore {
                log_likelihood: -1.0,
                log_prior: -0.5,
            },
        ];
        assert_eq!(Some(Class::Negative), classifier.decide(&scores));
    }

    #[test]
    fn test_tie_break_mirrored_corpus() {
        // Classes use disjoint tokens with identical document frequencies, so every score
        // ties mathematically.
        for k in 1..=10 {
            let mut examples = vec![];
            for i in 0..k {
                let pos: Vec<String> = (0..=i).map(|j| format!("a{:02}", j)).collect();
                let neg: Vec<String> = (0..=i).map(|j| format!("z{:02}", j)).collect();
                examples.push(("positive", pos.join(" ")));
                examples.push(("negative", neg.join(" ")));
            }
            let model = fit(examples, &StopWords::new(), Smoothing::Lidstone(0.3)).unwrap();

            let classifier = Classifier::new(model.clone());
            let s = classifier.classify_text("").unwrap();
            assert_eq!(None, s.decision(), "k={}", k);
            let s = classifier.classify_text("a00 z00").unwrap();
            assert_eq!(None, s.decision(), "k={}", k);

            let classifier = Classifier::new(model).tie_break(TieBreak::Always(Class::Negative));
            let s = classifier.classify_text("").unwrap();
            assert_eq!(Some(Class::Negative), s.decision(), "k={}", k);
        }
    }

    #[test]
    fn test_compare_log_scores() {
        assert_eq!(Some(Class::Positive), compare_log_scores(-1.0, -2.0));
        assert_eq!(Some(Class::Negative), compare_log_scores(-2.0, -1.0));
        assert_eq!(None, compare_log_scores(-1.0, -1.0));
        assert_eq!(None, compare_log_scores(-5.981914466173178, -5.98191446617318));
        assert_eq!(None, compare_log_scores(0.0, 0.0));
    }

    #[test]
    fn test_tie_break_from_str() {
        assert_eq!(TieBreak::Undecided, "undecided".parse().unwrap());
        assert_eq!(TieBreak::Prior, "prior".parse().unwrap());
        assert_eq!(
            TieBreak::Always(Class::Positive),
            "positive".parse().unwrap()
        );
        assert!("coin".parse::<TieBreak>().is_err());
    }
}
