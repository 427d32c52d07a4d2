#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Pretzel
//!
//! Pretzel is a two-class Naive Bayes text classifier over a Bernoulli (presence/absence)
//! bag-of-words document model.
//!
//! Likelihoods are estimated by relative document frequency. Without smoothing, a token never
//! seen in a class makes the likelihood of that class exactly zero for every document
//! containing it; such documents are reported as [`PretzelError::DegenerateModel`] instead of
//! being silently scored. Pass [`Smoothing::Laplace`] or [`Smoothing::Lidstone`] to avoid it.
//!
//! ## Examples
//!
//! ```
//! use pretzel::{fit, Class, Classifier, PretzelError, Smoothing, StopWords};
//!
//! let corpus = [
//!     ("positive", "this book is awesome"),
//!     ("negative", "harry potter books suck"),
//!     ("negative", "these pretzles are making me thirsty"),
//!     ("negative", "they choppin my fingers off Ira"),
//!     ("positive", "supreme beings of leisure rock"),
//!     ("negative", "cheeto jesus is a tyrant"),
//! ];
//! let stop_words = StopWords::from_text("a this me are of is my these they");
//!
//! let model = fit(corpus, &stop_words, Smoothing::None).unwrap();
//! let classifier = Classifier::new(model);
//! let result = classifier.classify_text("just had my first cheeto ever it was awesome");
//! assert!(matches!(result, Err(PretzelError::DegenerateModel(_))));
//!
//! let model = fit(corpus, &stop_words, Smoothing::Laplace).unwrap();
//! let classifier = Classifier::new(model);
//! let s = classifier
//!     .classify_text("just had my first cheeto ever it was awesome")
//!     .unwrap();
//! assert_eq!(Some(Class::Negative), s.decision());
//! ```
//!
//! Models can be stored with [`Model::write`] and restored with [`Model::read`].

mod classifier;
mod document;
mod model;
mod smoothing;
mod stop_words;
mod trainer;
mod vocabulary;

pub mod errors;

pub use classifier::{ClassScore, Classifier, ScoredDocument, TieBreak};
pub use document::{Class, Document, LabeledDocument};
pub use errors::{PretzelError, Result};
pub use model::{ClassPriors, Model, WordStats};
pub use smoothing::Smoothing;
pub use stop_words::StopWords;
pub use trainer::{fit, Trainer};
pub use vocabulary::Vocabulary;
