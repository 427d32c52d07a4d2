//! Filters for [`String`].

mod lowercase;
mod punctuation;

pub use lowercase::LowercaseFilter;
pub use punctuation::PunctuationFilter;
