use unicode_segmentation::UnicodeSegmentation;

use crate::StringFilter;

/// Punctuation remover.
///
/// Keeps only the words found by the Unicode word boundary rules (UAX #29) and joins them with
/// single spaces. Apostrophes and periods inside words, as in `don't` or `e.g`, are kept.
#[derive(Clone, Copy, Default)]
pub struct PunctuationFilter;

impl<S> StringFilter<S> for PunctuationFilter
where
    S: AsRef<str>,
{
    fn filter(&self, string: S) -> String {
        let mut result = String::with_capacity(string.as_ref().len());
        for word in string.as_ref().unicode_words() {
            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(word);
        }
        result
    }
}
