use crate::StringFilter;

/// Unicode lowercase filter.
#[derive(Clone, Copy, Default)]
pub struct LowercaseFilter;

impl<S> StringFilter<S> for LowercaseFilter
where
    S: AsRef<str>,
{
    fn filter(&self, string: S) -> String {
        string.as_ref().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_ascii() {
        assert_eq!("cheeto jesus", LowercaseFilter.filter("Cheeto JESUS"));
    }

    #[test]
    fn test_lowercase_non_ascii() {
        assert_eq!("ärger über öl", LowercaseFilter.filter("ÄRGER Über Öl"));
    }

    #[test]
    fn test_lowercase_keeps_whitespace() {
        assert_eq!("a\tb  c\n", LowercaseFilter.filter(String::from("A\tB  C\n")));
    }
}
