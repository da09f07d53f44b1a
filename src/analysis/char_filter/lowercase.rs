use super::CharFilter;

/// A char filter that lowercases the whole input.
///
/// Lowercasing happens before any pattern stripping so that case-sensitive
/// patterns such as the URL matcher see canonical text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_vietnamese() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("Món Phở Bò RẤT NGON"), "món phở bò rất ngon");
    }

    #[test]
    fn test_lowercase_ascii() {
        assert_eq!(LowercaseCharFilter.filter("HTTP://X.COM"), "http://x.com");
    }
}
