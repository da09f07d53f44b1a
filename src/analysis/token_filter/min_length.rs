use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that drops tokens whose length (in characters) is at most `max_dropped`.
#[derive(Clone, Copy, Debug)]
pub struct MinLengthFilter {
    max_dropped: usize,
}

impl MinLengthFilter {
    /// Drop tokens of `max_dropped` characters or fewer.
    pub fn new(max_dropped: usize) -> Self {
        MinLengthFilter { max_dropped }
    }
}

impl Default for MinLengthFilter {
    /// Drops single-character tokens.
    fn default() -> Self {
        Self::new(1)
    }
}

impl Filter for MinLengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let max_dropped = self.max_dropped;
        Ok(Box::new(
            tokens.filter(move |token| token.char_len() > max_dropped),
        ))
    }

    fn name(&self) -> &'static str {
        "min_length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_drops_single_characters() {
        let tokens = vec![Token::new("đ", 0), Token::new("bò", 1), Token::new("x", 2)];
        let result: Vec<_> = MinLengthFilter::default()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(result, vec!["bò"]);
    }
}
