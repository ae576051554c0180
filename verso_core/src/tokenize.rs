//! Whitespace tokenization for extracted document text.
//!
//! Text coming out of PDF extractors is ragged: runs of spaces, hard line
//! breaks and tabs all separate words. Every run of Unicode whitespace counts
//! as one delimiter and leading or trailing whitespace produces no tokens.

/// Split `text` into words.
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Number of words in `text` without allocating the token list.
#[must_use]
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse every whitespace run to a single space and trim both ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    join_tokens(text.split_whitespace())
}

/// Join tokens with single spaces.
pub fn join_tokens<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = String::new();
    for token in tokens {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(token);
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_whitespace_is_one_delimiter() {
        let text = "  The\tquick\n\nbrown   fox \r\n";
        assert_eq!(tokenize(text), vec!["The", "quick", "brown", "fox"]);
        assert_eq!(token_count(text), 4);
        assert_eq!(normalize_whitespace(text), "The quick brown fox");
    }

    #[test]
    fn empty_and_blank_inputs_have_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn unicode_whitespace_splits() {
        let text = "gro\u{df}e\u{3000}Stra\u{df}e\u{a0}hier";
        assert_eq!(tokenize(text), vec!["gro\u{df}e", "Stra\u{df}e", "hier"]);
    }

    #[test]
    fn join_tokens_uses_single_spaces() {
        assert_eq!(join_tokens(["a", "b", "c"]), "a b c");
        assert_eq!(join_tokens(Vec::<&str>::new()), "");
    }
}
