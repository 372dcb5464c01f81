//! Text helpers for tokens whose text covers whole or several lines.

/// Returns `true` if `line` ends with whitespace.
#[must_use]
pub fn has_trailing_whitespace(line: &str) -> bool {
    line.len() != line.trim_end().len()
}

/// Width of `line` in characters.
#[must_use]
pub fn width(line: &str) -> usize {
    line.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_whitespace_detection() {
        assert!(has_trailing_whitespace("// comment   "));
        assert!(has_trailing_whitespace("x\t"));
        assert!(!has_trailing_whitespace("// comment"));
        assert!(!has_trailing_whitespace(""));
    }

    #[test]
    fn width_counts_characters() {
        assert_eq!(width("äöü"), 3);
    }
}
