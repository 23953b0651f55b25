use anyhow::Result;
use regex::Regex;

/// Pattern to match score-like tokens, tried left to right:
/// - Thousands-grouped numbers: 12,345 or 1 234 567 (comma or space separators)
/// - Bare numbers of up to five digits: 999 or 12345
///
/// At any position the grouped form wins over the bare form.
const SCORE_PATTERN: &str = r"\d{1,3}(?:[,\s]\d{3})+|\d{1,5}";

/// A score found inside a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreToken {
    /// Text exactly as it appeared in the chunk, separators included
    pub raw: String,
    /// Parsed value with separators stripped
    pub value: u64,
}

/// Finds and parses the first score token in a chunk.
#[derive(Debug, Clone)]
pub struct ScoreExtractor {
    regex: Regex,
}

impl ScoreExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            regex: Regex::new(SCORE_PATTERN)?,
        })
    }

    /// Returns the leftmost score token, or `None` when the chunk has no
    /// match or the match does not parse as an integer.
    pub fn extract(&self, chunk: &str) -> Option<ScoreToken> {
        let found = self.regex.find(chunk)?;
        let raw = found.as_str();
        let value = parse_score(raw)?;
        Some(ScoreToken {
            raw: raw.to_string(),
            value,
        })
    }
}

/// Strips grouping separators and parses the remaining digits.
///
/// `\d` matches any Unicode decimal digit, but only ASCII digits parse;
/// anything else (or an overflowing value) yields `None`.
pub fn parse_score(raw: &str) -> Option<u64> {
    let digits: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    digits.parse::<u64>().ok()
}

/// Removes every occurrence of the score text from the chunk and trims the rest.
pub fn residual_text(chunk: &str, token: &ScoreToken) -> String {
    chunk.replace(&token.raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ScoreExtractor {
        ScoreExtractor::new().unwrap()
    }

    #[test]
    fn test_grouped_score() {
        let token = extractor().extract("12,345 Entity").unwrap();
        assert_eq!(token.raw, "12,345");
        assert_eq!(token.value, 12345);
        assert_eq!(residual_text("12,345 Entity", &token), "Entity");
    }

    #[test]
    fn test_bare_score() {
        let token = extractor().extract("999 Entity").unwrap();
        assert_eq!(token.value, 999);
        assert_eq!(residual_text("999 Entity", &token), "Entity");
    }

    #[test]
    fn test_no_score() {
        assert!(extractor().extract("abc").is_none());
        assert!(extractor().extract("").is_none());
    }

    #[test]
    fn test_space_grouped_score() {
        let token = extractor().extract("Gold Ship 1 234 567").unwrap();
        assert_eq!(token.raw, "1 234 567");
        assert_eq!(token.value, 1234567);
        assert_eq!(residual_text("Gold Ship 1 234 567", &token), "Gold Ship");
    }

    #[test]
    fn test_leftmost_match_wins() {
        let token = extractor().extract("Rice 42 Shower 1,000").unwrap();
        assert_eq!(token.value, 42);
    }

    #[test]
    fn test_bare_run_capped_at_five_digits() {
        // Six digits without a separator: the first five are taken
        let token = extractor().extract("123456").unwrap();
        assert_eq!(token.raw, "12345");
        assert_eq!(token.value, 12345);
    }

    #[test]
    fn test_incomplete_group_falls_back_to_bare() {
        // "1,23" is not a full three-digit group
        let token = extractor().extract("1,23 Vodka").unwrap();
        assert_eq!(token.raw, "1");
        assert_eq!(token.value, 1);
    }

    #[test]
    fn test_non_ascii_digits_skip_chunk() {
        // Fullwidth digits match \d but do not parse
        assert!(extractor().extract("\u{FF11}\u{FF12}\u{FF13} Vodka").is_none());
    }

    #[test]
    fn test_residual_removes_all_occurrences() {
        let token = ScoreToken {
            raw: "5".to_string(),
            value: 5,
        };
        assert_eq!(residual_text("5 Vodka 5", &token), "Vodka");
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("12,345"), Some(12345));
        assert_eq!(parse_score("1 234"), Some(1234));
        assert_eq!(parse_score("00042"), Some(42));
        assert_eq!(parse_score(""), None);
    }
}
