//! Fuzzy string similarity on a 0–100 scale.
//!
//! Scores are built on `strsim::normalized_levenshtein` over case-folded text.
//! [`WeightedRatioMatcher`] combines a plain ratio, a token-sorted ratio and a
//! best-window partial ratio, which tolerates the dropped or swapped
//! characters OCR tends to produce.

/// Best roster candidate for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Roster entry that scored highest
    pub candidate: String,
    /// Similarity in [0, 100]
    pub confidence: f64,
}

/// Similarity scoring used by identity resolution.
pub trait FuzzyMatcher: Sync {
    /// Returns the highest scoring candidate, or `None` if `candidates` is empty.
    fn best_match(&self, query: &str, candidates: &[String]) -> Option<FuzzyMatch>;

    /// Similarity of the shorter string against its best aligned window in the longer one.
    fn partial_ratio(&self, a: &str, b: &str) -> f64;
}

/// Length ratio above which partial alignment counts toward the weighted score.
const PARTIAL_LENGTH_RATIO: f64 = 1.5;
const PARTIAL_SCALE: f64 = 0.9;
/// From this length ratio on, partial alignment is discounted harder.
const LONG_PARTIAL_LENGTH_RATIO: f64 = 8.0;
const LONG_PARTIAL_SCALE: f64 = 0.6;
const TOKEN_SORT_SCALE: f64 = 0.95;

/// Default matcher: weighted maximum of ratio, token-sort ratio and partial ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatioMatcher;

impl WeightedRatioMatcher {
    pub fn score(&self, query: &str, candidate: &str) -> f64 {
        let a = query.to_lowercase();
        let b = candidate.to_lowercase();
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let mut best = ratio(&a, &b);
        best = best.max(token_sort_ratio(&a, &b) * TOKEN_SORT_SCALE);

        let len_a = a.chars().count() as f64;
        let len_b = b.chars().count() as f64;
        let length_ratio = len_a.max(len_b) / len_a.min(len_b);
        if length_ratio >= PARTIAL_LENGTH_RATIO {
            let scale = if length_ratio >= LONG_PARTIAL_LENGTH_RATIO {
                LONG_PARTIAL_SCALE
            } else {
                PARTIAL_SCALE
            };
            best = best.max(partial_ratio(&a, &b) * scale);
        }

        best
    }
}

impl FuzzyMatcher for WeightedRatioMatcher {
    fn best_match(&self, query: &str, candidates: &[String]) -> Option<FuzzyMatch> {
        let mut best: Option<FuzzyMatch> = None;
        for candidate in candidates {
            let confidence = self.score(query, candidate);
            // Strictly greater keeps the earliest candidate on ties
            if best.as_ref().is_none_or(|b| confidence > b.confidence) {
                best = Some(FuzzyMatch {
                    candidate: candidate.clone(),
                    confidence,
                });
            }
        }
        best
    }

    fn partial_ratio(&self, a: &str, b: &str) -> f64 {
        partial_ratio(&a.to_lowercase(), &b.to_lowercase())
    }
}

/// Normalized Levenshtein similarity scaled to [0, 100].
fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    let mut best: f64 = 0.0;
    for window in long_chars.windows(short_len) {
        let window: String = window.iter().collect();
        best = best.max(ratio(short, &window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        vec!["Kitasan Black".to_string(), "Gold Ship".to_string()]
    }

    #[test]
    fn test_exact_match_scores_100() {
        let m = WeightedRatioMatcher.best_match("Gold Ship", &roster()).unwrap();
        assert_eq!(m.candidate, "Gold Ship");
        assert!((m.confidence - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_case_insensitive() {
        let score = WeightedRatioMatcher.score("GOLD SHIP", "Gold Ship");
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_typo_scores_high() {
        let m = WeightedRatioMatcher.best_match("Kitasan Blck", &roster()).unwrap();
        assert_eq!(m.candidate, "Kitasan Black");
        assert!(m.confidence > 90.0, "confidence was {}", m.confidence);
    }

    #[test]
    fn test_garbage_scores_low() {
        let m = WeightedRatioMatcher.best_match("zzz", &roster()).unwrap();
        assert!(m.confidence < 10.0, "confidence was {}", m.confidence);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(WeightedRatioMatcher.best_match("Gold Ship", &[]).is_none());
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let candidates = vec!["Vodka".to_string(), "Vodka".to_string()];
        let m = WeightedRatioMatcher.best_match("Vodka", &candidates).unwrap();
        assert_eq!(m.candidate, "Vodka");

        let candidates = vec!["abcx".to_string(), "abcy".to_string()];
        let m = WeightedRatioMatcher.best_match("abcz", &candidates).unwrap();
        assert_eq!(m.candidate, "abcx");
    }

    #[test]
    fn test_token_order_tolerated() {
        let score = WeightedRatioMatcher.score("Ship Gold", "Gold Ship");
        assert!((score - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_ratio_substring() {
        let score = WeightedRatioMatcher.partial_ratio("Gold", "Gold Ship");
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_used_for_uneven_lengths() {
        // "Ship" is fully contained: partial 100 scaled to 90
        let score = WeightedRatioMatcher.score("Ship", "Gold Ship");
        assert!((score - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_fragment_discounted_against_long_name() {
        // 1 char vs 12 chars: a full partial hit only counts 60
        let score = WeightedRatioMatcher.score("e", "Special Week");
        assert!((score - 60.0).abs() < 1e-9, "score was {}", score);

        // 2 chars vs 9 chars stays below 8x and keeps the 0.9 scale
        let score = WeightedRatioMatcher.score("ur", "Oguri Cap");
        assert!((score - 90.0).abs() < 1e-9, "score was {}", score);
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert_eq!(WeightedRatioMatcher.partial_ratio("", "Gold Ship"), 0.0);
    }
}
