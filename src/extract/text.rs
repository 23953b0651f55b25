//! Transcript normalization and chunk segmentation.

/// Flattens a raw transcript onto one line.
///
/// Newlines become spaces and a single left-to-right pass folds each
/// double space into one. Runs of three or more spaces are only partially
/// collapsed (`"A    B"` becomes `"A  B"`); chunk scoring depends on this
/// exact behavior, so it is not a full whitespace collapse.
pub fn normalize(text: &str) -> String {
    text.replace('\n', " ").replace("  ", " ").trim().to_string()
}

/// Splits a normalized transcript into candidate chunks.
///
/// Boundaries are commas and newlines. Each chunk is normalized again and
/// empty chunks are dropped; order follows the transcript.
pub fn segment(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split([',', '\n'])
        .map(normalize)
        .filter(|chunk| !chunk.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_newline() {
        assert_eq!(normalize("A\nB"), "A B");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize("  Gold Ship 500 \n"), "Gold Ship 500");
    }

    #[test]
    fn test_normalize_single_pass() {
        // Four spaces fold to two, not one
        assert_eq!(normalize("A    B"), "A  B");
        // Three spaces fold to two
        assert_eq!(normalize("A   B"), "A  B");
        assert_eq!(normalize("A  B"), "A B");
    }

    #[test]
    fn test_normalize_newline_then_space() {
        // "\n " becomes a double space which is then folded
        assert_eq!(normalize("A\n B"), "A B");
    }

    #[test]
    fn test_segment_on_commas() {
        let chunks: Vec<String> = segment("Kitasan Black 900, Gold Ship 300").collect();
        assert_eq!(chunks, vec!["Kitasan Black 900", "Gold Ship 300"]);
    }

    #[test]
    fn test_segment_drops_empty_chunks() {
        let chunks: Vec<String> = segment(",, Gold Ship 300 ,\n, ").collect();
        assert_eq!(chunks, vec!["Gold Ship 300"]);
    }

    #[test]
    fn test_segment_splits_grouped_numbers() {
        // Commas inside a score are chunk boundaries too
        let chunks: Vec<String> = segment("12,345 Gold Ship").collect();
        assert_eq!(chunks, vec!["12", "345 Gold Ship"]);
    }

    #[test]
    fn test_segment_empty_transcript() {
        assert_eq!(segment("").count(), 0);
        assert_eq!(segment("   ").count(), 0);
    }
}
