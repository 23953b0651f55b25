//! Score and identity extraction from OCR transcripts.
//!
//! A transcript is normalized and split into chunks. Each chunk needs a
//! score token and a residual name that resolves against the roster to
//! produce a record; everything else is dropped silently. Records are
//! deduplicated per image, first occurrence wins.

pub mod fuzzy;
pub mod identity;
pub mod record;
pub mod score;
pub mod text;

pub use fuzzy::WeightedRatioMatcher;
pub use identity::{IdentityResolver, MatchPolicy, PolicyPreset};
pub use record::{PerImageResultSet, RecordParser};
pub use score::ScoreExtractor;
