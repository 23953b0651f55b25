//! Per-image record extraction: chunk parsing and duplicate suppression.

use indexmap::IndexMap;
use indexmap::map::Entry;

use super::identity::IdentityResolver;
use super::score::{residual_text, ScoreExtractor};
use super::text::{normalize, segment};

/// A chunk that yielded both a score and an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecord {
    pub entity: String,
    pub score: u64,
}

impl ResolvedRecord {
    pub fn new(entity: impl Into<String>, score: u64) -> Self {
        Self {
            entity: entity.into(),
            score,
        }
    }
}

/// Records for one image, at most one per entity, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerImageResultSet {
    records: IndexMap<String, u64>,
}

impl PerImageResultSet {
    /// Inserts a record unless the entity is already present.
    ///
    /// Returns false when the record was discarded as a duplicate.
    pub fn insert(&mut self, record: ResolvedRecord) -> bool {
        match self.records.entry(record.entity) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record.score);
                true
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, entity: &str) -> Option<u64> {
        self.records.get(entity).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.records.iter().map(|(entity, score)| (entity.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Keeps the first record per entity in scan order.
pub fn dedup_records<I>(records: I) -> PerImageResultSet
where
    I: IntoIterator<Item = ResolvedRecord>,
{
    let mut set = PerImageResultSet::default();
    for record in records {
        set.insert(record);
    }
    set
}

/// Turns one transcript into resolved records.
pub struct RecordParser<'a> {
    scores: &'a ScoreExtractor,
    resolver: IdentityResolver<'a>,
}

impl<'a> RecordParser<'a> {
    pub fn new(scores: &'a ScoreExtractor, resolver: IdentityResolver<'a>) -> Self {
        Self { scores, resolver }
    }

    /// Parses a single chunk. Chunks without a score or identity yield `None`.
    pub fn parse_chunk(&self, chunk: &str) -> Option<ResolvedRecord> {
        let token = self.scores.extract(chunk)?;
        let residual = residual_text(chunk, &token);
        if residual.is_empty() {
            return None;
        }
        let entity = self.resolver.resolve(&residual)?;
        Some(ResolvedRecord::new(entity, token.value))
    }

    /// Normalizes, segments and parses a raw transcript into a deduplicated set.
    pub fn parse_transcript(&self, transcript: &str) -> PerImageResultSet {
        let text = normalize(transcript);
        dedup_records(segment(&text).filter_map(|chunk| self.parse_chunk(&chunk)))
    }
}
