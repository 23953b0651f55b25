//! Cross-image accumulation of per-entity sums and counts.

use std::collections::HashMap;

use crate::extract::PerImageResultSet;

/// Running totals for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateEntry {
    pub entity: String,
    /// Sum of scores; wider than a score so repeated maximal scores cannot overflow
    pub total: u128,
    pub count: u64,
    pub min: u64,
    pub max: u64,
}

impl AggregateEntry {
    fn new(entity: &str, score: u64) -> Self {
        Self {
            entity: entity.to_string(),
            total: score as u128,
            count: 1,
            min: score,
            max: score,
        }
    }

    fn observe(&mut self, score: u64) {
        self.total += score as u128;
        self.count += 1;
        self.min = self.min.min(score);
        self.max = self.max.max(score);
    }

    fn absorb(&mut self, other: &AggregateEntry) {
        self.total += other.total;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Mean score, defined only once the entity has been observed.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total as f64 / self.count as f64)
        }
    }
}

/// Per-entity totals for one batch run.
///
/// Each image contributes at most one observation per entity; that is
/// guaranteed by [`PerImageResultSet`], not re-checked here.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    entries: HashMap<String, AggregateEntry>,
    images: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every record of one image.
    pub fn add_image(&mut self, results: &PerImageResultSet) {
        self.images += 1;
        for (entity, score) in results.iter() {
            match self.entries.get_mut(entity) {
                Some(entry) => entry.observe(score),
                None => {
                    self.entries
                        .insert(entity.to_string(), AggregateEntry::new(entity, score));
                }
            }
        }
    }

    /// Folds partial totals from another aggregator into this one.
    pub fn merge(&mut self, other: Aggregator) {
        self.images += other.images;
        for (entity, partial) in other.entries {
            match self.entries.get_mut(&entity) {
                Some(entry) => entry.absorb(&partial),
                None => {
                    self.entries.insert(entity, partial);
                }
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, entity: &str) -> Option<&AggregateEntry> {
        self.entries.get(entity)
    }

    pub fn entries(&self) -> impl Iterator<Item = &AggregateEntry> {
        self.entries.values()
    }

    /// Number of images folded in, including images with no records.
    pub fn image_count(&self) -> usize {
        self.images
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
