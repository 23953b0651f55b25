//! Final per-entity average report.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use super::aggregate::Aggregator;

/// One entity line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub entity: String,
    /// Mean score across the images the entity appeared in
    pub average: f64,
    /// Number of images the entity appeared in
    pub count: u64,
    pub total: u128,
    pub min: u64,
    pub max: u64,
}

/// Entities ordered by descending average, ties broken by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Images folded into the aggregate, including ones with no records
    pub total_images: usize,
    pub entities: Vec<ReportRow>,
}

impl Report {
    pub fn from_aggregator(aggregator: &Aggregator) -> Self {
        let mut entities: Vec<ReportRow> = aggregator
            .entries()
            .filter_map(|entry| {
                entry.average().map(|average| ReportRow {
                    entity: entry.entity.clone(),
                    average,
                    count: entry.count,
                    total: entry.total,
                    min: entry.min,
                    max: entry.max,
                })
            })
            .collect();

        entities.sort_by(compare_rows);

        Self {
            total_images: aggregator.image_count(),
            entities,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn compare_rows(a: &ReportRow, b: &ReportRow) -> Ordering {
    b.average
        .total_cmp(&a.average)
        .then_with(|| a.entity.cmp(&b.entity))
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} (photos: {})",
            self.entity, self.average, self.count
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.entities {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
