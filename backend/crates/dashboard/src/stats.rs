//! Aggregate statistics for the dashboard overview tiles.
//!
//! Always computed from the full record set, never the filtered view, so the
//! tiles stay constant while the admin narrows the list below them.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::record::{Category, FeedbackRecord};

/// Counts shown in the overview tiles and the category breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// Every stored record.
    pub total: usize,
    /// Records created on the current calendar day (UTC).
    pub today: usize,
    /// Records created within the trailing seven days, inclusive of today.
    pub last_week: usize,
    /// Per-category counts; categories with no records are absent.
    pub by_category: BTreeMap<Category, usize>,
}

impl DashboardStats {
    /// Compute statistics against the supplied clock reading.
    ///
    /// `now` is a parameter rather than an ambient read so the boundaries
    /// are deterministic under test.
    pub fn compute(records: &[FeedbackRecord], now: DateTime<Utc>) -> Self {
        let day_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let week_start = day_start - Duration::days(7);

        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            *stats
                .by_category
                .entry(record.category_or_default())
                .or_insert(0) += 1;
            if record.created_at >= day_start {
                stats.today += 1;
            }
            if record.created_at >= week_start {
                stats.last_week += 1;
            }
        }
        stats
    }

    /// Count for one category, zero when absent.
    pub fn category_count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}
