// src/report.rs
use std::collections::BTreeMap;

use crate::domain::dates::{parse_record_instant, to_range_utc, DateError, DateRange};
use crate::domain::record::Record;
use crate::domain::status::StatusCategory;
use crate::store::RecordStore;

/// Per-category tallies for the records inside a range.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportResult {
    pub range: DateRange,
    pub total: usize,
    pub counts: BTreeMap<StatusCategory, usize>,
    pub percentages: BTreeMap<StatusCategory, f64>,
}

/// Nothing in range. Carries the unfiltered size for the "no data" view.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyRangeResult {
    pub range: DateRange,
    pub unfiltered_total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Summary(ReportResult),
    Empty(EmptyRangeResult),
}

impl ReportResult {
    pub fn count(&self, category: StatusCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn percentage(&self, category: StatusCategory) -> f64 {
        self.percentages.get(&category).copied().unwrap_or(0.0)
    }
}

/// Whether a record was requested inside `range`. Absent or unparseable
/// request dates never match.
pub fn in_range(record: &Record, range: &DateRange) -> bool {
    record
        .date_of_request
        .as_deref()
        .and_then(parse_record_instant)
        .is_some_and(|t| range.contains(&t))
}

/// The one date filter shared by the summary and every export.
pub fn filter_by_range<'a>(records: &'a [Record], range: &DateRange) -> Vec<&'a Record> {
    records.iter().filter(|r| in_range(r, range)).collect()
}

/// Count records per category; every category is present, possibly zero.
pub fn tally<'a>(records: impl IntoIterator<Item = &'a Record>) -> BTreeMap<StatusCategory, usize> {
    let mut counts: BTreeMap<StatusCategory, usize> =
        StatusCategory::ALL.iter().map(|c| (*c, 0)).collect();

    for record in records {
        *counts.entry(record.category()).or_insert(0) += 1;
    }

    counts
}

/// `count / total * 100`, rounded to one decimal place. Zero total gives 0.0.
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

pub fn run_report(store: &RecordStore, range: DateRange) -> ReportOutcome {
    let filtered = filter_by_range(store.records(), &range);

    if filtered.is_empty() {
        log::debug!(
            "no records between {} and {} ({} on file)",
            range.start_date,
            range.end_date,
            store.len()
        );
        return ReportOutcome::Empty(EmptyRangeResult {
            range,
            unfiltered_total: store.len(),
        });
    }

    let total = filtered.len();
    let counts = tally(filtered);
    let percentages = counts
        .iter()
        .map(|(category, count)| (*category, percent(*count, total)))
        .collect();

    log::debug!(
        "report {}..{}: {} records",
        range.start_date,
        range.end_date,
        total
    );

    ReportOutcome::Summary(ReportResult {
        range,
        total,
        counts,
        percentages,
    })
}

/// Parse the boundaries and run. Invalid boundaries abort with no report.
pub fn run_report_for(store: &RecordStore, start: &str, end: &str) -> Result<ReportOutcome, DateError> {
    let range = to_range_utc(start, end)?;
    Ok(run_report(store, range))
}
