// src/presentation/summary.rs
use crate::domain::dates::DateRange;
use crate::domain::status::StatusCategory;
use crate::report::{EmptyRangeResult, ReportOutcome, ReportResult};

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub count: usize,
    pub percent: f64,
    pub color_tag: &'static str,
}

impl SummaryRow {
    /// Percent with exactly one decimal, e.g. "50.0".
    pub fn percent_text(&self) -> String {
        format!("{:.1}", self.percent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub title: String,
    pub period: String,
    pub start: String,
    pub end: String,
    pub total: usize,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmptyView {
    pub title: String,
    pub period: String,
    pub unfiltered_total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportView {
    Summary(SummaryView),
    Empty(EmptyView),
}

/// "DD-MM-YYYY to DD-MM-YYYY".
pub fn period_text(range: &DateRange) -> String {
    format!(
        "{} to {}",
        range.start_date.format("%d-%m-%Y"),
        range.end_date.format("%d-%m-%Y")
    )
}

pub fn to_summary_view(title: &str, result: &ReportResult) -> SummaryView {
    let rows = StatusCategory::ALL
        .iter()
        .map(|category| SummaryRow {
            label: category.label(),
            count: result.count(*category),
            percent: result.percentage(*category),
            color_tag: category.color_tag(),
        })
        .collect();

    SummaryView {
        title: title.to_string(),
        period: period_text(&result.range),
        start: result.range.start_date.format("%Y-%m-%d").to_string(),
        end: result.range.end_date.format("%Y-%m-%d").to_string(),
        total: result.total,
        rows,
    }
}

pub fn to_empty_view(title: &str, empty: &EmptyRangeResult) -> EmptyView {
    EmptyView {
        title: title.to_string(),
        period: period_text(&empty.range),
        unfiltered_total: empty.unfiltered_total,
    }
}

pub fn to_report_view(title: &str, outcome: &ReportOutcome) -> ReportView {
    match outcome {
        ReportOutcome::Summary(result) => ReportView::Summary(to_summary_view(title, result)),
        ReportOutcome::Empty(empty) => ReportView::Empty(to_empty_view(title, empty)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::run_report_for;
    use crate::store::RecordStore;
    use crate::tests::fake_api::record;

    #[test]
    fn summary_rows_follow_category_order() {
        let mut store = RecordStore::new();
        store.replace_all(vec![
            record("1", Some("2024-03-01T10:00:00Z"), "Reported"),
            record("2", Some("2024-03-02T00:00:00Z"), "in progress"),
        ]);
        let outcome = run_report_for(&store, "2024-03-01", "2024-03-02").unwrap();

        let ReportView::Summary(view) = to_report_view("Monthly", &outcome) else {
            panic!("expected summary view");
        };

        assert_eq!(view.title, "Monthly");
        assert_eq!(view.period, "01-03-2024 to 02-03-2024");
        assert_eq!(view.total, 2);
        let labels: Vec<_> = view.rows.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Completed", "In-Progress", "Pending", "Canceled"]);
        assert_eq!(view.rows[0].percent_text(), "50.0");
        assert_eq!(view.rows[0].color_tag, "reported");
        assert_eq!(view.rows[3].percent_text(), "0.0");
    }

    #[test]
    fn empty_outcome_maps_to_empty_view() {
        let mut store = RecordStore::new();
        store.replace_all(vec![record("1", Some("2024-03-01"), "pending")]);
        let outcome = run_report_for(&store, "2024-04-01", "2024-04-30").unwrap();

        match to_report_view("April", &outcome) {
            ReportView::Empty(view) => {
                assert_eq!(view.unfiltered_total, 1);
                assert_eq!(view.period, "01-04-2024 to 30-04-2024");
            }
            other => panic!("expected empty view, got {other:?}"),
        }
    }
}
