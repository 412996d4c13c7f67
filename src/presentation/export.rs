// src/presentation/export.rs
use crate::domain::dates::{format_display_date, DateRange};
use crate::domain::record::Record;
use crate::report::filter_by_range;
use crate::store::RecordStore;

pub const EXPORT_HEADERS: [&str; 8] = [
    "Applicant Name",
    "Branch",
    "Location",
    "Collateral Type",
    "Qty",
    "Req Date",
    "Report Date",
    "Status",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(u32),
}

impl Cell {
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

/// Row-oriented table handed to the document sinks.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub title: String,
    pub range: DateRange,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ExportTable {
    /// `{title}_{start}` with characters unsafe in file names replaced.
    pub fn file_stem(&self) -> String {
        let title: String = self
            .title
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let title = if title.is_empty() { "report".to_string() } else { title };
        format!("{}_{}", title, self.range.start_date.format("%Y-%m-%d"))
    }
}

fn export_row(record: &Record) -> Vec<Cell> {
    vec![
        Cell::Text(record.applicant_name.clone()),
        Cell::Text(record.branch.clone()),
        Cell::Text(record.site_location.clone()),
        Cell::Text(record.collateral_type.clone()),
        Cell::Number(record.number_of_collaterals),
        Cell::Text(format_display_date(record.date_of_request.as_deref())),
        Cell::Text(format_display_date(record.date_of_report.as_deref())),
        Cell::Text(record.report_status.clone()),
    ]
}

/// Project the records in `range` using the same filter as the summary.
pub fn build_export_table(store: &RecordStore, range: DateRange, title: &str) -> ExportTable {
    let rows = filter_by_range(store.records(), &range)
        .into_iter()
        .map(export_row)
        .collect();

    ExportTable {
        title: title.to_string(),
        range,
        header: EXPORT_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}
