pub mod export;
pub mod summary;

pub use export::{build_export_table, Cell, ExportTable};
pub use summary::{to_report_view, ReportView};
