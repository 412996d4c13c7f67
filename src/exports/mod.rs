pub mod pdf;
pub mod xlsx;

use thiserror::Error;

pub use pdf::export_table_pdf;
pub use xlsx::export_table_xlsx;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Spreadsheet error: {0}")]
    Xlsx(String),
}
