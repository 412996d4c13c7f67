use crate::exports::ExportError;
use crate::presentation::{Cell, ExportTable};
use rust_xlsxwriter::{Format, Workbook};

pub fn export_table_xlsx(table: &ExportTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    worksheet
        .set_name("Report")
        .map_err(|e| ExportError::Xlsx(format!("Failed to name worksheet: {}", e)))?;

    // Headers
    for (col, header) in table.header.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &bold)
            .map_err(|e| {
                ExportError::Xlsx(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows
    for (i, row) in table.rows.iter().enumerate() {
        let r = (i + 1) as u32;

        for (col, cell) in row.iter().enumerate() {
            let c = col as u16;
            match cell {
                Cell::Text(s) => worksheet.write_string(r, c, s),
                Cell::Number(n) => worksheet.write_number(r, c, *n as f64),
            }
            .map_err(|e| {
                ExportError::Xlsx(format!("Failed to write row {} column {}: {}", r, c, e))
            })?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ExportError::Xlsx(format!("Failed to save workbook: {}", e)))
}
