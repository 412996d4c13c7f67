// responses/file.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Return a generated document as a download
pub fn attachment_response(buffer: Vec<u8>, content_type: &str, filename: &str) -> ResultResp {
    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(buffer))
        .map_err(|_| ServerError::InternalError)?; // Convert any builder error

    Ok(resp)
}

pub fn pdf_response(buffer: Vec<u8>, filename: &str) -> ResultResp {
    attachment_response(buffer, mime::APPLICATION_PDF.as_ref(), filename)
}

pub fn xlsx_response(buffer: Vec<u8>, filename: &str) -> ResultResp {
    attachment_response(buffer, XLSX_CONTENT_TYPE, filename)
}
