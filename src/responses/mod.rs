pub mod file;
pub mod html;

pub use crate::errors::ResultResp;

pub use file::{pdf_response, xlsx_response};
pub use html::{html_response, html_with_status, redirect, redirect_with_cookie};
