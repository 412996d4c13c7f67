use crate::domain::status::classify;
use maud::{html, Markup};

pub mod error;

pub use error::html_error_response;

/// Status badge coloured by category, labelled with the raw text.
pub fn status_pill(raw_status: &str) -> Markup {
    let category = classify(Some(raw_status));
    html! {
        span class=(format!("pill {}", category.color_tag())) title=(category.label()) { (raw_status) }
    }
}

pub fn flash(message: Option<&str>) -> Markup {
    html! {
        @if let Some(msg) = message {
            div class="flash" role="alert" { (msg) }
        }
    }
}
