pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{flash, html_error_response, status_pill};
pub use layouts::desktop::desktop_layout;
