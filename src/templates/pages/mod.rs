pub mod dashboard;
pub mod login;
pub mod record_form;
pub mod reports;

pub use dashboard::{dashboard_page, DashboardVm};
pub use login::login_page;
pub use record_form::{record_form_page, RecordFormVm};
pub use reports::{reports_page, ReportsVm};
