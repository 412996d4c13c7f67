mod auth_flow_tests;
mod record_tests;
mod report_tests;
