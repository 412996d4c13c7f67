use crate::errors::ServerError;
use crate::responses::file::XLSX_CONTENT_TYPE;
use crate::router::{handle, AppState};
use crate::tests::fake_api::{record, FakeApi};
use crate::tests::utils::{body_bytes, body_text, expect_err, get, header, post, sign_in, test_state};
use std::sync::Arc;

fn march_state() -> (AppState, Arc<FakeApi>) {
    test_state(vec![
        record("1", Some("2024-03-01T10:00:00Z"), "Reported"),
        record("2", Some("2024-03-02T00:00:00Z"), "in progress"),
        record("3", Some("2024-04-01"), "pending"),
    ])
}

#[test]
fn reports_page_without_range_shows_form_only() {
    let (state, api) = march_state();
    let cookie = sign_in(&state);

    let resp = handle(get("/reports", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("Run report"));
    assert!(!body.contains("Total Requests"));
    assert_eq!(api.list_calls(), 0);
}

#[test]
fn report_summarises_requested_period() {
    let (state, _api) = march_state();
    let cookie = sign_in(&state);

    let resp = handle(
        get("/reports?start=2024-03-01&end=2024-03-31&title=March", Some(&cookie)),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("Period: 01-03-2024 to 31-03-2024"));
    assert!(body.contains("Total Requests:</b> 2"));
    assert!(body.contains("Completed:</b> 1 (50.0%)"));
    assert!(body.contains("In-Progress:</b> 1 (50.0%)"));
    assert!(body.contains("Pending:</b> 0 (0.0%)"));
    assert!(body.contains("/reports/export.pdf?start=2024-03-01&amp;end=2024-03-31&amp;title=March"));
}

#[test]
fn empty_period_reports_no_data() {
    let (state, _api) = march_state();
    let cookie = sign_in(&state);

    let resp = handle(
        get("/reports?start=2023-01-01&end=2023-01-31", Some(&cookie)),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("No records were requested in this period"));
    assert!(body.contains("3 records are on file"));
    assert!(!body.contains("DOWNLOAD PDF"));
}

#[test]
fn reversed_period_is_rejected() {
    let (state, _api) = march_state();
    let cookie = sign_in(&state);

    let resp = handle(
        get("/reports?start=2024-03-31&end=2024-03-01", Some(&cookie)),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 400);
    assert!(body_text(resp).contains("is after end date"));
}

#[test]
fn missing_boundary_is_rejected() {
    let (state, _api) = march_state();
    let cookie = sign_in(&state);

    let resp = handle(get("/reports?start=2024-03-01", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 400);
    assert!(body_text(resp).contains("both start and end"));
}

#[test]
fn report_sees_records_saved_just_before() {
    let (state, api) = test_state(vec![]);
    let cookie = sign_in(&state);
    handle(get("/dashboard", Some(&cookie)), &state).unwrap();

    let form = "applicantName=Hana&branch=Adama&siteLocation=Adama\
&collateralType=Vehicle&numberOfCollaterals=1&dateOfRequest=2024-03-05&reportStatus=canceled";
    let resp = handle(post("/records", Some(&cookie), form), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(api.stored().len(), 1);

    let body = body_text(
        handle(
            get("/reports?start=2024-03-01&end=2024-03-31", Some(&cookie)),
            &state,
        )
        .unwrap(),
    );
    assert!(body.contains("Total Requests:</b> 1"));
    assert!(body.contains("Canceled:</b> 1 (100.0%)"));
}

#[test]
fn pdf_export_downloads_filtered_table() {
    let (state, _api) = march_state();
    let cookie = sign_in(&state);

    let resp = handle(
        get(
            "/reports/export.pdf?start=2024-03-01&end=2024-03-31&title=March",
            Some(&cookie),
        ),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "Content-Type"), "application/pdf");
    assert!(header(&resp, "Content-Disposition").contains("March_2024-03-01.pdf"));
    assert!(body_bytes(resp).starts_with(b"%PDF"));
}

#[test]
fn xlsx_export_downloads_workbook() {
    let (state, _api) = march_state();
    let cookie = sign_in(&state);

    let resp = handle(
        get(
            "/reports/export.xlsx?start=2024-03-01&end=2024-03-31&title=March",
            Some(&cookie),
        ),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "Content-Type"), XLSX_CONTENT_TYPE);
    assert!(header(&resp, "Content-Disposition").contains("March_2024-03-01.xlsx"));
    assert!(body_bytes(resp).starts_with(b"PK"));
}

#[test]
fn export_without_dates_is_bad_request() {
    let (state, _api) = march_state();
    let cookie = sign_in(&state);

    let err = expect_err(handle(get("/reports/export.pdf?end=2024-03-31", Some(&cookie)), &state));
    assert!(matches!(err, ServerError::BadRequest(_)));

    let err = expect_err(handle(
        get("/reports/export.xlsx?start=2024-03-01&end=2024-02-01", Some(&cookie)),
        &state,
    ));
    assert!(matches!(err, ServerError::InvalidDate(_)));
}
