use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::fake_api::record;
use crate::tests::utils::{body_text, expect_err, get, header, post, sign_in, test_state};

const NEW_RECORD: &str = "applicantName=Hana+Girma&branch=Adama&siteLocation=Adama+Town\
&collateralType=Vehicle&numberOfCollaterals=2&dateOfRequest=2024-03-05&reportStatus=";

#[test]
fn dashboard_lists_records_with_counters() {
    let (state, api) = test_state(vec![
        record("1", Some("2024-03-01T10:00:00Z"), "Reported"),
        record("2", Some("2024-03-02"), "in progress"),
        record("3", Some("2024-03-03"), "pending"),
    ]);
    let cookie = sign_in(&state);

    let resp = handle(get("/dashboard", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_text(resp);

    assert!(body.contains("Applicant 1"));
    assert!(body.contains("01-03-2024"));
    assert!(body.contains("id=\"count-total\"><b>3</b>"));
    assert!(body.contains("id=\"count-reported\"><b>1</b>"));
    assert!(body.contains("pill in-progress"));
    assert_eq!(api.list_calls(), 1);
}

#[test]
fn create_record_writes_through_and_redirects() {
    let (state, api) = test_state(vec![]);
    let cookie = sign_in(&state);

    let resp = handle(post("/records", Some(&cookie), NEW_RECORD), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/dashboard");

    let stored = api.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].applicant_name, "Hana Girma");
    assert_eq!(stored[0].number_of_collaterals, 2);
    assert_eq!(stored[0].report_status, "pending");
}

#[test]
fn incomplete_record_rerenders_form() {
    let (state, api) = test_state(vec![]);
    let cookie = sign_in(&state);

    let form = "applicantName=Hana&branch=&siteLocation=Adama&collateralType=Vehicle";
    let resp = handle(post("/records", Some(&cookie), form), &state).unwrap();
    assert_eq!(resp.status(), 400);

    let body = body_text(resp);
    assert!(body.contains("Branch is required"));
    assert!(body.contains("Date of request is required"));
    assert!(body.contains("value=\"Hana\""));
    assert!(api.stored().is_empty());
}

#[test]
fn edit_form_is_prefilled() {
    let (state, _api) = test_state(vec![record("1", Some("2024-03-01T10:00:00Z"), "Reported")]);
    let cookie = sign_in(&state);

    let resp = handle(get("/records/1/edit", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("Edit Record"));
    assert!(body.contains("value=\"Applicant 1\""));
    assert!(body.contains("value=\"2024-03-01\""));
    assert!(body.contains("action=\"/records/1\""));
}

#[test]
fn update_record_changes_remote_status() {
    let (state, api) = test_state(vec![record("1", Some("2024-03-01"), "pending")]);
    let cookie = sign_in(&state);

    let form = "applicantName=Applicant+1&branch=Bole&siteLocation=Addis+Ababa\
&collateralType=Building&numberOfCollaterals=1&dateOfRequest=2024-03-01\
&dateOfReport=2024-03-10&engineerName=Dawit&reportStatus=reported";
    let resp = handle(post("/records/1", Some(&cookie), form), &state).unwrap();
    assert_eq!(resp.status(), 303);

    let stored = api.stored();
    assert_eq!(stored[0].report_status, "reported");
    assert_eq!(stored[0].engineer_name.as_deref(), Some("Dawit"));
    assert_eq!(stored[0].date_of_report.as_deref(), Some("2024-03-10"));
}

#[test]
fn delete_record_removes_it() {
    let (state, api) = test_state(vec![
        record("1", Some("2024-03-01"), "pending"),
        record("2", Some("2024-03-02"), "pending"),
    ]);
    let cookie = sign_in(&state);

    let resp = handle(post("/records/1/delete", Some(&cookie), ""), &state).unwrap();
    assert_eq!(resp.status(), 303);

    let ids: Vec<String> = api.stored().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["2".to_string()]);
}

#[test]
fn unknown_record_is_not_found() {
    let (state, _api) = test_state(vec![record("1", None, "pending")]);
    let cookie = sign_in(&state);

    let err = expect_err(handle(post("/records/missing/delete", Some(&cookie), ""), &state));
    assert!(matches!(err, ServerError::NotFound));

    let err = expect_err(handle(get("/records/missing/edit", Some(&cookie)), &state));
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn remote_failure_changes_nothing() {
    let (state, api) = test_state(vec![]);
    let cookie = sign_in(&state);

    api.fail_next_call();
    let err = expect_err(handle(post("/records", Some(&cookie), NEW_RECORD), &state));

    assert!(matches!(err, ServerError::RemoteUnavailable(_)));
    assert_eq!(err.status(), 502);
    assert!(api.stored().is_empty());
}

#[test]
fn saved_record_survives_a_failed_refresh() {
    let (state, api) = test_state(vec![]);
    let cookie = sign_in(&state);
    handle(get("/dashboard", Some(&cookie)), &state).unwrap();

    api.fail_listing(true);
    let resp = handle(post("/records", Some(&cookie), NEW_RECORD), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/dashboard?notice=refresh-failed");
    assert_eq!(api.stored().len(), 1);

    let resp = handle(get("/dashboard?notice=refresh-failed", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_text(resp);
    assert!(body.contains("Your change was saved"));
    assert!(body.contains("Hana Girma"));
    assert!(!body.contains("Nothing was changed"));
}

#[test]
fn plain_dashboard_still_reports_listing_failures() {
    let (state, api) = test_state(vec![]);
    let cookie = sign_in(&state);

    api.fail_listing(true);
    let err = expect_err(handle(get("/dashboard", Some(&cookie)), &state));
    assert_eq!(err.status(), 502);
}

#[test]
fn ids_with_reserved_characters_can_be_edited_and_deleted() {
    let (state, api) = test_state(vec![record("a/b c", Some("2024-03-01"), "pending")]);
    let cookie = sign_in(&state);

    let body = body_text(handle(get("/dashboard", Some(&cookie)), &state).unwrap());
    assert!(body.contains("href=\"/records/a%2Fb%20c/edit\""));
    assert!(body.contains("action=\"/records/a%2Fb%20c/delete\""));

    let resp = handle(get("/records/a%2Fb%20c/edit", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_text(resp).contains("action=\"/records/a%2Fb%20c\""));

    let resp = handle(post("/records/a%2Fb%20c/delete", Some(&cookie), ""), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert!(api.stored().is_empty());
}
