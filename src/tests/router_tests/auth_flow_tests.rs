use crate::router::handle;
use crate::tests::fake_api::{record, FULL_NAME};
use crate::tests::utils::{body_text, get, header, post, sign_in, test_state};

#[test]
fn signed_out_visitors_are_sent_to_login() {
    let (state, _api) = test_state(vec![]);

    for path in ["/", "/dashboard", "/reports", "/records/new"] {
        let resp = handle(get(path, None), &state).unwrap();
        assert_eq!(resp.status(), 303, "{path}");
        assert_eq!(header(&resp, "Location"), "/login");
    }
}

#[test]
fn login_page_loads_successfully() {
    let (state, _api) = test_state(vec![]);

    let resp = handle(get("/login", None), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_text(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains("form"));
}

#[test]
fn wrong_password_rerenders_login() {
    let (state, _api) = test_state(vec![]);

    let resp = handle(post("/login", None, "username=admin&password=nope"), &state).unwrap();
    assert_eq!(resp.status(), 401);
    assert!(header(&resp, "Set-Cookie").is_empty());

    let body = body_text(resp);
    assert!(body.contains("Invalid username or password"));
    assert!(body.contains("value=\"admin\""));
}

#[test]
fn blank_credentials_are_a_bad_request() {
    let (state, _api) = test_state(vec![]);

    let resp = handle(post("/login", None, "username=&password="), &state).unwrap();
    assert_eq!(resp.status(), 400);
}

#[test]
fn login_sets_cookie_and_shows_user() {
    let (state, _api) = test_state(vec![record("1", Some("2024-03-01"), "pending")]);
    let cookie = sign_in(&state);
    assert!(cookie.starts_with("session="));

    let resp = handle(get("/login", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/dashboard");

    let resp = handle(get("/dashboard", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_text(resp);
    assert!(body.contains(FULL_NAME));
    assert!(body.contains(">ST<"));
}

#[test]
fn logout_revokes_session() {
    let (state, _api) = test_state(vec![]);
    let cookie = sign_in(&state);

    let resp = handle(post("/logout", Some(&cookie), ""), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/login");
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));

    let resp = handle(get("/dashboard", Some(&cookie)), &state).unwrap();
    assert_eq!(header(&resp, "Location"), "/login");
}

#[test]
fn remote_rejection_signs_the_user_out() {
    let (state, api) = test_state(vec![record("1", Some("2024-03-01"), "pending")]);
    let cookie = sign_in(&state);

    api.revoke_sessions();

    let resp = handle(get("/dashboard", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/login");
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));
    assert_eq!(state.sessions.len(), 0);
}

#[test]
fn unknown_cookie_is_treated_as_signed_out() {
    let (state, _api) = test_state(vec![]);

    let resp = handle(get("/dashboard", Some("session=forged")), &state).unwrap();
    assert_eq!(header(&resp, "Location"), "/login");
}
