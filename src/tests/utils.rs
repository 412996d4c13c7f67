use crate::auth::SessionStore;
use crate::config::Config;
use crate::domain::record::Record;
use crate::errors::{ResultResp, ServerError};
use crate::router::{handle, AppState};
use crate::tests::fake_api::{FakeApi, PASSWORD, USERNAME};
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::sync::Arc;

/// App state backed by an in-memory record service seeded with `records`.
pub fn test_state(records: Vec<Record>) -> (AppState, Arc<FakeApi>) {
    let api = Arc::new(FakeApi::with_records(records));
    let state = AppState {
        config: Config::default(),
        api: api.clone(),
        sessions: SessionStore::new(3600),
    };
    (state, api)
}

pub fn get(path: &str, cookie: Option<&str>) -> Request {
    let mut builder = http::Request::builder().method(Method::GET).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post(path: &str, cookie: Option<&str>, form: &str) -> Request {
    let mut builder = http::Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

pub fn header(resp: &Response, name: &str) -> String {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn body_bytes(resp: Response) -> Vec<u8> {
    let mut bytes = Vec::new();
    resp.into_body().reader().read_to_end(&mut bytes).unwrap();
    bytes
}

pub fn body_text(resp: Response) -> String {
    String::from_utf8(body_bytes(resp)).unwrap()
}

/// Sign in through the login form and return the `Cookie` header value.
pub fn sign_in(state: &AppState) -> String {
    let form = format!("username={USERNAME}&password={PASSWORD}");
    let resp = handle(post("/login", None, &form), state).unwrap();
    assert_eq!(resp.status(), 303);

    let set_cookie = header(&resp, "Set-Cookie");
    set_cookie
        .split(';')
        .next()
        .expect("session cookie")
        .to_string()
}

pub fn expect_err(result: ResultResp) -> ServerError {
    match result {
        Ok(resp) => panic!("expected an error, got status {}", resp.status()),
        Err(err) => err,
    }
}
