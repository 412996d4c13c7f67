use crate::api::{ApiError, RecordApi};
use crate::auth::gate::{clear_session_cookie, session_cookie};
use crate::auth::{gate, lock_session, session_token, Gate, Session, SessionStore};
use crate::config::Config;
use crate::domain::to_range_utc;
use crate::errors::ServerError;
use crate::exports::{export_table_pdf, export_table_xlsx};
use crate::forms::{decode_segment, parse_form, parse_query, record_path, RecordForm};
use crate::presentation::{build_export_table, to_report_view};
use crate::report::{run_report_for, tally};
use crate::responses::{
    html_response, html_with_status, pdf_response, redirect, redirect_with_cookie, xlsx_response,
    ResultResp,
};
use crate::store::{Refresh, StoreError};
use crate::templates::pages::{
    dashboard_page, login_page, record_form_page, reports_page, DashboardVm, RecordFormVm,
    ReportsVm,
};
use astra::Request;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_REPORT_TITLE: &str = "Foreclosure Report";
const REFRESH_FAILED: &str = "refresh-failed";

/// Everything a request handler needs. Built once in `main`.
pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn RecordApi>,
    pub sessions: SessionStore,
}

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let now = Utc::now().timestamp();
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    let token = session_token(&req);
    let session = match &token {
        Some(t) => state.sessions.load(t, now)?,
        None => None,
    };

    match gate(&path, session.is_some()) {
        Gate::ToLogin => return redirect("/login"),
        Gate::ToDashboard => return redirect("/dashboard"),
        Gate::Pass => {}
    }

    let (Some(handle), Some(token)) = (session, token) else {
        return match (method.as_str(), path.as_str()) {
            ("GET", "/login") => html_response(login_page(None, "")),
            ("POST", "/login") => login(&mut req, state, now),
            _ => Err(ServerError::NotFound),
        };
    };

    if (method.as_str(), path.as_str()) == ("POST", "/logout") {
        state.sessions.revoke(&token)?;
        log::info!("signed out");
        return redirect_with_cookie("/login", Some(&clear_session_cookie()));
    }

    let result = {
        let mut session = lock_session(&handle)?;
        signed_in(&mut req, &method, &path, state, &mut session)
    };

    match result {
        Err(ServerError::Unauthenticated) => {
            state.sessions.revoke(&token)?;
            log::info!("record service rejected the session; signing out");
            redirect_with_cookie("/login", Some(&clear_session_cookie()))
        }
        other => other,
    }
}

fn signed_in(
    req: &mut Request,
    method: &str,
    path: &str,
    state: &AppState,
    session: &mut Session,
) -> ResultResp {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        ("GET", ["dashboard"]) => dashboard(req, state, session),
        ("GET", ["records", "new"]) => new_record(session),
        ("POST", ["records"]) => create_record(req, state, session),
        ("GET", ["records", id, "edit"]) => edit_record(state, session, &decode_segment(id)?),
        ("POST", ["records", id]) => update_record(req, state, session, &decode_segment(id)?),
        ("POST", ["records", id, "delete"]) => {
            delete_record(state, session, &decode_segment(id)?)
        }
        ("GET", ["reports"]) => reports(req, state, session),
        ("GET", ["reports", "export.pdf"]) => export_pdf(req, state, session),
        ("GET", ["reports", "export.xlsx"]) => export_xlsx(req, state, session),
        _ => Err(ServerError::NotFound),
    }
}

fn login(req: &mut Request, state: &AppState, now: i64) -> ResultResp {
    let form = parse_form(req)?;
    let username = form.get("username").map(|s| s.trim()).unwrap_or("");
    let password = form.get("password").map(String::as_str).unwrap_or("");

    if username.is_empty() || password.is_empty() {
        return html_with_status(
            400,
            login_page(Some("Enter your username and password."), username),
        );
    }

    let remote = match state.api.login(username, password) {
        Ok(remote) => remote,
        Err(ApiError::Rejected { .. } | ApiError::Unauthenticated) => {
            log::info!("login rejected for {username}");
            return html_with_status(
                401,
                login_page(Some("Invalid username or password."), username),
            );
        }
        Err(err) => {
            log::warn!("login failed: {err}");
            return html_with_status(
                502,
                login_page(
                    Some("The record service is unavailable. Please try again."),
                    username,
                ),
            );
        }
    };

    let purged = state.sessions.purge_expired(now)?;
    if purged > 0 {
        log::debug!("purged {purged} expired sessions");
    }

    let token = state.sessions.create(remote, now)?;
    log::info!("signed in {username}");

    redirect_with_cookie(
        "/dashboard",
        Some(&session_cookie(&token, state.config.session_ttl_secs)),
    )
}

/// Pages reached without visiting the dashboard still need a snapshot.
fn ensure_loaded(state: &AppState, session: &mut Session) -> Result<(), ServerError> {
    if session.records.generation() == 0 {
        session.records.sync(state.api.as_ref(), &session.remote)?;
    }
    Ok(())
}

/// Where to land after a confirmed write.
fn after_write(refresh: Refresh) -> ResultResp {
    match refresh {
        Refresh::Done => redirect("/dashboard"),
        Refresh::Failed(reason) => {
            log::info!("write saved, snapshot may be stale: {reason}");
            redirect(&format!("/dashboard?notice={REFRESH_FAILED}"))
        }
    }
}

fn dashboard(req: &Request, state: &AppState, session: &mut Session) -> ResultResp {
    let after_failed_refresh =
        parse_query(req).get("notice").map(String::as_str) == Some(REFRESH_FAILED);

    // Right after a write whose refresh failed, the local snapshot already
    // holds the change, so it is shown rather than an error page.
    let notice = match session.records.sync(state.api.as_ref(), &session.remote) {
        Ok(()) => None,
        Err(StoreError::Api(ApiError::Unauthenticated)) => return Err(ServerError::Unauthenticated),
        Err(err) if after_failed_refresh => {
            log::warn!("dashboard refresh failed, showing local snapshot: {err}");
            Some("Your change was saved, but the record list could not be refreshed. It may be out of date.")
        }
        Err(err) => return Err(err.into()),
    };

    let records = session.records.records();
    let vm = DashboardVm {
        full_name: &session.full_name,
        records,
        counts: tally(records),
        notice,
    };
    html_response(dashboard_page(&vm))
}

fn new_record(session: &Session) -> ResultResp {
    let form = RecordForm::blank();
    html_response(record_form_page(&RecordFormVm {
        full_name: &session.full_name,
        heading: "New Record",
        action: "/records".to_string(),
        form: &form,
        problems: &[],
        show_progress: false,
    }))
}

fn create_record(req: &mut Request, state: &AppState, session: &mut Session) -> ResultResp {
    let form = RecordForm::from_pairs(&parse_form(req)?);

    let fields = match form.to_fields() {
        Ok(fields) => fields,
        Err(problems) => {
            return html_with_status(
                400,
                record_form_page(&RecordFormVm {
                    full_name: &session.full_name,
                    heading: "New Record",
                    action: "/records".to_string(),
                    form: &form,
                    problems: &problems,
                    show_progress: false,
                }),
            )
        }
    };

    let (_, refresh) = session
        .records
        .create(state.api.as_ref(), &session.remote, &fields)?;
    after_write(refresh)
}

fn edit_record(state: &AppState, session: &mut Session, id: &str) -> ResultResp {
    ensure_loaded(state, session)?;

    let form = RecordForm::from_record(session.records.find(id)?);
    html_response(record_form_page(&RecordFormVm {
        full_name: &session.full_name,
        heading: "Edit Record",
        action: record_path(id, ""),
        form: &form,
        problems: &[],
        show_progress: true,
    }))
}

fn update_record(
    req: &mut Request,
    state: &AppState,
    session: &mut Session,
    id: &str,
) -> ResultResp {
    ensure_loaded(state, session)?;
    let form = RecordForm::from_pairs(&parse_form(req)?);

    let fields = match form.to_fields() {
        Ok(fields) => fields,
        Err(problems) => {
            return html_with_status(
                400,
                record_form_page(&RecordFormVm {
                    full_name: &session.full_name,
                    heading: "Edit Record",
                    action: record_path(id, ""),
                    form: &form,
                    problems: &problems,
                    show_progress: true,
                }),
            )
        }
    };

    let refresh = session
        .records
        .update(state.api.as_ref(), &session.remote, id, &fields)?;
    after_write(refresh)
}

fn delete_record(state: &AppState, session: &mut Session, id: &str) -> ResultResp {
    ensure_loaded(state, session)?;

    match session.records.delete(state.api.as_ref(), &session.remote, id) {
        Ok(refresh) => after_write(refresh),
        Err(StoreError::NotFound(_)) => {
            log::warn!("delete of unknown record {id}");
            Err(ServerError::NotFound)
        }
        Err(err) => Err(err.into()),
    }
}

fn report_title(query: &HashMap<String, String>) -> String {
    query
        .get("title")
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_REPORT_TITLE)
        .to_string()
}

fn required_param<'a>(query: &'a HashMap<String, String>, key: &str) -> Result<&'a str, ServerError> {
    query
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("missing `{key}` date")))
}

fn reports(req: &Request, state: &AppState, session: &mut Session) -> ResultResp {
    let query = parse_query(req);
    let title = report_title(&query);
    let start = query.get("start").map(|s| s.trim()).unwrap_or("");
    let end = query.get("end").map(|s| s.trim()).unwrap_or("");
    let full_name = session.full_name.clone();

    let mut vm = ReportsVm {
        full_name: &full_name,
        title: &title,
        start,
        end,
        view: None,
        error: None,
    };

    if start.is_empty() && end.is_empty() {
        return html_response(reports_page(&vm));
    }
    if start.is_empty() || end.is_empty() {
        vm.error = Some("Please select both start and end dates.".to_string());
        return html_with_status(400, reports_page(&vm));
    }

    ensure_loaded(state, session)?;

    match run_report_for(&session.records, start, end) {
        Ok(outcome) => {
            vm.view = Some(to_report_view(&title, &outcome));
            html_response(reports_page(&vm))
        }
        Err(err) => {
            vm.error = Some(err.to_string());
            html_with_status(400, reports_page(&vm))
        }
    }
}

fn export_pdf(req: &Request, state: &AppState, session: &mut Session) -> ResultResp {
    let query = parse_query(req);
    let range = to_range_utc(required_param(&query, "start")?, required_param(&query, "end")?)?;

    ensure_loaded(state, session)?;
    let table = build_export_table(&session.records, range, &report_title(&query));
    let bytes = export_table_pdf(&table, &state.config.report_heading)?;

    log::info!("exported {} rows as PDF", table.rows.len());
    pdf_response(bytes, &format!("{}.pdf", table.file_stem()))
}

fn export_xlsx(req: &Request, state: &AppState, session: &mut Session) -> ResultResp {
    let query = parse_query(req);
    let range = to_range_utc(required_param(&query, "start")?, required_param(&query, "end")?)?;

    ensure_loaded(state, session)?;
    let table = build_export_table(&session.records, range, &report_title(&query));
    let bytes = export_table_xlsx(&table)?;

    log::info!("exported {} rows as XLSX", table.rows.len());
    xlsx_response(bytes, &format!("{}.xlsx", table.file_stem()))
}
