// src/api/client.rs
use crate::api::models::{ApiRecord, ListEnvelope, LoginEnvelope, RecordEnvelope};
use crate::api::{ApiError, RecordApi, RemoteAuth, RemoteLogin};
use crate::domain::record::{Record, RecordFields};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("foreclosure-registry/", env!("CARGO_PKG_VERSION"));

pub struct HttpRecordApi {
    client: Client,
    base: Url,
}

impl HttpRecordApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base: parse_base_url(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::UnexpectedShape(format!("bad endpoint '{path}': {e}")))
    }

    fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let response = req.send().map_err(|e| {
            log::warn!("record service request failed: {e}");
            ApiError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthenticated);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "(no body)".to_string());
            log::warn!("record service returned {status}: {body}");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn authed(&self, req: RequestBuilder, auth: &RemoteAuth) -> RequestBuilder {
        req.header(COOKIE, &auth.cookie)
    }

    fn read_record(response: Response) -> Result<Record, ApiError> {
        let envelope: RecordEnvelope = response
            .json()
            .map_err(|e| ApiError::UnexpectedShape(e.to_string()))?;

        envelope
            .into_api_record()
            .into_record()
            .ok_or_else(|| ApiError::UnexpectedShape("record without an id".into()))
    }
}

impl RecordApi for HttpRecordApi {
    fn login(&self, username: &str, password: &str) -> Result<RemoteLogin, ApiError> {
        let url = self.endpoint("users/login")?;
        let response = self.send(
            self.client
                .post(url)
                .json(&json!({ "username": username, "password": password })),
        )?;

        let cookie = collect_cookies(
            response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok()),
        );
        if cookie.is_empty() {
            return Err(ApiError::UnexpectedShape(
                "login succeeded without a session cookie".into(),
            ));
        }

        // A body we cannot read only costs us the display name.
        let envelope: LoginEnvelope = response.json().unwrap_or_default();

        Ok(RemoteLogin {
            auth: RemoteAuth { cookie },
            full_name: envelope.display_name(),
        })
    }

    fn list_records(&self, auth: &RemoteAuth) -> Result<Vec<Record>, ApiError> {
        let url = self.endpoint("foreclosures")?;
        let response = self.send(self.authed(self.client.get(url), auth))?;

        let envelope: ListEnvelope = response
            .json()
            .map_err(|e| ApiError::UnexpectedShape(e.to_string()))?;

        Ok(normalize_records(envelope.into_api_records()))
    }

    fn create_record(&self, auth: &RemoteAuth, fields: &RecordFields) -> Result<Record, ApiError> {
        let url = self.endpoint("foreclosures")?;
        let response = self.send(self.authed(self.client.post(url).json(fields), auth))?;
        Self::read_record(response)
    }

    fn update_record(
        &self,
        auth: &RemoteAuth,
        id: &str,
        fields: &RecordFields,
    ) -> Result<Record, ApiError> {
        let url = record_url(&self.base, id)?;
        let response = self.send(self.authed(self.client.put(url).json(&update_body(fields)), auth))?;
        Self::read_record(response)
    }

    fn delete_record(&self, auth: &RemoteAuth, id: &str) -> Result<(), ApiError> {
        let url = record_url(&self.base, id)?;
        self.send(self.authed(self.client.delete(url), auth))?;
        Ok(())
    }
}

/// Base URL with a trailing slash so relative joins append instead of replace.
pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut base = raw.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base).map_err(|e| ApiError::UnexpectedShape(format!("bad base url '{raw}': {e}")))
}

/// Drop records the service sent without any id.
pub fn normalize_records(raw: Vec<ApiRecord>) -> Vec<Record> {
    let total = raw.len();
    let records: Vec<Record> = raw.into_iter().filter_map(ApiRecord::into_record).collect();

    if records.len() < total {
        log::warn!(
            "skipped {} of {} records without an id",
            total - records.len(),
            total
        );
    }

    records
}

/// `name=value` pairs from `Set-Cookie` headers, joined for a `Cookie` header.
pub fn collect_cookies<'a>(set_cookie: impl Iterator<Item = &'a str>) -> String {
    set_cookie
        .filter_map(|header| header.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect::<Vec<_>>()
        .join("; ")
}

/// `{base}/foreclosures/{id}` with the id percent-encoded as one segment.
pub fn record_url(base: &Url, id: &str) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::UnexpectedShape(format!("base url '{base}' cannot hold a path")))?
        .pop_if_empty()
        .push("foreclosures")
        .push(id);
    Ok(url)
}

/// Update body. Unlike create, cleared optionals go out as `null` so the
/// service drops the stored value instead of keeping it.
pub fn update_body(fields: &RecordFields) -> serde_json::Value {
    json!({
        "applicantName": fields.applicant_name,
        "branch": fields.branch,
        "siteLocation": fields.site_location,
        "collateralType": fields.collateral_type,
        "numberOfCollaterals": fields.number_of_collaterals,
        "dateOfRequest": fields.date_of_request,
        "dateOfAppointment": fields.date_of_appointment,
        "dateOfReport": fields.date_of_report,
        "engineerName": fields.engineer_name,
        "reportStatus": fields.report_status,
        "remarks": fields.remarks,
    })
}
