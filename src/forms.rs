// src/forms.rs
use std::collections::HashMap;
use std::io::Read;

use astra::Request;

use crate::domain::dates::{calendar_part, parse_calendar_date};
use crate::domain::record::{non_blank, Record, RecordFields};
use crate::errors::ServerError;

const MAX_FORM_BYTES: u64 = 64 * 1024;

pub fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| parse_pairs(q.as_bytes()))
        .unwrap_or_default()
}

/// `application/x-www-form-urlencoded` body. Later keys win.
pub fn parse_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut bytes = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;

    Ok(parse_pairs(&bytes))
}

fn parse_pairs(bytes: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(bytes).into_owned().collect()
}

/// `/records/{id}{suffix}` with the id encoded as a single path segment.
pub fn record_path(id: &str, suffix: &str) -> String {
    format!("/records/{}{suffix}", urlencoding::encode(id))
}

pub fn decode_segment(raw: &str) -> Result<String, ServerError> {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .map_err(|_| ServerError::BadRequest(format!("malformed path segment '{raw}'")))
}

/// Raw form values, kept as strings so a rejected submission re-renders as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordForm {
    pub applicant_name: String,
    pub branch: String,
    pub site_location: String,
    pub collateral_type: String,
    pub number_of_collaterals: String,
    pub date_of_request: String,
    pub date_of_appointment: String,
    pub date_of_report: String,
    pub engineer_name: String,
    pub report_status: String,
    pub remarks: String,
}

impl RecordForm {
    pub fn from_pairs(pairs: &HashMap<String, String>) -> Self {
        let get = |k: &str| pairs.get(k).cloned().unwrap_or_default();
        Self {
            applicant_name: get("applicantName"),
            branch: get("branch"),
            site_location: get("siteLocation"),
            collateral_type: get("collateralType"),
            number_of_collaterals: get("numberOfCollaterals"),
            date_of_request: get("dateOfRequest"),
            date_of_appointment: get("dateOfAppointment"),
            date_of_report: get("dateOfReport"),
            engineer_name: get("engineerName"),
            report_status: get("reportStatus"),
            remarks: get("remarks"),
        }
    }

    pub fn from_record(record: &Record) -> Self {
        Self {
            applicant_name: record.applicant_name.clone(),
            branch: record.branch.clone(),
            site_location: record.site_location.clone(),
            collateral_type: record.collateral_type.clone(),
            number_of_collaterals: record.number_of_collaterals.to_string(),
            date_of_request: calendar_part(record.date_of_request.as_deref()),
            date_of_appointment: calendar_part(record.date_of_appointment.as_deref()),
            date_of_report: calendar_part(record.date_of_report.as_deref()),
            engineer_name: record.engineer_name.clone().unwrap_or_default(),
            report_status: record.report_status.clone(),
            remarks: record.remarks.clone().unwrap_or_default(),
        }
    }

    pub fn blank() -> Self {
        Self {
            number_of_collaterals: "0".to_string(),
            report_status: "pending".to_string(),
            ..Self::default()
        }
    }

    /// Presence checks, plus well-formedness of whatever dates were given.
    pub fn to_fields(&self) -> Result<RecordFields, Vec<String>> {
        let mut problems = Vec::new();

        let number_of_collaterals = match self.number_of_collaterals.trim() {
            "" => 0,
            n => n.parse::<u32>().unwrap_or_else(|_| {
                problems.push("Number of collaterals must be a whole number".to_string());
                0
            }),
        };

        let mut date = |label: &str, raw: &str| -> Option<String> {
            let value = non_blank(Some(raw))?;
            if parse_calendar_date(&value).is_err() {
                problems.push(format!("{label} must be a date (YYYY-MM-DD)"));
            }
            Some(value)
        };

        let date_of_request = date("Date of request", &self.date_of_request);
        let date_of_appointment = date("Date of appointment", &self.date_of_appointment);
        let date_of_report = date("Date of report", &self.date_of_report);

        let fields = RecordFields {
            applicant_name: self.applicant_name.trim().to_string(),
            branch: self.branch.trim().to_string(),
            site_location: self.site_location.trim().to_string(),
            collateral_type: self.collateral_type.trim().to_string(),
            number_of_collaterals,
            date_of_request,
            date_of_appointment,
            date_of_report,
            engineer_name: non_blank(Some(&self.engineer_name)),
            report_status: non_blank(Some(&self.report_status))
                .unwrap_or_else(|| "pending".to_string()),
            remarks: non_blank(Some(&self.remarks)),
        };

        problems.extend(
            fields
                .missing_required()
                .into_iter()
                .map(|name| format!("{name} is required")),
        );

        if problems.is_empty() {
            Ok(fields)
        } else {
            Err(problems)
        }
    }
}
