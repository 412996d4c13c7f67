// src/api/models.rs
//
// Wire shapes returned by the remote foreclosure service. Every shape the
// service has been seen to produce is listed here and folded into the
// canonical `Record` before anything else touches it.

use serde::Deserialize;

use crate::domain::record::{non_blank, Record};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecord {
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,
    pub id: Option<String>,
    pub applicant_name: Option<String>,
    pub branch: Option<String>,
    pub site_location: Option<String>,
    pub collateral_type: Option<String>,
    pub number_of_collaterals: Option<CountValue>,
    pub date_of_request: Option<String>,
    pub date_of_appointment: Option<String>,
    pub date_of_report: Option<String>,
    pub engineer_name: Option<String>,
    pub report_status: Option<String>,
    pub remarks: Option<String>,
}

/// `numberOfCollaterals` arrives as a number or as numeric text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CountValue {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl CountValue {
    fn as_count(&self) -> u32 {
        match self {
            CountValue::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .map(|v| v.min(u32::MAX as u64) as u32)
                .unwrap_or(0),
            CountValue::Text(s) => s.trim().parse().unwrap_or(0),
            CountValue::Other(_) => 0,
        }
    }
}

impl ApiRecord {
    /// Fold into the canonical record. `None` when the service gave no id.
    pub fn into_record(self) -> Option<Record> {
        let id = non_blank(self.mongo_id.as_deref()).or_else(|| non_blank(self.id.as_deref()))?;

        Some(Record {
            id,
            applicant_name: self.applicant_name.unwrap_or_default(),
            branch: self.branch.unwrap_or_default(),
            site_location: self.site_location.unwrap_or_default(),
            collateral_type: self.collateral_type.unwrap_or_default(),
            number_of_collaterals: self
                .number_of_collaterals
                .as_ref()
                .map(CountValue::as_count)
                .unwrap_or(0),
            date_of_request: non_blank(self.date_of_request.as_deref()),
            date_of_appointment: non_blank(self.date_of_appointment.as_deref()),
            date_of_report: non_blank(self.date_of_report.as_deref()),
            engineer_name: non_blank(self.engineer_name.as_deref()),
            report_status: non_blank(self.report_status.as_deref())
                .unwrap_or_else(|| "pending".to_string()),
            remarks: non_blank(self.remarks.as_deref()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct Paged {
    pub data: Vec<ApiRecord>,
}

/// Body of `GET /foreclosures`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope {
    Nested { data: Paged },
    Flat { data: Vec<ApiRecord> },
    Bare(Vec<ApiRecord>),
    Null { data: Option<()> },
}

impl ListEnvelope {
    pub fn into_api_records(self) -> Vec<ApiRecord> {
        match self {
            ListEnvelope::Nested { data } => data.data,
            ListEnvelope::Flat { data } => data,
            ListEnvelope::Bare(records) => records,
            ListEnvelope::Null { .. } => Vec::new(),
        }
    }
}

/// Body of create and update responses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordEnvelope {
    Wrapped { data: ApiRecord },
    Bare(ApiRecord),
}

impl RecordEnvelope {
    pub fn into_api_record(self) -> ApiRecord {
        match self {
            RecordEnvelope::Wrapped { data } => data,
            RecordEnvelope::Bare(record) => record,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedUser {
    pub full_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: Option<NamedUser>,
    pub full_name: Option<String>,
}

/// Body of `POST /users/login`; only the display name is read from it.
#[derive(Debug, Default, Deserialize)]
pub struct LoginEnvelope {
    pub data: Option<LoginData>,
    pub user: Option<NamedUser>,
}

impl LoginEnvelope {
    pub fn display_name(&self) -> String {
        let data = self.data.as_ref();
        data.and_then(|d| d.user.as_ref())
            .and_then(|u| non_blank(u.full_name.as_deref()))
            .or_else(|| data.and_then(|d| non_blank(d.full_name.as_deref())))
            .or_else(|| {
                self.user
                    .as_ref()
                    .and_then(|u| non_blank(u.full_name.as_deref()))
            })
            .unwrap_or_else(|| "User".to_string())
    }
}
