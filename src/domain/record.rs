// src/domain/record.rs

use serde::Serialize;

use crate::domain::status::{classify, StatusCategory};

/// One foreclosure-processing case, normalized from the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub applicant_name: String,
    pub branch: String,
    pub site_location: String,
    pub collateral_type: String,
    pub number_of_collaterals: u32,
    // Dates stay as the service sent them; parsing happens at filter time.
    pub date_of_request: Option<String>,
    pub date_of_appointment: Option<String>,
    pub date_of_report: Option<String>,
    pub engineer_name: Option<String>,
    pub report_status: String,
    pub remarks: Option<String>,
}

impl Record {
    pub fn category(&self) -> StatusCategory {
        classify(Some(&self.report_status))
    }

    /// The write shape carrying this record's current values.
    #[cfg(test)]
    pub fn to_fields(&self) -> RecordFields {
        RecordFields {
            applicant_name: self.applicant_name.clone(),
            branch: self.branch.clone(),
            site_location: self.site_location.clone(),
            collateral_type: self.collateral_type.clone(),
            number_of_collaterals: self.number_of_collaterals,
            date_of_request: self.date_of_request.clone(),
            date_of_appointment: self.date_of_appointment.clone(),
            date_of_report: self.date_of_report.clone(),
            engineer_name: self.engineer_name.clone(),
            report_status: self.report_status.clone(),
            remarks: self.remarks.clone(),
        }
    }
}

/// Write shape. Serialized as the create body, where blank optionals are
/// omitted; updates send them as `null` instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    pub applicant_name: String,
    pub branch: String,
    pub site_location: String,
    pub collateral_type: String,
    pub number_of_collaterals: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_appointment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineer_name: Option<String>,
    pub report_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl RecordFields {
    /// Names of required fields that are blank. Presence checks only.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.applicant_name.trim().is_empty() {
            missing.push("Applicant name");
        }
        if self.branch.trim().is_empty() {
            missing.push("Branch");
        }
        if self.site_location.trim().is_empty() {
            missing.push("Site location");
        }
        if self.collateral_type.trim().is_empty() {
            missing.push("Collateral type");
        }
        if self.date_of_request.is_none() {
            missing.push("Date of request");
        }
        missing
    }
}

/// Trim, and map blank to `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> RecordFields {
        RecordFields {
            applicant_name: "Abebe Kebede".into(),
            branch: "Bole".into(),
            site_location: "Addis Ababa".into(),
            collateral_type: "Building".into(),
            number_of_collaterals: 2,
            date_of_request: Some("2024-03-01".into()),
            date_of_appointment: None,
            date_of_report: None,
            engineer_name: None,
            report_status: "pending".into(),
            remarks: None,
        }
    }

    #[test]
    fn serializes_camel_case_and_skips_blank_optionals() {
        let json = serde_json::to_value(fields()).unwrap();
        assert_eq!(json["applicantName"], "Abebe Kebede");
        assert_eq!(json["numberOfCollaterals"], 2);
        assert_eq!(json["dateOfRequest"], "2024-03-01");
        assert!(json.get("engineerName").is_none());
        assert!(json.get("dateOfReport").is_none());
    }

    #[test]
    fn missing_required_lists_blank_fields() {
        let mut f = fields();
        assert!(f.missing_required().is_empty());

        f.branch = "  ".into();
        f.date_of_request = None;
        assert_eq!(f.missing_required(), vec!["Branch", "Date of request"]);
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  x ")), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
