// src/domain/status.rs

use std::fmt;

/// Canonical workflow state of a record.
///
/// Declaration order is display order (counters, summary rows, spreadsheets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusCategory {
    Reported,
    InProgress,
    Pending,
    Canceled,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 4] = [
        StatusCategory::Reported,
        StatusCategory::InProgress,
        StatusCategory::Pending,
        StatusCategory::Canceled,
    ];

    /// Human label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            StatusCategory::Reported => "Completed",
            StatusCategory::InProgress => "In-Progress",
            StatusCategory::Pending => "Pending",
            StatusCategory::Canceled => "Canceled",
        }
    }

    /// CSS class for pills and summary rows.
    pub fn color_tag(self) -> &'static str {
        match self {
            StatusCategory::Reported => "reported",
            StatusCategory::InProgress => "in-progress",
            StatusCategory::Pending => "pending",
            StatusCategory::Canceled => "canceled",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase and collapse runs of whitespace; absent or blank becomes "pending".
pub fn normalize_status(raw: Option<&str>) -> String {
    let collapsed = raw
        .unwrap_or("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if collapsed.is_empty() {
        "pending".to_string()
    } else {
        collapsed
    }
}

/// Map free-text status to a category. Ordered, first match wins:
/// reported/complete (or a cancelled report), then progress, then cancel,
/// else pending.
pub fn classify(raw: Option<&str>) -> StatusCategory {
    let s = normalize_status(raw);

    let reported = s.contains("reported")
        || s.contains("complete")
        || (s.contains("report") && s.contains("cancel"));

    if reported {
        StatusCategory::Reported
    } else if s.contains("progress") {
        StatusCategory::InProgress
    } else if s.contains("cancel") {
        StatusCategory::Canceled
    } else {
        StatusCategory::Pending
    }
}
