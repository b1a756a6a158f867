//! Report domain model: a weekly report with its nested work days,
//! towers, and image attachments.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::dates;

/// Report status. Transitions only `draft -> completed`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Draft,
    Completed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Work day kind: a normal inspection day or a no-work day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Normal,
    #[serde(rename = "nowork")]
    NoWork,
}

impl WorkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::NoWork => "nowork",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "nowork" => Some(Self::NoWork),
            _ => None,
        }
    }
}

/// Reason a day was not worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum NoWorkReason {
    PublicHoliday,
    Rain,
    EquipmentIssue,
    Other,
}

impl NoWorkReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PublicHoliday => "PUBLIC HOLIDAY",
            Self::Rain => "RAIN",
            Self::EquipmentIssue => "EQUIPMENT ISSUE",
            Self::Other => "OTHER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PUBLIC HOLIDAY" => Some(Self::PublicHoliday),
            "RAIN" => Some(Self::Rain),
            "EQUIPMENT ISSUE" => Some(Self::EquipmentIssue),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for NoWorkReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tower structure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TowerType {
    Ss,
    Tt,
}

impl TowerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ss => "SS",
            Self::Tt => "TT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SS" => Some(Self::Ss),
            "TT" => Some(Self::Tt),
            _ => None,
        }
    }
}

/// One inspected tower with insulator wash counts per phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    /// Free text in the source form; numeric by convention.
    pub number: String,
    pub tower_type: TowerType,
    pub insulators_r: i32,
    pub insulators_y: i32,
    pub insulators_b: i32,
    pub remarks: String,
}

impl Tower {
    /// Derived value, never stored: sum of the three phase counts.
    pub fn total(&self) -> i32 {
        self.insulators_r + self.insulators_y + self.insulators_b
    }
}

/// An image attached to a work day, already uploaded to object storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    pub image_url: String,
    pub caption: String,
    pub file_name: String,
}

/// One calendar day's entry within a weekly report.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkDay {
    pub date: Option<NaiveDate>,
    pub work_type: WorkType,
    /// Only meaningful when `work_type` is `Normal`.
    pub towers: Vec<Tower>,
    /// Only set when `work_type` is `NoWork`.
    pub no_work_reason: Option<NoWorkReason>,
    pub no_work_details: String,
    pub images: Vec<ImageAttachment>,
}

impl WorkDay {
    /// Day-of-week label, always derived from the date. The date is
    /// authoritative; a stored label is never trusted.
    pub fn day_name(&self) -> &'static str {
        self.date.map(dates::day_name).unwrap_or("")
    }

    pub fn is_normal(&self) -> bool {
        self.work_type == WorkType::Normal
    }
}

/// A weekly line-maintenance report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Absent for unsaved drafts; assigned on first save.
    pub id: Option<Uuid>,
    /// Line display label ("<name> <voltage>kV").
    pub line: String,
    pub from_person: String,
    pub to_person: String,
    pub report_date: Option<NaiveDate>,
    pub team: String,
    pub location: String,
    pub reference: String,
    pub status: ReportStatus,
    pub created_at: Option<DateTime<Utc>>,
    /// Chronological; matches insertion order in the form.
    pub work_days: Vec<WorkDay>,
}

/// Summary row shape for report lists and the JSON backup dump.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportSummaryRow {
    pub id: Uuid,
    pub line: String,
    pub from_person: String,
    pub to_person: String,
    pub report_date: NaiveDate,
    pub team: String,
    pub location: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Filters for listing reports.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReportFilter {
    /// Filter by status.
    #[serde(default)]
    pub status: Option<ReportStatus>,
    /// Filter by line display label.
    #[serde(default)]
    pub line: Option<String>,
    /// Case-insensitive free text search over line and team.
    #[serde(default)]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(ReportStatus::parse("draft"), Some(ReportStatus::Draft));
        assert_eq!(ReportStatus::parse("completed"), Some(ReportStatus::Completed));
        assert_eq!(ReportStatus::parse("deleted"), None);
        assert_eq!(ReportStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_no_work_reason_wire_values() {
        for reason in [
            NoWorkReason::PublicHoliday,
            NoWorkReason::Rain,
            NoWorkReason::EquipmentIssue,
            NoWorkReason::Other,
        ] {
            assert_eq!(NoWorkReason::parse(reason.as_str()), Some(reason));
        }
        assert_eq!(NoWorkReason::PublicHoliday.as_str(), "PUBLIC HOLIDAY");
        assert_eq!(NoWorkReason::parse("SNOW"), None);
    }

    #[test]
    fn test_tower_total_is_derived() {
        let tower = Tower {
            number: "12".to_string(),
            tower_type: TowerType::Ss,
            insulators_r: 9,
            insulators_y: 5,
            insulators_b: 3,
            remarks: String::new(),
        };
        assert_eq!(tower.total(), 17);
    }

    #[test]
    fn test_day_name_derived_from_date() {
        let day = WorkDay {
            date: NaiveDate::from_ymd_opt(2025, 3, 17), // a Monday
            work_type: WorkType::Normal,
            towers: vec![],
            no_work_reason: None,
            no_work_details: String::new(),
            images: vec![],
        };
        assert_eq!(day.day_name(), "Monday");

        let dateless = WorkDay { date: None, ..day };
        assert_eq!(dateless.day_name(), "");
    }
}
