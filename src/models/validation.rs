//! Report validation.
//!
//! Fail-fast: the first violated rule is returned, matching the
//! single-error-at-a-time behavior of the form it serves. Any failure
//! blocks save, submit, export, and preview alike.

use super::report::{Report, WorkType};

/// A violated validation rule with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a transmission line")]
    MissingLine,

    #[error("Please select a report date")]
    MissingReportDate,

    #[error("Please fill in the From and To fields")]
    MissingFromTo,

    #[error("Please fill in the Team and Location fields")]
    MissingTeamLocation,

    #[error("Please add at least one work day")]
    NoWorkDays,

    #[error("Please select a date for all work days")]
    WorkDayMissingDate,

    #[error("Please add at least one tower for {0}")]
    NoTowers(String),

    #[error("Please enter a tower number for all towers")]
    MissingTowerNumber,

    #[error("Please select a reason for no work on {0}")]
    MissingNoWorkReason(String),
}

/// Check a candidate report, returning the first violated rule.
pub fn validate(report: &Report) -> Result<(), ValidationError> {
    if report.line.is_empty() {
        return Err(ValidationError::MissingLine);
    }

    if report.report_date.is_none() {
        return Err(ValidationError::MissingReportDate);
    }

    if report.from_person.is_empty() || report.to_person.is_empty() {
        return Err(ValidationError::MissingFromTo);
    }

    if report.team.is_empty() || report.location.is_empty() {
        return Err(ValidationError::MissingTeamLocation);
    }

    if report.work_days.is_empty() {
        return Err(ValidationError::NoWorkDays);
    }

    if report.work_days.iter().any(|day| day.date.is_none()) {
        return Err(ValidationError::WorkDayMissingDate);
    }

    for day in &report.work_days {
        match day.work_type {
            WorkType::Normal => {
                if day.towers.is_empty() {
                    return Err(ValidationError::NoTowers(day.day_name().to_string()));
                }
                if day.towers.iter().any(|tower| tower.number.is_empty()) {
                    return Err(ValidationError::MissingTowerNumber);
                }
            }
            WorkType::NoWork => {
                if day.no_work_reason.is_none() {
                    return Err(ValidationError::MissingNoWorkReason(
                        day.day_name().to_string(),
                    ));
                }
            }
        }
    }

    Ok(())
}
