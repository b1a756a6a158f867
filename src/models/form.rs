//! The raw form shape and its mapping to the domain model.
//!
//! Every scalar arrives as a string, exactly as the browser form posts
//! it. Coercion is permissive on purpose: missing or non-numeric
//! insulator counts become zero and malformed dates become absent
//! rather than errors; validation decides later what is acceptable.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::dates;
use super::report::{
    ImageAttachment, NoWorkReason, Report, ReportStatus, Tower, TowerType, WorkDay, WorkType,
};

/// Insulator counts as posted by the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InsulatorsForm {
    #[serde(default)]
    pub r: String,
    #[serde(default)]
    pub y: String,
    #[serde(default)]
    pub b: String,
}

/// One tower entry as posted by the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TowerForm {
    #[serde(default)]
    pub number: String,
    #[serde(rename = "type", default)]
    pub tower_type: String,
    #[serde(default)]
    pub insulators: InsulatorsForm,
    #[serde(default)]
    pub remarks: String,
}

/// An already-uploaded image reference carried by the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageForm {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub file_name: String,
}

/// One work day entry as posted by the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkDayForm {
    /// Display-only; the date is authoritative and the name is re-derived.
    #[serde(default)]
    pub day_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub work_type: String,
    #[serde(default)]
    pub towers: Vec<TowerForm>,
    #[serde(default)]
    pub no_work_reason: String,
    #[serde(default)]
    pub no_work_details: String,
    #[serde(default)]
    pub images: Vec<ImageForm>,
}

/// The full report form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportForm {
    #[serde(default)]
    pub line: String,
    #[serde(default)]
    pub from_person: String,
    #[serde(default)]
    pub to_person: String,
    #[serde(default)]
    pub report_date: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub work_days: Vec<WorkDayForm>,
}

/// Permissive count coercion: missing or non-numeric becomes zero,
/// negatives are clamped to zero.
fn coerce_count(value: &str) -> i32 {
    value.trim().parse::<i32>().map(|n| n.max(0)).unwrap_or(0)
}

impl TowerForm {
    fn into_tower(self) -> Tower {
        Tower {
            number: self.number,
            tower_type: TowerType::parse(&self.tower_type).unwrap_or(TowerType::Ss),
            insulators_r: coerce_count(&self.insulators.r),
            insulators_y: coerce_count(&self.insulators.y),
            insulators_b: coerce_count(&self.insulators.b),
            remarks: self.remarks,
        }
    }

    fn from_tower(tower: &Tower) -> Self {
        TowerForm {
            number: tower.number.clone(),
            tower_type: tower.tower_type.as_str().to_string(),
            insulators: InsulatorsForm {
                r: tower.insulators_r.to_string(),
                y: tower.insulators_y.to_string(),
                b: tower.insulators_b.to_string(),
            },
            remarks: tower.remarks.clone(),
        }
    }
}

impl WorkDayForm {
    fn into_work_day(self) -> WorkDay {
        let work_type = WorkType::parse(&self.work_type).unwrap_or(WorkType::Normal);

        // Exactly one of the two sides may hold data: towers for a
        // normal day, the no-work fields otherwise.
        let (towers, no_work_reason, no_work_details) = match work_type {
            WorkType::Normal => (
                self.towers.into_iter().map(TowerForm::into_tower).collect(),
                None,
                String::new(),
            ),
            WorkType::NoWork => (
                Vec::new(),
                NoWorkReason::parse(&self.no_work_reason),
                self.no_work_details,
            ),
        };

        WorkDay {
            date: dates::parse_iso(&self.date),
            work_type,
            towers,
            no_work_reason,
            no_work_details,
            images: self
                .images
                .into_iter()
                .map(|img| ImageAttachment {
                    image_url: img.image_url,
                    caption: img.caption,
                    file_name: img.file_name,
                })
                .collect(),
        }
    }

    fn from_work_day(day: &WorkDay) -> Self {
        WorkDayForm {
            day_name: day.day_name().to_string(),
            date: dates::format_iso(day.date),
            work_type: day.work_type.as_str().to_string(),
            towers: day.towers.iter().map(TowerForm::from_tower).collect(),
            no_work_reason: day
                .no_work_reason
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
            no_work_details: day.no_work_details.clone(),
            images: day
                .images
                .iter()
                .map(|img| ImageForm {
                    image_url: img.image_url.clone(),
                    caption: img.caption.clone(),
                    file_name: img.file_name.clone(),
                })
                .collect(),
        }
    }
}

impl ReportForm {
    /// Build the domain model from the form fields. The result is an
    /// unsaved draft; identity, status, and timestamps are assigned at
    /// save time.
    pub fn into_report(self) -> Report {
        Report {
            id: None,
            line: self.line,
            from_person: self.from_person,
            to_person: self.to_person,
            report_date: dates::parse_iso(&self.report_date),
            team: self.team,
            location: self.location,
            reference: self.reference,
            status: ReportStatus::Draft,
            created_at: None,
            work_days: self
                .work_days
                .into_iter()
                .map(WorkDayForm::into_work_day)
                .collect(),
        }
    }

    /// Project a report back into the form shape for editing.
    pub fn from_report(report: &Report) -> Self {
        ReportForm {
            line: report.line.clone(),
            from_person: report.from_person.clone(),
            to_person: report.to_person.clone(),
            report_date: dates::format_iso(report.report_date),
            team: report.team.clone(),
            location: report.location.clone(),
            reference: report.reference.clone(),
            work_days: report.work_days.iter().map(WorkDayForm::from_work_day).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_form() -> ReportForm {
        ReportForm {
            line: "KIDATU-MOROGORO 220kV".to_string(),
            from_person: "J. Mwakyusa".to_string(),
            to_person: "Regional Manager".to_string(),
            report_date: "2025-03-15".to_string(),
            team: "Line Crew A".to_string(),
            location: "Morogoro".to_string(),
            reference: "WR/2025/11".to_string(),
            work_days: vec![
                WorkDayForm {
                    day_name: String::new(),
                    date: "2025-03-10".to_string(),
                    work_type: "normal".to_string(),
                    towers: vec![TowerForm {
                        number: "12".to_string(),
                        tower_type: "SS".to_string(),
                        insulators: InsulatorsForm {
                            r: "9".to_string(),
                            y: "9".to_string(),
                            b: "9".to_string(),
                        },
                        remarks: "ok".to_string(),
                    }],
                    no_work_reason: String::new(),
                    no_work_details: String::new(),
                    images: vec![],
                },
                WorkDayForm {
                    day_name: String::new(),
                    date: "2025-03-11".to_string(),
                    work_type: "nowork".to_string(),
                    towers: vec![],
                    no_work_reason: "RAIN".to_string(),
                    no_work_details: "heavy rain all day".to_string(),
                    images: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_coerce_count_permissive() {
        assert_eq!(coerce_count("9"), 9);
        assert_eq!(coerce_count(" 14 "), 14);
        assert_eq!(coerce_count(""), 0);
        assert_eq!(coerce_count("abc"), 0);
        assert_eq!(coerce_count("-3"), 0);
    }

    #[test]
    fn test_into_report_field_mapping() {
        let report = sample_form().into_report();

        assert_eq!(report.line, "KIDATU-MOROGORO 220kV");
        assert_eq!(report.report_date, NaiveDate::from_ymd_opt(2025, 3, 15));
        assert_eq!(report.status, ReportStatus::Draft);
        assert_eq!(report.work_days.len(), 2);

        let monday = &report.work_days[0];
        assert_eq!(monday.work_type, WorkType::Normal);
        assert_eq!(monday.towers.len(), 1);
        assert_eq!(monday.towers[0].insulators_r, 9);
        assert!(monday.no_work_reason.is_none());

        let tuesday = &report.work_days[1];
        assert_eq!(tuesday.work_type, WorkType::NoWork);
        assert!(tuesday.towers.is_empty());
        assert_eq!(tuesday.no_work_reason, Some(NoWorkReason::Rain));
        assert_eq!(tuesday.no_work_details, "heavy rain all day");
    }

    #[test]
    fn test_nowork_day_drops_towers() {
        // A nowork day must not carry towers even if the form posts some
        let mut form = sample_form();
        form.work_days[1].towers = vec![TowerForm {
            number: "99".to_string(),
            ..TowerForm::default()
        }];

        let report = form.into_report();
        assert!(report.work_days[1].towers.is_empty());
        assert!(report.work_days[1].no_work_reason.is_some());
    }

    #[test]
    fn test_normal_day_drops_no_work_fields() {
        let mut form = sample_form();
        form.work_days[0].no_work_reason = "RAIN".to_string();
        form.work_days[0].no_work_details = "stray value".to_string();

        let report = form.into_report();
        assert!(report.work_days[0].no_work_reason.is_none());
        assert!(report.work_days[0].no_work_details.is_empty());
    }

    #[test]
    fn test_malformed_date_becomes_absent() {
        let mut form = sample_form();
        form.report_date = "15/03/2025".to_string();
        form.work_days[0].date = String::new();

        let report = form.into_report();
        assert_eq!(report.report_date, None);
        assert_eq!(report.work_days[0].date, None);
    }

    #[test]
    fn test_form_model_round_trip() {
        let report = sample_form().into_report();
        let form = ReportForm::from_report(&report);
        let round_tripped = form.clone().into_report();

        assert_eq!(report, round_tripped);
        // Derived day names are filled in on the way out
        assert_eq!(form.work_days[0].day_name, "Monday");
        assert_eq!(form.work_days[1].day_name, "Tuesday");
    }
}
