//! Pure mappings between the domain model and the persisted row shapes.
//!
//! Splitting a report into flat rows and re-nesting rows back into a
//! report are both side-effect free; the query layer only moves the
//! results in and out of the database.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entity::{image, report, tower, work_day};
use crate::error::{AppError, AppResult};
use crate::models::report::{
    ImageAttachment, NoWorkReason, Report, ReportStatus, Tower, TowerType, WorkDay, WorkType,
};

/// A report split into its persisted row shapes, ids assigned.
#[derive(Debug, Clone)]
pub struct ReportRows {
    pub report: report::Model,
    pub work_days: Vec<work_day::Model>,
    pub towers: Vec<tower::Model>,
    pub images: Vec<image::Model>,
}

/// Flatten a report into row shapes, generating child ids.
///
/// Towers are only materialized for normal work days; the no-work
/// columns stay NULL on normal days. Fails if a work day has no date
/// (validation rejects that earlier).
pub fn to_rows(
    report: &Report,
    report_id: Uuid,
    status: ReportStatus,
    created_at: DateTime<Utc>,
) -> AppResult<ReportRows> {
    let report_date = report
        .report_date
        .ok_or_else(|| AppError::InvalidInput("Report has no report date".to_string()))?;

    let report_row = report::Model {
        id: report_id,
        line: report.line.clone(),
        from_person: report.from_person.clone(),
        to_person: report.to_person.clone(),
        report_date,
        team: report.team.clone(),
        location: report.location.clone(),
        reference: report.reference.clone(),
        status: status.as_str().to_string(),
        created_at,
    };

    let mut work_day_rows = Vec::new();
    let mut tower_rows = Vec::new();
    let mut image_rows = Vec::new();

    for (day_index, day) in report.work_days.iter().enumerate() {
        let work_date = day
            .date
            .ok_or_else(|| AppError::InvalidInput("Work day has no date".to_string()))?;
        let day_id = Uuid::new_v4();

        work_day_rows.push(work_day::Model {
            id: day_id,
            report_id,
            day_name: day.day_name().to_string(),
            work_date,
            work_type: day.work_type.as_str().to_string(),
            no_work_reason: day.no_work_reason.map(|r| r.as_str().to_string()),
            no_work_details: match day.work_type {
                WorkType::NoWork if !day.no_work_details.is_empty() => {
                    Some(day.no_work_details.clone())
                }
                _ => None,
            },
            position: day_index as i32,
        });

        if day.is_normal() {
            for (tower_index, t) in day.towers.iter().enumerate() {
                tower_rows.push(tower::Model {
                    id: Uuid::new_v4(),
                    work_day_id: day_id,
                    tower_number: t.number.clone(),
                    tower_type: t.tower_type.as_str().to_string(),
                    insulators_r: t.insulators_r,
                    insulators_y: t.insulators_y,
                    insulators_b: t.insulators_b,
                    remarks: t.remarks.clone(),
                    position: tower_index as i32,
                });
            }
        }

        for img in &day.images {
            image_rows.push(image::Model {
                id: Uuid::new_v4(),
                work_day_id: day_id,
                image_url: img.image_url.clone(),
                caption: img.caption.clone(),
                file_name: img.file_name.clone(),
            });
        }
    }

    Ok(ReportRows {
        report: report_row,
        work_days: work_day_rows,
        towers: tower_rows,
        images: image_rows,
    })
}

/// Re-nest persisted rows into a report.
///
/// Work days are re-joined to their towers and images by foreign key,
/// ordered chronologically (insertion order breaking ties), and the
/// day name is re-derived from the stored date; a stored `day_name`
/// that disagrees with the date is ignored.
pub fn from_rows(
    report_row: report::Model,
    mut work_day_rows: Vec<work_day::Model>,
    tower_rows: Vec<tower::Model>,
    image_rows: Vec<image::Model>,
) -> Report {
    work_day_rows.sort_by(|a, b| {
        a.work_date
            .cmp(&b.work_date)
            .then(a.position.cmp(&b.position))
    });

    let mut towers_by_day: HashMap<Uuid, Vec<tower::Model>> = HashMap::new();
    for row in tower_rows {
        towers_by_day.entry(row.work_day_id).or_default().push(row);
    }
    for day_towers in towers_by_day.values_mut() {
        day_towers.sort_by_key(|t| t.position);
    }

    let mut images_by_day: HashMap<Uuid, Vec<image::Model>> = HashMap::new();
    for row in image_rows {
        images_by_day.entry(row.work_day_id).or_default().push(row);
    }

    let work_days = work_day_rows
        .into_iter()
        .map(|day_row| {
            let work_type = WorkType::parse(&day_row.work_type).unwrap_or(WorkType::Normal);
            let towers = towers_by_day
                .remove(&day_row.id)
                .unwrap_or_default()
                .into_iter()
                .map(|t| Tower {
                    number: t.tower_number,
                    tower_type: TowerType::parse(&t.tower_type).unwrap_or(TowerType::Ss),
                    insulators_r: t.insulators_r,
                    insulators_y: t.insulators_y,
                    insulators_b: t.insulators_b,
                    remarks: t.remarks,
                })
                .collect();
            let images = images_by_day
                .remove(&day_row.id)
                .unwrap_or_default()
                .into_iter()
                .map(|img| ImageAttachment {
                    image_url: img.image_url,
                    caption: img.caption,
                    file_name: img.file_name,
                })
                .collect();

            WorkDay {
                date: Some(day_row.work_date),
                work_type,
                towers,
                no_work_reason: day_row
                    .no_work_reason
                    .as_deref()
                    .and_then(NoWorkReason::parse),
                no_work_details: day_row.no_work_details.unwrap_or_default(),
                images,
            }
        })
        .collect();

    Report {
        id: Some(report_row.id),
        line: report_row.line,
        from_person: report_row.from_person,
        to_person: report_row.to_person,
        report_date: Some(report_row.report_date),
        team: report_row.team,
        location: report_row.location,
        reference: report_row.reference,
        status: ReportStatus::parse(&report_row.status).unwrap_or(ReportStatus::Draft),
        created_at: Some(report_row.created_at),
        work_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dates::parse_iso;

    fn sample_report() -> Report {
        Report {
            id: None,
            line: "KIDATU-MOROGORO 220kV".to_string(),
            from_person: "J. Mwakyusa".to_string(),
            to_person: "Regional Manager".to_string(),
            report_date: parse_iso("2025-03-15"),
            team: "Line Crew A".to_string(),
            location: "Morogoro".to_string(),
            reference: "WR/2025/11".to_string(),
            status: ReportStatus::Draft,
            created_at: None,
            work_days: vec![
                WorkDay {
                    date: parse_iso("2025-03-10"),
                    work_type: WorkType::Normal,
                    towers: vec![
                        Tower {
                            number: "12".to_string(),
                            tower_type: TowerType::Ss,
                            insulators_r: 9,
                            insulators_y: 9,
                            insulators_b: 9,
                            remarks: "ok".to_string(),
                        },
                        Tower {
                            number: "13".to_string(),
                            tower_type: TowerType::Tt,
                            insulators_r: 5,
                            insulators_y: 0,
                            insulators_b: 3,
                            remarks: String::new(),
                        },
                    ],
                    no_work_reason: None,
                    no_work_details: String::new(),
                    images: vec![ImageAttachment {
                        image_url: "http://storage/report-images/1_a.jpg".to_string(),
                        caption: "tower 12 before".to_string(),
                        file_name: "a.jpg".to_string(),
                    }],
                },
                WorkDay {
                    date: parse_iso("2025-03-11"),
                    work_type: WorkType::NoWork,
                    towers: vec![],
                    no_work_reason: Some(NoWorkReason::Rain),
                    no_work_details: "heavy rain".to_string(),
                    images: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_rows_round_trip() {
        let report = sample_report();
        let id = Uuid::new_v4();
        let now = Utc::now();

        let rows = to_rows(&report, id, ReportStatus::Completed, now).unwrap();
        assert_eq!(rows.work_days.len(), 2);
        assert_eq!(rows.towers.len(), 2);
        assert_eq!(rows.images.len(), 1);

        let rebuilt = from_rows(rows.report, rows.work_days, rows.towers, rows.images);

        // Field-equal except generated id/status/timestamp
        let mut expected = report;
        expected.id = Some(id);
        expected.status = ReportStatus::Completed;
        expected.created_at = Some(now);
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_round_trip_survives_shuffled_rows() {
        let report = sample_report();
        let id = Uuid::new_v4();
        let rows = to_rows(&report, id, ReportStatus::Draft, Utc::now()).unwrap();

        // The database returns child rows in no particular order
        let mut towers = rows.towers.clone();
        towers.reverse();
        let mut work_days = rows.work_days.clone();
        work_days.reverse();

        let rebuilt = from_rows(rows.report, work_days, towers, rows.images);
        assert_eq!(rebuilt.work_days[0].towers[0].number, "12");
        assert_eq!(rebuilt.work_days[0].towers[1].number, "13");
        assert_eq!(rebuilt.work_days[1].work_type, WorkType::NoWork);
    }

    #[test]
    fn test_day_name_rederived_from_date() {
        let report = sample_report();
        let rows = to_rows(&report, Uuid::new_v4(), ReportStatus::Draft, Utc::now()).unwrap();

        // 2025-03-10 is a Monday; the stored label agrees
        assert_eq!(rows.work_days[0].day_name, "Monday");

        // Corrupt the stored label; the date stays authoritative
        let mut work_days = rows.work_days.clone();
        work_days[0].day_name = "Friday".to_string();
        let rebuilt = from_rows(rows.report, work_days, rows.towers, rows.images);
        assert_eq!(rebuilt.work_days[0].day_name(), "Monday");
    }

    #[test]
    fn test_no_work_columns_nullable() {
        let report = sample_report();
        let rows = to_rows(&report, Uuid::new_v4(), ReportStatus::Draft, Utc::now()).unwrap();

        // Normal day leaves the no-work columns NULL
        assert_eq!(rows.work_days[0].no_work_reason, None);
        assert_eq!(rows.work_days[0].no_work_details, None);

        // No-work day fills them
        assert_eq!(rows.work_days[1].no_work_reason.as_deref(), Some("RAIN"));
        assert_eq!(rows.work_days[1].no_work_details.as_deref(), Some("heavy rain"));
    }

    #[test]
    fn test_missing_date_is_an_error() {
        let mut report = sample_report();
        report.work_days[0].date = None;

        let result = to_rows(&report, Uuid::new_v4(), ReportStatus::Draft, Utc::now());
        assert!(result.is_err());
    }
}
