//! End-to-end flow over the library surface: form shape in, validated
//! model, aggregation, persisted-row round trip, and export out.

use chrono::Utc;
use uuid::Uuid;

use linewash_lib::db::rows;
use linewash_lib::models::report::{NoWorkReason, ReportStatus, WorkType};
use linewash_lib::models::validation;
use linewash_lib::models::{
    InsulatorsForm, ReportForm, TowerForm, WorkDayForm, summary,
};
use linewash_lib::services::export;

const ORG: &str = "TANZANIA ELECTRIC SUPPLY COMPANY LIMITED";

fn tower_form(number: &str, r: &str, y: &str, b: &str) -> TowerForm {
    TowerForm {
        number: number.to_string(),
        tower_type: "SS".to_string(),
        insulators: InsulatorsForm {
            r: r.to_string(),
            y: y.to_string(),
            b: b.to_string(),
        },
        remarks: String::new(),
    }
}

fn week_form() -> ReportForm {
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
                towers: vec![
                    tower_form("12", "9", "9", "9"),
                    tower_form("13", "5", "0", "3"),
                ],
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
                no_work_details: String::new(),
                images: vec![],
            },
        ],
    }
}

#[test]
fn form_to_export_flow() {
    let model = week_form().into_report();

    // Validation passes
    assert_eq!(validation::validate(&model), Ok(()));

    // Aggregation matches the two-day scenario
    let totals = summary::summarize(&model);
    assert_eq!(totals.work_day_count, 1);
    assert_eq!(totals.tower_count, 2);
    assert_eq!(totals.total_r, 14);
    assert_eq!(totals.total_y, 9);
    assert_eq!(totals.total_b, 12);

    // Persisted-row round trip is field-equal modulo generated values
    let id = Uuid::new_v4();
    let now = Utc::now();
    let split = rows::to_rows(&model, id, ReportStatus::Completed, now).unwrap();
    let rebuilt = rows::from_rows(split.report, split.work_days, split.towers, split.images);

    assert_eq!(rebuilt.id, Some(id));
    assert_eq!(rebuilt.status, ReportStatus::Completed);
    assert_eq!(rebuilt.line, model.line);
    assert_eq!(rebuilt.work_days.len(), 2);
    assert_eq!(rebuilt.work_days[0].towers, model.work_days[0].towers);
    assert_eq!(rebuilt.work_days[1].work_type, WorkType::NoWork);
    assert_eq!(
        rebuilt.work_days[1].no_work_reason,
        Some(NoWorkReason::Rain)
    );

    // Re-derived summary is unchanged by the round trip
    assert_eq!(summary::summarize(&rebuilt), totals);

    // Export carries the layout and totals
    let csv = String::from_utf8(export::weekly_csv(&rebuilt, ORG).unwrap()).unwrap();
    assert!(csv.contains("KIDATU-MOROGORO 220kV"));
    assert!(csv.contains("Monday 10/03/2025"));
    assert!(csv.contains("RAIN"));
    assert!(csv.contains("TOTAL DISC"));
    assert_eq!(export::weekly_file_name(&rebuilt), "weekly_report_20250315.csv");
}

#[test]
fn invalid_form_blocks_the_flow() {
    let mut form = week_form();
    form.work_days[0].towers.clear();

    let model = form.into_report();
    let err = validation::validate(&model).unwrap_err();
    assert_eq!(err.to_string(), "Please add at least one tower for Monday");
}

#[test]
fn monthly_flow_excludes_drafts() {
    let mut completed = week_form().into_report();
    completed.id = Some(Uuid::new_v4());
    completed.status = ReportStatus::Completed;

    let mut draft = week_form().into_report();
    draft.id = Some(Uuid::new_v4());

    let monthly = summary::summarize_month(&[completed, draft], 3, 2025);
    assert_eq!(monthly.report_count, 1);
    assert_eq!(monthly.totals.total_r, 14);

    let csv = String::from_utf8(
        export::monthly_csv(&monthly, "KIDATU-MOROGORO 220kV", ORG).unwrap(),
    )
    .unwrap();
    assert!(csv.contains("MONTHLY REPORT SUMMARY"));
    assert!(csv.contains("Total Weekly Reports:,1"));
}
