//! Spreadsheet export.
//!
//! Produces the flattened row layouts of the paper weekly report and
//! the monthly summary, serialized as CSV. The column-merging quirks
//! (line label only on the first work day, day label once per day
//! group) reproduce the paper form the export replaces.

use crate::error::{AppError, AppResult};
use crate::models::dates;
use crate::models::report::Report;
use crate::models::summary::{self, MonthlySummary};

/// Build the weekly report rows.
///
/// Layout, top to bottom: letterhead; FROM/TO; team/location;
/// OUR REF/DATE; two-row column header; one row per tower (the first
/// row of each work day carries the day label, and the line label only
/// on the first work day); one row per no-work day; the TOTAL DISC
/// row; the PREPARED BY row.
pub fn weekly_rows(report: &Report, org_name: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    rows.push(vec![org_name.to_string()]);
    rows.push(vec![
        format!("FROM: {}", report.from_person),
        String::new(),
        String::new(),
        String::new(),
        format!("TO: {}", report.to_person),
    ]);
    rows.push(vec![
        report.team.clone(),
        String::new(),
        String::new(),
        String::new(),
        report.location.clone(),
    ]);
    rows.push(vec![
        format!("OUR REF: {}", report.reference),
        String::new(),
        String::new(),
        String::new(),
        format!("DATE: {}", dates::format_dmy(report.report_date)),
    ]);
    rows.push(
        [
            "LINE",
            "WORKING DAYS",
            "TOWER No.",
            "TOWER TYPE",
            "WASHED INSULATORS",
            "",
            "",
            "TOTAL",
            "REMARKS",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    );
    rows.push(
        ["", "", "", "", "R", "Y", "B", "", ""]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );

    let totals = summary::summarize(report);

    for (day_index, day) in report.work_days.iter().enumerate() {
        let line_cell = if day_index == 0 {
            report.line.clone()
        } else {
            String::new()
        };
        let day_label = format!("{} {}", day.day_name(), dates::format_dmy(day.date));

        if day.is_normal() {
            for (tower_index, tower) in day.towers.iter().enumerate() {
                let mut row = if tower_index == 0 {
                    vec![line_cell.clone(), day_label.clone()]
                } else {
                    vec![String::new(), String::new()]
                };
                row.push(tower.number.clone());
                row.push(tower.tower_type.as_str().to_string());
                row.push(tower.insulators_r.to_string());
                row.push(tower.insulators_y.to_string());
                row.push(tower.insulators_b.to_string());
                row.push(tower.total().to_string());
                row.push(tower.remarks.clone());
                rows.push(row);
            }
        } else {
            let reason = day
                .no_work_reason
                .map(|r| r.as_str().to_string())
                .unwrap_or_default();
            rows.push(vec![
                line_cell,
                day_label,
                reason,
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                day.no_work_details.clone(),
            ]);
        }
    }

    rows.push(vec![
        String::new(),
        "TOTAL DISC".to_string(),
        String::new(),
        String::new(),
        totals.total_r.to_string(),
        totals.total_y.to_string(),
        totals.total_b.to_string(),
        totals.insulator_total().to_string(),
        String::new(),
    ]);
    rows.push(vec![format!("PREPARED BY: {}", report.from_person)]);

    rows
}

/// Weekly export file name; the report date is embedded with its
/// separators stripped.
pub fn weekly_file_name(report: &Report) -> String {
    format!("weekly_report_{}.csv", dates::format_compact(report.report_date))
}

/// Serialize the weekly report to CSV bytes.
pub fn weekly_csv(report: &Report, org_name: &str) -> AppResult<Vec<u8>> {
    rows_to_csv(weekly_rows(report, org_name))
}

/// Build the monthly summary rows.
pub fn monthly_rows(summary: &MonthlySummary, line: &str, org_name: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    rows.push(vec![org_name.to_string()]);
    rows.push(vec!["MONTHLY REPORT SUMMARY".to_string()]);
    rows.push(vec![String::new()]);
    rows.push(vec![
        "Month:".to_string(),
        dates::month_name(summary.month).to_string(),
    ]);
    rows.push(vec!["Year:".to_string(), summary.year.to_string()]);
    rows.push(vec!["Line:".to_string(), line.to_string()]);
    rows.push(vec![String::new()]);

    rows.push(vec!["SUMMARY".to_string()]);
    rows.push(vec![
        "Total Weekly Reports:".to_string(),
        summary.report_count.to_string(),
    ]);
    rows.push(vec![
        "Total Work Days:".to_string(),
        summary.totals.work_day_count.to_string(),
    ]);
    rows.push(vec![
        "Total Towers:".to_string(),
        summary.totals.tower_count.to_string(),
    ]);
    rows.push(vec![
        "Total Insulators:".to_string(),
        summary.totals.insulator_total().to_string(),
    ]);
    rows.push(vec![String::new()]);

    rows.push(vec!["WEEKLY REPORTS".to_string()]);
    rows.push(
        ["Week", "Date", "Team", "Work Days", "Towers", "Insulators"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );

    for row in &summary.rows {
        let week_label = row
            .report_date
            .map(|d| format!("Week {}", chrono::Datelike::day(&d)))
            .unwrap_or_default();
        rows.push(vec![
            week_label,
            dates::format_dmy(row.report_date),
            row.team.clone(),
            row.work_day_count.to_string(),
            row.tower_count.to_string(),
            row.insulator_total.to_string(),
        ]);
    }

    rows
}

/// Monthly export file name.
pub fn monthly_file_name(month: u32, year: i32) -> String {
    format!("monthly_report_{}_{}.csv", dates::month_name(month), year)
}

/// Serialize a monthly summary to CSV bytes.
pub fn monthly_csv(summary: &MonthlySummary, line: &str, org_name: &str) -> AppResult<Vec<u8>> {
    rows_to_csv(monthly_rows(summary, line, org_name))
}

fn rows_to_csv(rows: Vec<Vec<String>>) -> AppResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record(&row)
            .map_err(|e| AppError::Export(format!("Failed to write CSV row: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Export(format!("Failed to flush CSV: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dates::parse_iso;
    use crate::models::report::{
        NoWorkReason, ReportStatus, Tower, TowerType, WorkDay, WorkType,
    };
    use crate::models::summary::summarize_month;

    const ORG: &str = "TANZANIA ELECTRIC SUPPLY COMPANY LIMITED";

    fn tower(number: &str, r: i32, y: i32, b: i32) -> Tower {
        Tower {
            number: number.to_string(),
            tower_type: TowerType::Ss,
            insulators_r: r,
            insulators_y: y,
            insulators_b: b,
            remarks: String::new(),
        }
    }

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
            status: ReportStatus::Completed,
            created_at: None,
            work_days: vec![
                WorkDay {
                    date: parse_iso("2025-03-10"),
                    work_type: WorkType::Normal,
                    towers: vec![tower("12", 9, 9, 9), tower("13", 5, 0, 3)],
                    no_work_reason: None,
                    no_work_details: String::new(),
                    images: vec![],
                },
                WorkDay {
                    date: parse_iso("2025-03-11"),
                    work_type: WorkType::Normal,
                    towers: vec![tower("14", 9, 9, 9)],
                    no_work_reason: None,
                    no_work_details: String::new(),
                    images: vec![],
                },
                WorkDay {
                    date: parse_iso("2025-03-12"),
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
    fn test_weekly_header_block() {
        let rows = weekly_rows(&sample_report(), ORG);

        assert_eq!(rows[0], vec![ORG.to_string()]);
        assert_eq!(rows[1][0], "FROM: J. Mwakyusa");
        assert_eq!(rows[1][4], "TO: Regional Manager");
        assert_eq!(rows[2][0], "Line Crew A");
        assert_eq!(rows[2][4], "Morogoro");
        assert_eq!(rows[3][0], "OUR REF: WR/2025/11");
        assert_eq!(rows[3][4], "DATE: 15/03/2025");
        assert_eq!(rows[4][0], "LINE");
        assert_eq!(rows[5][4], "R");
        assert_eq!(rows[5][6], "B");
    }

    #[test]
    fn test_weekly_line_label_only_on_first_work_day() {
        let rows = weekly_rows(&sample_report(), ORG);

        // Tower rows start after the 6 header rows
        let day1_first = &rows[6];
        let day1_second = &rows[7];
        let day2_first = &rows[8];
        let nowork = &rows[9];

        assert_eq!(day1_first[0], "KIDATU-MOROGORO 220kV");
        assert_eq!(day1_first[1], "Monday 10/03/2025");
        assert_eq!(day1_first[2], "12");

        // Second tower of the same day repeats neither label
        assert_eq!(day1_second[0], "");
        assert_eq!(day1_second[1], "");
        assert_eq!(day1_second[2], "13");

        // Later days carry their day label but not the line
        assert_eq!(day2_first[0], "");
        assert_eq!(day2_first[1], "Tuesday 11/03/2025");

        // No-work day row: reason in the tower-number column, details in remarks
        assert_eq!(nowork[1], "Wednesday 12/03/2025");
        assert_eq!(nowork[2], "RAIN");
        assert_eq!(nowork[8], "heavy rain");
    }

    #[test]
    fn test_weekly_totals_and_footer() {
        let rows = weekly_rows(&sample_report(), ORG);

        let totals = &rows[10];
        assert_eq!(totals[1], "TOTAL DISC");
        assert_eq!(totals[4], "23"); // 9 + 5 + 9
        assert_eq!(totals[5], "18"); // 9 + 0 + 9
        assert_eq!(totals[6], "21"); // 9 + 3 + 9
        assert_eq!(totals[7], "62");

        assert_eq!(rows[11], vec!["PREPARED BY: J. Mwakyusa".to_string()]);
    }

    #[test]
    fn test_weekly_tower_row_shape() {
        let rows = weekly_rows(&sample_report(), ORG);
        let row = &rows[7];

        assert_eq!(row.len(), 9);
        assert_eq!(row[3], "SS");
        assert_eq!(row[4], "5");
        assert_eq!(row[5], "0");
        assert_eq!(row[6], "3");
        assert_eq!(row[7], "8");
    }

    #[test]
    fn test_weekly_file_name_strips_date_separators() {
        assert_eq!(weekly_file_name(&sample_report()), "weekly_report_20250315.csv");
    }

    #[test]
    fn test_weekly_csv_serializes() {
        let bytes = weekly_csv(&sample_report(), ORG).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with(ORG));
        assert!(text.contains("TOTAL DISC"));
        assert!(text.contains("PREPARED BY: J. Mwakyusa"));
    }

    #[test]
    fn test_monthly_rows() {
        let mut report = sample_report();
        report.id = Some(uuid::Uuid::new_v4());
        let summary = summarize_month(std::slice::from_ref(&report), 3, 2025);

        let rows = monthly_rows(&summary, &report.line, ORG);

        assert_eq!(rows[1], vec!["MONTHLY REPORT SUMMARY".to_string()]);
        assert!(rows.contains(&vec!["Month:".to_string(), "March".to_string()]));
        assert!(rows.contains(&vec!["Total Weekly Reports:".to_string(), "1".to_string()]));
        assert!(rows.contains(&vec!["Total Work Days:".to_string(), "2".to_string()]));
        assert!(rows.contains(&vec!["Total Towers:".to_string(), "3".to_string()]));

        let breakdown = rows.last().unwrap();
        assert_eq!(breakdown[0], "Week 15");
        assert_eq!(breakdown[1], "15/03/2025");
        assert_eq!(breakdown[2], "Line Crew A");
    }

    #[test]
    fn test_monthly_file_name() {
        assert_eq!(monthly_file_name(3, 2025), "monthly_report_March_2025.csv");
    }
}
