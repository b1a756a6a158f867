//! HTML rendering for report previews and print views.
//!
//! Templates are embedded at compile time and rendered with minijinja.
//! The print document wraps a rendered body and triggers the browser
//! print dialog on load.

use chrono::Datelike;
use minijinja::Environment;
use serde::Serialize;

use crate::error::AppResult;
use crate::models::dates;
use crate::models::report::Report;
use crate::models::summary::{self, MonthlySummary};

#[derive(Serialize)]
struct TowerView {
    number: String,
    tower_type: String,
    r: i32,
    y: i32,
    b: i32,
    total: i32,
    remarks: String,
}

#[derive(Serialize)]
struct ImageView {
    url: String,
    caption: String,
    name: String,
}

#[derive(Serialize)]
struct DayView {
    label: String,
    is_normal: bool,
    towers: Vec<TowerView>,
    reason: String,
    details: String,
    images: Vec<ImageView>,
}

#[derive(Serialize)]
struct TotalsView {
    r: i32,
    y: i32,
    b: i32,
    total: i32,
}

#[derive(Serialize)]
struct ReportView {
    org: String,
    line: String,
    from_person: String,
    to_person: String,
    date: String,
    team: String,
    location: String,
    reference: String,
    days: Vec<DayView>,
    totals: TotalsView,
}

#[derive(Serialize)]
struct MonthlyTotalsView {
    work_days: i32,
    towers: i32,
    insulators: i32,
}

#[derive(Serialize)]
struct MonthlyRowView {
    week: String,
    date: String,
    team: String,
    work_days: i32,
    towers: i32,
    insulators: i32,
}

#[derive(Serialize)]
struct MonthlyView {
    org: String,
    period: String,
    line: String,
    report_count: i32,
    totals: MonthlyTotalsView,
    rows: Vec<MonthlyRowView>,
}

#[derive(Serialize)]
struct PrintView {
    title: String,
    body: String,
}

fn report_view(report: &Report, org_name: &str) -> ReportView {
    let totals = summary::summarize(report);

    let days = report
        .work_days
        .iter()
        .map(|day| DayView {
            label: format!("{} - {}", day.day_name(), dates::format_dmy(day.date)),
            is_normal: day.is_normal(),
            towers: day
                .towers
                .iter()
                .map(|t| TowerView {
                    number: t.number.clone(),
                    tower_type: t.tower_type.as_str().to_string(),
                    r: t.insulators_r,
                    y: t.insulators_y,
                    b: t.insulators_b,
                    total: t.total(),
                    remarks: t.remarks.clone(),
                })
                .collect(),
            reason: day
                .no_work_reason
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
            details: day.no_work_details.clone(),
            images: day
                .images
                .iter()
                .map(|img| ImageView {
                    url: img.image_url.clone(),
                    caption: img.caption.clone(),
                    name: img.file_name.clone(),
                })
                .collect(),
        })
        .collect();

    ReportView {
        org: org_name.to_string(),
        line: report.line.clone(),
        from_person: report.from_person.clone(),
        to_person: report.to_person.clone(),
        date: dates::format_dmy(report.report_date),
        team: report.team.clone(),
        location: report.location.clone(),
        reference: report.reference.clone(),
        days,
        totals: TotalsView {
            r: totals.total_r,
            y: totals.total_y,
            b: totals.total_b,
            total: totals.insulator_total(),
        },
    }
}

fn monthly_view(summary: &MonthlySummary, line: &str, org_name: &str) -> MonthlyView {
    MonthlyView {
        org: org_name.to_string(),
        period: summary.period_label(),
        line: line.to_string(),
        report_count: summary.report_count,
        totals: MonthlyTotalsView {
            work_days: summary.totals.work_day_count,
            towers: summary.totals.tower_count,
            insulators: summary.totals.insulator_total(),
        },
        rows: summary
            .rows
            .iter()
            .map(|row| MonthlyRowView {
                week: row
                    .report_date
                    .map(|d| format!("Week {}", d.day()))
                    .unwrap_or_default(),
                date: dates::format_dmy(row.report_date),
                team: row.team.clone(),
                work_days: row.work_day_count,
                towers: row.tower_count,
                insulators: row.insulator_total,
            })
            .collect(),
    }
}

/// Template renderer shared across handlers.
#[derive(Clone)]
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        env.add_template("preview.html", include_str!("../templates/preview.html"))?;
        env.add_template("monthly.html", include_str!("../templates/monthly.html"))?;
        env.add_template("print.html", include_str!("../templates/print.html"))?;

        Ok(Renderer { env })
    }

    /// Render the report preview fragment.
    pub fn preview(&self, report: &Report, org_name: &str) -> AppResult<String> {
        let html = self
            .env
            .get_template("preview.html")?
            .render(report_view(report, org_name))?;
        Ok(html)
    }

    /// Render the printable report document (auto-triggers printing).
    pub fn print(&self, report: &Report, org_name: &str) -> AppResult<String> {
        let body = self.preview(report, org_name)?;
        let html = self.env.get_template("print.html")?.render(PrintView {
            title: "Weekly Report".to_string(),
            body,
        })?;
        Ok(html)
    }

    /// Render the monthly summary fragment.
    pub fn monthly(
        &self,
        summary: &MonthlySummary,
        line: &str,
        org_name: &str,
    ) -> AppResult<String> {
        let html = self
            .env
            .get_template("monthly.html")?
            .render(monthly_view(summary, line, org_name))?;
        Ok(html)
    }

    /// Render the printable monthly summary document.
    pub fn monthly_print(
        &self,
        summary: &MonthlySummary,
        line: &str,
        org_name: &str,
    ) -> AppResult<String> {
        let body = self.monthly(summary, line, org_name)?;
        let html = self.env.get_template("print.html")?.render(PrintView {
            title: "Monthly Report".to_string(),
            body,
        })?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dates::parse_iso;
    use crate::models::report::{
        ImageAttachment, NoWorkReason, ReportStatus, Tower, TowerType, WorkDay, WorkType,
    };
    use crate::models::summary::summarize_month;

    const ORG: &str = "TANZANIA ELECTRIC SUPPLY COMPANY LIMITED";

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
                    towers: vec![Tower {
                        number: "12".to_string(),
                        tower_type: TowerType::Ss,
                        insulators_r: 9,
                        insulators_y: 9,
                        insulators_b: 9,
                        remarks: "cleaned".to_string(),
                    }],
                    no_work_reason: None,
                    no_work_details: String::new(),
                    images: vec![ImageAttachment {
                        image_url: "http://storage/report-images/1_a.jpg".to_string(),
                        caption: "before".to_string(),
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
    fn test_preview_renders_report() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.preview(&sample_report(), ORG).unwrap();

        assert!(html.contains(ORG));
        assert!(html.contains("WEEKLY REPORT"));
        assert!(html.contains("KIDATU-MOROGORO 220kV"));
        assert!(html.contains("Monday - 10/03/2025"));
        assert!(html.contains("<td>12</td>"));
        assert!(html.contains("No Work:"));
        assert!(html.contains("RAIN"));
        assert!(html.contains("heavy rain"));
        assert!(html.contains("R Phase: 9"));
        assert!(html.contains("Total: 27"));
        assert!(html.contains("http://storage/report-images/1_a.jpg"));
    }

    #[test]
    fn test_print_wraps_preview_with_auto_print() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.print(&sample_report(), ORG).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("window.print()"));
        assert!(html.contains("WEEKLY REPORT"));
    }

    #[test]
    fn test_monthly_render() {
        let mut report = sample_report();
        report.id = Some(uuid::Uuid::new_v4());
        let summary = summarize_month(std::slice::from_ref(&report), 3, 2025);

        let renderer = Renderer::new().unwrap();
        let html = renderer.monthly(&summary, &report.line, ORG).unwrap();

        assert!(html.contains("Monthly Report: March 2025"));
        assert!(html.contains("Week 15"));
        assert!(html.contains("Line Crew A"));

        let print_html = renderer.monthly_print(&summary, &report.line, ORG).unwrap();
        assert!(print_html.contains("window.print()"));
    }
}
