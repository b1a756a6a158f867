//! Report aggregation.
//!
//! Pure functions over the domain model. The interactive form has no
//! dependency tracking, so callers recompute after every edit; nothing
//! here is cached.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::dates;
use super::report::{Report, ReportStatus};

/// Per-report (or per-period) wash totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct WashTotals {
    /// Normal work days only; no-work days do not count.
    pub work_day_count: i32,
    pub tower_count: i32,
    pub total_r: i32,
    pub total_y: i32,
    pub total_b: i32,
}

impl WashTotals {
    /// Sum across the three phases.
    pub fn insulator_total(&self) -> i32 {
        self.total_r + self.total_y + self.total_b
    }

    fn add_report(&mut self, report: &Report) {
        for day in &report.work_days {
            if !day.is_normal() {
                continue;
            }
            self.work_day_count += 1;
            for tower in &day.towers {
                self.tower_count += 1;
                self.total_r += tower.insulators_r;
                self.total_y += tower.insulators_y;
                self.total_b += tower.insulators_b;
            }
        }
    }
}

/// Compute the totals for one report.
pub fn summarize(report: &Report) -> WashTotals {
    let mut totals = WashTotals::default();
    totals.add_report(report);
    totals
}

/// One report's contribution to a monthly summary table.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyBreakdownRow {
    pub report_id: Option<Uuid>,
    pub report_date: Option<NaiveDate>,
    pub team: String,
    pub work_day_count: i32,
    pub tower_count: i32,
    pub insulator_total: i32,
}

/// Aggregation of all completed reports in a month.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlySummary {
    /// 1-based month number.
    pub month: u32,
    pub year: i32,
    pub report_count: i32,
    pub totals: WashTotals,
    pub rows: Vec<MonthlyBreakdownRow>,
}

impl MonthlySummary {
    /// Display label such as "March 2025".
    pub fn period_label(&self) -> String {
        format!("{} {}", dates::month_name(self.month), self.year)
    }
}

/// Aggregate a collection of reports for one month.
///
/// Only completed reports whose report date falls in the requested
/// month and year contribute; drafts and out-of-period reports are
/// skipped entirely.
pub fn summarize_month(reports: &[Report], month: u32, year: i32) -> MonthlySummary {
    let mut totals = WashTotals::default();
    let mut rows = Vec::new();

    for report in reports {
        if report.status != ReportStatus::Completed {
            continue;
        }
        let Some(date) = report.report_date else {
            continue;
        };
        if date.month() != month || date.year() != year {
            continue;
        }

        totals.add_report(report);

        let report_totals = summarize(report);
        rows.push(MonthlyBreakdownRow {
            report_id: report.id,
            report_date: report.report_date,
            team: report.team.clone(),
            work_day_count: report_totals.work_day_count,
            tower_count: report_totals.tower_count,
            insulator_total: report_totals.insulator_total(),
        });
    }

    MonthlySummary {
        month,
        year,
        report_count: rows.len() as i32,
        totals,
        rows,
    }
}
