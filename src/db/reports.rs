//! Database queries for reports and their nested rows.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{image, report, tower, work_day};
use crate::error::{AppError, AppResult};
use crate::models::report::{Report, ReportFilter, ReportStatus, ReportSummaryRow};

use super::rows;
use super::DbPool;

/// Dashboard counters.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_reports: u64,
    pub completed_reports: u64,
    pub draft_reports: u64,
    pub total_towers: u64,
}

fn to_summary(row: report::Model) -> ReportSummaryRow {
    ReportSummaryRow {
        id: row.id,
        line: row.line,
        from_person: row.from_person,
        to_person: row.to_person,
        report_date: row.report_date,
        team: row.team,
        location: row.location,
        reference: row.reference,
        status: ReportStatus::parse(&row.status).unwrap_or(ReportStatus::Draft),
        created_at: row.created_at,
    }
}

impl DbPool {
    /// Save a report and all of its child rows.
    ///
    /// The report row, work days, towers, and images are written inside
    /// one transaction; a failure anywhere rolls the whole save back,
    /// leaving no orphaned children.
    ///
    /// A report with an id replaces its existing child rows wholesale.
    /// Status only ever escalates: once completed, a report stays
    /// completed no matter how it is saved again.
    ///
    /// Returns the report id and the status that was persisted.
    pub async fn save_report(
        &self,
        report_model: &Report,
        completed: bool,
    ) -> AppResult<(Uuid, ReportStatus)> {
        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let (report_id, status, created_at, is_update) = match report_model.id {
            Some(id) => {
                let existing = report::Entity::find_by_id(id)
                    .one(&txn)
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to load report: {}", e)))?
                    .ok_or_else(|| AppError::NotFound(format!("Report {}", id)))?;

                let status = if existing.status == ReportStatus::Completed.as_str() || completed {
                    ReportStatus::Completed
                } else {
                    ReportStatus::Draft
                };

                (id, status, existing.created_at, true)
            }
            None => {
                let status = if completed {
                    ReportStatus::Completed
                } else {
                    ReportStatus::Draft
                };
                (Uuid::new_v4(), status, Utc::now(), false)
            }
        };

        let report_rows = rows::to_rows(report_model, report_id, status, created_at)?;

        if is_update {
            // Towers and images cascade when their work days go
            work_day::Entity::delete_many()
                .filter(work_day::Column::ReportId.eq(report_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    AppError::Database(format!("Failed to replace work days: {}", e))
                })?;

            report_rows
                .report
                .into_active_model()
                .reset_all()
                .update(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to update report: {}", e)))?;
        } else {
            report_rows
                .report
                .into_active_model()
                .reset_all()
                .insert(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to insert report: {}", e)))?;
        }

        for day_row in report_rows.work_days {
            day_row
                .into_active_model()
                .reset_all()
                .insert(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to insert work day: {}", e)))?;
        }

        for tower_row in report_rows.towers {
            tower_row
                .into_active_model()
                .reset_all()
                .insert(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to insert tower: {}", e)))?;
        }

        for image_row in report_rows.images {
            image_row
                .into_active_model()
                .reset_all()
                .insert(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to insert image: {}", e)))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit report save: {}", e)))?;

        Ok((report_id, status))
    }

    /// List report summary rows, newest report date first.
    pub async fn list_reports(&self, filter: &ReportFilter) -> AppResult<Vec<ReportSummaryRow>> {
        let mut select = report::Entity::find();

        if let Some(status) = filter.status {
            select = select.filter(report::Column::Status.eq(status.as_str()));
        }

        if let Some(ref line) = filter.line {
            select = select.filter(report::Column::Line.eq(line.clone()));
        }

        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", search);
            select = select.filter(Expr::cust_with_values(
                "(line ILIKE $1 OR team ILIKE $2)",
                [pattern.clone(), pattern],
            ));
        }

        let rows = select
            .order_by_desc(report::Column::ReportDate)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list reports: {}", e)))?;

        Ok(rows.into_iter().map(to_summary).collect())
    }

    /// Load a fully nested report by id.
    pub async fn get_report_details(&self, id: Uuid) -> AppResult<Option<Report>> {
        let Some(report_row) = report::Entity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get report: {}", e)))?
        else {
            return Ok(None);
        };

        let day_rows = work_day::Entity::find()
            .filter(work_day::Column::ReportId.eq(id))
            .order_by_asc(work_day::Column::WorkDate)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get work days: {}", e)))?;

        let day_ids: Vec<Uuid> = day_rows.iter().map(|d| d.id).collect();

        let tower_rows = tower::Entity::find()
            .filter(tower::Column::WorkDayId.is_in(day_ids.clone()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get towers: {}", e)))?;

        let image_rows = image::Entity::find()
            .filter(image::Column::WorkDayId.is_in(day_ids))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get images: {}", e)))?;

        Ok(Some(rows::from_rows(
            report_row, day_rows, tower_rows, image_rows,
        )))
    }

    /// Delete a report; child rows cascade.
    pub async fn delete_report(&self, id: Uuid) -> AppResult<()> {
        let result = report::Entity::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete report: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Report {}", id)));
        }

        Ok(())
    }

    /// Load the fully nested completed reports for one line, for
    /// monthly aggregation.
    pub async fn completed_reports_for_line(&self, line: &str) -> AppResult<Vec<Report>> {
        let filter = ReportFilter {
            status: Some(ReportStatus::Completed),
            line: Some(line.to_string()),
            search: None,
        };

        let summaries = self.list_reports(&filter).await?;

        let mut reports = Vec::with_capacity(summaries.len());
        for summary in summaries {
            if let Some(report_model) = self.get_report_details(summary.id).await? {
                reports.push(report_model);
            }
        }

        Ok(reports)
    }

    /// Dashboard counters: report counts by status plus total towers.
    pub async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        let total_reports = report::Entity::find()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count reports: {}", e)))?;

        let completed_reports = report::Entity::find()
            .filter(report::Column::Status.eq(ReportStatus::Completed.as_str()))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count completed reports: {}", e)))?;

        let draft_reports = report::Entity::find()
            .filter(report::Column::Status.eq(ReportStatus::Draft.as_str()))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count draft reports: {}", e)))?;

        let total_towers = tower::Entity::find()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count towers: {}", e)))?;

        Ok(DashboardStats {
            total_reports,
            completed_reports,
            draft_reports,
            total_towers,
        })
    }
}
