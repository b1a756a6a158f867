//! Report CRUD endpoints.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::report::{Report, ReportFilter, ReportStatus, ReportSummaryRow};
use crate::models::summary::{self, WashTotals};
use crate::models::{ReportForm, validation};
use crate::services::SaveGuard;

/// Request body for saving a report.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveReportRequest {
    pub report: ReportForm,
    /// Submit as completed instead of saving a draft.
    #[serde(default)]
    pub completed: bool,
    /// Draft token guarding unsaved reports against double submission.
    #[serde(default)]
    pub client_token: Option<String>,
}

/// Response after saving a report.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveReportResponse {
    pub report_id: Uuid,
    pub status: ReportStatus,
    pub summary: WashTotals,
}

/// Report list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportListResponse {
    pub reports: Vec<ReportSummaryRow>,
}

/// Fully nested report details in the form shape, for viewing/editing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetailResponse {
    pub id: Uuid,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub summary: WashTotals,
    pub report: ReportForm,
}

fn validated_model(form: ReportForm) -> AppResult<Report> {
    let model = form.into_report();
    validation::validate(&model)?;
    Ok(model)
}

async fn persist(
    pool: &DbPool,
    guard: &SaveGuard,
    model: &Report,
    completed: bool,
    guard_key: Option<String>,
) -> AppResult<SaveReportResponse> {
    // Hold the in-flight marker for the duration of the save; a second
    // save attempt for the same key is rejected, not queued.
    let _ticket = match guard_key {
        Some(ref key) => Some(guard.begin(key).ok_or_else(|| {
            AppError::Conflict("A save for this report is already in progress".to_string())
        })?),
        None => None,
    };

    let (report_id, status) = pool.save_report(model, completed).await?;

    info!("Saved report {} (status: {})", report_id, status);

    Ok(SaveReportResponse {
        report_id,
        status,
        summary: summary::summarize(model),
    })
}

/// Save a new report as draft or submit it as completed.
#[utoipa::path(
    post,
    path = "/api/v1/reports",
    tag = "Reports",
    request_body = SaveReportRequest,
    responses(
        (status = 201, description = "Report saved", body = SaveReportResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 409, description = "A save is already in progress", body = crate::error::ErrorResponse)
    )
)]
#[post("/reports")]
pub async fn create_report(
    pool: web::Data<DbPool>,
    guard: web::Data<SaveGuard>,
    body: web::Json<SaveReportRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let model = validated_model(body.report)?;

    let guard_key = body.client_token.map(|token| format!("draft:{}", token));
    let response = persist(&pool, &guard, &model, body.completed, guard_key).await?;

    Ok(HttpResponse::Created().json(response))
}

/// Update an existing report.
///
/// Child rows are replaced wholesale; status only ever escalates to
/// completed, never back to draft.
#[utoipa::path(
    put,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    params(
        ("id" = String, Path, description = "Report UUID")
    ),
    request_body = SaveReportRequest,
    responses(
        (status = 200, description = "Report updated", body = SaveReportResponse),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse),
        (status = 409, description = "A save is already in progress", body = crate::error::ErrorResponse)
    )
)]
#[put("/reports/{id}")]
pub async fn update_report(
    pool: web::Data<DbPool>,
    guard: web::Data<SaveGuard>,
    path: web::Path<String>,
    body: web::Json<SaveReportRequest>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let body = body.into_inner();

    let mut model = validated_model(body.report)?;
    model.id = Some(id);

    let response = persist(
        &pool,
        &guard,
        &model,
        body.completed,
        Some(format!("report:{}", id)),
    )
    .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// List report summary rows with optional filters.
#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "Reports",
    params(
        ("status" = Option<String>, Query, description = "Filter by status (draft/completed)"),
        ("line" = Option<String>, Query, description = "Filter by line label"),
        ("search" = Option<String>, Query, description = "Search over line and team")
    ),
    responses(
        (status = 200, description = "List of reports", body = ReportListResponse)
    )
)]
#[get("/reports")]
pub async fn list_reports(
    pool: web::Data<DbPool>,
    query: web::Query<ReportFilter>,
) -> AppResult<HttpResponse> {
    let reports = pool.list_reports(&query).await?;

    Ok(HttpResponse::Ok().json(ReportListResponse { reports }))
}

/// Get a fully nested report by id.
#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    params(
        ("id" = String, Path, description = "Report UUID")
    ),
    responses(
        (status = 200, description = "Report details", body = ReportDetailResponse),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse)
    )
)]
#[get("/reports/{id}")]
pub async fn get_report(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    let model = pool
        .get_report_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {}", id)))?;

    Ok(HttpResponse::Ok().json(ReportDetailResponse {
        id,
        status: model.status,
        created_at: model.created_at.unwrap_or_default(),
        summary: summary::summarize(&model),
        report: ReportForm::from_report(&model),
    }))
}

/// Delete a report and all of its child rows.
#[utoipa::path(
    delete,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    params(
        ("id" = String, Path, description = "Report UUID")
    ),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse)
    )
)]
#[delete("/reports/{id}")]
pub async fn delete_report(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    pool.delete_report(id).await?;
    info!("Deleted report {}", id);

    Ok(HttpResponse::NoContent().finish())
}

/// Recompute the summary for an unsaved form.
///
/// The form recomputes after every edit; this is the full-recompute
/// contract, so no validation runs here.
#[utoipa::path(
    post,
    path = "/api/v1/reports/summary",
    tag = "Reports",
    request_body = ReportForm,
    responses(
        (status = 200, description = "Current totals", body = WashTotals)
    )
)]
#[post("/reports/summary")]
pub async fn recompute_summary(body: web::Json<ReportForm>) -> AppResult<HttpResponse> {
    let model = body.into_inner().into_report();

    Ok(HttpResponse::Ok().json(summary::summarize(&model)))
}

/// Configure report routes.
/// Note: More specific routes must be registered before generic ones.
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(recompute_summary)
        .service(create_report)
        .service(list_reports)
        // Generic {id} paths last
        .service(get_report)
        .service(update_report)
        .service(delete_report);
}
