//! Export and rendering endpoints: spreadsheet export, preview and
//! print views, monthly summaries, and the JSON backup dump.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::report::Report;
use crate::models::summary::{self, MonthlySummary};
use crate::models::{ReportForm, validation};
use crate::services::{Renderer, export};

/// Query parameters for monthly aggregation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MonthlyQuery {
    /// Line display label.
    pub line: String,
    /// 1-based month number.
    pub month: u32,
    pub year: i32,
}

/// Rendered preview response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewResponse {
    pub html: String,
}

/// Monthly summary response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyReportResponse {
    pub line: String,
    pub summary: MonthlySummary,
}

fn validated_model(form: ReportForm) -> AppResult<Report> {
    let model = form.into_report();
    validation::validate(&model)?;
    Ok(model)
}

async fn load_report(pool: &DbPool, path: web::Path<String>) -> AppResult<Report> {
    let id = Uuid::parse_str(&path.into_inner())?;

    pool.get_report_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {}", id)))
}

fn csv_attachment(file_name: String, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(bytes)
}

fn monthly_query(query: MonthlyQuery) -> AppResult<MonthlyQuery> {
    if query.line.is_empty() {
        return Err(AppError::Validation(
            "Please select a transmission line".to_string(),
        ));
    }
    if !(1..=12).contains(&query.month) {
        return Err(AppError::InvalidInput(
            "month must be between 1 and 12".to_string(),
        ));
    }
    Ok(query)
}

async fn monthly_summary(pool: &DbPool, query: &MonthlyQuery) -> AppResult<MonthlySummary> {
    let reports = pool.completed_reports_for_line(&query.line).await?;
    Ok(summary::summarize_month(&reports, query.month, query.year))
}

/// Export an unsaved form as a spreadsheet.
#[utoipa::path(
    post,
    path = "/api/v1/reports/export",
    tag = "Exports",
    request_body = ReportForm,
    responses(
        (status = 200, description = "CSV export", content_type = "text/csv"),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
#[post("/reports/export")]
pub async fn export_form(
    config: web::Data<Config>,
    body: web::Json<ReportForm>,
) -> AppResult<HttpResponse> {
    let model = validated_model(body.into_inner())?;
    let bytes = export::weekly_csv(&model, &config.org_name)?;

    Ok(csv_attachment(export::weekly_file_name(&model), bytes))
}

/// Export a saved report as a spreadsheet.
#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}/export",
    tag = "Exports",
    params(
        ("id" = String, Path, description = "Report UUID")
    ),
    responses(
        (status = 200, description = "CSV export", content_type = "text/csv"),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse)
    )
)]
#[get("/reports/{id}/export")]
pub async fn export_report(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let model = load_report(&pool, path).await?;
    let bytes = export::weekly_csv(&model, &config.org_name)?;

    Ok(csv_attachment(export::weekly_file_name(&model), bytes))
}

/// Render a preview of an unsaved form.
#[utoipa::path(
    post,
    path = "/api/v1/reports/preview",
    tag = "Exports",
    request_body = ReportForm,
    responses(
        (status = 200, description = "Rendered preview", body = PreviewResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
#[post("/reports/preview")]
pub async fn preview_form(
    config: web::Data<Config>,
    renderer: web::Data<Renderer>,
    body: web::Json<ReportForm>,
) -> AppResult<HttpResponse> {
    let model = validated_model(body.into_inner())?;
    let html = renderer.preview(&model, &config.org_name)?;

    Ok(HttpResponse::Ok().json(PreviewResponse { html }))
}

/// Render a preview of a saved report.
#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}/preview",
    tag = "Exports",
    params(
        ("id" = String, Path, description = "Report UUID")
    ),
    responses(
        (status = 200, description = "Rendered preview", content_type = "text/html"),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse)
    )
)]
#[get("/reports/{id}/preview")]
pub async fn preview_report(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    renderer: web::Data<Renderer>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let model = load_report(&pool, path).await?;
    let html = renderer.preview(&model, &config.org_name)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Printable view of a saved report; triggers the print dialog on load.
#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}/print",
    tag = "Exports",
    params(
        ("id" = String, Path, description = "Report UUID")
    ),
    responses(
        (status = 200, description = "Printable document", content_type = "text/html"),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse)
    )
)]
#[get("/reports/{id}/print")]
pub async fn print_report(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    renderer: web::Data<Renderer>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let model = load_report(&pool, path).await?;
    let html = renderer.print(&model, &config.org_name)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Monthly aggregation of completed reports for one line.
#[utoipa::path(
    get,
    path = "/api/v1/reports/monthly",
    tag = "Exports",
    params(
        ("line" = String, Query, description = "Line display label"),
        ("month" = u32, Query, description = "1-based month number"),
        ("year" = i32, Query, description = "Year")
    ),
    responses(
        (status = 200, description = "Monthly summary", body = MonthlyReportResponse),
        (status = 400, description = "Invalid query", body = crate::error::ErrorResponse)
    )
)]
#[get("/reports/monthly")]
pub async fn monthly_report(
    pool: web::Data<DbPool>,
    query: web::Query<MonthlyQuery>,
) -> AppResult<HttpResponse> {
    let query = monthly_query(query.into_inner())?;
    let summary = monthly_summary(&pool, &query).await?;

    Ok(HttpResponse::Ok().json(MonthlyReportResponse {
        line: query.line,
        summary,
    }))
}

/// Export a monthly summary as a spreadsheet.
#[utoipa::path(
    get,
    path = "/api/v1/reports/monthly/export",
    tag = "Exports",
    params(
        ("line" = String, Query, description = "Line display label"),
        ("month" = u32, Query, description = "1-based month number"),
        ("year" = i32, Query, description = "Year")
    ),
    responses(
        (status = 200, description = "CSV export", content_type = "text/csv"),
        (status = 400, description = "Invalid query", body = crate::error::ErrorResponse)
    )
)]
#[get("/reports/monthly/export")]
pub async fn export_monthly(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    query: web::Query<MonthlyQuery>,
) -> AppResult<HttpResponse> {
    let query = monthly_query(query.into_inner())?;
    let summary = monthly_summary(&pool, &query).await?;
    let bytes = export::monthly_csv(&summary, &query.line, &config.org_name)?;

    Ok(csv_attachment(
        export::monthly_file_name(query.month, query.year),
        bytes,
    ))
}

/// Printable monthly summary; triggers the print dialog on load.
#[utoipa::path(
    get,
    path = "/api/v1/reports/monthly/print",
    tag = "Exports",
    params(
        ("line" = String, Query, description = "Line display label"),
        ("month" = u32, Query, description = "1-based month number"),
        ("year" = i32, Query, description = "Year")
    ),
    responses(
        (status = 200, description = "Printable document", content_type = "text/html"),
        (status = 400, description = "Invalid query", body = crate::error::ErrorResponse)
    )
)]
#[get("/reports/monthly/print")]
pub async fn print_monthly(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    renderer: web::Data<Renderer>,
    query: web::Query<MonthlyQuery>,
) -> AppResult<HttpResponse> {
    let query = monthly_query(query.into_inner())?;
    let summary = monthly_summary(&pool, &query).await?;
    let html = renderer.monthly_print(&summary, &query.line, &config.org_name)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Download all report summary rows as a pretty-printed JSON backup.
#[utoipa::path(
    get,
    path = "/api/v1/reports/backup",
    tag = "Exports",
    responses(
        (status = 200, description = "JSON backup file", content_type = "application/json")
    )
)]
#[get("/reports/backup")]
pub async fn backup_reports(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let reports = pool.list_reports(&Default::default()).await?;
    let json = serde_json::to_string_pretty(&reports)?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"linewash_reports_backup.json\"",
        ))
        .body(json))
}

/// Configure export routes.
/// Registered before the generic report routes so that fixed segments
/// (monthly, backup, export, preview) are not captured as report ids.
pub fn configure_export_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(monthly_report)
        .service(export_monthly)
        .service(print_monthly)
        .service(backup_reports)
        .service(export_form)
        .service(preview_form)
        .service(export_report)
        .service(preview_report)
        .service(print_report);
}
