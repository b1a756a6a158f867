//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, db, error, models, services};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Linewash Server",
        version = "0.3.0",
        description = "API server for recording and exporting weekly transmission-line maintenance reports"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Line endpoints
        api::lines::list_lines,
        api::lines::add_line,
        // Report endpoints
        api::reports::create_report,
        api::reports::update_report,
        api::reports::list_reports,
        api::reports::get_report,
        api::reports::delete_report,
        api::reports::recompute_summary,
        // Export endpoints
        api::exports::export_form,
        api::exports::export_report,
        api::exports::preview_form,
        api::exports::preview_report,
        api::exports::print_report,
        api::exports::monthly_report,
        api::exports::export_monthly,
        api::exports::print_monthly,
        api::exports::backup_reports,
        // Image endpoints
        api::images::upload_images,
        // Stats endpoints
        api::stats::dashboard_stats,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Lines
            api::lines::LineResponse,
            api::lines::LineListResponse,
            api::lines::AddLineRequest,
            // Reports
            models::report::ReportStatus,
            models::report::WorkType,
            models::report::NoWorkReason,
            models::report::TowerType,
            models::report::ReportSummaryRow,
            models::form::ReportForm,
            models::form::WorkDayForm,
            models::form::TowerForm,
            models::form::InsulatorsForm,
            models::form::ImageForm,
            models::summary::WashTotals,
            models::summary::MonthlyBreakdownRow,
            models::summary::MonthlySummary,
            api::reports::SaveReportRequest,
            api::reports::SaveReportResponse,
            api::reports::ReportListResponse,
            api::reports::ReportDetailResponse,
            // Exports
            api::exports::PreviewResponse,
            api::exports::MonthlyReportResponse,
            // Images
            services::images::AcceptedImage,
            services::images::RejectedImage,
            api::images::ImageUploadResponse,
            // Stats
            db::reports::DashboardStats,
        )
    ),
    tags(
        (name = "Health", description = "Service health checks"),
        (name = "Lines", description = "Transmission line management"),
        (name = "Reports", description = "Weekly report CRUD"),
        (name = "Exports", description = "Spreadsheet export, previews, and backups"),
        (name = "Images", description = "Report image uploads"),
        (name = "Stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;
