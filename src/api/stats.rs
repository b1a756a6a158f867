//! Dashboard statistics endpoint.

use actix_web::{HttpResponse, get, web};

use crate::db::DbPool;
use crate::error::AppResult;

/// Dashboard counters: report counts by status plus total towers.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = crate::db::reports::DashboardStats)
    )
)]
#[get("/stats")]
pub async fn dashboard_stats(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let stats = pool.dashboard_stats().await?;

    Ok(HttpResponse::Ok().json(stats))
}

/// Configure stats routes.
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard_stats);
}
