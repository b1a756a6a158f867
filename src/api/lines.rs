//! Transmission line endpoints.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::Line;

/// One line in a list response, label included.
#[derive(Debug, Serialize, ToSchema)]
pub struct LineResponse {
    pub id: uuid::Uuid,
    pub name: String,
    pub voltage: i32,
    /// Display label stored on reports as the line foreign key.
    pub label: String,
}

impl From<Line> for LineResponse {
    fn from(line: Line) -> Self {
        let label = line.label();
        LineResponse {
            id: line.id,
            name: line.name,
            voltage: line.voltage,
            label,
        }
    }
}

/// Line list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LineListResponse {
    pub lines: Vec<LineResponse>,
}

/// Request to add a new line.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddLineRequest {
    pub name: String,
    pub voltage: i32,
}

/// List all transmission lines.
#[utoipa::path(
    get,
    path = "/api/v1/lines",
    tag = "Lines",
    responses(
        (status = 200, description = "List of lines", body = LineListResponse)
    )
)]
#[get("/lines")]
pub async fn list_lines(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let lines = pool.list_lines().await?;

    Ok(HttpResponse::Ok().json(LineListResponse {
        lines: lines.into_iter().map(LineResponse::from).collect(),
    }))
}

/// Add a new transmission line.
#[utoipa::path(
    post,
    path = "/api/v1/lines",
    tag = "Lines",
    request_body = AddLineRequest,
    responses(
        (status = 201, description = "Line created", body = LineResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
#[post("/lines")]
pub async fn add_line(
    pool: web::Data<DbPool>,
    body: web::Json<AddLineRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    if body.name.trim().is_empty() || body.voltage <= 0 {
        return Err(AppError::Validation(
            "Please enter both line name and voltage".to_string(),
        ));
    }

    let line = pool.insert_line(body.name.trim(), body.voltage).await?;

    Ok(HttpResponse::Created().json(LineResponse::from(line)))
}

/// Configure line routes.
pub fn configure_line_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_lines).service(add_line);
}
