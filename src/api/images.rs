//! Image upload endpoint.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, post, web};
use futures_util::StreamExt;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::services::Storage;
use crate::services::images::{self, AcceptedImage, IncomingImage, RejectedImage};

/// Batch upload result: accepted files with their stored URLs,
/// rejected files with reasons.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageUploadResponse {
    pub accepted: Vec<AcceptedImage>,
    pub rejected: Vec<RejectedImage>,
}

/// Upload a batch of report images.
///
/// Each file is screened individually (5 MiB limit, image MIME type);
/// a rejected file does not abort the rest of the batch. Accepted
/// files are stored and their URLs returned for the save payload.
#[utoipa::path(
    post,
    path = "/api/v1/images",
    tag = "Images",
    responses(
        (status = 200, description = "Batch processed", body = ImageUploadResponse),
        (status = 400, description = "Malformed upload", body = crate::error::ErrorResponse)
    )
)]
#[post("/images")]
pub async fn upload_images(
    mut payload: Multipart,
    storage: web::Data<Storage>,
) -> AppResult<HttpResponse> {
    let mut batch: Vec<IncomingImage> = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(String::from);

        // Skip non-file form fields
        let Some(file_name) = file_name else {
            continue;
        };

        let content_type = field.content_type().map(|m| m.to_string());

        let mut data = Vec::new();
        let mut size = 0usize;
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
            size += chunk.len();
            // Stop buffering past the limit but keep draining so the
            // rest of the batch still parses
            if size <= images::MAX_IMAGE_BYTES {
                data.extend_from_slice(&chunk);
            }
        }

        batch.push(IncomingImage {
            file_name,
            content_type,
            data,
            size,
        });
    }

    if batch.is_empty() {
        return Err(AppError::InvalidInput(
            "No image files in upload".to_string(),
        ));
    }

    let batch_size = batch.len();
    let (accepted, rejected) = images::upload_batch(&storage, batch).await;

    info!(
        "Image batch processed: {} received, {} accepted, {} rejected",
        batch_size,
        accepted.len(),
        rejected.len()
    );

    Ok(HttpResponse::Ok().json(ImageUploadResponse { accepted, rejected }))
}

/// Configure image routes.
pub fn configure_image_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_images);
}
