//! Image attachment screening and upload.
//!
//! Files are screened individually: a file that is too large or not an
//! image is rejected with a reason while the rest of the batch still
//! proceeds. Accepted files are uploaded as independent S3 puts.

use chrono::Utc;
use futures_util::future::join_all;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use super::storage::Storage;

/// Maximum accepted image payload: 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A file received from the upload form, not yet screened.
#[derive(Debug, Clone)]
pub struct IncomingImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
    /// Total bytes received; may exceed `data.len()` when reading
    /// stopped at the size limit.
    pub size: usize,
}

/// A file that passed screening and was stored.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AcceptedImage {
    pub file_name: String,
    pub image_url: String,
}

/// A file that was rejected during screening or upload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RejectedImage {
    pub file: String,
    pub reason: String,
}

fn is_image(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.starts_with("image/"))
}

/// Screen a batch, splitting it into acceptable files and rejections.
pub fn screen(batch: Vec<IncomingImage>) -> (Vec<IncomingImage>, Vec<RejectedImage>) {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for file in batch {
        if !is_image(file.content_type.as_deref()) || file.size > MAX_IMAGE_BYTES {
            rejected.push(RejectedImage {
                reason: format!(
                    "File {} is either not an image or exceeds 5MB limit",
                    file.file_name
                ),
                file: file.file_name,
            });
        } else {
            accepted.push(file);
        }
    }

    (accepted, rejected)
}

/// Screen and upload a batch of images.
///
/// Uploads run concurrently and independently; a failed put rejects
/// that file alone.
pub async fn upload_batch(
    storage: &Storage,
    batch: Vec<IncomingImage>,
) -> (Vec<AcceptedImage>, Vec<RejectedImage>) {
    let (screened, mut rejected) = screen(batch);

    let uploads = screened.into_iter().map(|file| async move {
        let key = Storage::image_key(&file.file_name, Utc::now());
        match storage
            .put(&key, file.data, file.content_type.as_deref())
            .await
        {
            Ok(()) => Ok(AcceptedImage {
                file_name: file.file_name,
                image_url: storage.public_url(&key),
            }),
            Err(e) => {
                warn!("Image upload failed for {}: {}", file.file_name, e);
                Err(RejectedImage {
                    file: file.file_name,
                    reason: e.to_string(),
                })
            }
        }
    });

    let mut accepted = Vec::new();
    for result in join_all(uploads).await {
        match result {
            Ok(img) => accepted.push(img),
            Err(rej) => rejected.push(rej),
        }
    }

    (accepted, rejected)
}
