//! Input image listing.

use axum::extract::State;
use axum::{Extension, Json};

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;

/// GET /static/images
#[utoipa::path(
    get,
    path = "/static/images",
    responses(
        (status = 200, description = "Image filenames in the input directory", body = Vec<String>)
    )
)]
pub async fn list_images(
    State(ctx): State<AppContext>,
    Extension(RequestId(request_id)): Extension<RequestId>,
) -> Result<Json<Vec<String>>, AppError> {
    let config = ctx.config.clone();

    let images = tokio::task::spawn_blocking(move || {
        an_core::images::list_images(
            &config.storage.input_dir,
            &config.storage.image_extensions,
        )
    })
    .await
    .map_err(|e| AppError::from(e).with_request_id(request_id.clone()))?
    .map_err(|e| AppError::from(e).with_request_id(request_id))?;

    tracing::debug!(count = images.len(), "Serving image list");
    Ok(Json(images))
}
