//! Prediction label persistence.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use super::MessageResponse;
use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;

/// Request body for `POST /save_prediction`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavePredictionRequest {
    /// Position of the image in the original dataset ordering.
    pub image_index: i64,
    /// Label chosen by the annotator.
    pub prediction: String,
}

/// POST /save_prediction
#[utoipa::path(
    post,
    path = "/save_prediction",
    request_body = SavePredictionRequest,
    responses(
        (status = 200, description = "Prediction saved", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn save_prediction(
    State(ctx): State<AppContext>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    payload: Result<Json<SavePredictionRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    store_prediction(&ctx, payload)
        .await
        .map(Json)
        .map_err(|e| e.with_request_id(request_id))
}

async fn store_prediction(
    ctx: &AppContext,
    payload: Result<Json<SavePredictionRequest>, JsonRejection>,
) -> Result<MessageResponse, AppError> {
    let Json(request) = payload?;

    let index = usize::try_from(request.image_index).map_err(|_| {
        an_core::Error::validation(format!(
            "imageIndex must be non-negative, got {}",
            request.image_index
        ))
    })?;

    let store = Arc::clone(&ctx.predictions);
    let prediction = request.prediction;
    tokio::task::spawn_blocking(move || store.upsert(index, &prediction)).await??;

    tracing::info!(index, "Prediction saved");
    Ok(MessageResponse::new("Prediction saved"))
}
