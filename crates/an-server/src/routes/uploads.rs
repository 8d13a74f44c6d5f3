//! Annotation result uploads: binary masks and masked images.
//!
//! Both endpoints take a multipart form with a single `file` part and store
//! it verbatim under the part's filename.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::{Extension, Json};

use an_core::UploadKind;

use super::MessageResponse;
use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;

/// POST /save_binary
#[utoipa::path(
    post,
    path = "/save_binary",
    request_body(content_type = "multipart/form-data", description = "Form with a `file` part"),
    responses(
        (status = 200, description = "File saved", body = MessageResponse),
        (status = 400, description = "No file part or invalid filename"),
        (status = 413, description = "Upload exceeds the configured limit")
    )
)]
pub async fn save_binary(
    State(ctx): State<AppContext>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    save_upload(&ctx, UploadKind::Binary, multipart)
        .await
        .map(Json)
        .map_err(|e| e.with_request_id(request_id))
}

/// POST /save_masked_image
#[utoipa::path(
    post,
    path = "/save_masked_image",
    request_body(content_type = "multipart/form-data", description = "Form with a `file` part"),
    responses(
        (status = 200, description = "File saved", body = MessageResponse),
        (status = 400, description = "No file part or invalid filename"),
        (status = 413, description = "Upload exceeds the configured limit")
    )
)]
pub async fn save_masked_image(
    State(ctx): State<AppContext>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    save_upload(&ctx, UploadKind::MaskedImage, multipart)
        .await
        .map(Json)
        .map_err(|e| e.with_request_id(request_id))
}

async fn save_upload(
    ctx: &AppContext,
    kind: UploadKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<MessageResponse, AppError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_owned();
        if filename.is_empty() {
            return Err(an_core::Error::validation("No selected file").into());
        }

        let data = field.bytes().await?;
        let uploads = Arc::clone(ctx.uploads(kind));
        tokio::task::spawn_blocking(move || uploads.save(&filename, &data)).await??;

        return Ok(MessageResponse::new("File saved"));
    }

    Err(an_core::Error::validation("No file part").into())
}
