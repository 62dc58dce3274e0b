//! Request handlers for the web front-end.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use radiograph_core::{Outcome, Radiograph};
use serde_json::json;
use std::sync::Arc;

use super::page;
use crate::report::Report;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// A file pulled out of a multipart body.
struct Upload {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

pub async fn index() -> Html<&'static str> {
    Html(page::INDEX)
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": radiograph_core::VERSION }))
}

pub async fn post_diagnose(
    State(radiograph): State<Arc<Radiograph>>,
    multipart: Multipart,
) -> (StatusCode, Json<Report>) {
    let upload = match read_upload(multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            log_rejection("no image field in request");
            return (
                StatusCode::BAD_REQUEST,
                Json(Report::error("Please upload a JPG or PNG image.")),
            );
        }
        Err((status, message)) => {
            log_rejection(&message);
            return (status, Json(Report::error(message)));
        }
    };

    tracing::info!(
        file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        bytes = upload.bytes.len(),
        "Received upload"
    );

    match radiograph
        .diagnose_upload(upload.file_name.as_deref(), upload.bytes)
        .await
    {
        Ok(outcome) => {
            let status = match &outcome {
                Outcome::Diagnosed(_) => StatusCode::OK,
                Outcome::Failed => StatusCode::BAD_GATEWAY,
                Outcome::Rejected(_) => StatusCode::BAD_REQUEST,
            };
            (status, Json(Report::from(&outcome)))
        }
        Err(e) => {
            tracing::error!("Diagnosis request error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Report::error(e.user_notice())),
            )
        }
    }
}

/// Take the first `image` field, skipping anything else.
async fn read_upload(mut multipart: Multipart) -> Result<Option<Upload>, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (e.status(), e.body_text()))?;
        return Ok(Some(Upload {
            file_name,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

fn log_rejection(reason: &str) {
    tracing::warn!("Upload rejected: {reason}");
}
