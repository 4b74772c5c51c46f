//! POST /process — multipart `file` + `media_type` in, summary JSON out.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use super::detail;
use crate::context::ServiceContext;
use crate::pipeline::process_media;

struct Upload {
    bytes: Vec<u8>,
    file_name: String,
}

pub async fn process_handler(
    State(ctx): State<Arc<ServiceContext>>,
    mut multipart: Multipart,
) -> Response {
    let mut upload: Option<Upload> = None;
    let mut media_type: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return detail(e.status(), e.body_text()),
        };
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload.ogg").to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some(Upload {
                            bytes: bytes.to_vec(),
                            file_name,
                        })
                    }
                    Err(e) => return detail(e.status(), e.body_text()),
                }
            }
            "media_type" => match field.text().await {
                Ok(text) => media_type = Some(text),
                Err(e) => return detail(e.status(), e.body_text()),
            },
            _ => {}
        }
    }

    let Some(upload) = upload else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "field required: file");
    };
    let Some(media_type) = media_type else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "field required: media_type");
    };

    let Some((transcriber, summarizer)) = ctx.models() else {
        warn!("process request rejected: models are not loaded");
        return detail(StatusCode::SERVICE_UNAVAILABLE, "Models are not loaded");
    };

    match process_media(
        transcriber,
        summarizer,
        &ctx.policy,
        upload.bytes,
        &upload.file_name,
        &media_type,
    )
    .await
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            error!(media_type = %media_type, error = %e, "processing failed");
            detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Processing error: {e}"),
            )
        }
    }
}
