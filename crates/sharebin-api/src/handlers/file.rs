//! File handlers — upload, metadata, listing, download, deletion.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use futures::SinkExt;

use sharebin_core::error::AppError;
use sharebin_core::traits::storage::ByteStream;
use sharebin_core::types::ExpiryPolicy;
use sharebin_entity::{FileInfo, FileSummary};
use sharebin_service::{StagedUpload, UploadOptions};

use crate::dto::request::{DownloadQuery, DownloadRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files — multipart upload.
///
/// The `file` part is forwarded chunk by chunk into the storage
/// provider without buffering the payload. Text fields (`expiry`,
/// `password`) may appear on either side of it — browsers commonly
/// append the file first — so the metadata record is only created
/// once every part has been read.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<FileSummary>>, ApiError> {
    let mut options = UploadOptions::default();
    let mut staged: Option<(StagedUpload, String, String)> = None;

    loop {
        let mut field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(abort_upload(
                    &state,
                    staged,
                    AppError::validation(format!("Multipart error: {e}")),
                )
                .await);
            }
        };

        match field.name().unwrap_or("") {
            "expiry" => match field.text().await {
                Ok(text) => options.expiry = ExpiryPolicy::parse(&text),
                Err(e) => {
                    return Err(abort_upload(
                        &state,
                        staged,
                        AppError::validation(format!("Multipart error: {e}")),
                    )
                    .await);
                }
            },
            "password" => match field.text().await {
                Ok(text) => {
                    if !text.is_empty() {
                        options.password = Some(text);
                    }
                }
                Err(e) => {
                    return Err(abort_upload(
                        &state,
                        staged,
                        AppError::validation(format!("Multipart error: {e}")),
                    )
                    .await);
                }
            },
            "file" if staged.is_none() => {
                let name = match field.file_name().map(str::to_string) {
                    Some(name) => name,
                    None => {
                        return Err(abort_upload(
                            &state,
                            staged,
                            AppError::validation("No file uploaded"),
                        )
                        .await);
                    }
                };
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                // The multipart field borrows the request body and
                // cannot be boxed into a 'static stream; bridge it
                // through a bounded channel instead and drive both
                // sides together.
                let (mut tx, rx) = futures::channel::mpsc::channel::<
                    Result<Bytes, std::io::Error>,
                >(8);
                let stream: ByteStream = Box::pin(rx);

                let stage = state.uploads.stage(stream);

                let pump = async move {
                    loop {
                        match field.chunk().await {
                            Ok(Some(chunk)) => {
                                if tx.send(Ok(chunk)).await.is_err() {
                                    break;
                                }
                            }
                            Ok(None) => break,
                            Err(e) => {
                                // Propagate the disconnect so the
                                // write aborts and cleans up.
                                let _ = tx.send(Err(std::io::Error::other(e))).await;
                                break;
                            }
                        }
                    }
                };

                let (result, ()) = tokio::join!(stage, pump);
                staged = Some((result?, name, mime_type));
            }
            _ => {}
        }
    }

    match staged {
        Some((staged, name, mime_type)) => {
            let summary = state
                .uploads
                .commit(&auth, staged, &name, &mime_type, options)
                .await?;
            Ok(Json(ApiResponse::ok(summary)))
        }
        None => Err(ApiError(AppError::validation("No file uploaded"))),
    }
}

/// Drops any staged bytes before surfacing a parse failure.
async fn abort_upload(
    state: &AppState,
    staged: Option<(StagedUpload, String, String)>,
    err: AppError,
) -> ApiError {
    if let Some((staged, _, _)) = staged {
        state.uploads.discard(staged).await;
    }
    ApiError(err)
}

/// GET /api/files — the caller's own uploads.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<FileInfo>>>, ApiError> {
    let files = state.files.list_owned(&auth).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/files/{external_id} — public metadata, no auth, no counter.
pub async fn info(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<ApiResponse<FileInfo>>, ApiError> {
    let info = state.files.info(&external_id).await?;
    Ok(Json(ApiResponse::ok(info)))
}

/// GET /api/files/{external_id}/download?password=...
pub async fn download_get(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    serve_download(&state, &external_id, query.password.as_deref()).await
}

/// POST /api/files/{external_id}/download — password in the body, so
/// it never lands in access logs.
pub async fn download_post(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    Json(body): Json<DownloadRequest>,
) -> Result<Response, ApiError> {
    serve_download(&state, &external_id, body.password.as_deref()).await
}

async fn serve_download(
    state: &AppState,
    external_id: &str,
    password: Option<&str>,
) -> Result<Response, ApiError> {
    let record = state.gate.resolve(external_id, password).await?;
    let download = state.downloads.open(&record).await?;

    // Quotes and control characters would corrupt the header.
    let safe_name: String = download
        .name
        .chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, download.mime_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{safe_name}\""),
        )
        .header(header::CONTENT_LENGTH, download.size)
        .body(Body::from_stream(download.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// DELETE /api/files/{external_id} — owner only.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(external_id): Path<String>,
) -> Result<Json<ApiResponse<crate::dto::response::MessageResponse>>, ApiError> {
    state.files.delete(&auth, &external_id).await?;
    Ok(Json(ApiResponse::ok(
        crate::dto::response::MessageResponse {
            message: "File deleted".to_string(),
        },
    )))
}
