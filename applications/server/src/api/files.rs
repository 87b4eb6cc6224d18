/// Audio files API routes
use crate::{
    error::{Result, ServerError},
    executor::respond,
    middleware::CallerIdentity,
    services::FileService,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use lyra_core::types::AudioFileInput;
use lyra_core::CrudService;

#[derive(Debug, serde::Deserialize)]
pub struct FileQuery {
    #[serde(default)]
    pub song_id: Option<i64>,
}

/// GET /api/v1/files
///
/// Optional `song_id` query narrows to one parent song.
pub async fn list_files(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Query(query): Query<FileQuery>,
) -> Response {
    let service = FileService::new(app_state.pool.clone(), app_state.media_store.clone());
    let filter = query.song_id.map(AudioFileInput::for_song);
    respond(service.get_many(caller.identity(), filter).await)
}

/// GET /api/v1/files/:id
pub async fn get_file(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<i64>,
) -> Response {
    let service = FileService::new(app_state.pool.clone(), app_state.media_store.clone());
    respond(
        service
            .get_one(caller.identity(), AudioFileInput::by_id(id))
            .await,
    )
}

/// POST /api/v1/files
///
/// Multipart upload: `file` part carries the audio bytes, `song_id` part the
/// parent song.
pub async fn upload_file(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<Response> {
    let input = parse_upload(headers, body).await?;

    let service = FileService::new(app_state.pool.clone(), app_state.media_store.clone());
    Ok(respond(service.create(caller.identity(), input).await))
}

/// DELETE /api/v1/files/:id
///
/// Releases the blob on disk along with the reference row.
pub async fn delete_file(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<i64>,
) -> Response {
    let service = FileService::new(app_state.pool.clone(), app_state.media_store.clone());
    respond(
        service
            .delete(caller.identity(), AudioFileInput::by_id(id))
            .await,
    )
}

/// Parse the multipart upload body into an `AudioFileInput`
async fn parse_upload(
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<AudioFileInput> {
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .ok_or_else(|| ServerError::BadRequest("Missing boundary".to_string()))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut input = AudioFileInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                input.file_name = field.file_name().map(|s| s.to_string());
                input.data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            ServerError::BadRequest(format!("Failed to read file: {}", e))
                        })?
                        .to_vec(),
                );
            }
            "song_id" => {
                let text = field.text().await.map_err(|e| {
                    ServerError::BadRequest(format!("Failed to read song_id: {}", e))
                })?;
                input.song_id = Some(text.trim().parse().map_err(|_| {
                    ServerError::BadRequest("song_id must be an integer".to_string())
                })?);
            }
            _ => {}
        }
    }

    Ok(input)
}
