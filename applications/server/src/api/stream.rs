/// Audio streaming API
use crate::{
    error::{Result, ServerError},
    middleware::CallerIdentity,
    services::resolve_owner,
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

/// GET /api/v1/stream/:file_id
///
/// Stream an owned audio file with byte-range support.
pub async fn stream_file(
    Path(file_id): Path<i64>,
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    headers: HeaderMap,
) -> Result<Response> {
    let owner = resolve_owner(&app_state.pool, caller.identity())
        .await
        .map_err(|e| ServerError::Auth(e.message))?;

    // Owner-scoped lookup; a foreign file id is indistinguishable from absent
    let file = lyra_storage::files::get_by_id(&app_state.pool, file_id, owner.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("File not found".to_string()))?;

    let (file_path, file_size) = app_state
        .media_store
        .stat(&file.path)
        .await?
        .ok_or_else(|| ServerError::NotFound("File not found".to_string()))?;

    // Detect MIME type
    let mime_type = mime_guess::from_path(&file_path)
        .first_or_octet_stream()
        .to_string();

    // Check for Range header
    if let Some(range) = headers.get(header::RANGE) {
        let range_str = range
            .to_str()
            .map_err(|_| ServerError::BadRequest("Invalid Range header".to_string()))?;

        if let Some((start, end)) = parse_range(range_str, file_size) {
            let mut handle = tokio::fs::File::open(&file_path).await?;
            handle.seek(std::io::SeekFrom::Start(start)).await?;

            let content_length = end - start + 1;
            let reader = ReaderStream::new(handle.take(content_length));
            let body = Body::from_stream(reader);

            let response = Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, mime_type)
                .header(header::CONTENT_LENGTH, content_length)
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end, file_size),
                )
                .header(header::ACCEPT_RANGES, "bytes")
                .body(body)
                .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)))?;

            return Ok(response);
        }
    }

    // No range request - stream entire file
    let handle = tokio::fs::File::open(&file_path).await?;
    let reader = ReaderStream::new(handle);
    let body = Body::from_stream(reader);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime_type)
        .header(header::CONTENT_LENGTH, file_size)
        .header(header::ACCEPT_RANGES, "bytes")
        .body(body)
        .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

/// Parse HTTP Range header
/// Format: "bytes=start-end"
fn parse_range(range: &str, file_size: u64) -> Option<(u64, u64)> {
    let range = range.strip_prefix("bytes=")?;

    if let Some((start_str, end_str)) = range.split_once('-') {
        let start: u64 = start_str.parse().ok()?;
        let end: u64 = if end_str.is_empty() {
            file_size.checked_sub(1)?
        } else {
            end_str.parse().ok()?
        };

        if start <= end && end < file_size {
            return Some((start, end));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("bytes=0-999", 10000), Some((0, 999)));
        assert_eq!(parse_range("bytes=1000-", 10000), Some((1000, 9999)));
        assert_eq!(parse_range("bytes=0-9999", 10000), Some((0, 9999)));
        assert_eq!(parse_range("bytes=10000-", 10000), None); // Out of bounds
        assert_eq!(parse_range("invalid", 10000), None);
    }
}
