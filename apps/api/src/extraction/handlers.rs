use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::contact::extract_contact;
use crate::extraction::{extract_text, DocumentKind};

/// Upload size cap, matching the advertised 5MB limit.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct ParsedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "rawText")]
    pub raw_text: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub parsed: ParsedResume,
}

/// POST /upload-resume — multipart form field `resume` (PDF or DOCX, <=5MB).
pub async fn handle_upload_resume(
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        upload = Some((filename, content_type, bytes));
        break;
    }

    let Some((filename, content_type, bytes)) = upload else {
        return Err(AppError::Validation("No file uploaded".to_string()));
    };

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation("File too large (max 5MB)".to_string()));
    }

    let Some(kind) = DocumentKind::detect(&filename, &content_type) else {
        return Err(AppError::Validation(
            "Unsupported file type. Use PDF or DOCX.".to_string(),
        ));
    };

    // Extraction is CPU-bound; keep it off the async workers.
    let raw_text = tokio::task::spawn_blocking(move || extract_text(kind, &bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    let contact = extract_contact(&raw_text);

    Ok(Json(UploadResponse {
        ok: true,
        parsed: ParsedResume {
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            raw_text,
            filename,
        },
    }))
}
