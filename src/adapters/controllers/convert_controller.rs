use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::Response,
};
use tracing::{info, warn};

use crate::{
    adapters::state::AppState, application::error::ApplicationError,
    domain::models::file::UploadData,
};

/// Default filename offered to the browser for the converted statement.
const OUTPUT_FILENAME: &str = "mt940.txt";

pub struct ConvertController;

impl ConvertController {
    /// Converts an uploaded account export to MT940 text.
    /// POST /convert
    /// Multipart body: "file" (required), "iban" (optional, falls back to the
    /// configured account IBAN)
    pub async fn convert(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<Response, ApplicationError> {
        let mut file_bytes: Option<Vec<u8>> = None;
        let mut filename: Option<String> = None;
        let mut mime_type: Option<String> = None;
        let mut iban: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    filename = field.file_name().map(|v| v.to_string());
                    mime_type = field.content_type().map(|v| v.to_string());
                    file_bytes = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|e| {
                                warn!("Cannot read file bytes: {}", e);
                                ApplicationError::BadRequest("Invalid file data".to_string())
                            })?
                            .to_vec(),
                    );
                }
                "iban" => {
                    iban = Some(field.text().await.map_err(|e| {
                        warn!("Invalid iban field: {}", e);
                        ApplicationError::BadRequest("Invalid request data".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let file_bytes = file_bytes.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest("Missing required field".to_string())
        })?;

        let upload = UploadData::new(
            file_bytes,
            filename.unwrap_or_else(|| "statement.csv".to_string()),
            mime_type.unwrap_or_else(|| "application/octet-stream".to_string()),
        );

        if !upload.validate_size(app_state.config.max_upload_size) {
            return Err(ApplicationError::PayloadTooLarge);
        }

        let iban = iban
            .filter(|value| !value.trim().is_empty())
            .or_else(|| app_state.config.default_iban.clone())
            .ok_or_else(|| {
                warn!("No 'iban' field and no configured account IBAN");
                ApplicationError::BadRequest("Missing required field".to_string())
            })?;

        info!(
            "Converting '{}' ({} bytes, {})",
            upload.filename,
            upload.size(),
            upload.mime_type
        );

        // Uploaded content type is not validated; anything that parses as a
        // statement export converts.
        let content = String::from_utf8(upload.content).map_err(|e| {
            warn!("Uploaded file is not valid UTF-8: {}", e);
            ApplicationError::BadRequest("Invalid file data".to_string())
        })?;

        let output = app_state.converter.convert(&content, &iban)?;

        info!("Conversion complete, {} bytes produced", output.len());

        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .header(header::CONTENT_LENGTH, output.len())
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", OUTPUT_FILENAME),
            )
            .body(Body::from(output))
            .map_err(|e| ApplicationError::InternalError(e.to_string()))?;

        Ok(response)
    }
}
