//! Multipart form intake for the upload endpoints.
//!
//! The whole form is buffered first ([`read_form`]) so that text fields and
//! files can be validated together. Nothing touches the disk until the
//! handler has also authorised the caller and calls [`store_files`].

use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use kennel_core::error::FieldError;
use kennel_core::forms::FormFields;
use kennel_core::uploads::{self, UploadKind};

use crate::error::{AppError, AppResult};

/// A validated file waiting to be written.
#[derive(Debug)]
pub struct PendingFile {
    pub ext: String,
    pub data: Bytes,
}

/// A fully read multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: FormFields,
    pub files: Vec<PendingFile>,
    /// Problems with the submitted files, reported alongside field errors.
    pub errors: Vec<FieldError>,
}

fn multipart_error(kind: UploadKind, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(kennel_core::error::CoreError::InvalidFields(vec![
            FieldError::new(kind.field(), "Upload is too large"),
        ]))
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Read every part of `multipart`. Files are accepted only under
/// `kind.field()`; file parts under other names are ignored.
pub async fn read_form(mut multipart: Multipart, kind: UploadKind) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();
    let mut file_count = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(kind, e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| multipart_error(kind, e))?;

                // Browsers send an empty part when no file was chosen.
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                if name != kind.field() {
                    continue;
                }

                file_count += 1;
                match uploads::check_file(kind, &file_name, content_type.as_deref(), data.len()) {
                    Ok(ext) => form.files.push(PendingFile { ext, data }),
                    Err(e) => form.errors.push(e),
                }
            }
            None => {
                let text = field.text().await.map_err(|e| multipart_error(kind, e))?;
                form.fields.insert(name, text);
            }
        }
    }

    if let Err(e) = uploads::check_count(kind, file_count) {
        form.errors.push(e);
    }
    Ok(form)
}

/// Write `files` into `dir` under fresh names and return their public paths,
/// in submission order.
pub async fn store_files(
    dir: &Path,
    kind: UploadKind,
    files: Vec<PendingFile>,
) -> AppResult<Vec<String>> {
    if files.is_empty() {
        return Ok(Vec::new());
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("create upload dir: {e}")))?;

    let mut paths = Vec::with_capacity(files.len());
    for file in files {
        let stored = uploads::stored_file_name(kind, &file.ext);
        tokio::fs::write(dir.join(&stored), &file.data)
            .await
            .map_err(|e| AppError::InternalError(format!("write upload {stored}: {e}")))?;
        tracing::debug!(file = %stored, bytes = file.data.len(), "Stored upload");
        paths.push(uploads::public_path(&stored));
    }
    Ok(paths)
}
