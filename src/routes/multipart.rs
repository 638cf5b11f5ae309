use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Collected multipart form: text fields by name plus uploaded files.
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut fields = HashMap::new();
        let mut files = HashMap::new();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let data = field.bytes().await?.to_vec();
                    files.insert(name, UploadedFile { file_name, data });
                }
                None => {
                    fields.insert(name, field.text().await?);
                }
            }
        }

        Ok(Self { fields, files })
    }

    /// Trimmed, non-empty text field or BadRequest.
    pub fn required(&self, name: &str) -> AppResult<String> {
        self.fields
            .get(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::bad_request(format!("{name} is required")))
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}
