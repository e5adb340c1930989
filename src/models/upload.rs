// Media attachments and the multipart encoding used to send them next to a
// JSON payload.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::error::{KalcError, KalcResult};

/// Multipart field holding the JSON entry on entry creation.
pub(crate) const ENTRY_PART: &str = "entry";
/// Multipart field holding the JSON model on term request creation.
pub(crate) const TERM_REQUEST_PART: &str = "model";
/// Multipart field repeated once per attached file.
pub(crate) const FILES_PART: &str = "files";

/// A media file to upload with an entry or term request. The `file_name` is
/// what multimedia field values refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFileModel {
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl UploadFileModel {
    /// Wrap in-memory content, guessing the MIME type from the file name.
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        UploadFileModel {
            file_name,
            content_type,
            content,
        }
    }

    /// Read a file from disk.
    pub async fn load(path: impl AsRef<Path>) -> KalcResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        Ok(Self::new(file_name, content))
    }

    fn to_part(&self) -> KalcResult<Part> {
        Part::bytes(self.content.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.content_type)
            .map_err(|_| {
                KalcError::InvalidRequest(format!(
                    "'{}' has an invalid content type '{}'",
                    self.file_name, self.content_type
                ))
            })
    }
}

/// Build a form with the JSON `payload` under `payload_part` and one part
/// per file.
pub(crate) fn multipart_form<T: Serialize + ?Sized>(
    payload_part: &'static str,
    payload: &T,
    files: &[UploadFileModel],
) -> KalcResult<Form> {
    let json = Part::text(serde_json::to_string(payload)?)
        .mime_str("application/json")
        .map_err(|e| KalcError::InvalidRequest(e.to_string()))?;
    files
        .iter()
        .try_fold(
            Form::new().part(payload_part, json),
            |form, file| -> KalcResult<Form> { Ok(form.part(FILES_PART, file.to_part()?)) },
        )
}
