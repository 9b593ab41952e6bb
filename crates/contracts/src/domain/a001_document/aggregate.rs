use serde::{Deserialize, Serialize};

/// Document already embedded by the backend, identified by `file_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub upload_time: Option<String>,
    #[serde(default)]
    pub chunk_count: Option<u32>,
}

impl UploadedFile {
    pub fn new(file_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            filename: Some(filename.into()),
            name: None,
            size: None,
            upload_time: None,
            chunk_count: None,
        }
    }

    /// `filename` first, then `name`, then the id itself
    pub fn display_name(&self) -> &str {
        self.filename
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.file_id)
    }
}

/// `GET /api/documents`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default)]
    pub documents: Vec<UploadedFile>,
}

/// `POST /api/upload`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub files: Vec<UploadedFile>,
    #[serde(default)]
    pub total_chunks: Option<u32>,
}
