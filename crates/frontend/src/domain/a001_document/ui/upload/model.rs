//! Document Upload - Model (API functions)

use contracts::domain::a001_document::aggregate::{DocumentsResponse, UploadResponse, UploadedFile};
use contracts::system::auth::MessageResponse;
use web_sys::FormData;

use crate::shared::api_client::{ApiClient, ApiError};

/// Multipart field the backend reads the files from
const FILES_FIELD: &str = "files";

/// Documents already embedded for the current session
pub async fn fetch_documents(api: &ApiClient) -> Result<Vec<UploadedFile>, ApiError> {
    Ok(api.get::<DocumentsResponse>("/api/documents").await?.data.documents)
}

/// Upload all files in one multipart request
pub async fn upload_files(api: &ApiClient, files: &[web_sys::File]) -> Result<UploadResponse, ApiError> {
    let form_data = FormData::new().map_err(|e| ApiError::Encode(format!("{e:?}")))?;
    for file in files {
        form_data
            .append_with_blob_and_filename(FILES_FIELD, file, &file.name())
            .map_err(|e| ApiError::Encode(format!("{e:?}")))?;
    }

    Ok(api.post_form::<UploadResponse>("/api/upload", form_data).await?.data)
}

pub async fn delete_document(api: &ApiClient, file_id: &str) -> Result<(), ApiError> {
    let path = document_path(file_id);
    api.delete::<MessageResponse>(&path).await?;
    Ok(())
}

fn document_path(file_id: &str) -> String {
    format!("/api/documents/{}", urlencoding::encode(file_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path_encodes_id() {
        assert_eq!(document_path("3f2a-11"), "/api/documents/3f2a-11");
        assert_eq!(document_path("a/b c"), "/api/documents/a%2Fb%20c");
    }
}
