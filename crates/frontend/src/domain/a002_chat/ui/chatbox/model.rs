//! Chat - Model (API functions)

use contracts::domain::a002_chat::aggregate::{ChatRequest, ChatResponse};

use crate::shared::api_client::{ApiClient, ApiError};

/// Ask a question about the uploaded documents
pub async fn ask(api: &ApiClient, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
    Ok(api.post_json::<_, ChatResponse>("/api/chat", request).await?.data)
}
