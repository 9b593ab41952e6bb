use contracts::system::auth::{
    AuthUserResponse, Credentials, EnsureResponse, MeResponse, MessageResponse,
};

use crate::shared::api_client::{ApiClient, ApiError};

/// Establish or refresh the session cookie
pub async fn ensure_session(api: &ApiClient) -> Result<EnsureResponse, ApiError> {
    Ok(api.get::<EnsureResponse>("/api/auth/ensure").await?.data)
}

/// Ask the backend whether the cookie belongs to a signed-in user
pub async fn current_user(api: &ApiClient) -> Result<MeResponse, ApiError> {
    Ok(api.get::<MeResponse>("/api/auth/me").await?.data)
}

pub async fn login(api: &ApiClient, credentials: &Credentials) -> Result<AuthUserResponse, ApiError> {
    Ok(api
        .post_json::<_, AuthUserResponse>("/api/auth/login", credentials)
        .await?
        .data)
}

/// Create an account; on success the backend also starts the session
pub async fn signup(api: &ApiClient, credentials: &Credentials) -> Result<AuthUserResponse, ApiError> {
    Ok(api
        .post_json::<_, AuthUserResponse>("/api/auth/signup", credentials)
        .await?
        .data)
}

pub async fn logout(api: &ApiClient) -> Result<(), ApiError> {
    api.post_json::<_, MessageResponse>("/api/auth/logout", &serde_json::json!({}))
        .await?;
    Ok(())
}
