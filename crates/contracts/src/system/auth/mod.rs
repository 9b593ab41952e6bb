use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login` and `POST /api/auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields must be filled before anything is sent.
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

/// `GET /api/auth/ensure`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnsureResponse {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// `GET /api/auth/me`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Login and signup both answer with the session owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUserResponse {
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Error body the backend returns with non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_me_response_defaults_to_anonymous() {
        let me: MeResponse = serde_json::from_str("{}").unwrap();
        assert!(!me.authenticated);
        assert!(me.user_id.is_none());

        let me: MeResponse =
            serde_json::from_str(r#"{"authenticated": true, "user_id": "u1", "username": "ann"}"#)
                .unwrap();
        assert!(me.authenticated);
        assert_eq!(me.username.as_deref(), Some("ann"));
    }

    #[test]
    fn test_credentials_completeness() {
        assert!(Credentials::new("ann", "secret").is_complete());
        assert!(!Credentials::new("  ", "secret").is_complete());
        assert!(!Credentials::new("ann", "").is_complete());
    }
}
