//! Client configuration
//!
//! Loaded once at start-up and provided through context. The host page may
//! carry an inline override:
//!
//! ```html
//! <script type="application/toml" id="app-config">
//! [chat]
//! fallback_user_id = "guest"
//! </script>
//! ```

use leptos::prelude::*;
use serde::Deserialize;

/// Id of the inline `<script>` element holding a TOML override
pub const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub upload: UploadConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Empty means "same origin": requests use relative paths
    pub base_url: String,
    /// Value of the `X-Requested-With` header sent with every request
    pub requested_with: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    pub conversation_key: String,
    pub user_id_key: String,
    pub fallback_user_id: String,
    pub persist_transcript: bool,
    pub typewriter_delay_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UploadConfig {
    pub accept: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct NotificationConfig {
    pub timeout_ms: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
requested_with = "XMLHttpRequest"

[chat]
conversation_key = "chat_conversation"
user_id_key = "user_id"
fallback_user_id = "xyz123"
persist_transcript = true
typewriter_delay_ms = 30

[upload]
accept = ".pdf"

[notifications]
timeout_ms = 4000
"#;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            chat: ChatConfig::default(),
            upload: UploadConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            requested_with: "XMLHttpRequest".to_string(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            conversation_key: "chat_conversation".to_string(),
            user_id_key: "user_id".to_string(),
            fallback_user_id: "xyz123".to_string(),
            persist_transcript: true,
            typewriter_delay_ms: 30,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accept: ".pdf".to_string(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { timeout_ms: 4000 }
    }
}

/// Parse a TOML document; sections and keys that are missing keep their defaults
pub fn parse_config(contents: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    Ok(config)
}

/// Load configuration
///
/// Search order:
/// 1. Inline `<script id="app-config">` in the host page
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<AppConfig> {
    if let Some(contents) = read_page_config() {
        match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loaded config from #{}", CONFIG_ELEMENT_ID);
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring invalid #{}: {}", CONFIG_ELEMENT_ID, e),
        }
    }

    log::debug!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn read_page_config() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
    element.text_content().filter(|text| !text.trim().is_empty())
}

/// Hook to access the configuration provided by `App`
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig not provided in context")
}
