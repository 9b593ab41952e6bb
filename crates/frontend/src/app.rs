use crate::layout::notification_service::{NotificationHost, NotificationService};
use crate::routes::routes::AppRoutes;
use crate::shared::api_client::ApiClient;
use crate::shared::config::AppConfig;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // One shared request issuer for every widget
    provide_context(ApiClient::new(&config.api));

    // Non-blocking notifications for upload/delete results
    provide_context(NotificationService::new(config.notifications.timeout_ms));

    provide_context(config);

    view! {
        <ConfigProvider>
            <AuthProvider>
                <AppRoutes />
            </AuthProvider>
            <NotificationHost />
        </ConfigProvider>
    }
}
