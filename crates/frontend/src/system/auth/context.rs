use contracts::system::auth::{AuthUserResponse, EnsureResponse, MeResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::api_client::{use_api, ApiClient, ApiError};

/// Result of the once-per-load identity check
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// What the root route renders
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootView {
    Loading,
    Landing,
    Login,
}

pub fn select_root_view(status: AuthStatus) -> RootView {
    match status {
        AuthStatus::Unknown => RootView::Loading,
        AuthStatus::Authenticated => RootView::Landing,
        AuthStatus::Unauthenticated => RootView::Login,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub status: AuthStatus,
    /// Session owner id as reported by the backend, used by the chat request
    pub user_id: Option<String>,
    pub username: Option<String>,
}

impl AuthState {
    /// Combine the `ensure` and `me` answers; any `me` failure means signed out
    pub fn resolved(ensure: Option<EnsureResponse>, me: Result<MeResponse, ApiError>) -> Self {
        let ensured_id = ensure.and_then(|e| e.user_id);
        match me {
            Ok(me) if me.authenticated => Self {
                status: AuthStatus::Authenticated,
                user_id: me.user_id.or(ensured_id),
                username: me.username,
            },
            Ok(_) | Err(_) => Self {
                status: AuthStatus::Unauthenticated,
                user_id: ensured_id,
                username: None,
            },
        }
    }

    pub fn signed_in(user: AuthUserResponse) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            user_id: Some(user.user_id),
            username: Some(user.username),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            user_id: None,
            username: None,
        }
    }
}

async fn check_session(api: &ApiClient) -> AuthState {
    let ensure = match api::ensure_session(api).await {
        Ok(resp) => Some(resp),
        Err(e) => {
            log::warn!("auth/ensure failed: {}", e);
            None
        }
    };
    let me = api::current_user(api).await;
    if let Err(e) = &me {
        log::warn!("auth/me failed: {}", e);
    }
    AuthState::resolved(ensure, me)
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());
    let client = use_api();

    // Resolve the session once per page load
    Effect::new(move |_| {
        let client = client.clone();
        spawn_local(async move {
            let state = check_session(&client).await;
            log::debug!("auth resolved: {:?}", state.status);
            set_auth_state.set(state);
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Remember the user id the backend reported (ensure/upload responses)
pub fn remember_user_id(set_auth_state: WriteSignal<AuthState>, user_id: Option<String>) {
    if let Some(user_id) = user_id.filter(|id| !id.is_empty()) {
        set_auth_state.update(|state| state.user_id = Some(user_id));
    }
}

/// Helper: Perform logout; local state is cleared even if the request fails
pub async fn do_logout(api: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    if let Err(e) = api::logout(api).await {
        log::warn!("logout failed: {}", e);
    }
    set_auth_state.set(AuthState::signed_out());
}
