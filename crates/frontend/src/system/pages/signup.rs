use contracts::system::auth::Credentials;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Redirect, A};

use super::credentials_form::CredentialsForm;
use super::failure_message;
use crate::shared::api_client::use_api;
use crate::system::auth::api;
use crate::system::auth::context::{use_auth, AuthState};

#[component]
pub fn SignupPage() -> impl IntoView {
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);
    let (signed_up, set_signed_up) = signal(false);

    let (_, set_auth_state) = use_auth();
    let client = use_api();

    let on_submit = Callback::new(move |credentials: Credentials| {
        set_is_loading.set(true);
        set_error_message.set(None);

        let client = client.clone();
        spawn_local(async move {
            match api::signup(&client, &credentials).await {
                Ok(user) => {
                    log::info!("account created for {}", user.username);
                    set_auth_state.set(AuthState::signed_in(user));
                    set_signed_up.set(true);
                }
                Err(e) => {
                    log::error!("signup failed: {}", e);
                    set_error_message.set(Some(failure_message(&e, "Signup failed")));
                }
            }
            set_is_loading.set(false);
        });
    });

    view! {
        <Show when=move || signed_up.get()>
            <Redirect path="/" />
        </Show>
        <CredentialsForm
            title="Sign up"
            submit_label="Create account"
            busy_label="Creating..."
            is_loading=is_loading
            error_message=error_message
            on_submit=on_submit
        >
            "Already have an account? "
            <A href="/login">"Login"</A>
        </CredentialsForm>
    }
}
