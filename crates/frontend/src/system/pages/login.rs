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
pub fn LoginPage() -> impl IntoView {
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);
    let (signed_in, set_signed_in) = signal(false);

    let (_, set_auth_state) = use_auth();
    let client = use_api();

    let on_submit = Callback::new(move |credentials: Credentials| {
        set_is_loading.set(true);
        set_error_message.set(None);

        let client = client.clone();
        spawn_local(async move {
            match api::login(&client, &credentials).await {
                Ok(user) => {
                    log::info!("signed in as {}", user.username);
                    set_signed_in.set(true);
                    // Last: on "/" this unmounts the page in favour of the landing view
                    set_auth_state.set(AuthState::signed_in(user));
                }
                Err(e) => {
                    log::error!("login failed: {}", e);
                    set_error_message.set(Some(failure_message(&e, "Login failed")));
                    set_is_loading.set(false);
                }
            }
        });
    });

    view! {
        <Show when=move || signed_in.get()>
            <Redirect path="/" />
        </Show>
        <CredentialsForm
            title="Login"
            submit_label="Login"
            busy_label="Signing in..."
            is_loading=is_loading
            error_message=error_message
            on_submit=on_submit
        >
            "Don't have an account? "
            <A href="/signup">"Sign up"</A>
        </CredentialsForm>
    }
}
