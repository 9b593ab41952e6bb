use contracts::system::auth::Credentials;
use leptos::prelude::*;

use crate::shared::api_client::ApiError;

/// Text shown when login/signup fails: the server's `error` when it sent one
pub fn failure_message(error: &ApiError, default: &str) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

/// Username/password form shared by the login and signup pages
#[component]
pub fn CredentialsForm(
    title: &'static str,
    submit_label: &'static str,
    busy_label: &'static str,
    #[prop(into)] is_loading: Signal<bool>,
    #[prop(into)] error_message: Signal<Option<String>>,
    on_submit: Callback<Credentials>,
    children: Children,
) -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials::new(username.get_untracked(), password.get_untracked());
        if !credentials.is_complete() {
            return;
        }
        on_submit.run(credentials);
    };

    view! {
        <div class="login-container">
            <form class="login-box" on:submit=submit>
                <h1>{title}</h1>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <div class="form-group">
                    <label for="username">"Username"</label>
                    <input
                        type="text"
                        id="username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                </div>

                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                </div>

                <button
                    type="submit"
                    class="btn-primary"
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() { busy_label } else { submit_label }}
                </button>

                <div class="login-info">{children()}</div>
            </form>
        </div>
    }
}
