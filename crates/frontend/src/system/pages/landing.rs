use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_document::ui::upload::FileUpload;
use crate::domain::a002_chat::ui::chatbox::Chatbox;
use crate::shared::api_client::use_api;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};

/// Upload panel and chat side by side.
///
/// The upload widget reports uploads/deletes in flight through
/// `on_busy_change`; the chat blocks while that flag is set.
#[component]
pub fn LandingPage() -> impl IntoView {
    let is_uploading = RwSignal::new(false);
    let on_busy_change = Callback::new(move |busy: bool| is_uploading.set(busy));

    let (auth_state, set_auth_state) = use_auth();
    let client = use_api();

    let on_logout = move |_| {
        let client = client.clone();
        spawn_local(async move {
            do_logout(&client, set_auth_state).await;
        });
    };

    view! {
        <div class="landing">
            <header class="landing__header">
                <span class="landing__user">
                    {move || auth_state.get().username.unwrap_or_default()}
                </span>
                <button type="button" class="btn-link" on:click=on_logout>
                    {icon("logout")}
                    " Logout"
                </button>
            </header>
            <div class="landing__grid">
                <div class="landing__upload">
                    <FileUpload on_busy_change=on_busy_change />
                </div>
                <div class="landing__chat">
                    <Chatbox is_uploading=is_uploading />
                </div>
            </div>
        </div>
    }
}
