//! Chat - View Component

use contracts::domain::a002_chat::aggregate::{ChatMessage, ChatRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::message::{ChatBubble, ThinkingBubble};
use super::model::ask;
use super::state::{resolve_user_id, Conversation, TranscriptStore};
use super::view_model::ChatboxVm;
use crate::shared::api_client::use_api;
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use crate::shared::storage::{BrowserStorage, SharedStore};
use crate::system::auth::context::use_auth;

/// Shown instead of the chat while documents are being embedded
#[component]
fn EmbeddingLoader() -> impl IntoView {
    view! {
        <div class="embedding-loader">
            <h2>"Please wait while we are embedding your file"</h2>
            <Spinner />
        </div>
    }
}

/// Multi-turn chat over the uploaded documents.
///
/// The transcript is restored from `storage` (browser `localStorage` unless
/// another store is injected) and written back after every change.
#[component]
#[allow(non_snake_case)]
pub fn Chatbox(
    #[prop(into)] is_uploading: Signal<bool>,
    #[prop(optional)] storage: Option<SharedStore>,
) -> impl IntoView {
    let config = use_config();
    let client = use_api();
    let (auth_state, _) = use_auth();

    let storage = storage.unwrap_or_else(BrowserStorage::shared);
    let transcript = TranscriptStore::new(
        storage,
        config.chat.conversation_key.clone(),
        config.chat.persist_transcript,
    );
    let vm = ChatboxVm::new(Conversation::from_messages(transcript.load()));
    let messages_container_ref = NodeRef::<leptos::html::Div>::new();

    // Write the transcript back on every change
    Effect::new({
        let transcript = transcript.clone();
        move |_| {
            let messages = vm.conversation.with(|c| c.messages().to_vec());
            if let Err(e) = transcript.save(&messages) {
                log::warn!("failed to persist transcript: {}", e);
            }
        }
    });

    // Keep the newest message in view
    Effect::new(move |_| {
        vm.conversation.track();
        if let Some(container) = messages_container_ref.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let handle_send = Callback::new({
        let transcript = transcript.clone();
        let user_id_key = config.chat.user_id_key.clone();
        let fallback_user_id = config.chat.fallback_user_id.clone();
        move |_: ()| {
            let input = vm.user_input.get_untracked();
            let Some(query) = vm.conversation.try_update(|c| c.begin(&input)).flatten() else {
                return;
            };
            vm.user_input.set(String::new());

            let user_id = resolve_user_id(
                auth_state.get_untracked().user_id.as_deref(),
                transcript.read_value(&user_id_key).as_deref(),
                &fallback_user_id,
            );
            let request = ChatRequest { query, user_id };

            let client = client.clone();
            spawn_local(async move {
                let result = ask(&client, &request).await;
                if let Err(e) = &result {
                    log::error!("chat request failed: {}", e);
                }
                // Owner may be gone if the user signed out meanwhile
                let _ = vm.conversation.try_update(|c| c.finish(result));
            });
        }
    });

    let typewriter_delay_ms = config.chat.typewriter_delay_ms;

    view! {
        <div class="chatbox">
            <div class="chatbox__header">
                <h1>"Chat Box"</h1>
            </div>

            <Show
                when=move || !is_uploading.get()
                fallback=|| view! { <EmbeddingLoader /> }
            >
                <div class="chatbox__body">
                    <div class="chatbox__messages" node_ref=messages_container_ref>
                        <Show when=move || vm.conversation.with(|c| c.messages().is_empty() && !c.is_waiting())>
                            <div class="chatbox__empty">
                                <p>"Ask a question about your uploaded PDF document"</p>
                            </div>
                        </Show>

                        <For
                            each=move || {
                                vm.conversation.with(|c| {
                                    c.messages()
                                        .iter()
                                        .cloned()
                                        .enumerate()
                                        .collect::<Vec<(usize, ChatMessage)>>()
                                })
                            }
                            key=|(index, _)| *index
                            children=move |(index, message)| {
                                let animate = vm.claim_reveal(index);
                                view! {
                                    <ChatBubble
                                        message=message
                                        animate=animate
                                        typewriter_delay_ms=typewriter_delay_ms
                                    />
                                }
                            }
                        />

                        <Show when=move || vm.is_waiting()>
                            <ThinkingBubble />
                        </Show>
                    </div>

                    <div class="chatbox__input">
                        <input
                            type="text"
                            placeholder="Enter your question"
                            prop:value=move || vm.user_input.get()
                            on:input=move |ev| vm.user_input.set(event_target_value(&ev))
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    handle_send.run(());
                                }
                            }
                            disabled=move || vm.is_waiting()
                        />
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || {
                                vm.is_waiting() || vm.user_input.with(|s| s.trim().is_empty())
                            })
                            on_click=move |_| handle_send.run(())
                        >
                            "Send "
                            {icon("send")}
                        </Button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
