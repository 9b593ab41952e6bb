//! Document Upload - View Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

use super::model::{delete_document, fetch_documents, upload_files};
use super::state::{apply_delete_result, apply_upload_result, UploadPhase, UploadedFiles};
use super::view_model::{FileUploadVm, SelectedFile};
use crate::layout::notification_service::use_notifications;
use crate::shared::api_client::use_api;
use crate::shared::config::use_config;
use crate::shared::date_utils::{file_caption, format_size_mb};
use crate::shared::icons::icon;
use crate::system::auth::api::ensure_session;
use crate::system::auth::context::{remember_user_id, use_auth};

/// Upload widget.
///
/// `on_busy_change` receives `true` when an upload or delete starts and
/// `false` once it settled, whatever the outcome.
#[component]
#[allow(non_snake_case)]
pub fn FileUpload(on_busy_change: Callback<bool>) -> impl IntoView {
    let vm = FileUploadVm::new();
    let client = use_api();
    let notifications = use_notifications();
    let accept = use_config().upload.accept;
    let (_, set_auth_state) = use_auth();

    // Session id (best effort) and the server's document list
    Effect::new({
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn_local(async move {
                match ensure_session(&client).await {
                    Ok(resp) => remember_user_id(set_auth_state, resp.user_id),
                    Err(e) => log::debug!("auth/ensure failed: {}", e),
                }

                match fetch_documents(&client).await {
                    Ok(documents) => {
                        log::debug!("loaded {} documents", documents.len());
                        vm.uploaded.set(UploadedFiles::from(documents));
                    }
                    Err(e) => {
                        log::warn!("failed to load documents: {}", e);
                        vm.uploaded.set(UploadedFiles::default());
                    }
                }
            });
        }
    });

    let on_files_picked = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(list) = input.files() {
            let picked: Vec<SelectedFile> = (0..list.length())
                .filter_map(|i| list.get(i))
                .map(SelectedFile::from_file)
                .collect();
            vm.add_selected(picked);
        }
        // Allow picking the same file again
        input.set_value("");
    };

    let handle_upload = {
        let client = client.clone();
        move |_: leptos::ev::MouseEvent| {
            let files: Vec<web_sys::File> = vm
                .pending
                .with_untracked(|pending| pending.items().iter().map(|f| f.file.clone()).collect());
            if files.is_empty() || !vm.start(UploadPhase::Uploading, on_busy_change) {
                return;
            }

            let client = client.clone();
            spawn_local(async move {
                let sent_count = files.len();
                let result = upload_files(&client, &files).await;
                if let Err(e) = &result {
                    log::error!("Error uploading files: {}", e);
                }

                if let Some(outcome) = vm
                    .uploaded
                    .try_update(|uploaded| apply_upload_result(uploaded, sent_count, result))
                {
                    vm.pending.update(|pending| pending.drain_front(outcome.sent_count));
                    remember_user_id(set_auth_state, outcome.user_id);
                    notifications.notify(outcome.notice);
                }

                vm.finish(on_busy_change);
            });
        }
    };

    let handle_delete = Callback::new({
        let client = client.clone();
        move |file_id: String| {
            if !vm.start(UploadPhase::Deleting, on_busy_change) {
                return;
            }

            let client = client.clone();
            spawn_local(async move {
                let result = delete_document(&client, &file_id).await;
                if let Err(e) = &result {
                    log::error!("Error deleting file {}: {}", file_id, e);
                }

                if let Some(notice) = vm
                    .uploaded
                    .try_update(|uploaded| apply_delete_result(uploaded, &file_id, result))
                {
                    notifications.notify(notice);
                }

                vm.finish(on_busy_change);
            });
        }
    });

    view! {
        <div class="upload-panel">
            <div class="upload-panel__logo">"PDF GPT"</div>

            <label class="upload-dropzone">
                <div class="upload-dropzone__hint">
                    {icon("upload")}
                    <p><strong>"Click to upload file"</strong></p>
                    <p class="muted">"PDF files only"</p>
                </div>
                <input
                    type="file"
                    accept=accept
                    multiple
                    class="upload-dropzone__input"
                    on:change=on_files_picked
                />
            </label>

            <Show when=move || vm.pending.with(|pending| !pending.is_empty())>
                <h3>"Selected Files"</h3>
                <ul class="file-list">
                    {move || {
                        vm.pending
                            .with(|pending| {
                                pending
                                    .items()
                                    .iter()
                                    .enumerate()
                                    .map(|(index, file)| {
                                        let name = file.name.clone();
                                        let size = format_size_mb(file.size);
                                        view! {
                                            <li class="file-row">
                                                {icon("pdf")}
                                                <div class="file-row__text">
                                                    <p class="file-row__name">{name}</p>
                                                    <p class="muted">{size}</p>
                                                </div>
                                                <button
                                                    type="button"
                                                    class="icon-button"
                                                    title="Remove"
                                                    on:click=move |_| vm.remove_selected(index)
                                                >
                                                    {icon("close")}
                                                </button>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            })
                    }}
                </ul>
            </Show>

            <Button
                appearance=ButtonAppearance::Primary
                disabled=Signal::derive(move || {
                    vm.phase.get().is_busy() || vm.pending.with(|pending| pending.is_empty())
                })
                on_click=handle_upload
            >
                {move || if vm.phase.get() == UploadPhase::Uploading { "Uploading..." } else { "Upload" }}
            </Button>

            <Show when=move || !vm.uploaded.with(|uploaded| uploaded.is_empty())>
                <h3>"Uploaded Files"</h3>
                <div class="file-list">
                    <For
                        each=move || vm.uploaded.with(|uploaded| uploaded.items().to_vec())
                        key=|file| file.file_id.clone()
                        let:file
                    >
                        {
                            let file_id = file.file_id.clone();
                            let caption = file_caption(file.size, file.upload_time.as_deref());
                            view! {
                                <div class="file-row">
                                    {icon("pdf")}
                                    <div class="file-row__text">
                                        <p class="file-row__name">{file.display_name().to_string()}</p>
                                        <p class="muted">{caption}</p>
                                    </div>
                                    <button
                                        type="button"
                                        class="icon-button"
                                        title="Delete"
                                        disabled=move || vm.phase.get().is_busy()
                                        on:click=move |_| handle_delete.run(file_id.clone())
                                    >
                                        {icon("trash")}
                                    </button>
                                </div>
                            }
                        }
                    </For>
                </div>
            </Show>
        </div>
    }
}
