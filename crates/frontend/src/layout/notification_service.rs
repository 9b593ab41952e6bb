use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::shared::icons::icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notification notification--success",
            NoticeKind::Error => "notification notification--error",
        }
    }
}

/// Message a widget wants shown to the user
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Notification {
    id: Uuid,
    notice: Notice,
}

/// Non-blocking notifications shown in a corner stack
#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
    timeout_ms: u32,
}

impl NotificationService {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            timeout_ms,
        }
    }

    /// Show a notice; it disappears by itself after the configured timeout
    pub fn notify(&self, notice: Notice) {
        let id = Uuid::new_v4();
        self.items.update(|items| items.push(Notification { id, notice }));

        let service = *self;
        spawn_local(async move {
            TimeoutFuture::new(service.timeout_ms).await;
            service.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: Uuid) {
        // The owner may already be gone when a timeout fires after navigation
        let _ = self.items.try_update(|items| items.retain(|n| n.id != id));
    }
}

/// Hook to access the notification service provided by `App`
pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not provided in context")
}

#[component]
pub fn NotificationHost() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="notification-stack">
            <For
                each=move || service.items.get()
                key=|n| n.id
                let:item
            >
                <div class=item.notice.kind.css_class() role="status">
                    <span>{item.notice.text.clone()}</span>
                    <button
                        class="notification__close"
                        on:click=move |_| service.dismiss(item.id)
                    >
                        {icon("close")}
                    </button>
                </div>
            </For>
        </div>
    }
}
