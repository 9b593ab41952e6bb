//! Chat - Message bubbles

use contracts::domain::a002_chat::aggregate::ChatMessage;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

const DOTS_INTERVAL_MS: u32 = 500;

/// First `count` characters of `text`
fn typed_prefix(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

/// Zero to three dots, cycling
fn dots(step: usize) -> String {
    ".".repeat(step % 4)
}

#[component]
pub fn ChatBubble(
    message: ChatMessage,
    /// Reveal the text character by character (fresh answers only)
    #[prop(optional)]
    animate: bool,
    #[prop(default = 30)] typewriter_delay_ms: u32,
) -> impl IntoView {
    let is_user = message.is_user;
    let text = message.text.clone();
    let total = text.chars().count();
    let shown = RwSignal::new(if animate && !is_user { 0 } else { total });

    if animate && !is_user && total > 0 {
        spawn_local(async move {
            for count in 1..=total {
                TimeoutFuture::new(typewriter_delay_ms).await;
                // Bubble was unmounted (chat hidden during an upload)
                if shown.try_set(count).is_some() {
                    break;
                }
            }
        });
    }

    let sources = message
        .source_names()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    view! {
        <div class=if is_user { "chat-row chat-row--user" } else { "chat-row chat-row--bot" }>
            {(!is_user).then(|| view! { <div class="avatar avatar--bot">{icon("bot")}</div> })}

            <div class=if is_user { "bubble bubble--user" } else { "bubble bubble--bot" }>
                <span>{move || typed_prefix(&text, shown.get())}</span>
                <Show when=move || shown.get() < total>
                    <span class="typing-cursor"></span>
                </Show>
                {(!sources.is_empty())
                    .then(|| view! { <div class="bubble__sources">"Sources: " {sources}</div> })}
            </div>

            {is_user.then(|| view! { <div class="avatar avatar--user">{icon("user")}</div> })}
        </div>
    }
}

/// Placeholder bot bubble while an answer is outstanding
#[component]
pub fn ThinkingBubble() -> impl IntoView {
    let step = RwSignal::new(0usize);

    spawn_local(async move {
        loop {
            TimeoutFuture::new(DOTS_INTERVAL_MS).await;
            if step.try_update(|s| *s = (*s + 1) % 4).is_none() {
                break;
            }
        }
    });

    view! {
        <div class="chat-row chat-row--bot">
            <div class="avatar avatar--bot">{icon("bot")}</div>
            <div class="bubble bubble--bot thinking">
                <span>"Thinking"</span>
                <span class="thinking__dots">{move || dots(step.get())}</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_prefix_counts_chars() {
        assert_eq!(typed_prefix("héllo", 2), "hé");
        assert_eq!(typed_prefix("abc", 0), "");
        assert_eq!(typed_prefix("abc", 10), "abc");
    }

    #[test]
    fn test_dots_cycle() {
        assert_eq!(dots(0), "");
        assert_eq!(dots(3), "...");
        assert_eq!(dots(4), "");
    }
}
