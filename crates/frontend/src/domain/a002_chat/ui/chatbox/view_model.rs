//! Chat - View Model

use leptos::prelude::*;

use super::state::{first_reveal, Conversation};

#[derive(Clone, Copy)]
pub struct ChatboxVm {
    pub conversation: RwSignal<Conversation>,
    pub user_input: RwSignal<String>,
    /// Messages below this index render without the typewriter effect
    revealed_len: StoredValue<usize>,
}

impl ChatboxVm {
    pub fn new(conversation: Conversation) -> Self {
        let restored_len = conversation.messages().len();
        Self {
            conversation: RwSignal::new(conversation),
            user_input: RwSignal::new(String::new()),
            revealed_len: StoredValue::new(restored_len),
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.conversation.with(|c| c.is_waiting())
    }

    /// Whether the bubble at `index` should animate; marks it as shown
    pub fn claim_reveal(&self, index: usize) -> bool {
        self.revealed_len
            .try_update_value(|revealed_len| first_reveal(revealed_len, index))
            .unwrap_or(false)
    }
}
