//! Chat UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: API functions
//! - state.rs: Conversation transitions and transcript persistence
//! - view_model.rs: ChatboxVm with RwSignals
//! - view.rs: Main component Chatbox
//! - message.rs: Message bubble and thinking indicator

mod message;
mod model;
mod state;
mod view;
mod view_model;

pub use message::{ChatBubble, ThinkingBubble};
pub use state::{resolve_user_id, Conversation, TranscriptStore};
pub use view::Chatbox;
pub use view_model::ChatboxVm;
