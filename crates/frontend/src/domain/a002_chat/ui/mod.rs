pub mod chatbox;
