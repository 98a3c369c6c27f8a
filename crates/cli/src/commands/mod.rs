//! Command handlers for the webask CLI.

pub mod ask;
pub mod chat;
pub mod search;

pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use search::SearchCommand;
