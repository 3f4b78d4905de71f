pub mod chat;

pub use chat::{ChatControl, CommandHandler};
