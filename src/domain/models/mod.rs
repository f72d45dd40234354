mod backend;
mod citation;
mod clipboard;
mod message;
mod notification;
mod session;
mod slash_commands;
mod store;
mod subject;

pub use backend::*;
pub use citation::*;
pub use clipboard::*;
pub use message::*;
pub use notification::*;
pub use session::*;
pub use slash_commands::*;
pub use store::*;
pub use subject::*;
