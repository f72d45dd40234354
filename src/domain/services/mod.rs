mod chat_session;
mod citations;
mod credentials;

pub use chat_session::*;
pub use citations::*;
pub use credentials::*;
