mod chat_message;
mod completion_config;
mod conversation;
mod negotiation_request;
mod persona;
mod scenario;

pub use chat_message::*;
pub use completion_config::*;
pub use conversation::*;
pub use negotiation_request::*;
pub use persona::*;
pub use scenario::*;
