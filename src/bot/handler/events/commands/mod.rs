mod chat;
mod config;
mod joke;
mod reset;

pub use chat::chat;
pub use config::{set_key, set_persona, view};
pub use joke::joke;
pub use reset::reset;
