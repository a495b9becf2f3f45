mod completion;
mod error;
mod history;
mod message;
mod search;
mod session;

pub use completion::OpenAiClient;
pub use error::ChatError;
pub use history::{ContextId, HistoryStore};
pub use search::{GoogleSearch, SearchProvider};
pub use session::{SessionManager, TenantConfig};
