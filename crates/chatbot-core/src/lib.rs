pub mod api;
pub mod config;
pub mod error;
pub mod i18n;
pub mod session;
pub mod state;

// Re-export main types for convenience
pub use api::{ChatClient, ChatRequest, HealthStatus};
pub use config::Config;
pub use error::ChatError;
pub use i18n::{Language, LocalizedView, Localizer, Translations, UiText};
pub use session::{ChatSession, ChatView, SessionState};
pub use state::{ChatMessage, ChatRole, Conversation};
