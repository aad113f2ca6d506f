//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the chat session and the outside world. Adapters implement these ports.
//!
//! - `ChatBackend` - sends a turn to the conversational backend
//! - `ConversationStore` - persists the conversation identifier
//! - `RateLimiter` - admission control for outbound requests

mod chat_backend;
mod conversation_store;
mod rate_limiter;

pub use chat_backend::{BackendError, BackendReply, ChatBackend, ChatRequest};
pub use conversation_store::{ConversationStore, StoreError};
pub use rate_limiter::{
    RateLimitDenied, RateLimitKey, RateLimitResult, RateLimitScope, RateLimitStatus, RateLimiter,
};
