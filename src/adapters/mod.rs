//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the session to external systems:
//! - `backend` - Chat backends (HTTP webhook, mock)
//! - `rate_limiter` - Fixed-window admission control
//! - `storage` - Conversation id persistence (file, in-memory)

pub mod backend;
pub mod rate_limiter;
pub mod storage;

pub use backend::{MockBackend, WebhookBackend, WebhookConfig};
pub use rate_limiter::{FixedWindowRateLimiter, RateLimitConfig};
pub use storage::{FileConversationStore, InMemoryConversationStore};
