//! Chat backend adapters.
//!
//! - `WebhookBackend` - JSON over HTTP POST
//! - `MockBackend` - queued replies for tests

mod mock;
mod webhook;

pub use mock::MockBackend;
pub use webhook::{WebhookBackend, WebhookConfig};
