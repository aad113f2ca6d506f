//! Conversation store adapters.
//!
//! - `InMemoryConversationStore` - process lifetime, for tests
//! - `FileConversationStore` - single text file on disk

mod file;
mod in_memory;

pub use file::FileConversationStore;
pub use in_memory::InMemoryConversationStore;
