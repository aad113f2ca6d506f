//! Application layer - the conversation session.
//!
//! Coordinates the domain (validation, chart extraction, presentation) with
//! the ports (chat backend, rate limiter) for one conversation.

mod session;

pub use session::{ChatSession, PendingTurn, Rejection, SessionError, DEFAULT_REQUEST_TIMEOUT};
