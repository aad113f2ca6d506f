//! Rate limiting port for outbound chat requests.
//!
//! Admission is a synchronous decision taken before the network call. The
//! limiter is owned by the session actor, so implementations take `&mut self`
//! and need no locking.

use std::fmt;
use std::time::{Duration, Instant};

use crate::domain::foundation::ConversationId;

/// Port for request admission.
pub trait RateLimiter: Send {
    /// Checks whether a request at `now` is admitted, counting it if so.
    fn check_at(&mut self, key: &RateLimitKey, now: Instant) -> RateLimitResult;

    /// Checks whether a request made now is admitted.
    fn check(&mut self, key: &RateLimitKey) -> RateLimitResult {
        self.check_at(key, Instant::now())
    }

    /// Time left in the key's current window at `now`; zero if none is open.
    fn time_until_reset_at(&self, key: &RateLimitKey, now: Instant) -> Duration;

    /// Time left in the key's current window.
    fn time_until_reset(&self, key: &RateLimitKey) -> Duration {
        self.time_until_reset_at(key, Instant::now())
    }

    /// Forgets the key's window, restoring its full quota.
    fn reset(&mut self, key: &RateLimitKey);

    /// Forgets every window.
    fn clear(&mut self);
}

/// Key identifying what to rate limit.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    /// The scope of this rate limit.
    pub scope: RateLimitScope,
    /// Identifier within the scope.
    pub identifier: String,
}

/// The scope at which rate limiting is applied.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum RateLimitScope {
    /// One limit per conversation.
    Conversation,
}

impl RateLimitKey {
    /// Creates a per-conversation key.
    pub fn conversation(id: &ConversationId) -> Self {
        Self {
            scope: RateLimitScope::Conversation,
            identifier: id.to_string(),
        }
    }
}

impl RateLimitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitScope::Conversation => "conversation",
        }
    }
}

impl fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope, self.identifier)
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed; includes current status.
    Allowed(RateLimitStatus),
    /// Request is denied; includes denial details.
    Denied(RateLimitDenied),
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, RateLimitResult::Denied(_))
    }

    /// Converts into a `Result`, denial being the error.
    pub fn into_result(self) -> Result<RateLimitStatus, RateLimitDenied> {
        match self {
            RateLimitResult::Allowed(status) => Ok(status),
            RateLimitResult::Denied(denied) => Err(denied),
        }
    }
}

/// Quota left after an admitted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// Time until the current window closes.
    pub resets_in: Duration,
}

/// Details of a rate limit denial.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rate limit of {limit} requests exceeded, retry after {retry_after:?}")]
pub struct RateLimitDenied {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Time until the window closes. Always positive.
    pub retry_after: Duration,
}

impl RateLimitDenied {
    /// Wait time rounded up to whole seconds.
    pub fn retry_after_secs(&self) -> u64 {
        let secs = self.retry_after.as_secs();
        if self.retry_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// Finished sentence shown in the transcript.
    pub fn user_message(&self) -> String {
        let secs = self.retry_after_secs();
        let unit = if secs > 1 { "segundos" } else { "segundo" };
        format!(
            "Muitas requisições. Aguarde {} {} antes de tentar novamente.",
            secs, unit
        )
    }
}
