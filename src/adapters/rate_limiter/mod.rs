//! Rate limiter adapters.
//!
//! - `FixedWindowRateLimiter` - In-process fixed-window counter
//!
//! ## Usage
//!
//! ```ignore
//! use chart_assistant::adapters::rate_limiter::{FixedWindowRateLimiter, RateLimitConfig};
//!
//! let limiter = FixedWindowRateLimiter::new(RateLimitConfig::default());
//! ```

mod config;
mod fixed_window;

pub use config::RateLimitConfig;
pub use fixed_window::FixedWindowRateLimiter;
