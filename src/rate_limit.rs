//! In-memory rate limiting for login attempts.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<String, VecDeque<Instant>>`,
//! keyed by the normalized employee code. Two limits enforced:
//! - Per-code: 5 attempts/min
//! - Global: 100 attempts/min
//!
//! TRADE-OFFS
//! ==========
//! Keying by submitted code throttles a brute-force run against one code
//! from any source. A sweep across many candidate codes only hits the
//! global ceiling, which also protects the database from login floods.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const DEFAULT_PER_CODE_LIMIT: usize = 5;
const DEFAULT_PER_CODE_WINDOW_SECS: u64 = 60;

const DEFAULT_GLOBAL_LIMIT: usize = 100;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

#[derive(Clone, Copy)]
struct RateLimitConfig {
    per_code_limit: usize,
    per_code_window: Duration,
    global_limit: usize,
    global_window: Duration,
}

impl RateLimitConfig {
    fn from_env() -> Self {
        let per_code_window_secs = env_parse("LOGIN_RATE_LIMIT_PER_CODE_WINDOW_SECS", DEFAULT_PER_CODE_WINDOW_SECS);
        let global_window_secs = env_parse("LOGIN_RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS);

        Self {
            per_code_limit: env_parse("LOGIN_RATE_LIMIT_PER_CODE", DEFAULT_PER_CODE_LIMIT),
            per_code_window: Duration::from_secs(per_code_window_secs),
            global_limit: env_parse("LOGIN_RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: Duration::from_secs(global_window_secs),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("per-code rate limit exceeded (max {limit} attempts/{window_secs}s)")]
    PerCodeExceeded { limit: usize, window_secs: u64 },
    #[error("global rate limit exceeded (max {limit} attempts/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// LIMITER
// =============================================================================

#[derive(Clone)]
pub struct LoginRateLimiter {
    inner: Arc<Mutex<LimiterInner>>,
    config: RateLimitConfig,
}

struct LimiterInner {
    /// Attempt timestamps per normalized code.
    code_attempts: HashMap<String, VecDeque<Instant>>,
    /// Attempt timestamps across all codes.
    global_attempts: VecDeque<Instant>,
}

impl LoginRateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(LimiterInner {
                code_attempts: HashMap::new(),
                global_attempts: VecDeque::new(),
            })),
            config: RateLimitConfig::from_env(),
        }
    }

    /// Check both limits, then record the attempt.
    ///
    /// # Errors
    ///
    /// Returns which limit was exceeded; nothing is recorded in that case.
    pub fn check_and_record(&self, code: &str) -> Result<(), RateLimitError> {
        self.check_and_record_at(code, Instant::now())
    }

    /// Internal: check + record with explicit timestamp (for testing).
    fn check_and_record_at(&self, code: &str, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;

        // Prune and check global first (no borrow conflict).
        prune_window(&mut inner.global_attempts, now, cfg.global_window);
        if inner.global_attempts.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        // Prune and check per-code.
        let code_deque = inner.code_attempts.entry(code.to_owned()).or_default();
        prune_window(code_deque, now, cfg.per_code_window);
        if code_deque.len() >= cfg.per_code_limit {
            return Err(RateLimitError::PerCodeExceeded {
                limit: cfg.per_code_limit,
                window_secs: cfg.per_code_window.as_secs(),
            });
        }

        // Record.
        code_deque.push_back(now);
        inner.global_attempts.push_back(now);

        Ok(())
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
