// ============================
// crates/backend-lib/src/auth/throttle.rs
// ============================
//! Brute-force throttle for login attempts.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Default number of failed attempts before an email is blocked
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default cooldown window (15 minutes)
const DEFAULT_COOLDOWN: Duration = Duration::from_secs(15 * 60);

/// Entry in the attempt map
#[derive(Debug, Clone)]
struct AttemptRecord {
    /// Number of failed attempts in the current window
    failures: u32,
    /// Start of the window. Anchored by the first failure only; later
    /// failures increment the count without moving it, so a block always
    /// expires `cooldown` after the first failure of the window.
    window_start: Instant,
}

/// Per-email failed-login throttle.
///
/// All read-modify-write sequences go through the map's entry API, so the
/// counter stays consistent under concurrent requests for the same email.
#[derive(Debug, Clone)]
pub struct AttemptThrottle {
    attempts: Arc<DashMap<String, AttemptRecord>>,
    max_attempts: u32,
    cooldown: Duration,
}

impl Default for AttemptThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_COOLDOWN)
    }
}

impl AttemptThrottle {
    /// Create a throttle blocking after `max_attempts` failures for the
    /// duration of `cooldown`
    pub fn new(max_attempts: u32, cooldown: Duration) -> Self {
        Self {
            attempts: Arc::new(DashMap::new()),
            max_attempts,
            cooldown,
        }
    }

    /// Check whether an email is currently blocked. A stale record (window
    /// elapsed) is discarded and reports unblocked.
    pub fn is_blocked(&self, email: &str) -> bool {
        let stale = match self.attempts.get(email) {
            Some(record) => {
                if record.window_start.elapsed() <= self.cooldown {
                    return record.failures >= self.max_attempts;
                }
                true
            }
            None => false,
        };
        // The read guard is released; safe to remove without deadlocking
        // the shard.
        if stale {
            self.attempts.remove(email);
        }
        false
    }

    /// Record a failed login attempt
    pub fn record_failure(&self, email: &str) {
        let now = Instant::now();
        match self.attempts.entry(email.to_string()) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                if now.duration_since(record.window_start) > self.cooldown {
                    // Stale window: start counting over
                    *record = AttemptRecord {
                        failures: 1,
                        window_start: now,
                    };
                } else {
                    record.failures += 1;
                    if record.failures == self.max_attempts {
                        warn!(email = %email, "email blocked after repeated failed logins");
                    }
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(AttemptRecord {
                    failures: 1,
                    window_start: now,
                });
            }
        }
    }

    /// Forget all failures for an email, called after a successful login
    pub fn clear(&self, email: &str) {
        self.attempts.remove(email);
    }

    /// Drop every stale record. Housekeeping for long-running processes;
    /// `is_blocked` already self-heals per key.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.attempts
            .retain(|_, record| now.duration_since(record.window_start) <= self.cooldown);
    }

    /// Number of emails currently tracked
    pub fn tracked(&self) -> usize {
        self.attempts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn blocks_after_max_attempts() {
        let throttle = AttemptThrottle::new(5, Duration::from_secs(60));
        for _ in 0..4 {
            throttle.record_failure("a@example.com");
            assert!(!throttle.is_blocked("a@example.com"));
        }
        throttle.record_failure("a@example.com");
        assert!(throttle.is_blocked("a@example.com"));

        // Other emails are unaffected
        assert!(!throttle.is_blocked("b@example.com"));
    }

    #[test]
    fn clear_unblocks_immediately() {
        let throttle = AttemptThrottle::new(2, Duration::from_secs(60));
        throttle.record_failure("a@example.com");
        throttle.record_failure("a@example.com");
        assert!(throttle.is_blocked("a@example.com"));

        throttle.clear("a@example.com");
        assert!(!throttle.is_blocked("a@example.com"));
        assert_eq!(throttle.tracked(), 0);
    }

    #[test]
    fn stale_window_resets_the_count() {
        let throttle = AttemptThrottle::new(5, Duration::from_millis(40));
        for _ in 0..5 {
            throttle.record_failure("a@example.com");
        }
        assert!(throttle.is_blocked("a@example.com"));

        sleep(Duration::from_millis(60));

        // Sixth failure after the window: count starts over at 1
        throttle.record_failure("a@example.com");
        assert!(!throttle.is_blocked("a@example.com"));
        for _ in 0..3 {
            throttle.record_failure("a@example.com");
        }
        assert!(!throttle.is_blocked("a@example.com"));
        throttle.record_failure("a@example.com");
        assert!(throttle.is_blocked("a@example.com"));
    }

    #[test]
    fn block_expires_after_cooldown() {
        let throttle = AttemptThrottle::new(2, Duration::from_millis(40));
        throttle.record_failure("a@example.com");
        throttle.record_failure("a@example.com");
        assert!(throttle.is_blocked("a@example.com"));

        sleep(Duration::from_millis(60));
        assert!(!throttle.is_blocked("a@example.com"));
        // The stale record was discarded on the way out
        assert_eq!(throttle.tracked(), 0);
    }

    #[test]
    fn later_failures_do_not_extend_the_block() {
        let throttle = AttemptThrottle::new(2, Duration::from_millis(80));
        throttle.record_failure("a@example.com");
        throttle.record_failure("a@example.com");
        assert!(throttle.is_blocked("a@example.com"));

        // Failure halfway through the window increments but does not move
        // the anchor
        sleep(Duration::from_millis(50));
        throttle.record_failure("a@example.com");
        assert!(throttle.is_blocked("a@example.com"));

        // Past the original window the block is gone even though the last
        // failure was recent
        sleep(Duration::from_millis(50));
        assert!(!throttle.is_blocked("a@example.com"));
    }

    #[test]
    fn cleanup_drops_only_stale_records() {
        let throttle = AttemptThrottle::new(5, Duration::from_millis(40));
        throttle.record_failure("old@example.com");
        sleep(Duration::from_millis(60));
        throttle.record_failure("new@example.com");

        throttle.cleanup();
        assert_eq!(throttle.tracked(), 1);
        assert!(!throttle.is_blocked("new@example.com"));
    }
}
