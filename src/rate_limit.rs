//! Rolling-window submission limiter.
//!
//! Caps outbound order actions (inserts and cancels) within the trailing
//! window. Never blocks: a full window just answers no, and the caller asks
//! again on its next opportunity.

use crate::config::RateLimitConfig;
use crate::types::Timestamp;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingWindowLimiter {
    max_actions: usize,
    window_ms: i64,
    /// Timestamps of admitted actions still inside the window.
    sent: VecDeque<Timestamp>,
    total: u64,
    dropped: u64,
}

impl RollingWindowLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_actions: config.max_actions,
            window_ms: config.window_ms,
            sent: VecDeque::with_capacity(config.max_actions),
            total: 0,
            dropped: 0,
        }
    }

    /// Consume a slot if one is free at `now`.
    pub fn try_acquire(&mut self, now: Timestamp) -> bool {
        self.prune(now);
        self.total += 1;

        if self.sent.len() >= self.max_actions {
            self.dropped += 1;
            false
        } else {
            self.sent.push_back(now);
            true
        }
    }

    /// Free slots at `now`, without consuming any.
    pub fn remaining(&mut self, now: Timestamp) -> usize {
        self.prune(now);
        self.max_actions.saturating_sub(self.sent.len())
    }

    /// Actions older than the window no longer count.
    fn prune(&mut self, now: Timestamp) {
        let cutoff = now.as_millis() - self.window_ms;
        while let Some(front) = self.sent.front() {
            if front.as_millis() <= cutoff {
                self.sent.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
