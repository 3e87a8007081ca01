//! Sliding-window rate limiter for outbound API calls.
//!
//! Fixed 60-second window, configurable max count. `acquire` blocks the
//! calling thread with a timed sleep until the window has capacity; calls
//! go through in FIFO order with no fairness guarantee beyond that.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(60);

pub struct RateLimiter {
    max_calls: usize,
    window: Duration,
    calls: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_calls: usize) -> Self {
        Self::with_window(max_calls, WINDOW)
    }

    /// Test hook: same limiter with a shorter window.
    pub fn with_window(max_calls: usize, window: Duration) -> Self {
        Self {
            max_calls: max_calls.max(1),
            window,
            calls: VecDeque::new(),
        }
    }

    /// Block until a call slot is free, then claim it.
    pub fn acquire(&mut self) {
        loop {
            let now = Instant::now();
            while let Some(&front) = self.calls.front() {
                if now.duration_since(front) >= self.window {
                    self.calls.pop_front();
                } else {
                    break;
                }
            }

            if self.calls.len() < self.max_calls {
                self.calls.push_back(now);
                return;
            }

            // window is full; the front call expires first
            let front = self.calls[0];
            let wait = self.window.saturating_sub(now.duration_since(front));
            if !wait.is_zero() {
                eprintln!(
                    "rate limit reached ({} calls/{:?}), waiting {:.1}s",
                    self.max_calls,
                    self.window,
                    wait.as_secs_f64()
                );
                std::thread::sleep(wait);
            }
        }
    }
}

#[cfg(test)]
#[path = "limiter_test.rs"]
mod tests;
