//! Withdrawal rate limiter
//!
//! Fixed window per caller: the window opens on the caller's first
//! request and every request inside it counts, rejected ones included.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Windows beyond this many callers trigger a sweep of expired entries
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

/// Per-key fixed window limiter
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_hits: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(max_hits: u32, window: Duration) -> Self {
        Self {
            max_hits,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record a hit for `key` now; `false` once the window is used up
    pub async fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now()).await
    }

    /// Record a hit for `key` at `now`
    pub async fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().await;

        if windows.len() > SWEEP_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.saturating_duration_since(w.started) < window);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            hits: 0,
        });

        if now.saturating_duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                hits: 0,
            };
        }

        entry.hits = entry.hits.saturating_add(1);

        if entry.hits > self.max_hits {
            tracing::debug!(key, hits = entry.hits, "Rate limit exceeded");
            return false;
        }
        true
    }
}
