//! Debounced interactive search.
//!
//! `alens live` reads query lines from stdin and only fires a search once
//! the input has been quiet for the configured debounce window. A newer
//! line replaces the pending query and restarts the window, so fast
//! retyping never issues stale requests. A blank line clears the pending
//! query; EOF exits.

use anyhow::Result;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};

use crate::config::Config;
use crate::search;

/// Debounce window over a stream of values.
///
/// `push` stores the latest value and restarts the quiet window; `fire`
/// resolves once the window has elapsed and yields the value. Only the
/// newest pushed value survives.
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<T>,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: Instant::now(),
        }
    }

    /// Replace the pending value and restart the quiet window.
    pub fn push(&mut self, value: T) {
        self.pending = Some(value);
        self.deadline = Instant::now() + self.window;
    }

    /// Drop the pending value without firing.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait out the quiet window, then take the pending value.
    ///
    /// Never resolves while nothing is pending, so it can sit in a
    /// `select!` arm unguarded. Cancelling and re-polling after another
    /// `push` waits for the new deadline.
    pub async fn fire(&mut self) -> T {
        loop {
            if self.pending.is_none() {
                std::future::pending::<()>().await;
            }
            sleep_until(self.deadline).await;
            if let Some(value) = self.pending.take() {
                return value;
            }
        }
    }
}

/// Interactive search loop over stdin.
pub async fn run_live(config: &Config) -> Result<()> {
    let mut debouncer: Debouncer<String> =
        Debouncer::new(Duration::from_millis(config.search.debounce_ms));
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    println!("Interactive search — type a query, blank line clears, Ctrl-D exits.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        let query = line.trim().to_string();
                        if query.is_empty() {
                            debouncer.clear();
                        } else {
                            debouncer.push(query);
                        }
                    }
                    // EOF
                    None => break,
                }
            }
            query = debouncer.fire() => {
                if let Err(e) = search::run_search(config, &query, None, None, None).await {
                    eprintln!("search failed: {}", e);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_value_wins() {
        let mut d = Debouncer::new(Duration::from_millis(20));
        d.push("first");
        d.push("second");
        assert_eq!(d.fire().await, "second");
        assert!(!d.is_pending());
    }

    #[tokio::test]
    async fn test_push_restarts_window() {
        let mut d = Debouncer::new(Duration::from_millis(50));
        let start = Instant::now();
        d.push(1);
        tokio::time::sleep(Duration::from_millis(30)).await;
        d.push(2);
        assert_eq!(d.fire().await, 2);
        // Second push restarted the 50ms window at t=30ms.
        assert!(start.elapsed() >= Duration::from_millis(75));
    }

    #[tokio::test]
    async fn test_clear_prevents_fire() {
        let mut d = Debouncer::new(Duration::from_millis(10));
        d.push("stale");
        d.clear();
        assert!(!d.is_pending());
        let fired = tokio::time::timeout(Duration::from_millis(50), d.fire()).await;
        assert!(fired.is_err(), "cleared debouncer must not fire");
    }

    #[tokio::test]
    async fn test_empty_debounce_window_fires_immediately() {
        let mut d = Debouncer::new(Duration::from_millis(0));
        d.push("now");
        assert_eq!(d.fire().await, "now");
    }
}
