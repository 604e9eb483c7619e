//! Periodic window reset timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::limiter::WindowLimiter;

/// Drives the window boundary for a [`WindowLimiter`].
///
/// A background task ticks at a fixed rate (period, 2·period, ...) and calls
/// [`WindowLimiter::reset_window`] on every tick, regardless of how many
/// callers are blocked or how many permits are outstanding. Ticks that fall
/// behind under load are delivered late rather than skipped.
pub struct WindowTicker {
    handle: JoinHandle<()>,
}

impl WindowTicker {
    /// Start ticking for the given limiter.
    ///
    /// The ticker runs until [`stop`](Self::stop) is called or the ticker is
    /// dropped.
    pub fn start(limiter: Arc<WindowLimiter>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick of a tokio interval completes immediately;
            // consume it so resets land at period, 2·period, ...
            interval.tick().await;

            loop {
                interval.tick().await;
                limiter.reset_window();
                debug!(
                    available = limiter.available(),
                    "Window reset, capacity restored"
                );
            }
        });

        Self { handle }
    }

    /// Stop the ticker. No further resets occur after this returns.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for WindowTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
