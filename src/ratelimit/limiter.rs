//! Core windowed admission controller.

use std::pin::pin;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::trace;

use crate::error::{QuotagateError, Result};

/// Admission controller for a fixed number of submissions per time window.
///
/// The limiter tracks how many slots remain in the current window. `acquire`
/// suspends the calling task until a slot is free; a slot is returned when the
/// issued [`SlotPermit`] is dropped, and all slots are restored when
/// [`reset_window`](Self::reset_window) fires at the window boundary.
///
/// All state changes serialize on a single mutex; blocked callers park on a
/// [`Notify`] rather than polling the counter.
pub struct WindowLimiter {
    /// Maximum slots per window, fixed at construction
    capacity: u32,
    /// Slots remaining in the current window
    available: Mutex<u32>,
    /// Wakes parked `acquire` callers after a release or window reset
    notify: Notify,
}

impl WindowLimiter {
    /// Create a new limiter with the given per-window capacity.
    ///
    /// Fails with a configuration error when `capacity` is zero.
    pub fn new(capacity: u32) -> Result<Self> {
        if capacity == 0 {
            return Err(QuotagateError::Config(
                "request capacity must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            capacity,
            available: Mutex::new(capacity),
            notify: Notify::new(),
        })
    }

    /// Acquire a slot, waiting until one is available.
    ///
    /// There is no timeout: the caller is suspended until a slot is freed by a
    /// permit drop or a window reset. The returned permit gives the slot back
    /// when dropped. Cancel-safe: dropping the future before it resolves
    /// consumes no slot.
    pub async fn acquire(self: Arc<Self>) -> SlotPermit {
        let mut notified = pin!(self.notify.notified());
        loop {
            if self.take_slot() {
                return SlotPermit {
                    limiter: Arc::clone(&self),
                };
            }

            // Register as a waiter, then re-check: a slot freed between the
            // first check and registration would otherwise be missed.
            notified.as_mut().enable();
            if self.take_slot() {
                return SlotPermit {
                    limiter: Arc::clone(&self),
                };
            }

            trace!("All slots in use, waiting for release or window reset");
            notified.as_mut().await;
            notified.set(self.notify.notified());
        }
    }

    /// Acquire a slot without waiting.
    ///
    /// Returns `None` when the window's capacity is exhausted. This is an
    /// extension over the blocking contract of [`acquire`](Self::acquire).
    pub fn try_acquire(self: Arc<Self>) -> Option<SlotPermit> {
        if self.take_slot() {
            Some(SlotPermit { limiter: self })
        } else {
            None
        }
    }

    fn take_slot(&self) -> bool {
        let mut available = self.available.lock();
        if *available > 0 {
            *available -= 1;
            true
        } else {
            false
        }
    }

    /// Return one slot to the window, saturating at capacity.
    ///
    /// A release beyond capacity is silently absorbed; the limiter stays
    /// within its invariants even if a caller over-releases. Safe to call
    /// from any task, including one other than the acquirer.
    pub fn release(&self) {
        {
            let mut available = self.available.lock();
            if *available >= self.capacity {
                return;
            }
            *available += 1;
        }
        self.notify.notify_waiters();
    }

    /// Restore the full capacity for a new window.
    ///
    /// The reset is unconditional: slots still held by outstanding permits
    /// are not counted against the new window, and their later release is
    /// absorbed by the saturation in [`release`](Self::release).
    pub fn reset_window(&self) {
        {
            let mut available = self.available.lock();
            *available = self.capacity;
        }
        self.notify.notify_waiters();
    }

    /// The configured per-window capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Slots currently available in this window.
    pub fn available(&self) -> u32 {
        *self.available.lock()
    }
}

/// A held submission slot.
///
/// Dropping the permit returns the slot to its [`WindowLimiter`], so every
/// acquired slot is released exactly once on any exit path.
#[must_use]
pub struct SlotPermit {
    limiter: Arc<WindowLimiter>,
}

impl Drop for SlotPermit {
    fn drop(&mut self) {
        self.limiter.release();
    }
}

impl std::fmt::Debug for SlotPermit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotPermit")
            .field("capacity", &self.limiter.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn test_zero_capacity_is_rejected() {
        let result = WindowLimiter::new(0);
        assert!(matches!(result, Err(QuotagateError::Config(_))));
    }

    #[tokio::test]
    async fn test_acquires_up_to_capacity_without_blocking() {
        let limiter = Arc::new(WindowLimiter::new(3).unwrap());

        let permits: Vec<_> = (0..3).filter_map(|_| limiter.clone().try_acquire()).collect();

        assert_eq!(permits.len(), 3);
        assert_eq!(limiter.available(), 0);
        assert!(limiter.clone().try_acquire().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_blocks_when_exhausted_and_unblocks_on_release() {
        let limiter = Arc::new(WindowLimiter::new(1).unwrap());
        let permit = limiter.clone().acquire().await;

        // Exhausted: a second acquire must not complete.
        let blocked = timeout(Duration::from_millis(50), limiter.clone().acquire()).await;
        assert!(blocked.is_err());

        drop(permit);

        let unblocked = timeout(Duration::from_millis(50), limiter.clone().acquire()).await;
        assert!(unblocked.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_waiters_admitted_as_slots_free() {
        let limiter = Arc::new(WindowLimiter::new(2).unwrap());
        let first = limiter.clone().acquire().await;
        let second = limiter.clone().acquire().await;

        let waiter = tokio::spawn(limiter.clone().acquire());
        // Give the waiter a chance to park.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        drop(first);
        let third = timeout(Duration::from_millis(50), waiter)
            .await
            .expect("waiter should be admitted after a release")
            .unwrap();

        assert_eq!(limiter.available(), 0);
        drop(second);
        drop(third);
        assert_eq!(limiter.available(), 2);
    }

    #[tokio::test]
    async fn test_release_saturates_at_capacity() {
        let limiter = Arc::new(WindowLimiter::new(2).unwrap());

        limiter.release();
        limiter.release();

        assert_eq!(limiter.available(), 2);
    }

    #[tokio::test]
    async fn test_reset_window_is_forgiving_of_outstanding_permits() {
        let limiter = Arc::new(WindowLimiter::new(2).unwrap());
        let held_a = limiter.clone().try_acquire().unwrap();
        let held_b = limiter.clone().try_acquire().unwrap();
        assert_eq!(limiter.available(), 0);

        limiter.reset_window();

        // A full window's worth of slots is available again with no release.
        assert_eq!(limiter.available(), 2);
        let _next_a = limiter.clone().try_acquire().unwrap();
        let _next_b = limiter.clone().try_acquire().unwrap();

        // Dropping the pre-reset permits must not push past capacity.
        drop(held_a);
        drop(held_b);
        drop(_next_a);
        drop(_next_b);
        assert_eq!(limiter.available(), 2);
    }

    #[tokio::test]
    async fn test_available_stays_within_bounds() {
        let limiter = Arc::new(WindowLimiter::new(3).unwrap());

        let mut held = Vec::new();
        for _ in 0..3 {
            assert!(limiter.available() <= limiter.capacity());
            held.push(limiter.clone().try_acquire().unwrap());
        }
        assert_eq!(limiter.available(), 0);

        limiter.reset_window();
        limiter.release();
        held.clear();

        assert_eq!(limiter.available(), limiter.capacity());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_acquire_consumes_no_slot() {
        let limiter = Arc::new(WindowLimiter::new(1).unwrap());
        let permit = limiter.clone().acquire().await;

        let cancelled = timeout(Duration::from_millis(50), limiter.clone().acquire()).await;
        assert!(cancelled.is_err());

        drop(permit);
        assert_eq!(limiter.available(), 1);
    }
}
