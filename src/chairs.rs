//! # Bounded chair pool contested by all players.
//!
//! [`ChairPool`] is the shared resource of the game: every round exposes a
//! fixed number of chairs, and each claim atomically consumes one or fails.
//! Running out of chairs is not an error; it is the elimination signal.
//!
//! The pool is a compare-and-swap counter, not a semaphore: claimers must
//! fail fast instead of queueing, and the controller replaces the whole
//! budget between rounds with [`ChairPool::reset`].
//!
//! ## Rules
//! - **Decrement-or-fail**: among any number of concurrent callers, exactly
//!   `capacity` claims succeed; the rest observe `None`.
//! - **No claims across resets**: `reset` discards outstanding availability.
//!   The controller only calls it after the round's claims have settled.
//! - **Zero capacity** is valid and rejects every claim.

use std::sync::atomic::{AtomicU32, Ordering};

/// Atomic pool of chairs for the current round.
///
/// Successful claims are numbered `1..=capacity` in claim order, which is
/// what the narration stream reports as the chair number.
///
/// # Example
/// ```
/// use chairvisor::ChairPool;
///
/// let pool = ChairPool::new(2);
/// assert_eq!(pool.try_claim(), Some(1));
/// assert_eq!(pool.try_claim(), Some(2));
/// assert_eq!(pool.try_claim(), None);
///
/// pool.reset(1);
/// assert_eq!(pool.try_claim(), Some(1));
/// ```
#[derive(Debug)]
pub struct ChairPool {
    /// Chairs configured for the current round.
    capacity: AtomicU32,
    /// Chairs still unclaimed in the current round.
    remaining: AtomicU32,
}

impl ChairPool {
    /// Creates a pool with `capacity` claimable chairs.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity: AtomicU32::new(capacity),
            remaining: AtomicU32::new(capacity),
        }
    }

    /// Discards any outstanding availability and exposes exactly `capacity`
    /// chairs for the next round.
    ///
    /// Callers must ensure the previous round's claim attempts have drained
    /// first; a claim racing a reset could be granted a chair belonging to
    /// the new round.
    pub fn reset(&self, capacity: u32) {
        self.capacity.store(capacity, Ordering::SeqCst);
        self.remaining.store(capacity, Ordering::SeqCst);
    }

    /// Attempts to claim one chair.
    ///
    /// Returns the 1-based chair number in claim order on success, or `None`
    /// when no chairs remain. Safe under unbounded concurrent callers.
    pub fn try_claim(&self) -> Option<u32> {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .ok()
            .map(|prev| self.capacity.load(Ordering::SeqCst) - prev + 1)
    }

    /// Chairs configured for the current round.
    pub fn capacity(&self) -> u32 {
        self.capacity.load(Ordering::SeqCst)
    }

    /// Chairs still unclaimed in the current round.
    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_seats_numbered_in_claim_order() {
        let pool = ChairPool::new(3);
        assert_eq!(pool.try_claim(), Some(1));
        assert_eq!(pool.try_claim(), Some(2));
        assert_eq!(pool.try_claim(), Some(3));
        assert_eq!(pool.try_claim(), None);
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn test_zero_capacity_rejects_all_claims() {
        let pool = ChairPool::new(0);
        assert_eq!(pool.try_claim(), None);
        assert_eq!(pool.try_claim(), None);
    }

    #[test]
    fn test_four_racing_claimers_three_chairs() {
        let pool = Arc::new(ChairPool::new(3));
        let start = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = pool.clone();
                let start = start.clone();
                thread::spawn(move || {
                    start.wait();
                    pool.try_claim().is_some()
                })
            })
            .collect();

        let seated = handles
            .into_iter()
            .map(|h| h.join().expect("claimer panicked"))
            .filter(|&seated| seated)
            .count();

        assert_eq!(seated, 3, "exactly capacity claims must succeed");
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn test_successes_never_exceed_capacity_under_contention() {
        let pool = Arc::new(ChairPool::new(5));
        let start = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                let start = start.clone();
                thread::spawn(move || {
                    start.wait();
                    let mut won = 0usize;
                    for _ in 0..4 {
                        if pool.try_claim().is_some() {
                            won += 1;
                        }
                    }
                    won
                })
            })
            .collect();

        let total: usize = handles
            .into_iter()
            .map(|h| h.join().expect("claimer panicked"))
            .sum();

        assert_eq!(total, 5, "32 attempts against 5 chairs must seat exactly 5");
    }

    #[test]
    fn test_reset_discards_and_replenishes() {
        let pool = ChairPool::new(3);
        assert_eq!(pool.try_claim(), Some(1));

        pool.reset(2);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.remaining(), 2);
        assert_eq!(pool.try_claim(), Some(1));
        assert_eq!(pool.try_claim(), Some(2));
        assert_eq!(pool.try_claim(), None);
    }
}
