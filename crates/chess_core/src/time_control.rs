//! Search limits and the per-move clock.
//!
//! A search is bounded by a fixed depth and, optionally, a per-move time
//! budget. The budget is enforced cooperatively: engines poll
//! [`TimeControl::check_time`] every [`CLOCK_CHECK_INTERVAL`] nodes and
//! unwind once it trips.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::error::{ChessError, ChessResult};

/// Nodes searched between two reads of the clock.
pub const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Depth and time bounds for one engine decision.
///
/// With a `move_time` the engine deepens iteratively and answers with the
/// best move of the last depth it finished before the clock ran out.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
    /// Budget for this move, `None` for a plain fixed-depth search
    pub move_time: Option<Duration>,
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Validated limits; a depth of zero is a configuration error.
    pub fn new(depth: u8, move_time: Option<Duration>) -> ChessResult<Self> {
        let limits = Self::unchecked(depth, move_time);
        limits.validate()?;
        Ok(limits)
    }

    /// Fixed-depth limits without a clock.
    pub fn depth(depth: u8) -> Self {
        Self::unchecked(depth, None)
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self::unchecked(depth, Some(move_time))
    }

    fn unchecked(depth: u8, move_time: Option<Duration>) -> Self {
        Self {
            depth,
            move_time,
            time_control: TimeControl::new(move_time),
        }
    }

    pub fn validate(&self) -> ChessResult<()> {
        if self.depth == 0 {
            return Err(ChessError::IllegalConfiguration(
                "search depth must be at least 1".into(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Starts (or restarts) the clock; engines call this on entry to `search`.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(3)
    }
}

/// Per-move clock with a stop flag.
///
/// Clones share both the flag and the start instant, so a clone handed to
/// another thread can [`stop`](TimeControl::stop) a running search.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    started_at: Arc<RwLock<Option<Instant>>>,
    budget: Option<Duration>,
}

impl TimeControl {
    pub fn new(budget: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            started_at: Arc::new(RwLock::new(None)),
            budget,
        }
    }

    pub fn start(&self) {
        let mut started_at = self
            .started_at
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *started_at = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Reads the clock and raises the stop flag once the budget is spent.
    /// Returns whether the search must stop.
    pub fn check_time(&self) -> bool {
        if !self.is_stopped() && self.remaining() == Some(Duration::ZERO) {
            self.stop();
        }
        self.is_stopped()
    }

    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes.is_multiple_of(CLOCK_CHECK_INTERVAL)
    }

    /// Time since `start`, zero if the clock never started.
    pub fn elapsed(&self) -> Duration {
        let started_at = *self
            .started_at
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        started_at.map_or(Duration::ZERO, |t| t.elapsed())
    }

    /// Budget left, `None` without a budget.
    pub fn remaining(&self) -> Option<Duration> {
        self.budget
            .map(|budget| budget.saturating_sub(self.elapsed()))
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
