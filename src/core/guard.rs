//! Reentrancy and cooldown lockout

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Externally visible toggle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Idle,
    Busy,
    Cooldown,
}

#[derive(Debug, Default)]
enum GuardState {
    #[default]
    Idle,
    Busy,
    Cooldown { until: Instant },
}

/// Throttling state machine that blocks re-entry into the toggle.
///
/// Two layers: an immediate flag (`Busy`) rejecting overlap before the
/// swap has even scheduled its cooldown, and a timed `Cooldown` sized
/// to the swap. The cooldown deadline is checked lazily on the next
/// entry attempt rather than by a timer task, so the guard holds no
/// spawned state and a crash can never leave a stale lock.
///
/// The guard carries no domain data; cooldown sizing lives in
/// [`crate::config::Settings`].
#[derive(Debug, Default)]
pub struct LockoutGuard {
    state: Mutex<GuardState>,
}

impl LockoutGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to enter the toggle operation. Returns false while a
    /// swap is in flight or its cooldown has not yet expired.
    pub fn try_enter(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            GuardState::Idle => {
                *state = GuardState::Busy;
                true
            }
            GuardState::Busy => false,
            GuardState::Cooldown { until } => {
                if Instant::now() >= until {
                    *state = GuardState::Busy;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Moves from `Busy` to `Cooldown`, to expire `after` from now.
    /// Called once the swap is far enough along to be sized.
    pub fn schedule_exit(&self, after: Duration) {
        let mut state = self.state.lock();
        if matches!(*state, GuardState::Busy) {
            *state = GuardState::Cooldown {
                until: Instant::now() + after,
            };
        }
    }

    /// Force-resets to `Idle`. Used by abort paths so a failed swap
    /// never leaves the engine locked out.
    pub fn release(&self) {
        *self.state.lock() = GuardState::Idle;
    }

    /// Current state; an expired cooldown reads as `Idle`.
    pub fn state(&self) -> ToggleState {
        match *self.state.lock() {
            GuardState::Idle => ToggleState::Idle,
            GuardState::Busy => ToggleState::Busy,
            GuardState::Cooldown { until } => {
                if Instant::now() >= until {
                    ToggleState::Idle
                } else {
                    ToggleState::Cooldown
                }
            }
        }
    }
}
