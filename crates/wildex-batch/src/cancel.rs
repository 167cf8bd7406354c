//! Cooperative cancellation of download runs

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// Shared cancel request for the current run.
///
/// Each run starts from a fresh token, so a cancel aimed at an earlier run
/// never leaks into the next one. Clones share the same switch.
#[derive(Debug, Clone, Default)]
pub struct CancelSwitch {
    current: Arc<Mutex<CancellationToken>>,
}

impl CancelSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CancellationToken> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reset the switch and hand out the token for a new run
    pub fn begin_run(&self) -> CancellationToken {
        let mut current = self.lock();
        *current = CancellationToken::new();
        current.clone()
    }

    /// Request cancellation of the run in progress
    pub fn cancel(&self) {
        self.lock().cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_reaches_run_token() {
        let switch = CancelSwitch::new();
        let token = switch.begin_run();
        let remote = switch.clone();

        remote.cancel();

        assert!(token.is_cancelled());
        assert!(switch.is_cancelled());
    }

    #[test]
    fn test_begin_run_resets() {
        let switch = CancelSwitch::new();
        let first = switch.begin_run();
        switch.cancel();

        let second = switch.begin_run();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(!switch.is_cancelled());
    }
}
