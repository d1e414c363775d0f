//! Per-session turn serialization.
//!
//! A kiosk guest can double-submit (tap + voice finishing together); two
//! turns for the same session interleaving their history read-modify-write
//! would lose updates. The gate hands out one owned guard per session key
//! so whole turns run back to back.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Default)]
pub struct SessionGate {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the session. The guard releases on
    /// drop; waiters proceed in arrival order.
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            locks
                .entry(session_id.to_owned())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Drop gate entries nobody currently holds.
    pub fn prune_idle(&self) {
        let mut locks = self.locks.lock();
        locks.retain(|_, lock| lock.try_lock().is_err());
    }

    pub fn tracked_sessions(&self) -> usize {
        self.locks.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sequential_reacquire_works() {
        let gate = SessionGate::new();
        drop(gate.acquire("s1").await);
        drop(gate.acquire("s1").await);
    }

    #[tokio::test]
    async fn different_sessions_do_not_block() {
        let gate = SessionGate::new();
        let g1 = gate.acquire("s1").await;
        let g2 = gate.acquire("s2").await;
        assert_eq!(gate.tracked_sessions(), 2);
        drop(g1);
        drop(g2);
    }

    #[tokio::test]
    async fn same_session_waits_for_release() {
        let gate = Arc::new(SessionGate::new());
        let guard = gate.acquire("s1").await;

        let gate2 = gate.clone();
        let waiter = tokio::spawn(async move {
            let _g = gate2.acquire("s1").await;
            7
        });

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        assert_eq!(waiter.await.unwrap(), 7);
    }

    #[tokio::test]
    async fn prune_removes_unheld_entries() {
        let gate = SessionGate::new();
        drop(gate.acquire("s1").await);
        let _held = gate.acquire("s2").await;
        gate.prune_idle();
        assert_eq!(gate.tracked_sessions(), 1);
    }
}
