//! Graceful shutdown controller with in-flight request tracking.
//!
//! Health state transitions are lock-free (`ArcSwap`); in-flight requests
//! are counted through RAII guards so the count stays accurate even when a
//! handler panics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::sync::watch;

/// Server health state.
///
/// State machine: Starting -> Ready -> Draining -> Stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    /// Initializing; not yet accepting requests.
    Starting,
    /// Fully operational.
    Ready,
    /// Draining in-flight requests; no new requests accepted.
    Draining,
    /// Fully stopped.
    Stopped,
}

impl HealthState {
    /// Lowercase name for health endpoint bodies.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Ready => "ready",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        }
    }
}

/// Coordinates graceful shutdown across the server.
///
/// Health probes read `health_state()`; `trigger_shutdown()` moves to
/// Draining and signals every subscribed receiver; `wait_for_drain()`
/// blocks until in-flight requests finish or the timeout expires.
#[derive(Debug)]
pub struct ShutdownController {
    shutdown_signal: watch::Sender<bool>,
    in_flight: Arc<AtomicU64>,
    health_state: ArcSwap<HealthState>,
}

impl ShutdownController {
    /// Creates a controller in the `Starting` state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            shutdown_signal: tx,
            in_flight: Arc::new(AtomicU64::new(0)),
            health_state: ArcSwap::from_pointee(HealthState::Starting),
        }
    }

    /// Transitions to `Ready`.
    pub fn set_ready(&self) {
        self.health_state.store(Arc::new(HealthState::Ready));
    }

    /// Returns a receiver notified when shutdown is triggered.
    #[must_use]
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_signal.subscribe()
    }

    /// Transitions to `Draining` and signals all shutdown receivers.
    pub fn trigger_shutdown(&self) {
        self.health_state.store(Arc::new(HealthState::Draining));
        // Receivers may already have been dropped; that is fine.
        let _ = self.shutdown_signal.send(true);
    }

    /// Current health state.
    #[must_use]
    pub fn health_state(&self) -> HealthState {
        **self.health_state.load()
    }

    /// RAII guard tracking one in-flight request.
    #[must_use]
    pub fn in_flight_guard(&self) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Waits until all in-flight requests complete, up to `timeout`.
    ///
    /// Returns `true` (and transitions to `Stopped`) on a clean drain,
    /// `false` when the timeout expired with requests still in flight.
    pub async fn wait_for_drain(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.in_flight.load(Ordering::Relaxed) == 0 {
                self.health_state.store(Arc::new(HealthState::Stopped));
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the in-flight counter on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    in_flight: Arc<AtomicU64>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_starting_state() {
        let controller = ShutdownController::new();
        assert_eq!(controller.health_state(), HealthState::Starting);
    }

    #[test]
    fn set_ready_transitions_state() {
        let controller = ShutdownController::new();
        controller.set_ready();
        assert_eq!(controller.health_state(), HealthState::Ready);
    }

    #[test]
    fn trigger_shutdown_moves_to_draining() {
        let controller = ShutdownController::new();
        controller.set_ready();
        controller.trigger_shutdown();
        assert_eq!(controller.health_state(), HealthState::Draining);
    }

    #[tokio::test]
    async fn shutdown_receiver_is_notified() {
        let controller = ShutdownController::new();
        let mut receiver = controller.shutdown_receiver();
        assert!(!*receiver.borrow());

        controller.trigger_shutdown();
        receiver.changed().await.expect("signal");
        assert!(*receiver.borrow());
    }

    #[test]
    fn in_flight_guards_count_and_release() {
        let controller = ShutdownController::new();
        assert_eq!(controller.in_flight_count(), 0);

        let guard_a = controller.in_flight_guard();
        let guard_b = controller.in_flight_guard();
        assert_eq!(controller.in_flight_count(), 2);

        drop(guard_a);
        assert_eq!(controller.in_flight_count(), 1);
        drop(guard_b);
        assert_eq!(controller.in_flight_count(), 0);
    }

    #[tokio::test]
    async fn wait_for_drain_succeeds_when_idle() {
        let controller = ShutdownController::new();
        controller.trigger_shutdown();

        assert!(controller.wait_for_drain(Duration::from_millis(100)).await);
        assert_eq!(controller.health_state(), HealthState::Stopped);
    }

    #[tokio::test]
    async fn wait_for_drain_times_out_with_requests_in_flight() {
        let controller = ShutdownController::new();
        let _guard = controller.in_flight_guard();
        controller.trigger_shutdown();

        assert!(!controller.wait_for_drain(Duration::from_millis(50)).await);
        assert_eq!(controller.health_state(), HealthState::Draining);
    }

    #[test]
    fn health_state_names() {
        assert_eq!(HealthState::Starting.as_str(), "starting");
        assert_eq!(HealthState::Ready.as_str(), "ready");
        assert_eq!(HealthState::Draining.as_str(), "draining");
        assert_eq!(HealthState::Stopped.as_str(), "stopped");
    }
}
