//! Time source port.
//!
//! Transition waits never call the runtime timer directly; they go
//! through [`Clock`] so tests (and any host that drives time itself) can
//! resolve them instantly.

use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::time::Duration;

/// Injectable time source.
pub trait Clock: Send + Sync {
	/// Resolves after the given duration has elapsed.
	fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Clock backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
	fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
		Box::pin(tokio::time::sleep(duration))
	}
}

/// Clock that resolves immediately, recording what it was asked to wait.
///
/// The recorded durations let a test assert that a transition *would*
/// have waited the configured time without actually waiting it.
#[derive(Debug, Default)]
pub struct InstantClock {
	slept: Mutex<Vec<Duration>>,
}

impl InstantClock {
	/// Creates an instant clock.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns every duration passed to [`Clock::sleep`] so far.
	pub fn slept(&self) -> Vec<Duration> {
		self.slept.lock().clone()
	}
}

impl Clock for InstantClock {
	fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
		self.slept.lock().push(duration);
		Box::pin(std::future::ready(()))
	}
}
