//! Debounced scheduling for continuous-input triggers.

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Default quiet period before a scheduled callback fires.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Delays a callback until a quiet period elapses after the last trigger.
///
/// Rescheduling before the timer elapses discards the earlier callback
/// entirely; for a burst of N calls within the quiet period exactly
/// one callback fires, the last one scheduled. Dropping the debouncer
/// cancels any pending callback.
#[derive(Debug)]
pub struct Debouncer {
	quiet_period: Duration,
	pending: Option<CancellationToken>,
}

impl Debouncer {
	/// Creates a debouncer with the given quiet period.
	pub fn new(quiet_period: Duration) -> Self {
		Self {
			quiet_period,
			pending: None,
		}
	}

	/// Replaces any pending callback and restarts the quiet-period timer.
	pub fn schedule(&mut self, callback: impl FnOnce() + Send + 'static) {
		self.cancel();
		let cancel = CancellationToken::new();
		self.pending = Some(cancel.clone());
		let quiet_period = self.quiet_period;
		tokio::spawn(async move {
			tokio::select! {
				_ = cancel.cancelled() => {}
				_ = sleep(quiet_period) => callback(),
			}
		});
	}

	/// Discards any pending callback without firing it.
	pub fn cancel(&mut self) {
		if let Some(pending) = self.pending.take() {
			pending.cancel();
		}
	}
}

impl Drop for Debouncer {
	fn drop(&mut self) {
		self.cancel();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	fn counter_callback(fired: &Arc<AtomicUsize>) -> impl FnOnce() + Send + 'static {
		let fired = Arc::clone(fired);
		move || {
			fired.fetch_add(1, Ordering::SeqCst);
		}
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn burst_fires_exactly_once() {
		let fired = Arc::new(AtomicUsize::new(0));
		let mut debouncer = Debouncer::new(DEFAULT_QUIET_PERIOD);

		for _ in 0..3 {
			debouncer.schedule(counter_callback(&fired));
			tokio::task::yield_now().await;
		}

		tokio::time::advance(DEFAULT_QUIET_PERIOD).await;
		tokio::task::yield_now().await;

		assert_eq!(fired.load(Ordering::SeqCst), 1);
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn reschedule_restarts_the_timer() {
		let fired = Arc::new(AtomicUsize::new(0));
		let mut debouncer = Debouncer::new(DEFAULT_QUIET_PERIOD);

		debouncer.schedule(counter_callback(&fired));
		tokio::task::yield_now().await;
		tokio::time::advance(Duration::from_millis(200)).await;

		debouncer.schedule(counter_callback(&fired));
		tokio::task::yield_now().await;
		tokio::time::advance(Duration::from_millis(200)).await;
		tokio::task::yield_now().await;

		// 400 ms elapsed in total, but only 200 ms since the reschedule.
		assert_eq!(fired.load(Ordering::SeqCst), 0);

		tokio::time::advance(Duration::from_millis(100)).await;
		tokio::task::yield_now().await;
		assert_eq!(fired.load(Ordering::SeqCst), 1);
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn cancel_discards_pending_callback() {
		let fired = Arc::new(AtomicUsize::new(0));
		let mut debouncer = Debouncer::new(DEFAULT_QUIET_PERIOD);

		debouncer.schedule(counter_callback(&fired));
		tokio::task::yield_now().await;
		debouncer.cancel();

		tokio::time::advance(DEFAULT_QUIET_PERIOD * 2).await;
		tokio::task::yield_now().await;

		assert_eq!(fired.load(Ordering::SeqCst), 0);
	}
}
