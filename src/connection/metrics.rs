//! Per-connection counters for the refresh-and-retry cycle.

// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of a connection's [`RetryMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetryStats {
	/// Refresh grants sent (or attempted without a refresh token).
	pub refresh_attempts: u64,
	/// Refreshes that rotated the held tokens.
	pub refresh_successes: u64,
	/// Refreshes that failed and were returned as errors.
	pub refresh_failures: u64,
	/// Calls re-issued after a successful refresh.
	pub retried_calls: u64,
	/// Calls that ended in [`CallOutcome::TokenExpired`](crate::connection::CallOutcome::TokenExpired).
	pub expired_without_refresh: u64,
	/// Calls whose single retry still reported an expired token.
	pub expired_after_retry: u64,
}

/// Counters describing how a connection's refresh-and-retry cycle behaved.
#[derive(Debug, Default)]
pub struct RetryMetrics {
	refresh_attempts: AtomicU64,
	refresh_successes: AtomicU64,
	refresh_failures: AtomicU64,
	retried_calls: AtomicU64,
	expired_without_refresh: AtomicU64,
	expired_after_retry: AtomicU64,
}
impl RetryMetrics {
	/// Reads every counter at once.
	pub fn snapshot(&self) -> RetryStats {
		let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);

		RetryStats {
			refresh_attempts: load(&self.refresh_attempts),
			refresh_successes: load(&self.refresh_successes),
			refresh_failures: load(&self.refresh_failures),
			retried_calls: load(&self.retried_calls),
			expired_without_refresh: load(&self.expired_without_refresh),
			expired_after_retry: load(&self.expired_after_retry),
		}
	}

	pub(crate) fn record_refresh_attempt(&self) {
		self.refresh_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh(&self, rotated: bool) {
		let counter = if rotated { &self.refresh_successes } else { &self.refresh_failures };

		counter.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_retried_call(&self) {
		self.retried_calls.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_expired_without_refresh(&self) {
		self.expired_without_refresh.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_expired_after_retry(&self) {
		self.expired_after_retry.fetch_add(1, Ordering::Relaxed);
	}
}
