// self
use crate::obs::{FlowKind, FlowOutcome};

/// Counter incremented once per exchange, refresh, or call outcome.
pub const FLOW_TOTAL: &str = "elvanto_api_flow_total";
/// Counter incremented whenever a call is re-issued after a token refresh.
pub const CALL_RETRY_TOTAL: &str = "elvanto_api_call_retry_total";
/// Histogram of access token lifetimes granted by refreshes, in seconds.
pub const TOKEN_LIFETIME_SECONDS: &str = "elvanto_api_token_lifetime_seconds";

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(FLOW_TOTAL, "flow" => kind.as_str(), "outcome" => outcome.as_str())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records that an expired-token call was retried with a rotated token.
pub fn record_call_retry() {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(CALL_RETRY_TOTAL).increment(1);
	}
}

/// Records the lifetime of a freshly rotated access token.
pub fn record_token_lifetime(expires_in: u64) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!(TOKEN_LIFETIME_SECONDS).record(expires_in as f64);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = expires_in;
	}
}
