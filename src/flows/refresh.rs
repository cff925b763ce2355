//! Refresh token rotation for OAuth connections.
//!
//! [`Connection::refresh_access_token`] posts `grant_type=refresh_token` with the held refresh
//! token. On success the connection swaps in the new access and refresh tokens and returns the
//! new lifetime. Any failure (no refresh token, transport error, OAuth error, malformed body)
//! is returned as an error and leaves the held credentials untouched.

// self
use crate::{
	_prelude::*,
	connection::Connection,
	error::ConfigError,
	flows::exchange,
	http::{ApiHttpClient, HttpRequest},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Connection<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Rotates the held tokens and returns the new `expires_in` in seconds.
	pub async fn refresh_access_token(&mut self) -> Result<u64> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);
		self.retry_metrics.record_refresh_attempt();

		let result = span
			.instrument(async {
				let refresh = self
					.credentials
					.refresh_token()
					.ok_or(ConfigError::MissingRefreshToken)?
					.clone();
				let request = HttpRequest::form(
					self.endpoints.token.clone(),
					[("grant_type", "refresh_token"), ("refresh_token", refresh.expose())],
				);
				let response = self.http_client.post(request).await?;
				let tokens = exchange::parse_token_response(response)?;

				self.credentials.rotate(&tokens);
				self.expires_at = Some(tokens.expires_at());
				obs::flow_event(KIND, "access token rotated");

				Ok::<_, Error>(tokens.expires_in)
			})
			.await;

		self.retry_metrics.record_refresh(result.is_ok());

		match &result {
			Ok(expires_in) => {
				obs::record_flow_outcome(KIND, FlowOutcome::Success);
				obs::record_token_lifetime(*expires_in);
			},
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
