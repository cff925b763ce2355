//! Authenticated connection and the refresh-and-retry call cycle.
//!
//! [`Connection::post`] sends one authenticated call. When the service answers with the
//! expired-token code and a refresh token is held, the connection rotates its tokens through
//! [`Connection::refresh_access_token`] and re-issues the same call exactly once. Per call:
//!
//! - `ok` → [`CallOutcome::Success`]
//! - expired + refresh token → refresh → one retry → whatever the retry returned
//! - expired + no refresh token → [`CallOutcome::TokenExpired`]
//! - any other status → [`CallOutcome::ServiceError`]
//!
//! Refresh rewrites the held credentials, so every calling method takes `&mut self`.

pub mod metrics;
pub mod response;

pub use metrics::*;
pub use response::*;

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	config::Endpoints,
	error::ConfigError,
	http::{ApiHttpClient, HttpRequest},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};
#[cfg(feature = "reqwest")] use crate::http::{DEFAULT_TIMEOUT, ReqwestHttpClient};

/// Number of refresh-and-retry rounds allowed per call.
pub const MAX_REFRESH_RETRIES: u8 = 1;

#[cfg(feature = "reqwest")]
/// Connection specialized for the crate's default reqwest transport.
pub type ReqwestConnection = Connection<ReqwestHttpClient>;

/// Authenticated handle for API calls on behalf of one identity.
///
/// The transport is acquired at construction, reused for every call, and released when the
/// connection is dropped.
pub struct Connection<C>
where
	C: ?Sized + ApiHttpClient,
{
	pub(crate) http_client: Arc<C>,
	pub(crate) endpoints: Endpoints,
	pub(crate) credentials: Credentials,
	pub(crate) expires_at: Option<OffsetDateTime>,
	pub(crate) retry_metrics: RetryMetrics,
}
impl<C> Connection<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a connection from already validated credentials.
	pub fn with_http_client(
		credentials: Credentials,
		endpoints: Endpoints,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			endpoints,
			credentials,
			expires_at: None,
			retry_metrics: Default::default(),
		}
	}

	/// Current credentials, including tokens rotated by a refresh. Persist these if the
	/// connection must survive a restart.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Endpoint set used by this connection.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Expiry of the access token obtained by the most recent refresh, if any.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_at
	}

	/// Refresh-and-retry counters for this connection.
	pub fn retry_metrics(&self) -> &RetryMetrics {
		&self.retry_metrics
	}

	/// Issues an authenticated call to `endpoint` (e.g. `people/getInfo`) with `args` as the
	/// JSON body.
	///
	/// Only local misconfiguration, transport failures, unparseable bodies, and a failed
	/// refresh are returned as errors. Service-level failures come back as a [`CallOutcome`].
	pub async fn post<A>(&mut self, endpoint: &str, args: &A) -> Result<CallOutcome>
	where
		A: ?Sized + Serialize,
	{
		const KIND: FlowKind = FlowKind::Call;

		let span = FlowSpan::new(KIND, "post");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.post_with_retry(endpoint, args)).await;

		match &result {
			Ok(CallOutcome::Success(_)) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Ok(CallOutcome::ServiceError(_)) =>
				obs::record_flow_outcome(KIND, FlowOutcome::Rejected),
			Ok(CallOutcome::TokenExpired) => obs::record_flow_outcome(KIND, FlowOutcome::Expired),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn post_with_retry<A>(&mut self, endpoint: &str, args: &A) -> Result<CallOutcome>
	where
		A: ?Sized + Serialize,
	{
		let url = self.endpoints.call_url(endpoint)?;
		let body = serde_json::to_vec(args).map_err(ConfigError::SerializeArguments)?;
		let mut retries_left = MAX_REFRESH_RETRIES;

		loop {
			let response = self.send(url.clone(), body.clone()).await?;

			if response.is_ok() {
				return Ok(CallOutcome::Success(response));
			}
			if !response.is_token_expired() {
				return Ok(CallOutcome::ServiceError(response));
			}
			if self.credentials.refresh_token().is_none() {
				self.retry_metrics.record_expired_without_refresh();
				obs::flow_event(FlowKind::Call, "access token expired without a refresh token");

				return Ok(CallOutcome::TokenExpired);
			}
			if retries_left == 0 {
				self.retry_metrics.record_expired_after_retry();
				obs::flow_event(FlowKind::Call, "access token still expired after refresh");

				return Ok(CallOutcome::ServiceError(response));
			}

			retries_left -= 1;

			self.refresh_access_token().await?;
			self.retry_metrics.record_retried_call();
			obs::record_call_retry();
		}
	}

	async fn send(&self, url: Url, body: Vec<u8>) -> Result<ApiResponse> {
		let request = HttpRequest::json(url, self.credentials.authorization_header(), body);
		let response = self.http_client.post(request).await?;

		ApiResponse::parse(&response)
	}
}
#[cfg(feature = "reqwest")]
impl Connection<ReqwestHttpClient> {
	/// Starts a builder for a reqwest-backed connection.
	pub fn builder() -> ConnectionBuilder {
		ConnectionBuilder::new()
	}
}
impl<C> Debug for Connection<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Connection")
			.field("endpoints", &self.endpoints)
			.field("credentials", &self.credentials)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Fallible constructor for [`Connection`] values from loosely supplied credential parts.
#[derive(Debug)]
pub struct ConnectionBuilder {
	/// Endpoint set; defaults to the production URLs.
	pub endpoints: Endpoints,
	/// API key for Basic auth.
	pub api_key: Option<String>,
	/// Access token for Bearer auth.
	pub access_token: Option<String>,
	/// Refresh token enabling transparent renewal.
	pub refresh_token: Option<String>,
	/// Request timeout for the transport created by [`ConnectionBuilder::build`]; falls back to
	/// [`DEFAULT_TIMEOUT`](crate::http::DEFAULT_TIMEOUT).
	pub timeout: Option<std::time::Duration>,
}
impl ConnectionBuilder {
	/// Creates an empty builder targeting the production endpoints.
	pub fn new() -> Self {
		Self {
			endpoints: Endpoints::default(),
			api_key: None,
			access_token: None,
			refresh_token: None,
			timeout: None,
		}
	}

	/// Overrides the endpoint set.
	pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Authenticates with an API key.
	pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = Some(api_key.into());

		self
	}

	/// Authenticates with an OAuth access token.
	pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
		self.access_token = Some(access_token.into());

		self
	}

	/// Enables transparent renewal with a refresh token.
	pub fn refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
		self.refresh_token = Some(refresh_token.into());

		self
	}

	/// Overrides the request timeout of the bundled transport.
	pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Validates the credentials and builds a connection on the provided transport.
	///
	/// The transport keeps its own timeout configuration, so a timeout set through
	/// [`ConnectionBuilder::timeout`] is rejected with [`ConfigError::TimeoutWithCustomTransport`].
	pub fn build_with_http_client<C>(
		self,
		http_client: impl Into<Arc<C>>,
	) -> Result<Connection<C>, ConfigError>
	where
		C: ?Sized + ApiHttpClient,
	{
		if self.timeout.is_some() {
			return Err(ConfigError::TimeoutWithCustomTransport);
		}

		self.connect(http_client)
	}

	/// Validates the credentials and builds a connection on a fresh reqwest transport using the
	/// configured timeout.
	#[cfg(feature = "reqwest")]
	pub fn build(mut self) -> Result<Connection<ReqwestHttpClient>, ConfigError> {
		let timeout = self.timeout.take().unwrap_or(DEFAULT_TIMEOUT);
		let http_client = ReqwestHttpClient::with_timeout(timeout)?;

		self.connect(http_client)
	}

	fn connect<C>(self, http_client: impl Into<Arc<C>>) -> Result<Connection<C>, ConfigError>
	where
		C: ?Sized + ApiHttpClient,
	{
		let credentials = Credentials::resolve(self.api_key, self.access_token, self.refresh_token)?;

		Ok(Connection::with_http_client(credentials, self.endpoints, http_client))
	}
}
impl Default for ConnectionBuilder {
	fn default() -> Self {
		Self::new()
	}
}
