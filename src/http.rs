//! Transport primitives for token endpoint and API calls.
//!
//! Every request the client sends is a POST with a prepared body, so the transport seam is a
//! single method: [`ApiHttpClient::post`]. The bundled [`ReqwestHttpClient`] covers production
//! use; tests and custom stacks implement the trait directly.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, auth::TokenSecret, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Default timeout applied by [`ReqwestHttpClient::new`].
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Content type of token endpoint requests.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Content type of API call requests.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Boxed future returned by [`ApiHttpClient::post`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to POST a prepared request.
///
/// Implementations must not follow redirects and must hand back the body of non-2xx responses
/// untouched; the client decides what a status means.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves once the full response body has been read.
	fn post(&self, request: HttpRequest) -> HttpFuture<'_>;
}

/// POST request prepared by the client.
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// Target URL.
	pub url: Url,
	/// Value of the `Content-Type` header.
	pub content_type: &'static str,
	/// Value of the `Authorization` header, if any.
	pub authorization: Option<TokenSecret>,
	/// Encoded request body.
	pub body: Vec<u8>,
}
impl HttpRequest {
	/// Builds a form-encoded request from key/value pairs.
	pub fn form<'a, I>(url: Url, pairs: I) -> Self
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let body = url::form_urlencoded::Serializer::new(String::new())
			.extend_pairs(pairs)
			.finish()
			.into_bytes();

		Self { url, content_type: FORM_CONTENT_TYPE, authorization: None, body }
	}

	/// Builds a JSON request from an already encoded body.
	pub fn json(url: Url, authorization: TokenSecret, body: Vec<u8>) -> Self {
		Self { url, content_type: JSON_CONTENT_TYPE, authorization: Some(authorization), body }
	}
}

/// Response returned by an [`ApiHttpClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Returns `true` for 2xx status codes.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Clients built through [`ReqwestHttpClient::new`] or [`ReqwestHttpClient::with_timeout`] do
/// not follow redirects. Configure any custom [`ReqwestClient`] passed to
/// [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with [`DEFAULT_TIMEOUT`].
	pub fn new() -> Result<Self, ConfigError> {
		Self::with_timeout(DEFAULT_TIMEOUT)
	}

	/// Builds a client whose requests fail after `timeout`.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.redirect(reqwest::redirect::Policy::none())
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn post(&self, request: HttpRequest) -> HttpFuture<'_> {
		use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

		Box::pin(async move {
			let HttpRequest { url, content_type, authorization, body } = request;
			let mut builder = self.0.post(url).header(CONTENT_TYPE, content_type).body(body);

			if let Some(value) = authorization {
				builder = builder.header(AUTHORIZATION, value.expose());
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok::<_, TransportError>(HttpResponse { status, body })
		})
	}
}
