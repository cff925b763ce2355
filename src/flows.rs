//! Authorization URL construction and token endpoint flows.

pub mod authorize;
pub mod exchange;
pub mod refresh;

pub use authorize::*;

// self
use crate::{
	_prelude::*,
	auth::{Scope, TokenSet},
	config::Endpoints,
	connection::Connection,
	http::ApiHttpClient,
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// OAuth client specialized for the crate's default reqwest transport.
pub type ReqwestOAuthClient = OAuthClient<ReqwestHttpClient>;

/// Registered integration credentials plus the transport used for token endpoint calls.
///
/// The client owns everything needed to send a user to the authorization page, trade the
/// returned code for tokens, and open a [`Connection`] that reuses the same transport.
pub struct OAuthClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Endpoint set used for authorization, token, and API URLs.
	pub endpoints: Endpoints,
	/// Integration client identifier.
	pub client_id: u64,
	client_secret: String,
}
impl<C> OAuthClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		endpoints: Endpoints,
		client_id: u64,
		client_secret: impl Into<String>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			endpoints,
			client_id,
			client_secret: client_secret.into(),
		}
	}

	/// Builds the authorization URL for this integration.
	pub fn authorization_url(
		&self,
		redirect_uri: &str,
		scope: impl Into<Scope>,
		flow: AuthorizationFlow,
	) -> Url {
		authorization_url(&self.endpoints, self.client_id, redirect_uri, scope, flow)
	}

	/// Opens a refreshable OAuth connection from freshly exchanged tokens.
	pub fn connect(&self, tokens: &TokenSet) -> Connection<C> {
		let mut connection: Connection<C> = Connection::with_http_client(
			tokens.into(),
			self.endpoints.clone(),
			Arc::clone(&self.http_client),
		);

		connection.expires_at = Some(tokens.expires_at());

		connection
	}
}
#[cfg(feature = "reqwest")]
impl OAuthClient<ReqwestHttpClient> {
	/// Creates a client backed by its own reqwest transport with the default timeout.
	pub fn new(
		endpoints: Endpoints,
		client_id: u64,
		client_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(endpoints, client_id, client_secret, ReqwestHttpClient::new()?))
	}
}
impl<C> Clone for OAuthClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			endpoints: self.endpoints.clone(),
			client_id: self.client_id,
			client_secret: self.client_secret.clone(),
		}
	}
}
impl<C> Debug for OAuthClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthClient")
			.field("endpoints", &self.endpoints)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.finish()
	}
}
