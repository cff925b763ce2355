//! Client-level error types shared across flows, connections, and transports.
//!
//! Only local misconfiguration and transport-level failures surface as [`Error`]. A response
//! whose `status` is not `"ok"` is data, not an error; see
//! [`CallOutcome`](crate::connection::CallOutcome).

// self
use crate::{_prelude::*, config::EndpointsError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem, including invalid connection credentials.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Response body could not be parsed into the expected JSON shape.
	#[error("{endpoint} endpoint returned a malformed response.")]
	ResponseParse {
		/// Which endpoint produced the body (`token` or `api`).
		endpoint: &'static str,
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Token endpoint rejected the request (e.g., bad code or revoked refresh token).
	#[error("Token endpoint rejected the request: {message}.")]
	TokenEndpoint {
		/// HTTP status code of the response.
		status: u16,
		/// Provider-supplied reason string.
		message: String,
	},
	/// The `state` returned from the authorization redirect does not match the one sent.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Configuration and validation failures raised before any request leaves the process.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Neither an API key nor an access token was supplied.
	#[error("Connection requires either an API key or an access token.")]
	MissingCredentials,
	/// Both an API key and an access token were supplied.
	#[error("Connection accepts an API key or an access token, not both.")]
	AmbiguousCredentials,
	/// A refresh token was supplied without an access token.
	#[error("A refresh token requires an access token.")]
	RefreshWithoutAccessToken,
	/// A credential value was empty.
	#[error("The {credential} must not be empty.")]
	EmptyCredential {
		/// Which credential was empty.
		credential: &'static str,
	},
	/// The connection holds no refresh token.
	#[error("No refresh token is available for this connection.")]
	MissingRefreshToken,
	/// Endpoint configuration failed validation.
	#[error(transparent)]
	Endpoints(#[from] EndpointsError),
	/// Call endpoint path cannot be turned into a URL.
	#[error("Call endpoint `{endpoint}` is invalid.")]
	InvalidCallEndpoint {
		/// The offending endpoint path.
		endpoint: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A builder timeout was combined with a caller-supplied transport.
	#[error("A request timeout cannot be applied to a caller-supplied transport.")]
	TimeoutWithCustomTransport,
	/// Call arguments could not be serialized to JSON.
	#[error("Call arguments could not be serialized.")]
	SerializeArguments(#[source] serde_json::Error),
	/// Token endpoint returned a zero `expires_in`.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete within the configured timeout.
	#[error("Request timed out while calling the service.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
