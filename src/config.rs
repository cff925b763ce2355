//! Endpoint configuration shared by authorization, token, and API calls.
//!
//! [`Endpoints`] replaces hard-coded service URLs with an injected value so tests (and
//! staging deployments) can point the client somewhere else.

/// Builder API for assembling endpoint sets.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Production authorization endpoint.
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://api.elvanto.com/OAuth";
/// Production token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://api.elvanto.com/OAuth/token";
/// Production API base.
pub const DEFAULT_API_URL: &str = "https://api.elvanto.com/v1/";
/// Suffix appended to every call endpoint.
pub const CALL_FORMAT: &str = "json";

/// Base URLs used by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
	/// Browser-facing authorization endpoint.
	pub authorization: Url,
	/// Token endpoint used for code exchanges and refreshes.
	pub token: Url,
	/// API base that call endpoints are appended to; always ends in `/`.
	pub api: Url,
}
impl Endpoints {
	/// Creates a new builder seeded with the production URLs.
	pub fn builder() -> EndpointsBuilder {
		EndpointsBuilder::new()
	}

	/// Builds the target URL for a call endpoint such as `people/getInfo`.
	///
	/// The endpoint is appended to the API base as path segments followed by the `.json`
	/// suffix; if the path already ends with the `.` separator only `json` is appended. A leading
	/// `/` is ignored. Query or fragment delimiters and `.`/`..` segments are rejected, so the
	/// result always stays under [`Endpoints::api`].
	pub fn call_url(&self, endpoint: &str) -> Result<Url, ConfigError> {
		let invalid = || ConfigError::InvalidCallEndpoint { endpoint: endpoint.to_owned() };
		let path = endpoint.trim_start_matches('/');

		if path.is_empty() || path.contains(['?', '#']) {
			return Err(invalid());
		}
		if path.split('/').any(|segment| segment == "." || segment == "..") {
			return Err(invalid());
		}

		let target = if path.ends_with('.') {
			format!("{path}{CALL_FORMAT}")
		} else {
			format!("{path}.{CALL_FORMAT}")
		};
		let mut url = self.api.clone();

		url.path_segments_mut().map_err(|_| invalid())?.pop_if_empty().extend(target.split('/'));

		if url.origin() != self.api.origin() || !url.path().starts_with(self.api.path()) {
			return Err(invalid());
		}

		Ok(url)
	}
}
impl Default for Endpoints {
	fn default() -> Self {
		Self {
			authorization: Url::parse(DEFAULT_AUTHORIZATION_URL)
				.expect("Default authorization URL is a valid constant."),
			token: Url::parse(DEFAULT_TOKEN_URL).expect("Default token URL is a valid constant."),
			api: Url::parse(DEFAULT_API_URL).expect("Default API URL is a valid constant."),
		}
	}
}
