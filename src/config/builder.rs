// self
use crate::{_prelude::*, config::Endpoints};

/// Errors raised while constructing or validating endpoint sets.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum EndpointsError {
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoint cannot serve as a base URL (e.g., `mailto:`).
	#[error("The {endpoint} endpoint is not a usable base URL: {url}.")]
	InvalidUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Builder for [`Endpoints`] values.
#[derive(Debug)]
pub struct EndpointsBuilder {
	/// Authorization endpoint override.
	pub authorization: Option<Url>,
	/// Token endpoint override.
	pub token: Option<Url>,
	/// API base override.
	pub api: Option<Url>,
}
impl EndpointsBuilder {
	/// Creates a builder that falls back to the production URLs.
	pub fn new() -> Self {
		Self { authorization: None, token: None, api: None }
	}

	/// Sets the authorization endpoint.
	pub fn authorization(mut self, url: Url) -> Self {
		self.authorization = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token(mut self, url: Url) -> Self {
		self.token = Some(url);

		self
	}

	/// Sets the API base.
	pub fn api(mut self, url: Url) -> Self {
		self.api = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting endpoints.
	pub fn build(self) -> Result<Endpoints, EndpointsError> {
		let defaults = Endpoints::default();
		let mut api = self.api.unwrap_or(defaults.api);

		if !api.path().ends_with('/') {
			let path = format!("{}/", api.path());

			api.set_path(&path);
		}

		let endpoints = Endpoints {
			authorization: self.authorization.unwrap_or(defaults.authorization),
			token: self.token.unwrap_or(defaults.token),
			api,
		};

		endpoints.validate()?;

		Ok(endpoints)
	}
}
impl Default for EndpointsBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl Endpoints {
	/// Validates invariants for the endpoint set.
	fn validate(&self) -> Result<(), EndpointsError> {
		validate_endpoint("authorization", &self.authorization)?;
		validate_endpoint("token", &self.token)?;
		validate_endpoint("api", &self.api)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), EndpointsError> {
	if url.cannot_be_a_base() {
		return Err(EndpointsError::InvalidUrl { endpoint: name, url: url.to_string() });
	}

	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(EndpointsError::InsecureEndpoint { endpoint: name, url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
		Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
