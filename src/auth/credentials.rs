//! Credential variants accepted by a connection.

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, TokenSet},
	error::ConfigError,
};

/// Authentication material held by a [`Connection`](crate::connection::Connection).
///
/// Exactly one variant is active per connection. Deserializes from a `kind`-tagged object so
/// credentials can live in the caller's own configuration files:
///
/// ```json
/// { "kind": "oauth", "access_token": "...", "refresh_token": "..." }
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Credentials {
	/// Static secret sent via HTTP Basic auth with an empty password.
	ApiKey {
		/// The API key.
		api_key: TokenSecret,
	},
	/// Bearer token, optionally refreshable.
	#[serde(rename = "oauth")]
	OAuth {
		/// Current access token.
		access_token: TokenSecret,
		/// Refresh token, when the caller wants transparent renewal.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		refresh_token: Option<TokenSecret>,
	},
}
impl Credentials {
	/// API-key credentials.
	pub fn api_key(api_key: impl Into<String>) -> Self {
		Self::ApiKey { api_key: TokenSecret::new(api_key) }
	}

	/// OAuth credentials with an optional refresh token.
	pub fn oauth(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
		Self::OAuth {
			access_token: TokenSecret::new(access_token),
			refresh_token: refresh_token.map(TokenSecret::new),
		}
	}

	/// Resolves loosely supplied credential parts into exactly one variant.
	///
	/// Fails when neither an API key nor an access token is present, when both are, when a
	/// refresh token arrives without an access token, or when any supplied value is empty.
	pub fn resolve(
		api_key: Option<String>,
		access_token: Option<String>,
		refresh_token: Option<String>,
	) -> Result<Self, ConfigError> {
		let credentials = match (api_key, access_token, refresh_token) {
			(Some(_), Some(_), _) => return Err(ConfigError::AmbiguousCredentials),
			(Some(_), None, Some(_)) | (None, None, Some(_)) =>
				return Err(ConfigError::RefreshWithoutAccessToken),
			(Some(key), None, None) => Self::api_key(key),
			(None, Some(access), refresh) => Self::oauth(access, refresh),
			(None, None, None) => return Err(ConfigError::MissingCredentials),
		};

		credentials.validate()?;

		Ok(credentials)
	}

	/// Checks that no held secret is empty.
	pub fn validate(&self) -> Result<(), ConfigError> {
		match self {
			Self::ApiKey { api_key } if api_key.is_empty() =>
				Err(ConfigError::EmptyCredential { credential: "API key" }),
			Self::OAuth { access_token, .. } if access_token.is_empty() =>
				Err(ConfigError::EmptyCredential { credential: "access token" }),
			Self::OAuth { refresh_token: Some(refresh), .. } if refresh.is_empty() =>
				Err(ConfigError::EmptyCredential { credential: "refresh token" }),
			_ => Ok(()),
		}
	}

	/// Returns `true` for the API-key variant.
	pub fn is_api_key(&self) -> bool {
		matches!(self, Self::ApiKey { .. })
	}

	/// Current access token, if in OAuth mode.
	pub fn access_token(&self) -> Option<&TokenSecret> {
		match self {
			Self::OAuth { access_token, .. } => Some(access_token),
			Self::ApiKey { .. } => None,
		}
	}

	/// Current refresh token, if one is held.
	pub fn refresh_token(&self) -> Option<&TokenSecret> {
		match self {
			Self::OAuth { refresh_token, .. } => refresh_token.as_ref(),
			Self::ApiKey { .. } => None,
		}
	}

	/// Value of the `Authorization` header for API calls.
	pub fn authorization_header(&self) -> TokenSecret {
		match self {
			Self::ApiKey { api_key } => api_key.basic_auth(),
			Self::OAuth { access_token, .. } => access_token.bearer_auth(),
		}
	}

	/// Replaces the held tokens with a freshly issued set.
	pub(crate) fn rotate(&mut self, tokens: &TokenSet) {
		*self = Self::OAuth {
			access_token: tokens.access_token.clone(),
			refresh_token: Some(tokens.refresh_token.clone()),
		};
	}
}
impl From<&TokenSet> for Credentials {
	fn from(tokens: &TokenSet) -> Self {
		Self::OAuth {
			access_token: tokens.access_token.clone(),
			refresh_token: Some(tokens.refresh_token.clone()),
		}
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ApiKey { .. } => f.debug_struct("ApiKey").field("api_key", &"<redacted>").finish(),
			Self::OAuth { refresh_token, .. } => f
				.debug_struct("OAuth")
				.field("access_token", &"<redacted>")
				.field("refresh_token_set", &refresh_token.is_some())
				.finish(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn resolve_requires_exactly_one_credential_kind() {
		assert!(matches!(
			Credentials::resolve(None, None, None),
			Err(ConfigError::MissingCredentials)
		));
		assert!(matches!(
			Credentials::resolve(Some("key".into()), Some("access".into()), None),
			Err(ConfigError::AmbiguousCredentials)
		));
		assert!(matches!(
			Credentials::resolve(None, None, Some("refresh".into())),
			Err(ConfigError::RefreshWithoutAccessToken)
		));
		assert!(matches!(
			Credentials::resolve(Some(String::new()), None, None),
			Err(ConfigError::EmptyCredential { credential: "API key" })
		));

		let oauth = Credentials::resolve(None, Some("access".into()), Some("refresh".into()))
			.expect("OAuth credentials should resolve.");

		assert_eq!(oauth.access_token().map(TokenSecret::expose), Some("access"));
		assert_eq!(oauth.refresh_token().map(TokenSecret::expose), Some("refresh"));
	}

	#[test]
	fn api_key_uses_basic_auth_with_empty_password() {
		let credentials = Credentials::api_key("my-key");

		// base64("my-key:")
		assert_eq!(credentials.authorization_header().expose(), "Basic bXkta2V5Og==");
		assert!(credentials.refresh_token().is_none());
	}

	#[test]
	fn oauth_uses_bearer_header() {
		let credentials = Credentials::oauth("abc123", None);

		assert_eq!(credentials.authorization_header().expose(), "Bearer abc123");
	}

	#[test]
	fn deserializes_kind_tagged_config() {
		let credentials: Credentials = serde_json::from_str(
			r#"{"kind":"oauth","access_token":"a","refresh_token":"r"}"#,
		)
		.expect("OAuth config should deserialize.");

		assert_eq!(credentials, Credentials::oauth("a", Some("r".into())));

		let credentials: Credentials = serde_json::from_str(r#"{"kind":"api_key","api_key":"k"}"#)
			.expect("API key config should deserialize.");

		assert!(credentials.is_api_key());
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let rendered = format!("{:?}", Credentials::oauth("visible?", Some("hidden?".into())));

		assert!(!rendered.contains("visible?"));
		assert!(!rendered.contains("hidden?"));
	}
}
