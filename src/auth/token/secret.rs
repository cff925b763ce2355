//! Redacting wrapper for API keys, access tokens, and refresh tokens, plus the `Authorization`
//! header values built from them.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping API keys and tokens out of logs.
///
/// Serializes as the plain string so credentials can be persisted and reloaded.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the secret holds no characters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// `Authorization` value for an API key: HTTP Basic with the key as the user name and an
	/// empty password.
	pub fn basic_auth(&self) -> Self {
		Self(format!("Basic {}", STANDARD.encode(format!("{}:", self.0))))
	}

	/// `Authorization` value for an OAuth access token.
	pub fn bearer_auth(&self) -> Self {
		Self(format!("Bearer {}", self.0))
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenSecret(<redacted>)")
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn formatters_redact_header_values_too() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(<redacted>)");
		assert_eq!(format!("{}", secret.bearer_auth()), "<redacted>");
		assert!(!format!("{:?}", secret.basic_auth()).contains("super-secret"));
	}

	#[test]
	fn basic_auth_encodes_key_with_empty_password() {
		// base64("my-key:")
		assert_eq!(TokenSecret::from("my-key").basic_auth().expose(), "Basic bXkta2V5Og==");
	}

	#[test]
	fn bearer_auth_prefixes_token() {
		assert_eq!(TokenSecret::from("abc123").bearer_auth().expose(), "Bearer abc123");
	}

	#[test]
	fn secret_serializes_as_plain_string() {
		let secret = TokenSecret::from(String::from("persist-me"));
		let json = serde_json::to_string(&secret).expect("Secret should serialize.");

		assert_eq!(json, "\"persist-me\"");
		assert!(TokenSecret::new("").is_empty());
	}
}
