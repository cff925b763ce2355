//! Token endpoint payloads returned by code exchanges and refreshes.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Tokens issued by the token endpoint.
///
/// `issued_at` is captured locally when the response is parsed; it is not part of the wire
/// payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
	/// Bearer token attached to API calls.
	pub access_token: TokenSecret,
	/// Lifetime of the access token in seconds.
	pub expires_in: u64,
	/// Token used to obtain the next access token.
	pub refresh_token: TokenSecret,
	/// Instant the response was parsed.
	#[serde(skip, default = "OffsetDateTime::now_utc")]
	pub issued_at: OffsetDateTime,
}
impl TokenSet {
	/// Returns the lifetime as a [`Duration`].
	pub fn lifetime(&self) -> Duration {
		Duration::seconds(i64::try_from(self.expires_in).unwrap_or(i64::MAX))
	}

	/// Instant the access token stops being accepted.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.issued_at.saturating_add(self.lifetime())
	}

	/// Returns `true` if the access token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at()
	}

	pub(crate) fn validate(self) -> Result<Self, ConfigError> {
		if self.expires_in == 0 {
			return Err(ConfigError::NonPositiveExpiresIn);
		}

		Ok(self)
	}
}
impl Debug for TokenSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenSet")
			.field("access_token", &"<redacted>")
			.field("expires_in", &self.expires_in)
			.field("refresh_token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.finish()
	}
}
