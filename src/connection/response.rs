//! Parsed API responses and call outcomes.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, http::HttpResponse};

/// Error code the service uses for an expired access token.
pub const TOKEN_EXPIRED_CODE: i64 = 121;
/// Value of `status` on a successful call.
pub const STATUS_OK: &str = "ok";

/// JSON object returned by an API call, kept exactly as the service sent it.
///
/// `status` and `error` are read through accessors instead of being decoded into fixed fields,
/// so failures with an unexpected `error` shape still reach the caller as data and
/// [`ApiResponse::into_value`] reproduces the original body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse {
	fields: Map<String, Value>,
}
impl ApiResponse {
	/// Parses an API call body, whatever the HTTP status. Only a body that is not a JSON object
	/// fails.
	pub fn parse(response: &HttpResponse) -> Result<Self> {
		let de = &mut serde_json::Deserializer::from_slice(&response.body);

		serde_path_to_error::deserialize(de).map_err(|source| Error::ResponseParse {
			endpoint: "api",
			source,
			status: response.status,
		})
	}

	/// Value of `status`, if it is a string.
	pub fn status(&self) -> Option<&str> {
		self.fields.get("status").and_then(Value::as_str)
	}

	/// Returns `true` when `status` is `"ok"`.
	pub fn is_ok(&self) -> bool {
		self.status() == Some(STATUS_OK)
	}

	/// Raw `error` value, whatever its shape.
	pub fn error(&self) -> Option<&Value> {
		self.fields.get("error")
	}

	/// `error.code` as an integer, when it is a JSON integer or a numeric string.
	pub fn error_code(&self) -> Option<i64> {
		match self.error()?.get("code")? {
			Value::Number(code) => code.as_i64(),
			Value::String(code) => code.trim().parse().ok(),
			_ => None,
		}
	}

	/// `error.message`, when it is a string.
	pub fn error_message(&self) -> Option<&str> {
		self.error()?.get("message")?.as_str()
	}

	/// Returns `true` when the service reports an expired access token.
	pub fn is_token_expired(&self) -> bool {
		!self.is_ok() && self.error_code() == Some(TOKEN_EXPIRED_CODE)
	}

	/// Looks up a top-level field.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.fields.get(key)
	}

	/// Borrows every top-level field.
	pub fn fields(&self) -> &Map<String, Value> {
		&self.fields
	}

	/// Returns the original JSON object.
	pub fn into_value(self) -> Value {
		Value::Object(self.fields)
	}
}

/// Result of [`Connection::post`](crate::connection::Connection::post).
#[derive(Clone, Debug, PartialEq)]
pub enum CallOutcome {
	/// `status` was `"ok"`; the response is returned unchanged.
	Success(ApiResponse),
	/// The service answered with a failure, returned as-is for the caller to interpret. This
	/// includes a second expired-token response after the single refresh-and-retry.
	ServiceError(ApiResponse),
	/// The access token expired and no refresh token is available to renew it.
	TokenExpired,
}
impl CallOutcome {
	/// Returns `true` for [`CallOutcome::Success`].
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}

	/// Returns `true` for [`CallOutcome::TokenExpired`].
	pub fn is_token_expired(&self) -> bool {
		matches!(self, Self::TokenExpired)
	}

	/// Borrows the response, if the service produced one.
	pub fn response(&self) -> Option<&ApiResponse> {
		match self {
			Self::Success(response) | Self::ServiceError(response) => Some(response),
			Self::TokenExpired => None,
		}
	}

	/// Consumes the outcome, keeping only a successful response.
	pub fn into_success(self) -> Option<ApiResponse> {
		match self {
			Self::Success(response) => Some(response),
			_ => None,
		}
	}
}
