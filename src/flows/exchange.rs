//! Authorization code exchange and token endpoint response handling.

// self
use crate::{
	_prelude::*,
	auth::TokenSet,
	flows::OAuthClient,
	http::{ApiHttpClient, HttpRequest, HttpResponse},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// OAuth error body returned by the token endpoint.
#[derive(Deserialize)]
struct TokenErrorBody {
	error: String,
	#[serde(default)]
	error_description: Option<String>,
}

impl<C> OAuthClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Trades the code returned on the authorization redirect for a [`TokenSet`].
	///
	/// `redirect_uri` must match the one used to build the authorization URL. Transport
	/// failures, OAuth errors, and unparseable bodies are returned as errors; nothing is
	/// retried.
	pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenSet> {
		const KIND: FlowKind = FlowKind::Exchange;

		let span = FlowSpan::new(KIND, "exchange_code");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let client_id = self.client_id.to_string();
				let request = HttpRequest::form(
					self.endpoints.token.clone(),
					[
						("grant_type", "authorization_code"),
						("client_id", client_id.as_str()),
						("client_secret", self.client_secret.as_str()),
						("code", code),
						("redirect_uri", redirect_uri),
					],
				);
				let response = self.http_client.post(request).await?;

				parse_token_response(response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}

/// Maps a token endpoint response onto a [`TokenSet`] or an error.
pub(crate) fn parse_token_response(response: HttpResponse) -> Result<TokenSet> {
	let status = response.status;

	if let Ok(body) = serde_json::from_slice::<TokenErrorBody>(&response.body) {
		let message = body.error_description.filter(|d| !d.is_empty()).unwrap_or(body.error);

		return Err(Error::TokenEndpoint { status, message });
	}
	if !response.is_success() {
		return Err(Error::TokenEndpoint { status, message: format!("HTTP status {status}") });
	}

	let de = &mut serde_json::Deserializer::from_slice(&response.body);
	let tokens: TokenSet = serde_path_to_error::deserialize(de)
		.map_err(|source| Error::ResponseParse { endpoint: "token", source, status })?;

	tokens.validate().map_err(Error::from)
}
