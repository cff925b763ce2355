//! Authorization URL construction and anti-forgery state helpers.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, auth::Scope, config::Endpoints};

const STATE_LEN: usize = 32;

/// Which interactive login flow the integration uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorizationFlow {
	/// Server-side web app; the code is returned to the redirect URI.
	WebServer {
		/// Opaque anti-forgery value echoed back on the redirect.
		state: Option<String>,
	},
	/// Non-web app (desktop, mobile, browser-only); the token is returned in the fragment.
	/// This flow never carries `state`.
	UserAgent,
}
impl AuthorizationFlow {
	/// Web-app flow with an optional `state`.
	pub fn web_server(state: Option<String>) -> Self {
		Self::WebServer { state }
	}

	/// Maps the loose `(is_web_app, state)` pair onto a flow; `state` is dropped for non-web apps.
	pub fn from_parts(is_web_app: bool, state: Option<String>) -> Self {
		if is_web_app { Self::WebServer { state } } else { Self::UserAgent }
	}

	/// Returns the `type` query value.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::WebServer { .. } => "web_server",
			Self::UserAgent => "user_agent",
		}
	}
}

/// Builds the URL users visit to grant the integration access.
///
/// The scope list is comma-joined in order. `state` is appended only for
/// [`AuthorizationFlow::WebServer`] and only when present. No request is made.
pub fn authorization_url(
	endpoints: &Endpoints,
	client_id: u64,
	redirect_uri: &str,
	scope: impl Into<Scope>,
	flow: AuthorizationFlow,
) -> Url {
	let scope = scope.into();
	let mut url = endpoints.authorization.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("type", flow.as_str());
	pairs.append_pair("client_id", &client_id.to_string());
	pairs.append_pair("redirect_uri", redirect_uri);
	pairs.append_pair("scope", &scope.joined());

	if let AuthorizationFlow::WebServer { state: Some(state) } = &flow {
		pairs.append_pair("state", state);
	}

	drop(pairs);

	url
}

/// Generates a random anti-forgery `state` value.
pub fn generate_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

/// Validates the `state` returned on the redirect against the one that was sent.
pub fn validate_state(expected: &str, returned: &str) -> Result<()> {
	if expected == returned { Ok(()) } else { Err(Error::StateMismatch) }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn query(url: &Url) -> Vec<(String, String)> {
		url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
	}

	fn query_value(url: &Url, key: &str) -> Option<String> {
		url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
	}

	#[test]
	fn web_server_url_carries_expected_parameters() {
		let url = authorization_url(
			&Endpoints::default(),
			1234,
			"https://app.example.com/callback",
			["ManagePeople", "ManageGroups"],
			AuthorizationFlow::web_server(None),
		);

		assert_eq!(url.path(), "/OAuth");
		assert_eq!(
			query(&url),
			[
				("type".to_owned(), "web_server".to_owned()),
				("client_id".to_owned(), "1234".to_owned()),
				("redirect_uri".to_owned(), "https://app.example.com/callback".to_owned()),
				("scope".to_owned(), "ManagePeople,ManageGroups".to_owned()),
			]
		);
	}

	#[test]
	fn state_is_present_only_when_supplied() {
		let endpoints = Endpoints::default();
		let without = authorization_url(
			&endpoints,
			1,
			"https://app.example.com/cb",
			"ManagePeople",
			AuthorizationFlow::web_server(None),
		);
		let with = authorization_url(
			&endpoints,
			1,
			"https://app.example.com/cb",
			"ManagePeople",
			AuthorizationFlow::web_server(Some("xyz".into())),
		);

		assert!(query_value(&without, "state").is_none());
		assert_eq!(query_value(&with, "state").as_deref(), Some("xyz"));
	}

	#[test]
	fn user_agent_flow_never_carries_state() {
		let url = authorization_url(
			&Endpoints::default(),
			99,
			"https://app.example.com/cb",
			"ManageSongs",
			AuthorizationFlow::from_parts(false, Some("ignored".into())),
		);

		assert_eq!(query_value(&url, "type").as_deref(), Some("user_agent"));
		assert!(query_value(&url, "state").is_none());
	}

	#[test]
	fn scope_sequence_matches_pre_joined_string() {
		let endpoints = Endpoints::default();
		let scopes = ["ManageCalendar", "ManagePeople", "ManageFinances"];
		let from_list = authorization_url(
			&endpoints,
			7,
			"https://app.example.com/cb",
			scopes,
			AuthorizationFlow::UserAgent,
		);
		let from_string = authorization_url(
			&endpoints,
			7,
			"https://app.example.com/cb",
			scopes.join(","),
			AuthorizationFlow::UserAgent,
		);

		assert_eq!(from_list.as_str(), from_string.as_str());
		assert_eq!(
			query_value(&from_list, "scope").as_deref(),
			Some("ManageCalendar,ManagePeople,ManageFinances")
		);
	}

	#[test]
	fn any_scope_sequence_matches_its_joined_string() {
		let endpoints = Endpoints::default();
		let mut rng = rand::rng();
		let mut sequences = vec![Vec::new(), vec!["ManagePeople".to_owned()]];

		for _ in 0..64 {
			let len = rng.random_range(0..6);

			sequences.push(
				(0..len)
					.map(|_| {
						let word_len = rng.random_range(1..12);

						(&mut rng).sample_iter(Alphanumeric).take(word_len).map(char::from).collect()
					})
					.collect(),
			);
		}

		for sequence in sequences {
			let joined = sequence.join(",");
			let from_list = authorization_url(
				&endpoints,
				3,
				"https://app.example.com/cb",
				sequence.clone(),
				AuthorizationFlow::UserAgent,
			);
			let from_string = authorization_url(
				&endpoints,
				3,
				"https://app.example.com/cb",
				joined.clone(),
				AuthorizationFlow::UserAgent,
			);

			assert_eq!(from_list.as_str(), from_string.as_str(), "{sequence:?}");
			assert_eq!(query_value(&from_list, "scope"), Some(joined), "{sequence:?}");
		}
	}

	#[test]
	fn generated_state_is_alphanumeric_and_validates() {
		let state = generate_state();

		assert_eq!(state.len(), STATE_LEN);
		assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
		assert!(validate_state(&state, &state).is_ok());
		assert!(matches!(validate_state(&state, "forged"), Err(Error::StateMismatch)));
	}
}
