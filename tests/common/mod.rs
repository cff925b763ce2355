//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::{collections::VecDeque, sync::Arc};
// crates.io
use parking_lot::Mutex;
use url::Url;
// self
use elvanto_api::{
	config::Endpoints,
	error::TransportError,
	http::{ApiHttpClient, HttpFuture, HttpRequest, HttpResponse},
};

/// Transport that replays canned responses in order and records every request.
#[derive(Default)]
pub struct ScriptedHttpClient {
	responses: Mutex<VecDeque<HttpResponse>>,
	requests: Mutex<Vec<HttpRequest>>,
}
impl ScriptedHttpClient {
	pub fn new<I, S>(responses: I) -> Arc<Self>
	where
		I: IntoIterator<Item = (u16, S)>,
		S: Into<String>,
	{
		let responses = responses
			.into_iter()
			.map(|(status, body)| HttpResponse { status, body: body.into().into_bytes() })
			.collect();

		Arc::new(Self { responses: Mutex::new(responses), requests: Mutex::new(Vec::new()) })
	}

	pub fn requests(&self) -> Vec<HttpRequest> {
		self.requests.lock().clone()
	}

	pub fn request_paths(&self) -> Vec<String> {
		self.requests.lock().iter().map(|request| request.url.path().to_owned()).collect()
	}

	pub fn remaining(&self) -> usize {
		self.responses.lock().len()
	}
}
impl ApiHttpClient for ScriptedHttpClient {
	fn post(&self, request: HttpRequest) -> HttpFuture<'_> {
		self.requests.lock().push(request);

		let next = self.responses.lock().pop_front();

		Box::pin(async move {
			next.ok_or_else(|| {
				TransportError::Io(std::io::Error::new(
					std::io::ErrorKind::NotConnected,
					"Scripted transport has no responses left.",
				))
			})
		})
	}
}

pub fn mock_endpoints(root: &str) -> Endpoints {
	let root = root.trim_end_matches('/');

	Endpoints::builder()
		.authorization(
			Url::parse(&format!("{root}/OAuth"))
				.expect("Mock authorization endpoint should parse successfully."),
		)
		.token(
			Url::parse(&format!("{root}/OAuth/token"))
				.expect("Mock token endpoint should parse successfully."),
		)
		.api(Url::parse(&format!("{root}/v1/")).expect("Mock API endpoint should parse successfully."))
		.build()
		.expect("Mock endpoints should pass validation.")
}

pub fn body_text(request: &HttpRequest) -> String {
	String::from_utf8(request.body.clone()).expect("Request body should be UTF-8.")
}

pub fn form_pairs(request: &HttpRequest) -> Vec<(String, String)> {
	url::form_urlencoded::parse(&request.body)
		.map(|(k, v)| (k.into_owned(), v.into_owned()))
		.collect()
}

pub const OK_BODY: &str = r#"{"status":"ok","person":[{"id":"p-1","firstname":"Ada"}]}"#;
pub const EXPIRED_BODY: &str =
	r#"{"status":"fail","error":{"code":121,"message":"Expired OAuth Token"}}"#;
pub const TOKENS_BODY: &str =
	r#"{"access_token":"access-new","expires_in":7200,"refresh_token":"refresh-new"}"#;

#[cfg(feature = "reqwest")]
pub mod reqwest_support {
	// self
	use elvanto_api::{
		config::Endpoints,
		connection::{Connection, ConnectionBuilder},
		flows::OAuthClient,
		http::ReqwestHttpClient,
		reqwest::Client,
	};

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.timeout(std::time::Duration::from_secs(10))
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	pub fn build_reqwest_test_connection(
		endpoints: Endpoints,
		access_token: &str,
		refresh_token: Option<&str>,
	) -> Connection<ReqwestHttpClient> {
		let mut builder = ConnectionBuilder::new().endpoints(endpoints).access_token(access_token);

		if let Some(refresh) = refresh_token {
			builder = builder.refresh_token(refresh);
		}

		builder
			.build_with_http_client(test_reqwest_http_client())
			.expect("Test connection should build successfully.")
	}

	pub fn build_reqwest_test_oauth_client(
		endpoints: Endpoints,
		client_id: u64,
		client_secret: &str,
	) -> OAuthClient<ReqwestHttpClient> {
		OAuthClient::with_http_client(endpoints, client_id, client_secret, test_reqwest_http_client())
	}
}
