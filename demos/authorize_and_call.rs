//! Walks through the OAuth journey: print the authorization URL, exchange the returned code,
//! and call an endpoint through a refreshing connection.
//!
//! Run with `ELVANTO_CLIENT_ID`, `ELVANTO_CLIENT_SECRET`, `ELVANTO_REDIRECT_URI`, and
//! (after visiting the printed URL) `ELVANTO_CODE` set.

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
use serde_json::json;
// self
use elvanto_api::{
	config::Endpoints,
	connection::CallOutcome,
	flows::{AuthorizationFlow, OAuthClient, generate_state},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client_id = env::var("ELVANTO_CLIENT_ID")?.parse::<u64>()?;
	let client_secret = env::var("ELVANTO_CLIENT_SECRET")?;
	let redirect_uri = env::var("ELVANTO_REDIRECT_URI")?;
	let client = OAuthClient::new(Endpoints::default(), client_id, client_secret)?;
	let state = generate_state();
	let url = client.authorization_url(
		&redirect_uri,
		["ManagePeople", "ManageGroups"],
		AuthorizationFlow::web_server(Some(state.clone())),
	);

	println!("Send your user to {url}.");
	println!("Keep `{state}` to validate the redirect.");

	let Ok(code) = env::var("ELVANTO_CODE") else {
		println!("Set ELVANTO_CODE to the code from the redirect to continue.");

		return Ok(());
	};
	let tokens = client.exchange_code(&code, &redirect_uri).await?;

	println!("Access token expires at {}.", tokens.expires_at());

	let mut connection = client.connect(&tokens);

	match connection.post("people/getAll", &json!({ "page_size": 10 })).await? {
		CallOutcome::Success(response) =>
			println!("People: {}", response.get("people").cloned().unwrap_or_default()),
		CallOutcome::ServiceError(response) =>
			return Err(eyre!("Service rejected the call: {:?}.", response.error())),
		CallOutcome::TokenExpired => return Err(eyre!("Token expired and cannot be renewed.")),
	}

	// Persist the possibly rotated tokens for the next run.
	println!("{}", serde_json::to_string(connection.credentials())?);

	Ok(())
}
