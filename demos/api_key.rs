//! Calls an endpoint with an API key. Run with `ELVANTO_API_KEY` set.

// std
use std::{env, time::Duration};
// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use elvanto_api::connection::{CallOutcome, Connection};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut connection = Connection::builder()
		.api_key(env::var("ELVANTO_API_KEY")?)
		.timeout(Duration::from_secs(10))
		.build()?;
	let outcome = connection.post("groups/getAll", &json!({ "fields": ["people"] })).await?;

	match outcome {
		CallOutcome::Success(response) => println!("{}", response.into_value()),
		CallOutcome::ServiceError(response) => eprintln!("Service error: {:?}.", response.error()),
		CallOutcome::TokenExpired => eprintln!("API keys do not expire; check the key."),
	}

	Ok(())
}
