//! Elvanto API client: build OAuth authorization URLs, exchange codes for tokens, and issue
//! authenticated JSON calls that transparently refresh an expired access token once.
//!
//! The typical journey looks like this:
//!
//! 1. Send the user to [`flows::authorization_url`] (or [`flows::OAuthClient::authorization_url`]).
//! 2. Trade the returned code for a [`auth::TokenSet`] via [`flows::OAuthClient::exchange_code`].
//! 3. Build a [`connection::Connection`] from those tokens (or from an API key) and call
//!    [`connection::Connection::post`].
//!
//! A [`connection::Connection`] mutates its credentials in place when a refresh succeeds, so its
//! calling methods take `&mut self`. Share one connection across tasks only behind your own
//! lock, or give each concurrent context its own connection.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod connection;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _, tokio as _};
