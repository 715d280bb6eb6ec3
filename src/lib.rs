//! OAuth 1.0a signed access to the Twitter Ads API: campaigns, line items, follower targeting,
//! and engagement statistics behind one typed dispatcher.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod batch;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod obs;
pub mod operation;
pub mod signer;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{AccessToken, AccountId, AdsCredentials, ConsumerCredential},
		config::AdsConfig,
		dispatch::ReqwestDispatcher,
		http::ReqwestHttpClient,
	};

	/// Account every test credential bundle is scoped to.
	pub const TEST_ACCOUNT_ID: &str = "18ce54d4x5t";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Credential bundle with fixed, non-blank values.
	pub fn test_credentials() -> AdsCredentials {
		AdsCredentials::new(
			ConsumerCredential::new("test-consumer-key", "test-consumer-secret"),
			AccessToken::new("test-access-token", "test-access-token-secret"),
			AccountId::new(TEST_ACCOUNT_ID).expect("Test account identifier should be valid."),
		)
		.expect("Test credentials should be valid.")
	}

	/// Constructs a [`ReqwestDispatcher`] pointed at `base_url` (usually an `httpmock` server).
	pub fn build_reqwest_test_dispatcher(base_url: &str) -> ReqwestDispatcher {
		let config = AdsConfig::builder()
			.base_url_str(base_url)
			.and_then(|builder| builder.build())
			.expect("Test base URL should be valid.");

		ReqwestDispatcher::with_http_client(test_credentials(), config, test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _};
