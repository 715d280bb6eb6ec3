//! Transport primitives for signed Ads API calls.
//!
//! The module exposes [`AdsHttpClient`], the dispatcher's only dependency on an HTTP
//! stack. Requests and responses use the `http` crate's types with byte bodies, so any
//! client (reqwest, hyper, a test double) can sit behind the trait. Status handling stays
//! in the dispatcher: transports report every response they receive and only fail on
//! network-level problems.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;

/// Outbound request handed to a transport.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Response returned by a transport, whatever its status.
pub type HttpResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`AdsHttpClient::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing signed Ads API requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared
/// (typically behind `Arc<T>`) across dispatchers. The future must own whatever state it
/// needs, so callers can box and await it without borrowing the request.
pub trait AdsHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the response, including non-2xx ones.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests time out after `timeout`.
	///
	/// The timeout is the only cancellation mechanism; the dispatcher never retries.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, crate::error::ConfigError> {
		Ok(Self(ReqwestClient::builder().timeout(timeout).build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl AdsHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// std
	use std::time::Duration;
	// self
	use super::*;

	#[test]
	fn timeout_clients_build_and_convert_requests() {
		let client = ReqwestHttpClient::with_timeout(Duration::from_secs(5))
			.expect("Client with a timeout should build.");
		let request = http::Request::builder()
			.method(http::Method::POST)
			.uri("https://ads-api.twitter.com/12/accounts/18ce54d4x5t/campaigns")
			.body(b"{}".to_vec())
			.expect("Request fixture should build.");
		let converted = client
			.post("https://ads-api.twitter.com/12/accounts/18ce54d4x5t/campaigns")
			.body(request.body().clone())
			.build()
			.expect("Request should build on the wrapped client.");

		assert_eq!(converted.method(), request.method());
		assert_eq!(converted.url().as_str(), request.uri().to_string());
	}
}
