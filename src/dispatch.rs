//! Signed request dispatch.
//!
//! [`Dispatcher`] owns the read-only credential bundle, the client settings, and a shared
//! transport. Every call is signed for its exact method, URL, and body, sent once, and
//! decoded into JSON. Fan-out plans run their calls one at a time and stop at the first
//! failure.

// crates.io
use http::{
	StatusCode,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde_json::{Map, Value, json};
// self
use crate::{
	_prelude::*,
	auth::AdsCredentials,
	config::AdsConfig,
	error::ConfigError,
	http::{AdsHttpClient, HttpRequest, HttpResponse},
	obs::{self, RequestOutcome, RequestSpan},
	operation::{Operation, PlannedCall, RequestPlan},
	signer::{self, SignableRequest},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Media type sent and accepted on every call.
pub const JSON_MEDIA_TYPE: &str = "application/json";
/// Longest upstream body excerpt carried in an error message.
pub const BODY_PREVIEW_LIMIT: usize = 256;

#[cfg(feature = "reqwest")]
/// Dispatcher specialized for the crate's default reqwest transport.
pub type ReqwestDispatcher = Dispatcher<ReqwestHttpClient>;

/// Sends signed Ads API requests for one account.
///
/// Cloning is cheap: the transport and credentials sit behind [`Arc`], so clones share them.
#[derive(Clone)]
pub struct Dispatcher<C>
where
	C: ?Sized + AdsHttpClient,
{
	/// Transport used for every outbound call.
	pub http_client: Arc<C>,
	/// Credentials and account scope, never mutated.
	pub credentials: Arc<AdsCredentials>,
	/// API root and body signing policy.
	pub config: AdsConfig,
}
impl<C> Dispatcher<C>
where
	C: ?Sized + AdsHttpClient,
{
	/// Creates a dispatcher over the caller-provided transport.
	pub fn with_http_client(
		credentials: impl Into<Arc<AdsCredentials>>,
		config: AdsConfig,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), credentials: credentials.into(), config }
	}

	/// Binds host labels and executes the resulting operation.
	pub async fn execute_labels(
		&self,
		resource: &str,
		operation: &str,
		params: &Value,
	) -> Result<Value> {
		let operation = Operation::bind_labels(resource, operation, params)?;

		self.execute(&operation).await
	}

	/// Plans and sends `operation`.
	///
	/// A single call yields its response body; a fan-out yields `{"data": [...]}` with the
	/// responses in issue order.
	pub async fn execute(&self, operation: &Operation) -> Result<Value> {
		let label = operation.label();
		let span = RequestSpan::new(label, "execute");

		obs::record_request_outcome(label, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.credentials.validate()?;

				match operation.plan(&self.config, &self.credentials.account_id)? {
					RequestPlan::Single(call) => self.send(&call).await,
					RequestPlan::FanOut(calls) =>
						Ok(json!({ "data": self.send_each(&calls).await? })),
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(label, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(label, RequestOutcome::Failure),
		}

		result
	}

	/// Sends `calls` in order, stopping at the first failure.
	pub async fn send_each(&self, calls: &[PlannedCall]) -> Result<Vec<Value>> {
		let mut responses = Vec::with_capacity(calls.len());

		for call in calls {
			responses.push(self.send(call).await?);
		}

		Ok(responses)
	}

	/// Signs and sends one call, decoding the JSON response.
	pub async fn send(&self, call: &PlannedCall) -> Result<Value> {
		let request = self.signed_request(call)?;

		#[cfg(feature = "tracing")]
		tracing::debug!(method = %call.method, path = call.url.path(), "Sending Ads API request.");

		let response = self.http_client.execute(request).await.map_err(Error::transport)?;

		#[cfg(feature = "tracing")]
		tracing::debug!(status = response.status().as_u16(), "Ads API responded.");

		decode_response(response)
	}

	/// Builds the wire request for `call`, `Authorization` header included.
	pub fn signed_request(&self, call: &PlannedCall) -> Result<HttpRequest, ConfigError> {
		let signable = SignableRequest::from_json_body(
			call.method.clone(),
			call.url.clone(),
			call.body.as_ref(),
			self.config.body_signing,
		);
		let header =
			signer::sign(&self.credentials.consumer, &self.credentials.token, &signable)?;
		let body = match &call.body {
			Some(body) => serde_json::to_vec(body).map_err(ConfigError::BodySerialization)?,
			None => Vec::new(),
		};
		let request = http::Request::builder()
			.method(call.method.clone())
			.uri(call.url.as_str())
			.header(AUTHORIZATION, header.as_str())
			.header(CONTENT_TYPE, JSON_MEDIA_TYPE)
			.header(ACCEPT, JSON_MEDIA_TYPE)
			.body(body)?;

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl Dispatcher<ReqwestHttpClient> {
	/// Creates a dispatcher that provisions its own reqwest transport.
	pub fn new(credentials: impl Into<Arc<AdsCredentials>>, config: AdsConfig) -> Self {
		Self::with_http_client(credentials, config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Dispatcher<C>
where
	C: ?Sized + AdsHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher")
			.field("account_id", &self.credentials.account_id)
			.field("config", &self.config)
			.finish()
	}
}

fn decode_response(response: HttpResponse) -> Result<Value> {
	let status = response.status();
	let body = response.into_body();

	if !status.is_success() {
		return Err(Error::upstream(status.as_u16(), upstream_message(status, &body)));
	}
	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Object(Map::new()));
	}

	serde_json::from_slice(&body).map_err(|e| Error::RequestFailed {
		message: "Response body is not valid JSON".into(),
		status: Some(status.as_u16()),
		source: Some(Box::new(e)),
	})
}

// Ads API errors look like `{"errors":[{"code":"...","message":"..."}]}`.
fn upstream_message(status: StatusCode, body: &[u8]) -> String {
	#[derive(Deserialize)]
	struct Envelope {
		#[serde(default)]
		errors: Vec<Detail>,
	}
	#[derive(Deserialize)]
	struct Detail {
		message: Option<String>,
	}

	if let Ok(envelope) = serde_json::from_slice::<Envelope>(body) {
		let messages = envelope
			.errors
			.into_iter()
			.filter_map(|detail| detail.message)
			.filter(|message| !message.trim().is_empty())
			.collect::<Vec<_>>();

		if !messages.is_empty() {
			return messages.join("; ");
		}
	}

	let text = String::from_utf8_lossy(body);
	let text = text.trim();

	if text.is_empty() { format!("HTTP {status}") } else { truncate_preview(text) }
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = StatusCode::from_u16(status).expect("Fixture status is valid.");

		response
	}

	#[test]
	fn upstream_error_messages_are_joined() {
		let err = decode_response(response(
			400,
			r#"{"errors":[{"code":"INVALID_PARAMETER","message":"Budget too low"},
				{"message":"Bad start"}],"request":{}}"#,
		))
		.expect_err("Non-2xx responses must fail.");

		assert_eq!(err.status(), Some(400));
		assert_eq!(err.to_string(), "Twitter Ads API Error: Budget too low; Bad start.");

		let err =
			decode_response(response(400, r#"{"errors":[{"message":"Invalid account id."}]}"#))
				.expect_err("Non-2xx responses must fail.");

		assert_eq!(err.to_string(), "Twitter Ads API Error: Invalid account id.");
	}

	#[test]
	fn non_json_errors_fall_back_to_a_preview() {
		let err = decode_response(response(503, "upstream unavailable"))
			.expect_err("Non-2xx responses must fail.");

		assert_eq!(err.to_string(), "Twitter Ads API Error: upstream unavailable.");

		let err = decode_response(response(401, "")).expect_err("Non-2xx responses must fail.");

		assert_eq!(err.to_string(), "Twitter Ads API Error: HTTP 401 Unauthorized.");

		let long = "x".repeat(BODY_PREVIEW_LIMIT + 10);
		let err = decode_response(response(500, &long)).expect_err("Non-2xx responses must fail.");

		match err {
			Error::RequestFailed { message, .. } => {
				assert_eq!(message.chars().count(), BODY_PREVIEW_LIMIT + 1);
				assert!(message.ends_with('…'));
			},
			other => panic!("Unexpected error: {other}."),
		}
	}

	#[test]
	fn successful_bodies_decode() {
		assert_eq!(
			decode_response(response(200, r#"{"data":{"id":"c1"}}"#)).ok(),
			Some(json!({ "data": { "id": "c1" } })),
		);
		assert_eq!(decode_response(response(204, "")).ok(), Some(json!({})));
		assert!(matches!(
			decode_response(response(200, "<html>")),
			Err(Error::RequestFailed { status: Some(200), .. })
		));
	}
}
