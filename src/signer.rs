//! OAuth 1.0a (HMAC-SHA1) request signing.
//!
//! Signing is a pure function of the credential pairs, the request, and a
//! [`SigningInputs`] value carrying the nonce and timestamp. [`sign`] draws fresh inputs
//! for every call; [`sign_with`] takes them explicitly so the output can be reproduced
//! byte for byte.
//!
//! The signature base string covers the upper-cased method, the base URL without its
//! query, and the normalized parameter set: OAuth protocol parameters, URL query
//! parameters, and (for form-like bodies) the body fields.

pub mod encode;

pub use encode::{normalize_parameters, percent_decode, percent_encode};

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use http::Method;
use rand::{Rng, distr::Alphanumeric};
use serde_json::Value;
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ConsumerCredential},
	config::BodySigning,
	error::ConfigError,
};

type HmacSha1 = Hmac<Sha1>;

/// Value of `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";
/// Length of generated nonces.
pub const NONCE_LEN: usize = 32;

/// Per-request freshness values bound into the signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningInputs {
	/// Single-use random token.
	pub nonce: String,
	/// Unix time in seconds.
	pub timestamp: i64,
}
impl SigningInputs {
	/// Draws a random alphanumeric nonce from the thread-local CSPRNG and reads the clock.
	pub fn fresh() -> Self {
		let nonce =
			rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect();

		Self { nonce, timestamp: OffsetDateTime::now_utc().unix_timestamp() }
	}

	/// Uses caller-provided values.
	pub fn fixed(nonce: impl Into<String>, timestamp: i64) -> Self {
		Self { nonce: nonce.into(), timestamp }
	}
}

/// Request view consumed by the signer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignableRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL, query included.
	pub url: Url,
	/// Body fields merged into the signature base (form-like bodies only).
	pub form_params: Vec<(String, String)>,
}
impl SignableRequest {
	/// Creates a request without signed body fields.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, form_params: Vec::new() }
	}

	/// Adds body fields that take part in the signature.
	pub fn with_form_params<I, K, V>(mut self, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.form_params.extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));

		self
	}

	/// Builds the signing view of a JSON-bodied request.
	///
	/// Under [`BodySigning::FormFields`] a flat object of scalars is merged into the
	/// signature; any other body only travels on the wire.
	pub fn from_json_body(
		method: Method,
		url: Url,
		body: Option<&Value>,
		policy: BodySigning,
	) -> Self {
		let request = Self::new(method, url);

		match (policy, body.and_then(form_fields)) {
			(BodySigning::FormFields, Some(fields)) => request.with_form_params(fields),
			_ => request,
		}
	}

	/// Scheme, authority, and path, without query or fragment.
	pub fn base_uri(&self) -> String {
		let url = &self.url;
		let mut buf = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());

		if let Some(port) = url.port() {
			buf.push(':');
			buf.push_str(&port.to_string());
		}

		buf.push_str(url.path());

		buf
	}
}

/// Signed `Authorization` header value.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationHeader(String);
impl AuthorizationHeader {
	/// Borrows the header value.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns the percent-encoded `oauth_signature` value.
	pub fn signature(&self) -> Option<&str> {
		self.0
			.strip_prefix("OAuth ")?
			.split(", ")
			.find_map(|field| field.strip_prefix("oauth_signature=\""))
			.and_then(|value| value.strip_suffix('"'))
	}
}
impl AsRef<str> for AuthorizationHeader {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
impl From<AuthorizationHeader> for String {
	fn from(value: AuthorizationHeader) -> Self {
		value.0
	}
}
impl Debug for AuthorizationHeader {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AuthorizationHeader").field(&"<redacted>").finish()
	}
}

/// Signs `request` with a fresh nonce and the current time.
pub fn sign(
	consumer: &ConsumerCredential,
	token: &AccessToken,
	request: &SignableRequest,
) -> Result<AuthorizationHeader, ConfigError> {
	sign_with(consumer, token, request, &SigningInputs::fresh())
}

/// Signs `request` with explicit freshness values.
pub fn sign_with(
	consumer: &ConsumerCredential,
	token: &AccessToken,
	request: &SignableRequest,
	inputs: &SigningInputs,
) -> Result<AuthorizationHeader, ConfigError> {
	consumer.validate()?;
	token.validate()?;

	let timestamp = inputs.timestamp.to_string();
	let mut oauth_params = vec![
		("oauth_consumer_key", consumer.key.as_str()),
		("oauth_nonce", inputs.nonce.as_str()),
		("oauth_signature_method", SIGNATURE_METHOD),
		("oauth_timestamp", timestamp.as_str()),
		("oauth_token", token.key.as_str()),
		("oauth_version", OAUTH_VERSION),
	];
	let base = signature_base_string(request, &oauth_params);
	let signature = compute_signature(consumer.secret.expose(), token.secret.expose(), &base)?;

	oauth_params.push(("oauth_signature", signature.as_str()));
	oauth_params.sort_unstable();

	let fields = oauth_params
		.iter()
		.map(|(key, value)| format!("{key}=\"{}\"", percent_encode(value)))
		.collect::<Vec<_>>();

	Ok(AuthorizationHeader(format!("OAuth {}", fields.join(", "))))
}

/// Builds `METHOD&enc(base_uri)&enc(normalized_parameters)`.
pub fn signature_base_string(request: &SignableRequest, oauth_params: &[(&str, &str)]) -> String {
	let query = request.url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned()));
	let oauth = oauth_params.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned()));
	let form = request.form_params.iter().cloned();
	let normalized = normalize_parameters(query.chain(oauth).chain(form));

	format!(
		"{}&{}&{}",
		request.method.as_str().to_ascii_uppercase(),
		percent_encode(&request.base_uri()),
		percent_encode(&normalized),
	)
}

/// Base64 HMAC-SHA1 of `base` keyed by `enc(consumer_secret)&enc(token_secret)`.
pub fn compute_signature(
	consumer_secret: &str,
	token_secret: &str,
	base: &str,
) -> Result<String, ConfigError> {
	let key = format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret));
	let mut mac =
		HmacSha1::new_from_slice(key.as_bytes()).map_err(|_| ConfigError::InvalidSigningKey)?;

	mac.update(base.as_bytes());

	Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Returns the body's fields when it is a flat object of scalars.
///
/// Strings are used as-is; numbers and booleans use their JSON text. Arrays, nested
/// objects, and nulls mark the body as structured.
pub fn form_fields(body: &Value) -> Option<Vec<(String, String)>> {
	let object = body.as_object()?;
	let mut fields = Vec::with_capacity(object.len());

	for (key, value) in object {
		let rendered = match value {
			Value::String(s) => s.clone(),
			Value::Number(n) => n.to_string(),
			Value::Bool(b) => b.to_string(),
			Value::Null | Value::Array(_) | Value::Object(_) => return None,
		};

		fields.push((key.clone(), rendered));
	}

	Some(fields)
}
