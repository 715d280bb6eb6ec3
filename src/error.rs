//! Adapter-level error types shared by the signer, dispatcher, and operation binding.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Missing or malformed credential, parameter, or client setting; raised before any
	/// network call.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Transport failure or non-2xx response from the Ads API. Never retried.
	#[error("Twitter Ads API Error: {message}{}", sentence_end(.message))]
	RequestFailed {
		/// Upstream message (or transport error text) kept verbatim for diagnostics.
		message: String,
		/// HTTP status code, when a response was received.
		status: Option<u16>,
		/// Underlying transport or decoding failure, if any.
		#[source]
		source: Option<BoxError>,
	},
	/// The (resource, operation) pair has no request mapping.
	#[error("Operation `{operation}` is not supported for resource `{resource}`.")]
	UnsupportedOperation {
		/// Resource label supplied by the caller.
		resource: String,
		/// Operation label supplied by the caller.
		operation: String,
	},
}
impl Error {
	/// Builds a [`Error::RequestFailed`] for a non-2xx response.
	pub fn upstream(status: u16, message: impl Into<String>) -> Self {
		Self::RequestFailed { message: message.into(), status: Some(status), source: None }
	}

	/// Builds a [`Error::RequestFailed`] wrapping a transport-level failure.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::RequestFailed { message: src.to_string(), status: None, source: Some(Box::new(src)) }
	}

	/// Builds a [`Error::UnsupportedOperation`] from caller-supplied labels.
	pub fn unsupported(resource: impl Into<String>, operation: impl Into<String>) -> Self {
		Self::UnsupportedOperation { resource: resource.into(), operation: operation.into() }
	}

	/// HTTP status attached to a [`Error::RequestFailed`], if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::RequestFailed { status, .. } => *status,
			_ => None,
		}
	}
}

// Upstream messages that already end a sentence keep their own punctuation.
fn sentence_end(message: &str) -> &'static str {
	if message.ends_with(['.', '!', '?']) { "" } else { "." }
}

/// Configuration and validation failures detected before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A credential field is missing or blank.
	#[error("Credential `{field}` is missing or empty.")]
	MissingCredential {
		/// Credential store field name.
		field: &'static str,
	},
	/// A required operation parameter is missing or blank.
	#[error("Parameter `{name}` is required.")]
	MissingParameter {
		/// Parameter name as declared by the host schema.
		name: &'static str,
	},
	/// An operation parameter is present but unusable.
	#[error("Parameter `{name}` is invalid: {reason}")]
	InvalidParameter {
		/// Parameter name as declared by the host schema.
		name: &'static str,
		/// Human-readable reason.
		reason: String,
	},
	/// Parameter document could not be mapped onto the operation's typed fields.
	#[error("Parameters could not be parsed at `{}`.", .source.path())]
	InvalidParameters {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Base URL or composed request URL cannot be parsed.
	#[error("URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL must use HTTPS outside loopback hosts.
	#[error("The API base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// URL that failed validation.
		url: String,
	},
	/// The URL cannot carry a path (e.g. `mailto:`).
	#[error("The API base URL cannot be used as a base: {url}.")]
	CannotBeABase {
		/// URL that failed validation.
		url: String,
	},
	/// HMAC key could not be initialized.
	#[error("Signing key is invalid.")]
	InvalidSigningKey,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	BodySerialization(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<url::ParseError> for ConfigError {
	fn from(source: url::ParseError) -> Self {
		Self::InvalidUrl { source }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
