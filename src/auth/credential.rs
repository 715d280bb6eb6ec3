//! OAuth 1.0a credential pairs and the session credential bundle.
//!
//! [`CredentialFields`] mirrors the flat shape handed over by the host's credential store.
//! Converting it into [`AdsCredentials`] validates every field up front so a session never
//! reaches the signer with a blank key or secret.

// self
use crate::{
	_prelude::*,
	auth::{AccountId, Secret},
	error::ConfigError,
};

/// Consumer (application) key pair issued by the developer portal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerCredential {
	/// Public consumer key sent as `oauth_consumer_key`.
	pub key: String,
	/// Consumer secret; first half of the signing key.
	pub secret: Secret,
}
impl ConsumerCredential {
	/// Creates a consumer credential pair.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key: key.into(), secret: Secret::new(secret) }
	}

	/// Fails when either half of the pair is blank.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.key.trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "consumerKey" });
		}
		if self.secret.is_blank() {
			return Err(ConfigError::MissingCredential { field: "consumerSecret" });
		}

		Ok(())
	}
}

/// Access token pair representing the delegated user's authorization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
	/// Token value sent as `oauth_token`.
	pub key: String,
	/// Token secret; second half of the signing key.
	pub secret: Secret,
}
impl AccessToken {
	/// Creates an access token pair.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key: key.into(), secret: Secret::new(secret) }
	}

	/// Fails when either half of the pair is blank.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.key.trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "accessToken" });
		}
		if self.secret.is_blank() {
			return Err(ConfigError::MissingCredential { field: "accessTokenSecret" });
		}

		Ok(())
	}
}

/// Credential fields exactly as the credential store supplies them.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialFields {
	/// Consumer key.
	#[serde(default)]
	pub consumer_key: String,
	/// Consumer secret.
	#[serde(default)]
	pub consumer_secret: Secret,
	/// Access token.
	#[serde(default)]
	pub access_token: String,
	/// Access token secret.
	#[serde(default)]
	pub access_token_secret: Secret,
	/// Ads account identifier.
	#[serde(default)]
	pub account_id: String,
}

/// Read-only credential bundle shared by every call in a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdsCredentials {
	/// Application key pair.
	pub consumer: ConsumerCredential,
	/// Delegated user token pair.
	pub token: AccessToken,
	/// Ads account every request is scoped to.
	pub account_id: AccountId,
}
impl AdsCredentials {
	/// Builds a validated bundle.
	pub fn new(
		consumer: ConsumerCredential,
		token: AccessToken,
		account_id: AccountId,
	) -> Result<Self, ConfigError> {
		let credentials = Self { consumer, token, account_id };

		credentials.validate()?;

		Ok(credentials)
	}

	/// Parses the credential store's JSON document.
	pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(raw);
		let fields: CredentialFields = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::InvalidParameters { source })?;

		Self::try_from(fields)
	}

	/// Re-checks that no key or secret is blank.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.consumer.validate()?;
		self.token.validate()
	}
}
impl TryFrom<CredentialFields> for AdsCredentials {
	type Error = ConfigError;

	fn try_from(fields: CredentialFields) -> Result<Self, Self::Error> {
		if fields.account_id.trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "accountId" });
		}

		let account_id = AccountId::new(fields.account_id.trim()).map_err(|e| {
			ConfigError::InvalidParameter { name: "accountId", reason: e.to_string() }
		})?;

		Self::new(
			ConsumerCredential { key: fields.consumer_key, secret: fields.consumer_secret },
			AccessToken { key: fields.access_token, secret: fields.access_token_secret },
			account_id,
		)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const STORE_DOCUMENT: &str = r#"{
		"consumerKey": "ck",
		"consumerSecret": "cs",
		"accessToken": "at",
		"accessTokenSecret": "ats",
		"accountId": "18ce54d4x5t"
	}"#;

	#[test]
	fn parses_store_document() {
		let credentials =
			AdsCredentials::from_json(STORE_DOCUMENT).expect("Store document should parse.");

		assert_eq!(credentials.consumer.key, "ck");
		assert_eq!(credentials.consumer.secret.expose(), "cs");
		assert_eq!(credentials.token.key, "at");
		assert_eq!(credentials.token.secret.expose(), "ats");
		assert_eq!(credentials.account_id.as_ref(), "18ce54d4x5t");
	}

	#[test]
	fn blank_fields_fail_fast() {
		let err = AdsCredentials::from_json(r#"{"consumerKey":"ck","consumerSecret":"cs"}"#)
			.expect_err("Missing account id must be rejected.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "accountId" }));

		let err = AdsCredentials::from_json(
			r#"{"consumerKey":"ck","consumerSecret":"cs","accessToken":"at",
				"accessTokenSecret":" ","accountId":"a1"}"#,
		)
		.expect_err("Blank token secret must be rejected.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "accessTokenSecret" }));
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let credentials =
			AdsCredentials::from_json(STORE_DOCUMENT).expect("Store document should parse.");
		let rendered = format!("{credentials:?}");

		assert!(!rendered.contains("\"cs\""));
		assert!(!rendered.contains("ats"));
		assert!(rendered.contains("<redacted>"));
	}
}
