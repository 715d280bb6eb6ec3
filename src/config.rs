//! Client settings: API root and body-signing policy.
//!
//! [`AdsConfig`] is assembled through [`AdsConfigBuilder`], which validates the base URL
//! once so request builders can append path segments without re-checking it.

// self
use crate::{_prelude::*, error::ConfigError};

/// Versioned Ads API root.
pub const DEFAULT_BASE_URL: &str = "https://ads-api.twitter.com/12";

/// Decides which JSON body fields take part in the OAuth signature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySigning {
	#[default]
	/// Flat objects of scalars are signed like form fields; structured bodies are not.
	FormFields,
	/// Only OAuth and URL query parameters are signed.
	QueryOnly,
}

/// Validated client settings shared by every dispatched call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdsConfig {
	/// API root every endpoint path is appended to.
	pub base_url: Url,
	/// Body signing policy.
	#[serde(default)]
	pub body_signing: BodySigning,
}
impl AdsConfig {
	/// Creates a builder seeded with the production API root.
	pub fn builder() -> AdsConfigBuilder {
		AdsConfigBuilder::default()
	}

	/// Appends `segments` to the base URL, percent-encoding each one.
	pub fn endpoint<I, S>(&self, segments: I) -> Result<Url, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut url = self.base_url.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::CannotBeABase { url: self.base_url.to_string() })?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}

	/// Checks the invariants enforced by the builder.
	pub fn validate(&self) -> Result<(), ConfigError> {
		validate_base_url(&self.base_url)
	}
}

/// Builder for [`AdsConfig`] values.
#[derive(Debug, Default)]
pub struct AdsConfigBuilder {
	/// Optional API root override.
	pub base_url: Option<Url>,
	/// Body signing policy.
	pub body_signing: BodySigning,
}
impl AdsConfigBuilder {
	/// Overrides the API root.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Parses and overrides the API root.
	pub fn base_url_str(self, raw: &str) -> Result<Self, ConfigError> {
		Ok(self.base_url(Url::parse(raw)?))
	}

	/// Overrides the body signing policy.
	pub fn body_signing(mut self, policy: BodySigning) -> Self {
		self.body_signing = policy;

		self
	}

	/// Consumes the builder and validates the resulting config.
	pub fn build(self) -> Result<AdsConfig, ConfigError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)?,
		};
		let config = AdsConfig { base_url, body_signing: self.body_signing };

		config.validate()?;

		Ok(config)
	}
}

// Plain HTTP is only tolerated against loopback hosts (local mock servers).
fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	if url.cannot_be_a_base() {
		return Err(ConfigError::CannotBeABase { url: url.to_string() });
	}

	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ConfigError::InsecureBaseUrl { url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(addr)) => addr.is_loopback(),
		Some(url::Host::Ipv6(addr)) => addr.is_loopback(),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Fixture URL should parse.")
	}

	#[test]
	fn defaults_target_the_versioned_root() {
		let config = AdsConfig::builder().build().expect("Default config should build.");

		assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
		assert_eq!(config.body_signing, BodySigning::FormFields);
	}

	#[test]
	fn rejects_insecure_remote_roots() {
		let err = AdsConfig::builder()
			.base_url(url("http://ads-api.twitter.com/12"))
			.build()
			.expect_err("Plain HTTP must be rejected for remote hosts.");

		assert!(matches!(err, ConfigError::InsecureBaseUrl { .. }));

		for local in ["http://127.0.0.1:9000/12", "http://localhost:9000", "http://[::1]:9000/"] {
			AdsConfig::builder()
				.base_url(url(local))
				.build()
				.unwrap_or_else(|e| panic!("Loopback root {local} should be accepted: {e}."));
		}

		let err = AdsConfig::builder()
			.base_url_str("not a url")
			.expect_err("Unparsable roots must be rejected.");

		assert!(matches!(err, ConfigError::InvalidUrl { .. }));
	}

	#[test]
	fn endpoint_appends_encoded_segments() {
		let config = AdsConfig::builder().build().expect("Default config should build.");
		let endpoint = config
			.endpoint(["accounts", "18ce54d4x5t", "campaigns"])
			.expect("Endpoint should compose.");

		assert_eq!(
			endpoint.as_str(),
			"https://ads-api.twitter.com/12/accounts/18ce54d4x5t/campaigns"
		);

		let trailing = AdsConfig::builder()
			.base_url(url("https://ads-api.twitter.com/12/"))
			.build()
			.expect("Trailing slash root should build.");

		assert_eq!(
			trailing
				.endpoint(["stats", "accounts", "a b"])
				.expect("Endpoint should compose.")
				.as_str(),
			"https://ads-api.twitter.com/12/stats/accounts/a%20b",
		);
	}

	#[test]
	fn deserializes_with_default_policy() {
		let config: AdsConfig =
			serde_json::from_str(r#"{"base_url":"https://ads-api.twitter.com/12"}"#)
				.expect("Config should deserialize.");

		assert_eq!(config.body_signing, BodySigning::FormFields);

		let config: AdsConfig = serde_json::from_str(
			r#"{"base_url":"https://ads-api.twitter.com/12","body_signing":"query_only"}"#,
		)
		.expect("Config should deserialize.");

		assert_eq!(config.body_signing, BodySigning::QueryOnly);
	}
}
