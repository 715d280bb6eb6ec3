//! Engagement statistics queries.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::AccountId,
	config::AdsConfig,
	error::ConfigError,
	operation::{PlannedCall, parse_params, value},
	signer::percent_encode,
};

/// Metric group requested for every stats query.
pub const METRIC_GROUPS: &str = "ENGAGEMENT";
/// Reporting granularity.
pub const GRANULARITY: &str = "TOTAL";
/// Reporting placement.
pub const STATS_PLACEMENT: &str = "ALL_ON_TWITTER";

/// Entity family the statistics are reported for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
	/// Campaigns.
	Campaign,
	/// Line items.
	LineItem,
}
impl EntityType {
	/// Wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Campaign => "CAMPAIGN",
			Self::LineItem => "LINE_ITEM",
		}
	}
}

/// `GET stats/accounts/{account}` with the entity filter in the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetStats {
	/// Entity family.
	pub entity_type: EntityType,
	/// Entities to report on, in host order.
	pub entity_ids: Vec<String>,
}
impl GetStats {
	/// Binds host parameters `entityType` and `entityIds` (comma-separated).
	pub fn from_params(params: &Value) -> Result<Self, ConfigError> {
		#[derive(Deserialize)]
		#[serde(rename_all = "camelCase")]
		struct Params {
			entity_type: Option<EntityType>,
			#[serde(default)]
			entity_ids: String,
		}

		let raw: Params = parse_params(params)?;
		let entity_type =
			raw.entity_type.ok_or(ConfigError::MissingParameter { name: "entityType" })?;
		let entity_ids = value::split_list(&raw.entity_ids);

		if entity_ids.is_empty() {
			return Err(ConfigError::MissingParameter { name: "entityIds" });
		}

		Ok(Self { entity_type, entity_ids })
	}

	/// Builds the query. Ids are encoded one by one so the separating commas stay literal.
	pub fn plan(
		&self,
		config: &AdsConfig,
		account: &AccountId,
	) -> Result<PlannedCall, ConfigError> {
		let mut url = config.endpoint(["stats", "accounts", account.as_ref()])?;
		let ids = self.entity_ids.iter().map(|id| percent_encode(id)).collect::<Vec<_>>();
		let query = format!(
			"entity={}&entity_ids={}&metric_groups={METRIC_GROUPS}&granularity={GRANULARITY}\
			 &placement={STATS_PLACEMENT}",
			self.entity_type.as_str(),
			ids.join(","),
		);

		url.set_query(Some(&query));

		Ok(PlannedCall::get(url))
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn stats_query_lists_ids_in_order() {
		let op = GetStats::from_params(&json!({
			"entityType": "LINE_ITEM",
			"entityIds": "li1, li2 ,li3",
		}))
		.expect("Stats should bind.");
		let config = AdsConfig::builder().build().expect("Default config should build.");
		let account = AccountId::new("18ce54d4x5t").expect("Account fixture should be valid.");
		let call = op.plan(&config, &account).expect("Stats should plan.");

		assert_eq!(call.method, http::Method::GET);
		assert!(call.body.is_none());
		assert_eq!(
			call.url.as_str(),
			"https://ads-api.twitter.com/12/stats/accounts/18ce54d4x5t?entity=LINE_ITEM\
			 &entity_ids=li1,li2,li3&metric_groups=ENGAGEMENT&granularity=TOTAL\
			 &placement=ALL_ON_TWITTER",
		);

		let pairs = call.url.query_pairs().into_owned().collect::<Vec<_>>();

		assert!(pairs.contains(&("entity_ids".into(), "li1,li2,li3".into())));
	}

	#[test]
	fn stats_require_type_and_ids() {
		let err = GetStats::from_params(&json!({ "entityIds": "c1" }))
			.expect_err("Missing entity type must be rejected.");

		assert!(matches!(err, ConfigError::MissingParameter { name: "entityType" }));

		let err = GetStats::from_params(&json!({ "entityType": "CAMPAIGN", "entityIds": " , " }))
			.expect_err("Empty id list must be rejected.");

		assert!(matches!(err, ConfigError::MissingParameter { name: "entityIds" }));
		assert!(matches!(
			GetStats::from_params(&json!({ "entityType": "AD_GROUP", "entityIds": "c1" })),
			Err(ConfigError::InvalidParameters { .. })
		));
	}
}
