//! Follower look-alike targeting, one criterion per account.

// crates.io
use serde_json::{Value, json};
// self
use crate::{
	_prelude::*,
	auth::{AccountId, LineItemId},
	config::AdsConfig,
	error::ConfigError,
	operation::{PlannedCall, parse_params, value},
};

/// Targeting type attached for every listed account.
pub const FOLLOWER_TARGETING_TYPE: &str = "SIMILAR_TO_FOLLOWERS";

/// `POST accounts/{account}/targeting_criteria`, repeated for each target account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddFollowerTargeting {
	/// Line item receiving the criteria.
	pub line_item_id: LineItemId,
	/// Handles whose followers are targeted, in host order.
	pub target_accounts: Vec<String>,
}
impl AddFollowerTargeting {
	/// Binds host parameters `lineItemId` and `targetAccounts` (comma-separated handles).
	pub fn from_params(params: &Value) -> Result<Self, ConfigError> {
		#[derive(Deserialize)]
		#[serde(rename_all = "camelCase")]
		struct Params {
			#[serde(default)]
			line_item_id: String,
			#[serde(default)]
			target_accounts: String,
		}

		let raw: Params = parse_params(params)?;
		let line_item_id = value::identifier("lineItemId", &raw.line_item_id)?;
		let target_accounts = value::split_list(&raw.target_accounts)
			.into_iter()
			.filter_map(|handle| {
				let handle = handle.strip_prefix('@').unwrap_or(handle.as_str()).trim();

				(!handle.is_empty()).then(|| handle.to_owned())
			})
			.collect::<Vec<_>>();

		if target_accounts.is_empty() {
			return Err(ConfigError::MissingParameter { name: "targetAccounts" });
		}

		Ok(Self { line_item_id, target_accounts })
	}

	/// One call per account, in list order.
	pub fn plan(
		&self,
		config: &AdsConfig,
		account: &AccountId,
	) -> Result<Vec<PlannedCall>, ConfigError> {
		let url = config.endpoint(["accounts", account.as_ref(), "targeting_criteria"])?;

		Ok(self
			.target_accounts
			.iter()
			.map(|handle| {
				PlannedCall::post(
					url.clone(),
					json!({
						"line_item_id": self.line_item_id,
						"targeting_type": FOLLOWER_TARGETING_TYPE,
						"targeting_value": handle,
					}),
				)
			})
			.collect())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn handles_are_cleaned_in_order() {
		let op = AddFollowerTargeting::from_params(&json!({
			"lineItemId": "li1",
			"targetAccounts": " alice, @bob ,, carol ,@",
		}))
		.expect("Targeting should bind.");

		assert_eq!(op.target_accounts, ["alice", "bob", "carol"]);

		let config = AdsConfig::builder().build().expect("Default config should build.");
		let account = AccountId::new("a1").expect("Account fixture should be valid.");
		let calls = op.plan(&config, &account).expect("Targeting should plan.");
		let values = calls
			.iter()
			.map(|call| call.body.as_ref().and_then(|body| body["targeting_value"].as_str()))
			.collect::<Vec<_>>();

		assert_eq!(values, [Some("alice"), Some("bob"), Some("carol")]);
		assert!(calls.iter().all(|call| {
			call.url.as_str() == "https://ads-api.twitter.com/12/accounts/a1/targeting_criteria"
		}));
		assert_eq!(
			calls[0].body,
			Some(json!({
				"line_item_id": "li1",
				"targeting_type": "SIMILAR_TO_FOLLOWERS",
				"targeting_value": "alice",
			})),
		);
	}

	#[test]
	fn empty_lists_are_rejected() {
		for accounts in ["", " , ", "@"] {
			let err = AddFollowerTargeting::from_params(&json!({
				"lineItemId": "li1",
				"targetAccounts": accounts,
			}))
			.expect_err("Empty account list must be rejected.");

			assert!(matches!(err, ConfigError::MissingParameter { name: "targetAccounts" }));
		}
	}
}
