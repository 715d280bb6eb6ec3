//! Line item create and update requests.

// crates.io
use serde_json::{Map, Value, json};
// self
use crate::{
	_prelude::*,
	auth::{AccountId, CampaignId, LineItemId},
	config::AdsConfig,
	error::ConfigError,
	operation::{AmountInput, EntityStatus, MicroAmount, PlannedCall, parse_params, value},
};

/// Product type for every created line item.
pub const PRODUCT_TYPE: &str = "PROMOTED_TWEETS";
/// Placement for every created line item.
pub const PLACEMENT: &str = "ALL_ON_TWITTER";
/// Opening bid: one currency unit.
pub const DEFAULT_BID: MicroAmount = MicroAmount::from_micros(MicroAmount::MICROS_PER_UNIT);

/// Campaign objective a line item optimizes for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Objective {
	/// Clicks through to a website.
	WebsiteClicks,
	/// Engagements with promoted posts.
	TweetEngagements,
	/// New followers.
	Followers,
}
impl Objective {
	/// Wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::WebsiteClicks => "WEBSITE_CLICKS",
			Self::TweetEngagements => "TWEET_ENGAGEMENTS",
			Self::Followers => "FOLLOWERS",
		}
	}
}

/// `POST accounts/{account}/line_items`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateLineItem {
	/// Parent campaign.
	pub campaign_id: CampaignId,
	/// Line item name.
	pub name: String,
	/// Optimization objective.
	pub objective: Objective,
}
impl CreateLineItem {
	/// Binds host parameters `campaignId`, `lineItemName`, `objective`.
	pub fn from_params(params: &Value) -> Result<Self, ConfigError> {
		#[derive(Deserialize)]
		#[serde(rename_all = "camelCase")]
		struct Params {
			#[serde(default)]
			campaign_id: String,
			#[serde(default)]
			line_item_name: String,
			objective: Option<Objective>,
		}

		let raw: Params = parse_params(params)?;

		Ok(Self {
			campaign_id: value::identifier("campaignId", &raw.campaign_id)?,
			name: value::required("lineItemName", raw.line_item_name)?,
			objective: raw.objective.ok_or(ConfigError::MissingParameter { name: "objective" })?,
		})
	}

	/// Builds the request; the line item is created paused with the opening bid.
	pub fn plan(
		&self,
		config: &AdsConfig,
		account: &AccountId,
	) -> Result<PlannedCall, ConfigError> {
		let url = config.endpoint(["accounts", account.as_ref(), "line_items"])?;
		let body = json!({
			"campaign_id": self.campaign_id,
			"name": self.name,
			"product_type": PRODUCT_TYPE,
			"placements": [PLACEMENT],
			"objective": self.objective.as_str(),
			"bid_amount_local_micro": DEFAULT_BID.to_string(),
			"entity_status": EntityStatus::Paused.as_str(),
		});

		Ok(PlannedCall::post(url, body))
	}
}

/// `PUT accounts/{account}/line_items/{line_item}` with the fields being changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateLineItem {
	/// Line item to modify.
	pub line_item_id: LineItemId,
	/// New name.
	pub name: Option<String>,
	/// New bid.
	pub bid_amount: Option<MicroAmount>,
	/// New serving status.
	pub entity_status: Option<EntityStatus>,
}
impl UpdateLineItem {
	/// Binds host parameters `lineItemId` plus any of `lineItemName`, `bidAmount`,
	/// `entityStatus`.
	pub fn from_params(params: &Value) -> Result<Self, ConfigError> {
		#[derive(Deserialize)]
		#[serde(rename_all = "camelCase")]
		struct Params {
			#[serde(default)]
			line_item_id: String,
			line_item_name: Option<String>,
			bid_amount: Option<AmountInput>,
			entity_status: Option<EntityStatus>,
		}

		let raw: Params = parse_params(params)?;
		let update = Self {
			line_item_id: value::identifier("lineItemId", &raw.line_item_id)?,
			name: raw
				.line_item_name
				.map(|name| value::required("lineItemName", name))
				.transpose()?,
			bid_amount: raw.bid_amount.map(|bid| bid.to_micros("bidAmount")).transpose()?,
			entity_status: raw.entity_status,
		};

		if update.name.is_none() && update.bid_amount.is_none() && update.entity_status.is_none()
		{
			return Err(ConfigError::MissingParameter { name: "updateFields" });
		}

		Ok(update)
	}

	/// Builds the request with only the supplied fields.
	pub fn plan(
		&self,
		config: &AdsConfig,
		account: &AccountId,
	) -> Result<PlannedCall, ConfigError> {
		let url = config.endpoint([
			"accounts",
			account.as_ref(),
			"line_items",
			self.line_item_id.as_ref(),
		])?;
		let mut body = Map::new();

		if let Some(name) = &self.name {
			body.insert("name".into(), name.as_str().into());
		}
		if let Some(bid) = self.bid_amount {
			body.insert("bid_amount_local_micro".into(), bid.to_string().into());
		}
		if let Some(status) = self.entity_status {
			body.insert("entity_status".into(), status.as_str().into());
		}

		Ok(PlannedCall::put(url, Value::Object(body)))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config() -> AdsConfig {
		AdsConfig::builder().build().expect("Default config should build.")
	}

	fn account() -> AccountId {
		AccountId::new("18ce54d4x5t").expect("Account fixture should be valid.")
	}

	#[test]
	fn create_uses_fixed_placement_and_bid() {
		let call = CreateLineItem::from_params(&json!({
			"campaignId": "8wku2",
			"lineItemName": "Followers LI",
			"objective": "FOLLOWERS",
		}))
		.expect("Line item should bind.")
		.plan(&config(), &account())
		.expect("Line item should plan.");

		assert_eq!(call.method, http::Method::POST);
		assert_eq!(
			call.url.as_str(),
			"https://ads-api.twitter.com/12/accounts/18ce54d4x5t/line_items"
		);
		assert_eq!(
			call.body,
			Some(json!({
				"campaign_id": "8wku2",
				"name": "Followers LI",
				"product_type": "PROMOTED_TWEETS",
				"placements": ["ALL_ON_TWITTER"],
				"objective": "FOLLOWERS",
				"bid_amount_local_micro": "1000000",
				"entity_status": "PAUSED",
			})),
		);
	}

	#[test]
	fn create_requires_an_objective() {
		let err = CreateLineItem::from_params(&json!({
			"campaignId": "8wku2",
			"lineItemName": "No objective",
		}))
		.expect_err("Missing objective must be rejected.");

		assert!(matches!(err, ConfigError::MissingParameter { name: "objective" }));

		let err = CreateLineItem::from_params(&json!({
			"campaignId": "8wku2",
			"lineItemName": "  ",
			"objective": "WEBSITE_CLICKS",
		}))
		.expect_err("Blank name must be rejected.");

		assert!(matches!(err, ConfigError::MissingParameter { name: "lineItemName" }));
	}

	#[test]
	fn update_targets_the_line_item_path() {
		let call = UpdateLineItem::from_params(&json!({
			"lineItemId": "li9",
			"bidAmount": 2.5,
		}))
		.expect("Update should bind.")
		.plan(&config(), &account())
		.expect("Update should plan.");

		assert_eq!(call.method, http::Method::PUT);
		assert_eq!(
			call.url.as_str(),
			"https://ads-api.twitter.com/12/accounts/18ce54d4x5t/line_items/li9"
		);
		assert_eq!(call.body, Some(json!({ "bid_amount_local_micro": "2500000" })));
	}
}
