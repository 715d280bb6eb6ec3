//! Campaign create, get, and update requests.

// crates.io
use serde_json::{Map, Value, json};
// self
use crate::{
	_prelude::*,
	auth::{AccountId, CampaignId, FundingInstrumentId},
	config::AdsConfig,
	error::ConfigError,
	operation::{AmountInput, MicroAmount, PlannedCall, parse_params, value},
};

/// Serving status accepted on create and update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
	/// Serving.
	Active,
	#[default]
	/// Not serving. New entities always start here.
	Paused,
}
impl EntityStatus {
	/// Wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Active => "ACTIVE",
			Self::Paused => "PAUSED",
		}
	}
}

/// `POST accounts/{account}/campaigns`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateCampaign {
	/// Campaign name.
	pub name: String,
	/// Funding instrument billed for the campaign.
	pub funding_instrument_id: FundingInstrumentId,
	/// Daily budget.
	pub daily_budget: MicroAmount,
	/// Start instant, already normalized to `YYYY-MM-DDTHH:MM:SS.mmmZ`.
	pub start_time: String,
}
impl CreateCampaign {
	/// Binds host parameters `name`, `fundingInstrumentId`, `dailyBudget`, `startTime`.
	pub fn from_params(params: &Value) -> Result<Self, ConfigError> {
		#[derive(Deserialize)]
		#[serde(rename_all = "camelCase")]
		struct Params {
			#[serde(default)]
			name: String,
			#[serde(default)]
			funding_instrument_id: String,
			daily_budget: Option<AmountInput>,
			#[serde(default)]
			start_time: String,
		}

		let raw: Params = parse_params(params)?;

		Ok(Self {
			name: value::required("name", raw.name)?,
			funding_instrument_id: value::identifier(
				"fundingInstrumentId",
				&raw.funding_instrument_id,
			)?,
			daily_budget: raw
				.daily_budget
				.ok_or(ConfigError::MissingParameter { name: "dailyBudget" })?
				.to_micros("dailyBudget")?,
			start_time: value::normalize_timestamp("startTime", &raw.start_time)?,
		})
	}

	/// Builds the request; the campaign is created paused.
	pub fn plan(
		&self,
		config: &AdsConfig,
		account: &AccountId,
	) -> Result<PlannedCall, ConfigError> {
		let url = config.endpoint(["accounts", account.as_ref(), "campaigns"])?;
		let body = json!({
			"name": self.name,
			"funding_instrument_id": self.funding_instrument_id,
			"daily_budget_amount_local_micro": self.daily_budget.to_string(),
			"start_time": self.start_time,
			"entity_status": EntityStatus::Paused.as_str(),
		});

		Ok(PlannedCall::post(url, body))
	}
}

/// `GET accounts/{account}/campaigns/{campaign}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetCampaign {
	/// Campaign to fetch.
	pub campaign_id: CampaignId,
}
impl GetCampaign {
	/// Binds host parameter `campaignId`.
	pub fn from_params(params: &Value) -> Result<Self, ConfigError> {
		#[derive(Deserialize)]
		#[serde(rename_all = "camelCase")]
		struct Params {
			#[serde(default)]
			campaign_id: String,
		}

		let raw: Params = parse_params(params)?;

		Ok(Self { campaign_id: value::identifier("campaignId", &raw.campaign_id)? })
	}

	/// Builds the request.
	pub fn plan(
		&self,
		config: &AdsConfig,
		account: &AccountId,
	) -> Result<PlannedCall, ConfigError> {
		let url = config.endpoint([
			"accounts",
			account.as_ref(),
			"campaigns",
			self.campaign_id.as_ref(),
		])?;

		Ok(PlannedCall::get(url))
	}
}

/// `PUT accounts/{account}/campaigns/{campaign}` with the fields being changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateCampaign {
	/// Campaign to modify.
	pub campaign_id: CampaignId,
	/// New name.
	pub name: Option<String>,
	/// New daily budget.
	pub daily_budget: Option<MicroAmount>,
	/// New serving status.
	pub entity_status: Option<EntityStatus>,
}
impl UpdateCampaign {
	/// Binds host parameters `campaignId` plus any of `name`, `dailyBudget`, `entityStatus`.
	pub fn from_params(params: &Value) -> Result<Self, ConfigError> {
		#[derive(Deserialize)]
		#[serde(rename_all = "camelCase")]
		struct Params {
			#[serde(default)]
			campaign_id: String,
			name: Option<String>,
			daily_budget: Option<AmountInput>,
			entity_status: Option<EntityStatus>,
		}

		let raw: Params = parse_params(params)?;
		let update = Self {
			campaign_id: value::identifier("campaignId", &raw.campaign_id)?,
			name: raw.name.map(|name| value::required("name", name)).transpose()?,
			daily_budget: raw
				.daily_budget
				.map(|amount| amount.to_micros("dailyBudget"))
				.transpose()?,
			entity_status: raw.entity_status,
		};

		if update.name.is_none() && update.daily_budget.is_none() && update.entity_status.is_none()
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
			"campaigns",
			self.campaign_id.as_ref(),
		])?;
		let mut body = Map::new();

		if let Some(name) = &self.name {
			body.insert("name".into(), name.as_str().into());
		}
		if let Some(budget) = self.daily_budget {
			body.insert("daily_budget_amount_local_micro".into(), budget.to_string().into());
		}
		if let Some(status) = self.entity_status {
			body.insert("entity_status".into(), status.as_str().into());
		}

		Ok(PlannedCall::put(url, Value::Object(body)))
	}
}
