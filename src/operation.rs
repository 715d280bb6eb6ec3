//! Typed Ads API operations and the requests they expand into.
//!
//! The host names work as a `(resource, operation)` label pair plus a JSON parameter
//! object. [`Operation::bind_labels`] parses the labels into [`Resource`] and
//! [`OperationKind`], and [`Operation::bind`] maps every pair onto its dedicated builder
//! (or [`Error::UnsupportedOperation`]) through an exhaustive match. Each bound
//! [`Operation`] then plans a [`RequestPlan`]: one call, or an ordered fan-out.

pub mod analytics;
pub mod campaign;
pub mod line_item;
pub mod targeting;
pub mod value;

pub use analytics::*;
pub use campaign::*;
pub use line_item::*;
pub use targeting::*;
pub use value::*;

// crates.io
use http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::{_prelude::*, auth::AccountId, config::AdsConfig, error::ConfigError};

/// Resource families exposed to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
	/// Campaigns.
	Campaign,
	/// Line items within a campaign.
	LineItem,
	/// Targeting criteria attached to a line item.
	Targeting,
	/// Engagement statistics.
	Analytics,
}
impl Resource {
	/// Every resource, in declaration order.
	pub const ALL: [Self; 4] =
		[Self::Campaign, Self::LineItem, Self::Targeting, Self::Analytics];

	/// Host label for the resource.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Campaign => "campaign",
			Self::LineItem => "lineItem",
			Self::Targeting => "targeting",
			Self::Analytics => "analytics",
		}
	}

	/// Parses a host label.
	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|resource| resource.as_str() == label)
	}
}
impl Display for Resource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Operation verbs exposed to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Create an entity.
	Create,
	/// Fetch an entity.
	Get,
	/// Modify an entity.
	Update,
	/// Add follower look-alike targeting.
	AddFollowers,
	/// Fetch engagement statistics.
	GetStats,
}
impl OperationKind {
	/// Every operation, in declaration order.
	pub const ALL: [Self; 5] =
		[Self::Create, Self::Get, Self::Update, Self::AddFollowers, Self::GetStats];

	/// Host label for the operation.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Create => "create",
			Self::Get => "get",
			Self::Update => "update",
			Self::AddFollowers => "addFollowers",
			Self::GetStats => "getStats",
		}
	}

	/// Parses a host label.
	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == label)
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A bound, validated operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
	/// `campaign` / `create`.
	CreateCampaign(CreateCampaign),
	/// `campaign` / `get`.
	GetCampaign(GetCampaign),
	/// `campaign` / `update`.
	UpdateCampaign(UpdateCampaign),
	/// `lineItem` / `create`.
	CreateLineItem(CreateLineItem),
	/// `lineItem` / `update`.
	UpdateLineItem(UpdateLineItem),
	/// `targeting` / `addFollowers`.
	AddFollowerTargeting(AddFollowerTargeting),
	/// `analytics` / `getStats`.
	GetStats(GetStats),
}
impl Operation {
	/// Parses host labels and binds `params`.
	pub fn bind_labels(resource: &str, operation: &str, params: &Value) -> Result<Self> {
		match (Resource::from_label(resource), OperationKind::from_label(operation)) {
			(Some(resource), Some(kind)) => Self::bind(resource, kind, params),
			_ => Err(Error::unsupported(resource, operation)),
		}
	}

	/// Binds `params` to the builder for `(resource, kind)`.
	pub fn bind(resource: Resource, kind: OperationKind, params: &Value) -> Result<Self> {
		use OperationKind as K;

		let unsupported = || Err(Error::unsupported(resource.as_str(), kind.as_str()));
		let operation = match resource {
			Resource::Campaign => match kind {
				K::Create => Self::CreateCampaign(CreateCampaign::from_params(params)?),
				K::Get => Self::GetCampaign(GetCampaign::from_params(params)?),
				K::Update => Self::UpdateCampaign(UpdateCampaign::from_params(params)?),
				K::AddFollowers | K::GetStats => return unsupported(),
			},
			Resource::LineItem => match kind {
				K::Create => Self::CreateLineItem(CreateLineItem::from_params(params)?),
				K::Update => Self::UpdateLineItem(UpdateLineItem::from_params(params)?),
				K::Get | K::AddFollowers | K::GetStats => return unsupported(),
			},
			Resource::Targeting => match kind {
				K::AddFollowers =>
					Self::AddFollowerTargeting(AddFollowerTargeting::from_params(params)?),
				K::Create | K::Get | K::Update | K::GetStats => return unsupported(),
			},
			Resource::Analytics => match kind {
				K::GetStats => Self::GetStats(GetStats::from_params(params)?),
				K::Create | K::Get | K::Update | K::AddFollowers => return unsupported(),
			},
		};

		Ok(operation)
	}

	/// Stable `resource.operation` label for spans and metrics.
	pub const fn label(&self) -> &'static str {
		match self {
			Self::CreateCampaign(_) => "campaign.create",
			Self::GetCampaign(_) => "campaign.get",
			Self::UpdateCampaign(_) => "campaign.update",
			Self::CreateLineItem(_) => "line_item.create",
			Self::UpdateLineItem(_) => "line_item.update",
			Self::AddFollowerTargeting(_) => "targeting.add_followers",
			Self::GetStats(_) => "analytics.get_stats",
		}
	}

	/// Expands the operation into the HTTP calls it needs.
	pub fn plan(
		&self,
		config: &AdsConfig,
		account: &AccountId,
	) -> Result<RequestPlan, ConfigError> {
		let plan = match self {
			Self::CreateCampaign(op) => RequestPlan::Single(op.plan(config, account)?),
			Self::GetCampaign(op) => RequestPlan::Single(op.plan(config, account)?),
			Self::UpdateCampaign(op) => RequestPlan::Single(op.plan(config, account)?),
			Self::CreateLineItem(op) => RequestPlan::Single(op.plan(config, account)?),
			Self::UpdateLineItem(op) => RequestPlan::Single(op.plan(config, account)?),
			Self::AddFollowerTargeting(op) => RequestPlan::FanOut(op.plan(config, account)?),
			Self::GetStats(op) => RequestPlan::Single(op.plan(config, account)?),
		};

		Ok(plan)
	}
}

/// Calls an operation expands into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestPlan {
	/// Exactly one call; its response is the operation's result.
	Single(PlannedCall),
	/// Ordered calls whose responses are aggregated under `data`.
	FanOut(Vec<PlannedCall>),
}
impl RequestPlan {
	/// Calls in issue order.
	pub fn calls(&self) -> &[PlannedCall] {
		match self {
			Self::Single(call) => std::slice::from_ref(call),
			Self::FanOut(calls) => calls,
		}
	}
}

/// One unsigned HTTP call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedCall {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL, query included.
	pub url: Url,
	/// JSON body, when the call carries one.
	pub body: Option<Value>,
}
impl PlannedCall {
	/// `GET` without a body.
	pub fn get(url: Url) -> Self {
		Self { method: Method::GET, url, body: None }
	}

	/// `POST` with a JSON body.
	pub fn post(url: Url, body: Value) -> Self {
		Self { method: Method::POST, url, body: Some(body) }
	}

	/// `PUT` with a JSON body.
	pub fn put(url: Url, body: Value) -> Self {
		Self { method: Method::PUT, url, body: Some(body) }
	}
}

/// Deserializes an operation's parameter struct, keeping the failing JSON path.
///
/// `null` is read as an empty object so missing fields surface as missing parameters.
pub(crate) fn parse_params<T>(params: &Value) -> Result<T, ConfigError>
where
	T: DeserializeOwned,
{
	let empty = Value::Object(Default::default());
	let params = if params.is_null() { &empty } else { params };

	serde_path_to_error::deserialize(params)
		.map_err(|source| ConfigError::InvalidParameters { source })
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn labels_round_trip() {
		for resource in Resource::ALL {
			assert_eq!(Resource::from_label(resource.as_str()), Some(resource));
		}
		for kind in OperationKind::ALL {
			assert_eq!(OperationKind::from_label(kind.as_str()), Some(kind));
		}

		assert_eq!(Resource::from_label("Campaign"), None);
		assert_eq!(OperationKind::from_label("delete"), None);
	}

	#[test]
	fn unmatched_pairs_are_rejected() {
		let supported = [
			(Resource::Campaign, OperationKind::Create),
			(Resource::Campaign, OperationKind::Get),
			(Resource::Campaign, OperationKind::Update),
			(Resource::LineItem, OperationKind::Create),
			(Resource::LineItem, OperationKind::Update),
			(Resource::Targeting, OperationKind::AddFollowers),
			(Resource::Analytics, OperationKind::GetStats),
		];

		for resource in Resource::ALL {
			for kind in OperationKind::ALL {
				if supported.contains(&(resource, kind)) {
					continue;
				}

				let err = Operation::bind(resource, kind, &json!({}))
					.expect_err("Unsupported pair must not bind.");

				assert!(
					matches!(
						&err,
						Error::UnsupportedOperation { resource: r, operation: o }
							if r == resource.as_str() && o == kind.as_str()
					),
					"Unexpected error for {resource}/{kind}: {err}",
				);
			}
		}
	}

	#[test]
	fn unknown_labels_are_unsupported() {
		let err = Operation::bind_labels("audience", "create", &json!({}))
			.expect_err("Unknown resource must not bind.");

		assert_eq!(
			err.to_string(),
			"Operation `create` is not supported for resource `audience`."
		);
	}

	#[test]
	fn plan_shapes_follow_the_operation() {
		let config = AdsConfig::builder().build().expect("Default config should build.");
		let account = AccountId::new("a1").expect("Account fixture should be valid.");
		let targeting = Operation::bind_labels(
			"targeting",
			"addFollowers",
			&json!({ "lineItemId": "li1", "targetAccounts": "alice,bob" }),
		)
		.expect("Targeting should bind.");
		let plan = targeting.plan(&config, &account).expect("Targeting should plan.");

		assert!(matches!(plan, RequestPlan::FanOut(ref calls) if calls.len() == 2));
		assert_eq!(plan.calls().len(), 2);
		assert_eq!(targeting.label(), "targeting.add_followers");

		let stats = Operation::bind_labels(
			"analytics",
			"getStats",
			&json!({ "entityType": "CAMPAIGN", "entityIds": "c1" }),
		)
		.expect("Stats should bind.");

		assert!(matches!(
			stats.plan(&config, &account).expect("Stats should plan."),
			RequestPlan::Single(ref call) if call.method == Method::GET && call.body.is_none()
		));
	}

	#[test]
	fn parameter_type_errors_report_the_path() {
		let err = Operation::bind_labels(
			"lineItem",
			"create",
			&json!({ "campaignId": "c1", "lineItemName": "li", "objective": "CLICKS" }),
		)
		.expect_err("Unknown objective must be rejected.");

		match err {
			Error::Config(ConfigError::InvalidParameters { source }) =>
				assert_eq!(source.path().to_string(), "objective"),
			other => panic!("Unexpected error: {other}."),
		}
	}
}
