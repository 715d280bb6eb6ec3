//! Demonstrates creating a paused campaign, attaching a follower-targeted line item, and
//! reading its engagement stats against a local stand-in for the Ads API.

// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use twitter_ads_adapter::{
	auth::AdsCredentials,
	batch::{BatchItem, FailurePolicy},
	config::AdsConfig,
	dispatch::Dispatcher,
	http::ReqwestHttpClient,
};

const CREDENTIALS: &str = r#"{
	"consumerKey": "demo-consumer",
	"consumerSecret": "demo-consumer-secret",
	"accessToken": "demo-token",
	"accessTokenSecret": "demo-token-secret",
	"accountId": "18ce54d4x5t"
}"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let campaign_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/12/accounts/18ce54d4x5t/campaigns");
			then.status(200)
				.json_body(json!({ "data": { "id": "8wku2", "entity_status": "PAUSED" } }));
		})
		.await;
	let line_item_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/12/accounts/18ce54d4x5t/line_items");
			then.status(200).json_body(json!({ "data": { "id": "li9" } }));
		})
		.await;
	let targeting_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/12/accounts/18ce54d4x5t/targeting_criteria");
			then.status(200)
				.json_body(json!({ "data": { "targeting_type": "SIMILAR_TO_FOLLOWERS" } }));
		})
		.await;
	let stats_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/12/stats/accounts/18ce54d4x5t");
			then.status(200).json_body(json!({ "data": [{ "id": "8wku2", "id_data": [] }] }));
		})
		.await;
	let credentials = AdsCredentials::from_json(CREDENTIALS)?;
	let config = AdsConfig::builder().base_url_str(&format!("{}/12", server.base_url()))?.build()?;
	let transport = ReqwestHttpClient::with_timeout(Duration::from_secs(10))?;
	let dispatcher: Dispatcher<ReqwestHttpClient> =
		Dispatcher::with_http_client(credentials, config, transport);
	let campaign = dispatcher
		.execute_labels(
			"campaign",
			"create",
			&json!({
				"name": "Spring Sale",
				"fundingInstrumentId": "fi123",
				"dailyBudget": 100,
				"startTime": "2025-01-01T00:00:00Z",
			}),
		)
		.await?;

	println!("Created campaign: {campaign}.");

	let outputs = dispatcher
		.run_batch(
			&[
				BatchItem::new(
					"lineItem",
					"create",
					json!({
						"campaignId": "8wku2",
						"lineItemName": "Spring Sale followers",
						"objective": "FOLLOWERS",
					}),
				),
				BatchItem::new(
					"targeting",
					"addFollowers",
					json!({ "lineItemId": "li9", "targetAccounts": "@rustlang, tokio_rs" }),
				),
				BatchItem::new(
					"analytics",
					"getStats",
					json!({ "entityType": "CAMPAIGN", "entityIds": "8wku2" }),
				),
			],
			FailurePolicy::ContinueOnError,
		)
		.await?;

	for output in outputs {
		println!("Batch output: {output}.");
	}

	campaign_mock.assert_async().await;
	line_item_mock.assert_async().await;
	targeting_mock.assert_calls_async(2).await;
	stats_mock.assert_async().await;

	Ok(())
}
