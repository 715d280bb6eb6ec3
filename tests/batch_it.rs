// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use twitter_ads_adapter::{
	_preludet::*,
	batch::{BatchItem, FailurePolicy},
};

fn items() -> Vec<BatchItem> {
	vec![
		BatchItem::new("campaign", "get", json!({ "campaignId": "c1" })),
		BatchItem::new("campaign", "get", json!({ "campaignId": "missing" })),
		BatchItem::new("analytics", "delete", json!({})),
		BatchItem::new("campaign", "get", json!({ "campaignId": "c3" })),
	]
}

async fn mock_campaigns(server: &MockServer) -> (Mock<'_>, Mock<'_>, Mock<'_>) {
	let found = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/12/accounts/{TEST_ACCOUNT_ID}/campaigns/c1"));
			then.status(200).json_body(json!({ "data": { "id": "c1" } }));
		})
		.await;
	let missing = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/12/accounts/{TEST_ACCOUNT_ID}/campaigns/missing"));
			then.status(404).json_body(json!({
				"errors": [{ "code": "NOT_FOUND", "message": "Campaign not found" }],
			}));
		})
		.await;
	let last = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/12/accounts/{TEST_ACCOUNT_ID}/campaigns/c3"));
			then.status(200).body("");
		})
		.await;

	(found, missing, last)
}

#[tokio::test]
async fn halt_returns_the_first_error() {
	let server = MockServer::start_async().await;
	let dispatcher = build_reqwest_test_dispatcher(&format!("{}/12", server.base_url()));
	let (found, missing, last) = mock_campaigns(&server).await;
	let err = dispatcher
		.run_batch(&items(), FailurePolicy::Halt)
		.await
		.expect_err("Halting batches must surface the first failure.");

	assert_eq!(err.to_string(), "Twitter Ads API Error: Campaign not found.");

	found.assert_calls_async(1).await;
	missing.assert_calls_async(1).await;
	last.assert_calls_async(0).await;
}

#[tokio::test]
async fn continue_on_error_records_each_failure() {
	let server = MockServer::start_async().await;
	let dispatcher = build_reqwest_test_dispatcher(&format!("{}/12", server.base_url()));
	let (found, missing, last) = mock_campaigns(&server).await;
	let outputs = dispatcher
		.run_batch(&items(), FailurePolicy::ContinueOnError)
		.await
		.expect("Continuing batches should not fail.");

	assert_eq!(
		outputs,
		[
			json!({ "data": { "id": "c1" } }),
			json!({ "error": "Twitter Ads API Error: Campaign not found." }),
			json!({ "error": "Operation `delete` is not supported for resource `analytics`." }),
			json!({}),
		],
	);

	found.assert_calls_async(1).await;
	missing.assert_calls_async(1).await;
	last.assert_calls_async(1).await;
}
