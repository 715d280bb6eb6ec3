//! Sequential execution over a list of host items.

// crates.io
use serde_json::{Value, json};
// self
use crate::{_prelude::*, dispatch::Dispatcher, http::AdsHttpClient};

/// One unit of host work: labels plus the parameter object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
	/// Resource label, e.g. `campaign`.
	pub resource: String,
	/// Operation label, e.g. `create`.
	pub operation: String,
	/// Parameter object for the pair.
	#[serde(default)]
	pub params: Value,
}
impl BatchItem {
	/// Creates an item from its labels and parameters.
	pub fn new(resource: impl Into<String>, operation: impl Into<String>, params: Value) -> Self {
		Self { resource: resource.into(), operation: operation.into(), params }
	}
}

/// What a batch does when an item fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
	#[default]
	/// Return the first error; later items are not attempted.
	Halt,
	/// Record `{"error": "<message>"}` as the item's output and move on.
	ContinueOnError,
}

impl<C> Dispatcher<C>
where
	C: ?Sized + AdsHttpClient,
{
	/// Runs `items` one after another, producing one output per processed item.
	pub async fn run_batch(
		&self,
		items: &[BatchItem],
		policy: FailurePolicy,
	) -> Result<Vec<Value>> {
		let mut outputs = Vec::with_capacity(items.len());

		for (index, item) in items.iter().enumerate() {
			match self.execute_labels(&item.resource, &item.operation, &item.params).await {
				Ok(output) => outputs.push(output),
				Err(e) if policy == FailurePolicy::ContinueOnError => {
					#[cfg(feature = "tracing")]
					tracing::warn!(index, error = %e, "Batch item failed; continuing.");

					#[cfg(not(feature = "tracing"))]
					let _ = index;

					outputs.push(json!({ "error": e.to_string() }));
				},
				Err(e) => return Err(e),
			}
		}

		Ok(outputs)
	}
}
