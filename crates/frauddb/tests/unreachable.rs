//! Every connector must reject an unreachable target promptly instead of
//! hanging or returning a dead handle.

use std::time::Duration;

use frauddb::StoreError;
use tokio::time::timeout;

const TEST_DEADLINE: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

// Port 1 is reserved and refused on loopback.
const DEAD_TARGET: &str = "127.0.0.1:1";

#[cfg(feature = "document")]
#[tokio::test]
async fn document_store_rejects_unreachable_target() {
	use frauddb::document::DocumentStore;

	let result = timeout(
		TEST_DEADLINE,
		DocumentStore::builder()
			.uri(format!("mongodb://{DEAD_TARGET}/?directConnection=true"))
			.server_selection_timeout(CONNECT_TIMEOUT)
			.connect_timeout(CONNECT_TIMEOUT)
			.build(),
	)
	.await
	.expect("connect must settle, not hang");

	assert!(matches!(result, Err(StoreError::Connection(_))));
}

#[cfg(feature = "widecolumn")]
#[tokio::test]
async fn wide_column_store_rejects_unreachable_target() {
	use frauddb::settings::WideColumnConfig;
	use frauddb::widecolumn::WideColumnStore;

	let config = WideColumnConfig::default()
		.contact_points([DEAD_TARGET])
		.connect_timeout(CONNECT_TIMEOUT);

	let result = timeout(TEST_DEADLINE, WideColumnStore::connect(config))
		.await
		.expect("connect must settle, not hang");

	assert!(matches!(result, Err(StoreError::Connection(_))));
}

#[cfg(feature = "graph")]
#[tokio::test]
async fn graph_store_rejects_unreachable_target() {
	use frauddb::graph::GraphStore;
	use frauddb::settings::GraphConfig;

	let config = GraphConfig::default()
		.target(DEAD_TARGET)
		.allow_insecure(true)
		.connect_timeout(CONNECT_TIMEOUT);

	let result = timeout(TEST_DEADLINE, GraphStore::connect(config))
		.await
		.expect("connect must settle, not hang");

	assert!(matches!(result, Err(StoreError::Connection(_))));
}

#[cfg(feature = "graph")]
#[tokio::test]
async fn graph_store_refuses_plaintext_without_opt_in() {
	use frauddb::graph::GraphStore;
	use frauddb::settings::GraphConfig;

	// Misconfiguration is caught before any dialing happens.
	let config = GraphConfig::default().target("http://127.0.0.1:9080");
	let result = GraphStore::connect(config).await;
	assert!(matches!(result, Err(StoreError::Config(_))));
}
