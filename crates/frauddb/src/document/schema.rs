//! The index contract for the fraud document model.
//!
//! Six collections, nineteen indexes. Downstream query performance depends
//! on this exact set, so it is declared as data ([`index_plan`]) and
//! asserted by tests rather than scattered through call sites:
//!
//! - `users`: unique `email`, unique `user_id`
//! - `clients`: `client_id`, nested `identifiers.CURP`, geospatial
//!   `addresses.location` (2dsphere)
//! - `accounts`: `account_id`, `client_id`
//! - `transactions`: compound `(account_id, txn_time desc)` for "latest
//!   activity per account", `txn_time desc` for "latest activity
//!   system-wide", plus `device_id`, `ip_id`, `merchant`, `amount`
//! - `alerts`: `created_at desc`, `severity`, `status`, and `related_txns`
//!   (array-valued, so the index is multikey and supports membership
//!   lookups)
//! - `cases`: `case_id`, `owner_user_id`
//!
//! [`provision`] applies the plan idempotently: creating an index that
//! already exists with the same keys and options is a no-op. Any failure
//! (for example a duplicate key violating a uniqueness constraint on
//! pre-existing data) aborts the run and surfaces the driver error; there
//! is no partial-success bookkeeping or rollback in this one-shot
//! administrative procedure.

use bson::{Bson, Document, doc};
use mongodb::IndexModel;
use mongodb::options::IndexOptions;
use tracing::{debug, info};

use super::DocumentStore;
use crate::error::Result;

/// The six collections of the fraud data model.
pub const COLLECTIONS: [&str; 6] = [
	"users",
	"clients",
	"accounts",
	"transactions",
	"alerts",
	"cases",
];

/// One secondary (or unique) index on a named collection.
#[derive(Debug, Clone)]
pub struct IndexSpec {
	/// Collection the index lives on.
	pub collection: &'static str,
	/// Key document, in index-key order.
	pub keys: Document,
	/// Enforce uniqueness across the collection.
	pub unique: bool,
}

impl IndexSpec {
	fn new(collection: &'static str, keys: Document) -> Self {
		Self {
			collection,
			keys,
			unique: false,
		}
	}

	fn unique(mut self) -> Self {
		self.unique = true;
		self
	}

	/// Index name, following the server's own `field_direction` convention
	/// so that provisioning an unnamed pre-existing index is still a no-op.
	pub fn name(&self) -> String {
		self.keys
			.iter()
			.map(|(key, value)| match value {
				Bson::String(kind) => format!("{key}_{kind}"),
				Bson::Int32(direction) => format!("{key}_{direction}"),
				other => format!("{key}_{other}"),
			})
			.collect::<Vec<_>>()
			.join("_")
	}

	/// Driver-level index model for this spec.
	pub fn model(&self) -> IndexModel {
		let mut options = IndexOptions::builder().name(self.name()).build();
		options.unique = self.unique.then_some(true);

		IndexModel::builder()
			.keys(self.keys.clone())
			.options(options)
			.build()
	}
}

/// The fixed index set. Order matches provisioning order.
pub fn index_plan() -> Vec<IndexSpec> {
	vec![
		// users
		IndexSpec::new("users", doc! { "email": 1 }).unique(),
		IndexSpec::new("users", doc! { "user_id": 1 }).unique(),
		// clients
		IndexSpec::new("clients", doc! { "client_id": 1 }),
		IndexSpec::new("clients", doc! { "identifiers.CURP": 1 }),
		IndexSpec::new("clients", doc! { "addresses.location": "2dsphere" }),
		// accounts
		IndexSpec::new("accounts", doc! { "account_id": 1 }),
		IndexSpec::new("accounts", doc! { "client_id": 1 }),
		// transactions
		IndexSpec::new("transactions", doc! { "account_id": 1, "txn_time": -1 }),
		IndexSpec::new("transactions", doc! { "txn_time": -1 }),
		IndexSpec::new("transactions", doc! { "device_id": 1 }),
		IndexSpec::new("transactions", doc! { "ip_id": 1 }),
		IndexSpec::new("transactions", doc! { "merchant": 1 }),
		IndexSpec::new("transactions", doc! { "amount": 1 }),
		// alerts
		IndexSpec::new("alerts", doc! { "created_at": -1 }),
		IndexSpec::new("alerts", doc! { "severity": 1 }),
		IndexSpec::new("alerts", doc! { "status": 1 }),
		// related_txns holds many transaction ids; the index is multikey
		IndexSpec::new("alerts", doc! { "related_txns": 1 }),
		// cases
		IndexSpec::new("cases", doc! { "case_id": 1 }),
		IndexSpec::new("cases", doc! { "owner_user_id": 1 }),
	]
}

/// Ensure the six collections and the full index set exist.
///
/// Safe to re-run. The first failing call aborts the run with the driver
/// error untouched.
pub async fn provision(store: &DocumentStore) -> Result<()> {
	let db = store.database();

	// The server creates collections implicitly on first insert; forcing
	// them here documents the model and keeps a fresh database complete.
	let existing = db.list_collection_names().await?;
	for name in COLLECTIONS {
		if !existing.iter().any(|collection| collection == name) {
			db.create_collection(name).await?;
			debug!(collection = name, "collection created");
		}
	}

	for spec in index_plan() {
		let collection = db.collection::<Document>(spec.collection);
		collection.create_index(spec.model()).await?;
		debug!(collection = spec.collection, index = %spec.name(), "index ensured");
	}

	info!(
		collections = COLLECTIONS.len(),
		indexes = index_plan().len(),
		"document schema provisioned"
	);
	Ok(())
}
