//! The table contract for the fraud wide-column model.
//!
//! Three tables inside the `fraudks` keyspace, declared as data
//! ([`table_plan`]) so tests can assert the layout instead of parsing DDL
//! out of call sites:
//!
//! - `transaction_history`: per-account transaction log, partitioned by
//!   `account_number` and clustered newest-first on `timestamp` so "latest
//!   activity for an account" is a single-partition slice.
//! - `daily_totals`: per-account daily aggregates for reporting.
//! - `alerts`: fraud alerts keyed by `alert_id`.
//!
//! [`provision`] applies the plan idempotently: every statement is
//! `CREATE TABLE IF NOT EXISTS`, so re-running against a provisioned
//! keyspace is a no-op. The first failing statement aborts the run with
//! the driver error untouched.

use tracing::{debug, info};

use super::WideColumnStore;
use crate::error::Result;

/// One table in the fraud keyspace.
#[derive(Debug, Clone)]
pub struct TableSpec {
	/// Table name.
	pub name: &'static str,
	/// `(column, cql_type)` pairs, in declaration order.
	pub columns: &'static [(&'static str, &'static str)],
	/// Partition key columns.
	pub partition_key: &'static [&'static str],
	/// Clustering key columns.
	pub clustering_key: &'static [&'static str],
	/// Cluster newest-first on the (single) clustering column.
	pub newest_first: bool,
}

impl TableSpec {
	/// Render the idempotent `CREATE TABLE` statement for this table.
	pub fn ddl(&self) -> String {
		let columns = self
			.columns
			.iter()
			.map(|(name, cql_type)| format!("{name} {cql_type}"))
			.collect::<Vec<_>>()
			.join(", ");

		let partition = self.partition_key.join(", ");
		let primary_key = if self.clustering_key.is_empty() {
			format!("(({partition}))")
		} else {
			format!("(({partition}), {})", self.clustering_key.join(", "))
		};

		let mut ddl = format!(
			"CREATE TABLE IF NOT EXISTS {} ({columns}, PRIMARY KEY {primary_key})",
			self.name
		);
		if self.newest_first {
			ddl.push_str(&format!(
				" WITH CLUSTERING ORDER BY ({} DESC)",
				self.clustering_key[0]
			));
		}
		ddl
	}
}

/// The fixed table set. Order matches provisioning order.
pub fn table_plan() -> Vec<TableSpec> {
	vec![
		TableSpec {
			name: "transaction_history",
			columns: &[
				("account_number", "text"),
				("timestamp", "timestamp"),
				("transaction_id", "uuid"),
				("amount", "decimal"),
				("currency", "text"),
				("merchant", "text"),
				("status", "text"),
				("raw_payload", "text"),
			],
			partition_key: &["account_number"],
			clustering_key: &["timestamp"],
			newest_first: true,
		},
		TableSpec {
			name: "daily_totals",
			columns: &[
				("account_number", "text"),
				("date", "date"),
				("total_amount", "decimal"),
				("transaction_count", "int"),
			],
			partition_key: &["account_number"],
			clustering_key: &["date"],
			newest_first: false,
		},
		TableSpec {
			name: "alerts",
			columns: &[
				("alert_id", "uuid"),
				("timestamp", "timestamp"),
				("account_number", "text"),
				("transaction_id", "uuid"),
				("reason", "text"),
			],
			partition_key: &["alert_id"],
			clustering_key: &[],
			newest_first: false,
		},
	]
}

/// Ensure the three fraud tables exist in the session's keyspace.
///
/// Safe to re-run. The first failing statement aborts the run with the
/// driver error untouched.
pub async fn provision(store: &WideColumnStore) -> Result<()> {
	for spec in table_plan() {
		store.session().query_unpaged(spec.ddl(), ()).await?;
		debug!(table = spec.name, "table ensured");
	}

	info!(
		keyspace = store.keyspace(),
		tables = table_plan().len(),
		"wide-column schema provisioned"
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn test_plan_is_exactly_the_contract() {
		let plan = table_plan();
		assert_eq!(plan.len(), 3);

		let names: Vec<&str> = plan.iter().map(|spec| spec.name).collect();
		assert_eq!(names, ["transaction_history", "daily_totals", "alerts"]);
	}

	#[test]
	fn test_every_statement_is_idempotent() {
		for spec in table_plan() {
			let ddl = spec.ddl();
			assert!(
				ddl.starts_with(&format!("CREATE TABLE IF NOT EXISTS {}", spec.name)),
				"{ddl}"
			);
		}
	}

	#[test]
	fn test_transaction_history_clusters_newest_first() {
		let spec = table_plan()
			.into_iter()
			.find(|spec| spec.name == "transaction_history")
			.unwrap();

		assert_eq!(spec.partition_key, ["account_number"]);
		assert_eq!(spec.clustering_key, ["timestamp"]);
		assert!(spec.newest_first);

		let ddl = spec.ddl();
		assert!(ddl.contains("PRIMARY KEY ((account_number), timestamp)"), "{ddl}");
		assert!(ddl.ends_with("WITH CLUSTERING ORDER BY (timestamp DESC)"), "{ddl}");
	}

	#[rstest]
	#[case("transaction_history", &["account_number", "timestamp", "transaction_id", "amount", "currency", "merchant", "status", "raw_payload"])]
	#[case("daily_totals", &["account_number", "date", "total_amount", "transaction_count"])]
	#[case("alerts", &["alert_id", "timestamp", "account_number", "transaction_id", "reason"])]
	fn test_columns_per_table(#[case] table: &str, #[case] expected: &[&str]) {
		let spec = table_plan()
			.into_iter()
			.find(|spec| spec.name == table)
			.unwrap();
		let columns: Vec<&str> = spec.columns.iter().map(|(name, _)| *name).collect();
		assert_eq!(columns, expected);
	}

	#[test]
	fn test_daily_totals_keyed_by_account_and_date() {
		let spec = table_plan()
			.into_iter()
			.find(|spec| spec.name == "daily_totals")
			.unwrap();
		assert_eq!(spec.partition_key, ["account_number"]);
		assert_eq!(spec.clustering_key, ["date"]);
		assert!(!spec.newest_first);
		assert!(spec.ddl().contains("PRIMARY KEY ((account_number), date)"));
	}

	#[test]
	fn test_alerts_keyed_by_alert_id_alone() {
		let spec = table_plan()
			.into_iter()
			.find(|spec| spec.name == "alerts")
			.unwrap();
		assert_eq!(spec.partition_key, ["alert_id"]);
		assert!(spec.clustering_key.is_empty());
		assert!(spec.ddl().contains("PRIMARY KEY ((alert_id))"));
	}
}
