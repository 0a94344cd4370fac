//! The predicate and type schema for the fraud graph.
//!
//! Clients own accounts, accounts carry transactions, and investigation
//! cases group flagged transactions with their evidence. The schema is a
//! single DQL alter payload ([`FRAUD_SCHEMA`]) so the whole contract is
//! asserted by tests and applied in one server round trip.
//!
//! Index choices follow the read paths: `term` for human-searchable text
//! (names, merchants, case titles), `hash` for exact identifier lookup
//! (emails, CURP, account numbers), `exact` for enum-like status fields,
//! `hour` for time-bucketed transaction scans. Edges that are traversed in
//! both directions carry `@reverse`.

use tracing::info;

use super::GraphStore;
use crate::error::Result;

/// The full graph schema: predicates first, then the node types over them.
pub const FRAUD_SCHEMA: &str = "\
username: string @index(hash) .
email: string @index(hash) .

client_name: string @index(term) .
client_email: string @index(hash) .
curp: string @index(hash) .

account_number: string @index(hash) .
account_type: string @index(exact) .
balance: float .

amount: float .
currency: string .
merchant: string @index(term) .
timestamp: datetime @index(hour) .
status: string @index(exact) .

case_status: string @index(exact) .
case_title: string @index(term) .
created_at: datetime .
note: string .
evidence_type: string .
evidence_url: string .

owns_account: uid @reverse .
has_transaction: uid @reverse .
includes_transaction: uid @reverse .
created_by: uid .
has_evidence: uid @reverse .

type Client {
	client_name
	client_email
	curp
	owns_account
}

type Account {
	account_number
	account_type
	balance
	has_transaction
}

type Transaction {
	amount
	currency
	merchant
	timestamp
	status
}

type InvestigationCase {
	case_title
	case_status
	created_at
	created_by
	includes_transaction
	has_evidence
}

type Evidence {
	note
	evidence_type
	evidence_url
}

type User {
	username
	email
}
";

/// Apply the fraud schema to the graph store.
///
/// Alters are additive and idempotent on the server side: re-applying the
/// same schema is a no-op, and existing predicates keep their data.
pub async fn provision(store: &mut GraphStore) -> Result<()> {
	store.set_schema(FRAUD_SCHEMA).await?;
	info!(target = %store.target(), "graph schema provisioned");
	Ok(())
}
