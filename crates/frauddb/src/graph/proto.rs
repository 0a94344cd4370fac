//! Wire types for the `api.Dgraph` gRPC service.
//!
//! Hand-declared subset of Dgraph's `api.proto` with `prost` derives so the
//! build needs no `protoc` step. Tags and method paths match the upstream
//! definition, so this client speaks to a stock Dgraph alpha; fields this
//! crate does not use are simply left undeclared (prost skips unknown tags
//! on decode).

use std::collections::HashMap;

use crate::error::Result;

/// `CheckVersion` request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Check {}

/// Server version report.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Version {
	#[prost(string, tag = "1")]
	pub tag: String,
}

/// Schema/data mutation applied via `Alter`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Operation {
	/// Schema definition to apply.
	#[prost(string, tag = "1")]
	pub schema: String,
	/// Predicate to drop, when set.
	#[prost(string, tag = "2")]
	pub drop_attr: String,
	/// Drop every predicate and all data.
	#[prost(bool, tag = "3")]
	pub drop_all: bool,
}

/// Opaque `Alter` acknowledgement.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Payload {
	#[prost(bytes = "vec", tag = "1")]
	pub data: Vec<u8>,
}

/// A query (optionally with variables) executed via `Query`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Request {
	#[prost(uint64, tag = "1")]
	pub start_ts: u64,
	#[prost(string, tag = "4")]
	pub query: String,
	#[prost(map = "string, string", tag = "5")]
	pub vars: HashMap<String, String>,
	#[prost(bool, tag = "6")]
	pub read_only: bool,
	#[prost(bool, tag = "7")]
	pub best_effort: bool,
}

/// Transaction bookkeeping returned with every response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxnContext {
	#[prost(uint64, tag = "1")]
	pub start_ts: u64,
	#[prost(uint64, tag = "2")]
	pub commit_ts: u64,
	#[prost(bool, tag = "3")]
	pub aborted: bool,
	#[prost(string, repeated, tag = "4")]
	pub keys: Vec<String>,
	#[prost(string, repeated, tag = "5")]
	pub preds: Vec<String>,
}

/// `Query` response: result JSON plus the transaction context.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Response {
	#[prost(bytes = "vec", tag = "1")]
	pub json: Vec<u8>,
	#[prost(message, optional, tag = "2")]
	pub txn: Option<TxnContext>,
}

impl Response {
	/// Parse the result bytes as JSON.
	pub fn json_value(&self) -> Result<serde_json::Value> {
		serde_json::from_slice(&self.json)
			.map_err(|e| crate::error::StoreError::Serialization(e.to_string()))
	}
}
