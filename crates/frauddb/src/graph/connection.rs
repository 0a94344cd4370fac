//! Dgraph client over a tonic channel.
//!
//! The channel is TLS by default. The deployment this replaces ran an
//! insecure stub; that was a gap, not a contract, so plaintext now requires
//! the explicit `allow_insecure` opt-in and is logged loudly when taken.
//!
//! `connect` is eager and verifies the server with `CheckVersion`, so an
//! unreachable target rejects instead of handing back a dead stub.

use http::uri::PathAndQuery;
use tonic::client::Grpc;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic_prost::ProstCodec;
use tracing::{info, warn};

use super::proto;
use crate::error::{Result, StoreError};
use crate::settings::GraphConfig;

/// Handle to the fraud graph store.
///
/// # Example
///
/// ```rust,no_run
/// use frauddb::graph::GraphStore;
/// use frauddb::settings::GraphConfig;
///
/// # async fn example() -> frauddb::Result<()> {
/// // Local development: plaintext must be requested explicitly.
/// let config = GraphConfig::default().allow_insecure(true);
/// let mut store = GraphStore::connect(config).await?;
/// let response = store.query("{ q(func: type(Client)) { uid } }").await?;
/// store.close().await;
/// # Ok(())
/// # }
/// ```
pub struct GraphStore {
	grpc: Grpc<Channel>,
	target: String,
}

/// Resolve the channel URI and whether it is TLS-protected.
fn channel_uri(config: &GraphConfig) -> Result<(String, bool)> {
	let target = config.target.trim();

	if let Some(stripped) = target.strip_prefix("http://") {
		if !config.allow_insecure {
			return Err(StoreError::Config(format!(
				"plaintext graph target {stripped:?} requires allow_insecure"
			)));
		}
		return Ok((target.to_string(), false));
	}
	if target.starts_with("https://") {
		return Ok((target.to_string(), true));
	}
	if target.contains("://") {
		return Err(StoreError::Config(format!(
			"unsupported scheme in graph target {target:?}"
		)));
	}

	// Bare host:port; pick the scheme from the security setting.
	if config.allow_insecure {
		Ok((format!("http://{target}"), false))
	} else {
		Ok((format!("https://{target}"), true))
	}
}

impl GraphStore {
	/// Open a channel to the graph store and verify it with `CheckVersion`.
	pub async fn connect(config: GraphConfig) -> Result<Self> {
		let (uri, secure) = channel_uri(&config)?;

		let mut endpoint =
			Endpoint::from_shared(uri.clone())?.connect_timeout(config.connect_timeout);
		if secure {
			endpoint = endpoint.tls_config(ClientTlsConfig::new().with_native_roots())?;
		} else {
			warn!(target = %uri, "graph channel is plaintext (explicit opt-in)");
		}

		let channel = endpoint.connect().await?;
		let mut store = Self {
			grpc: Grpc::new(channel),
			target: uri,
		};

		let version = store.check_version().await?;
		info!(target = %store.target, version = %version.tag, "graph store connected");
		Ok(store)
	}

	/// The resolved channel URI.
	pub fn target(&self) -> &str {
		&self.target
	}

	/// Ask the server for its version.
	pub async fn check_version(&mut self) -> Result<proto::Version> {
		self.unary("/api.Dgraph/CheckVersion", proto::Check::default())
			.await
	}

	/// Apply a schema or drop operation.
	pub async fn alter(&mut self, operation: proto::Operation) -> Result<proto::Payload> {
		self.unary("/api.Dgraph/Alter", operation).await
	}

	/// Apply a schema definition.
	pub async fn set_schema(&mut self, schema: impl Into<String>) -> Result<proto::Payload> {
		self.alter(proto::Operation {
			schema: schema.into(),
			..Default::default()
		})
		.await
	}

	/// Run a read-only query.
	pub async fn query(&mut self, query: impl Into<String>) -> Result<proto::Response> {
		let request = proto::Request {
			query: query.into(),
			read_only: true,
			..Default::default()
		};
		self.unary("/api.Dgraph/Query", request).await
	}

	/// Run a read-only query with named variables.
	pub async fn query_with_vars(
		&mut self,
		query: impl Into<String>,
		vars: std::collections::HashMap<String, String>,
	) -> Result<proto::Response> {
		let request = proto::Request {
			query: query.into(),
			vars,
			read_only: true,
			..Default::default()
		};
		self.unary("/api.Dgraph/Query", request).await
	}

	/// Close the channel.
	pub async fn close(self) {
		// tonic tears the HTTP/2 connection down once the last channel
		// clone drops; the method keeps open/close paired at call sites.
		drop(self.grpc);
	}

	async fn unary<M1, M2>(&mut self, path: &'static str, message: M1) -> Result<M2>
	where
		M1: prost::Message + 'static,
		M2: prost::Message + Default + 'static,
	{
		self.grpc
			.ready()
			.await
			.map_err(|e| StoreError::Connection(format!("graph service not ready: {e}")))?;

		let codec: ProstCodec<M1, M2> = ProstCodec::default();
		let response = self
			.grpc
			.unary(
				tonic::Request::new(message),
				PathAndQuery::from_static(path),
				codec,
			)
			.await?;
		Ok(response.into_inner())
	}
}

impl std::fmt::Debug for GraphStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GraphStore")
			.field("target", &self.target)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bare_target_defaults_to_tls() {
		let config = GraphConfig::default();
		let (uri, secure) = channel_uri(&config).unwrap();
		assert_eq!(uri, "https://127.0.0.1:9080");
		assert!(secure);
	}

	#[test]
	fn test_bare_target_with_opt_in_is_plaintext() {
		let config = GraphConfig::default().allow_insecure(true);
		let (uri, secure) = channel_uri(&config).unwrap();
		assert_eq!(uri, "http://127.0.0.1:9080");
		assert!(!secure);
	}

	#[test]
	fn test_explicit_http_scheme_requires_opt_in() {
		let config = GraphConfig::default().target("http://graph:9080");
		assert!(matches!(channel_uri(&config), Err(StoreError::Config(_))));

		let config = GraphConfig::default()
			.target("http://graph:9080")
			.allow_insecure(true);
		let (uri, secure) = channel_uri(&config).unwrap();
		assert_eq!(uri, "http://graph:9080");
		assert!(!secure);
	}

	#[test]
	fn test_https_scheme_passes_through() {
		let config = GraphConfig::default().target("https://graph.internal:9080");
		let (uri, secure) = channel_uri(&config).unwrap();
		assert_eq!(uri, "https://graph.internal:9080");
		assert!(secure);
	}

	#[test]
	fn test_unknown_scheme_rejected() {
		let config = GraphConfig::default().target("grpc://graph:9080");
		assert!(matches!(channel_uri(&config), Err(StoreError::Config(_))));
	}
}
