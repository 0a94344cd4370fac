//! CQL session factory for the fraud keyspace.
//!
//! One session per process is plenty (the driver shards connections per
//! node internally). The session is scoped to the `fraudks` keyspace; by
//! default connecting to a cluster that lacks the keyspace is an error,
//! matching a production topology where keyspaces are provisioned out of
//! band. Local development can opt into self-healing with
//! `create_keyspace(true)` or `CASSANDRA_CREATE_KEYSPACE=true`.
//!
//! There is deliberately no retry or multi-datacenter failover here. The
//! load-balancing policy prefers the configured local datacenter, and
//! anything beyond that is the caller's problem.

use scylla::client::execution_profile::ExecutionProfile;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::policies::load_balancing::DefaultPolicy;
use tracing::{debug, info};

use crate::error::Result;
use crate::settings::WideColumnConfig;

/// Handle to the fraud wide-column store.
///
/// # Example
///
/// ```rust,no_run
/// use frauddb::settings::WideColumnConfig;
/// use frauddb::widecolumn::WideColumnStore;
///
/// # async fn example() -> frauddb::Result<()> {
/// let store = WideColumnStore::connect(WideColumnConfig::default()).await?;
/// let rows = store
/// 	.session()
/// 	.query_unpaged("SELECT account_number FROM transaction_history LIMIT 10", ())
/// 	.await?;
/// store.close().await;
/// # Ok(())
/// # }
/// ```
pub struct WideColumnStore {
	session: Session,
	keyspace: String,
}

impl WideColumnStore {
	/// Connect to the cluster and scope the session to the configured
	/// keyspace.
	pub async fn connect(config: WideColumnConfig) -> Result<Self> {
		let policy = DefaultPolicy::builder()
			.prefer_datacenter(config.local_datacenter.clone())
			.build();
		let profile = ExecutionProfile::builder()
			.load_balancing_policy(policy)
			.build();

		let session = SessionBuilder::new()
			.known_nodes(&config.contact_points)
			.connection_timeout(config.connect_timeout)
			.default_execution_profile_handle(profile.into_handle())
			.build()
			.await?;

		if config.create_keyspace {
			Self::ensure_keyspace(&session, &config.keyspace).await?;
		}
		session.use_keyspace(&config.keyspace, false).await?;

		info!(
			keyspace = %config.keyspace,
			datacenter = %config.local_datacenter,
			"wide-column store connected"
		);

		Ok(Self {
			session,
			keyspace: config.keyspace,
		})
	}

	/// Connect with the local development defaults
	/// (`127.0.0.1` / `datacenter1` / keyspace `fraudks`).
	pub async fn connect_local() -> Result<Self> {
		Self::connect(WideColumnConfig::default()).await
	}

	async fn ensure_keyspace(session: &Session, keyspace: &str) -> Result<()> {
		// Single-node development replication. Production keyspaces carry a
		// real NetworkTopologyStrategy and are not created from here.
		let ddl = format!(
			"CREATE KEYSPACE IF NOT EXISTS {keyspace} \
			 WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': 1}}"
		);
		session.query_unpaged(ddl, ()).await?;
		debug!(keyspace, "keyspace ensured");
		Ok(())
	}

	/// The live CQL session.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Keyspace this session is scoped to.
	pub fn keyspace(&self) -> &str {
		&self.keyspace
	}

	/// Round-trip a trivial query to verify the session is usable.
	pub async fn health_check(&self) -> Result<()> {
		self.session
			.query_unpaged("SELECT release_version FROM system.local", ())
			.await?;
		Ok(())
	}

	/// Close the session and its per-node connections.
	pub async fn close(self) {
		// The driver tears down connections on drop; the explicit method
		// exists so call sites pair every open with a close.
		drop(self.session);
	}
}

impl std::fmt::Debug for WideColumnStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WideColumnStore")
			.field("keyspace", &self.keyspace)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use crate::settings::WideColumnConfig;

	#[test]
	fn test_default_config_targets_local_cluster() {
		let config = WideColumnConfig::default();
		assert_eq!(config.contact_points, vec!["127.0.0.1"]);
		assert_eq!(config.local_datacenter, "datacenter1");
		assert_eq!(config.keyspace, "fraudks");
		assert!(!config.create_keyspace);
	}

	#[test]
	fn test_config_setters() {
		let config = WideColumnConfig::default()
			.contact_points(["10.0.0.5:9042", "10.0.0.6:9042"])
			.local_datacenter("dc-east")
			.create_keyspace(true);

		assert_eq!(config.contact_points.len(), 2);
		assert_eq!(config.local_datacenter, "dc-east");
		assert!(config.create_keyspace);
	}
}
