//! Environment-driven configuration for the store connectors.
//!
//! Every knob has a default matching the platform's local development
//! topology, so `Settings::from_env()` succeeds on an empty environment:
//!
//! | Variable | Default |
//! |---|---|
//! | `MONGO_URI` | `mongodb://localhost:27017` |
//! | `MONGO_DATABASE` | `frauddb` |
//! | `CASSANDRA_CONTACT_POINTS` | `127.0.0.1` (comma-separated) |
//! | `CASSANDRA_LOCAL_DC` | `datacenter1` |
//! | `CASSANDRA_CREATE_KEYSPACE` | `false` |
//! | `DGRAPH_TARGET` | `127.0.0.1:9080` |
//! | `DGRAPH_ALLOW_INSECURE` | `false` |

use std::env;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, StoreError};

/// Default document-store URI.
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";

/// Default document-store database name.
pub const DEFAULT_MONGO_DATABASE: &str = "frauddb";

/// Default wide-column contact point.
pub const DEFAULT_CONTACT_POINT: &str = "127.0.0.1";

/// Default wide-column local datacenter.
pub const DEFAULT_LOCAL_DC: &str = "datacenter1";

/// Wide-column keyspace grouping the fraud column families.
pub const FRAUD_KEYSPACE: &str = "fraudks";

/// Default graph-store gRPC target.
pub const DEFAULT_DGRAPH_TARGET: &str = "127.0.0.1:9080";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Read a string variable, falling back to a default when unset.
fn env_str(key: &str, default: &str) -> String {
	env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a comma-separated list, trimming entries and dropping empties.
pub fn parse_list(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(str::to_string)
		.collect()
}

/// Parse a boolean value the way deployment tooling writes them.
pub fn parse_bool(raw: &str) -> Result<bool> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		other => Err(StoreError::Config(format!(
			"expected a boolean, got {other:?}"
		))),
	}
}

/// Document-store connection parameters.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentConfig {
	/// MongoDB connection string.
	pub uri: String,
	/// Database holding the six fraud collections.
	pub database: String,
	/// Deadline for picking a reachable server.
	#[serde(skip)]
	pub server_selection_timeout: Duration,
	/// TCP connect deadline.
	#[serde(skip)]
	pub connect_timeout: Duration,
}

impl Default for DocumentConfig {
	fn default() -> Self {
		Self {
			uri: DEFAULT_MONGO_URI.to_string(),
			database: DEFAULT_MONGO_DATABASE.to_string(),
			server_selection_timeout: DEFAULT_CONNECT_TIMEOUT,
			connect_timeout: DEFAULT_CONNECT_TIMEOUT,
		}
	}
}

impl DocumentConfig {
	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = uri.into();
		self
	}

	pub fn database(mut self, database: impl Into<String>) -> Self {
		self.database = database.into();
		self
	}

	pub fn server_selection_timeout(mut self, timeout: Duration) -> Self {
		self.server_selection_timeout = timeout;
		self
	}

	pub fn connect_timeout(mut self, timeout: Duration) -> Self {
		self.connect_timeout = timeout;
		self
	}
}

/// Wide-column-store connection parameters.
#[derive(Debug, Clone, Serialize)]
pub struct WideColumnConfig {
	/// Seed addresses used to discover the cluster.
	pub contact_points: Vec<String>,
	/// Datacenter preferred by the load-balancing policy.
	pub local_datacenter: String,
	/// Keyspace the session is scoped to.
	pub keyspace: String,
	/// Create the keyspace (SimpleStrategy, RF 1) before switching to it.
	/// Off by default: production keyspaces are provisioned out of band.
	pub create_keyspace: bool,
	#[serde(skip)]
	pub connect_timeout: Duration,
}

impl Default for WideColumnConfig {
	fn default() -> Self {
		Self {
			contact_points: vec![DEFAULT_CONTACT_POINT.to_string()],
			local_datacenter: DEFAULT_LOCAL_DC.to_string(),
			keyspace: FRAUD_KEYSPACE.to_string(),
			create_keyspace: false,
			connect_timeout: DEFAULT_CONNECT_TIMEOUT,
		}
	}
}

impl WideColumnConfig {
	pub fn contact_points<I, S>(mut self, points: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.contact_points = points.into_iter().map(Into::into).collect();
		self
	}

	pub fn local_datacenter(mut self, dc: impl Into<String>) -> Self {
		self.local_datacenter = dc.into();
		self
	}

	pub fn keyspace(mut self, keyspace: impl Into<String>) -> Self {
		self.keyspace = keyspace.into();
		self
	}

	pub fn create_keyspace(mut self, create: bool) -> Self {
		self.create_keyspace = create;
		self
	}

	pub fn connect_timeout(mut self, timeout: Duration) -> Self {
		self.connect_timeout = timeout;
		self
	}
}

/// Graph-store connection parameters.
///
/// The channel is TLS by default. The original deployment used a plaintext
/// channel; that is treated as a gap, so plaintext now requires
/// `allow_insecure(true)` (or `DGRAPH_ALLOW_INSECURE=true`).
#[derive(Debug, Clone, Serialize)]
pub struct GraphConfig {
	/// gRPC target, `host:port` or a full `http(s)://` URI.
	pub target: String,
	/// Permit a plaintext channel. Explicit opt-in.
	pub allow_insecure: bool,
	#[serde(skip)]
	pub connect_timeout: Duration,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			target: DEFAULT_DGRAPH_TARGET.to_string(),
			allow_insecure: false,
			connect_timeout: DEFAULT_CONNECT_TIMEOUT,
		}
	}
}

impl GraphConfig {
	pub fn target(mut self, target: impl Into<String>) -> Self {
		self.target = target.into();
		self
	}

	pub fn allow_insecure(mut self, allow: bool) -> Self {
		self.allow_insecure = allow;
		self
	}

	pub fn connect_timeout(mut self, timeout: Duration) -> Self {
		self.connect_timeout = timeout;
		self
	}
}

/// Aggregated connector configuration, one field per store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Settings {
	pub document: DocumentConfig,
	pub widecolumn: WideColumnConfig,
	pub graph: GraphConfig,
}

impl Settings {
	/// Load all connector settings from the environment.
	///
	/// Unset variables fall back to the documented defaults; malformed
	/// values (a non-boolean flag, an empty contact-point list) are
	/// configuration errors.
	pub fn from_env() -> Result<Self> {
		let contact_points = parse_list(&env_str("CASSANDRA_CONTACT_POINTS", DEFAULT_CONTACT_POINT));
		if contact_points.is_empty() {
			return Err(StoreError::Config(
				"CASSANDRA_CONTACT_POINTS must name at least one host".to_string(),
			));
		}

		let create_keyspace = match env::var("CASSANDRA_CREATE_KEYSPACE") {
			Ok(raw) => parse_bool(&raw)?,
			Err(_) => false,
		};

		let allow_insecure = match env::var("DGRAPH_ALLOW_INSECURE") {
			Ok(raw) => parse_bool(&raw)?,
			Err(_) => false,
		};

		Ok(Self {
			document: DocumentConfig::default()
				.uri(env_str("MONGO_URI", DEFAULT_MONGO_URI))
				.database(env_str("MONGO_DATABASE", DEFAULT_MONGO_DATABASE)),
			widecolumn: WideColumnConfig::default()
				.contact_points(contact_points)
				.local_datacenter(env_str("CASSANDRA_LOCAL_DC", DEFAULT_LOCAL_DC))
				.create_keyspace(create_keyspace),
			graph: GraphConfig::default()
				.target(env_str("DGRAPH_TARGET", DEFAULT_DGRAPH_TARGET))
				.allow_insecure(allow_insecure),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;

	#[test]
	fn test_parse_list_trims_and_drops_empties() {
		assert_eq!(
			parse_list("10.0.0.1, 10.0.0.2 ,,10.0.0.3"),
			vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]
		);
		assert_eq!(parse_list(""), Vec::<String>::new());
	}

	#[test]
	fn test_parse_bool_accepts_common_spellings() {
		for raw in ["true", "1", "YES", "On"] {
			assert!(parse_bool(raw).unwrap());
		}
		for raw in ["false", "0", "no", "OFF"] {
			assert!(!parse_bool(raw).unwrap());
		}
		assert!(matches!(parse_bool("maybe"), Err(StoreError::Config(_))));
	}

	#[test]
	fn test_defaults_match_local_topology() {
		let settings = Settings::default();
		assert_eq!(settings.document.uri, "mongodb://localhost:27017");
		assert_eq!(settings.document.database, "frauddb");
		assert_eq!(settings.widecolumn.contact_points, vec!["127.0.0.1"]);
		assert_eq!(settings.widecolumn.local_datacenter, "datacenter1");
		assert_eq!(settings.widecolumn.keyspace, "fraudks");
		assert_eq!(settings.graph.target, "127.0.0.1:9080");
		assert!(!settings.graph.allow_insecure);
	}

	#[test]
	#[serial]
	fn test_from_env_reads_overrides() {
		// SAFETY: test is serialized; no other thread touches the
		// environment while it runs.
		unsafe {
			env::set_var("MONGO_URI", "mongodb://db0:27017");
			env::set_var("CASSANDRA_CONTACT_POINTS", "10.1.0.1,10.1.0.2");
			env::set_var("DGRAPH_ALLOW_INSECURE", "true");
		}

		let settings = Settings::from_env().unwrap();
		assert_eq!(settings.document.uri, "mongodb://db0:27017");
		assert_eq!(
			settings.widecolumn.contact_points,
			vec!["10.1.0.1", "10.1.0.2"]
		);
		assert!(settings.graph.allow_insecure);

		// SAFETY: same serialized test.
		unsafe {
			env::remove_var("MONGO_URI");
			env::remove_var("CASSANDRA_CONTACT_POINTS");
			env::remove_var("DGRAPH_ALLOW_INSECURE");
		}
	}

	#[test]
	#[serial]
	fn test_from_env_enables_keyspace_creation() {
		// Off unless asked for: production keyspaces exist out of band.
		let settings = Settings::from_env().unwrap();
		assert!(!settings.widecolumn.create_keyspace);

		// SAFETY: test is serialized; no other thread touches the
		// environment while it runs.
		unsafe {
			env::set_var("CASSANDRA_CREATE_KEYSPACE", "true");
		}
		let settings = Settings::from_env().unwrap();
		// SAFETY: same serialized test.
		unsafe {
			env::remove_var("CASSANDRA_CREATE_KEYSPACE");
		}
		assert!(settings.widecolumn.create_keyspace);
	}

	#[test]
	#[serial]
	fn test_from_env_rejects_bad_boolean() {
		// SAFETY: serialized test.
		unsafe {
			env::set_var("DGRAPH_ALLOW_INSECURE", "definitely");
		}
		let result = Settings::from_env();
		// SAFETY: serialized test.
		unsafe {
			env::remove_var("DGRAPH_ALLOW_INSECURE");
		}
		assert!(matches!(result, Err(StoreError::Config(_))));
	}
}
