//! MongoDB connection factory.
//!
//! `connect` is eager: the driver itself only resolves servers lazily, so
//! the factory pings the target database before handing out the store. An
//! unreachable or misconfigured target is an error here, not on first use.

use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::info;

use crate::error::Result;
use crate::settings::DocumentConfig;

/// Handle to the fraud document store.
///
/// Cheap to clone (the driver pools connections internally); pass it to
/// whichever component needs the backend instead of stashing it in global
/// state.
///
/// # Example
///
/// ```rust,no_run
/// use frauddb::document::DocumentStore;
///
/// # async fn example() -> frauddb::Result<()> {
/// let store = DocumentStore::connect("mongodb://localhost:27017").await?;
/// let db = store.database();
/// store.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DocumentStore {
	client: Client,
	database_name: String,
}

/// Builder for configuring the document-store connection.
#[derive(Debug, Clone, Default)]
pub struct DocumentStoreBuilder {
	config: DocumentConfig,
}

impl DocumentStoreBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the MongoDB connection string.
	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.config.uri = uri.into();
		self
	}

	/// Set the database name.
	pub fn database(mut self, database: impl Into<String>) -> Self {
		self.config.database = database.into();
		self
	}

	/// Set the server-selection deadline.
	pub fn server_selection_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.config.server_selection_timeout = timeout;
		self
	}

	/// Set the TCP connect deadline.
	pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.config.connect_timeout = timeout;
		self
	}

	/// Connect and verify the target with a ping.
	pub async fn build(self) -> Result<DocumentStore> {
		DocumentStore::from_config(self.config).await
	}
}

impl DocumentStore {
	/// Connect using a connection string and the default database.
	pub async fn connect(uri: impl Into<String>) -> Result<Self> {
		Self::from_config(DocumentConfig::default().uri(uri)).await
	}

	/// Create a builder for configuring the connection.
	pub fn builder() -> DocumentStoreBuilder {
		DocumentStoreBuilder::new()
	}

	/// Connect from a prepared [`DocumentConfig`].
	pub async fn from_config(config: DocumentConfig) -> Result<Self> {
		let mut options = ClientOptions::parse(&config.uri).await?;
		options.server_selection_timeout = Some(config.server_selection_timeout);
		options.connect_timeout = Some(config.connect_timeout);

		let client = Client::with_options(options)?;
		let store = Self {
			client,
			database_name: config.database,
		};

		// The driver connects lazily; fail fast instead.
		store.health_check().await?;
		info!(database = %store.database_name, "document store connected");
		Ok(store)
	}

	/// Switch the handle to another database.
	pub fn with_database(mut self, database_name: impl Into<String>) -> Self {
		self.database_name = database_name.into();
		self
	}

	/// The database this handle is scoped to.
	pub fn database(&self) -> Database {
		self.client.database(&self.database_name)
	}

	/// A typed collection handle within the scoped database.
	pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
		self.database().collection(name)
	}

	/// Ping the scoped database.
	pub async fn health_check(&self) -> Result<()> {
		self.database().run_command(doc! { "ping": 1 }).await?;
		Ok(())
	}

	/// Close the connection, releasing pooled sockets.
	///
	/// Other clones of this handle become unusable afterwards; call this on
	/// the last one.
	pub async fn close(self) {
		self.client.shutdown().await;
	}
}

impl std::fmt::Debug for DocumentStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DocumentStore")
			.field("database_name", &self.database_name)
			.finish_non_exhaustive()
	}
}
