//! # frauddb
//!
//! Data-access layer for a fraud-detection platform.
//!
//! This crate owns the three store connectors the platform sits on top of.
//! Each connector carries a `schema` submodule declaring that store's fixed
//! contract as data, with an idempotent `provision` applying it:
//!
//! - **Document store** (`document` module): MongoDB connection factory and
//!   the fixed secondary/unique index contract over the six fraud
//!   collections (`users`, `clients`, `accounts`, `transactions`, `alerts`,
//!   `cases`).
//! - **Wide-column store** (`widecolumn` module): ScyllaDB/Cassandra session
//!   scoped to the `fraudks` keyspace, with datacenter-aware load balancing
//!   and the three-table transaction-history layout.
//! - **Graph store** (`graph` module): Dgraph client over a gRPC channel,
//!   TLS by default with plaintext as an explicit opt-in, and the fraud
//!   predicate/type schema.
//!
//! The connectors are peers: none depends on another, and each yields an
//! owned, cloneable/injectable handle rather than process-global state, so
//! callers can hold multiple isolated connections in one process.
//!
//! Failures are never retried or masked here. Driver errors are classified
//! into [`StoreError`] with the original message preserved, and every
//! connector's `connect` is eager: an unreachable target is an error at
//! connect time, not on first use.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use frauddb::document::{DocumentStore, schema};
//!
//! # async fn example() -> frauddb::Result<()> {
//! let store = DocumentStore::connect("mongodb://localhost:27017").await?;
//! schema::provision(&store).await?;
//! store.close().await;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod settings;

#[cfg(feature = "document")]
pub mod document;

#[cfg(feature = "graph")]
pub mod graph;

#[cfg(feature = "widecolumn")]
pub mod widecolumn;

pub use error::{Result, StoreError};
pub use settings::Settings;

#[cfg(feature = "document")]
pub use document::DocumentStore;

#[cfg(feature = "graph")]
pub use graph::GraphStore;

#[cfg(feature = "widecolumn")]
pub use widecolumn::WideColumnStore;
