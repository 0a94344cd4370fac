//! Document store (MongoDB) connector and schema contract.
//!
//! [`DocumentStore`] is the connection factory; [`schema`] holds the fixed
//! index contract over the six fraud collections and the one-shot
//! provisioning procedure that ensures it.

mod connection;
pub mod schema;

pub use connection::{DocumentStore, DocumentStoreBuilder};
