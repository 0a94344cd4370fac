//! Wide-column store (ScyllaDB / Cassandra-compatible, CQL) connector.

mod connection;
pub mod schema;

pub use connection::WideColumnStore;
