//! Graph store (Dgraph) connector over gRPC.
//!
//! The wire surface lives in [`proto`]; [`GraphStore`] owns the channel and
//! the unary stubs built on it.

mod connection;
pub mod proto;
pub mod schema;

pub use connection::GraphStore;
