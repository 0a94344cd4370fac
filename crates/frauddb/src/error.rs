//! Unified error type for all store connectors.
//!
//! Driver errors are classified by failure mode but the original message is
//! preserved verbatim inside the variant: callers see what the driver saw.
//! Nothing here retries.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for the document, wide-column and graph connectors.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Failed to reach or handshake with the store.
	#[error("Connection error: {0}")]
	Connection(String),

	/// A query or command failed after the connection was established.
	#[error("Execution error: {0}")]
	Execution(String),

	/// Credentials were rejected by the store.
	#[error("Authentication error: {0}")]
	Authentication(String),

	/// The store did not answer within the configured deadline.
	#[error("Timeout: {0}")]
	Timeout(String),

	/// A setting or connection parameter could not be parsed.
	#[error("Configuration error: {0}")]
	Config(String),

	/// Encoding or decoding a document/message failed.
	#[error("Serialization error: {0}")]
	Serialization(String),

	/// Store-side error that fits no other class (contains the original
	/// driver message).
	#[error("Database error: {0}")]
	Database(String),
}

#[cfg(feature = "document")]
impl From<mongodb::error::Error> for StoreError {
	fn from(err: mongodb::error::Error) -> Self {
		use mongodb::error::ErrorKind;

		match *err.kind {
			ErrorKind::Authentication { .. } => StoreError::Authentication(err.to_string()),
			ErrorKind::Io(_) => StoreError::Connection(err.to_string()),
			ErrorKind::ServerSelection { .. } => StoreError::Connection(err.to_string()),
			ErrorKind::InvalidArgument { .. } => StoreError::Config(err.to_string()),
			_ => StoreError::Database(err.to_string()),
		}
	}
}

#[cfg(feature = "document")]
impl From<bson::error::Error> for StoreError {
	fn from(err: bson::error::Error) -> Self {
		StoreError::Serialization(err.to_string())
	}
}

#[cfg(feature = "widecolumn")]
impl From<scylla::errors::NewSessionError> for StoreError {
	fn from(err: scylla::errors::NewSessionError) -> Self {
		StoreError::Connection(err.to_string())
	}
}

#[cfg(feature = "widecolumn")]
impl From<scylla::errors::ExecutionError> for StoreError {
	fn from(err: scylla::errors::ExecutionError) -> Self {
		StoreError::Execution(err.to_string())
	}
}

#[cfg(feature = "widecolumn")]
impl From<scylla::errors::UseKeyspaceError> for StoreError {
	fn from(err: scylla::errors::UseKeyspaceError) -> Self {
		StoreError::Execution(err.to_string())
	}
}

#[cfg(feature = "graph")]
impl From<tonic::Status> for StoreError {
	fn from(status: tonic::Status) -> Self {
		match status.code() {
			tonic::Code::Unavailable => StoreError::Connection(status.message().to_string()),
			tonic::Code::Unauthenticated => {
				StoreError::Authentication(status.message().to_string())
			}
			tonic::Code::DeadlineExceeded => StoreError::Timeout(status.message().to_string()),
			tonic::Code::InvalidArgument => StoreError::Config(status.message().to_string()),
			_ => StoreError::Database(status.message().to_string()),
		}
	}
}

#[cfg(feature = "graph")]
impl From<tonic::transport::Error> for StoreError {
	fn from(err: tonic::transport::Error) -> Self {
		StoreError::Connection(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = StoreError::Connection("refused".to_string());
		assert!(err.to_string().contains("Connection error"));

		let err = StoreError::Config("bad uri".to_string());
		assert!(err.to_string().contains("Configuration error"));
	}

	#[cfg(feature = "graph")]
	#[test]
	fn test_from_tonic_status() {
		let status = tonic::Status::unavailable("no route to host");
		assert!(matches!(StoreError::from(status), StoreError::Connection(_)));

		let status = tonic::Status::unauthenticated("bad token");
		assert!(matches!(
			StoreError::from(status),
			StoreError::Authentication(_)
		));

		let status = tonic::Status::deadline_exceeded("too slow");
		assert!(matches!(StoreError::from(status), StoreError::Timeout(_)));

		let status = tonic::Status::internal("boom");
		assert!(matches!(StoreError::from(status), StoreError::Database(_)));
	}

	#[cfg(feature = "graph")]
	#[test]
	fn test_status_message_preserved() {
		let status = tonic::Status::unavailable("no route to host");
		let err = StoreError::from(status);
		assert!(err.to_string().contains("no route to host"));
	}
}
