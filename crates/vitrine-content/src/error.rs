//! Error types for content loading.

/// Error raised while loading or decoding content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
	/// The backend answered with a non-success status.
	#[error("content request failed with status {status}")]
	Status {
		/// The HTTP status code.
		status: u16,
	},

	/// The request never completed.
	#[error("content transport error: {0}")]
	Transport(#[from] reqwest::Error),

	/// The response body could not be decoded.
	#[error("content decode error: {0}")]
	Decode(#[from] serde_json::Error),

	/// A category segment outside the known set.
	#[error("unknown category: {0}")]
	UnknownCategory(String),
}
