//! Error types for routing.

/// Error raised while compiling a url pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
	/// Pattern string exceeds the maximum allowed length.
	#[error("pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Actual length in bytes.
		length: usize,
		/// Maximum allowed length.
		max: usize,
	},

	/// Pattern has too many path segments.
	#[error("pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Actual segment count.
		count: usize,
		/// Maximum allowed segments.
		max: usize,
	},

	/// A `:` placeholder without a name.
	#[error("pattern '{pattern}' contains an empty ':' placeholder")]
	EmptyPlaceholder {
		/// The offending pattern.
		pattern: String,
	},

	/// The compiled regex was rejected.
	#[error("failed to compile pattern '{pattern}': {message}")]
	Regex {
		/// The offending pattern.
		pattern: String,
		/// Error message from the regex engine.
		message: String,
	},
}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
	/// No registered route matched the url.
	NotFound(String),
	/// Pushing or replacing a history entry failed.
	Navigation(String),
	/// A pattern failed to compile during registration.
	Pattern(PatternError),
}

impl std::fmt::Display for RouterError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::NotFound(path) => write!(f, "Route not found: {}", path),
			Self::Navigation(msg) => write!(f, "Navigation failed: {}", msg),
			Self::Pattern(err) => write!(f, "Pattern error: {}", err),
		}
	}
}

impl std::error::Error for RouterError {}

impl From<PatternError> for RouterError {
	fn from(err: PatternError) -> Self {
		Self::Pattern(err)
	}
}
