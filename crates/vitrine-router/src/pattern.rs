//! Path pattern matching for url routing.

use crate::error::PatternError;
use std::collections::HashMap;

/// Maximum allowed length for a url pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a url pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// A compiled url pattern.
///
/// Supports colon-placeholder patterns like:
/// - `/projects` - Exact match
/// - `/projects/:id` - Single path parameter
/// - `/fun/:id` - Parameter under a literal prefix
///
/// A `:name` segment captures one path segment (it never crosses a `/`).
/// Literal text is matched exactly, with regex metacharacters escaped.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Compiled regex with named captures.
	regex: regex::Regex,
	/// Parameter names in pattern order.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern exceeds the length or
	/// segment limits, contains an empty `:` placeholder, or compiles to
	/// an invalid regex.
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		// Reject oversized patterns before handing them to the regex engine
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let (regex_str, param_names) = Self::compile(pattern)?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex {
				pattern: pattern.to_string(),
				message: e.to_string(),
			})?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
		})
	}

	/// Compiles a pattern string into a regex source and parameter names.
	fn compile(pattern: &str) -> Result<(String, Vec<String>), PatternError> {
		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();

		for (index, segment) in pattern.split('/').enumerate() {
			if index > 0 {
				regex_str.push('/');
			}

			if let Some(name) = segment.strip_prefix(':') {
				if name.is_empty() {
					return Err(PatternError::EmptyPlaceholder {
						pattern: pattern.to_string(),
					});
				}
				param_names.push(name.to_string());
				// A placeholder never crosses a path separator
				regex_str.push_str(&format!("(?P<{}>[^/]+)", name));
			} else {
				for c in segment.chars() {
					if matches!(
						c,
						'.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '^' | '$' | '|' | '\\'
							| '{' | '}'
					) {
						regex_str.push('\\');
					}
					regex_str.push(c);
				}
			}
		}

		regex_str.push('$');
		Ok((regex_str, param_names))
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Attempts to match a path against this pattern.
	///
	/// Returns the extracted parameters keyed by placeholder name.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		self.regex.captures(path).map(|caps| {
			self.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect()
		})
	}

	/// Checks whether this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Generates a path from this pattern with the given parameters.
	///
	/// Returns `None` if a placeholder has no value in `params`.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		let mut segments = Vec::new();
		for segment in self.pattern.split('/') {
			if let Some(name) = segment.strip_prefix(':') {
				segments.push(params.get(name)?.clone());
			} else {
				segments.push(segment.to_string());
			}
		}
		Some(segments.join("/"))
	}

	/// Returns whether this is an exact match pattern (no parameters).
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}
