//! Frontmatter extraction for markdown documents.
//!
//! A document may open with a `---`-delimited metadata block of flat
//! `key: value` lines. Values are scalars or bracket-delimited comma
//! lists; surrounding single or double quotes are stripped. A `---`
//! opener without a closing delimiter is not an error: the whole input
//! is treated as body and the mapping comes back empty.

use std::collections::HashMap;

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
	/// A scalar string.
	Scalar(String),
	/// A bracket-delimited list.
	List(Vec<String>),
}

impl FrontmatterValue {
	/// Returns the scalar value, if this is one.
	pub fn as_scalar(&self) -> Option<&str> {
		match self {
			Self::Scalar(s) => Some(s),
			Self::List(_) => None,
		}
	}

	/// Returns the list items, if this is a list.
	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			Self::Scalar(_) => None,
			Self::List(items) => Some(items),
		}
	}
}

/// Flat string-keyed frontmatter mapping.
pub type Frontmatter = HashMap<String, FrontmatterValue>;

/// Splits a document into its frontmatter mapping and body.
///
/// Mirrors the backend's parser: the input must *start* with `---`, and
/// the block ends at the next `---`. Everything after the closing
/// delimiter is the body. Without an opener, or with an unterminated
/// block, the entire input is the body.
pub fn split(input: &str) -> (Frontmatter, &str) {
	if !input.starts_with("---") {
		return (Frontmatter::new(), input);
	}

	let mut parts = input.splitn(3, "---");
	let _leading = parts.next();
	let block = parts.next();
	let body = parts.next();

	match (block, body) {
		(Some(block), Some(body)) => (parse_block(block), body.trim_start_matches('\n')),
		// Unterminated opener: fall back to treating everything as body
		_ => (Frontmatter::new(), input),
	}
}

/// Parses the raw lines of a frontmatter block.
fn parse_block(block: &str) -> Frontmatter {
	let mut map = Frontmatter::new();

	for line in block.lines() {
		let Some((key, value)) = line.split_once(':') else {
			continue;
		};
		let key = key.trim();
		if key.is_empty() {
			continue;
		}
		let value = strip_quotes(value.trim());

		if value.starts_with('[') && value.ends_with(']') {
			let items = value[1..value.len() - 1]
				.split(',')
				.map(|item| strip_quotes(item.trim()).to_string())
				.filter(|item| !item.is_empty())
				.collect();
			map.insert(key.to_string(), FrontmatterValue::List(items));
		} else {
			map.insert(key.to_string(), FrontmatterValue::Scalar(value.to_string()));
		}
	}

	map
}

/// Strips one layer of matching single or double quotes.
fn strip_quotes(value: &str) -> &str {
	value
		.trim_matches('"')
		.trim_matches('\'')
}
