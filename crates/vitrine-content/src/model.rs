//! Project data model.

use crate::error::ContentError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Project category.
///
/// `Work` and `Fun` are real content buckets on the backend; `All` is a
/// list-endpoint alias that folds both together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
	/// Client and professional work.
	Work,
	/// Side projects.
	Fun,
	/// Both buckets (list endpoints only).
	All,
}

impl Category {
	/// Returns the wire representation.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Work => "work",
			Self::Fun => "fun",
			Self::All => "all",
		}
	}

	/// Interprets a url segment as a category alias.
	///
	/// This is the `/projects/:id` disambiguator: a segment naming a
	/// category is a list request, anything else is a project id.
	pub fn alias_of(segment: &str) -> Option<Self> {
		segment.parse().ok()
	}
}

impl FromStr for Category {
	type Err = ContentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"work" => Ok(Self::Work),
			"fun" => Ok(Self::Fun),
			"all" => Ok(Self::All),
			other => Err(ContentError::UnknownCategory(other.to_string())),
		}
	}
}

impl std::fmt::Display for Category {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// One project card in a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
	/// Stable identifier (the markdown file stem).
	pub id: String,
	/// The bucket the project lives in.
	pub category: String,
	/// Display title.
	pub title: String,
	/// Thumbnail image url.
	#[serde(default)]
	pub thumbnail: String,
	/// Short description for the card.
	#[serde(default)]
	pub description: String,
	/// Tag labels rendered as chips.
	#[serde(default)]
	pub tags: Vec<String>,
	/// Year of the project, when the frontmatter carried one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub year: Option<String>,
	/// Client name, when the frontmatter carried one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client: Option<String>,
	/// Role on the project, when the frontmatter carried one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
}

/// Wire shape of the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectListResponse {
	/// The projects, in backend order.
	pub projects: Vec<ProjectSummary>,
	/// Total count.
	pub total: usize,
	/// The category the list was filtered to.
	pub category: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("work", Some(Category::Work))]
	#[case("fun", Some(Category::Fun))]
	#[case("all", Some(Category::All))]
	#[case("atlas", None)]
	#[case("WORK", None)]
	fn test_category_alias(#[case] segment: &str, #[case] expected: Option<Category>) {
		assert_eq!(Category::alias_of(segment), expected);
	}

	#[test]
	fn test_list_response_decoding() {
		let json = r#"{
			"projects": [
				{
					"id": "atlas",
					"category": "work",
					"title": "Atlas",
					"thumbnail": "/assets/atlas.jpg",
					"description": "Mapping tool",
					"tags": ["rust", "maps"],
					"year": "2024",
					"client": "Acme",
					"role": "Lead"
				}
			],
			"total": 1,
			"category": "work"
		}"#;

		let response: ProjectListResponse = serde_json::from_str(json).unwrap();
		assert_eq!(response.total, 1);
		assert_eq!(response.projects[0].id, "atlas");
		assert_eq!(response.projects[0].tags, vec!["rust", "maps"]);
	}

	#[test]
	fn test_summary_optional_fields_default() {
		let json = r#"{"id": "x", "category": "fun", "title": "X"}"#;
		let summary: ProjectSummary = serde_json::from_str(json).unwrap();
		assert_eq!(summary.thumbnail, "");
		assert!(summary.tags.is_empty());
		assert!(summary.year.is_none());
	}
}
