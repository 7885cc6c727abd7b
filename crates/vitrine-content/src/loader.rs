//! Content loader port and its HTTP implementation.

use crate::error::ContentError;
use crate::model::{Category, ProjectListResponse, ProjectSummary};
use async_trait::async_trait;

/// Backend access port.
///
/// The shell only ever asks for a raw markdown document or a project
/// list; everything else about the backend is out of scope.
#[async_trait]
pub trait ContentLoader: Send + Sync {
	/// Fetches the raw markdown document for a project.
	///
	/// # Errors
	///
	/// Returns [`ContentError`] on transport failure or a non-success
	/// status.
	async fn document(&self, category: Category, id: &str) -> Result<String, ContentError>;

	/// Fetches the ordered project list for a category.
	///
	/// # Errors
	///
	/// Returns [`ContentError`] on transport failure, a non-success
	/// status, or an undecodable body.
	async fn project_list(&self, category: Category) -> Result<Vec<ProjectSummary>, ContentError>;
}

/// [`ContentLoader`] speaking the portfolio HTTP API.
///
/// Documents come from `GET {base}/api/projects/{category}/{id}` as
/// `text/markdown`; lists come from `GET {base}/api/projects?category=…`
/// as JSON.
pub struct HttpContentLoader {
	client: reqwest::Client,
	base_url: String,
}

impl HttpContentLoader {
	/// Creates a loader against the given base url.
	///
	/// A trailing slash on `base_url` is tolerated.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self::with_client(reqwest::Client::new(), base_url)
	}

	/// Creates a loader reusing an existing client.
	pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
		let mut base_url = base_url.into();
		while base_url.ends_with('/') {
			base_url.pop();
		}
		Self { client, base_url }
	}

	/// Returns the configured base url.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn document_url(&self, category: Category, id: &str) -> String {
		format!("{}/api/projects/{}/{}", self.base_url, category.as_str(), id)
	}

	fn list_url(&self, category: Category) -> String {
		format!(
			"{}/api/projects?category={}",
			self.base_url,
			category.as_str()
		)
	}
}

#[async_trait]
impl ContentLoader for HttpContentLoader {
	async fn document(&self, category: Category, id: &str) -> Result<String, ContentError> {
		let url = self.document_url(category, id);
		tracing::debug!(%url, "fetching project document");

		let response = self.client.get(&url).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(ContentError::Status {
				status: status.as_u16(),
			});
		}

		Ok(response.text().await?)
	}

	async fn project_list(&self, category: Category) -> Result<Vec<ProjectSummary>, ContentError> {
		let url = self.list_url(category);
		tracing::debug!(%url, "fetching project list");

		let response = self.client.get(&url).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(ContentError::Status {
				status: status.as_u16(),
			});
		}

		let body = response.text().await?;
		let list: ProjectListResponse = serde_json::from_str(&body)?;
		Ok(list.projects)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_url_construction() {
		let loader = HttpContentLoader::new("https://example.com/");
		assert_eq!(loader.base_url(), "https://example.com");
		assert_eq!(
			loader.document_url(Category::Fun, "pixel-garden"),
			"https://example.com/api/projects/fun/pixel-garden"
		);
		assert_eq!(
			loader.list_url(Category::All),
			"https://example.com/api/projects?category=all"
		);
	}
}
