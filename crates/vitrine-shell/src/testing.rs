//! In-memory collaborators for tests and headless hosts.
//!
//! These are real implementations of the collaborator ports, not mocks:
//! the same [`StaticContentLoader`] that backs the test suite can serve a
//! demo binary that has no backend.

use crate::surface::HeadlessSurface;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use vitrine_content::{
	Category, ChipRenderer, ContentError, ContentLoader, MarkdownRenderer, ProjectSummary,
	ReadTimeEstimator,
};

/// Reading time reported by [`FixedReadTime`].
pub const FIXED_READ_MINUTES: u32 = 4;

/// [`ContentLoader`] over in-memory fixtures.
pub struct StaticContentLoader {
	documents: HashMap<(String, String), String>,
	lists: HashMap<String, Vec<ProjectSummary>>,
	/// Yield to the scheduler before answering, so overlapping
	/// navigations actually interleave in tests.
	yield_before_response: bool,
}

fn summary(id: &str, category: &str, title: &str, tags: &[&str]) -> ProjectSummary {
	ProjectSummary {
		id: id.to_string(),
		category: category.to_string(),
		title: title.to_string(),
		thumbnail: format!("/assets/images/{}.jpg", id),
		description: format!("About {}", title),
		tags: tags.iter().map(|t| t.to_string()).collect(),
		year: Some("2024".to_string()),
		client: None,
		role: None,
	}
}

impl StaticContentLoader {
	/// A loader with no fixtures; every request fails with a 404.
	pub fn empty() -> Self {
		Self {
			documents: HashMap::new(),
			lists: HashMap::new(),
			yield_before_response: false,
		}
	}

	/// A loader with a small work/fun portfolio.
	pub fn with_default_fixtures() -> Self {
		let mut loader = Self::empty();

		loader.insert_document(
			Category::Work,
			"atlas",
			"---\ntitle: Atlas\nyear: 2024\ntags: [rust, maps]\n---\n# Atlas\nA mapping tool.\n",
		);
		loader.insert_document(
			Category::Fun,
			"pixel-garden",
			"---\ntitle: Pixel Garden\ntags: [art]\n---\n# Pixel Garden\nGrowing pixels.\n",
		);

		let work = vec![summary("atlas", "work", "Atlas", &["rust", "maps"])];
		let fun = vec![summary(
			"pixel-garden",
			"fun",
			"Pixel Garden",
			&["art"],
		)];
		let mut all = work.clone();
		all.extend(fun.clone());

		loader.insert_list(Category::Work, work);
		loader.insert_list(Category::Fun, fun);
		loader.insert_list(Category::All, all);
		loader
	}

	/// Makes the loader yield once before every response.
	pub fn yielding(mut self) -> Self {
		self.yield_before_response = true;
		self
	}

	/// Adds a document fixture.
	pub fn insert_document(&mut self, category: Category, id: &str, text: &str) {
		self.documents.insert(
			(category.as_str().to_string(), id.to_string()),
			text.to_string(),
		);
	}

	/// Adds a list fixture.
	pub fn insert_list(&mut self, category: Category, projects: Vec<ProjectSummary>) {
		self.lists
			.insert(category.as_str().to_string(), projects);
	}

	async fn maybe_yield(&self) {
		if self.yield_before_response {
			tokio::task::yield_now().await;
		}
	}
}

#[async_trait]
impl ContentLoader for StaticContentLoader {
	async fn document(&self, category: Category, id: &str) -> Result<String, ContentError> {
		self.maybe_yield().await;
		self.documents
			.get(&(category.as_str().to_string(), id.to_string()))
			.cloned()
			.ok_or(ContentError::Status { status: 404 })
	}

	async fn project_list(&self, category: Category) -> Result<Vec<ProjectSummary>, ContentError> {
		self.maybe_yield().await;
		self.lists
			.get(category.as_str())
			.cloned()
			.ok_or(ContentError::Status { status: 404 })
	}
}

/// Markdown collaborator that passes the body through untouched.
pub struct PlainMarkdown;

impl MarkdownRenderer for PlainMarkdown {
	fn render(&self, markdown: &str) -> String {
		markdown.to_string()
	}
}

/// Chip collaborator that records its calls.
///
/// When given a [`HeadlessSurface`], it drops a `chips-rendered` marker
/// into the surface journal on completion, so tests can assert ordering
/// against surface operations.
pub struct RecordingChips {
	calls: Mutex<Vec<Vec<String>>>,
	surface: Option<Arc<HeadlessSurface>>,
}

impl RecordingChips {
	/// Creates a recorder, optionally journaling to a surface.
	pub fn new(surface: Option<Arc<HeadlessSurface>>) -> Self {
		Self {
			calls: Mutex::new(Vec::new()),
			surface,
		}
	}

	/// The tag lists passed to [`ChipRenderer::render_chips`] so far.
	pub fn calls(&self) -> Vec<Vec<String>> {
		self.calls.lock().clone()
	}
}

#[async_trait]
impl ChipRenderer for RecordingChips {
	async fn render_chips(&self, tags: &[String]) {
		self.calls.lock().push(tags.to_vec());
		if let Some(surface) = &self.surface {
			surface.note("chips-rendered");
		}
	}
}

/// Reading-time collaborator with a constant answer.
pub struct FixedReadTime;

impl ReadTimeEstimator for FixedReadTime {
	fn estimate_minutes(&self, _body: &str) -> u32 {
		FIXED_READ_MINUTES
	}
}
