//! Application wiring.
//!
//! [`Shell`] assembles the router, the modal manager, and the page
//! manager over one set of injected ports, registers the url surface and
//! the built-in `projects` modal kind, and exposes the few entry points
//! a host needs to forward: initial dispatch, link clicks, history pops,
//! escape, and backdrop clicks.

use crate::clock::Clock;
use crate::events::ShellEvents;
use crate::modal::ModalManager;
use crate::pages::{PageManager, PageManagerDeps};
use crate::render;
use crate::settings::ShellSettings;
use crate::surface::Surface;
use std::sync::Arc;
use vitrine_content::{
	Category, ChipRenderer, ContentLoader, MarkdownRenderer, ReadTimeEstimator,
};
use vitrine_router::intercept::{self, InterceptDecision};
use vitrine_router::{Environment, LinkClick, PatternError, Router, RouterError};

/// Constructor dependencies for [`Shell`].
pub struct ShellDeps {
	/// Backend access.
	pub loader: Arc<dyn ContentLoader>,
	/// Markdown collaborator.
	pub markdown: Arc<dyn MarkdownRenderer>,
	/// Chip collaborator.
	pub chips: Arc<dyn ChipRenderer>,
	/// Reading-time collaborator.
	pub read_time: Arc<dyn ReadTimeEstimator>,
	/// The document port.
	pub surface: Arc<dyn Surface>,
	/// The history port.
	pub environment: Arc<dyn Environment>,
	/// The time source.
	pub clock: Arc<dyn Clock>,
	/// Configuration.
	pub settings: ShellSettings,
}

/// The assembled navigation shell.
pub struct Shell {
	/// The shell's outbound signal channels.
	pub events: Arc<ShellEvents>,
	/// Url routing.
	pub router: Arc<Router>,
	/// Overlay modal lifecycle.
	pub modal: Arc<ModalManager>,
	/// Full-page orchestration.
	pub pages: Arc<PageManager>,
	environment: Arc<dyn Environment>,
	loader: Arc<dyn ContentLoader>,
}

impl Shell {
	/// Wires the managers together. Call [`Shell::bootstrap`] before the
	/// first dispatch.
	pub fn new(deps: ShellDeps) -> Self {
		let events = Arc::new(ShellEvents::new());
		let router = Arc::new(
			Router::new(deps.environment.clone(), events.router.clone())
				.with_reset_scroll(deps.settings.page.reset_scroll_on_navigate),
		);
		let modal = Arc::new(ModalManager::new(
			deps.surface.clone(),
			events.clone(),
			deps.settings.modal.clone(),
		));
		let pages = Arc::new(PageManager::new(PageManagerDeps {
			router: router.clone(),
			modal: modal.clone(),
			loader: deps.loader.clone(),
			markdown: deps.markdown,
			chips: deps.chips,
			read_time: deps.read_time,
			surface: deps.surface,
			environment: deps.environment.clone(),
			clock: deps.clock,
			events: events.clone(),
			settings: deps.settings.page.clone(),
		}));

		Self {
			events,
			router,
			modal,
			pages,
			environment: deps.environment,
			loader: deps.loader,
		}
	}

	/// Registers the url surface and the built-in modal kinds.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if a route pattern fails to compile.
	pub fn bootstrap(&self) -> Result<(), PatternError> {
		self.pages.mount_routes()?;

		let loader = Arc::clone(&self.loader);
		self.modal.register_kind("projects", move |options| {
			let loader = Arc::clone(&loader);
			Box::pin(async move {
				let category = options
					.category
					.as_deref()
					.unwrap_or("work")
					.parse()
					.unwrap_or(Category::Work);
				let projects = loader.project_list(category).await?;
				Ok(render::modal_projects(category.as_str(), &projects))
			})
		});

		Ok(())
	}

	/// Dispatches the route for the environment's current path.
	///
	/// Hosts call this once after [`Shell::bootstrap`], so a deep link
	/// lands on the right surface.
	pub async fn start(&self) {
		let path = self.environment.current_path();
		self.router.handle_route(&path, None).await;
	}

	/// Forwards an anchor click; returns whether the host must prevent
	/// the native navigation.
	///
	/// A card click inside the open modal takes the modal-aware path:
	/// the viewpoint is captured for the return trip and history is
	/// updated without a second route dispatch. Everything else goes
	/// through plain router interception.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Navigation`] if the resulting navigation
	/// could not push its history entry.
	pub async fn handle_link_click(&self, click: &LinkClick) -> Result<bool, RouterError> {
		if self.modal.is_open()
			&& let InterceptDecision::Intercept(path) = intercept::decide(click)
			&& let Some((id, category)) = detail_route(&path)
		{
			self.pages
				.navigate_to_project_with_transition(&id, category)
				.await;
			return Ok(true);
		}
		self.router.handle_link_click(click).await
	}

	/// Forwards a history pop.
	pub async fn handle_pop_state(&self, path: &str, payload: Option<serde_json::Value>) {
		self.router.handle_pop_state(path, payload).await;
	}

	/// Forwards an escape keypress.
	pub async fn handle_escape(&self) {
		self.modal.handle_escape().await;
	}

	/// Forwards a backdrop click.
	pub async fn handle_backdrop_click(&self) {
		self.modal.handle_backdrop_click().await;
	}
}

/// Parses a path as a project detail route.
fn detail_route(path: &str) -> Option<(String, Category)> {
	let detail = |id: &str, category: Category| {
		(!id.is_empty() && !id.contains('/')).then(|| (id.to_string(), category))
	};

	if let Some(id) = path.strip_prefix("/fun/") {
		return detail(id, Category::Fun);
	}
	if let Some(id) = path.strip_prefix("/projects/") {
		if Category::alias_of(id).is_some() {
			return None;
		}
		return detail(id, Category::Work);
	}
	None
}
