//! Full-page view orchestration.
//!
//! The [`PageManager`] owns the page container and the hand-off between
//! the desktop canvas, the overlay modal, and full-page views. Its
//! navigation state is a single tagged value, with no independent
//! booleans to fall out of sync, and every page render funnels through
//! one re-entrant transition primitive guarded by a generation counter:
//! when navigations overlap, the newest one wins and the older one stops
//! before its next surface write.

use crate::clock::Clock;
use crate::events::{PageKind, PageLifecycleEvent, ShellEvents};
use crate::modal::{ModalManager, ModalOptions};
use crate::render;
use crate::settings::PageSettings;
use crate::surface::{ScrollRegion, Surface, TransitionTarget};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use vitrine_content::{
	frontmatter, Category, ChipRenderer, ContentError, ContentLoader, MarkdownRenderer,
	ReadTimeEstimator,
};
use vitrine_router::{Environment, HistoryState, PatternError, Router};

/// Which view currently owns the primary surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationState {
	/// The background canvas; no page is mounted.
	DesktopCanvas,
	/// A project detail page.
	ProjectDetail {
		/// The project id.
		id: String,
		/// The project's category.
		category: Category,
	},
	/// A projects list page.
	ProjectsList {
		/// The listed category.
		category: Category,
	},
	/// The generic error page.
	ErrorPage,
}

impl NavigationState {
	/// Whether a full-page view (rather than the canvas) is active.
	pub fn is_page_mode(&self) -> bool {
		!matches!(self, Self::DesktopCanvas)
	}

	fn page_kind(&self) -> Option<PageKind> {
		match self {
			Self::DesktopCanvas => None,
			Self::ProjectDetail { .. } => Some(PageKind::ProjectDetail),
			Self::ProjectsList { .. } => Some(PageKind::ProjectsList),
			Self::ErrorPage => Some(PageKind::ErrorPage),
		}
	}
}

/// A saved modal viewpoint: which list was open and how far it was
/// scrolled.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalReturn {
	/// The category the modal was showing.
	pub category: String,
	/// The content node's scroll offset.
	pub scroll_offset: f64,
}

/// Constructor dependencies for [`PageManager`].
pub struct PageManagerDeps {
	/// The router this manager registers its routes on.
	pub router: Arc<Router>,
	/// The modal manager for cross-surface hand-off.
	pub modal: Arc<ModalManager>,
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
	/// The history port, for the same-surface navigation bypass.
	pub environment: Arc<dyn Environment>,
	/// The time source.
	pub clock: Arc<dyn Clock>,
	/// Outbound signal channels.
	pub events: Arc<ShellEvents>,
	/// Transition timing settings.
	pub settings: PageSettings,
}

/// Orchestrates full-page views and their hand-off to the modal and the
/// desktop canvas.
pub struct PageManager {
	router: Arc<Router>,
	modal: Arc<ModalManager>,
	loader: Arc<dyn ContentLoader>,
	markdown: Arc<dyn MarkdownRenderer>,
	chips: Arc<dyn ChipRenderer>,
	read_time: Arc<dyn ReadTimeEstimator>,
	surface: Arc<dyn Surface>,
	environment: Arc<dyn Environment>,
	clock: Arc<dyn Clock>,
	events: Arc<ShellEvents>,
	settings: PageSettings,
	state: RwLock<NavigationState>,
	/// Viewpoint captured when a detail page is entered from the modal.
	last_modal_view: Mutex<Option<ModalReturn>>,
	/// Set by `transition_back_to_projects`, consumed by
	/// `show_desktop_canvas`. Never survives an unrelated navigation.
	pending_return: Mutex<Option<ModalReturn>>,
	/// Monotonic transition generation; stale transitions abandon.
	generation: AtomicU64,
}

impl PageManager {
	/// Creates a manager from its dependencies.
	pub fn new(deps: PageManagerDeps) -> Self {
		Self {
			router: deps.router,
			modal: deps.modal,
			loader: deps.loader,
			markdown: deps.markdown,
			chips: deps.chips,
			read_time: deps.read_time,
			surface: deps.surface,
			environment: deps.environment,
			clock: deps.clock,
			events: deps.events,
			settings: deps.settings,
			state: RwLock::new(NavigationState::DesktopCanvas),
			last_modal_view: Mutex::new(None),
			pending_return: Mutex::new(None),
			generation: AtomicU64::new(0),
		}
	}

	/// The current navigation state.
	pub fn state(&self) -> NavigationState {
		self.state.read().clone()
	}

	/// Whether a full-page view is active.
	pub fn is_page_mode(&self) -> bool {
		self.state.read().is_page_mode()
	}

	/// Whether a modal reopen is pending on the next root resolution.
	pub fn has_pending_modal_return(&self) -> bool {
		self.pending_return.lock().is_some()
	}

	/// Registers the url surface on the owned router.
	///
	/// `/projects/:id` is disambiguated at dispatch: a category alias is
	/// a list request, anything else a project id.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if a pattern fails to compile.
	pub fn mount_routes(self: &Arc<Self>) -> Result<(), PatternError> {
		let pages = Arc::clone(self);
		self.router.register("/", move |_ctx| {
			let pages = Arc::clone(&pages);
			Box::pin(async move {
				pages.show_desktop_canvas().await;
				Ok(())
			})
		})?;

		let pages = Arc::clone(self);
		self.router.register("/projects", move |_ctx| {
			let pages = Arc::clone(&pages);
			Box::pin(async move {
				pages.show_projects_list_page(Category::All).await;
				Ok(())
			})
		})?;

		let pages = Arc::clone(self);
		self.router.register("/projects/:id", move |ctx| {
			let pages = Arc::clone(&pages);
			Box::pin(async move {
				let id = ctx.params.get("id").cloned().unwrap_or_default();
				match Category::alias_of(&id) {
					Some(category) => pages.show_projects_list_page(category).await,
					None => pages.show_project_page(&id, Category::Work).await,
				}
				Ok(())
			})
		})?;

		let pages = Arc::clone(self);
		self.router.register("/fun/:id", move |ctx| {
			let pages = Arc::clone(&pages);
			Box::pin(async move {
				let id = ctx.params.get("id").cloned().unwrap_or_default();
				pages.show_project_page(&id, Category::Fun).await;
				Ok(())
			})
		})?;

		Ok(())
	}

	fn begin_transition(&self) -> u64 {
		self.generation.fetch_add(1, Ordering::SeqCst) + 1
	}

	fn is_current(&self, generation: u64) -> bool {
		self.generation.load(Ordering::SeqCst) == generation
	}

	/// Shows a project detail page.
	///
	/// Load or parse failures render the error page; nothing propagates
	/// past this boundary.
	pub async fn show_project_page(&self, id: &str, category: Category) {
		let generation = self.begin_transition();

		match self.load_project_markup(id, category).await {
			Ok(html) => {
				if self
					.transition_to_page(generation, &html, PageKind::ProjectDetail)
					.await
				{
					*self.state.write() = NavigationState::ProjectDetail {
						id: id.to_string(),
						category,
					};
				}
			}
			Err(err) => {
				tracing::error!(id, category = %category, error = %err, "project load failed");
				self.render_error(generation, "This project could not be loaded.")
					.await;
			}
		}
	}

	async fn load_project_markup(
		&self,
		id: &str,
		category: Category,
	) -> Result<String, ContentError> {
		let raw = self.loader.document(category, id).await?;
		let (meta, body) = frontmatter::split(&raw);
		let minutes = self.read_time.estimate_minutes(body);
		let body_html = self.markdown.render(body);
		Ok(render::project_detail(id, category, &meta, minutes, &body_html))
	}

	/// Shows a projects list page.
	///
	/// The transition overlay goes up before the fetch (it masks the
	/// unstyled swap) and comes down only after the chip collaborator
	/// finished; that ordering is a guarantee, not an optimization.
	pub async fn show_projects_list_page(&self, category: Category) {
		let generation = self.begin_transition();

		self.surface.set_overlay_active(true);

		let projects = match self.loader.project_list(category).await {
			Ok(projects) => projects,
			Err(err) => {
				tracing::error!(category = %category, error = %err, "project list load failed");
				self.render_error(generation, "Projects are unavailable right now.")
					.await;
				return;
			}
		};
		if !self.is_current(generation) {
			return;
		}

		let html = render::project_grid(&projects);
		if !self
			.transition_to_page(generation, &html, PageKind::ProjectsList)
			.await
		{
			return;
		}
		*self.state.write() = NavigationState::ProjectsList { category };

		let mut tags: Vec<String> = Vec::new();
		for project in &projects {
			for tag in &project.tags {
				if !tags.contains(tag) {
					tags.push(tag.clone());
				}
			}
		}
		self.chips.render_chips(&tags).await;

		if self.is_current(generation) {
			self.surface.set_overlay_active(false);
		}
	}

	/// Renders the generic error page.
	pub async fn show_error_page(&self, message: &str) {
		let generation = self.begin_transition();
		self.render_error(generation, message).await;
	}

	async fn render_error(&self, generation: u64, message: &str) {
		let html = render::error_page(message);
		if self
			.transition_to_page(generation, &html, PageKind::ErrorPage)
			.await
		{
			*self.state.write() = NavigationState::ErrorPage;
		}
		if self.is_current(generation) {
			self.surface.set_overlay_active(false);
		}
	}

	/// The single re-entrant page transition primitive.
	///
	/// Replaces the container content, enters page mode, applies the
	/// fade-in class after the configured delay, and resolves once the
	/// fade-complete future resolves. Returns `false` if a newer
	/// transition took over at any await point; callers must treat the
	/// page as settled only on `true`.
	async fn transition_to_page(&self, generation: u64, html: &str, kind: PageKind) -> bool {
		if !self.is_current(generation) {
			return false;
		}

		self.surface.set_page_content(html);
		self.surface.set_page_mode(true);

		self.clock.sleep(self.settings.fade_delay()).await;
		if !self.is_current(generation) {
			return false;
		}

		self.surface.set_page_visible(true);
		self.surface.transition_end(TransitionTarget::Page).await;
		if !self.is_current(generation) {
			return false;
		}

		self.events
			.page_shown
			.send_robust(PageLifecycleEvent { page: kind })
			.await;
		true
	}

	/// Resolves the root route.
	///
	/// Two distinct outcomes share this handler, discriminated solely by
	/// the pending [`ModalReturn`]: with one pending, the modal reopens
	/// over the still-mounted page at the saved viewpoint (entrance fade
	/// skipped, so the background appears instantly); otherwise the page
	/// fades out symmetrically and the canvas comes back.
	pub async fn show_desktop_canvas(&self) {
		let pending = self.pending_return.lock().take();

		if let Some(pending) = pending {
			let options = ModalOptions {
				category: Some(pending.category.clone()),
				scroll_offset: Some(pending.scroll_offset),
				skip_entrance_animation: true,
				fullscreen: false,
			};
			self.modal.open("projects", options).await;

			// The page underneath is dismissed without its exit fade;
			// the modal already covers it
			let _ = self.begin_transition();
			self.surface.set_page_visible(false);
			self.surface.set_page_mode(false);
			self.surface.set_page_content("");

			let previous =
				std::mem::replace(&mut *self.state.write(), NavigationState::DesktopCanvas);
			if let Some(kind) = previous.page_kind() {
				self.events
					.page_hidden
					.send_robust(PageLifecycleEvent { page: kind })
					.await;
			}
			return;
		}

		let generation = self.begin_transition();
		let previous = self.state.read().clone();

		if previous.is_page_mode() {
			self.surface.set_page_visible(false);
			self.surface.transition_end(TransitionTarget::Page).await;
			if !self.is_current(generation) {
				return;
			}
			self.surface.set_page_mode(false);
			self.surface.set_page_content("");
		}

		*self.state.write() = NavigationState::DesktopCanvas;
		if let Some(kind) = previous.page_kind() {
			self.events
				.page_hidden
				.send_robust(PageLifecycleEvent { page: kind })
				.await;
		}
	}

	/// Leaves a detail page back towards the projects modal.
	///
	/// Fades the detail content out, stores the modal return viewpoint,
	/// then routes to `/`; the shared root handler reopens the modal
	/// because the return is pending.
	pub async fn transition_back_to_projects(&self, category: &str) {
		let _ = self.begin_transition();
		self.surface.set_page_visible(false);
		self.surface.transition_end(TransitionTarget::Page).await;

		// Prefer the viewpoint captured when the modal was left; fall
		// back to the caller's category at the top of the list
		let saved = self.last_modal_view.lock().take();
		let pending = match saved {
			Some(view) => view,
			None => ModalReturn {
				category: category.to_string(),
				scroll_offset: 0.0,
			},
		};
		*self.pending_return.lock() = Some(pending);

		if let Err(err) = self.router.navigate("/", None).await {
			tracing::error!(error = %err, "return navigation failed");
			// Never leave the return pending across a failed hand-off
			self.pending_return.lock().take();
		}
	}

	/// Opens a detail page from inside the open modal.
	///
	/// Captures the modal's viewpoint for the later return trip, pushes
	/// the history entry directly (bypassing the router so the route
	/// handler does not run a second transition), then shows the page.
	pub async fn navigate_to_project_with_transition(&self, id: &str, category: Category) {
		let scroll_offset = self.modal.content_scroll_offset();
		*self.last_modal_view.lock() = Some(ModalReturn {
			category: category.as_str().to_string(),
			scroll_offset,
		});

		let path = match category {
			Category::Fun => format!("/fun/{}", id),
			_ => format!("/projects/{}", id),
		};
		if let Err(message) = self.environment.push_state(&HistoryState::new(&path)) {
			tracing::warn!(%message, %path, "history push rejected");
		}

		self.modal.dismiss().await;
		self.show_project_page(id, category).await;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::clock::InstantClock;
	use crate::events::ShellEvents;
	use crate::settings::{ModalSettings, ShellSettings};
	use crate::surface::{HeadlessSurface, SurfaceOp, TransitionDurations};
	use crate::testing::{RecordingChips, StaticContentLoader, FIXED_READ_MINUTES};
	use crate::testing::{FixedReadTime, PlainMarkdown};
	use vitrine_router::MemoryEnvironment;

	struct Harness {
		pages: Arc<PageManager>,
		surface: Arc<HeadlessSurface>,
		env: Arc<MemoryEnvironment>,
		router: Arc<Router>,
		modal: Arc<ModalManager>,
	}

	fn harness(loader: StaticContentLoader) -> Harness {
		let settings = ShellSettings::default();
		let clock = Arc::new(InstantClock::new());
		let surface = Arc::new(HeadlessSurface::new(
			clock.clone(),
			TransitionDurations::from(&settings),
		));
		let env = Arc::new(MemoryEnvironment::new());
		let events = Arc::new(ShellEvents::new());
		let router = Arc::new(Router::new(env.clone(), events.router.clone()));
		let modal = Arc::new(ModalManager::new(
			surface.clone(),
			events.clone(),
			ModalSettings::default(),
		));
		let pages = Arc::new(PageManager::new(PageManagerDeps {
			router: router.clone(),
			modal: modal.clone(),
			loader: Arc::new(loader),
			markdown: Arc::new(PlainMarkdown),
			chips: Arc::new(RecordingChips::new(None)),
			read_time: Arc::new(FixedReadTime),
			surface: surface.clone(),
			environment: env.clone(),
			clock,
			events,
			settings: settings.page,
		}));
		pages.mount_routes().unwrap();
		Harness {
			pages,
			surface,
			env,
			router,
			modal,
		}
	}

	#[tokio::test]
	async fn test_detail_page_renders_document() {
		let h = harness(StaticContentLoader::with_default_fixtures());

		h.pages.show_project_page("atlas", Category::Work).await;

		let content = h.surface.page_content();
		assert!(content.contains("<h1>Atlas</h1>"));
		assert!(content.contains(&format!("{} min read", FIXED_READ_MINUTES)));
		assert!(h.surface.page_mode());
		assert!(h.surface.page_visible());
		assert_eq!(
			h.pages.state(),
			NavigationState::ProjectDetail {
				id: "atlas".to_string(),
				category: Category::Work,
			}
		);
	}

	#[tokio::test]
	async fn test_detail_load_failure_renders_error_page() {
		let h = harness(StaticContentLoader::empty());

		h.pages.show_project_page("ghost", Category::Work).await;

		assert!(h.surface.page_content().contains("error-page"));
		assert_eq!(h.pages.state(), NavigationState::ErrorPage);
	}

	#[tokio::test]
	async fn test_list_overlay_up_before_fetch_down_after_chips() {
		let loader = StaticContentLoader::with_default_fixtures();
		let settings = ShellSettings::default();
		let clock = Arc::new(InstantClock::new());
		let surface = Arc::new(HeadlessSurface::new(
			clock.clone(),
			TransitionDurations::from(&settings),
		));
		let env = Arc::new(MemoryEnvironment::new());
		let events = Arc::new(ShellEvents::new());
		let router = Arc::new(Router::new(env.clone(), events.router.clone()));
		let modal = Arc::new(ModalManager::new(
			surface.clone(),
			events.clone(),
			ModalSettings::default(),
		));
		let chips = Arc::new(RecordingChips::new(Some(surface.clone())));
		let pages = Arc::new(PageManager::new(PageManagerDeps {
			router,
			modal,
			loader: Arc::new(loader),
			markdown: Arc::new(PlainMarkdown),
			chips: chips.clone(),
			read_time: Arc::new(FixedReadTime),
			surface: surface.clone(),
			environment: env,
			clock,
			events,
			settings: settings.page,
		}));

		pages.show_projects_list_page(Category::Work).await;

		let journal = surface.journal();
		let overlay_up = journal
			.iter()
			.position(|op| matches!(op, SurfaceOp::OverlayActive(true)))
			.unwrap();
		let content = journal
			.iter()
			.position(|op| matches!(op, SurfaceOp::PageContent(_)))
			.unwrap();
		let chips_done = journal
			.iter()
			.position(|op| matches!(op, SurfaceOp::Note(n) if n == "chips-rendered"))
			.unwrap();
		let overlay_down = journal
			.iter()
			.position(|op| matches!(op, SurfaceOp::OverlayActive(false)))
			.unwrap();

		assert!(overlay_up < content);
		assert!(chips_done < overlay_down);
		assert_eq!(chips.calls().len(), 1);
	}

	#[tokio::test]
	async fn test_route_disambiguation_category_alias_lists() {
		let h = harness(StaticContentLoader::with_default_fixtures());

		h.router.handle_route("/projects/fun", None).await;
		assert_eq!(
			h.pages.state(),
			NavigationState::ProjectsList {
				category: Category::Fun
			}
		);

		h.router.handle_route("/projects/atlas", None).await;
		assert_eq!(
			h.pages.state(),
			NavigationState::ProjectDetail {
				id: "atlas".to_string(),
				category: Category::Work,
			}
		);
	}

	#[tokio::test]
	async fn test_fun_route_uses_fun_category() {
		let h = harness(StaticContentLoader::with_default_fixtures());

		h.router.handle_route("/fun/pixel-garden", None).await;
		assert_eq!(
			h.pages.state(),
			NavigationState::ProjectDetail {
				id: "pixel-garden".to_string(),
				category: Category::Fun,
			}
		);
	}

	#[tokio::test]
	async fn test_desktop_canvas_fades_page_out() {
		let h = harness(StaticContentLoader::with_default_fixtures());
		h.pages.show_project_page("atlas", Category::Work).await;
		h.surface.clear_journal();

		h.pages.show_desktop_canvas().await;

		assert!(!h.pages.is_page_mode());
		assert!(!h.surface.page_mode());
		assert_eq!(h.surface.page_content(), "");
		let journal = h.surface.journal();
		assert!(journal.contains(&SurfaceOp::TransitionAwaited(TransitionTarget::Page)));
	}

	#[tokio::test]
	async fn test_desktop_canvas_when_already_on_canvas_is_quiet() {
		let h = harness(StaticContentLoader::with_default_fixtures());
		h.pages.show_desktop_canvas().await;

		let journal = h.surface.journal();
		assert!(!journal.contains(&SurfaceOp::PageVisible(false)));
	}

	#[tokio::test]
	async fn test_modal_return_round_trip() {
		let h = harness(StaticContentLoader::with_default_fixtures());

		// Open the projects modal and scroll it
		h.modal.register_kind("projects", |_options| {
			Box::pin(async { Ok("<div>projects</div>".to_string()) })
		});
		h.modal
			.open("projects", crate::modal::ModalOptions::default())
			.await;
		h.surface.simulate_scroll(ScrollRegion::ModalContent, 512.0);

		// Into a detail page via the bypass
		h.pages
			.navigate_to_project_with_transition("atlas", Category::Work)
			.await;
		assert!(!h.modal.is_open());
		assert!(h.pages.is_page_mode());
		assert_eq!(h.env.current_path(), "/projects/atlas");

		// And back: the root handler reopens the modal at the saved spot
		h.pages.transition_back_to_projects("work").await;

		assert!(!h.pages.has_pending_modal_return());
		assert!(h.modal.is_open());
		assert_eq!(
			h.surface.scroll_offset(ScrollRegion::ModalContent),
			512.0
		);
		assert_eq!(h.pages.state(), NavigationState::DesktopCanvas);

		// The reopen skipped the entrance frames
		let journal = h.surface.journal();
		let last_mount = journal
			.iter()
			.rposition(|op| matches!(op, SurfaceOp::ModalMounted { .. }))
			.unwrap();
		assert!(matches!(journal[last_mount + 1], SurfaceOp::ModalVisible(true)));
	}

	#[tokio::test]
	async fn test_plain_root_navigation_does_not_reopen_modal() {
		let h = harness(StaticContentLoader::with_default_fixtures());
		h.pages.show_project_page("atlas", Category::Work).await;

		h.router.navigate("/", None).await.unwrap();

		assert!(!h.modal.is_open());
		assert_eq!(h.pages.state(), NavigationState::DesktopCanvas);
	}

	#[tokio::test]
	async fn test_rapid_list_navigations_latest_wins() {
		let h = harness(StaticContentLoader::with_default_fixtures().yielding());

		futures::join!(
			h.pages.show_projects_list_page(Category::Work),
			h.pages.show_projects_list_page(Category::Fun),
		);

		// Only the fun grid landed in the container
		let content = h.surface.page_content();
		assert!(content.contains("pixel-garden"));
		assert!(!content.contains("atlas"));
		assert_eq!(
			h.pages.state(),
			NavigationState::ProjectsList {
				category: Category::Fun
			}
		);

		// Exactly one grid was written
		let writes = h
			.surface
			.journal()
			.iter()
			.filter(|op| matches!(op, SurfaceOp::PageContent(_)))
			.count();
		assert_eq!(writes, 1);
	}
}
