//! Cross-surface hand-off journeys through the public shell API.

use std::sync::Arc;
use vitrine_content::Category;
use vitrine_router::{Environment, LinkClick, MemoryEnvironment};
use vitrine_shell::testing::{FixedReadTime, PlainMarkdown, RecordingChips, StaticContentLoader};
use vitrine_shell::{
	HeadlessSurface, InstantClock, ModalOptions, NavigationState, ScrollRegion, Shell, ShellDeps,
	ShellSettings, Surface, TransitionDurations,
};

struct World {
	shell: Shell,
	surface: Arc<HeadlessSurface>,
	env: Arc<MemoryEnvironment>,
}

fn world_at(path: &str) -> World {
	let settings = ShellSettings::default();
	let clock = Arc::new(InstantClock::new());
	let surface = Arc::new(HeadlessSurface::new(
		clock.clone(),
		TransitionDurations::from(&settings),
	));
	let env = Arc::new(MemoryEnvironment::with_initial_path(path));
	let shell = Shell::new(ShellDeps {
		loader: Arc::new(StaticContentLoader::with_default_fixtures()),
		markdown: Arc::new(PlainMarkdown),
		chips: Arc::new(RecordingChips::new(Some(surface.clone()))),
		read_time: Arc::new(FixedReadTime),
		surface: surface.clone(),
		environment: env.clone(),
		clock,
		settings,
	});
	shell.bootstrap().unwrap();
	World {
		shell,
		surface,
		env,
	}
}

#[tokio::test]
async fn modal_to_page_and_back_restores_the_viewpoint() {
	let w = world_at("/");
	w.shell.start().await;

	// Browse projects in the modal and scroll down the list
	w.shell
		.modal
		.open(
			"projects",
			ModalOptions {
				category: Some("work".to_string()),
				..ModalOptions::default()
			},
		)
		.await;
	w.surface.simulate_scroll(ScrollRegion::ModalContent, 333.0);

	// Card click: into the detail page, history updated without a
	// second route dispatch
	w.shell
		.pages
		.navigate_to_project_with_transition("atlas", Category::Work)
		.await;
	assert!(!w.shell.modal.is_open());
	assert!(w.shell.pages.is_page_mode());
	assert_eq!(w.env.current_path(), "/projects/atlas");
	assert!(w.surface.page_content().contains("Atlas"));

	// Back affordance: the shared root handler reopens the modal at the
	// captured category and offset
	w.shell.pages.transition_back_to_projects("work").await;

	assert!(w.shell.modal.is_open());
	assert_eq!(w.shell.modal.current_kind().as_deref(), Some("projects"));
	assert_eq!(w.surface.scroll_offset(ScrollRegion::ModalContent), 333.0);
	assert!(w.surface.modal_html().unwrap().contains("data-category=\"work\""));
	assert_eq!(w.shell.pages.state(), NavigationState::DesktopCanvas);
	assert!(!w.shell.pages.has_pending_modal_return());
	assert_eq!(w.env.current_path(), "/");
}

#[tokio::test]
async fn unknown_url_emits_404_and_touches_nothing() {
	let w = world_at("/");
	let misses = Arc::new(parking_lot::Mutex::new(Vec::new()));
	{
		let misses = Arc::clone(&misses);
		w.shell.events.router.not_found.connect(move |event| {
			let misses = Arc::clone(&misses);
			async move {
				misses.lock().push(event.path.clone());
				Ok(())
			}
		});
	}

	w.shell.router.navigate("/does-not-exist", None).await.unwrap();

	assert_eq!(misses.lock().as_slice(), &["/does-not-exist".to_string()]);
	assert!(!w.shell.pages.is_page_mode());
	assert_eq!(w.surface.page_content(), "");
}

#[tokio::test]
async fn intercepted_card_click_routes_to_the_detail_page() {
	let w = world_at("/");
	w.shell.start().await;

	let prevented = w
		.shell
		.handle_link_click(&LinkClick::plain("/fun/pixel-garden"))
		.await
		.unwrap();

	assert!(prevented);
	assert_eq!(w.env.current_path(), "/fun/pixel-garden");
	assert_eq!(
		w.shell.pages.state(),
		NavigationState::ProjectDetail {
			id: "pixel-garden".to_string(),
			category: Category::Fun,
		}
	);
}

#[tokio::test]
async fn back_button_from_detail_returns_to_the_canvas() {
	let w = world_at("/");
	w.shell.start().await;
	w.shell.router.navigate("/projects/atlas", None).await.unwrap();
	assert!(w.shell.pages.is_page_mode());

	// Browser back: popstate resolves the root route, no new entry
	let entries_before = w.env.len();
	w.shell.router.back().await;

	assert_eq!(w.env.len(), entries_before);
	assert_eq!(w.shell.pages.state(), NavigationState::DesktopCanvas);
	assert!(!w.surface.page_mode());
}

#[tokio::test]
async fn list_page_journey_fetches_renders_and_drops_overlay() {
	let w = world_at("/projects");
	w.shell.start().await;

	assert_eq!(
		w.shell.pages.state(),
		NavigationState::ProjectsList {
			category: Category::All
		}
	);
	let content = w.surface.page_content();
	assert!(content.contains("atlas"));
	assert!(content.contains("pixel-garden"));
	assert!(!w.surface.overlay_active());
}

#[tokio::test]
async fn second_open_while_open_runs_one_full_cycle() {
	let w = world_at("/");
	let lifecycle = Arc::new(parking_lot::Mutex::new(Vec::new()));
	for (signal, tag) in [
		(&w.shell.events.modal_opened, "opened"),
		(&w.shell.events.modal_closed, "closed"),
	] {
		let lifecycle = Arc::clone(&lifecycle);
		signal.connect(move |_| {
			let lifecycle = Arc::clone(&lifecycle);
			async move {
				lifecycle.lock().push(tag);
				Ok(())
			}
		});
	}

	tokio::join!(
		w.shell.modal.open("projects", ModalOptions::default()),
		w.shell.modal.open("projects", ModalOptions::default()),
	);

	assert_eq!(
		lifecycle.lock().as_slice(),
		&["opened", "closed", "opened"]
	);
	assert!(w.shell.modal.is_open());
}
