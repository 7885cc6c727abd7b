//! Overlay modal lifecycle.

use crate::events::{ModalLifecycleEvent, ShellEvents};
use crate::settings::ModalSettings;
use crate::surface::{FocusHandle, ModalChrome, ScrollRegion, Surface, TransitionTarget};
use futures::future::BoxFuture;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use vitrine_content::ContentError;

/// Lifecycle phase of the single overlay modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
	/// Nothing mounted.
	Closed,
	/// Renderer running / entrance transition pending.
	Opening,
	/// Fully open.
	Open,
	/// Exit transition running.
	Closing,
}

/// Options for opening a modal.
#[derive(Debug, Clone, Default)]
pub struct ModalOptions {
	/// Category hint handed to the renderer.
	pub category: Option<String>,
	/// Scroll offset to restore into the content node.
	pub scroll_offset: Option<f64>,
	/// Make the modal visible immediately instead of fading in.
	///
	/// Used when returning from a detail page, where the page surface is
	/// still mounted underneath and a second fade would double up.
	pub skip_entrance_animation: bool,
	/// Mount without a backdrop.
	pub fullscreen: bool,
}

/// Async factory producing a modal's content markup.
pub type ModalRenderer =
	Arc<dyn Fn(ModalOptions) -> BoxFuture<'static, Result<String, ContentError>> + Send + Sync>;

/// Lifecycle owner of the single overlay modal.
///
/// The modal container is reused across open/close cycles; content is
/// replaced per cycle, never the container. Transitions are serialized:
/// an `open` issued while a modal is up runs a full close first, so at
/// most one modal is ever open.
pub struct ModalManager {
	renderers: RwLock<HashMap<String, ModalRenderer>>,
	phase: RwLock<ModalPhase>,
	current_kind: RwLock<Option<String>>,
	previous_focus: Mutex<Option<FocusHandle>>,
	/// Serializes open/close sequences.
	transition: tokio::sync::Mutex<()>,
	surface: Arc<dyn Surface>,
	events: Arc<ShellEvents>,
	settings: ModalSettings,
}

impl ModalManager {
	/// Creates a manager over the given surface and channels.
	pub fn new(
		surface: Arc<dyn Surface>,
		events: Arc<ShellEvents>,
		settings: ModalSettings,
	) -> Self {
		Self {
			renderers: RwLock::new(HashMap::new()),
			phase: RwLock::new(ModalPhase::Closed),
			current_kind: RwLock::new(None),
			previous_focus: Mutex::new(None),
			transition: tokio::sync::Mutex::new(()),
			surface,
			events,
			settings,
		}
	}

	/// Registers a renderer for a modal kind.
	///
	/// The last registration for a given kind wins.
	pub fn register_kind<F>(&self, kind: &str, renderer: F)
	where
		F: Fn(ModalOptions) -> BoxFuture<'static, Result<String, ContentError>>
			+ Send
			+ Sync
			+ 'static,
	{
		self.renderers
			.write()
			.insert(kind.to_string(), Arc::new(renderer));
	}

	/// Whether a modal is open (or currently opening).
	pub fn is_open(&self) -> bool {
		matches!(*self.phase.read(), ModalPhase::Open | ModalPhase::Opening)
	}

	/// The current lifecycle phase.
	pub fn phase(&self) -> ModalPhase {
		*self.phase.read()
	}

	/// The kind of the open modal, if any.
	pub fn current_kind(&self) -> Option<String> {
		self.current_kind.read().clone()
	}

	/// The modal content's current scroll offset.
	pub fn content_scroll_offset(&self) -> f64 {
		self.surface.scroll_offset(ScrollRegion::ModalContent)
	}

	/// Opens a modal of the given kind.
	///
	/// Unknown kinds log a diagnostic and change nothing. If a modal is
	/// already up, it fully closes first; the two transitions never
	/// overlap.
	pub async fn open(&self, kind: &str, options: ModalOptions) {
		let renderer = self.renderers.read().get(kind).cloned();
		let Some(renderer) = renderer else {
			tracing::warn!(kind, "no renderer registered for modal kind");
			return;
		};

		let _transition = self.transition.lock().await;

		if matches!(*self.phase.read(), ModalPhase::Open | ModalPhase::Opening) {
			self.close_locked().await;
		}

		tracing::debug!(kind, "opening modal");
		*self.phase.write() = ModalPhase::Opening;
		*self.current_kind.write() = Some(kind.to_string());
		*self.previous_focus.lock() = self.surface.focused();

		let markup = match renderer(options.clone()).await {
			Ok(markup) => markup,
			Err(err) => {
				tracing::error!(kind, error = %err, "modal renderer failed");
				*self.phase.write() = ModalPhase::Closed;
				*self.current_kind.write() = None;
				*self.previous_focus.lock() = None;
				return;
			}
		};

		let chrome = if options.fullscreen {
			ModalChrome::Fullscreen
		} else {
			ModalChrome::Standard
		};
		self.surface.mount_modal(&markup, chrome);

		if options.skip_entrance_animation {
			self.surface.set_modal_visible(true);
		} else {
			// Two frames guarantee the initial styles are flushed before
			// the entrance transition starts
			self.surface.next_frame().await;
			self.surface.next_frame().await;
			self.surface.set_modal_visible(true);
		}

		if let Some(offset) = options.scroll_offset {
			self.surface
				.set_scroll_offset(ScrollRegion::ModalContent, offset);
		}

		self.surface.lock_scroll();
		self.surface.focus_first_in_modal();

		*self.phase.write() = ModalPhase::Open;
		self.events
			.modal_opened
			.send_robust(ModalLifecycleEvent {
				kind: kind.to_string(),
			})
			.await;
	}

	/// Closes the open modal; no-op when nothing is open.
	pub async fn close(&self) {
		let _transition = self.transition.lock().await;
		self.close_locked().await;
	}

	/// Close body, called with the transition lock held.
	async fn close_locked(&self) {
		if !matches!(*self.phase.read(), ModalPhase::Open | ModalPhase::Opening) {
			return;
		}

		tracing::debug!("closing modal");
		*self.phase.write() = ModalPhase::Closing;

		// Blur before hiding, so focus never sits inside a hidden subtree
		self.surface.blur_modal_focus();
		self.surface.set_modal_visible(false);
		self.surface.transition_end(TransitionTarget::Modal).await;

		self.surface.clear_modal();
		self.surface.unlock_scroll();
		if let Some(focus) = self.previous_focus.lock().take() {
			self.surface.restore_focus(&focus);
		}

		let kind = self.current_kind.write().take();
		*self.phase.write() = ModalPhase::Closed;
		self.events
			.modal_closed
			.send_robust(ModalLifecycleEvent {
				kind: kind.unwrap_or_default(),
			})
			.await;
	}

	/// Tears the modal down instantly, without the exit transition.
	///
	/// Used for the modal→page hand-off, where the incoming page covers
	/// the surface and an exit fade would play to nobody. Focus is not
	/// restored; it moves into the incoming page.
	pub async fn dismiss(&self) {
		let _transition = self.transition.lock().await;
		if !matches!(*self.phase.read(), ModalPhase::Open | ModalPhase::Opening) {
			return;
		}

		self.surface.blur_modal_focus();
		self.surface.clear_modal();
		self.surface.unlock_scroll();
		*self.previous_focus.lock() = None;

		let kind = self.current_kind.write().take();
		*self.phase.write() = ModalPhase::Closed;
		self.events
			.modal_closed
			.send_robust(ModalLifecycleEvent {
				kind: kind.unwrap_or_default(),
			})
			.await;
	}

	/// Escape key hook; closes when configuration allows.
	pub async fn handle_escape(&self) {
		if self.settings.close_on_escape {
			self.close().await;
		}
	}

	/// Backdrop click hook; closes when configuration allows.
	pub async fn handle_backdrop_click(&self) {
		if self.settings.close_on_backdrop {
			self.close().await;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::clock::InstantClock;
	use crate::surface::{HeadlessSurface, SurfaceOp, TransitionDurations};
	use std::time::Duration;

	fn fixed_renderer(
		markup: &'static str,
	) -> impl Fn(ModalOptions) -> BoxFuture<'static, Result<String, ContentError>> {
		move |_options| Box::pin(async move { Ok(markup.to_string()) })
	}

	struct Harness {
		manager: Arc<ModalManager>,
		surface: Arc<HeadlessSurface>,
		clock: Arc<InstantClock>,
		events: Arc<ShellEvents>,
	}

	fn harness() -> Harness {
		let clock = Arc::new(InstantClock::new());
		let surface = Arc::new(HeadlessSurface::new(
			clock.clone(),
			TransitionDurations::default(),
		));
		let events = Arc::new(ShellEvents::new());
		let manager = Arc::new(ModalManager::new(
			surface.clone(),
			events.clone(),
			ModalSettings::default(),
		));
		manager.register_kind("projects", fixed_renderer("<div>projects</div>"));
		Harness {
			manager,
			surface,
			clock,
			events,
		}
	}

	#[tokio::test]
	async fn test_open_then_close_cycle() {
		let h = harness();
		h.surface.simulate_focus("nav-button");

		h.manager.open("projects", ModalOptions::default()).await;
		assert!(h.manager.is_open());
		assert_eq!(h.manager.phase(), ModalPhase::Open);
		assert_eq!(h.manager.current_kind().as_deref(), Some("projects"));
		assert!(h.surface.modal_visible());
		assert!(h.surface.scroll_locked());

		h.manager.close().await;
		assert!(!h.manager.is_open());
		assert!(h.surface.modal_html().is_none());
		assert!(!h.surface.scroll_locked());
		// Focus went back to where it was before the modal opened
		assert_eq!(h.surface.focus(), Some(FocusHandle("nav-button".to_string())));
	}

	#[tokio::test]
	async fn test_open_waits_two_frames_before_visibility() {
		let h = harness();
		h.manager.open("projects", ModalOptions::default()).await;

		let journal = h.surface.journal();
		let mount = journal
			.iter()
			.position(|op| matches!(op, SurfaceOp::ModalMounted { .. }))
			.unwrap();
		assert_eq!(journal[mount + 1], SurfaceOp::FrameAwaited);
		assert_eq!(journal[mount + 2], SurfaceOp::FrameAwaited);
		assert_eq!(journal[mount + 3], SurfaceOp::ModalVisible(true));
	}

	#[tokio::test]
	async fn test_skip_entrance_animation_is_instant() {
		let h = harness();
		let options = ModalOptions {
			skip_entrance_animation: true,
			scroll_offset: Some(640.0),
			..ModalOptions::default()
		};
		h.manager.open("projects", options).await;

		let journal = h.surface.journal();
		assert!(!journal.contains(&SurfaceOp::FrameAwaited));
		assert_eq!(
			h.surface.scroll_offset(ScrollRegion::ModalContent),
			640.0
		);
	}

	#[tokio::test]
	async fn test_unknown_kind_is_a_no_op() {
		let h = harness();
		h.manager.open("settings", ModalOptions::default()).await;

		assert!(!h.manager.is_open());
		assert!(h.surface.journal().is_empty());
	}

	#[tokio::test]
	async fn test_last_registration_wins() {
		let h = harness();
		h.manager
			.register_kind("projects", fixed_renderer("<div>second</div>"));

		h.manager.open("projects", ModalOptions::default()).await;
		assert_eq!(h.surface.modal_html().as_deref(), Some("<div>second</div>"));
	}

	#[tokio::test]
	async fn test_reopen_runs_exactly_one_close_cycle() {
		let h = harness();
		let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
		for (signal, tag) in [
			(&h.events.modal_opened, "opened"),
			(&h.events.modal_closed, "closed"),
		] {
			let order = Arc::clone(&order);
			signal.connect(move |_| {
				let order = Arc::clone(&order);
				async move {
					order.lock().push(tag);
					Ok(())
				}
			});
		}

		h.manager.open("projects", ModalOptions::default()).await;
		h.manager.open("projects", ModalOptions::default()).await;

		assert_eq!(order.lock().as_slice(), &["opened", "closed", "opened"]);
		assert!(h.manager.is_open());
	}

	#[tokio::test]
	async fn test_concurrent_opens_serialize() {
		let h = harness();
		tokio::join!(
			h.manager.open("projects", ModalOptions::default()),
			h.manager.open("projects", ModalOptions::default()),
		);

		// Never two simultaneously open modals: mounts and clears alternate
		let journal = h.surface.journal();
		let mounts = journal
			.iter()
			.filter(|op| matches!(op, SurfaceOp::ModalMounted { .. }))
			.count();
		let clears = journal
			.iter()
			.filter(|op| matches!(op, SurfaceOp::ModalCleared))
			.count();
		assert_eq!(mounts, 2);
		assert_eq!(clears, 1);
		assert!(h.manager.is_open());
	}

	#[tokio::test]
	async fn test_close_waits_the_configured_duration() {
		let h = harness();
		h.manager.open("projects", ModalOptions::default()).await;
		h.manager.close().await;

		assert!(h.clock.slept().contains(&Duration::from_millis(300)));
	}

	#[tokio::test]
	async fn test_close_blurs_before_hiding() {
		let h = harness();
		h.manager.open("projects", ModalOptions::default()).await;
		h.manager.close().await;

		let journal = h.surface.journal();
		let blur = journal
			.iter()
			.position(|op| matches!(op, SurfaceOp::ModalFocusBlurred))
			.unwrap();
		let hide = journal
			.iter()
			.position(|op| matches!(op, SurfaceOp::ModalVisible(false)))
			.unwrap();
		assert!(blur < hide);
	}

	#[tokio::test]
	async fn test_close_when_closed_is_a_no_op() {
		let h = harness();
		h.manager.close().await;
		assert!(h.surface.journal().is_empty());
	}

	#[tokio::test]
	async fn test_escape_respects_configuration() {
		let clock = Arc::new(InstantClock::new());
		let surface = Arc::new(HeadlessSurface::new(
			clock.clone(),
			TransitionDurations::default(),
		));
		let events = Arc::new(ShellEvents::new());
		let manager = ModalManager::new(
			surface.clone(),
			events,
			ModalSettings {
				close_on_escape: false,
				..ModalSettings::default()
			},
		);
		manager.register_kind("projects", fixed_renderer("<div/>"));

		manager.open("projects", ModalOptions::default()).await;
		manager.handle_escape().await;
		assert!(manager.is_open());

		manager.handle_backdrop_click().await;
		assert!(!manager.is_open());
	}

	#[tokio::test]
	async fn test_dismiss_skips_exit_transition() {
		let h = harness();
		h.manager.open("projects", ModalOptions::default()).await;
		h.surface.clear_journal();

		h.manager.dismiss().await;

		let journal = h.surface.journal();
		assert!(!journal.contains(&SurfaceOp::TransitionAwaited(TransitionTarget::Modal)));
		assert!(journal.contains(&SurfaceOp::ModalCleared));
		assert!(!h.manager.is_open());
	}

	#[tokio::test]
	async fn test_renderer_failure_leaves_modal_closed() {
		let h = harness();
		h.manager.register_kind("broken", |_options| {
			Box::pin(async { Err(ContentError::Status { status: 500 }) })
		});

		h.manager.open("broken", ModalOptions::default()).await;
		assert!(!h.manager.is_open());
		assert!(h.surface.modal_html().is_none());
	}

	#[tokio::test]
	async fn test_fullscreen_variant_omits_backdrop() {
		let h = harness();
		let options = ModalOptions {
			fullscreen: true,
			..ModalOptions::default()
		};
		h.manager.open("projects", options).await;

		assert!(h.surface.journal().contains(&SurfaceOp::ModalMounted {
			chrome: ModalChrome::Fullscreen
		}));
	}
}
