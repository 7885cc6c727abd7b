//! DOM surface port.
//!
//! Everything the managers do to the document (content swaps, class
//! toggles, scroll and focus handling, transition waits) is expressed
//! against [`Surface`]. A browser host implements it over real elements;
//! the bundled [`HeadlessSurface`] keeps plain state and a journal of
//! operations, which is what the test suite asserts against.

use crate::clock::Clock;
use crate::settings::ShellSettings;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Scrollable region addressed by the managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRegion {
	/// The page/document scroll position.
	Page,
	/// The modal's content node.
	ModalContent,
}

/// Surface whose css transition the caller wants to await.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionTarget {
	/// The modal container.
	Modal,
	/// The page container.
	Page,
	/// The full-screen transition overlay.
	Overlay,
}

/// Structural variant of a mounted modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalChrome {
	/// Backdrop + content + close button.
	Standard,
	/// Content only; fullscreen variants omit the backdrop.
	Fullscreen,
}

/// Opaque reference to a focusable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusHandle(pub String);

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
	/// Page container content replaced.
	PageContent(String),
	/// Page mode toggled (canvas hidden/revealed).
	PageMode(bool),
	/// Page fade class toggled.
	PageVisible(bool),
	/// Transition overlay toggled.
	OverlayActive(bool),
	/// Modal structure mounted.
	ModalMounted {
		/// Structural variant used.
		chrome: ModalChrome,
	},
	/// Modal content cleared.
	ModalCleared,
	/// Modal visibility class toggled.
	ModalVisible(bool),
	/// Page scroll locked or unlocked.
	ScrollLocked(bool),
	/// A scroll offset restored.
	ScrollSet {
		/// The region scrolled.
		region: ScrollRegion,
		/// The restored offset.
		offset: f64,
	},
	/// Focus moved to the modal's first focusable descendant.
	FocusFirstInModal,
	/// Focus blurred out of the modal.
	ModalFocusBlurred,
	/// A previously captured focus restored.
	FocusRestored(String),
	/// An animation frame was awaited.
	FrameAwaited,
	/// A transition-complete future was awaited.
	TransitionAwaited(TransitionTarget),
	/// Free-form marker, used by test collaborators.
	Note(String),
}

/// Host document port.
#[async_trait]
pub trait Surface: Send + Sync {
	/// Replaces the page container's content.
	fn set_page_content(&self, html: &str);
	/// Enters or leaves page mode (hiding or revealing the canvas).
	fn set_page_mode(&self, active: bool);
	/// Toggles the page fade-in class.
	fn set_page_visible(&self, visible: bool);
	/// Toggles the transition overlay.
	fn set_overlay_active(&self, active: bool);
	/// Mounts the modal structure around the given content markup.
	fn mount_modal(&self, html: &str, chrome: ModalChrome);
	/// Clears the modal container.
	fn clear_modal(&self);
	/// Toggles the modal's visibility class.
	fn set_modal_visible(&self, visible: bool);
	/// Locks page scrolling while the modal is up.
	fn lock_scroll(&self);
	/// Unlocks page scrolling.
	fn unlock_scroll(&self);
	/// Reads a region's scroll offset.
	fn scroll_offset(&self, region: ScrollRegion) -> f64;
	/// Restores a region's scroll offset.
	fn set_scroll_offset(&self, region: ScrollRegion, offset: f64);
	/// Returns the currently focused element, if any.
	fn focused(&self) -> Option<FocusHandle>;
	/// Blurs focus if it sits inside the modal.
	fn blur_modal_focus(&self);
	/// Moves focus to the modal's first focusable descendant.
	fn focus_first_in_modal(&self);
	/// Restores a previously captured focus.
	fn restore_focus(&self, focus: &FocusHandle);
	/// Resolves on the next animation frame.
	async fn next_frame(&self);
	/// Resolves once the target's css transition completes.
	async fn transition_end(&self, target: TransitionTarget);
}

/// Transition durations mirrored from the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionDurations {
	/// Modal open/close fade.
	pub modal: Duration,
	/// Page fade.
	pub page: Duration,
	/// Overlay fade.
	pub overlay: Duration,
}

impl Default for TransitionDurations {
	fn default() -> Self {
		Self {
			modal: Duration::from_millis(300),
			page: Duration::from_millis(400),
			overlay: Duration::from_millis(200),
		}
	}
}

impl From<&ShellSettings> for TransitionDurations {
	fn from(settings: &ShellSettings) -> Self {
		Self {
			modal: settings.modal.close_duration(),
			page: settings.page.fade_duration(),
			overlay: settings.page.overlay_fade(),
		}
	}
}

/// A single animation frame, as approximated by headless hosts.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Default)]
struct HeadlessState {
	page_content: String,
	page_mode: bool,
	page_visible: bool,
	overlay_active: bool,
	modal_html: Option<String>,
	modal_chrome: Option<ModalChrome>,
	modal_visible: bool,
	scroll_locked: bool,
	page_scroll: f64,
	modal_scroll: f64,
	focus: Option<FocusHandle>,
}

/// In-memory [`Surface`] for headless hosts and tests.
///
/// Transition-complete futures resolve through the injected [`Clock`]
/// after the configured durations, and every operation is journaled in
/// call order.
pub struct HeadlessSurface {
	clock: Arc<dyn Clock>,
	durations: TransitionDurations,
	journal: Mutex<Vec<SurfaceOp>>,
	state: Mutex<HeadlessState>,
}

impl HeadlessSurface {
	/// Creates a surface over the given clock and durations.
	pub fn new(clock: Arc<dyn Clock>, durations: TransitionDurations) -> Self {
		Self {
			clock,
			durations,
			journal: Mutex::new(Vec::new()),
			state: Mutex::new(HeadlessState::default()),
		}
	}

	fn record(&self, op: SurfaceOp) {
		self.journal.lock().push(op);
	}

	/// Returns a copy of the journal.
	pub fn journal(&self) -> Vec<SurfaceOp> {
		self.journal.lock().clone()
	}

	/// Clears the journal.
	pub fn clear_journal(&self) {
		self.journal.lock().clear();
	}

	/// Appends a free-form marker to the journal.
	///
	/// Test collaborators use this to interleave their own completion
	/// points with surface operations.
	pub fn note(&self, label: impl Into<String>) {
		self.record(SurfaceOp::Note(label.into()));
	}

	/// Current page container content.
	pub fn page_content(&self) -> String {
		self.state.lock().page_content.clone()
	}

	/// Whether page mode is active.
	pub fn page_mode(&self) -> bool {
		self.state.lock().page_mode
	}

	/// Whether the page fade class is applied.
	pub fn page_visible(&self) -> bool {
		self.state.lock().page_visible
	}

	/// Whether the transition overlay is up.
	pub fn overlay_active(&self) -> bool {
		self.state.lock().overlay_active
	}

	/// The mounted modal markup, if any.
	pub fn modal_html(&self) -> Option<String> {
		self.state.lock().modal_html.clone()
	}

	/// Whether the modal's visibility class is applied.
	pub fn modal_visible(&self) -> bool {
		self.state.lock().modal_visible
	}

	/// Whether page scroll is locked.
	pub fn scroll_locked(&self) -> bool {
		self.state.lock().scroll_locked
	}

	/// Pretends the host focused an element, so a later modal open has
	/// something to capture and restore.
	pub fn simulate_focus(&self, id: impl Into<String>) {
		self.state.lock().focus = Some(FocusHandle(id.into()));
	}

	/// Pretends the user scrolled a region.
	pub fn simulate_scroll(&self, region: ScrollRegion, offset: f64) {
		let mut state = self.state.lock();
		match region {
			ScrollRegion::Page => state.page_scroll = offset,
			ScrollRegion::ModalContent => state.modal_scroll = offset,
		}
	}

	/// The current focus, if any.
	pub fn focus(&self) -> Option<FocusHandle> {
		self.state.lock().focus.clone()
	}
}

#[async_trait]
impl Surface for HeadlessSurface {
	fn set_page_content(&self, html: &str) {
		self.state.lock().page_content = html.to_string();
		self.record(SurfaceOp::PageContent(html.to_string()));
	}

	fn set_page_mode(&self, active: bool) {
		self.state.lock().page_mode = active;
		self.record(SurfaceOp::PageMode(active));
	}

	fn set_page_visible(&self, visible: bool) {
		self.state.lock().page_visible = visible;
		self.record(SurfaceOp::PageVisible(visible));
	}

	fn set_overlay_active(&self, active: bool) {
		self.state.lock().overlay_active = active;
		self.record(SurfaceOp::OverlayActive(active));
	}

	fn mount_modal(&self, html: &str, chrome: ModalChrome) {
		let mut state = self.state.lock();
		state.modal_html = Some(html.to_string());
		state.modal_chrome = Some(chrome);
		state.modal_visible = false;
		drop(state);
		self.record(SurfaceOp::ModalMounted { chrome });
	}

	fn clear_modal(&self) {
		let mut state = self.state.lock();
		state.modal_html = None;
		state.modal_chrome = None;
		state.modal_visible = false;
		state.modal_scroll = 0.0;
		drop(state);
		self.record(SurfaceOp::ModalCleared);
	}

	fn set_modal_visible(&self, visible: bool) {
		self.state.lock().modal_visible = visible;
		self.record(SurfaceOp::ModalVisible(visible));
	}

	fn lock_scroll(&self) {
		self.state.lock().scroll_locked = true;
		self.record(SurfaceOp::ScrollLocked(true));
	}

	fn unlock_scroll(&self) {
		self.state.lock().scroll_locked = false;
		self.record(SurfaceOp::ScrollLocked(false));
	}

	fn scroll_offset(&self, region: ScrollRegion) -> f64 {
		let state = self.state.lock();
		match region {
			ScrollRegion::Page => state.page_scroll,
			ScrollRegion::ModalContent => state.modal_scroll,
		}
	}

	fn set_scroll_offset(&self, region: ScrollRegion, offset: f64) {
		{
			let mut state = self.state.lock();
			match region {
				ScrollRegion::Page => state.page_scroll = offset,
				ScrollRegion::ModalContent => state.modal_scroll = offset,
			}
		}
		self.record(SurfaceOp::ScrollSet { region, offset });
	}

	fn focused(&self) -> Option<FocusHandle> {
		self.state.lock().focus.clone()
	}

	fn blur_modal_focus(&self) {
		self.state.lock().focus = None;
		self.record(SurfaceOp::ModalFocusBlurred);
	}

	fn focus_first_in_modal(&self) {
		self.state.lock().focus = Some(FocusHandle("modal:first-focusable".to_string()));
		self.record(SurfaceOp::FocusFirstInModal);
	}

	fn restore_focus(&self, focus: &FocusHandle) {
		self.state.lock().focus = Some(focus.clone());
		self.record(SurfaceOp::FocusRestored(focus.0.clone()));
	}

	async fn next_frame(&self) {
		self.record(SurfaceOp::FrameAwaited);
		self.clock.sleep(FRAME).await;
	}

	async fn transition_end(&self, target: TransitionTarget) {
		self.record(SurfaceOp::TransitionAwaited(target));
		let duration = match target {
			TransitionTarget::Modal => self.durations.modal,
			TransitionTarget::Page => self.durations.page,
			TransitionTarget::Overlay => self.durations.overlay,
		};
		self.clock.sleep(duration).await;
	}
}
