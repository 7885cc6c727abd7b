//! Shell signal channels.

use vitrine_router::RouterEvents;
use vitrine_signals::{Signal, SignalName};

/// Payload for modal lifecycle signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalLifecycleEvent {
	/// The modal kind that opened or closed.
	pub kind: String,
}

/// Which full-page view a page lifecycle signal refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
	/// A project detail page.
	ProjectDetail,
	/// A projects list page.
	ProjectsList,
	/// The generic error page.
	ErrorPage,
}

/// Payload for page lifecycle signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLifecycleEvent {
	/// The page the signal refers to.
	pub page: PageKind,
}

/// Every signal the shell emits, as one injectable bundle.
///
/// Navigation chrome and the desktop canvas receive this by reference at
/// construction and connect to the channels they care about; nothing in
/// the shell reads a global bus.
#[derive(Debug, Clone)]
pub struct ShellEvents {
	/// Router dispatch channels.
	pub router: RouterEvents,
	/// Fired once a modal finished opening.
	pub modal_opened: Signal<ModalLifecycleEvent>,
	/// Fired once a modal finished closing.
	pub modal_closed: Signal<ModalLifecycleEvent>,
	/// Fired once a page finished its entrance transition.
	pub page_shown: Signal<PageLifecycleEvent>,
	/// Fired once the page surface was handed back to the canvas.
	pub page_hidden: Signal<PageLifecycleEvent>,
}

impl ShellEvents {
	/// Creates a fresh channel bundle.
	pub fn new() -> Self {
		Self {
			router: RouterEvents::new(),
			modal_opened: Signal::new(SignalName::MODAL_OPENED),
			modal_closed: Signal::new(SignalName::MODAL_CLOSED),
			page_shown: Signal::new(SignalName::PAGE_SHOWN),
			page_hidden: Signal::new(SignalName::PAGE_HIDDEN),
		}
	}
}

impl Default for ShellEvents {
	fn default() -> Self {
		Self::new()
	}
}
