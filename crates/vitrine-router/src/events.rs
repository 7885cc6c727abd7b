//! Router dispatch signals.

use std::collections::HashMap;
use vitrine_signals::{Signal, SignalName};

/// Payload for `router_navigate` and `router_popstate`.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigateEvent {
	/// The resolved path.
	pub path: String,
	/// Parameters extracted from the matched pattern.
	pub params: HashMap<String, String>,
	/// The pattern that matched, when one did.
	pub pattern: Option<String>,
}

/// Payload for `router_not_found`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundEvent {
	/// The path no pattern matched.
	pub path: String,
}

/// Payload for `router_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteErrorEvent {
	/// The path whose handler failed.
	pub path: String,
	/// The pattern whose handler failed.
	pub pattern: String,
	/// The handler's error message.
	pub message: String,
}

/// The router's outbound signal channels.
///
/// Injected into [`crate::Router`] at construction; navigation chrome and
/// the desktop canvas connect receivers to the channels they care about.
#[derive(Debug, Clone)]
pub struct RouterEvents {
	/// Fired after `navigate` pushed an entry and dispatched.
	pub navigate: Signal<NavigateEvent>,
	/// Fired after a history pop was dispatched.
	pub popstate: Signal<NavigateEvent>,
	/// Fired when no route matched.
	pub not_found: Signal<NotFoundEvent>,
	/// Fired when a route handler failed.
	pub error: Signal<RouteErrorEvent>,
}

impl RouterEvents {
	/// Creates a fresh set of channels with the built-in names.
	pub fn new() -> Self {
		Self {
			navigate: Signal::new(SignalName::ROUTER_NAVIGATE),
			popstate: Signal::new(SignalName::ROUTER_POPSTATE),
			not_found: Signal::new(SignalName::ROUTER_NOT_FOUND),
			error: Signal::new(SignalName::ROUTER_ERROR),
		}
	}
}

impl Default for RouterEvents {
	fn default() -> Self {
		Self::new()
	}
}
