//! Core router implementation.

use crate::error::{PatternError, RouterError};
use crate::events::{NavigateEvent, NotFoundEvent, RouteErrorEvent, RouterEvents};
use crate::history::{Environment, HistoryState};
use crate::intercept::{self, InterceptDecision, LinkClick};
use crate::pattern::PathPattern;
use futures::future::BoxFuture;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Error type a route handler may return.
///
/// Handler failures never abort the router; they are caught per dispatch,
/// logged, and reported on the error signal.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for registered handler functions.
type RouteHandlerFn =
	Arc<dyn Fn(RouteContext) -> BoxFuture<'static, Result<(), HandlerError>> + Send + Sync>;

/// Context handed to a route handler.
#[derive(Debug, Clone)]
pub struct RouteContext {
	/// The url being dispatched.
	pub url: String,
	/// The pattern that matched.
	pub pattern: String,
	/// Parameters extracted from the pattern.
	pub params: HashMap<String, String>,
	/// Opaque payload supplied by the navigation caller.
	pub state: Option<serde_json::Value>,
}

/// The route a dispatch last resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRoute {
	/// The resolved url.
	pub url: String,
	/// The matching pattern.
	pub pattern: String,
	/// Extracted parameters.
	pub params: HashMap<String, String>,
}

/// A single registered route.
struct Route {
	pattern: PathPattern,
	handler: RouteHandlerFn,
}

/// Pattern-matching url router with history integration.
///
/// Routes are scanned in registration order and the **first** match wins;
/// there is no specificity ranking. Registering the same pattern string a
/// second time replaces the earlier handler in place, keeping its
/// position in the scan order.
pub struct Router {
	routes: RwLock<Vec<Route>>,
	env: Arc<dyn Environment>,
	events: RouterEvents,
	current: RwLock<Option<CurrentRoute>>,
	reset_scroll_on_navigate: bool,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes_count", &self.routes.read().len())
			.field("current", &*self.current.read())
			.finish()
	}
}

impl Router {
	/// Creates a router over the given environment and signal channels.
	pub fn new(env: Arc<dyn Environment>, events: RouterEvents) -> Self {
		Self {
			routes: RwLock::new(Vec::new()),
			env,
			events,
			current: RwLock::new(None),
			reset_scroll_on_navigate: true,
		}
	}

	/// Disables or re-enables the scroll reset performed on `navigate`.
	pub fn with_reset_scroll(mut self, reset: bool) -> Self {
		self.reset_scroll_on_navigate = reset;
		self
	}

	/// Returns the router's signal channels.
	pub fn events(&self) -> &RouterEvents {
		&self.events
	}

	/// Registers a handler for a pattern.
	///
	/// Registration order is the only precedence rule: on dispatch the
	/// routes are scanned oldest-first and the first match wins, so an
	/// overlapping literal route (say `/projects/new`) must be registered
	/// *before* `/projects/:id` to ever be reachable. Registering the
	/// exact same pattern string again replaces the earlier handler
	/// without moving its slot.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern fails to compile.
	pub fn register<F>(&self, pattern: &str, handler: F) -> Result<(), PatternError>
	where
		F: Fn(RouteContext) -> BoxFuture<'static, Result<(), HandlerError>>
			+ Send
			+ Sync
			+ 'static,
	{
		let compiled = PathPattern::new(pattern)?;
		let handler: RouteHandlerFn = Arc::new(handler);
		let mut routes = self.routes.write();

		if let Some(existing) = routes
			.iter_mut()
			.find(|route| route.pattern.pattern() == pattern)
		{
			existing.handler = handler;
		} else {
			routes.push(Route {
				pattern: compiled,
				handler,
			});
		}
		Ok(())
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.read().len()
	}

	/// Returns the route the last dispatch resolved to.
	pub fn current_route(&self) -> Option<CurrentRoute> {
		self.current.read().clone()
	}

	/// Navigates to a url: pushes a history entry, then resolves it.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Navigation`] if the environment rejected
	/// the history entry. Handler failures and unmatched urls are *not*
	/// errors here; they surface on the error / not-found signals.
	pub async fn navigate(
		&self,
		url: &str,
		payload: Option<serde_json::Value>,
	) -> Result<(), RouterError> {
		let matched = self.match_url(url);

		let mut state = HistoryState::new(url);
		if let Some((_, params, _)) = &matched {
			state = state.with_params(params.clone());
		}
		if let Some(payload) = payload.clone() {
			state = state.with_payload(payload);
		}
		self.env.push_state(&state).map_err(RouterError::Navigation)?;

		if self.reset_scroll_on_navigate {
			self.env.reset_scroll();
		}

		tracing::debug!(url, "router navigate");
		self.events
			.navigate
			.send_robust(NavigateEvent {
				path: url.to_string(),
				params: matched
					.as_ref()
					.map(|(_, params, _)| params.clone())
					.unwrap_or_default(),
				pattern: matched.as_ref().map(|(pattern, _, _)| pattern.clone()),
			})
			.await;

		self.dispatch(url, payload, matched).await;
		Ok(())
	}

	/// Resolves a url against the registered routes without touching
	/// history.
	pub async fn handle_route(&self, url: &str, payload: Option<serde_json::Value>) {
		let matched = self.match_url(url);
		self.dispatch(url, payload, matched).await;
	}

	/// Resolves a history pop. Never pushes a new entry.
	pub async fn handle_pop_state(&self, path: &str, payload: Option<serde_json::Value>) {
		let matched = self.match_url(path);

		tracing::debug!(path, "router popstate");
		self.events
			.popstate
			.send_robust(NavigateEvent {
				path: path.to_string(),
				params: matched
					.as_ref()
					.map(|(_, params, _)| params.clone())
					.unwrap_or_default(),
				pattern: matched.as_ref().map(|(pattern, _, _)| pattern.clone()),
			})
			.await;

		self.dispatch(path, payload, matched).await;
	}

	/// Steps back one history entry and resolves the uncovered route.
	pub async fn back(&self) {
		if let Some(state) = self.env.back() {
			self.handle_pop_state(&state.path, state.payload.clone()).await;
		}
	}

	/// Steps forward one history entry and resolves the uncovered route.
	pub async fn forward(&self) {
		if let Some(state) = self.env.forward() {
			self.handle_pop_state(&state.path, state.payload.clone()).await;
		}
	}

	/// Applies the in-page interception policy to an anchor click.
	///
	/// Returns `true` when the click was intercepted and routed; the host
	/// must then prevent the native navigation.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Navigation`] if the resulting navigation
	/// could not push its history entry.
	pub async fn handle_link_click(&self, click: &LinkClick) -> Result<bool, RouterError> {
		match intercept::decide(click) {
			InterceptDecision::Intercept(path) => {
				self.navigate(&path, None).await?;
				Ok(true)
			}
			InterceptDecision::Ignore => Ok(false),
		}
	}

	/// Scans routes in registration order; first match wins.
	fn match_url(&self, url: &str) -> Option<(String, HashMap<String, String>, RouteHandlerFn)> {
		let routes = self.routes.read();
		for route in routes.iter() {
			if let Some(params) = route.pattern.matches(url) {
				return Some((
					route.pattern.pattern().to_string(),
					params,
					Arc::clone(&route.handler),
				));
			}
		}
		None
	}

	/// Invokes the matched handler, absorbing its failure, or reports a
	/// not-found.
	async fn dispatch(
		&self,
		url: &str,
		payload: Option<serde_json::Value>,
		matched: Option<(String, HashMap<String, String>, RouteHandlerFn)>,
	) {
		let Some((pattern, params, handler)) = matched else {
			tracing::warn!(url, "no route matched");
			self.events
				.not_found
				.send_robust(NotFoundEvent {
					path: url.to_string(),
				})
				.await;
			return;
		};

		*self.current.write() = Some(CurrentRoute {
			url: url.to_string(),
			pattern: pattern.clone(),
			params: params.clone(),
		});

		let ctx = RouteContext {
			url: url.to_string(),
			pattern: pattern.clone(),
			params,
			state: payload,
		};

		if let Err(err) = handler(ctx).await {
			tracing::error!(url, pattern = %pattern, error = %err, "route handler failed");
			self.events
				.error
				.send_robust(RouteErrorEvent {
					path: url.to_string(),
					pattern,
					message: err.to_string(),
				})
				.await;
		}
	}
}
