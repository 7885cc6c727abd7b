//! Pattern-based client-side routing.
//!
//! The [`Router`] matches urls against `:name`-style patterns in
//! registration order, integrates with browser-style history through an
//! injected [`Environment`] port, and reports dispatch outcomes over
//! typed signals so the rest of the shell can react without being wired
//! into the dispatch path.
//!
//! Nothing in this crate touches a real DOM: link interception is a pure
//! decision over a [`LinkClick`] description, and history is whatever the
//! environment port says it is. The bundled [`MemoryEnvironment`] makes
//! the whole router usable headlessly.

pub mod intercept;

mod error;
mod events;
mod history;
mod pattern;
mod router;

pub use error::{PatternError, RouterError};
pub use events::{NavigateEvent, NotFoundEvent, RouteErrorEvent, RouterEvents};
pub use history::{Environment, HistoryState, MemoryEnvironment};
pub use intercept::{InterceptDecision, LinkClick, MouseButton};
pub use pattern::PathPattern;
pub use router::{CurrentRoute, HandlerError, RouteContext, Router};
