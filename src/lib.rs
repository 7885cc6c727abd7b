//! # Vitrine
//!
//! A client-side navigation and presentation state machine. Vitrine
//! coordinates three mutually-exclusive visual surfaces (a background
//! canvas, a single overlay modal, and a full-page view) driven by url
//! routing, asynchronous content loading, and transition-complete
//! futures.
//!
//! The state machine is fully headless: the host document, history,
//! timing, and backend all arrive as injected ports, so the same code
//! runs under a browser binding, a demo harness, or the test suite.
//!
//! ## Crates
//!
//! - [`signals`]: typed async publish/subscribe channels
//! - [`router`]: `:name`-pattern url matching, history, link interception
//! - [`content`]: content loader port, frontmatter, collaborator ports
//! - [`shell`]: modal + page orchestration and application wiring
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vitrine::prelude::*;
//! use vitrine::shell::testing::{
//!     FixedReadTime, PlainMarkdown, RecordingChips, StaticContentLoader,
//! };
//!
//! # async fn run() {
//! let settings = ShellSettings::default();
//! let clock = Arc::new(TokioClock);
//! let surface = Arc::new(HeadlessSurface::new(
//!     clock.clone(),
//!     TransitionDurations::from(&settings),
//! ));
//!
//! let shell = Shell::new(ShellDeps {
//!     loader: Arc::new(StaticContentLoader::with_default_fixtures()),
//!     markdown: Arc::new(PlainMarkdown),
//!     chips: Arc::new(RecordingChips::new(None)),
//!     read_time: Arc::new(FixedReadTime),
//!     surface,
//!     environment: Arc::new(MemoryEnvironment::new()),
//!     clock,
//!     settings,
//! });
//! shell.bootstrap().unwrap();
//! shell.start().await;
//! # }
//! ```

pub use vitrine_content as content;
pub use vitrine_router as router;
pub use vitrine_shell as shell;
pub use vitrine_signals as signals;

/// The common imports, in one place.
pub mod prelude {
	pub use vitrine_content::{
		Category, ContentError, ContentLoader, HttpContentLoader, ProjectSummary,
	};
	pub use vitrine_router::{
		Environment, HistoryState, LinkClick, MemoryEnvironment, Router, RouterEvents,
	};
	pub use vitrine_shell::{
		HeadlessSurface, ModalManager, ModalOptions, NavigationState, PageManager, Shell,
		ShellDeps, ShellEvents, ShellSettings, Surface, TokioClock, TransitionDurations,
	};
	pub use vitrine_signals::{Signal, SignalName};
}
