//! Modal and page orchestration for the vitrine navigation shell.
//!
//! This crate owns the three mutually-exclusive visual surfaces (the
//! background canvas, the single overlay modal, and the full-page view)
//! and keeps history, animation timing, scroll memory, and cross-surface
//! hand-off consistent while content loads asynchronously.
//!
//! All DOM effects go through the [`Surface`] port and all timing through
//! the [`Clock`] port, so the whole state machine runs headlessly. The
//! [`Shell`] type wires a [`vitrine_router::Router`], a [`ModalManager`]
//! and a [`PageManager`] together over one injected set of
//! [`ShellEvents`] channels.

pub mod render;
pub mod testing;

mod clock;
mod events;
mod modal;
mod pages;
mod settings;
mod shell;
mod surface;

pub use clock::{Clock, InstantClock, TokioClock};
pub use events::{ModalLifecycleEvent, PageKind, PageLifecycleEvent, ShellEvents};
pub use modal::{ModalManager, ModalOptions, ModalPhase, ModalRenderer};
pub use pages::{ModalReturn, NavigationState, PageManager, PageManagerDeps};
pub use settings::{ContentSettings, ModalSettings, PageSettings, ShellSettings};
pub use shell::{Shell, ShellDeps};
pub use surface::{
	FocusHandle, HeadlessSurface, ModalChrome, ScrollRegion, Surface, SurfaceOp,
	TransitionDurations, TransitionTarget,
};
