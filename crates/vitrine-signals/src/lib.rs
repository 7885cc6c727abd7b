//! Typed publish/subscribe signals for the navigation shell.
//!
//! Every cross-component notification in the shell (modal lifecycle,
//! router dispatch, page transitions) travels over a named [`Signal`].
//! Signals are constructor-injected channels rather than ambient
//! singletons, so a test can connect its own receivers and observe
//! exactly what a component emitted.

mod error;
mod name;
mod signal;

pub use error::SignalError;
pub use name::SignalName;
pub use signal::{ReceiverFn, Signal};
