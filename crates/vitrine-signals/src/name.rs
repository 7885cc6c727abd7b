//! Type-safe signal names.

use std::fmt;
use std::sync::Arc;

/// Internal storage for signal names, supporting both static and owned strings.
#[derive(Debug, Clone)]
enum SignalNameInner {
	/// Compile-time constant string (zero allocation)
	Static(&'static str),
	/// Dynamically created name (reference-counted)
	Owned(Arc<str>),
}

/// Type-safe signal name wrapper.
///
/// The shell's built-in notifications use the associated constants; custom
/// channels can be created with [`SignalName::custom`].
///
/// # Examples
///
/// ```
/// use vitrine_signals::SignalName;
///
/// let name = SignalName::MODAL_OPENED;
/// assert_eq!(name.as_str(), "modal_opened");
///
/// let custom = SignalName::custom("chrome_ready");
/// assert_eq!(custom.as_str(), "chrome_ready");
/// ```
#[derive(Debug, Clone)]
pub struct SignalName(SignalNameInner);

impl SignalName {
	// Modal lifecycle
	/// Sent after a modal finished opening
	pub const MODAL_OPENED: Self = Self(SignalNameInner::Static("modal_opened"));
	/// Sent after a modal finished closing
	pub const MODAL_CLOSED: Self = Self(SignalNameInner::Static("modal_closed"));

	// Router dispatch
	/// Sent when a navigation pushes a new history entry
	pub const ROUTER_NAVIGATE: Self = Self(SignalNameInner::Static("router_navigate"));
	/// Sent when a history pop resolved to a route
	pub const ROUTER_POPSTATE: Self = Self(SignalNameInner::Static("router_popstate"));
	/// Sent when no registered route matched a url
	pub const ROUTER_NOT_FOUND: Self = Self(SignalNameInner::Static("router_not_found"));
	/// Sent when a route handler failed
	pub const ROUTER_ERROR: Self = Self(SignalNameInner::Static("router_error"));

	// Page surface
	/// Sent once a full-page view finished its entrance transition
	pub const PAGE_SHOWN: Self = Self(SignalNameInner::Static("page_shown"));
	/// Sent once the page surface was handed back to the canvas
	pub const PAGE_HIDDEN: Self = Self(SignalNameInner::Static("page_hidden"));

	/// Create a custom signal name from a static string.
	pub const fn custom(name: &'static str) -> Self {
		Self(SignalNameInner::Static(name))
	}

	/// Create a signal name from an owned string.
	///
	/// Uses `Arc<str>` internally so the name is freed when no longer
	/// referenced.
	pub fn from_string(name: impl Into<Arc<str>>) -> Self {
		Self(SignalNameInner::Owned(name.into()))
	}

	/// Get the string representation of this signal name.
	pub fn as_str(&self) -> &str {
		match &self.0 {
			SignalNameInner::Static(s) => s,
			SignalNameInner::Owned(s) => s,
		}
	}
}

impl PartialEq for SignalName {
	fn eq(&self, other: &Self) -> bool {
		self.as_str() == other.as_str()
	}
}

impl Eq for SignalName {}

impl std::hash::Hash for SignalName {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.as_str().hash(state);
	}
}

impl fmt::Display for SignalName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl AsRef<str> for SignalName {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}

impl From<SignalName> for String {
	fn from(name: SignalName) -> String {
		name.as_str().to_string()
	}
}
