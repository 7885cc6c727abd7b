//! In-page link interception policy.
//!
//! The host installs one capturing click listener on its document and
//! forwards each anchor click here as a [`LinkClick`] description. The
//! decision is pure: the router only navigates when [`decide`] says the
//! click stays inside the document.

/// Mouse button that produced a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
	/// Primary button.
	#[default]
	Left,
	/// Middle button (usually opens a new tab).
	Middle,
	/// Secondary button.
	Right,
}

/// Description of a click on an anchor element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkClick {
	/// The anchor's `href` attribute, as written.
	pub href: String,
	/// The anchor's `target` attribute, if any.
	pub target: Option<String>,
	/// Which mouse button fired.
	pub button: MouseButton,
	/// Whether ctrl was held.
	pub ctrl: bool,
	/// Whether meta (cmd) was held.
	pub meta: bool,
	/// Whether shift was held.
	pub shift: bool,
	/// Whether alt was held.
	pub alt: bool,
}

impl LinkClick {
	/// A plain left click on `href` with no target and no modifiers.
	pub fn plain(href: impl Into<String>) -> Self {
		Self {
			href: href.into(),
			target: None,
			button: MouseButton::Left,
			ctrl: false,
			meta: false,
			shift: false,
			alt: false,
		}
	}

	fn has_modifier(&self) -> bool {
		self.ctrl || self.meta || self.shift || self.alt
	}
}

/// Outcome of the interception policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptDecision {
	/// Prevent default navigation and route `path` through the router.
	Intercept(String),
	/// Let the host handle the click natively.
	Ignore,
}

/// Schemes that always leave the document.
const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "tel:", "//"];

/// Decides whether a click should be routed in-page.
///
/// Intercepts plain left-clicks on same-document anchors. Everything
/// else (`target="_blank"`, external schemes, fragment-only hrefs,
/// modified clicks, non-primary buttons) passes through untouched.
pub fn decide(click: &LinkClick) -> InterceptDecision {
	if click.button != MouseButton::Left || click.has_modifier() {
		return InterceptDecision::Ignore;
	}

	if matches!(click.target.as_deref(), Some("_blank")) {
		return InterceptDecision::Ignore;
	}

	let href = click.href.as_str();
	if href.is_empty() || href.starts_with('#') {
		return InterceptDecision::Ignore;
	}

	if EXTERNAL_PREFIXES
		.iter()
		.any(|prefix| href.starts_with(prefix))
	{
		return InterceptDecision::Ignore;
	}

	InterceptDecision::Intercept(href.to_string())
}
