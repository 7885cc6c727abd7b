//! Shell configuration.
//!
//! Durations live here in milliseconds because they mirror stylesheet
//! animation durations; the surface port turns them into
//! transition-complete futures. Everything deserializes from TOML with
//! full defaults, so an empty document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_close_duration_ms() -> u64 {
	300
}

fn default_true() -> bool {
	true
}

fn default_fade_delay_ms() -> u64 {
	50
}

fn default_fade_duration_ms() -> u64 {
	400
}

fn default_overlay_fade_ms() -> u64 {
	200
}

/// Modal behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalSettings {
	/// Close animation duration in milliseconds.
	#[serde(default = "default_close_duration_ms")]
	pub close_duration_ms: u64,
	/// Whether the escape key closes the modal.
	#[serde(default = "default_true")]
	pub close_on_escape: bool,
	/// Whether a backdrop click closes the modal.
	#[serde(default = "default_true")]
	pub close_on_backdrop: bool,
}

impl Default for ModalSettings {
	fn default() -> Self {
		Self {
			close_duration_ms: default_close_duration_ms(),
			close_on_escape: true,
			close_on_backdrop: true,
		}
	}
}

impl ModalSettings {
	/// The close animation duration.
	pub fn close_duration(&self) -> Duration {
		Duration::from_millis(self.close_duration_ms)
	}
}

/// Page transition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSettings {
	/// Delay before the page fade-in class is applied, in milliseconds.
	#[serde(default = "default_fade_delay_ms")]
	pub fade_delay_ms: u64,
	/// Page fade duration in milliseconds.
	#[serde(default = "default_fade_duration_ms")]
	pub fade_duration_ms: u64,
	/// Transition overlay fade duration in milliseconds.
	#[serde(default = "default_overlay_fade_ms")]
	pub overlay_fade_ms: u64,
	/// Whether `navigate` resets the window scroll position.
	#[serde(default = "default_true")]
	pub reset_scroll_on_navigate: bool,
}

impl Default for PageSettings {
	fn default() -> Self {
		Self {
			fade_delay_ms: default_fade_delay_ms(),
			fade_duration_ms: default_fade_duration_ms(),
			overlay_fade_ms: default_overlay_fade_ms(),
			reset_scroll_on_navigate: true,
		}
	}
}

impl PageSettings {
	/// The delay before the fade-in class is applied.
	pub fn fade_delay(&self) -> Duration {
		Duration::from_millis(self.fade_delay_ms)
	}

	/// The page fade duration.
	pub fn fade_duration(&self) -> Duration {
		Duration::from_millis(self.fade_duration_ms)
	}

	/// The overlay fade duration.
	pub fn overlay_fade(&self) -> Duration {
		Duration::from_millis(self.overlay_fade_ms)
	}
}

/// Content backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentSettings {
	/// Base url of the content API.
	#[serde(default)]
	pub base_url: String,
}

/// Top-level shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShellSettings {
	/// Modal behavior.
	#[serde(default)]
	pub modal: ModalSettings,
	/// Page transitions.
	#[serde(default)]
	pub page: PageSettings,
	/// Content backend.
	#[serde(default)]
	pub content: ContentSettings,
}

impl ShellSettings {
	/// Parses settings from a TOML document.
	///
	/// # Errors
	///
	/// Returns the underlying TOML error on malformed input.
	pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(input)
	}
}
