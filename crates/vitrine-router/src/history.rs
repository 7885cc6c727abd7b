//! History integration behind an explicit environment port.
//!
//! The router never reads ambient browser globals. Everything it needs
//! from the host (the current path, history mutation, scroll reset)
//! goes through [`Environment`], so the same state machine runs under a
//! real browser binding or the bundled [`MemoryEnvironment`].

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// State attached to a history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
	/// The path of this entry.
	pub path: String,
	/// Route parameters extracted when the entry was created.
	#[serde(default)]
	pub params: HashMap<String, String>,
	/// Opaque payload supplied by the navigation caller.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload: Option<serde_json::Value>,
}

impl HistoryState {
	/// Creates a state for the given path with no parameters.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			params: HashMap::new(),
			payload: None,
		}
	}

	/// Attaches extracted route parameters.
	pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
		self.params = params;
		self
	}

	/// Attaches an opaque payload.
	pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
		self.payload = Some(payload);
		self
	}
}

/// Host environment port.
///
/// Implementations wrap whatever the host runtime provides: a browser
/// binding forwards to `window.location` / `history.pushState`, the
/// bundled [`MemoryEnvironment`] keeps a plain vector.
pub trait Environment: Send + Sync {
	/// Returns the current path.
	fn current_path(&self) -> String;

	/// Pushes a new history entry.
	///
	/// # Errors
	///
	/// Returns a host-specific message if the entry was rejected.
	fn push_state(&self, state: &HistoryState) -> Result<(), String>;

	/// Replaces the current history entry.
	///
	/// # Errors
	///
	/// Returns a host-specific message if the entry was rejected.
	fn replace_state(&self, state: &HistoryState) -> Result<(), String>;

	/// Steps back one entry.
	///
	/// Returns the state that became current, if any. In a browser
	/// binding this is the state delivered by the resulting `popstate`
	/// event.
	fn back(&self) -> Option<HistoryState>;

	/// Steps forward one entry.
	///
	/// Returns the state that became current, if any.
	fn forward(&self) -> Option<HistoryState>;

	/// Resets the window scroll position to the top.
	fn reset_scroll(&self);
}

/// In-memory history for headless hosts and tests.
pub struct MemoryEnvironment {
	entries: RwLock<Vec<HistoryState>>,
	cursor: RwLock<usize>,
}

impl MemoryEnvironment {
	/// Creates a history containing a single root entry.
	pub fn new() -> Self {
		Self::with_initial_path("/")
	}

	/// Creates a history whose first entry is `path`.
	pub fn with_initial_path(path: impl Into<String>) -> Self {
		Self {
			entries: RwLock::new(vec![HistoryState::new(path)]),
			cursor: RwLock::new(0),
		}
	}

	/// Returns the number of entries currently on the stack.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Returns whether the stack is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}

impl Default for MemoryEnvironment {
	fn default() -> Self {
		Self::new()
	}
}

impl Environment for MemoryEnvironment {
	fn current_path(&self) -> String {
		let entries = self.entries.read();
		let cursor = *self.cursor.read();
		entries
			.get(cursor)
			.map(|e| e.path.clone())
			.unwrap_or_else(|| "/".to_string())
	}

	fn push_state(&self, state: &HistoryState) -> Result<(), String> {
		let mut entries = self.entries.write();
		let mut cursor = self.cursor.write();
		// Pushing discards any forward entries, like a browser does
		entries.truncate(*cursor + 1);
		entries.push(state.clone());
		*cursor = entries.len() - 1;
		Ok(())
	}

	fn replace_state(&self, state: &HistoryState) -> Result<(), String> {
		let mut entries = self.entries.write();
		let cursor = *self.cursor.read();
		match entries.get_mut(cursor) {
			Some(entry) => {
				*entry = state.clone();
				Ok(())
			}
			None => Err("history is empty".to_string()),
		}
	}

	fn back(&self) -> Option<HistoryState> {
		let entries = self.entries.read();
		let mut cursor = self.cursor.write();
		if *cursor == 0 {
			return None;
		}
		*cursor -= 1;
		entries.get(*cursor).cloned()
	}

	fn forward(&self) -> Option<HistoryState> {
		let entries = self.entries.read();
		let mut cursor = self.cursor.write();
		if *cursor + 1 >= entries.len() {
			return None;
		}
		*cursor += 1;
		entries.get(*cursor).cloned()
	}

	fn reset_scroll(&self) {}
}
