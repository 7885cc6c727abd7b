//! Narrow ports onto external rendering collaborators.
//!
//! Markdown conversion, chip rendering, and reading-time estimation are
//! not this subsystem's business; the shell only needs to invoke them at
//! the right moments. Chip rendering in particular is awaited because
//! its completion gates hiding the transition overlay.

use async_trait::async_trait;

/// Markdown-to-HTML collaborator.
pub trait MarkdownRenderer: Send + Sync {
	/// Renders a markdown body to HTML markup.
	fn render(&self, markdown: &str) -> String;
}

/// Tag-chip collaborator.
///
/// Implementations render chips into the live grid themselves; the shell
/// only awaits completion.
#[async_trait]
pub trait ChipRenderer: Send + Sync {
	/// Renders chips for the given tag labels.
	async fn render_chips(&self, tags: &[String]);
}

/// Reading-time collaborator.
pub trait ReadTimeEstimator: Send + Sync {
	/// Estimates reading time for a body, in whole minutes.
	fn estimate_minutes(&self, body: &str) -> u32;
}

/// Word-count reading-time estimate.
///
/// Divides the whitespace-separated word count by a words-per-minute
/// rate, rounding up, with a floor of one minute.
#[derive(Debug, Clone, Copy)]
pub struct WordsPerMinute {
	rate: u32,
}

impl WordsPerMinute {
	/// Creates an estimator with the given rate.
	pub fn new(rate: u32) -> Self {
		Self { rate: rate.max(1) }
	}
}

impl Default for WordsPerMinute {
	fn default() -> Self {
		Self::new(200)
	}
}

impl ReadTimeEstimator for WordsPerMinute {
	fn estimate_minutes(&self, body: &str) -> u32 {
		let words = body.split_whitespace().count() as u32;
		words.div_ceil(self.rate).max(1)
	}
}
