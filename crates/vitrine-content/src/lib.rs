//! Content loading and parsing for the navigation shell.
//!
//! The shell never talks to a backend directly; it goes through the
//! [`ContentLoader`] port. The bundled [`HttpContentLoader`] speaks the
//! portfolio API (`/api/projects` and `/api/projects/{category}/{id}`),
//! but any implementation will do; tests use static in-memory loaders.
//!
//! Markdown-to-HTML conversion, tag-chip rendering, and reading-time
//! estimation are external collaborators behind the narrow ports in
//! [`collab`].

pub mod collab;
pub mod frontmatter;

mod error;
mod loader;
mod model;

pub use collab::{ChipRenderer, MarkdownRenderer, ReadTimeEstimator, WordsPerMinute};
pub use error::ContentError;
pub use frontmatter::{Frontmatter, FrontmatterValue};
pub use loader::{ContentLoader, HttpContentLoader};
pub use model::{Category, ProjectListResponse, ProjectSummary};
