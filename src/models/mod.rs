//! Data models for the prompt management console.
//!
//! - [`Project`] - top-level managed entity with name and description
//! - [`Prompt`] - the zero-or-one prompt owned by a project
//! - [`PromptDraft`] - unsaved edit buffer mirroring a prompt's fields
//! - [`Credentials`] - derived secret material, fetched on demand
//!
//! Wire-format shapes (server field names) live in `gateway::wire`; these
//! types are the client-side representations the stores operate on.

pub mod project;
pub mod prompt;

pub use project::Project;
pub use prompt::{Credentials, DEFAULT_CONFIDENCE_SCORE, MAX_CONFIDENCE_SCORE, Prompt, PromptDraft};
