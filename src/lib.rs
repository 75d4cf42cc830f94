//! Prompt Console - manage projects and their prompts on a remote API
//!
//! This library implements the state-synchronization core of a project and
//! prompt management console:
//!
//! - A typed [`bus::EventBus`] decoupling independently-built components
//! - A [`store::ProjectStore`] owning the authoritative project list and
//!   reconciling it after every confirmed mutation
//! - A [`search::SearchCoordinator`] driving query suggestions and
//!   broadcasting query/selection changes
//! - A [`session::ProjectDetailSession`] managing one project's prompt
//!   lifecycle (view, edit, create, delete, credentials)
//! - An HTTP [`gateway`] speaking the remote management API
//!
//! Everything is composed once per application by [`console::Console`].

pub mod bus;
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod gateway;
pub mod models;
pub mod notify;
pub mod progress;
pub mod search;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use bus::{EventBus, Signal, SignalKind, Subscription};
pub use console::Console;
pub use error::ConsoleError;
pub use models::{Credentials, Project, Prompt, PromptDraft};
pub use search::SearchCoordinator;
pub use session::{ProjectDetailSession, PromptState};
pub use store::{ProjectStore, apply_filter};
