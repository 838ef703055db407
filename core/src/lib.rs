//! Core domain logic for IdeaForge.
//!
//! Two collaborators and the pipeline between them:
//!
//! ```text
//! raw idea -> IdeaExpander::expand -> IdeaCritic::critique -> ForgeReport
//! ```
//!
//! Each collaborator holds a [`Credential`] for the service it will eventually
//! talk to. Neither one reads it today.

mod critic;
mod expander;
mod forge;

pub use critic::IdeaCritic;
pub use expander::IdeaExpander;
pub use forge::Forge;
pub use ideaforge_types::{CRITIQUE_LABEL, Credential, FORGE_LABEL, ForgeReport};
