//! Raw idea expansion.

use ideaforge_types::{Credential, FORGE_LABEL};

/// Expands a raw idea into a forged specification.
#[derive(Debug, Clone)]
pub struct IdeaExpander {
    credential: Credential,
}

impl IdeaExpander {
    #[must_use]
    pub fn new(credential: impl Into<Credential>) -> Self {
        Self {
            credential: credential.into(),
        }
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Forge `raw_idea` into its expanded form.
    ///
    /// Any input is accepted, including the empty string.
    #[must_use]
    pub fn expand(&self, raw_idea: &str) -> String {
        tracing::debug!(input_len = raw_idea.len(), "Expanding idea");

        format!("{FORGE_LABEL}{raw_idea}")
    }
}
