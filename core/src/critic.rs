//! Adversarial critique of expanded ideas.

use ideaforge_types::{CRITIQUE_LABEL, Credential};

/// Stress-tests an expanded idea to surface its flaws.
#[derive(Debug, Clone)]
pub struct IdeaCritic {
    credential: Credential,
}

impl IdeaCritic {
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

    #[must_use]
    pub fn critique(&self, expanded_idea: &str) -> String {
        tracing::debug!(input_len = expanded_idea.len(), "Critiquing idea");

        format!("{CRITIQUE_LABEL}{expanded_idea}")
    }
}
