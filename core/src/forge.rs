//! The forge pipeline: expand, then critique.

use ideaforge_types::{Credential, ForgeReport};

use crate::{IdeaCritic, IdeaExpander};

/// Feeds a raw idea through the expander and hands the result to the critic.
#[derive(Debug, Clone)]
pub struct Forge {
    expander: IdeaExpander,
    critic: IdeaCritic,
}

impl Forge {
    /// Both collaborators share one credential.
    #[must_use]
    pub fn new(credential: impl Into<Credential>) -> Self {
        let credential = credential.into();
        Self {
            expander: IdeaExpander::new(credential.clone()),
            critic: IdeaCritic::new(credential),
        }
    }

    #[must_use]
    pub fn from_parts(expander: IdeaExpander, critic: IdeaCritic) -> Self {
        Self { expander, critic }
    }

    #[must_use]
    pub fn expander(&self) -> &IdeaExpander {
        &self.expander
    }

    #[must_use]
    pub fn critic(&self) -> &IdeaCritic {
        &self.critic
    }

    #[must_use]
    pub fn run(&self, raw_idea: &str) -> ForgeReport {
        let expanded = self.expander.expand(raw_idea);
        let critique = self.critic.critique(&expanded);
        tracing::info!(
            raw_len = raw_idea.len(),
            critique_len = critique.len(),
            "Forge run complete"
        );

        ForgeReport {
            raw: raw_idea.to_string(),
            expanded,
            critique,
        }
    }
}
