//! Expander, critic and forge pipeline behavior

use ideaforge_core::{CRITIQUE_LABEL, FORGE_LABEL, Forge, IdeaCritic, IdeaExpander};
use ideaforge_types::{Credential, ForgeReport};

use crate::common::SAMPLE_IDEAS;

#[test]
fn expand_is_label_plus_input() {
    let expander = IdeaExpander::new("key");
    for idea in SAMPLE_IDEAS {
        assert_eq!(expander.expand(idea), format!("Forging: {idea}"));
    }
}

#[test]
fn critique_is_label_plus_input() {
    let critic = IdeaCritic::new("key");
    for idea in SAMPLE_IDEAS {
        assert_eq!(critic.critique(idea), format!("Critiquing: {idea}"));
    }
}

#[test]
fn empty_inputs_return_bare_labels() {
    assert_eq!(IdeaExpander::new("k").expand(""), FORGE_LABEL.as_str());
    assert_eq!(IdeaCritic::new("k").critique(""), CRITIQUE_LABEL.as_str());
}

#[test]
fn any_credential_constructs() {
    for credential in ["", " ", "AIza-real-looking", "not a key at all 🦀"] {
        let expander = IdeaExpander::new(credential);
        let critic = IdeaCritic::new(credential);
        assert_eq!(expander.credential().as_str(), credential);
        assert_eq!(critic.credential().as_str(), credential);
    }
}

#[test]
fn end_to_end_example() {
    let expander = IdeaExpander::new("key");
    let critic = IdeaCritic::new("key");

    let expanded = expander.expand("a faster sort");
    assert_eq!(expanded, "Forging: a faster sort");
    assert_eq!(
        critic.critique(&expanded),
        "Critiquing: Forging: a faster sort"
    );
}

#[test]
fn forge_run_matches_manual_chain() {
    let forge = Forge::new(Credential::new("key"));
    for idea in SAMPLE_IDEAS {
        let report = forge.run(idea);
        let expected_expanded = forge.expander().expand(idea);
        let expected_critique = forge.critic().critique(&expected_expanded);
        assert_eq!(
            report,
            ForgeReport {
                raw: (*idea).to_string(),
                expanded: expected_expanded,
                critique: expected_critique,
            }
        );
    }
}

#[test]
fn components_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IdeaExpander>();
    assert_send_sync::<IdeaCritic>();
    assert_send_sync::<Forge>();
}

#[test]
fn report_round_trips_through_json() {
    let report = Forge::new("").run("a faster sort");
    let json = serde_json::to_string(&report).unwrap();
    let back: ForgeReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
