//! Static governance proposal registry.
//!
//! Proposals are a fixed, immutable set created at process start. There is
//! no create/update/delete lifecycle.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{AgoraError, Result};

/// A governance item: id, title, description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub description: String,
}

impl Proposal {
    pub fn new(id: u64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Immutable collection of proposals with unique ids.
#[derive(Debug, Clone)]
pub struct ProposalRegistry {
    proposals: Vec<Proposal>,
}

impl ProposalRegistry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(proposals: Vec<Proposal>) -> Result<Self> {
        let mut seen = HashSet::new();
        for proposal in &proposals {
            if !seen.insert(proposal.id) {
                return Err(AgoraError::DuplicateProposal(proposal.id));
            }
        }
        Ok(Self { proposals })
    }

    /// The fixed set served by the backend.
    pub fn seeded() -> Self {
        let proposals = vec![
            Proposal::new(
                1,
                "Universal Healthcare",
                "Implement a universal healthcare system.",
            ),
            Proposal::new(2, "Clean Energy Act", "Pass a national clean energy bill."),
        ];
        // The seed set has distinct ids, so this cannot fail.
        Self { proposals }
    }

    pub fn all(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_registry() {
        let registry = ProposalRegistry::seeded();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.all()[0].id, 1);
        assert_eq!(registry.all()[0].title, "Universal Healthcare");
        assert_eq!(registry.all()[1].id, 2);
        assert_eq!(registry.all()[1].title, "Clean Energy Act");
    }

    #[test]
    fn test_seeded_ids_are_unique() {
        let registry = ProposalRegistry::seeded();
        let mut ids: Vec<u64> = registry.all().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = ProposalRegistry::new(vec![
            Proposal::new(7, "A", "first"),
            Proposal::new(7, "B", "second"),
        ]);
        assert!(matches!(result, Err(AgoraError::DuplicateProposal(7))));
    }

    #[test]
    fn test_empty_registry_is_valid() {
        let registry = ProposalRegistry::new(vec![]).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_proposal_serialization_shape() {
        let proposal = Proposal::new(1, "Universal Healthcare", "desc");
        let json = serde_json::to_value(&proposal).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Universal Healthcare");
        assert_eq!(json["description"], "desc");
    }
}
