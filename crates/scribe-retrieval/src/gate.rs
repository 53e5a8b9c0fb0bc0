//! Candidate gate
//!
//! Governance hard-filters applied to raw similarity-search results before
//! any scoring, so the governance cost is paid once per candidate.
//! Deprecated material is rejected unconditionally; this rule is never
//! relaxable within the gate. Draft material is rejected unless the caller
//! explicitly allowed drafts for this query.

use scribe_domain::{Candidate, GovernanceStatus};

/// Decision for one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The candidate proceeds to scoring
    Admitted,

    /// The candidate is excluded; the reason names the governance rule
    Rejected {
        /// Human-readable exclusion reason, e.g. `filtered: status=deprecated`
        reason: String,
    },
}

impl GateDecision {
    /// Whether the candidate was admitted
    pub fn is_admitted(&self) -> bool {
        matches!(self, GateDecision::Admitted)
    }
}

/// Applies governance hard-filters to candidates
#[derive(Debug, Clone, Copy)]
pub struct CandidateGate {
    allow_draft: bool,
}

impl CandidateGate {
    /// Create a gate. `allow_draft` opts this query into draft material;
    /// deprecated material is excluded regardless.
    pub fn new(allow_draft: bool) -> Self {
        Self { allow_draft }
    }

    /// Evaluate one candidate
    pub fn evaluate(&self, candidate: &Candidate) -> GateDecision {
        match candidate.chunk.status() {
            Some(GovernanceStatus::Deprecated) => GateDecision::Rejected {
                reason: "filtered: status=deprecated".to_string(),
            },
            Some(GovernanceStatus::Draft) if !self.allow_draft => GateDecision::Rejected {
                reason: "filtered: status=draft".to_string(),
            },
            _ => GateDecision::Admitted,
        }
    }
}
