//! Governance status module - document lifecycle flags

/// Lifecycle status of a governed document
///
/// The status controls retrieval eligibility: deprecated material is never
/// retrievable, draft material only on explicit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GovernanceStatus {
    /// Reviewed and in force
    Approved,

    /// Superseded or withdrawn; excluded from retrieval unconditionally
    Deprecated,

    /// Not yet reviewed; excluded unless drafts are explicitly allowed
    Draft,
}

impl GovernanceStatus {
    /// Get the status name as it appears in document metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            GovernanceStatus::Approved => "approved",
            GovernanceStatus::Deprecated => "deprecated",
            GovernanceStatus::Draft => "draft",
        }
    }

    /// Parse a status value from metadata. Comparison is case-insensitive
    /// and whitespace-tolerant; unknown values parse to `None` and are
    /// treated as unconstrained by the governance rules.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "approved" => Some(GovernanceStatus::Approved),
            "deprecated" => Some(GovernanceStatus::Deprecated),
            "draft" => Some(GovernanceStatus::Draft),
            _ => None,
        }
    }
}

impl std::fmt::Display for GovernanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
