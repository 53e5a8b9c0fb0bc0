//! Intent classification
//!
//! Derives boolean topical and type-preference flags from the query text.
//! Matching is substring containment on the case-folded query, not
//! tokenized matching, so "oauth" inside a longer word still counts.
//! Flags are independent and may co-occur. Purely deterministic.

const STANDARD_KEYWORDS: &[&str] = &["standard", "policy", "rule", "guardrail"];
const RUNBOOK_KEYWORDS: &[&str] = &["runbook", "incident", "outage", "mitigation", "triage"];
const POSTMORTEM_KEYWORDS: &[&str] = &["postmortem", "what happened", "incident learning", "rca"];
const ADR_KEYWORDS: &[&str] = &["adr", "decision record", "why did we choose", "precedent"];
const IDENTITY_KEYWORDS: &[&str] = &["auth", "authentication", "oauth", "oidc", "jwt", "login"];
const BILLING_KEYWORDS: &[&str] = &["billing", "invoice", "payment"];
const OBSERVABILITY_KEYWORDS: &[&str] = &["tracing", "logging", "otel", "observability"];

/// Boolean flags inferred from query text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryIntent {
    /// Query asks for an engineering standard
    pub asks_standard: bool,

    /// Query asks for an operational runbook
    pub asks_runbook: bool,

    /// Query asks for an incident postmortem
    pub asks_postmortem: bool,

    /// Query asks for an architecture decision record
    pub asks_adr: bool,

    /// Query concerns the identity/auth domain
    pub identity_related: bool,

    /// Query concerns the billing domain
    pub billing_related: bool,

    /// Query concerns the observability domain
    pub observability_related: bool,
}

impl QueryIntent {
    /// Classify a query
    pub fn classify(query: &str) -> Self {
        let folded = query.to_lowercase();
        let contains_any = |keywords: &[&str]| keywords.iter().any(|k| folded.contains(k));

        Self {
            asks_standard: contains_any(STANDARD_KEYWORDS),
            asks_runbook: contains_any(RUNBOOK_KEYWORDS),
            asks_postmortem: contains_any(POSTMORTEM_KEYWORDS),
            asks_adr: contains_any(ADR_KEYWORDS),
            identity_related: contains_any(IDENTITY_KEYWORDS),
            billing_related: contains_any(BILLING_KEYWORDS),
            observability_related: contains_any(OBSERVABILITY_KEYWORDS),
        }
    }
}
