//! Policy reranker
//!
//! Recomputes a final score per admitted candidate from the raw similarity
//! plus additive adjustments driven by intent, governance status, recency,
//! and subject-system relevance. Every fired rule appends one entry to the
//! candidate's reason trail, in application order. The output is sorted by
//! final score descending; the sort is stable, so candidates with equal
//! scores retain their input order.
//!
//! The magnitudes below are a fixed policy table, not tunable defaults:
//! ranking behavior depends on the exact additive deltas.

use crate::QueryIntent;
use chrono::{NaiveDate, Utc};
use scribe_domain::{Adjustment, Candidate, DocType, GovernanceStatus, ScoredCandidate};

const STANDARD_TYPE_BONUS: f32 = 0.15;
const STANDARD_ADR_PENALTY: f32 = -0.05;
const RUNBOOK_TYPE_BONUS: f32 = 0.15;
const POSTMORTEM_TYPE_BONUS: f32 = 0.10;

const APPROVED_BONUS: f32 = 0.08;
const DEPRECATED_PENALTY: f32 = -0.30;
const DRAFT_PENALTY: f32 = -0.10;

const FRESH_ONE_YEAR_BONUS: f32 = 0.05;
const FRESH_TWO_YEAR_BONUS: f32 = 0.02;

const SYSTEM_MATCH_BONUS: f32 = 0.06;

/// Applies the scoring policy to admitted candidates
#[derive(Debug, Clone, Copy)]
pub struct PolicyReranker {
    reference_date: NaiveDate,
}

impl PolicyReranker {
    /// Create a reranker evaluating freshness against today's date
    pub fn new() -> Self {
        Self {
            reference_date: Utc::now().date_naive(),
        }
    }

    /// Create a reranker with a fixed reference date
    ///
    /// Freshness then becomes a pure function of the inputs, which is what
    /// the tests use.
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    /// Score and sort candidates
    ///
    /// Returns the full candidate list sorted by final score descending,
    /// ties keeping input order.
    pub fn rerank(&self, intent: &QueryIntent, candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| self.score(intent, candidate))
            .collect();

        // Stable sort: the documented tie-break is input order
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored
    }

    fn score(&self, intent: &QueryIntent, candidate: Candidate) -> ScoredCandidate {
        let mut adjustments = Vec::new();
        let doc_type = candidate.chunk.parsed_type();

        // 1. Type authority by intent
        if intent.asks_standard {
            if doc_type == Some(DocType::Std) {
                adjustments.push(Adjustment {
                    rule: "type-authority",
                    trigger: "query asks standard, doc_type=STD".to_string(),
                    delta: STANDARD_TYPE_BONUS,
                });
            }
            // Explicit anti-preference: a standards question should not be
            // answered from decision-record rationale
            if doc_type == Some(DocType::Adr) {
                adjustments.push(Adjustment {
                    rule: "type-authority",
                    trigger: "query asks standard, doc_type=ADR".to_string(),
                    delta: STANDARD_ADR_PENALTY,
                });
            }
        }
        if intent.asks_runbook && doc_type == Some(DocType::Rbk) {
            adjustments.push(Adjustment {
                rule: "type-authority",
                trigger: "query asks runbook, doc_type=RBK".to_string(),
                delta: RUNBOOK_TYPE_BONUS,
            });
        }
        if intent.asks_postmortem && doc_type == Some(DocType::Pm) {
            adjustments.push(Adjustment {
                rule: "type-authority",
                trigger: "query asks postmortem, doc_type=PM".to_string(),
                delta: POSTMORTEM_TYPE_BONUS,
            });
        }

        // 2. Status gating. The gate already removed deprecated material;
        // the penalty stays as defense in depth.
        match candidate.chunk.status() {
            Some(GovernanceStatus::Approved) => adjustments.push(Adjustment {
                rule: "status-gating",
                trigger: "status=approved".to_string(),
                delta: APPROVED_BONUS,
            }),
            Some(GovernanceStatus::Deprecated) => adjustments.push(Adjustment {
                rule: "status-gating",
                trigger: "status=deprecated".to_string(),
                delta: DEPRECATED_PENALTY,
            }),
            Some(GovernanceStatus::Draft) => adjustments.push(Adjustment {
                rule: "status-gating",
                trigger: "status=draft".to_string(),
                delta: DRAFT_PENALTY,
            }),
            None => {}
        }

        // 3. Freshness. Missing or unparseable dates are never penalized.
        if let Some(date) = candidate.chunk.last_updated().and_then(parse_date) {
            let days_old = (self.reference_date - date).num_days();
            if days_old <= 365 {
                adjustments.push(Adjustment {
                    rule: "freshness",
                    trigger: "updated <= 1y".to_string(),
                    delta: FRESH_ONE_YEAR_BONUS,
                });
            } else if days_old <= 730 {
                adjustments.push(Adjustment {
                    rule: "freshness",
                    trigger: "updated <= 2y".to_string(),
                    delta: FRESH_TWO_YEAR_BONUS,
                });
            }
        }

        // 4. Subject-system relevance
        let system = candidate.chunk.system();
        let system = system.as_deref();
        if intent.identity_related && system == Some("identity") {
            adjustments.push(Adjustment {
                rule: "system-relevance",
                trigger: "system=identity".to_string(),
                delta: SYSTEM_MATCH_BONUS,
            });
        }
        if intent.billing_related && system == Some("billing") {
            adjustments.push(Adjustment {
                rule: "system-relevance",
                trigger: "system=billing".to_string(),
                delta: SYSTEM_MATCH_BONUS,
            });
        }
        if intent.observability_related && system == Some("observability") {
            adjustments.push(Adjustment {
                rule: "system-relevance",
                trigger: "system=observability".to_string(),
                delta: SYSTEM_MATCH_BONUS,
            });
        }

        let score = candidate.sim + adjustments.iter().map(|a| a.delta).sum::<f32>();

        ScoredCandidate {
            candidate,
            score,
            adjustments,
        }
    }
}

impl Default for PolicyReranker {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
