//! Candidate module - similarity-search results and their scored form

use crate::Chunk;

/// A chunk returned by similarity search for one query
///
/// Ephemeral: created per query, consumed by the policy pipeline.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The retrieved chunk
    pub chunk: Chunk,

    /// Raw similarity score (higher = more similar; cosine similarity of
    /// unit vectors, so inner product)
    pub sim: f32,
}

/// One scoring adjustment applied by the policy reranker
///
/// Adjustments are recorded structurally for testing and rendered to the
/// human-readable reason-trail shape at the interface boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    /// Name of the policy rule that fired
    pub rule: &'static str,

    /// What triggered the rule, e.g. `query asks standard, doc_type=STD`
    pub trigger: String,

    /// Signed score delta applied
    pub delta: f32,
}

impl Adjustment {
    /// Render to the reason-trail string shape:
    /// `type-authority: query asks standard, doc_type=STD +0.15`
    pub fn render(&self) -> String {
        format!("{}: {} {:+.2}", self.rule, self.trigger, self.delta)
    }
}

/// A candidate after policy reranking
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// The underlying candidate
    pub candidate: Candidate,

    /// Final score: raw similarity plus every adjustment delta
    pub score: f32,

    /// Adjustments in application order. Append-only; never reordered.
    pub adjustments: Vec<Adjustment>,
}

impl ScoredCandidate {
    /// The full reason trail, in application order. The first entry records
    /// the raw similarity; one entry follows per fired rule.
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::with_capacity(self.adjustments.len() + 1);
        reasons.push(format!("sim={:.4}", self.candidate.sim));
        reasons.extend(self.adjustments.iter().map(Adjustment::render));
        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn candidate(sim: f32) -> Candidate {
        Candidate {
            chunk: Chunk {
                chunk_id: "STD-02::chunk-000".to_string(),
                doc_id: "STD-02".to_string(),
                doc_type: "STD".to_string(),
                text: String::new(),
                meta: BTreeMap::new(),
            },
            sim,
        }
    }

    #[test]
    fn test_adjustment_render_signed() {
        let boost = Adjustment {
            rule: "type-authority",
            trigger: "query asks standard, doc_type=STD".to_string(),
            delta: 0.15,
        };
        assert_eq!(
            boost.render(),
            "type-authority: query asks standard, doc_type=STD +0.15"
        );

        let penalty = Adjustment {
            rule: "type-authority",
            trigger: "query asks standard, doc_type=ADR".to_string(),
            delta: -0.05,
        };
        assert_eq!(
            penalty.render(),
            "type-authority: query asks standard, doc_type=ADR -0.05"
        );
    }

    #[test]
    fn test_reason_trail_starts_with_sim() {
        let scored = ScoredCandidate {
            candidate: candidate(0.8123),
            score: 0.8923,
            adjustments: vec![Adjustment {
                rule: "status-gating",
                trigger: "status=approved".to_string(),
                delta: 0.08,
            }],
        };

        let reasons = scored.reasons();
        assert_eq!(reasons.len(), 2);
        assert_eq!(reasons[0], "sim=0.8123");
        assert_eq!(reasons[1], "status-gating: status=approved +0.08");
    }

    #[test]
    fn test_reason_trail_preserves_order() {
        let adjustments = vec![
            Adjustment {
                rule: "type-authority",
                trigger: "a".to_string(),
                delta: 0.15,
            },
            Adjustment {
                rule: "status-gating",
                trigger: "b".to_string(),
                delta: 0.08,
            },
            Adjustment {
                rule: "freshness",
                trigger: "c".to_string(),
                delta: 0.05,
            },
        ];
        let scored = ScoredCandidate {
            candidate: candidate(0.5),
            score: 0.78,
            adjustments: adjustments.clone(),
        };

        let reasons = scored.reasons();
        for (reason, adj) in reasons.iter().skip(1).zip(&adjustments) {
            assert_eq!(*reason, adj.render());
        }
    }
}
