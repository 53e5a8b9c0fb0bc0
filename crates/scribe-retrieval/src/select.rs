//! Quota selector
//!
//! Picks the final ordered top-K from the reranked candidates. Dedup: at
//! most one chunk per source document ever appears in one result set, to
//! maximize source diversity. Composition: per-document-type quotas chosen
//! from the query intent cap how many results each type may contribute.
//!
//! If the strict pass under-fills the request, a fallback pass re-scans the
//! same sorted list from the top with the quota constraint dropped
//! entirely, so the caller gets as close to K results as the pool allows.
//! The re-scan revisits candidates already rejected by quota; that
//! redundant work is intentional and results are unaffected.

use crate::QueryIntent;
use scribe_domain::{DocType, ScoredCandidate};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Per-document-type result caps; absent entries count as zero
pub type QuotaTable = BTreeMap<DocType, usize>;

fn table(entries: &[(DocType, usize)]) -> QuotaTable {
    entries.iter().copied().collect()
}

/// Decide the quota table for a query
///
/// Intent precedence follows the strongest operational signal: runbook,
/// then postmortem, then standard, then decision record, then a balanced
/// default.
pub fn quotas_for_intent(intent: &QueryIntent) -> QuotaTable {
    use DocType::*;

    if intent.asks_runbook {
        // Operational question: runbook first, then standards/postmortems
        return table(&[(Rbk, 3), (Std, 2), (Pm, 1), (Adr, 1), (Tmp, 1)]);
    }
    if intent.asks_postmortem {
        return table(&[(Pm, 3), (Std, 2), (Adr, 1), (Rbk, 1), (Tmp, 1)]);
    }
    if intent.asks_standard {
        // Prefer standards strongly, allow one ADR for rationale
        return table(&[(Std, 3), (Adr, 1), (Rbk, 1), (Pm, 1), (Tmp, 1)]);
    }
    if intent.asks_adr {
        return table(&[(Adr, 3), (Std, 2), (Pm, 1), (Rbk, 1), (Tmp, 1)]);
    }

    table(&[(Std, 2), (Adr, 2), (Rbk, 1), (Pm, 1), (Tmp, 1)])
}

/// Select the final ordered result set from reranked candidates
///
/// `ranked` must already be sorted by final score descending. Candidates
/// without a document id, or whose type tag is not a member of the closed
/// enumeration, cannot be deduplicated or quota-classified safely and are
/// skipped in both passes.
pub fn select_with_quotas(
    ranked: &[ScoredCandidate],
    top_k: usize,
    quotas: &QuotaTable,
) -> Vec<ScoredCandidate> {
    let mut selected: Vec<ScoredCandidate> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut used: BTreeMap<DocType, usize> = BTreeMap::new();

    // Pass 1: strict - dedup by document, respect type quotas
    for scored in ranked {
        if selected.len() >= top_k {
            break;
        }
        let doc_id = scored.candidate.chunk.doc_id.as_str();
        if doc_id.is_empty() {
            debug!(chunk_id = %scored.candidate.chunk.chunk_id, "dropping candidate without doc_id");
            continue;
        }
        let Some(doc_type) = scored.candidate.chunk.parsed_type() else {
            debug!(
                chunk_id = %scored.candidate.chunk.chunk_id,
                doc_type = %scored.candidate.chunk.doc_type,
                "dropping candidate with unknown doc_type"
            );
            continue;
        };
        if seen.contains(doc_id) {
            continue;
        }

        let quota = quotas.get(&doc_type).copied().unwrap_or(0);
        let used_count = used.get(&doc_type).copied().unwrap_or(0);
        if used_count >= quota {
            continue;
        }

        selected.push(scored.clone());
        seen.insert(doc_id);
        *used.entry(doc_type).or_insert(0) += 1;
    }

    // Pass 2: fallback - quotas under-filled the request, so re-scan from
    // the top with only the dedup constraint
    if selected.len() < top_k {
        for scored in ranked {
            if selected.len() >= top_k {
                break;
            }
            let doc_id = scored.candidate.chunk.doc_id.as_str();
            if doc_id.is_empty() || scored.candidate.chunk.parsed_type().is_none() {
                continue;
            }
            if seen.contains(doc_id) {
                continue;
            }

            selected.push(scored.clone());
            seen.insert(doc_id);
        }
    }

    selected
}
