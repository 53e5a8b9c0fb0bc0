//! Scribe Retrieval Core
//!
//! The policy-aware candidate pipeline: everything between raw similarity
//! search output and the final, ordered result set.
//!
//! # Pipeline
//!
//! ```text
//! query ─┬─ embed ─ vector search ─ Candidate Gate ─┐
//!        └─ Intent Classifier ────────────────────── Policy Reranker
//!                                                        │
//!                                              Quota Selector ─ results
//! ```
//!
//! Each stage is a pure function of its inputs plus the point-in-time
//! candidate pool: no component holds per-call state, so concurrent
//! queries need no synchronization beyond the shared read-only stores.
//!
//! - **Candidate Gate** removes deprecated material unconditionally and
//!   draft material unless explicitly allowed, before any scoring
//! - **Intent Classifier** derives boolean topical/type-preference flags
//!   from the query text
//! - **Policy Reranker** adds fixed bonuses and penalties to the raw
//!   similarity and records an auditable reason trail per candidate
//! - **Quota Selector** picks the final top-K with at most one chunk per
//!   document and per-type composition quotas, with a relaxed fallback
//!   pass when quotas under-fill the request

#![warn(missing_docs)]

mod error;
mod gate;
mod intent;
mod rerank;
mod retriever;
mod select;

pub use error::RetrievalError;
pub use gate::{CandidateGate, GateDecision};
pub use intent::QueryIntent;
pub use rerank::PolicyReranker;
pub use retriever::{QueryOptions, Retriever};
pub use select::{quotas_for_intent, select_with_quotas, QuotaTable};
