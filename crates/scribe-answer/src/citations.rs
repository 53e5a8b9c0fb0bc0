//! Citation extraction and validation
//!
//! Citations are bracket-delimited document identifiers: 2-4 uppercase
//! letters followed by a 2-4 digit suffix or a year-month suffix, e.g.
//! `[STD-02]`, `[ADR-004]`, `[PM-2024-09]`.

use crate::AnswerError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn citation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[([A-Z]{2,4}(?:-\d{2,4}|-\d{4}-\d{2}))\]").expect("static pattern")
    })
}

/// Extract citation tokens from generated text
///
/// Preserves first-occurrence order and removes later duplicates. The
/// operation is idempotent: extracting from its own rendered output yields
/// the same list.
pub fn extract_citations(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    citation_pattern()
        .captures_iter(text)
        .map(|captures| captures[1].to_string())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Enforce that the text cites only allowed document identifiers
///
/// Returns the ordered, deduplicated citation list on success. A single
/// citation outside `allowed` rejects the whole answer; the error names
/// every illegal identifier and the allowed set.
pub fn validate_citations(text: &str, allowed: &[String]) -> Result<Vec<String>, AnswerError> {
    let cited = extract_citations(text);

    let allowed_set: HashSet<&str> = allowed.iter().map(String::as_str).collect();
    let illegal: Vec<String> = cited
        .iter()
        .filter(|id| !allowed_set.contains(id.as_str()))
        .cloned()
        .collect();

    if !illegal.is_empty() {
        return Err(AnswerError::CitationViolation {
            illegal,
            allowed: allowed.to_vec(),
        });
    }

    Ok(cited)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extraction_order_and_dedup() {
        let text = "Use retries [STD-02], per the outage [RBK-07]; see also [STD-02].";
        assert_eq!(extract_citations(text), vec!["STD-02", "RBK-07"]);
    }

    #[test]
    fn test_extraction_matches_year_month_ids() {
        let text = "The replay incident [PM-2024-09] explains it.";
        assert_eq!(extract_citations(text), vec!["PM-2024-09"]);
    }

    #[test]
    fn test_extraction_ignores_non_citation_brackets() {
        let text = "[see below] [std-02] [TOOLONGTAG-01] [STD] [STD-1]";
        assert!(extract_citations(text).is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "claims [STD-02] and [RBK-07] and [STD-02]";
        let first = extract_citations(text);
        let rendered = first
            .iter()
            .map(|id| format!("[{}]", id))
            .collect::<Vec<_>>()
            .join(", ");
        assert_eq!(extract_citations(&rendered), first);
    }

    #[test]
    fn test_validation_accepts_allowed_citations() {
        let text = "Timeouts are mandatory [STD-02]. Rotate keys [RBK-07].";
        let cited = validate_citations(text, &allowed(&["STD-02", "RBK-07"])).unwrap();
        assert_eq!(cited, vec!["STD-02", "RBK-07"]);
    }

    #[test]
    fn test_validation_rejects_unknown_citation() {
        let text = "Timeouts [STD-02], keys [RBK-07], and per [ADR-099] we chose gRPC.";
        let err = validate_citations(text, &allowed(&["STD-02", "RBK-07"])).unwrap_err();

        match err {
            AnswerError::CitationViolation { illegal, allowed } => {
                assert_eq!(illegal, vec!["ADR-099"]);
                assert_eq!(allowed, vec!["STD-02", "RBK-07"]);
            }
            other => panic!("Expected CitationViolation, got {}", other),
        }
    }

    #[test]
    fn test_validation_of_uncited_answer() {
        let cited = validate_citations("No citations here.", &allowed(&["STD-02"])).unwrap();
        assert!(cited.is_empty());
    }
}
