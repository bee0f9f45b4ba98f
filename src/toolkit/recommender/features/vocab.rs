//! Fixed lemma vocabularies.
//!
//! Matching is by membership of a parsed lemma, so multiword entries such as
//! "over time" never match a single token.

use std::collections::{BTreeSet, HashSet};

use lazy_static::lazy_static;

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

lazy_static! {
    pub static ref TREND_TERMS: HashSet<&'static str> = set(&[
        "increase", "decline", "growth", "rise", "drop", "trend", "fall", "reduce",
        "expansion", "fluctuation", "progression", "evolution", "trajectory",
        "historical", "over time", "increased", "decreased", "grew", "fell",
        "risen", "trending", "change", "changes", "variation", "shift", "movement",
        "improve", "worsen", "spike", "plunge", "surge", "peak", "valley", "upward", "downward",
    ]);

    pub static ref RELATIONSHIP_TERMS: HashSet<&'static str> = set(&[
        "prefer", "dominate", "compared", "versus", "majority", "minority",
        "correlation", "causation", "influence", "impact", "affect", "between",
        "connection", "network", "interaction", "collaboration", "flow", "transfer",
        "connected", "linked", "relation", "mapping", "connect", "link",
        "association", "interact", "related", "depends",
    ]);

    pub static ref HIERARCHY_TERMS: HashSet<&'static str> = set(&[
        "structure", "hierarchy", "nested", "parent", "child", "tree", "branch",
        "root", "descendant", "ancestor", "organization", "breakdown", "composition",
        "contains", "hierarchical", "level", "tier", "layer", "subordinate",
        "superordinate", "category", "subcategory", "classification", "taxonomy",
        "class", "subclass", "group", "subgroup",
    ]);

    pub static ref PART_TO_WHOLE_TERMS: HashSet<&'static str> = set(&[
        "percentage", "proportion", "fraction", "share", "allocation", "distribution",
        "segment", "portion", "division", "makeup", "composition", "constituent",
        "breakdown", "ratio", "percent", "split", "divided", "parts", "pieces",
        "sections", "components", "pie", "slice", "partition",
        "make up", "comprises", "consists of", "account for", "represents",
    ]);

    pub static ref COMPARISON_TERMS: HashSet<&'static str> = set(&[
        "versus", "against", "compare", "contrast", "difference", "similarity",
        "benchmark", "outperform", "underperform", "rank", "exceed", "more than",
        "less than", "higher", "lower", "better", "worse", "comparison",
        "relative", "compared to", "vs", "different", "same", "similar",
    ]);

    pub static ref TEMPORAL_TERMS: HashSet<&'static str> = set(&[
        "time", "date", "year", "month", "week", "day", "hour", "period",
        "timeline", "duration", "interval", "frequency", "schedule", "chronological",
        "seasonal", "quarterly", "annually", "daily", "weekly", "monthly",
    ]);

    pub static ref DISTRIBUTION_TERMS: HashSet<&'static str> = set(&[
        "distribution", "frequency", "spread", "range", "variance", "outlier", "cluster",
    ]);

    pub static ref PROCESS_TERMS: HashSet<&'static str> = set(&[
        "process", "workflow", "step", "sequence", "procedure", "pipeline", "stage",
    ]);
}


/// Vocabulary entries present among `lemmas`, in sorted order.
pub fn matched_terms(lemmas: &HashSet<String>, vocabulary: &HashSet<&'static str>) -> Vec<String> {
    lemmas
        .iter()
        .filter(|lemma| vocabulary.contains(lemma.as_str()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn any_present(lemmas: &HashSet<String>, vocabulary: &HashSet<&'static str>) -> bool {
    vocabulary.iter().any(|term| lemmas.contains(*term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmas(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_matched_terms_are_sorted_and_unique() {
        let found = matched_terms(&lemmas(&["trend", "grow", "increase", "spike"]), &TREND_TERMS);
        assert_eq!(found, vec!["increase", "spike", "trend"]);
    }

    #[test]
    fn test_multiword_entries_never_match_single_lemmas() {
        let found = matched_terms(&lemmas(&["over", "time"]), &TREND_TERMS);
        assert!(found.is_empty());
        assert_eq!(matched_terms(&lemmas(&["over", "time"]), &TEMPORAL_TERMS), vec!["time"]);
    }

    #[test]
    fn test_any_present() {
        assert!(any_present(&lemmas(&["the", "pipeline"]), &PROCESS_TERMS));
        assert!(!any_present(&lemmas(&["the", "chart"]), &DISTRIBUTION_TERMS));
    }
}
