//! Intent boosts read straight from the query and response wording.

use lazy_static::lazy_static;
use regex::Regex;

use super::models::ScoreMap;
use crate::toolkit::recommender::catalog::ChartType::*;
use crate::toolkit::recommender::features::FeatureSet;
use crate::utils::{compile_patterns, count_matches};

const PROPORTION_DOMAIN_TERMS: [&str; 5] = [
    "market share",
    "budget allocation",
    "demographic",
    "voter",
    "spending",
];

lazy_static! {
    static ref PROPORTION_QUESTIONS: Vec<Regex> = compile_patterns(&[
        r"what\s+is\s+the\s+breakdown",
        r"how\s+is\s+.*\s+distributed",
        r"what\s+percentage",
        r"what\s+proportion",
        r"what\s+is\s+the\s+split",
        r"show\s+.*\s+distribution",
        r"pie\s+chart",
        r"donut\s+chart",
        r"composition\s+of",
        r"makeup\s+of",
        r"share\s+of",
    ]);

    static ref TOP_N: Vec<Regex> = compile_patterns(&[r"top\s+\d+"]);
}


/// Adds phrase-triggered boosts to a copy of `scores`.
pub fn apply_context_boosts(scores: &ScoreMap, query: &str, response: &str, features: &FeatureSet) -> ScoreMap {
    let mut adjusted = *scores;
    let query_lower = query.to_lowercase();
    let response_lower = response.to_lowercase();
    let in_query = |phrase: &str| query_lower.contains(phrase);

    if in_query("show hierarchy") || in_query("hierarchical") || response_lower.contains("hierarchy") {
        adjusted.boost(TreemapChart, 1.0);
        adjusted.boost(SunburstChart, 0.9);
        adjusted.boost(TreeDiagram, 0.8);
        adjusted.boost(CirclePacking, 0.7);
    }

    if in_query("show network") || in_query("connections between") || response_lower.contains("network") {
        adjusted.boost(NetworkGraph, 1.2);
        adjusted.boost(ChordDiagram, 0.9);
    }

    if in_query("over time") || (in_query("trend") && features.has_time_series) {
        adjusted.boost(LineChart, 0.8);
        adjusted.boost(AreaChart, 0.7);
    }

    if in_query("map") || in_query("geographic") {
        adjusted.boost(ConnectionMap, 1.0);
        adjusted.boost(VoronoiMap, 0.6);
    }

    if in_query("comparison") || in_query("compare") || features.comparison_structure {
        adjusted.boost(BarChart, 0.7);
        adjusted.boost(SmallMultiples, 1.0);
    }

    // one boost per matching pattern, not per occurrence
    let proportion_hits = PROPORTION_QUESTIONS
        .iter()
        .filter(|pattern| pattern.is_match(&query_lower))
        .count();
    adjusted.boost(DonutChart, proportion_hits as f64);

    if PROPORTION_DOMAIN_TERMS.iter().any(|&term| in_query(term)) && !features.has_time_series {
        adjusted.boost(DonutChart, 0.9);
    }

    if count_matches(&TOP_N, &query_lower) > 0 {
        if in_query("category") || in_query("segment") {
            adjusted.boost(DonutChart, 0.7);
        } else {
            adjusted.boost(BarChart, 0.6);
        }
    }

    if features.is_what_question {
        if in_query("percentage") || in_query("proportion") {
            adjusted.boost(DonutChart, 0.8);
        } else if in_query("trend") {
            adjusted.boost(LineChart, 0.7);
        }
    }
    if features.is_how_question && (in_query("change") || in_query("varied")) {
        adjusted.boost(LineChart, 0.6);
    }
    if features.is_which_question {
        adjusted.boost(BarChart, 0.5);
    }

    adjusted
}
