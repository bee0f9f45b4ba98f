//! Linguistic feature extraction over a query/response pair.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use super::models::FeatureSet;
use super::vocab::{
    any_present, matched_terms, COMPARISON_TERMS, DISTRIBUTION_TERMS, HIERARCHY_TERMS,
    PART_TO_WHOLE_TERMS, PROCESS_TERMS, RELATIONSHIP_TERMS, TEMPORAL_TERMS, TREND_TERMS,
};
use crate::nlp::parser::{EntityLabel, ParsedDoc, PartOfSpeech};
use crate::utils::{compile_patterns, count_matches, count_occurrences};

const GEOGRAPHIC_QUERY_TERMS: [&str; 6] = ["map", "geographic", "location", "country", "city", "region"];
const SHOW_TERMS: [&str; 3] = ["show", "visualize", "display"];
const BULLET_MARKERS: [&str; 3] = ["\n-", "\n•", "\n*"];

lazy_static! {
    static ref TEMPORAL_PATTERNS: Vec<Regex> = compile_patterns(&[
        r"\d{4}|\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|(january|february|march|april|may|june|july|august|september|october|november|december)",
    ]);

    static ref BY_PHRASE: Vec<Regex> = compile_patterns(&[r"\w+\s+by\s+\w+"]);

    static ref PERCENT_SIGN: Vec<Regex> = compile_patterns(&[r"\d+%"]);
    static ref PERCENT_WORD: Vec<Regex> = compile_patterns(&[r"\d+\s*percent"]);
    static ref PERCENT_VALUE: Vec<Regex> = compile_patterns(&[r"(\d+(?:\.\d+)?)\s*%"]);

    static ref PROPORTION_PHRASES: Vec<Regex> = compile_patterns(&[
        r"(account|make|constitute|represent)s?\s+(for|up)\s+\d+%",
        r"\d+%\s+(of|from|in)",
    ]);

    static ref NUMBERED_LINES: Vec<Regex> = compile_patterns(&[r"(?m)^\d+[.)]\s+"]);

    static ref COMPARISON_OPERATORS: Vec<Regex> = compile_patterns(&[
        r"\bvs\b|\bversus\b|\bcompared\s+to\b|\bcompared\s+with\b",
    ]);
}


/// Extracts the feature set. `doc` is the parse of `combined_text(query, response)`.
pub fn extract_features(query: &str, response: &str, doc: &ParsedDoc) -> FeatureSet {
    let combined = combined_text(query, response);
    let combined_lower = combined.to_lowercase();
    let query_lower = query.to_lowercase();

    let numbers: Vec<String> = doc
        .tokens
        .iter()
        .filter(|t| t.like_num)
        .map(|t| t.text.clone())
        .collect();
    let locations = doc.entity_texts(&[EntityLabel::Gpe, EntityLabel::Loc]);

    let lemmas: HashSet<String> = doc.tokens.iter().map(|t| t.lemma.to_lowercase()).collect();
    let trends = matched_terms(&lemmas, &TREND_TERMS);
    let relationships = matched_terms(&lemmas, &RELATIONSHIP_TERMS);
    let hierarchies = matched_terms(&lemmas, &HIERARCHY_TERMS);
    let part_to_whole = matched_terms(&lemmas, &PART_TO_WHOLE_TERMS);
    let comparisons = matched_terms(&lemmas, &COMPARISON_TERMS);
    let temporal = matched_terms(&lemmas, &TEMPORAL_TERMS);

    let date_count = doc.count_label(EntityLabel::Date);
    let time_count = doc.count_label(EntityLabel::Time);
    let has_temporal_patterns = count_matches(&TEMPORAL_PATTERNS, &combined_lower) > 1;
    let has_time_series =
        date_count > 0 || time_count > 0 || temporal.len() > 2 || has_temporal_patterns;
    let has_multiple_dates = date_count > 1 || has_temporal_patterns;

    let has_by = doc.tokens.iter().any(|t| t.text.to_lowercase() == "by");
    let multi_dimensional =
        (has_by && numbers.len() > 5) || count_matches(&BY_PHRASE, &combined_lower) > 0;

    let category_count = doc.count_labels(&[
        EntityLabel::Org,
        EntityLabel::Product,
        EntityLabel::Person,
        EntityLabel::Event,
    ]);
    let proper_nouns = doc
        .tokens
        .iter()
        .filter(|t| t.pos == PartOfSpeech::ProperNoun)
        .count();
    let has_categories = category_count > 2 || proper_nouns > 3;

    let percentage_indicators = doc.tokens.iter().filter(|t| t.text == "%").count()
        + count_matches(&PERCENT_SIGN, &combined)
        + count_matches(&PERCENT_WORD, &combined_lower);
    let proportion_phrases = count_matches(&PROPORTION_PHRASES, &combined_lower);
    let percentages = percentage_values(&combined);
    let sum_to_whole = sums_to_whole(percentage_indicators, &percentages);

    let (list_markers, numbered_lines) = list_counts(response);
    let has_list_structure = list_markers > 2 || numbered_lines > 2;

    let comparison_structure = count_matches(&COMPARISON_OPERATORS, &combined_lower) > 0;

    let alpha_tokens: Vec<&str> = doc
        .tokens
        .iter()
        .filter(|t| t.is_alpha)
        .map(|t| t.lemma.as_str())
        .collect();
    let word_count = alpha_tokens.len();
    let unique_words = alpha_tokens
        .iter()
        .map(|lemma| lemma.to_lowercase())
        .collect::<HashSet<_>>()
        .len();
    let is_text_heavy = word_count > 50 && unique_words as f64 / word_count.max(1) as f64 > 0.5;

    let geographic_indicators = !locations.is_empty()
        || GEOGRAPHIC_QUERY_TERMS.iter().any(|term| query_lower.contains(term));

    FeatureSet {
        number_count: numbers.len(),
        location_count: locations.len(),
        category_count,
        trend_count: trends.len(),
        relationship_count: relationships.len(),
        hierarchy_count: hierarchies.len(),
        part_to_whole_count: part_to_whole.len(),
        comparison_count: comparisons.len(),

        has_time_series,
        has_temporal_patterns,
        has_multiple_dates,
        multi_dimensional,
        has_distribution: any_present(&lemmas, &DISTRIBUTION_TERMS),
        has_categories,
        is_text_heavy,

        percentage_indicators,
        proportion_phrases,
        sum_to_whole,

        is_question: query.trim().ends_with('?'),
        is_what_question: query_lower.starts_with("what"),
        is_how_question: query_lower.starts_with("how"),
        is_which_question: query_lower.starts_with("which"),
        is_show_request: SHOW_TERMS.iter().any(|term| query_lower.contains(term)),

        has_list_structure,
        comparison_structure,
        geographic_indicators,
        process_indicators: any_present(&lemmas, &PROCESS_TERMS),

        query_length: query.split_whitespace().count(),
        response_length: response.split_whitespace().count(),

        numbers,
        locations,
        trends,
        relationships,
        hierarchies,
        part_to_whole,
        comparisons,
        temporal,

        structure: Default::default(),
    }
}

pub fn combined_text(query: &str, response: &str) -> String {
    format!("{query} {response}")
}

/// Bullet markers and numbered lines in `text`.
pub(super) fn list_counts(text: &str) -> (usize, usize) {
    let bullets = BULLET_MARKERS
        .iter()
        .map(|marker| count_occurrences(text, marker))
        .sum();
    (bullets, count_matches(&NUMBERED_LINES, text))
}

fn percentage_values(text: &str) -> Vec<f64> {
    PERCENT_VALUE
        .iter()
        .flat_map(|regex| regex.captures_iter(text))
        .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()))
        .collect()
}

/// Percentages add up to a whole. Values above 100 are still counted as
/// indicators but left out of the sum.
fn sums_to_whole(indicators: usize, values: &[f64]) -> bool {
    if indicators <= 2 || values.len() <= 2 {
        return false;
    }
    let total: f64 = values.iter().filter(|v| **v <= 100.0).sum();
    (95.0..=105.0).contains(&total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::parser::{LanguageParser, RuleParser};

    fn extract(query: &str, response: &str) -> FeatureSet {
        let parser = RuleParser::new().unwrap();
        let doc = parser.parse(&combined_text(query, response));
        extract_features(query, response, &doc)
    }

    #[test]
    fn test_time_series_from_years() {
        let features = extract(
            "How has revenue changed over the last 5 years?",
            "2019: $1M, 2020: $1.2M, 2021: $1.5M, 2022: $1.8M, 2023: $2.1M",
        );
        assert!(features.has_time_series);
        assert!(features.has_multiple_dates);
        assert!(features.has_temporal_patterns);
        assert!(features.is_question);
        assert!(features.is_how_question);
        assert!(!features.is_what_question);
        assert_eq!(features.number_count, 11);
        assert_eq!(features.query_length, 9);
    }

    #[test]
    fn test_percentages_summing_to_whole() {
        let features = extract(
            "What is the breakdown of spending by department?",
            "Engineering: 40%, Sales: 30%, Marketing: 20%, Support: 10%",
        );
        assert_eq!(features.percentage_indicators, 8);
        assert!(features.sum_to_whole);
        assert!(features.multi_dimensional);
        assert!(features.is_what_question);
        assert!(!features.has_time_series);
        assert!(features.part_to_whole.contains(&"breakdown".to_string()));
        assert!(features.hierarchies.contains(&"breakdown".to_string()));
    }

    #[test]
    fn test_sum_to_whole_ignores_values_over_hundred() {
        assert!(sums_to_whole(4, &[50.0, 30.0, 20.0, 250.0]));
        assert!(!sums_to_whole(4, &[50.0, 30.0, 10.0]));
        assert!(!sums_to_whole(2, &[50.0, 30.0, 20.0]));
        assert!(!sums_to_whole(3, &[60.0, 40.0]));
        assert!(sums_to_whole(3, &[33.3, 33.3, 33.4]));
    }

    #[test]
    fn test_proportion_phrases() {
        let features = extract(
            "Which segment dominates?",
            "Category A accounts for 40%, Category B for 35%, Category C for 25%. Retail makes up 10% of sales.",
        );
        assert_eq!(features.proportion_phrases, 3);
        assert!(features.is_which_question);
        assert!(features.relationships.contains(&"dominate".to_string()));
    }

    #[test]
    fn test_percent_word_counts_as_indicator() {
        let features = extract("Share?", "Roughly 45 percent of users and 55 percent of admins.");
        assert_eq!(features.percentage_indicators, 2);
        assert!(!features.sum_to_whole);
    }

    #[test]
    fn test_lists_and_comparisons() {
        let features = extract(
            "Show me options",
            "Options:\n- Alpha\n- Beta\n- Gamma\nAlpha vs Beta is close.",
        );
        assert!(features.has_list_structure);
        assert!(features.comparison_structure);
        assert!(features.is_show_request);

        let numbered = extract("Steps", "1. Plan\n2. Build\n3) Ship");
        assert!(numbered.has_list_structure);
        assert!(numbered.process_indicators);
    }

    #[test]
    fn test_locations_and_geography() {
        let features = extract(
            "Where are our offices?",
            "We operate in Tokyo, London, Paris and Berlin.",
        );
        assert_eq!(features.location_count, 4);
        assert!(features.geographic_indicators);

        let features = extract("Plot this on a map", "Nothing specific.");
        assert_eq!(features.location_count, 0);
        assert!(features.geographic_indicators);
    }

    #[test]
    fn test_categories_from_proper_nouns() {
        let features = extract(
            "Who sells most?",
            "Sellers include Alpha, Bravo, Charlie and Delta this round.",
        );
        assert!(features.has_categories);
    }

    #[test]
    fn test_text_heavy_response() {
        let review = "customers praised friendly staff quick delivery fair pricing clean stores \
            helpful support easy returns wide selection fresh produce convenient hours loyalty \
            rewards mobile app parking space checkout speed seasonal offers gift cards online \
            ordering curbside pickup organic options bakery section pharmacy service coffee bar \
            local brands bulk discounts recycling program community events";
        assert!(extract("What do reviews say?", review).is_text_heavy);

        let repetitive = "sales ".repeat(80);
        assert!(!extract("Summary", &repetitive).is_text_heavy);
    }

    #[test]
    fn test_empty_inputs_produce_quiet_features() {
        let features = extract("", "");
        assert!(!features.has_time_series);
        assert!(!features.is_question);
        assert_eq!(features.percentage_indicators, 0);
        assert_eq!(features.query_length, 0);
    }
}
