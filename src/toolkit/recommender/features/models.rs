use serde::{Deserialize, Serialize};


/// Signals extracted from one query/response pair.
///
/// Every field has a zero value, so [`FeatureSet::default`] is the degraded
/// result used when the language parser is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub numbers: Vec<String>,
    pub locations: Vec<String>,

    // matched vocabulary lemmas, sorted
    pub trends: Vec<String>,
    pub relationships: Vec<String>,
    pub hierarchies: Vec<String>,
    pub part_to_whole: Vec<String>,
    pub comparisons: Vec<String>,
    pub temporal: Vec<String>,

    pub has_time_series: bool,
    pub has_temporal_patterns: bool,
    pub has_multiple_dates: bool,
    pub multi_dimensional: bool,
    pub has_distribution: bool,
    pub has_categories: bool,
    pub is_text_heavy: bool,

    pub percentage_indicators: usize,
    pub proportion_phrases: usize,
    pub sum_to_whole: bool,

    pub is_question: bool,
    pub is_what_question: bool,
    pub is_how_question: bool,
    pub is_which_question: bool,
    pub is_show_request: bool,

    pub has_list_structure: bool,
    pub comparison_structure: bool,
    pub geographic_indicators: bool,
    pub process_indicators: bool,

    pub query_length: usize,
    pub response_length: usize,
    pub number_count: usize,
    pub location_count: usize,
    pub category_count: usize,
    pub trend_count: usize,
    pub relationship_count: usize,
    pub hierarchy_count: usize,
    pub part_to_whole_count: usize,
    pub comparison_count: usize,

    pub structure: StructureFeatures,
}

impl FeatureSet {
    /// Merges the response layout analysis. Its category verdict replaces the
    /// linguistic one.
    pub fn with_structure(mut self, structure: StructureFeatures) -> Self {
        self.has_categories = structure.has_categories;
        self.structure = structure;
        self
    }
}


/// Layout cues found in the response text alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureFeatures {
    pub has_table: bool,
    pub has_lists: bool,
    pub has_hierarchy: bool,
    pub has_dated_sequence: bool,
    pub has_categories: bool,
    pub has_key_value: bool,
}
