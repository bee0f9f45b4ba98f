//! Score fusion and feature-conditioned boosts.

use super::models::ScoreMap;
use crate::toolkit::recommender::catalog::ChartType::{self, *};
use crate::toolkit::recommender::features::FeatureSet;


/// Weighted sum of the semantic and keyword maps.
pub fn fuse(semantic: &ScoreMap, keyword: &ScoreMap, semantic_weight: f64, keyword_weight: f64) -> ScoreMap {
    ScoreMap::from_fn(|chart| semantic[chart] * semantic_weight + keyword[chart] * keyword_weight)
}


fn add(scores: &mut ScoreMap, boosts: &[(ChartType, f64)]) {
    for &(chart, amount) in boosts {
        scores.boost(chart, amount);
    }
}

/// Applies the additive feature rules to a copy of `fused`. Scores are left
/// unbounded; selection normalises them.
pub fn apply_feature_boosts(fused: &ScoreMap, features: &FeatureSet) -> ScoreMap {
    let mut scores = *fused;
    let f = features;

    if f.has_time_series {
        if f.has_multiple_dates {
            add(&mut scores, &[(LineChart, 0.8), (AreaChart, 0.7), (StackedAreaChart, 0.6)]);
        } else {
            add(&mut scores, &[(LineChart, 0.5), (AreaChart, 0.4)]);
        }
    }
    if f.trend_count > 1 {
        add(&mut scores, &[(LineChart, 0.4), (AreaChart, 0.3)]);
    }

    if f.relationship_count > 2 {
        add(&mut scores, &[(NetworkGraph, 1.2), (ChordDiagram, 1.0), (Dag, 0.8)]);
    } else if f.relationship_count > 0 {
        add(&mut scores, &[(NetworkGraph, 0.6), (ChordDiagram, 0.5)]);
    }

    if f.hierarchy_count > 2 {
        add(
            &mut scores,
            &[(TreemapChart, 1.2), (SunburstChart, 1.0), (CirclePacking, 0.8), (TreeDiagram, 0.7)],
        );
    } else if f.hierarchy_count > 0 {
        add(&mut scores, &[(TreemapChart, 0.6), (SunburstChart, 0.5)]);
    }

    // part-to-whole rules stack
    if f.sum_to_whole {
        add(&mut scores, &[(DonutChart, 1.5), (TreemapChart, 0.8)]);
    } else if f.percentage_indicators >= 3 {
        scores.boost(DonutChart, 1.0);
        if !f.has_time_series {
            scores.boost(DonutChart, 0.4);
        }
    } else if f.percentage_indicators > 0 {
        scores.boost(DonutChart, 0.6);
    }
    if f.proportion_phrases > 0 {
        scores.boost(DonutChart, 0.7);
    }
    if f.part_to_whole_count >= 3 {
        scores.boost(DonutChart, 1.2);
        if !f.has_time_series {
            scores.boost(DonutChart, 0.5);
        }
    } else if f.part_to_whole_count > 0 {
        scores.boost(DonutChart, 0.6);
    }

    if f.geographic_indicators {
        if f.location_count > 3 {
            add(&mut scores, &[(ConnectionMap, 1.2), (VoronoiMap, 0.8)]);
        } else if f.location_count > 0 {
            scores.boost(ConnectionMap, 0.7);
        }
    }

    if f.comparison_structure || (f.comparison_count > 1 && f.has_categories) {
        add(&mut scores, &[(BarChart, 0.8), (SmallMultiples, 1.0), (MosaicPlot, 0.7)]);
    }

    if f.multi_dimensional {
        add(&mut scores, &[(HeatmapChart, 1.2), (SmallMultiples, 0.8)]);
    }
    if f.has_distribution {
        scores.boost(HeatmapChart, 0.8);
    }
    if f.is_text_heavy {
        scores.boost(WordCloud, 1.0);
    }
    if f.process_indicators {
        add(&mut scores, &[(Dag, 1.0), (TreeDiagram, 0.6)]);
    }

    if f.has_list_structure {
        if f.has_categories {
            scores.boost(BarChart, 0.5);
        }
        if f.structure.has_hierarchy {
            scores.boost(TreemapChart, 0.4);
        }
    }

    if f.has_time_series && f.part_to_whole_count > 0 {
        scores.boost(StackedAreaChart, 0.9);
    }
    if f.has_categories && f.multi_dimensional {
        add(&mut scores, &[(HeatmapChart, 0.8), (SmallMultiples, 0.7)]);
    }

    scores
}
