//! Diversity-constrained top-N selection and score normalisation.

use std::collections::HashSet;

use super::catalog::{ChartCategory, ChartType};
use super::models::{Recommendation, RecommendedChart, RECOMMENDATION_SIZE};
use super::scoring::ScoreMap;
use crate::utils::round2;

const DIVERSE_SLOTS: usize = RECOMMENDATION_SIZE - 1;


/// Picks three archetypes favouring unused categories, appends the
/// text-density archetype and normalises the four scores.
///
/// A candidate from an already used category is still taken when its score
/// exceeds `override_threshold`.
pub fn select(scores: &ScoreMap, override_threshold: f64) -> Recommendation {
    let ranked = scores.ranked();
    let mut picks: Vec<(ChartType, f64)> = Vec::with_capacity(RECOMMENDATION_SIZE);
    let mut used: HashSet<ChartCategory> = HashSet::new();

    if let Some(&(top, score)) = ranked.first() {
        if top != ChartType::TEXT_DENSITY {
            picks.push((top, score));
        }
        used.insert(top.category());
    }

    for &(chart, score) in ranked.iter().skip(1) {
        if picks.len() >= DIVERSE_SLOTS {
            break;
        }
        if chart == ChartType::TEXT_DENSITY {
            continue;
        }
        if !used.contains(&chart.category()) || score > override_threshold {
            picks.push((chart, score));
            used.insert(chart.category());
        }
    }

    // backfill by rank when the diversity pass came up short
    for &(chart, score) in &ranked {
        if picks.len() >= DIVERSE_SLOTS {
            break;
        }
        if chart != ChartType::TEXT_DENSITY && !picks.iter().any(|(c, _)| *c == chart) {
            picks.push((chart, score));
        }
    }

    picks.push((ChartType::TEXT_DENSITY, scores[ChartType::TEXT_DENSITY]));
    normalize(&picks)
}

/// Min-max normalisation to [0, 1], rounded to two decimals. When every score
/// is equal the rounded raw scores are kept.
fn normalize(picks: &[(ChartType, f64)]) -> Recommendation {
    let max = picks.iter().map(|(_, s)| *s).fold(f64::NEG_INFINITY, f64::max);
    let min = picks.iter().map(|(_, s)| *s).fold(f64::INFINITY, f64::min);
    let range = max - min;

    let charts = std::array::from_fn(|i| {
        let (chart, score) = picks[i];
        if range == 0.0 {
            RecommendedChart(chart, round2(score))
        } else {
            RecommendedChart(chart, round2((score - min) / range))
        }
    });
    Recommendation::new(charts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::recommender::catalog::ChartType::*;

    fn scores(entries: &[(ChartType, f64)]) -> ScoreMap {
        let mut map = ScoreMap::zeros();
        for &(chart, score) in entries {
            map[chart] = score;
        }
        map
    }

    fn ids(rec: &Recommendation) -> Vec<ChartType> {
        rec.iter().map(|c| c.chart()).collect()
    }

    #[test]
    fn test_one_archetype_per_category() {
        let map = scores(&[
            (TreemapChart, 0.65),
            (SunburstChart, 0.6),
            (BarChart, 0.3),
            (LineChart, 0.2),
            (WordCloud, 0.1),
        ]);
        let rec = select(&map, 0.7);

        assert_eq!(ids(&rec), vec![TreemapChart, BarChart, LineChart, WordCloud]);
        let scores: Vec<f64> = rec.iter().map(|c| c.score()).collect();
        assert_eq!(scores, vec![1.0, 0.36, 0.18, 0.0]);
    }

    #[test]
    fn test_high_scores_override_diversity() {
        let map = scores(&[(TreemapChart, 0.9), (SunburstChart, 0.8), (BarChart, 0.3)]);
        let rec = select(&map, 0.7);
        assert_eq!(ids(&rec), vec![TreemapChart, SunburstChart, BarChart, WordCloud]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let map = scores(&[(TreemapChart, 0.9), (SunburstChart, 0.7), (BarChart, 0.3)]);
        let rec = select(&map, 0.7);
        assert!(!rec.contains(SunburstChart));
    }

    #[test]
    fn test_text_density_is_always_last() {
        let map = scores(&[(WordCloud, 2.0), (LineChart, 1.0), (BarChart, 0.5)]);
        let rec = select(&map, 0.7);

        assert_eq!(ids(&rec), vec![LineChart, BarChart, ChordDiagram, WordCloud]);
        let scores: Vec<f64> = rec.iter().map(|c| c.score()).collect();
        assert_eq!(scores, vec![0.5, 0.25, 0.0, 1.0]);
    }

    #[test]
    fn test_category_limit_with_leading_text_density() {
        let map = scores(&[(WordCloud, 2.0), (TreemapChart, 1.0), (SunburstChart, 0.5)]);
        let rec = select(&map, 0.7);
        assert_eq!(ids(&rec), vec![TreemapChart, AreaChart, BarChart, WordCloud]);
    }

    #[test]
    fn test_equal_scores_keep_raw_values() {
        let rec = select(&ScoreMap::from_fn(|_| 0.456), 0.7);
        assert_eq!(ids(&rec), vec![AreaChart, BarChart, ChordDiagram, WordCloud]);
        assert!(rec.iter().all(|c| c.score() == 0.46));

        let zeros = select(&ScoreMap::zeros(), 0.7);
        assert!(zeros.iter().all(|c| c.score() == 0.0));
    }

    #[test]
    fn test_scores_within_unit_range() {
        let map = ScoreMap::from_fn(|chart| (chart.index() as f64 * 0.37).sin() * 3.0);
        let rec = select(&map, 0.7);
        assert_eq!(rec.charts().len(), RECOMMENDATION_SIZE);
        assert!(rec.iter().all(|c| (0.0..=1.0).contains(&c.score())));
        assert_eq!(rec.fallback().chart(), WordCloud);
    }
}
