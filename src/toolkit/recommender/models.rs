use serde::{Deserialize, Serialize};

use super::catalog::ChartType;

/// Number of entries in every recommendation.
pub const RECOMMENDATION_SIZE: usize = 4;


/// One ranked archetype with its normalised score. Serialises as `[id, score]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendedChart(pub ChartType, pub f64);

impl RecommendedChart {
    pub fn chart(&self) -> ChartType {
        self.0
    }

    pub fn score(&self) -> f64 {
        self.1
    }
}


/// Three diverse picks followed by the text-density archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recommendation {
    charts: [RecommendedChart; RECOMMENDATION_SIZE],
}

impl Recommendation {
    pub fn new(charts: [RecommendedChart; RECOMMENDATION_SIZE]) -> Self {
        Self { charts }
    }

    pub fn charts(&self) -> &[RecommendedChart] {
        &self.charts
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecommendedChart> {
        self.charts.iter()
    }

    pub fn top(&self) -> RecommendedChart {
        self.charts[0]
    }

    /// The first three, diversity-selected entries.
    pub fn primary(&self) -> &[RecommendedChart] {
        &self.charts[..RECOMMENDATION_SIZE - 1]
    }

    pub fn fallback(&self) -> RecommendedChart {
        self.charts[RECOMMENDATION_SIZE - 1]
    }

    pub fn contains(&self, chart: ChartType) -> bool {
        self.charts.iter().any(|c| c.0 == chart)
    }

    pub fn position(&self, chart: ChartType) -> Option<usize> {
        self.charts.iter().position(|c| c.0 == chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Recommendation {
        Recommendation::new([
            RecommendedChart(ChartType::DonutChart, 1.0),
            RecommendedChart(ChartType::Dag, 0.42),
            RecommendedChart(ChartType::BarChart, 0.1),
            RecommendedChart(ChartType::WordCloud, 0.0),
        ])
    }

    #[test]
    fn test_serialises_as_pairs() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"[["donut_chart",1.0],["DAG",0.42],["bar_chart",0.1],["word_cloud",0.0]]"#
        );

        let back: Recommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_accessors() {
        let rec = sample();
        assert_eq!(rec.top().chart(), ChartType::DonutChart);
        assert_eq!(rec.fallback().chart(), ChartType::WordCloud);
        assert_eq!(rec.primary().len(), 3);
        assert_eq!(rec.position(ChartType::BarChart), Some(2));
        assert!(!rec.contains(ChartType::LineChart));
    }
}
