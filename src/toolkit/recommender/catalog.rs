//! Static registry of chart archetypes.
//!
//! Variant order is the catalog order; it breaks ties when ranking.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr, EnumCount,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(usize)]
pub enum ChartType {
    AreaChart,
    BarChart,
    ChordDiagram,
    CirclePacking,
    ConnectionMap,
    #[serde(rename = "DAG")]
    #[strum(serialize = "DAG")]
    Dag,
    DonutChart,
    HeatmapChart,
    LineChart,
    MosaicPlot,
    NetworkGraph,
    PolarArea,
    SmallMultiples,
    StackedAreaChart,
    SunburstChart,
    TreeDiagram,
    TreemapChart,
    VoronoiMap,
    WordCloud,
}

impl ChartType {
    /// Archetype reserved for the fourth, text-density slot.
    pub const TEXT_DENSITY: ChartType = ChartType::WordCloud;

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn id(&self) -> &'static str {
        self.into()
    }

    pub fn all() -> impl Iterator<Item = ChartType> {
        Self::iter()
    }

    pub fn category(&self) -> ChartCategory {
        match self {
            Self::LineChart | Self::AreaChart | Self::StackedAreaChart => ChartCategory::TimeSeries,
            Self::TreemapChart | Self::SunburstChart | Self::CirclePacking | Self::TreeDiagram => {
                ChartCategory::Hierarchical
            }
            Self::NetworkGraph | Self::ChordDiagram | Self::Dag => ChartCategory::Relational,
            Self::BarChart | Self::SmallMultiples | Self::MosaicPlot => ChartCategory::Comparison,
            Self::ConnectionMap | Self::VoronoiMap => ChartCategory::Geographic,
            Self::HeatmapChart => ChartCategory::Distribution,
            Self::DonutChart => ChartCategory::Proportion,
            Self::WordCloud => ChartCategory::Text,
            Self::PolarArea => ChartCategory::Polar,
        }
    }

    /// Description embedded for semantic matching.
    pub fn description(&self) -> &'static str {
        match self {
            Self::AreaChart => "Visualizes cumulative quantitative data over continuous time periods. Shows trends with filled area emphasizing magnitude and progression. Ideal for time series data, growth metrics, revenue over time, cumulative values, and continuous measurements over time periods.",
            Self::BarChart => "Compares discrete categories or rankings using rectangular bars. Perfect for comparing values across categories, showing rankings, contrasting discrete items, top N lists, survey results, and categorical data without time component.",
            Self::ChordDiagram => "Visualizes complex relationships and flows between multiple entities or groups. Shows bidirectional connections, interactions, and relationships in a circular layout. Ideal for network flows, trade relationships, interconnected systems, migration patterns, and entity relationships.",
            Self::CirclePacking => "Represents hierarchical data as nested circles where size represents value. Efficient for showing part-whole relationships in hierarchies. Good for organizational structures, file systems, nested categories, and hierarchical data with size attributes.",
            Self::ConnectionMap => "Maps spatial or geographic relationships showing connections between locations. Visualizes routes, flows, or relationships between geographic points. Perfect for transportation networks, migration patterns, geographic connections, and location-based relationships.",
            Self::Dag => "Directed Acyclic Graph showing dependencies, workflows, or sequential processes. Ideal for process flows, task dependencies, project timelines, hierarchical processes with direction, workflow visualization, and dependency mapping.",
            Self::DonutChart => "Shows part-to-whole relationships using a circular chart with central hole. Perfect for proportional data, percentage distributions, market shares, budget allocations, category breakdowns, demographic splits, and composition analysis.",
            Self::HeatmapChart => "Displays data intensity using color gradients in a matrix format. Best for correlation matrices, multi-dimensional categorical data, showing patterns across two dimensions, identifying clusters, intensity mapping, and pattern recognition.",
            Self::LineChart => "Shows trends and changes over continuous time or sequential data. Perfect for time series, trends, progressions, comparing multiple series over time, continuous data visualization, stock prices, and performance metrics over time.",
            Self::MosaicPlot => "Visualizes relationships between multiple categorical variables using proportional rectangles. Good for contingency tables, cross-tabulations, multi-category relationships, categorical correlations, and showing interactions between categories.",
            Self::NetworkGraph => "Illustrates complex networks with nodes and edges showing connections. Best for social networks, influence networks, organizational charts, interconnected systems, relationship mapping, and showing centrality and clustering.",
            Self::PolarArea => "Represents data in polar coordinates with radial segments. Good for cyclic data, seasonal patterns, comparing multiple quantitative variables in circular layout, periodic data, and radial comparisons.",
            Self::SmallMultiples => "Displays multiple similar charts side-by-side for comparison. Facilitates comparing patterns across categories, time periods, or groups. Excellent for comparative analysis across dimensions, faceted views, and multi-category comparisons.",
            Self::StackedAreaChart => "Shows part-to-whole relationships changing over time with stacked filled areas. Displays composition changes while maintaining total perspective. Good for multi-category time series, composition over time, and cumulative breakdowns.",
            Self::SunburstChart => "Depicts hierarchical data as concentric rings. Excellent for multi-level hierarchies, nested categories, drill-down data, showing depth and breadth of hierarchical structures, and organizational hierarchies.",
            Self::TreeDiagram => "Shows hierarchical relationships in tree structure with nodes and branches. Clearly displays parent-child relationships, organizational structures, taxonomies, decision trees, and clear hierarchy visualization.",
            Self::TreemapChart => "Visualizes hierarchical data as nested rectangles where size represents value. Efficient for large hierarchies and showing quantity relationships. Good for file systems, budgets, organizational data, and hierarchical size comparisons.",
            Self::VoronoiMap => "Divides space into regions based on proximity to points. Useful for territory analysis, service areas, spatial partitioning, proximity analysis, coverage areas, and dominance regions.",
            Self::WordCloud => "Visualizes word frequency as sized words in a cloud layout. Great for text analysis, key themes, popular terms, sentiment analysis, keyword extraction, and text-heavy data visualization.",
        }
    }

    /// Lowercase terms matched as substrings by the keyword scorer.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::AreaChart => &[
                "trend", "growth", "over time", "cumulative", "increase", "decrease", "progression",
                "continuous", "time series", "evolution", "trajectory", "historical",
            ],
            Self::BarChart => &[
                "compare", "comparison", "versus", "ranking", "top", "best", "worst", "category",
                "different", "contrast", "relative", "rank",
            ],
            Self::ChordDiagram => &[
                "relationship", "connection", "flow", "interaction", "between", "network",
                "exchange", "transfer", "link", "associate",
            ],
            Self::CirclePacking => &[
                "hierarchy", "nested", "contains", "part of", "within", "organization", "structure",
                "grouped",
            ],
            Self::ConnectionMap => &[
                "geographic", "location", "map", "route", "distance", "between places", "spatial",
                "geographic connection",
            ],
            Self::Dag => &[
                "process", "workflow", "step", "sequence", "dependency", "before", "after",
                "requires", "depends on", "pipeline",
            ],
            Self::DonutChart => &[
                "percentage", "proportion", "share", "breakdown", "distribution", "composition",
                "part of whole", "market share", "allocation", "split",
            ],
            Self::HeatmapChart => &[
                "correlation", "pattern", "intensity", "matrix", "relationship between",
                "multi-dimensional", "cluster", "density",
            ],
            Self::LineChart => &[
                "trend", "change", "over time", "fluctuation", "variation", "pattern", "progress",
                "historical",
            ],
            Self::MosaicPlot => &[
                "categorical", "contingency", "cross-tabulation", "relationship between categories",
                "multi-category",
            ],
            Self::NetworkGraph => &[
                "network", "connection", "link", "influence", "relationship", "graph", "connected",
                "social",
            ],
            Self::PolarArea => &[
                "cyclic", "seasonal", "periodic", "radial", "circular", "rotation", "angle",
            ],
            Self::SmallMultiples => &[
                "compare", "multiple", "side by side", "faceted", "across", "comparison", "parallel",
            ],
            Self::StackedAreaChart => &[
                "composition", "breakdown", "over time", "cumulative", "parts", "changing",
                "evolution",
            ],
            Self::SunburstChart => &[
                "hierarchy", "nested", "layers", "levels", "drill down", "multi-level", "concentric",
            ],
            Self::TreeDiagram => &[
                "hierarchy", "tree", "parent", "child", "structure", "organization", "taxonomy",
                "branch",
            ],
            Self::TreemapChart => &[
                "hierarchy", "nested", "size", "quantity", "proportion", "rectangle",
                "hierarchical size",
            ],
            Self::VoronoiMap => &[
                "proximity", "territory", "region", "distance", "coverage", "area", "partition",
            ],
            Self::WordCloud => &[
                "text", "word", "frequency", "common", "theme", "keyword", "terms", "language",
            ],
        }
    }

    /// One-sentence explanation shown alongside a recommendation.
    pub fn rationale(&self) -> &'static str {
        match self {
            Self::AreaChart => "Recommended for showing continuous data trends over time with emphasis on magnitude.",
            Self::BarChart => "Ideal for comparing discrete categories or showing rankings.",
            Self::ChordDiagram => "Best for showing complex relationships and interactions between groups.",
            Self::CirclePacking => "Excellent for displaying hierarchical data with size relationships.",
            Self::ConnectionMap => "Perfect for geographic data showing relationships between locations.",
            Self::Dag => "Ideal for visualizing directed processes, workflows, or dependencies.",
            Self::DonutChart => "Perfect for showing part-to-whole relationships and proportional data.",
            Self::HeatmapChart => "Best for showing patterns in multi-dimensional categorical data.",
            Self::LineChart => "Excellent for time series data and continuous trends.",
            Self::MosaicPlot => "Useful for showing relationships between multiple categorical variables.",
            Self::NetworkGraph => "Ideal for visualizing complex interconnected relationships.",
            Self::PolarArea => "Good for cyclic data or comparing multiple quantitative variables.",
            Self::SmallMultiples => "Perfect for comparing patterns across different categories or groups.",
            Self::StackedAreaChart => "Best for showing part-to-whole relationships changing over time.",
            Self::SunburstChart => "Excellent for multi-level hierarchical data with nesting.",
            Self::TreeDiagram => "Ideal for displaying hierarchical relationships with clear parent-child structure.",
            Self::TreemapChart => "Best for hierarchical data where size represents quantity.",
            Self::VoronoiMap => "Good for spatial partitioning and proximity analysis.",
            Self::WordCloud => "Perfect for showing frequency in text data and key themes.",
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChartCategory {
    TimeSeries,
    Hierarchical,
    Relational,
    Comparison,
    Geographic,
    Distribution,
    Proportion,
    Text,
    Polar,
}

impl ChartCategory {
    pub fn members(&self) -> Vec<ChartType> {
        ChartType::iter().filter(|chart| chart.category() == *self).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_catalog_has_nineteen_archetypes() {
        assert_eq!(ChartType::COUNT, 19);
        assert_eq!(ChartType::all().count(), 19);
        for (i, chart) in ChartType::all().enumerate() {
            assert_eq!(chart.index(), i);
        }
    }

    #[test]
    fn test_ids_round_trip_through_strum_and_serde() {
        assert_eq!(ChartType::Dag.id(), "DAG");
        assert_eq!(ChartType::TreemapChart.id(), "treemap_chart");
        assert_eq!(ChartType::from_str("stacked_area_chart").unwrap(), ChartType::StackedAreaChart);
        assert_eq!(serde_json::to_string(&ChartType::Dag).unwrap(), "\"DAG\"");
        assert_eq!(
            serde_json::to_string(&ChartType::HeatmapChart).unwrap(),
            "\"heatmap_chart\""
        );
    }

    #[test]
    fn test_catalog_order_starts_and_ends_as_listed() {
        let ids: Vec<&str> = ChartType::all().map(|c| c.id()).collect();
        assert_eq!(ids.first(), Some(&"area_chart"));
        assert_eq!(ids[5], "DAG");
        assert_eq!(ids.last(), Some(&"word_cloud"));
    }

    #[test]
    fn test_every_archetype_has_text_and_keywords() {
        for chart in ChartType::all() {
            assert!(!chart.description().is_empty());
            assert!(!chart.rationale().is_empty());
            assert!(!chart.keywords().is_empty());
            assert!(chart.keywords().iter().all(|k| *k == k.to_lowercase()));
        }
    }

    #[test]
    fn test_categories_partition_catalog() {
        let mut seen = HashSet::new();
        for category in ChartCategory::iter() {
            for chart in category.members() {
                assert!(seen.insert(chart), "{chart} listed twice");
            }
        }
        assert_eq!(seen.len(), ChartType::COUNT);
        assert_eq!(ChartCategory::Hierarchical.members().len(), 4);
        assert_eq!(ChartType::TEXT_DENSITY.category(), ChartCategory::Text);
    }
}
