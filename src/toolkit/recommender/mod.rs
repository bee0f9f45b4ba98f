//! Chart-type recommendation engine.

pub mod catalog;
pub mod engine;
pub mod features;
pub mod models;
pub mod scoring;
pub mod selection;

pub use catalog::{ChartCategory, ChartType};
pub use engine::{ChartRecommender, ScoreBreakdown};
pub use features::{FeatureSet, StructureFeatures};
pub use models::{Recommendation, RecommendedChart, RECOMMENDATION_SIZE};
pub use scoring::ScoreMap;
