pub mod core;
pub mod nlp;
pub mod toolkit;
pub mod utils;

pub use utils::{safe_truncate, safe_truncate_ellipsis};


pub use core::cache::{CacheStats, RecommendationCache};
pub use core::config::RecommenderConfig;
pub use core::error::{Result, VizierError};
pub use nlp::provider::ModelProvider;
pub use toolkit::recommender::{
    ChartCategory, ChartRecommender, ChartType, Recommendation, RecommendedChart, ScoreBreakdown,
};


pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.7;


pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.3;


pub const DEFAULT_DIVERSITY_OVERRIDE: f64 = 0.7;


pub const DEFAULT_CACHE_CAPACITY: usize = 50;


pub const DEFAULT_EMBEDDING_MODEL_DIR: &str = "models/all-MiniLM-L6-v2";
