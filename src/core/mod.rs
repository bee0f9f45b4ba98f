

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, RecommendationCache};
pub use config::{EmbeddingBackend, EmbeddingConfig, ModelsConfig, ParserConfig, RecommenderConfig};
pub use error::{Result, VizierError};
