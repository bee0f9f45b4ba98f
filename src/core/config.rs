//! Engine configuration.
//!
//! Every tunable of the recommendation pipeline lives here with its default.
//! The engine never reads the environment itself; callers build a
//! [`RecommenderConfig`] (usually via [`RecommenderConfig::load`]) and hand it in.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use super::error::Result;


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Weight of embedding similarity in the fused score.
    pub semantic_weight: f64,
    /// Weight of keyword overlap in the fused score.
    pub keyword_weight: f64,
    /// Candidates scoring above this may repeat an already used category.
    pub diversity_override_threshold: f64,

    pub cache_capacity: usize,
    pub cache_key_prefix_chars: usize,

    pub max_response_chars: usize,
    pub max_embedding_chars: usize,

    pub models: ModelsConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            semantic_weight: crate::DEFAULT_SEMANTIC_WEIGHT,
            keyword_weight: crate::DEFAULT_KEYWORD_WEIGHT,
            diversity_override_threshold: crate::DEFAULT_DIVERSITY_OVERRIDE,
            cache_capacity: crate::DEFAULT_CACHE_CAPACITY,
            cache_key_prefix_chars: 200,
            max_response_chars: 2000,
            max_embedding_chars: 1000,
            models: ModelsConfig::default(),
        }
    }
}

impl RecommenderConfig {

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("VIZIER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }


    pub fn validate(&self) -> Result<()> {
        if self.semantic_weight < 0.0 || self.keyword_weight < 0.0 {
            return Err(ConfigError::Message(format!(
                "fusion weights must be non-negative (semantic={}, keyword={})",
                self.semantic_weight, self.keyword_weight
            ))
            .into());
        }
        if !(0.0..=1.0).contains(&self.diversity_override_threshold) {
            return Err(ConfigError::Message(format!(
                "diversity_override_threshold must be within [0, 1], got {}",
                self.diversity_override_threshold
            ))
            .into());
        }
        if self.cache_key_prefix_chars == 0 || self.max_embedding_chars == 0 {
            return Err(ConfigError::Message("text limits must be at least 1".to_string()).into());
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::Message("cache_capacity must be at least 1".to_string()).into());
        }
        Ok(())
    }
}


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub embedding: EmbeddingConfig,
    pub parser: ParserConfig,
    /// Start loading both models in the background as soon as the provider exists.
    pub warm_up: bool,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            embedding: EmbeddingConfig::default(),
            parser: ParserConfig::default(),
            warm_up: true,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    #[default]
    MiniLm,
    Fake,
}


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    pub model_dir: PathBuf,
    pub max_seq_len: usize,
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::MiniLm,
            model_dir: PathBuf::from(crate::DEFAULT_EMBEDDING_MODEL_DIR),
            max_seq_len: 256,
            dimensions: 384,
        }
    }
}


#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Extra `LABEL<TAB>phrase` entries merged into the built-in gazetteer.
    pub gazetteer_path: Option<PathBuf>,
}
