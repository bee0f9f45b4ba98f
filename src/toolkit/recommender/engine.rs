//! The recommendation pipeline.
//!
//! features -> {semantic, keyword} -> fusion -> feature boosts -> context
//! boosts -> diversity selection -> cache

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use super::features::{analyze_structure, combined_text, extract_features, FeatureSet};
use super::models::Recommendation;
use super::scoring::{
    apply_context_boosts, apply_feature_boosts, fuse, keyword_scores, ScoreMap, SemanticScorer,
};
use super::selection::select;
use crate::core::cache::{CacheStats, RecommendationCache};
use crate::core::config::RecommenderConfig;
use crate::nlp::provider::ModelProvider;
use crate::utils::safe_truncate_ellipsis;


/// Every intermediate stage of one scoring run.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub features: FeatureSet,
    pub semantic: ScoreMap,
    pub keyword: ScoreMap,
    pub fused: ScoreMap,
    pub boosted: ScoreMap,
    pub adjusted: ScoreMap,
}


pub struct ChartRecommender {
    config: RecommenderConfig,
    models: Arc<ModelProvider>,
    semantic: SemanticScorer,
    cache: RecommendationCache<Recommendation>,
}

impl ChartRecommender {
    pub fn new(config: RecommenderConfig, models: Arc<ModelProvider>) -> Self {
        let semantic = SemanticScorer::new(Arc::clone(&models), config.max_embedding_chars);
        let cache = RecommendationCache::new(config.cache_capacity);

        Self {
            config,
            models,
            semantic,
            cache,
        }
    }

    /// Engine with models built from `config.models`.
    pub fn from_config(config: RecommenderConfig) -> Self {
        let models = Arc::new(ModelProvider::from_config(&config.models));
        Self::new(config, models)
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn models(&self) -> &Arc<ModelProvider> {
        &self.models
    }

    /// Ranks the chart archetypes for a query/response pair.
    ///
    /// Never fails: unavailable models degrade the ranking instead.
    pub fn recommend(&self, query: &str, response: &str) -> Recommendation {
        let key = RecommendationCache::<Recommendation>::make_key(
            query,
            response,
            self.config.cache_key_prefix_chars,
        );
        if let Some(cached) = self.cache.get(&key) {
            debug!("Recommendation cache hit");
            return cached;
        }

        let start = Instant::now();
        let breakdown = self.analyze(query, response);
        let recommendation = select(&breakdown.adjusted, self.config.diversity_override_threshold);

        debug!(
            "Recommended {:?} in {}ms",
            recommendation.iter().map(|c| c.chart().id()).collect::<Vec<_>>(),
            start.elapsed().as_millis()
        );

        self.cache.put(key, recommendation.clone());
        recommendation
    }

    /// Runs every scoring stage without selection or caching.
    pub fn analyze(&self, query: &str, response: &str) -> ScoreBreakdown {
        let response = safe_truncate_ellipsis(response, self.config.max_response_chars);

        let features = self.extract(query, &response);
        let semantic = self.semantic.score(query, &response);
        let keyword = keyword_scores(query, &response);

        let fused = fuse(
            &semantic,
            &keyword,
            self.config.semantic_weight,
            self.config.keyword_weight,
        );
        let boosted = apply_feature_boosts(&fused, &features);
        let adjusted = apply_context_boosts(&boosted, query, &response, &features);

        if let Some(&(chart, score)) = adjusted.ranked().first() {
            debug!("Top candidate {} at {:.3}", chart, score);
        }

        ScoreBreakdown {
            features,
            semantic,
            keyword,
            fused,
            boosted,
            adjusted,
        }
    }

    fn extract(&self, query: &str, response: &str) -> FeatureSet {
        let parser = match self.models.parser() {
            Ok(parser) => parser,
            Err(e) => {
                warn!("Language parser unavailable, continuing without features: {}", e);
                return FeatureSet::default();
            }
        };

        let doc = parser.parse(&combined_text(query, response));
        let response_doc = parser.parse(response);

        extract_features(query, response, &doc).with_structure(analyze_structure(response, &response_doc))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
