//! Embedding similarity between the conversation and each archetype's
//! description.

use std::sync::Arc;

use parking_lot::Mutex;
use strum::EnumCount;
use tracing::{debug, warn};

use super::models::ScoreMap;
use crate::nlp::embeddings::{Embedder, EmbeddingError};
use crate::nlp::provider::ModelProvider;
use crate::toolkit::recommender::catalog::ChartType;
use crate::toolkit::recommender::features::combined_text;
use crate::utils::safe_truncate;


/// Plain cosine similarity in [-1, 1]. Mismatched or zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|y| y * y).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    f64::from(dot / (norm_a * norm_b))
}


pub struct SemanticScorer {
    models: Arc<ModelProvider>,
    max_chars: usize,
    descriptions: Mutex<Option<Arc<Vec<Vec<f32>>>>>,
}

impl SemanticScorer {
    pub fn new(models: Arc<ModelProvider>, max_chars: usize) -> Self {
        Self {
            models,
            max_chars,
            descriptions: Mutex::new(None),
        }
    }

    /// Similarity per archetype. Any embedding failure degrades to all zeros.
    pub fn score(&self, query: &str, response: &str) -> ScoreMap {
        match self.try_score(query, response) {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Semantic scoring unavailable, using zeros: {}", e);
                ScoreMap::zeros()
            }
        }
    }

    fn try_score(&self, query: &str, response: &str) -> Result<ScoreMap, EmbeddingError> {
        let embedder = self.models.embedder()?;
        let descriptions = self.description_embeddings(embedder.as_ref())?;

        let text = safe_truncate(&combined_text(query, response), self.max_chars);
        let vector = embedder.embed(&text)?;

        Ok(ScoreMap::from_fn(|chart| {
            cosine_similarity(&vector, &descriptions[chart.index()])
        }))
    }

    /// Description vectors, computed on first use and reused afterwards.
    fn description_embeddings(&self, embedder: &dyn Embedder) -> Result<Arc<Vec<Vec<f32>>>, EmbeddingError> {
        let mut cached = self.descriptions.lock();
        if let Some(vectors) = cached.as_ref() {
            return Ok(Arc::clone(vectors));
        }

        let vectors = ChartType::all()
            .map(|chart| embedder.embed(chart.description()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Embedded {} archetype descriptions with {}",
            ChartType::COUNT,
            embedder.model_name()
        );

        let vectors = Arc::new(vectors);
        *cached = Some(Arc::clone(&vectors));
        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::embeddings::FakeEmbedder;
    use crate::nlp::parser::{LanguageParser, ParserError, RuleParser};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEmbedder {
        inner: FakeEmbedder,
        calls: AtomicUsize,
    }

    impl Embedder for CountingEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.embed(text)
        }

        fn dimensions(&self) -> usize {
            self.inner.dimensions()
        }

        fn model_name(&self) -> &str {
            "counting"
        }
    }

    fn parser() -> Arc<dyn LanguageParser> {
        Arc::new(RuleParser::new().unwrap())
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_matching_description_scores_highest() {
        let models = Arc::new(ModelProvider::with_models(Arc::new(FakeEmbedder::new(384)), parser()));
        let scorer = SemanticScorer::new(models, 1000);

        let scores = scorer.score(ChartType::ChordDiagram.description(), "");
        assert!((scores[ChartType::ChordDiagram] - 1.0).abs() < 1e-5);
        assert_eq!(scores.ranked()[0].0, ChartType::ChordDiagram);
    }

    #[test]
    fn test_descriptions_are_embedded_once() {
        let embedder = Arc::new(CountingEmbedder {
            inner: FakeEmbedder::new(64),
            calls: AtomicUsize::new(0),
        });
        let models = Arc::new(ModelProvider::with_models(embedder.clone(), parser()));
        let scorer = SemanticScorer::new(models, 1000);

        scorer.score("first question", "first answer");
        assert_eq!(embedder.calls.load(Ordering::SeqCst), ChartType::COUNT + 1);

        scorer.score("second question", "second answer");
        assert_eq!(embedder.calls.load(Ordering::SeqCst), ChartType::COUNT + 2);
    }

    #[test]
    fn test_unavailable_model_scores_zero() {
        let models = Arc::new(ModelProvider::with_loaders(
            Box::new(|| Err(EmbeddingError::ModelLoad("missing weights".to_string()))),
            Box::new(|| -> Result<Arc<dyn LanguageParser>, ParserError> {
                Ok(Arc::new(RuleParser::new()?))
            }),
        ));
        let scorer = SemanticScorer::new(models, 1000);

        let scores = scorer.score("How has revenue changed?", "It grew.");
        assert_eq!(scores, ScoreMap::zeros());
    }
}
