

use std::path::Path;
use std::time::Instant;

use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::core::config::EmbeddingConfig;


#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    #[error("Inference failed: {0}")]
    Inference(#[from] candle_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty text")]
    EmptyText,

    #[error("Unexpected embedding size: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}


pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
    fn dimensions(&self) -> usize;
    fn model_name(&self) -> &str;
}


/// all-MiniLM-L6-v2 sentence encoder running on candle.
///
/// Expects `config.json`, `tokenizer.json` and `model.safetensors` in the
/// configured model directory. Output vectors are mean-pooled and L2-normalised.
pub struct MiniLmEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    max_seq_len: usize,
    dims: usize,
    name: String,
}

impl MiniLmEmbedder {
    pub fn load(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let start = Instant::now();
        let model_dir = config.model_dir.as_path();
        info!("Loading sentence embedding model from {}", model_dir.display());

        let device = Device::Cpu;

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            EmbeddingError::ModelLoad(format!(
                "failed to load tokenizer from {}: {}",
                tokenizer_path.display(),
                e
            ))
        })?;

        let config_str = std::fs::read_to_string(model_dir.join("config.json"))?;
        let bert_config: BertConfig = serde_json::from_str(&config_str)?;

        let weights_path = model_dir.join("model.safetensors");
        if !weights_path.exists() {
            return Err(EmbeddingError::ModelLoad(format!(
                "missing weights at {}",
                weights_path.display()
            )));
        }
        // SAFETY: the safetensors file is mapped read-only and not modified while the model lives.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, &device)? };
        let model = BertModel::load(vb, &bert_config)?;

        info!(
            "Sentence embedding model loaded in {}ms",
            start.elapsed().as_millis()
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            max_seq_len: config.max_seq_len.max(2),
            dims: config.dimensions,
            name: model_name_from_dir(model_dir),
        })
    }

    fn mean_pooling(&self, hidden: &Tensor, attention_mask: &Tensor) -> Result<Vec<f32>, EmbeddingError> {
        let mask_expanded = attention_mask.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask_expanded)?.sum(1)?;
        let counts = mask_expanded.sum(1)?;
        let mean = summed.broadcast_div(&counts)?;

        let norm = mean.sqr()?.sum_keepdim(1)?.sqrt()?;
        let normalized = mean.broadcast_div(&norm)?;
        Ok(normalized.squeeze(0)?.to_vec1::<f32>()?)
    }
}

impl Embedder for MiniLmEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyText);
        }

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EmbeddingError::Tokenization(e.to_string()))?;

        let mut ids = encoding.get_ids().to_vec();
        let mut mask = encoding.get_attention_mask().to_vec();
        if ids.len() > self.max_seq_len {
            // keep the trailing [SEP]
            let sep = ids[ids.len() - 1];
            ids.truncate(self.max_seq_len - 1);
            ids.push(sep);
            mask.truncate(self.max_seq_len);
        }
        debug!("Embedding {} chars as {} tokens", text.len(), ids.len());

        let type_ids = vec![0u32; ids.len()];
        let input_ids = Tensor::new(ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(type_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let mask: Vec<f32> = mask.iter().map(|&m| m as f32).collect();
        let attention_mask = Tensor::new(mask.as_slice(), &self.device)?.unsqueeze(0)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let embedding = self.mean_pooling(&hidden, &attention_mask)?;

        if embedding.len() != self.dims {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dims,
                actual: embedding.len(),
            });
        }
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}

fn model_name_from_dir(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "minilm".to_string())
}


/// Deterministic hashed bag-of-words embedder.
///
/// Identical texts map to identical vectors and texts sharing words have
/// positive similarity, which is enough for offline runs and tests.
pub struct FakeEmbedder {
    dims: usize,
}

impl FakeEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(1) }
    }
}

impl Embedder for FakeEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyText);
        }

        let mut out = vec![0f32; self.dims];
        let lowered = text.to_lowercase();
        for word in lowered.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            let digest = Sha256::digest(word.as_bytes());
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(&digest[..8]);
            let h = u64::from_le_bytes(bytes);
            let idx = (h % self.dims as u64) as usize;
            let sign = if h >> 63 == 1 { -1.0 } else { 1.0 };
            out[idx] += sign;
        }

        let norm: f32 = out.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut out {
                *v /= norm;
            }
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn model_name(&self) -> &str {
        "fake-bag-of-words"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_fake_embedder_is_deterministic() {
        let embedder = FakeEmbedder::new(128);
        let a = embedder.embed("revenue growth over time").unwrap();
        let b = embedder.embed("revenue growth over time").unwrap();
        assert_eq!(a.len(), 128);
        assert_eq!(a, b);
        assert!((dot(&a, &a) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_fake_embedder_shared_words_are_similar() {
        let embedder = FakeEmbedder::new(384);
        let base = embedder.embed("market share breakdown by segment").unwrap();
        let close = embedder.embed("market share breakdown").unwrap();
        let far = embedder.embed("zebra quartz violin").unwrap();
        assert!(dot(&base, &close) > dot(&base, &far));
        assert!(dot(&base, &close) > 0.5);
    }

    #[test]
    fn test_fake_embedder_rejects_blank_text() {
        let embedder = FakeEmbedder::new(16);
        assert!(matches!(embedder.embed("   "), Err(EmbeddingError::EmptyText)));
    }

    #[test]
    fn test_minilm_missing_directory_fails_to_load() {
        let config = EmbeddingConfig {
            model_dir: PathBuf::from("/nonexistent/all-MiniLM-L6-v2"),
            ..Default::default()
        };
        let result = MiniLmEmbedder::load(&config);
        assert!(matches!(result, Err(EmbeddingError::ModelLoad(_))));
    }
}
