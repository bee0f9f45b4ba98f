//! Process-wide model handles.
//!
//! Each model is loaded at most once with check-lock-check: a fast read of the
//! slot, then the per-model load lock, then a second read before loading.
//! A failed load leaves the slot empty so the next caller retries.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::embeddings::{Embedder, EmbeddingError, FakeEmbedder, MiniLmEmbedder};
use super::parser::{LanguageParser, ParserError, RuleParser};
use crate::core::config::{EmbeddingBackend, ModelsConfig};

pub type EmbedderLoader = Box<dyn Fn() -> Result<Arc<dyn Embedder>, EmbeddingError> + Send + Sync>;
pub type ParserLoader = Box<dyn Fn() -> Result<Arc<dyn LanguageParser>, ParserError> + Send + Sync>;


struct LazyModel<T: ?Sized, E> {
    name: &'static str,
    slot: RwLock<Option<Arc<T>>>,
    load_lock: Mutex<()>,
    loader: Box<dyn Fn() -> Result<Arc<T>, E> + Send + Sync>,
}

impl<T: ?Sized, E: Display> LazyModel<T, E> {
    fn new(name: &'static str, loader: Box<dyn Fn() -> Result<Arc<T>, E> + Send + Sync>) -> Self {
        Self {
            name,
            slot: RwLock::new(None),
            load_lock: Mutex::new(()),
            loader,
        }
    }

    fn loaded(&self) -> Option<Arc<T>> {
        self.slot.read().as_ref().map(Arc::clone)
    }

    fn get(&self) -> Result<Arc<T>, E> {
        if let Some(model) = self.loaded() {
            return Ok(model);
        }

        let _guard = self.load_lock.lock();
        if let Some(model) = self.loaded() {
            return Ok(model);
        }

        let start = Instant::now();
        info!("Loading {}", self.name);
        match (self.loader)() {
            Ok(model) => {
                *self.slot.write() = Some(Arc::clone(&model));
                info!("Loaded {} in {}ms", self.name, start.elapsed().as_millis());
                Ok(model)
            }
            Err(e) => {
                warn!("Failed to load {}: {}", self.name, e);
                Err(e)
            }
        }
    }
}


pub struct ModelProvider {
    embedder: LazyModel<dyn Embedder, EmbeddingError>,
    parser: LazyModel<dyn LanguageParser, ParserError>,
}

impl ModelProvider {
    pub fn from_config(config: &ModelsConfig) -> Self {
        let embedding = config.embedding.clone();
        let backend = embedding.backend;
        let embed_loader: EmbedderLoader = match backend {
            EmbeddingBackend::MiniLm => Box::new(move || {
                Ok(Arc::new(MiniLmEmbedder::load(&embedding)?) as Arc<dyn Embedder>)
            }),
            EmbeddingBackend::Fake => Box::new(move || {
                Ok(Arc::new(FakeEmbedder::new(embedding.dimensions)) as Arc<dyn Embedder>)
            }),
        };

        let parser_config = config.parser.clone();
        let parser_loader: ParserLoader = Box::new(move || {
            Ok(Arc::new(RuleParser::load(&parser_config)?) as Arc<dyn LanguageParser>)
        });

        Self::with_loaders(embed_loader, parser_loader)
    }

    pub fn with_loaders(embedder: EmbedderLoader, parser: ParserLoader) -> Self {
        Self {
            embedder: LazyModel::new("sentence embedding model", embedder),
            parser: LazyModel::new("language parser", parser),
        }
    }

    /// Provider over models that are already constructed.
    pub fn with_models(embedder: Arc<dyn Embedder>, parser: Arc<dyn LanguageParser>) -> Self {
        Self::with_loaders(
            Box::new(move || Ok(Arc::clone(&embedder))),
            Box::new(move || Ok(Arc::clone(&parser))),
        )
    }

    pub fn embedder(&self) -> Result<Arc<dyn Embedder>, EmbeddingError> {
        self.embedder.get()
    }

    pub fn parser(&self) -> Result<Arc<dyn LanguageParser>, ParserError> {
        self.parser.get()
    }

    pub fn is_embedder_loaded(&self) -> bool {
        self.embedder.loaded().is_some()
    }

    pub fn is_parser_loaded(&self) -> bool {
        self.parser.loaded().is_some()
    }


    /// Loads both models on a blocking task. Requests arriving meanwhile wait
    /// on the same per-model lock instead of loading a second copy.
    pub fn warm_up(self: &Arc<Self>) -> JoinHandle<()> {
        let provider = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let parser_ok = provider.parser().is_ok();
            let embedder_ok = provider.embedder().is_ok();
            if parser_ok && embedder_ok {
                info!("Model warm-up finished in {}ms", start.elapsed().as_millis());
            } else {
                warn!(
                    "Model warm-up incomplete (parser: {}, embedder: {})",
                    parser_ok, embedder_ok
                );
            }
        })
    }
}
