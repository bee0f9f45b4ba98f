pub mod embeddings;
pub mod parser;
pub mod provider;

pub use embeddings::{Embedder, EmbeddingError, FakeEmbedder, MiniLmEmbedder};
pub use parser::{
    Entity, EntityLabel, LanguageParser, ParsedDoc, ParserError, PartOfSpeech, RuleParser, Token,
};
pub use provider::{EmbedderLoader, ModelProvider, ParserLoader};
