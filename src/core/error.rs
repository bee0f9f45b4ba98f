

use thiserror::Error;

use crate::nlp::embeddings::EmbeddingError;
use crate::nlp::parser::ParserError;


#[derive(Error, Debug)]
pub enum VizierError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Embedding model error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Language parser error: {0}")]
    Parser(#[from] ParserError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}


pub type Result<T> = std::result::Result<T, VizierError>;
