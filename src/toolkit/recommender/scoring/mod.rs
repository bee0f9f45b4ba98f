//! Per-archetype scoring stages. Each stage returns a new [`ScoreMap`].

mod booster;
mod context;
mod keyword;
mod models;
mod semantic;

pub use booster::{apply_feature_boosts, fuse};
pub use context::apply_context_boosts;
pub use keyword::keyword_scores;
pub use models::ScoreMap;
pub use semantic::{cosine_similarity, SemanticScorer};
