//! Feature extraction: linguistic signals and response layout.

mod extractor;
mod models;
mod structure;
mod vocab;

pub use extractor::{combined_text, extract_features};
pub use models::{FeatureSet, StructureFeatures};
pub use structure::analyze_structure;
