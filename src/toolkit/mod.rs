

pub mod recommender;


pub use recommender::{ChartRecommender, ChartType, Recommendation};
