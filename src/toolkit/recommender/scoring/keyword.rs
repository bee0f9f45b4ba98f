use super::models::ScoreMap;
use crate::toolkit::recommender::features::combined_text;


/// Keyword overlap per archetype: twice the matched fraction, capped at 1.
///
/// Keywords match as plain substrings of the lowercased conversation, so
/// "top" also fires inside "stop".
pub fn keyword_scores(query: &str, response: &str) -> ScoreMap {
    let text_lower = combined_text(query, response).to_lowercase();

    ScoreMap::from_fn(|chart| {
        let keywords = chart.keywords();
        let matched = keywords.iter().filter(|keyword| text_lower.contains(*keyword)).count();

        if matched == 0 {
            0.0
        } else {
            (matched as f64 / keywords.len() as f64 * 2.0).min(1.0)
        }
    })
}
