use savora_domain::{Restaurant, UserPreferences};
use serde::Serialize;

use crate::score::match_score;

/// A restaurant with its match metadata, ready for the discovery response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub match_score: u32,
    pub match_reasons: Vec<String>,
}

/// Score every restaurant against the preferences, order best-fit first,
/// and keep the top `limit`.
pub fn rank_restaurants(
    restaurants: Vec<Restaurant>,
    prefs: &UserPreferences,
    limit: usize,
) -> Vec<ScoredRestaurant> {
    let mut scored: Vec<ScoredRestaurant> = restaurants
        .into_iter()
        .map(|restaurant| {
            let result = match_score(&restaurant, prefs);
            ScoredRestaurant {
                restaurant,
                match_score: result.score,
                match_reasons: result.reasons,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(limit);
    scored
}
