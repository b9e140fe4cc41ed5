use savora_domain::{Restaurant, UserPreferences};

/// How well a restaurant fits a user's stated preferences: a 0-100 score
/// plus up to three human-readable reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchScore {
    pub score: u32,
    pub reasons: Vec<String>,
}

const MAX_REASONS: usize = 3;

/// Weighted additive scoring, capped at 100:
/// cuisine up to 40, price up to 30, dietary up to 20, popularity up to 10.
///
/// Pure function over its inputs; reasons are collected in evaluation order
/// and truncated to three, so cuisine/price/dietary reasons outrank the
/// high-rating one.
pub fn match_score(restaurant: &Restaurant, prefs: &UserPreferences) -> MatchScore {
    let mut score: u32 = 0;
    let mut reasons: Vec<String> = Vec::new();

    // Cuisine: shared tag scores full marks, a miss still earns a little
    // exploration credit, no stated preference is neutral.
    if prefs.preferred_cuisines.is_empty() {
        score += 20;
    } else {
        match restaurant
            .cuisine
            .iter()
            .find(|c| prefs.preferred_cuisines.contains(c))
        {
            Some(matched) => {
                score += 40;
                reasons.push(format!("Loves {}", matched));
            }
            None => score += 10,
        }
    }

    // Price: exact tier membership, or half credit one tier off.
    let tier = restaurant.price_range.tier();
    if prefs.preferred_price_range.contains(&tier) {
        score += 30;
        reasons.push(price_label(tier).to_string());
    } else if prefs
        .preferred_price_range
        .iter()
        .any(|p| (tier - p).abs() == 1)
    {
        score += 15;
    }

    // Dietary: an advertised matching option scores fully; a restaurant
    // advertising nothing gets token credit; no restrictions is neutral.
    if prefs.dietary_restrictions.is_empty() {
        score += 10;
    } else {
        match prefs
            .dietary_restrictions
            .iter()
            .find(|d| restaurant.dietary_options.contains(d))
        {
            Some(matched) => {
                score += 20;
                reasons.push(format!("Has {} options", matched));
            }
            None => {
                if restaurant.dietary_options.is_empty() {
                    score += 5;
                }
            }
        }
    }

    // Popularity: two points per rating star, floored.
    let rating = restaurant.rating.clamp(0.0, 5.0);
    score += (rating * 2.0) as u32;

    if rating >= 4.5 {
        reasons.push(format!("Highly rated ({}\u{2605})", rating));
    }

    reasons.truncate(MAX_REASONS);
    MatchScore {
        score: score.min(100),
        reasons,
    }
}

fn price_label(tier: i64) -> &'static str {
    match tier {
        1 => "Budget-friendly",
        2 => "Moderate",
        3 => "Upscale",
        4 => "Fine dining",
        _ => "Good value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savora_domain::PriceRange;

    fn restaurant(cuisine: &[&str], price: i64, rating: f64, dietary: &[&str]) -> Restaurant {
        Restaurant {
            restaurant_id: "rest1".to_string(),
            name: "Test Spot".to_string(),
            cuisine: cuisine.iter().map(|s| s.to_string()).collect(),
            price_range: PriceRange::Tier(price),
            rating,
            dietary_options: dietary.iter().map(|s| s.to_string()).collect(),
            location: serde_json::Value::Null,
            image_url: String::new(),
            address: String::new(),
        }
    }

    fn prefs(cuisines: &[&str], price: &[i64], dietary: &[&str]) -> UserPreferences {
        UserPreferences {
            preferred_cuisines: cuisines.iter().map(|s| s.to_string()).collect(),
            preferred_price_range: price.to_vec(),
            dietary_restrictions: dietary.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_cuisine_match_contributes_forty() {
        // Price two tiers off, dietary advertised-but-unmatched, rating 0:
        // every other component scores zero, leaving the cuisine 40.
        let r = restaurant(&["Italian"], 2, 0.0, &["Halal"]);
        let result = match_score(&r, &prefs(&["Italian"], &[4], &["Vegan"]));
        assert_eq!(result.score, 40);
        assert!(result.reasons.contains(&"Loves Italian".to_string()));
    }

    #[test]
    fn test_cuisine_miss_earns_exploration_credit() {
        let r = restaurant(&["Sushi"], 2, 0.0, &[]);
        let result = match_score(&r, &prefs(&["Thai"], &[], &["Vegan"]));
        // 10 cuisine + 0 price + 5 dietary (nothing advertised) + 0 rating.
        assert_eq!(result.score, 15);
    }

    #[test]
    fn test_no_cuisine_preference_is_neutral() {
        let r = restaurant(&["Sushi"], 2, 0.0, &[]);
        let result = match_score(&r, &prefs(&[], &[], &["Vegan"]));
        assert_eq!(result.score, 25);
    }

    #[test]
    fn test_price_exact_match_contributes_thirty() {
        let r = restaurant(&[], 2, 0.0, &[]);
        let result = match_score(&r, &prefs(&["Thai"], &[2, 3], &["Vegan"]));
        // 10 cuisine + 30 price + 5 dietary.
        assert_eq!(result.score, 45);
        assert!(result.reasons.contains(&"Moderate".to_string()));
    }

    #[test]
    fn test_price_off_by_one_contributes_fifteen() {
        let r = restaurant(&[], 2, 0.0, &[]);
        let result = match_score(&r, &prefs(&["Thai"], &[3, 4], &["Vegan"]));
        assert_eq!(result.score, 30);
        assert!(!result.reasons.contains(&"Moderate".to_string()));
    }

    #[test]
    fn test_price_off_by_two_contributes_nothing() {
        let r = restaurant(&[], 2, 0.0, &[]);
        let result = match_score(&r, &prefs(&["Thai"], &[4], &["Vegan"]));
        assert_eq!(result.score, 15);
    }

    #[test]
    fn test_price_from_dollar_notation() {
        let mut r = restaurant(&[], 0, 0.0, &[]);
        r.price_range = PriceRange::Symbols("$$$".to_string());
        let result = match_score(&r, &prefs(&["Thai"], &[3], &["Vegan"]));
        assert_eq!(result.score, 45);
        assert!(result.reasons.contains(&"Upscale".to_string()));
    }

    #[test]
    fn test_dietary_match_contributes_twenty() {
        let r = restaurant(&[], 2, 0.0, &["Vegan", "Gluten-Free"]);
        let result = match_score(&r, &prefs(&["Thai"], &[4], &["Gluten-Free"]));
        assert_eq!(result.score, 30);
        assert!(result
            .reasons
            .contains(&"Has Gluten-Free options".to_string()));
    }

    #[test]
    fn test_dietary_advertised_but_unmatched_scores_zero() {
        let r = restaurant(&[], 2, 0.0, &["Halal"]);
        let result = match_score(&r, &prefs(&["Thai"], &[4], &["Vegan"]));
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_no_dietary_restrictions_is_neutral() {
        let r = restaurant(&[], 2, 0.0, &[]);
        let result = match_score(&r, &prefs(&["Thai"], &[4], &[]));
        assert_eq!(result.score, 20);
    }

    #[test]
    fn test_popularity_floors_rating_times_two() {
        let r = restaurant(&[], 2, 4.4, &[]);
        let result = match_score(&r, &prefs(&["Thai"], &[4], &["Vegan"]));
        // 10 + 0 + 5 + floor(8.8) = 23, no highly-rated reason below 4.5.
        assert_eq!(result.score, 23);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_rating_is_clamped() {
        let r = restaurant(&[], 2, 9.0, &[]);
        let result = match_score(&r, &prefs(&["Thai"], &[4], &["Vegan"]));
        assert_eq!(result.score, 25);
    }

    #[test]
    fn test_highly_rated_reason_appended() {
        let r = restaurant(&[], 2, 4.5, &[]);
        let result = match_score(&r, &prefs(&[], &[], &[]));
        assert_eq!(result.reasons.len(), 1);
        assert!(result.reasons[0].starts_with("Highly rated"));
    }

    #[test]
    fn test_reasons_capped_at_three_with_rating_last() {
        let r = restaurant(&["Italian"], 2, 5.0, &["Vegan"]);
        let result = match_score(&r, &prefs(&["Italian"], &[2], &["Vegan"]));
        assert_eq!(result.reasons.len(), 3);
        // Cuisine/price/dietary reasons fill the slots first.
        assert_eq!(result.reasons[0], "Loves Italian");
        assert_eq!(result.reasons[1], "Moderate");
        assert_eq!(result.reasons[2], "Has Vegan options");
    }

    #[test]
    fn test_perfect_match_caps_at_one_hundred() {
        let r = restaurant(&["Italian"], 2, 5.0, &["Vegan"]);
        let result = match_score(&r, &prefs(&["Italian"], &[2], &["Vegan"]));
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_score_always_in_range() {
        let restaurants = [
            restaurant(&[], 1, 0.0, &[]),
            restaurant(&["Italian", "Pizza"], 4, 5.0, &["Vegan", "Halal"]),
            restaurant(&["Thai"], 99, -2.0, &[]),
        ];
        let pref_sets = [
            prefs(&[], &[], &[]),
            prefs(&["Italian"], &[1, 2, 3, 4], &["Vegan"]),
            prefs(&["Nope"], &[9], &["Kosher"]),
        ];
        for r in &restaurants {
            for p in &pref_sets {
                let result = match_score(r, p);
                assert!(result.score <= 100);
                assert!(result.reasons.len() <= 3);
            }
        }
    }
}
