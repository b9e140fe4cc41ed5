pub mod rank;
pub mod score;

pub use rank::{rank_restaurants, ScoredRestaurant};
pub use score::{match_score, MatchScore};
