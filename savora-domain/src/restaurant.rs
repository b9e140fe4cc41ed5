use serde::{Deserialize, Serialize};

/// Price tier, either stored as an integer 1-4 or as a `$`-run string.
/// Anything unparsable normalizes to the middle tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PriceRange {
    Tier(i64),
    Symbols(String),
}

impl PriceRange {
    /// Normalize to an integer tier. `$$` counts symbols; out-of-band
    /// integers pass through untouched (the scorer treats them as no-match).
    pub fn tier(&self) -> i64 {
        match self {
            PriceRange::Tier(n) => *n,
            PriceRange::Symbols(s) => {
                let dollars = s.chars().filter(|c| *c == '$').count() as i64;
                if dollars > 0 {
                    dollars
                } else {
                    2
                }
            }
        }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange::Tier(2)
    }
}

/// A restaurant record, read-only from this system's perspective; the
/// catalog collaborator owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub restaurant_id: String,
    pub name: String,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub price_range: PriceRange,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub dietary_options: Vec<String>,
    #[serde(default)]
    pub location: serde_json::Value,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub address: String,
}

/// The slice of a user's profile the scorer consumes. Owned by the account
/// collaborator; absent profiles behave as all-empty preference sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub preferred_cuisines: Vec<String>,
    #[serde(default)]
    pub preferred_price_range: Vec<i64>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}
