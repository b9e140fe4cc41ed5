use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use savora_discovery::{rank_restaurants, ScoredRestaurant};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryQuery {
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResponse {
    pub user_id: String,
    pub restaurants: Vec<ScoredRestaurant>,
    pub total: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/restaurants/discovery", get(discover_restaurants))
}

/// GET /api/restaurants/discovery?userId=&limit=
///
/// Scores the full catalog against the user's preference profile. A missing
/// or unreadable profile scores with empty preference sets rather than
/// failing discovery.
async fn discover_restaurants(
    State(state): State<AppState>,
    Query(query): Query<DiscoveryQuery>,
) -> Result<Json<DiscoveryResponse>, AppError> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::ValidationError("userId required".to_string()))?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let prefs = match state.preferences.get_preferences(&user_id).await {
        Ok(Some(prefs)) => prefs,
        Ok(None) => Default::default(),
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "preference lookup failed, scoring without preferences");
            Default::default()
        }
    };

    let restaurants = state
        .catalog
        .scan_restaurants()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let ranked = rank_restaurants(restaurants, &prefs, limit);

    Ok(Json(DiscoveryResponse {
        total: ranked.len(),
        user_id,
        restaurants: ranked,
    }))
}
