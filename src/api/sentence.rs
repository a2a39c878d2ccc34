//! Example sentence endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::api::state::AppState;
use crate::api::types::{ApiError, SentenceQuery};
use crate::domain::LookupResponse;

/// GET /api/sentence?q=<term> - Example sentences for a dictionary term
pub async fn get_sentences(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<LookupResponse>, ApiError> {
    let query = SentenceQuery::from_pairs(pairs);

    let examples = state
        .sentence_service
        .search(query.q())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(LookupResponse::from_examples(examples)))
}
