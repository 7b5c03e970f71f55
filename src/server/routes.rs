use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::models::{CardQuery, CardVariant};
use crate::server::{AppError, AppState};
use crate::storage::BatchId;

/// One submitted row, as the frontend sends it.
#[derive(Debug, Deserialize)]
pub struct RowData {
    pub card_name: String,
    pub card_id: String,
    pub holo: bool,
    pub reverse_holo: bool,
    pub first_edition: bool,
    pub card_count: u32,
    /// Comma-separated grade labels.
    pub estimated_grades: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CardInput {
    pub cards: Vec<RowData>,
}

impl From<RowData> for CardQuery {
    fn from(row: RowData) -> Self {
        CardQuery {
            card: row.card_name,
            id: row.card_id,
            holo: row.holo,
            reverse_holo: row.reverse_holo,
            first_edition: row.first_edition,
            card_count: row.card_count,
            estimated_grades: row
                .estimated_grades
                .filter(|grades| !grades.trim().is_empty())
                .map(|grades| grades.split(',').map(|g| g.trim().to_string()).collect()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VariantParams {
    pub card: String,
    pub id: String,
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /submit
///
/// Drops rows with a blank name or id or a zero count, resolves the rest in
/// order and stores the records as a new batch. The echoed rows are the
/// normalized ones.
pub async fn submit_cards(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CardInput>,
) -> Result<Json<Value>, AppError> {
    let submitted = input.cards.len();
    let queries: Vec<CardQuery> = input
        .cards
        .into_iter()
        .map(|row| CardQuery::from(row).normalized())
        .filter(CardQuery::is_valid)
        .collect();

    if queries.is_empty() {
        return Err(AppError::bad_request("No valid rows to submit"));
    }

    info!("Accepted {} of {} submitted rows", queries.len(), submitted);

    let records = state.resolver.resolve(&queries).await?;
    let batch_id = state.store.save(records).await;

    Ok(Json(json!({
        "message": "Data submitted successfully",
        "batch_id": batch_id,
        "valid_rows": queries,
    })))
}

/// GET /results
pub async fn latest_results(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    match state.store.latest().await {
        Some((batch_id, results)) if !results.is_empty() => {
            Ok(Json(json!({ "batch_id": batch_id, "results": results })))
        }
        _ => Err(AppError::not_found("No results found")),
    }
}

/// GET /results/{batch_id}
pub async fn batch_results(
    State(state): State<Arc<AppState>>,
    Path(batch_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let batch_id = BatchId(batch_id);
    match state.store.get(&batch_id).await {
        Some(results) => Ok(Json(json!({ "batch_id": batch_id, "results": results }))),
        None => Err(AppError::not_found(format!("No results for batch {}", batch_id))),
    }
}

/// GET /variants?card=Charizard&id=4
pub async fn variants(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VariantParams>,
) -> Json<Vec<CardVariant>> {
    Json(state.catalog.variants_for(&params.card, &params.id))
}
