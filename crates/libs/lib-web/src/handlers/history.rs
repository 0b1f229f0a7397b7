//! `GET /api/history`: the caller's most recent exchanges, newest first.

use axum::extract::{Extension, Json, State};
use lib_auth::Claims;
use lib_core::model::store::{Exchange, ExchangeRepository};
use lib_core::{AppError, DbPool};
use shared::HistoryEntry;
use tracing::{debug, instrument};

/// Exchanges returned per history request.
pub const HISTORY_LIMIT: usize = 50;

fn to_entry(exchange: Exchange) -> HistoryEntry {
    HistoryEntry {
        id: exchange.id.to_string(),
        user_message: exchange.user_message,
        bot_response: exchange.bot_response,
        timestamp: exchange.created_at,
    }
}

#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn get_history(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let exchanges = ExchangeRepository::find_recent_by_user(&pool, &claims.sub, HISTORY_LIMIT).await?;
    debug!(count = exchanges.len(), "[HISTORY] Loaded exchanges");

    Ok(Json(exchanges.into_iter().map(to_entry).collect()))
}
