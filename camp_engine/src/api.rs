//! HTTP API for the Camp Engine.
//!
//! This module exposes the accounting and calendar operations over a
//! minimal REST API using the [`axum`](https://crates.io/crates/axum)
//! framework.  Callers post the figures they aggregated from their own
//! storage and receive computed reports in JSON; the API holds no data
//! of its own beyond the engine settings.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::calendar::GregorianDate;
use crate::config::EngineSettings;
use crate::engine;
use crate::error::EngineError;
use crate::jalali::{self, MonthRange};
use crate::models::{
    ExpenseEntry, ExpenseSummary, NetIncomeReport, PayoutReport, PayoutRunInput, PeriodTotals,
};

/// Application state shared across requests.
pub struct AppState {
    pub settings: EngineSettings,
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = match self {
            EngineError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the API router around the given settings.
pub fn build_router(settings: EngineSettings) -> Router {
    let state = Arc::new(AppState { settings });
    Router::new()
        .route("/api/accounting/payouts", post(payouts_handler))
        .route("/api/accounting/net-income", post(net_income_handler))
        .route("/api/accounting/expenses", post(expenses_handler))
        .route("/api/calendar/today", get(today_handler))
        .route("/api/calendar/month-range", get(month_range_handler))
        .route("/api/calendar/validate", get(validate_handler))
        .with_state(state)
}

async fn payouts_handler(
    Json(input): Json<PayoutRunInput>,
) -> Result<Json<PayoutReport>, EngineError> {
    engine::run_payouts(input).map(Json)
}

async fn net_income_handler(
    State(app_state): State<Arc<AppState>>,
    Json(totals): Json<PeriodTotals>,
) -> Result<Json<NetIncomeReport>, EngineError> {
    engine::net_income_report(&totals, app_state.settings.discrepancy_tolerance).map(Json)
}

#[derive(Debug, Deserialize)]
struct ExpenseRequest {
    year: Option<i32>,
    month: Option<u32>,
    expenses: Vec<ExpenseEntry>,
}

async fn expenses_handler(
    Json(request): Json<ExpenseRequest>,
) -> Result<Json<ExpenseSummary>, EngineError> {
    let range = match (request.year, request.month) {
        (Some(year), Some(month)) => Some(engine::period_range(year, month)?),
        _ => None,
    };
    Ok(Json(engine::expense_summary(&request.expenses, range.as_ref())))
}

#[derive(Debug, Serialize)]
struct TodayResponse {
    date: String,
    display: String,
    gregorian: GregorianDate,
}

async fn today_handler() -> Json<TodayResponse> {
    let today = jalali::today();
    let date = today.to_string();
    Json(TodayResponse {
        display: jalali::format_display(&date),
        gregorian: today.to_gregorian(),
        date,
    })
}

#[derive(Debug, Deserialize)]
struct PeriodQuery {
    year: Option<i32>,
    month: Option<u32>,
}

async fn month_range_handler(
    Query(query): Query<PeriodQuery>,
) -> Result<Json<MonthRange>, EngineError> {
    let year = query.year.unwrap_or(0);
    let month = query.month.unwrap_or(0);
    engine::period_range(year, month).map(Json)
}

#[derive(Debug, Deserialize)]
struct ValidateQuery {
    #[serde(default)]
    date: String,
}

async fn validate_handler(Query(query): Query<ValidateQuery>) -> impl IntoResponse {
    let valid = jalali::validate(&query.date);
    Json(json!({ "date": query.date, "valid": valid }))
}

/// Launch the API server.  Binds to the supplied address and blocks
/// until the server terminates (e.g. when interrupted).
pub async fn serve(addr: &str, settings: EngineSettings) -> Result<()> {
    let router = build_router(settings);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
