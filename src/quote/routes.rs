//! HTTP route handlers for quote API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;

use crate::AppState;

use super::currency::{convert_all, format_price};
use super::models::ValidationReport;
use super::requests::{
    DraftAction, DraftRequest, DurationRequest, FormatPriceRequest, QuickQuoteRequest,
    RecommendedVehicleQuery, TripRequest,
};
use super::responses::{
    DraftResponse, DurationResponse, FormatPriceResponse, MoneyResponse, QuickQuoteResponse,
    QuoteErrorResponse, QuoteResponse, RecommendedVehicleResponse,
};
use super::services::{quote_input_hash, QuoteCalculator, QuoteError};
use super::transfer::{price_transfer, TransferQuote, TransferRequest};
use super::wizard::{Step, WizardError};

type ApiError = (StatusCode, Json<QuoteErrorResponse>);

/// Largest USD amount `/format` accepts.
const MAX_FORMAT_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Create the quote router with all endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/validate", post(validate))
        .route("/calculate", post(calculate))
        .route("/quick", post(quick))
        .route("/vehicles/recommended", get(recommended_vehicle))
        .route("/duration", post(duration))
        .route("/transfer", post(transfer))
        .route("/format", post(format))
        .route("/draft", post(draft))
}

/// Health check for quote engine
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "quote-engine",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Report everything that blocks a trip from being quoted
async fn validate(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Json<ValidationReport> {
    let trip = request.trip.normalized();
    Json(QuoteCalculator::new(&state.catalog).validate(&trip))
}

/// Price a trip, reusing a cached quote for identical input
async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let trip = request.trip.normalized();
    let input_hash = quote_input_hash(&trip, request.as_of);

    let (quote, cached) = match state.cache.get(&input_hash).await {
        Some(quote) => (quote, true),
        None => {
            let mut calculator = QuoteCalculator::new(&state.catalog);
            if let Some(as_of) = request.as_of {
                calculator = calculator.as_of(as_of);
            }
            let quote = calculator.calculate(&trip).map_err(quote_error_to_response)?;
            (state.cache.insert(quote).await, false)
        }
    };

    let rates = &state.catalog.currency_rates;
    let currency = trip.currency.as_str();
    Ok(Json(QuoteResponse {
        grand_total: MoneyResponse::usd(quote.totals.grand_total, currency, rates),
        deposit: MoneyResponse::usd(quote.totals.deposit, currency, rates),
        balance: MoneyResponse::usd(quote.totals.balance, currency, rates),
        quote: (*quote).clone(),
        cached,
    }))
}

/// Coarse price range for the landing-page estimator
async fn quick(
    State(state): State<AppState>,
    Json(request): Json<QuickQuoteRequest>,
) -> Result<Json<QuickQuoteResponse>, ApiError> {
    let quick = QuoteCalculator::new(&state.catalog)
        .quick_quote(request.pax, request.days, request.tier.as_deref())
        .map_err(quote_error_to_response)?;

    let rates = &state.catalog.currency_rates;
    let money = |amount| MoneyResponse::usd(amount, &request.currency, rates);
    Ok(Json(QuickQuoteResponse {
        low: money(quick.low),
        mid: money(quick.mid),
        high: money(quick.high),
        per_person: money(quick.per_person),
        per_day: money(quick.per_day),
    }))
}

async fn recommended_vehicle(
    State(state): State<AppState>,
    Query(query): Query<RecommendedVehicleQuery>,
) -> Json<RecommendedVehicleResponse> {
    let vehicle = QuoteCalculator::new(&state.catalog)
        .recommended_vehicle(query.pax)
        .cloned();
    Json(RecommendedVehicleResponse {
        pax: query.pax,
        vehicle,
    })
}

async fn duration(
    State(state): State<AppState>,
    Json(request): Json<DurationRequest>,
) -> Json<DurationResponse> {
    Json(DurationResponse {
        days: QuoteCalculator::new(&state.catalog).suggested_duration(&request.destinations),
    })
}

/// Price a group transport or airport transfer
async fn transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferQuote>, ApiError> {
    price_transfer(&state.catalog, &request)
        .map(Json)
        .map_err(quote_error_to_response)
}

async fn format(
    State(state): State<AppState>,
    Json(request): Json<FormatPriceRequest>,
) -> Result<Json<FormatPriceResponse>, ApiError> {
    if request.amount.abs() > MAX_FORMAT_AMOUNT {
        return Err(quote_error_to_response(QuoteError::Invalid {
            errors: vec![format!("Amount cannot exceed {} USD", MAX_FORMAT_AMOUNT)],
        }));
    }
    let rates = &state.catalog.currency_rates;
    Ok(Json(FormatPriceResponse {
        formatted: format_price(request.amount, &request.currency, rates),
        conversions: convert_all(request.amount, rates),
    }))
}

/// Apply one wizard edit or navigation step to a draft
async fn draft(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<DraftResponse>, ApiError> {
    let catalog = &state.catalog;
    let mut draft = request.draft;

    match request.action {
        DraftAction::Update { update } => draft.apply(update, catalog),
        DraftAction::Next => {
            draft.next_step(catalog).map_err(wizard_error_to_response)?;
        }
        DraftAction::Prev => {
            draft.prev_step();
        }
        DraftAction::GoTo { step } => {
            draft.go_to_step(step).map_err(wizard_error_to_response)?;
        }
    }

    let completed_steps = [
        Step::TravelersAndDates,
        Step::Destinations,
        Step::Transport,
        Step::Accommodation,
        Step::Review,
    ]
    .into_iter()
    .filter(|step| draft.is_step_complete(*step, catalog))
    .collect();

    Ok(Json(DraftResponse {
        step_title: draft.step.title(),
        step_complete: draft.is_step_complete(draft.step, catalog),
        completed_steps,
        draft,
    }))
}

/// Convert QuoteError to HTTP error response
fn quote_error_to_response(error: QuoteError) -> ApiError {
    match error {
        QuoteError::Invalid { errors } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(QuoteErrorResponse {
                error_type: "validation_error".to_string(),
                message: "Trip details are incomplete".to_string(),
                details: Some(serde_json::json!({ "errors": errors })),
            }),
        ),
        QuoteError::UnknownVehicle(ref id) | QuoteError::UnknownTier(ref id) => {
            tracing::error!(id = %id, "quote references an id missing from the catalog: {}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(QuoteErrorResponse {
                    error_type: "configuration_error".to_string(),
                    message: error.to_string(),
                    details: Some(serde_json::json!({ "id": id })),
                }),
            )
        }
    }
}

fn wizard_error_to_response(error: WizardError) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(QuoteErrorResponse {
            error_type: "wizard_error".to_string(),
            message: error.to_string(),
            details: None,
        }),
    )
}
