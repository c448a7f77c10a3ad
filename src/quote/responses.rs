//! Response DTOs for quote API endpoints.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::catalog::Vehicle;
use super::currency::{Currency, CurrencyRates};
use super::models::Quote;
use super::wizard::{Step, TripDraft};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
    /// Converted and symbol-prefixed, e.g. `€492`
    pub formatted: String,
}

impl MoneyResponse {
    pub fn usd(amount: Decimal, display_currency: &str, rates: &CurrencyRates) -> Self {
        MoneyResponse {
            amount,
            currency: Currency::Usd.code().to_string(),
            formatted: super::currency::format_price(amount, display_currency, rates),
        }
    }
}

/// Response for a full trip quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote: Quote,
    pub grand_total: MoneyResponse,
    pub deposit: MoneyResponse,
    pub balance: MoneyResponse,
    /// Served from the quote cache
    pub cached: bool,
}

/// Response for a quick price range
#[derive(Debug, Serialize)]
pub struct QuickQuoteResponse {
    pub low: MoneyResponse,
    pub mid: MoneyResponse,
    pub high: MoneyResponse,
    pub per_person: MoneyResponse,
    pub per_day: MoneyResponse,
}

/// Response for the vehicle recommendation
#[derive(Debug, Serialize)]
pub struct RecommendedVehicleResponse {
    pub pax: u32,
    /// `None` when no vehicle seats the party
    pub vehicle: Option<Vehicle>,
}

#[derive(Debug, Serialize)]
pub struct DurationResponse {
    pub days: u32,
}

#[derive(Debug, Serialize)]
pub struct FormatPriceResponse {
    pub formatted: String,
    pub conversions: BTreeMap<Currency, Decimal>,
}

/// Response for a wizard step
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub draft: TripDraft,
    pub step_title: &'static str,
    pub step_complete: bool,
    /// Steps 1..=5 that are currently complete
    pub completed_steps: Vec<Step>,
}

/// Generic quote error response
#[derive(Debug, Serialize)]
pub struct QuoteErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
