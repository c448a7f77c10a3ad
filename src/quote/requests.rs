//! Request DTOs for quote API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::TripDetails;
use super::wizard::{Step, TripDraft, TripUpdate};

/// Request to validate or price a trip
#[derive(Debug, Deserialize)]
pub struct TripRequest {
    pub trip: TripDetails,
    /// Issue date; enables the early-bird rule and `valid_until`
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request for a coarse price range
#[derive(Debug, Deserialize)]
pub struct QuickQuoteRequest {
    pub pax: u32,
    pub days: u32,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Query for the vehicle recommendation
#[derive(Debug, Deserialize)]
pub struct RecommendedVehicleQuery {
    pub pax: u32,
}

/// Request for a suggested trip length
#[derive(Debug, Deserialize)]
pub struct DurationRequest {
    pub destinations: Vec<String>,
}

/// Request to format a USD amount for display
#[derive(Debug, Deserialize)]
pub struct FormatPriceRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Wizard navigation action
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DraftAction {
    Update { update: TripUpdate },
    Next,
    Prev,
    GoTo { step: Step },
}

/// Request to advance a trip draft
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    #[serde(default)]
    pub draft: TripDraft,
    pub action: DraftAction,
}
