//! Trip and quote data types.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// A customer's proposed itinerary.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TripDetails {
    pub adults: u32,
    pub children: u32,
    pub children_ages: Vec<u8>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: u32,
    pub nights: u32,
    /// Visiting order
    pub destinations: Vec<String>,
    pub vehicle: Option<String>,
    pub airport_pickup: bool,
    pub airport_dropoff: bool,
    pub accommodation_tier: Option<String>,
    /// 0 derives rooms from occupancy
    pub rooms: u32,
    pub activities: Vec<String>,
    pub services: Vec<String>,
    pub is_returning_customer: bool,
    pub special_requests: String,
    pub currency: String,
}

impl Default for TripDetails {
    fn default() -> Self {
        TripDetails {
            adults: 2,
            children: 0,
            children_ages: Vec::new(),
            start_date: None,
            end_date: None,
            days: 0,
            nights: 0,
            destinations: Vec::new(),
            vehicle: None,
            airport_pickup: false,
            airport_dropoff: false,
            accommodation_tier: None,
            rooms: 1,
            activities: Vec::new(),
            services: Vec::new(),
            is_returning_customer: false,
            special_requests: String::new(),
            currency: Currency::Usd.code().to_string(),
        }
    }
}

impl TripDetails {
    /// Adults plus children, saturating at `u32::MAX`.
    pub fn total_pax(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Nights implied by `days`.
    pub fn derived_nights(&self) -> u32 {
        self.days.saturating_sub(1)
    }

    /// End date implied by `start_date` and `days`.
    pub fn derived_end_date(&self) -> Option<NaiveDate> {
        let start = self.start_date?;
        if self.days == 0 {
            return None;
        }
        start.checked_add_days(Days::new(u64::from(self.days)))
    }

    /// Re-derive `nights` and `end_date` from `days` and `start_date`.
    pub fn normalize(&mut self) {
        self.nights = self.derived_nights();
        self.end_date = self.derived_end_date();
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

/// Outcome of [`QuoteCalculator::validate`](super::services::QuoteCalculator::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// One priced line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    /// Free-form quantity, e.g. `5` or `1 room(s) x 4 nights`
    pub quantity: String,
    pub unit_price: Decimal,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub includes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: impl ToString, unit_price: Decimal, total: Decimal) -> Self {
        LineItem {
            name: name.into(),
            quantity: quantity.to_string(),
            unit_price,
            total,
            kind: None,
            destination: None,
            duration: None,
            includes: Vec::new(),
            description: None,
        }
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
}

impl Section {
    pub fn push(&mut self, item: LineItem) {
        self.subtotal += item.total;
        self.items.push(item);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub transport: Section,
    pub accommodation: Section,
    pub entrance_fees: Section,
    pub activities: Section,
    pub services: Section,
    /// Discount lines carry negative totals
    pub discounts: Section,
}

impl Breakdown {
    /// Sum of every priced section before discounts.
    pub fn subtotal(&self) -> Decimal {
        self.transport.subtotal
            + self.accommodation.subtotal
            + self.entrance_fees.subtotal
            + self.activities.subtotal
            + self.services.subtotal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Travelers {
    pub adults: u32,
    pub children: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDates {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub days: u32,
    pub nights: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationSummary {
    pub id: String,
    pub name: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub travelers: Travelers,
    pub dates: TripDates,
    pub destinations: Vec<DestinationSummary>,
    pub vehicle: String,
    pub accommodation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discounts: Decimal,
    pub seasonal_adjustment: Decimal,
    pub grand_total: Decimal,
    pub deposit: Decimal,
    pub balance: Decimal,
    pub season_label: String,
    pub currencies: BTreeMap<Currency, Decimal>,
    pub per_person: Decimal,
    pub per_day: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub deposit: Decimal,
    pub deposit_currencies: BTreeMap<Currency, Decimal>,
    pub balance: Decimal,
    pub balance_due_days: u32,
}

/// Itemized price for a trip. All amounts are USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub quote_id: String,
    pub input_hash: String,
    pub trip_summary: TripSummary,
    pub breakdown: Breakdown,
    pub totals: Totals,
    pub payment: Payment,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub valid_until: Option<NaiveDate>,
}

/// Coarse price range shown before the trip form is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickQuote {
    pub low: Decimal,
    pub mid: Decimal,
    pub high: Decimal,
    pub per_person: Decimal,
    pub per_day: Decimal,
}
