//! Pure pricing arithmetic.
//!
//! No catalog lookups and no logging here; everything takes plain values
//! and returns `Decimal`s so the rules can be tested in isolation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Round to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to whole currency units, half away from zero.
pub fn round_whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Upfront payment for a total.
pub fn deposit_for(total: Decimal, deposit_rate: Decimal) -> Decimal {
    round_whole(total * deposit_rate)
}

/// Price of a return journey given the one-way price.
pub fn round_trip_price(one_way: Decimal, round_trip_factor: Decimal) -> Decimal {
    one_way * round_trip_factor
}

/// How a one-way transfer ended up being billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingBasis {
    PerKm,
    MinimumHours,
    PerDay,
}

/// One-way transfer price: distance charge with a minimum-hours floor.
pub fn transfer_leg_price(
    per_km: Decimal,
    distance_km: Decimal,
    hourly_rate: Decimal,
    minimum_hours: Decimal,
) -> (Decimal, BillingBasis) {
    let distance_charge = per_km * distance_km;
    let floor = hourly_rate * minimum_hours;
    if distance_charge >= floor {
        (distance_charge, BillingBasis::PerKm)
    } else {
        (floor, BillingBasis::MinimumHours)
    }
}

/// Rooms needed when the traveler did not pick a room count.
pub fn rooms_needed(total_pax: u32) -> u32 {
    match total_pax {
        0..=3 => 1,
        4 => 2,
        n => n.div_ceil(2),
    }
}

/// Room type used for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Triple,
    Family,
}

impl RoomType {
    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Triple => "triple",
            RoomType::Family => "family",
        }
    }
}

/// Split travelers into priced rooms.
///
/// A single room is priced by occupancy; several rooms are priced as
/// doubles.
pub fn room_distribution(total_pax: u32, rooms: u32) -> Vec<(RoomType, u32)> {
    if rooms == 1 {
        let room_type = match total_pax {
            0..=2 => RoomType::Double,
            3 => RoomType::Triple,
            _ => RoomType::Family,
        };
        return vec![(room_type, 1)];
    }
    vec![(RoomType::Double, rooms)]
}

/// Whole-day stay suggestion from summed typical-stay weights.
///
/// An empty itinerary suggests nothing; otherwise one extra day covers
/// arrival and departure.
pub fn suggested_days(weights: impl IntoIterator<Item = Decimal>) -> u32 {
    let mut count = 0usize;
    let mut total = Decimal::ZERO;
    for weight in weights {
        count += 1;
        total = total.checked_add(weight).unwrap_or(Decimal::MAX);
    }
    if count == 0 {
        return 0;
    }
    total.ceil().to_u32().unwrap_or(u32::MAX).saturating_add(1)
}

/// `amount / divisor` rounded to whole units; zero when the divisor is zero.
pub fn per_unit(amount: Decimal, divisor: u32) -> Decimal {
    if divisor == 0 {
        return Decimal::ZERO;
    }
    round_whole(amount / Decimal::from(divisor))
}
