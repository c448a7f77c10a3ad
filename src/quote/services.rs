//! Trip quote calculation.
//!
//! [`QuoteCalculator`] borrows an injected [`PricingCatalog`] and derives
//! quotes from [`TripDetails`]. It holds no state of its own: the same trip
//! against the same catalog always yields the same quote.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::calculators::{
    deposit_for, per_unit, room_distribution, rooms_needed, round_trip_price, round_whole,
    suggested_days, transfer_leg_price,
};
use super::catalog::{AccommodationTier, PricingCatalog, Vehicle};
use super::currency::convert_all;
use super::models::{
    Breakdown, DestinationSummary, LineItem, Payment, QuickQuote, Quote, Section, Totals,
    Travelers, TripDates, TripDetails, TripSummary, ValidationReport,
};

/// Days a quote stays valid after it is issued.
const QUOTE_VALIDITY_DAYS: u64 = 7;

/// Weight of a destination the catalog does not know.
const UNKNOWN_STAY_WEIGHT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

const BASE_INCLUSIONS: [&str; 6] = [
    "Air-conditioned private vehicle",
    "Experienced English-speaking driver",
    "All fuel and tolls",
    "Vehicle insurance",
    "Airport transfers",
    "24/7 support hotline",
];

const EXCLUSIONS: [&str; 8] = [
    "International flights",
    "Travel insurance",
    "Visa fees (if applicable)",
    "Personal expenses",
    "Tips for driver/guides",
    "Lunch and dinner (unless specified)",
    "Camera/video permits at some sites",
    "Optional activities not in itinerary",
];

/// Quote calculation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    /// User-correctable input problems.
    #[error("trip is incomplete: {}", .errors.join("; "))]
    Invalid { errors: Vec<String> },
    /// The trip names a vehicle the catalog does not have.
    #[error("unknown vehicle '{0}'")]
    UnknownVehicle(String),
    /// The trip names an accommodation tier the catalog does not have.
    #[error("unknown accommodation tier '{0}'")]
    UnknownTier(String),
}

impl QuoteError {
    /// Whether the error points at bad catalog data rather than bad input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, QuoteError::UnknownVehicle(_) | QuoteError::UnknownTier(_))
    }
}

/// Compute `sha256:<hex>` of a string.
pub fn sha256_hex(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let digest = hasher.finalize();
    format!("sha256:{}", hex::encode(digest))
}

/// Stable hash of everything a quote depends on besides the catalog.
pub fn quote_input_hash(trip: &TripDetails, as_of: Option<NaiveDate>) -> String {
    #[derive(Serialize)]
    struct QuoteInput<'a> {
        trip: &'a TripDetails,
        as_of: Option<NaiveDate>,
    }
    let json = serde_json::to_string(&QuoteInput { trip, as_of }).unwrap_or_default();
    sha256_hex(&json)
}

fn quote_id_from_hash(input_hash: &str) -> String {
    let hex = input_hash.trim_start_matches("sha256:");
    let short: String = hex.chars().take(10).collect();
    format!("RCT-{}", short.to_ascii_uppercase())
}

/// Prices trips against a borrowed catalog.
#[derive(Debug, Clone, Copy)]
pub struct QuoteCalculator<'a> {
    catalog: &'a PricingCatalog,
    as_of: Option<NaiveDate>,
}

impl<'a> QuoteCalculator<'a> {
    pub fn new(catalog: &'a PricingCatalog) -> Self {
        QuoteCalculator { catalog, as_of: None }
    }

    /// Date the quote is issued on. Drives the early-bird rule and
    /// `valid_until`; without it neither applies.
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    pub fn catalog(&self) -> &'a PricingCatalog {
        self.catalog
    }

    /// Collect every reason the trip cannot be quoted yet.
    pub fn validate(&self, trip: &TripDetails) -> ValidationReport {
        let mut errors = Vec::new();

        if trip.adults < 1 {
            errors.push("At least 1 adult is required".to_string());
        }
        if trip.adults.checked_add(trip.children).is_none() {
            errors.push("Too many travelers for one booking".to_string());
        }
        if trip.destinations.is_empty() {
            errors.push("Select at least one destination".to_string());
        }
        if trip.start_date.is_none() {
            errors.push("Start date is required".to_string());
        }
        if trip.days < 1 {
            errors.push("Trip duration must be at least 1 day".to_string());
        }
        match trip.vehicle.as_deref() {
            None | Some("") => errors.push("Please select a vehicle".to_string()),
            Some(id) => {
                if let Some(vehicle) = self.catalog.vehicle(id) {
                    if !vehicle.seats(trip.total_pax()) {
                        errors.push(format!(
                            "{} seats {} passengers but the trip has {} travelers",
                            vehicle.name,
                            vehicle.max_passengers,
                            trip.total_pax()
                        ));
                    }
                }
            }
        }
        if trip.accommodation_tier.as_deref().map_or(true, str::is_empty) {
            errors.push("Please select accommodation type".to_string());
        }

        ValidationReport::from_errors(errors)
    }

    /// Price a trip. Incomplete trips are rejected rather than priced.
    pub fn calculate(&self, trip: &TripDetails) -> Result<Quote, QuoteError> {
        let report = self.validate(trip);
        if !report.is_valid {
            return Err(QuoteError::Invalid { errors: report.errors });
        }

        let vehicle_id = trip.vehicle.as_deref().unwrap_or_default();
        let vehicle = self
            .catalog
            .vehicle(vehicle_id)
            .ok_or_else(|| QuoteError::UnknownVehicle(vehicle_id.to_string()))?;
        let tier_id = trip.accommodation_tier.as_deref().unwrap_or_default();
        let tier = self
            .catalog
            .tier(tier_id)
            .ok_or_else(|| QuoteError::UnknownTier(tier_id.to_string()))?;

        let nights = trip.derived_nights();
        let mut breakdown = Breakdown {
            transport: self.transport(trip, vehicle),
            accommodation: accommodation(trip, nights, tier),
            entrance_fees: self.entrance_fees(trip),
            activities: self.activities(trip),
            services: self.services(trip),
            discounts: Section::default(),
        };

        let (seasonal_adjustment, season_label) = self.seasonal_adjustment(trip, &breakdown);
        breakdown.discounts = self.discounts(trip, breakdown.subtotal());

        let subtotal = breakdown.subtotal();
        let discounts = breakdown.discounts.subtotal.abs();
        let grand_total = subtotal + seasonal_adjustment - discounts;
        let deposit = deposit_for(grand_total, self.catalog.payment_terms.deposit_rate);
        let balance = grand_total - deposit;
        let rates = &self.catalog.currency_rates;

        let input_hash = quote_input_hash(trip, self.as_of);
        tracing::debug!(
            input_hash = %input_hash,
            grand_total = %grand_total,
            "calculated trip quote"
        );

        Ok(Quote {
            quote_id: quote_id_from_hash(&input_hash),
            input_hash,
            trip_summary: TripSummary {
                travelers: Travelers {
                    adults: trip.adults,
                    children: trip.children,
                    total: trip.total_pax(),
                },
                dates: TripDates {
                    start: trip.start_date,
                    end: trip.derived_end_date(),
                    days: trip.days,
                    nights,
                },
                destinations: trip
                    .destinations
                    .iter()
                    .map(|id| match self.catalog.destination(id) {
                        Some(dest) => DestinationSummary {
                            id: id.clone(),
                            name: dest.name.clone(),
                            region: dest.region.clone(),
                        },
                        None => DestinationSummary {
                            id: id.clone(),
                            name: id.clone(),
                            region: String::new(),
                        },
                    })
                    .collect(),
                vehicle: vehicle.name.clone(),
                accommodation: tier.name.clone(),
            },
            inclusions: inclusions(&breakdown),
            exclusions: EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            breakdown,
            totals: Totals {
                subtotal,
                discounts,
                seasonal_adjustment,
                grand_total,
                deposit,
                balance,
                season_label,
                currencies: convert_all(grand_total, rates),
                per_person: per_unit(grand_total, trip.total_pax()),
                per_day: per_unit(grand_total, trip.days),
            },
            payment: Payment {
                deposit,
                deposit_currencies: convert_all(deposit, rates),
                balance,
                balance_due_days: self.catalog.payment_terms.balance_due_days,
            },
            valid_until: self
                .as_of
                .and_then(|date| date.checked_add_days(Days::new(QUOTE_VALIDITY_DAYS))),
        })
    }

    /// Smallest vehicle that seats everyone; `None` when nothing does.
    pub fn recommended_vehicle(&self, total_pax: u32) -> Option<&'a Vehicle> {
        self.catalog
            .vehicles
            .values()
            .filter(|v| v.seats(total_pax))
            .min_by(|a, b| {
                a.max_passengers
                    .cmp(&b.max_passengers)
                    .then(a.price_per_day.cmp(&b.price_per_day))
                    .then(a.id.cmp(&b.id))
            })
    }

    /// Whole days suggested for visiting `destinations`, including one
    /// day for arrival and departure.
    pub fn suggested_duration<S: AsRef<str>>(&self, destinations: &[S]) -> u32 {
        suggested_days(destinations.iter().map(|id| {
            self.catalog
                .destination(id.as_ref())
                .map(|d| d.suggested_duration)
                .unwrap_or(UNKNOWN_STAY_WEIGHT)
        }))
    }

    /// Vehicle-agnostic estimate for `pax` travelers over `days`.
    pub fn quick_quote(&self, pax: u32, days: u32, tier: Option<&str>) -> Result<QuickQuote, QuoteError> {
        let mut errors = Vec::new();
        if pax == 0 {
            errors.push("At least 1 traveler is required".to_string());
        }
        if days == 0 {
            errors.push("Trip duration must be at least 1 day".to_string());
        }
        if !errors.is_empty() {
            return Err(QuoteError::Invalid { errors });
        }

        let tier_id = tier.unwrap_or("standard");
        let tier = self
            .catalog
            .tier(tier_id)
            .ok_or_else(|| QuoteError::UnknownTier(tier_id.to_string()))?;
        let rates = &self.catalog.quick_quote;

        let rooms = Decimal::from(pax.div_ceil(2));
        let estimate = rates.day_rate(pax) * Decimal::from(days)
            + tier.price_per_night.double * Decimal::from(days - 1) * rooms
            + rates.entrance_fee_per_person * Decimal::from(pax);

        Ok(QuickQuote {
            low: round_whole(estimate * rates.low_factor),
            mid: round_whole(estimate),
            high: round_whole(estimate * rates.high_factor),
            per_person: per_unit(estimate, pax),
            per_day: per_unit(estimate, days),
        })
    }

    fn transport(&self, trip: &TripDetails, vehicle: &Vehicle) -> Section {
        let mut section = Section::default();
        let transfers = &self.catalog.transfers;

        let day_trip = trip.days == 1 && trip.destinations.len() == 1;
        if day_trip {
            let dest_id = &trip.destinations[0];
            let km = self.catalog.destination(dest_id).map_or(
                transfers.fallback_leg_km,
                |d| d.distance_from_colombo,
            );
            let (one_way, basis) = transfer_leg_price(
                vehicle.per_km,
                Decimal::from(km),
                vehicle.hourly_rate,
                vehicle.minimum_hours,
            );
            let total = round_trip_price(one_way, transfers.round_trip_factor);
            tracing::debug!(vehicle = %vehicle.id, km, ?basis, "pricing day trip as return transfer");
            section.push(
                LineItem::new(
                    format!("{} - return transfer ({} km each way)", vehicle.name, km),
                    1,
                    one_way,
                    total,
                )
                .kind("transfer"),
            );
        } else {
            let days = Decimal::from(trip.days);
            section.push(
                LineItem::new(
                    format!("{} - {} days", vehicle.name, trip.days),
                    trip.days,
                    vehicle.price_per_day,
                    vehicle.price_per_day * days,
                )
                .kind("rental"),
            );
        }

        if self.catalog.policy.fuel_estimate {
            let km = self.total_distance(&trip.destinations);
            section.push(
                LineItem::new(
                    format!("Fuel estimate ({} km)", km),
                    km,
                    vehicle.fuel_cost_per_km,
                    vehicle.fuel_cost_per_km * Decimal::from(km),
                )
                .kind("fuel"),
            );
        }

        match (trip.airport_pickup, trip.airport_dropoff) {
            (true, true) => {
                let one_way = transfers.airport_pickup;
                section.push(
                    LineItem::new(
                        "Airport Pickup & Drop-off (return)",
                        1,
                        one_way,
                        round_trip_price(one_way, transfers.round_trip_factor),
                    )
                    .kind("transfer"),
                );
            }
            (true, false) => section.push(
                LineItem::new("Airport Pickup", 1, transfers.airport_pickup, transfers.airport_pickup)
                    .kind("transfer"),
            ),
            (false, true) => section.push(
                LineItem::new("Airport Drop-off", 1, transfers.airport_dropoff, transfers.airport_dropoff)
                    .kind("transfer"),
            ),
            (false, false) => {}
        }

        section
    }

    /// Road distance from Colombo through every destination and back.
    fn total_distance(&self, destinations: &[String]) -> u32 {
        let (Some(first), Some(last)) = (destinations.first(), destinations.last()) else {
            return 0;
        };
        let from_colombo = |id: &str| {
            self.catalog
                .destination(id)
                .map_or(0, |d| d.distance_from_colombo)
        };
        destinations
            .windows(2)
            .map(|pair| {
                self.catalog
                    .route_distance(&pair[0], &pair[1])
                    .unwrap_or(self.catalog.transfers.fallback_leg_km)
            })
            .fold(from_colombo(first), u32::saturating_add)
            .saturating_add(from_colombo(last))
    }

    fn entrance_fees(&self, trip: &TripDetails) -> Section {
        let mut section = Section::default();
        if !self.catalog.policy.entrance_fees {
            return section;
        }
        for dest_id in &trip.destinations {
            let Some(dest) = self.catalog.destination(dest_id) else {
                tracing::warn!(destination = %dest_id, "skipping entrance fee for unknown destination");
                continue;
            };
            let fee = &dest.entrance_fee;
            if fee.adult.is_zero() && fee.child.is_zero() {
                continue;
            }
            let mut adults = LineItem::new(
                format!("{} - Adults", dest.name),
                trip.adults,
                fee.adult,
                fee.adult * Decimal::from(trip.adults),
            );
            adults.destination = Some(dest_id.clone());
            section.push(adults);

            if trip.children > 0 && !fee.child.is_zero() {
                let mut children = LineItem::new(
                    format!("{} - Children", dest.name),
                    trip.children,
                    fee.child,
                    fee.child * Decimal::from(trip.children),
                );
                children.destination = Some(dest_id.clone());
                section.push(children);
            }
        }
        section
    }

    fn activities(&self, trip: &TripDetails) -> Section {
        let mut section = Section::default();
        for activity_id in &trip.activities {
            let Some(activity) = self.catalog.activities.get(activity_id) else {
                tracing::warn!(activity = %activity_id, "skipping unknown activity");
                continue;
            };
            let pax = trip
                .adults
                .saturating_add(if activity.child_price { trip.children } else { 0 });
            let price = activity.price_per_person.quoted();
            let mut item = LineItem::new(activity.name.clone(), pax, price, price * Decimal::from(pax));
            item.duration = Some(activity.duration.clone());
            item.includes = activity.includes.clone();
            section.push(item);
        }
        section
    }

    fn services(&self, trip: &TripDetails) -> Section {
        let mut section = Section::default();
        for service_id in &trip.services {
            let Some(service) = self.catalog.services.get(service_id) else {
                tracing::warn!(service = %service_id, "skipping unknown service");
                continue;
            };
            let (quantity, unit_price, total) = match (service.price_per_day, service.price) {
                (Some(per_day), _) => (trip.days, per_day, per_day * Decimal::from(trip.days)),
                (None, Some(price)) => (1, price, price),
                (None, None) => (1, Decimal::ZERO, Decimal::ZERO),
            };
            let mut item = LineItem::new(service.name.clone(), quantity, unit_price, total);
            item.description = Some(service.description.clone());
            section.push(item);
        }
        section
    }

    /// Seasonal uplift on accommodation and the season label.
    fn seasonal_adjustment(&self, trip: &TripDetails, breakdown: &Breakdown) -> (Decimal, String) {
        if !self.catalog.policy.seasonal_pricing {
            return (Decimal::ZERO, String::new());
        }
        let Some(start) = trip.start_date else {
            return (Decimal::ZERO, String::new());
        };
        let season = self.catalog.seasons.for_month(start.month());
        let adjustment = breakdown.accommodation.subtotal * (season.multiplier - Decimal::ONE);
        (adjustment, season.label.clone())
    }

    fn discounts(&self, trip: &TripDetails, subtotal: Decimal) -> Section {
        let policy = &self.catalog.policy;
        let rules = &self.catalog.discounts;
        let mut section = Section::default();
        let mut add = |name: String, rate: Decimal| {
            section.push(LineItem::new(name, 1, rate, -(subtotal * rate).abs()).kind("discount"));
        };

        if policy.group_discount {
            if let Some(group) = rules.group_rate(trip.total_pax()) {
                add(
                    format!("Group Discount ({}+ travelers)", group.min_travelers),
                    group.rate,
                );
            }
        }
        if policy.early_bird_discount {
            if let (Some(start), Some(today)) = (trip.start_date, self.as_of) {
                if (start - today).num_days() >= rules.early_bird_days {
                    add(
                        format!("Early Bird Discount ({}+ days advance)", rules.early_bird_days),
                        rules.early_bird_rate,
                    );
                }
            }
        }
        if policy.returning_customer_discount && trip.is_returning_customer {
            add("Returning Customer Discount".to_string(), rules.returning_rate);
        }
        if policy.long_stay_discount && trip.days >= rules.long_stay_days {
            add(
                format!("Long Stay Discount ({}+ days)", rules.long_stay_days),
                rules.long_stay_rate,
            );
        }

        section
    }
}

fn accommodation(trip: &TripDetails, nights: u32, tier: &AccommodationTier) -> Section {
    let rooms = if trip.rooms == 0 {
        rooms_needed(trip.total_pax())
    } else {
        trip.rooms
    };

    let mut section = Section::default();
    for (room_type, count) in room_distribution(trip.total_pax(), rooms) {
        let rate = tier.price_per_night.rate(room_type);
        section.push(
            LineItem::new(
                format!("{} - {} room", tier.name, room_type.label()),
                format!("{} room(s) x {} nights", count, nights),
                rate,
                rate * Decimal::from(nights) * Decimal::from(count),
            )
            .kind(room_type.label()),
        );
    }
    section
}

fn inclusions(breakdown: &Breakdown) -> Vec<String> {
    let mut inclusions: Vec<String> = BASE_INCLUSIONS.iter().map(|s| s.to_string()).collect();
    if breakdown.accommodation.subtotal > Decimal::ZERO {
        inclusions.push("Accommodation with breakfast".to_string());
    }
    if breakdown.entrance_fees.subtotal > Decimal::ZERO {
        inclusions.push("All entrance fees as per itinerary".to_string());
    }
    if breakdown.activities.subtotal > Decimal::ZERO {
        inclusions.push("Activities as per itinerary".to_string());
    }
    inclusions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::catalog::PricingPolicy;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sigiriya_ella_trip() -> TripDetails {
        TripDetails {
            adults: 2,
            children: 0,
            start_date: Some(date(2026, 6, 10)),
            days: 5,
            destinations: vec!["sigiriya".to_string(), "ella".to_string()],
            vehicle: Some("sedan".to_string()),
            accommodation_tier: Some("standard".to_string()),
            rooms: 1,
            ..Default::default()
        }
        .normalized()
    }

    #[test]
    fn test_scenario_sedan_standard_five_days() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);
        let trip = sigiriya_ella_trip();

        let report = calc.validate(&trip);
        assert!(report.is_valid, "{:?}", report.errors);

        let quote = calc.calculate(&trip).unwrap();
        // sedan 55/day x 5 days
        assert_eq!(quote.breakdown.transport.subtotal, dec!(275));
        // standard double 65/night x 4 nights x 1 room
        assert_eq!(quote.breakdown.accommodation.subtotal, dec!(260));
        assert_eq!(quote.breakdown.activities.subtotal, dec!(0));
        assert_eq!(quote.breakdown.services.subtotal, dec!(0));
        assert_eq!(quote.totals.grand_total, dec!(535));
        assert_eq!(quote.totals.deposit, round_whole(dec!(0.30) * dec!(535)));
        assert_eq!(quote.totals.deposit, dec!(161));
        assert_eq!(quote.totals.balance, dec!(374));
        assert_eq!(quote.trip_summary.dates.nights, 4);
    }

    #[test]
    fn test_zero_adults_fails_validation() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);
        let trip = TripDetails { adults: 0, ..sigiriya_ella_trip() };

        let report = calc.validate(&trip);
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("adult")));
    }

    #[test]
    fn test_validate_collects_every_error() {
        let catalog = PricingCatalog::sri_lanka();
        let report = QuoteCalculator::new(&catalog).validate(&TripDetails {
            adults: 0,
            ..Default::default()
        });
        assert_eq!(report.errors.len(), 6);
    }

    #[test]
    fn test_validate_flags_undersized_vehicle() {
        let catalog = PricingCatalog::sri_lanka();
        let trip = TripDetails { adults: 5, ..sigiriya_ella_trip() };
        let report = QuoteCalculator::new(&catalog).validate(&trip);
        assert!(!report.is_valid);
        assert!(report.errors[0].contains("seats 3"));
    }

    #[test]
    fn test_oversized_party_fails_validation() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);
        let trip = TripDetails {
            adults: u32::MAX,
            children: 1,
            vehicle: Some("miniBus".to_string()),
            ..sigiriya_ella_trip()
        };

        let report = calc.validate(&trip);
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("Too many travelers")));
        assert!(report.errors.iter().any(|e| e.contains("seats 14")));
        assert!(matches!(calc.calculate(&trip), Err(QuoteError::Invalid { .. })));
    }

    #[test]
    fn test_calculate_rejects_incomplete_trip() {
        let catalog = PricingCatalog::sri_lanka();
        let trip = TripDetails { destinations: vec![], ..sigiriya_ella_trip() };
        let result = QuoteCalculator::new(&catalog).calculate(&trip);
        assert!(matches!(result, Err(QuoteError::Invalid { .. })));
    }

    #[test]
    fn test_calculate_rejects_unknown_vehicle_and_tier() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);

        let trip = TripDetails { vehicle: Some("tuktuk".to_string()), ..sigiriya_ella_trip() };
        let err = calc.calculate(&trip).unwrap_err();
        assert_eq!(err, QuoteError::UnknownVehicle("tuktuk".to_string()));
        assert!(err.is_configuration_error());

        let trip = TripDetails { accommodation_tier: Some("palace".to_string()), ..sigiriya_ella_trip() };
        assert_eq!(
            calc.calculate(&trip).unwrap_err(),
            QuoteError::UnknownTier("palace".to_string())
        );
    }

    #[test]
    fn test_calculate_is_deterministic() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog).as_of(date(2026, 3, 1));
        let trip = TripDetails {
            activities: vec!["zipline".to_string()],
            services: vec!["guide".to_string()],
            airport_pickup: true,
            ..sigiriya_ella_trip()
        };
        let first = calc.calculate(&trip).unwrap();
        let second = calc.calculate(&trip).unwrap();
        assert_eq!(first, second);
        assert!(first.quote_id.starts_with("RCT-"));
        assert_eq!(first.quote_id.len(), 14);
    }

    #[test]
    fn test_addons_are_priced() {
        let catalog = PricingCatalog::sri_lanka();
        let trip = TripDetails {
            activities: vec!["zipline".to_string(), "ellaTrainRide".to_string()],
            services: vec!["guide".to_string(), "simCard".to_string()],
            ..sigiriya_ella_trip()
        };
        let quote = QuoteCalculator::new(&catalog).calculate(&trip).unwrap();
        // zipline 45 x 2 + train second class 8 x 2
        assert_eq!(quote.breakdown.activities.subtotal, dec!(106));
        // guide 45 x 5 days + sim 10
        assert_eq!(quote.breakdown.services.subtotal, dec!(235));
        assert_eq!(quote.totals.grand_total, dec!(535) + dec!(106) + dec!(235));
        assert!(quote.inclusions.contains(&"Activities as per itinerary".to_string()));
    }

    #[test]
    fn test_unknown_addons_are_skipped() {
        let catalog = PricingCatalog::sri_lanka();
        let trip = TripDetails {
            activities: vec!["moonwalk".to_string()],
            services: vec!["butler".to_string()],
            ..sigiriya_ella_trip()
        };
        let quote = QuoteCalculator::new(&catalog).calculate(&trip).unwrap();
        assert!(quote.breakdown.activities.items.is_empty());
        assert!(quote.breakdown.services.items.is_empty());
        assert_eq!(quote.totals.grand_total, dec!(535));
    }

    #[test]
    fn test_airport_pickup_and_dropoff_priced_as_round_trip() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);

        let one_way = calc
            .calculate(&TripDetails { airport_pickup: true, ..sigiriya_ella_trip() })
            .unwrap();
        assert_eq!(one_way.breakdown.transport.subtotal, dec!(275) + dec!(35));

        let both = calc
            .calculate(&TripDetails {
                airport_pickup: true,
                airport_dropoff: true,
                ..sigiriya_ella_trip()
            })
            .unwrap();
        assert_eq!(both.breakdown.transport.subtotal, dec!(275) + dec!(63));
    }

    #[test]
    fn test_day_trip_priced_as_return_transfer() {
        let catalog = PricingCatalog::sri_lanka();
        let trip = TripDetails {
            days: 1,
            destinations: vec!["kandy".to_string()],
            ..sigiriya_ella_trip()
        }
        .normalized();
        let quote = QuoteCalculator::new(&catalog).calculate(&trip).unwrap();
        // sedan 0.40/km x 120 km = 48 one way, floor 10 x 3 = 30; return = 48 x 1.8
        assert_eq!(quote.breakdown.transport.subtotal, dec!(86.4));
        assert_eq!(quote.breakdown.accommodation.subtotal, dec!(0));
    }

    #[test]
    fn test_rooms_scale_lodging_not_travelers() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);
        let two_rooms = calc
            .calculate(&TripDetails { rooms: 2, ..sigiriya_ella_trip() })
            .unwrap();
        assert_eq!(two_rooms.breakdown.accommodation.subtotal, dec!(520));

        let derived = calc
            .calculate(&TripDetails {
                adults: 5,
                rooms: 0,
                vehicle: Some("suv".to_string()),
                ..sigiriya_ella_trip()
            })
            .unwrap();
        // 5 travelers -> 3 doubles x 65 x 4 nights
        assert_eq!(derived.breakdown.accommodation.subtotal, dec!(780));
    }

    #[test]
    fn test_policy_rules_apply_when_enabled() {
        let mut catalog = PricingCatalog::sri_lanka();
        catalog.policy = PricingPolicy {
            entrance_fees: true,
            seasonal_pricing: true,
            group_discount: true,
            ..Default::default()
        };
        let trip = TripDetails {
            adults: 6,
            vehicle: Some("van".to_string()),
            rooms: 3,
            start_date: Some(date(2026, 12, 20)),
            ..sigiriya_ella_trip()
        };
        let quote = QuoteCalculator::new(&catalog).calculate(&trip).unwrap();

        // sigiriya 30 x 6 adults, ella free
        assert_eq!(quote.breakdown.entrance_fees.subtotal, dec!(180));
        // 3 doubles x 65 x 4 = 780, peak +20%
        assert_eq!(quote.totals.seasonal_adjustment, dec!(156));
        assert_eq!(quote.totals.season_label, "Peak Season");
        // van 75 x 5 = 375; subtotal 375 + 780 + 180 = 1335; 5% group
        assert_eq!(quote.totals.subtotal, dec!(1335));
        assert_eq!(quote.totals.discounts, dec!(66.75));
        assert_eq!(quote.totals.grand_total, dec!(1335) + dec!(156) - dec!(66.75));
        assert_eq!(
            quote.totals.deposit,
            round_whole(quote.totals.grand_total * dec!(0.30))
        );
    }

    #[test]
    fn test_early_bird_needs_issue_date() {
        let mut catalog = PricingCatalog::sri_lanka();
        catalog.policy.early_bird_discount = true;
        let trip = sigiriya_ella_trip();

        let without = QuoteCalculator::new(&catalog).calculate(&trip).unwrap();
        assert!(without.breakdown.discounts.items.is_empty());

        let early = QuoteCalculator::new(&catalog)
            .as_of(date(2026, 3, 1))
            .calculate(&trip)
            .unwrap();
        assert_eq!(early.breakdown.discounts.items.len(), 1);
        assert_eq!(early.valid_until, Some(date(2026, 3, 8)));

        let late = QuoteCalculator::new(&catalog)
            .as_of(date(2026, 6, 1))
            .calculate(&trip)
            .unwrap();
        assert!(late.breakdown.discounts.items.is_empty());
    }

    #[test]
    fn test_returning_customer_discount_is_off_by_default() {
        let catalog = PricingCatalog::sri_lanka();
        let trip = TripDetails { is_returning_customer: true, ..sigiriya_ella_trip() };
        let quote = QuoteCalculator::new(&catalog).calculate(&trip).unwrap();
        assert_eq!(quote.totals.discounts, dec!(0));
    }

    #[test]
    fn test_fuel_estimate_follows_route() {
        let mut catalog = PricingCatalog::sri_lanka();
        catalog.policy.fuel_estimate = true;
        let quote = QuoteCalculator::new(&catalog)
            .calculate(&sigiriya_ella_trip())
            .unwrap();
        // colombo->sigiriya 170, sigiriya->ella unknown 50, ella->colombo 200
        let fuel = &quote.breakdown.transport.items[1];
        assert_eq!(fuel.quantity, "420");
        assert_eq!(fuel.total, dec!(0.08) * dec!(420));
    }

    #[test]
    fn test_recommended_vehicle_smallest_that_fits() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);
        assert_eq!(calc.recommended_vehicle(2).unwrap().id, "sedan");
        assert_eq!(calc.recommended_vehicle(4).unwrap().id, "suv");
        assert_eq!(calc.recommended_vehicle(6).unwrap().id, "luxury");
        assert_eq!(calc.recommended_vehicle(7).unwrap().id, "van");
        assert_eq!(calc.recommended_vehicle(14).unwrap().id, "miniBus");
        assert!(calc.recommended_vehicle(15).is_none());
    }

    #[test]
    fn test_recommended_vehicle_is_monotonic() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);
        let mut previous = 0;
        for pax in 0..=14 {
            let seats = calc.recommended_vehicle(pax).unwrap().max_passengers;
            assert!(seats >= previous, "pax {} got {} seats", pax, seats);
            assert!(seats >= pax);
            previous = seats;
        }
    }

    #[test]
    fn test_suggested_duration() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);
        // 0.5 + 1.5 = 2, + 1
        assert_eq!(calc.suggested_duration(&["sigiriya", "ella"]), 3);
        assert_eq!(calc.suggested_duration(&["ella", "sigiriya"]), 3);
        // 0.25 + 0.5 unknown = 0.75 -> 1, + 1
        assert_eq!(calc.suggested_duration(&["dambulla", "atlantis"]), 2);
        assert_eq!(calc.suggested_duration::<&str>(&[]), 0);
    }

    #[test]
    fn test_quick_quote_matches_formula() {
        let catalog = PricingCatalog::sri_lanka();
        let quick = QuoteCalculator::new(&catalog)
            .quick_quote(2, 5, Some("standard"))
            .unwrap();
        // 55 x 5 + 65 x 4 x 1 + 50 x 2 = 635
        assert_eq!(quick.mid, dec!(635));
        assert_eq!(quick.low, dec!(572));
        assert_eq!(quick.high, dec!(762));
        assert_eq!(quick.per_person, dec!(318));
        assert_eq!(quick.per_day, dec!(127));
    }

    #[test]
    fn test_quick_quote_ordering_and_monotonicity() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);
        for tier in ["budget", "standard", "superior", "luxury"] {
            for pax in 1..=16 {
                let mut previous_mid = Decimal::ZERO;
                for days in 1..=21 {
                    let q = calc.quick_quote(pax, days, Some(tier)).unwrap();
                    assert!(q.low <= q.mid && q.mid <= q.high);
                    assert!(q.mid >= previous_mid);
                    previous_mid = q.mid;

                    let more_pax = calc.quick_quote(pax + 1, days, Some(tier)).unwrap();
                    assert!(more_pax.mid >= q.mid);
                }
            }
        }
    }

    #[test]
    fn test_quick_quote_rejects_empty_inputs() {
        let catalog = PricingCatalog::sri_lanka();
        let calc = QuoteCalculator::new(&catalog);
        assert!(matches!(calc.quick_quote(0, 5, None), Err(QuoteError::Invalid { .. })));
        assert!(matches!(calc.quick_quote(2, 0, None), Err(QuoteError::Invalid { .. })));
        assert_eq!(
            calc.quick_quote(2, 5, Some("hostel")).unwrap_err(),
            QuoteError::UnknownTier("hostel".to_string())
        );
    }

    #[test]
    fn test_input_hash_format() {
        let hash = quote_input_hash(&sigiriya_ella_trip(), None);
        assert!(hash.starts_with("sha256:"));
        assert_eq!(hash.len(), 7 + 64);
        assert_ne!(hash, quote_input_hash(&sigiriya_ella_trip(), Some(date(2026, 1, 1))));
    }
}
