//! Pricing catalog: every rate the quote engine reads.
//!
//! All prices are USD. The catalog is built (or loaded from JSON) once at
//! startup, checked with [`PricingCatalog::verify`], and then shared
//! read-only.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::calculators::RoomType;
use super::currency::{Currency, CurrencyRates};
use super::transfer::DriverType;

/// Catalog loading and integrity errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read pricing catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid pricing catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pricing catalog failed integrity checks: {}", .0.join("; "))]
    Integrity(Vec<String>),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub max_passengers: u32,
    pub max_luggage: u32,
    /// Rental rate for tours billed per day
    pub price_per_day: Decimal,
    /// Fuel estimate used when the fuel policy is on
    pub fuel_cost_per_km: Decimal,
    /// Transfer rate per km
    pub per_km: Decimal,
    /// Transfer floor rate
    pub hourly_rate: Decimal,
    /// Minimum billable hours for a transfer
    pub minimum_hours: Decimal,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Vehicle {
    pub fn seats(&self, passengers: u32) -> bool {
        self.max_passengers >= passengers
    }
}

/// Nightly rate per room type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomRates {
    pub single: Decimal,
    pub double: Decimal,
    pub triple: Decimal,
    pub family: Decimal,
}

impl RoomRates {
    pub fn rate(&self, room_type: RoomType) -> Decimal {
        match room_type {
            RoomType::Single => self.single,
            RoomType::Double => self.double,
            RoomType::Triple => self.triple,
            RoomType::Family => self.family,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccommodationTier {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_per_night: RoomRates,
    #[serde(default)]
    pub includes: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EntranceFee {
    pub adult: Decimal,
    pub child: Decimal,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub region: String,
    pub distance_from_colombo: u32,
    #[serde(default)]
    pub entrance_fee: EntranceFee,
    /// Typical stay in days
    pub suggested_duration: Decimal,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Per-person activity price, either flat or by train class.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ActivityPrice {
    Flat(Decimal),
    ByClass {
        first_class: Decimal,
        second_class: Decimal,
        third_class: Decimal,
    },
}

impl ActivityPrice {
    /// Price quoted per person; class-priced activities quote second class.
    pub fn quoted(&self) -> Decimal {
        match self {
            ActivityPrice::Flat(price) => *price,
            ActivityPrice::ByClass { second_class, .. } => *second_class,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price_per_person: ActivityPrice,
    pub duration: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub destination: Option<String>,
    /// Children pay the activity price too
    #[serde(default)]
    pub child_price: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdditionalService {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub price_per_day: Option<Decimal>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteDistance {
    pub from: String,
    pub to: String,
    pub km: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Season {
    pub label: String,
    pub months: Vec<u32>,
    pub multiplier: Decimal,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Seasons {
    pub peak: Season,
    pub shoulder: Season,
    pub low: Season,
}

impl Seasons {
    /// Season for a calendar month (1-12); months not listed are low season.
    pub fn for_month(&self, month: u32) -> &Season {
        if self.peak.months.contains(&month) {
            &self.peak
        } else if self.shoulder.months.contains(&month) {
            &self.shoulder
        } else {
            &self.low
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupDiscount {
    pub min_travelers: u32,
    pub rate: Decimal,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Discounts {
    /// Any order; the largest qualifying threshold wins
    pub group: Vec<GroupDiscount>,
    pub early_bird_days: i64,
    pub early_bird_rate: Decimal,
    pub returning_rate: Decimal,
    pub long_stay_days: u32,
    pub long_stay_rate: Decimal,
}

impl Discounts {
    pub fn group_rate(&self, travelers: u32) -> Option<&GroupDiscount> {
        self.group
            .iter()
            .filter(|tier| travelers >= tier.min_travelers)
            .max_by_key(|tier| tier.min_travelers)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentTerms {
    pub deposit_rate: Decimal,
    pub balance_due_days: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransferRates {
    /// One-way airport pickup
    pub airport_pickup: Decimal,
    /// One-way airport drop-off
    pub airport_dropoff: Decimal,
    /// Return journey price as a multiple of one way
    pub round_trip_factor: Decimal,
    /// Assumed leg length when two destinations have no known route
    pub fallback_leg_km: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehicleBand {
    pub max_pax: u32,
    pub day_rate: Decimal,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuickQuoteRates {
    /// Ascending by `max_pax`
    pub vehicle_bands: Vec<VehicleBand>,
    pub large_group_day_rate: Decimal,
    pub entrance_fee_per_person: Decimal,
    pub low_factor: Decimal,
    pub high_factor: Decimal,
}

impl QuickQuoteRates {
    pub fn day_rate(&self, pax: u32) -> Decimal {
        self.vehicle_bands
            .iter()
            .find(|band| pax <= band.max_pax)
            .map(|band| band.day_rate)
            .unwrap_or(self.large_group_day_rate)
    }
}

/// Optional pricing rules. Everything is off unless a catalog turns it on.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingPolicy {
    pub fuel_estimate: bool,
    pub entrance_fees: bool,
    pub seasonal_pricing: bool,
    pub group_discount: bool,
    pub long_stay_discount: bool,
    pub early_bird_discount: bool,
    pub returning_customer_discount: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingCatalog {
    pub vehicles: BTreeMap<String, Vehicle>,
    /// Coaches and vans hired through group transport only
    #[serde(default)]
    pub group_fleet: BTreeMap<String, Vehicle>,
    pub accommodation_tiers: BTreeMap<String, AccommodationTier>,
    pub destinations: BTreeMap<String, Destination>,
    #[serde(default)]
    pub route_distances: Vec<RouteDistance>,
    #[serde(default)]
    pub activities: BTreeMap<String, Activity>,
    #[serde(default)]
    pub services: BTreeMap<String, AdditionalService>,
    pub currency_rates: CurrencyRates,
    pub seasons: Seasons,
    pub discounts: Discounts,
    pub payment_terms: PaymentTerms,
    pub transfers: TransferRates,
    pub driver_rates: BTreeMap<DriverType, Decimal>,
    pub quick_quote: QuickQuoteRates,
    #[serde(default)]
    pub policy: PricingPolicy,
}

impl PricingCatalog {
    /// Parse a catalog from JSON and verify it.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: PricingCatalog = serde_json::from_str(json)?;
        catalog.verify()?;
        Ok(catalog)
    }

    /// Load a catalog file and verify it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Vehicle from the tour fleet, then the group fleet.
    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.get(id).or_else(|| self.group_fleet.get(id))
    }

    pub fn tier(&self, id: &str) -> Option<&AccommodationTier> {
        self.accommodation_tiers.get(id)
    }

    pub fn destination(&self, id: &str) -> Option<&Destination> {
        self.destinations.get(id)
    }

    /// Known road distance between two destinations, in either direction.
    pub fn route_distance(&self, from: &str, to: &str) -> Option<u32> {
        self.route_distances
            .iter()
            .find(|r| (r.from == from && r.to == to) || (r.from == to && r.to == from))
            .map(|r| r.km)
    }

    /// Check internal consistency. Collects every problem rather than
    /// stopping at the first.
    pub fn verify(&self) -> Result<(), CatalogError> {
        let mut problems = Vec::new();

        if self.vehicles.is_empty() {
            problems.push("vehicle catalog is empty".to_string());
        }
        for (key, vehicle) in self.vehicles.iter().chain(self.group_fleet.iter()) {
            if key != &vehicle.id {
                problems.push(format!("vehicle key '{}' does not match id '{}'", key, vehicle.id));
            }
            if vehicle.max_passengers == 0 {
                problems.push(format!("vehicle '{}' seats nobody", key));
            }
        }
        for key in self.group_fleet.keys() {
            if self.vehicles.contains_key(key) {
                problems.push(format!("vehicle id '{}' is in both fleets", key));
            }
        }
        for (key, tier) in &self.accommodation_tiers {
            if key != &tier.id {
                problems.push(format!("tier key '{}' does not match id '{}'", key, tier.id));
            }
        }
        for (key, dest) in &self.destinations {
            if key != &dest.id {
                problems.push(format!("destination key '{}' does not match id '{}'", key, dest.id));
            }
        }
        for (key, activity) in &self.activities {
            if key != &activity.id {
                problems.push(format!("activity key '{}' does not match id '{}'", key, activity.id));
            }
        }
        for (key, service) in &self.services {
            if key != &service.id {
                problems.push(format!("service key '{}' does not match id '{}'", key, service.id));
            }
            if service.price.is_none() && service.price_per_day.is_none() {
                problems.push(format!("service '{}' has no price", key));
            }
        }
        for route in &self.route_distances {
            for end in [&route.from, &route.to] {
                if !self.destinations.contains_key(end) {
                    problems.push(format!("route endpoint '{}' is not a destination", end));
                }
            }
        }
        match self.currency_rates.get(&Currency::Usd) {
            Some(rate) if *rate == Decimal::ONE => {}
            _ => problems.push("USD rate must be present and equal to 1".to_string()),
        }
        let rate = self.payment_terms.deposit_rate;
        if rate <= Decimal::ZERO || rate > Decimal::ONE {
            problems.push(format!("deposit rate {} is outside (0, 1]", rate));
        }
        if self.transfers.round_trip_factor <= Decimal::ZERO {
            problems.push("round-trip factor must be positive".to_string());
        }
        for season in [&self.seasons.peak, &self.seasons.shoulder, &self.seasons.low] {
            if season.months.iter().any(|m| !(1..=12).contains(m)) {
                problems.push(format!("season '{}' lists an invalid month", season.label));
            }
        }
        let low = self.quick_quote.low_factor;
        let high = self.quick_quote.high_factor;
        if low > Decimal::ONE || high < Decimal::ONE {
            problems.push("quick quote factors must satisfy low <= 1 <= high".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Integrity(problems))
        }
    }

    /// Built-in Sri Lanka price list.
    pub fn sri_lanka() -> Self {
        PricingCatalog {
            vehicles: keyed(
                vec![
                    vehicle("sedan", "Sedan (Toyota Axio/Premio)", 3, 2, dec!(55), dec!(0.08))
                        .transfer_rates(dec!(0.40), dec!(10), dec!(3))
                        .features(&["Air Conditioned", "Comfortable Seating", "Ideal for Couples"]),
                    vehicle("suv", "SUV (Toyota Prado/Fortuner)", 5, 4, dec!(85), dec!(0.12))
                        .transfer_rates(dec!(0.60), dec!(15), dec!(3))
                        .features(&["4WD Option", "High Ground Clearance", "Safari Ready"]),
                    vehicle("van", "Mini Van (Toyota KDH)", 7, 6, dec!(75), dec!(0.10))
                        .transfer_rates(dec!(0.55), dec!(14), dec!(3))
                        .features(&["Spacious Interior", "Ample Luggage Space", "Family Friendly"]),
                    vehicle("luxury", "Luxury Van (Mercedes V-Class)", 6, 5, dec!(150), dec!(0.15))
                        .transfer_rates(dec!(0.90), dec!(25), dec!(3))
                        .features(&["Premium Interior", "WiFi Onboard", "Refreshments Included"]),
                    vehicle("miniBus", "Mini Bus (Toyota Coaster)", 14, 14, dec!(120), dec!(0.14))
                        .transfer_rates(dec!(0.80), dec!(20), dec!(4))
                        .features(&["Group Travel", "PA System", "Large Windows"]),
                ],
                |v| &v.id,
            ),
            group_fleet: keyed(
                vec![
                    vehicle("premiumVan", "Premium Van", 10, 10, dec!(80), dec!(0.10))
                        .transfer_rates(dec!(1.5), dec!(15), dec!(4))
                        .features(&["Air Conditioning", "Luggage Space", "USB Charging"]),
                    vehicle("miniCoach", "Mini Coach", 20, 20, dec!(150), dec!(0.14))
                        .transfer_rates(dec!(2.5), dec!(25), dec!(4))
                        .features(&["Reclining Seats", "Entertainment System", "PA System"]),
                    vehicle("luxuryCoach", "Luxury Coach", 35, 35, dec!(250), dec!(0.18))
                        .transfer_rates(dec!(3.5), dec!(40), dec!(6))
                        .features(&["Premium Seats", "Toilet", "Refreshments", "WiFi"]),
                    vehicle("largeCoach", "Large Coach", 55, 55, dec!(350), dec!(0.22))
                        .transfer_rates(dec!(4.5), dec!(55), dec!(6))
                        .features(&["Large Luggage Compartment", "PA System", "Toilet"]),
                ],
                |v| &v.id,
            ),
            accommodation_tiers: keyed(
                vec![
                    tier("budget", "Budget (2-3 Star)", [dec!(25), dec!(35), dec!(45), dec!(55)],
                        "Clean, comfortable guesthouses & budget hotels",
                        &["Breakfast", "AC Room", "WiFi"]),
                    tier("standard", "Standard (3-4 Star)", [dec!(50), dec!(65), dec!(80), dec!(95)],
                        "Quality hotels with good amenities",
                        &["Breakfast", "AC Room", "WiFi", "Pool Access"]),
                    tier("superior", "Superior (4-5 Star)", [dec!(100), dec!(130), dec!(160), dec!(180)],
                        "Premium hotels & boutique properties",
                        &["Breakfast", "AC Room", "WiFi", "Pool", "Gym", "Spa Access"]),
                    tier("luxury", "Luxury (5 Star Deluxe)", [dec!(200), dec!(280), dec!(350), dec!(400)],
                        "Ultra-luxury resorts & villas",
                        &["All Meals Option", "Butler Service", "Airport Lounge", "Private Pool"]),
                ],
                |t| &t.id,
            ),
            destinations: keyed(
                vec![
                    destination("sigiriya", "Sigiriya (Lion Rock)", "Cultural Triangle", 170, (dec!(30), dec!(15)), dec!(0.5)),
                    destination("dambulla", "Dambulla Cave Temple", "Cultural Triangle", 150, (dec!(15), dec!(8)), dec!(0.25)),
                    destination("polonnaruwa", "Polonnaruwa Ancient City", "Cultural Triangle", 215, (dec!(25), dec!(12)), dec!(0.5)),
                    destination("anuradhapura", "Anuradhapura Sacred City", "Cultural Triangle", 200, (dec!(25), dec!(12)), dec!(0.5)),
                    destination("kandy", "Kandy", "Hill Country", 120, (dec!(15), dec!(8)), dec!(1)),
                    destination("nuwaraEliya", "Nuwara Eliya", "Hill Country", 180, (dec!(0), dec!(0)), dec!(1)),
                    destination("ella", "Ella", "Hill Country", 200, (dec!(0), dec!(0)), dec!(1.5)),
                    destination("yala", "Yala National Park", "South Coast", 305, (dec!(0), dec!(0)), dec!(1)),
                    destination("udawalawe", "Udawalawe National Park", "South", 170, (dec!(0), dec!(0)), dec!(0.5)),
                    destination("minneriya", "Minneriya National Park", "Cultural Triangle", 180, (dec!(0), dec!(0)), dec!(0.5)),
                    destination("wilpattu", "Wilpattu National Park", "North West", 180, (dec!(0), dec!(0)), dec!(1)),
                    destination("sinharaja", "Sinharaja Rainforest", "South", 150, (dec!(20), dec!(10)), dec!(1)),
                    destination("mirissa", "Mirissa", "South Coast", 150, (dec!(0), dec!(0)), dec!(2)),
                    destination("unawatuna", "Unawatuna", "South Coast", 130, (dec!(0), dec!(0)), dec!(2)),
                    destination("bentota", "Bentota", "West Coast", 65, (dec!(0), dec!(0)), dec!(2)),
                    destination("arugamBay", "Arugam Bay", "East Coast", 320, (dec!(0), dec!(0)), dec!(3)),
                    destination("trincomalee", "Trincomalee", "East Coast", 260, (dec!(0), dec!(0)), dec!(2)),
                    destination("galle", "Galle Fort", "South Coast", 130, (dec!(0), dec!(0)), dec!(0.5)),
                    destination("pinnawala", "Pinnawala Elephant Orphanage", "Central", 90, (dec!(25), dec!(13)), dec!(0.25)),
                    destination("colombo", "Colombo City", "Western", 0, (dec!(0), dec!(0)), dec!(1)),
                    destination("jaffna", "Jaffna", "Northern", 400, (dec!(0), dec!(0)), dec!(2)),
                ],
                |d| &d.id,
            ),
            route_distances: [
                ("colombo", "sigiriya", 170), ("colombo", "kandy", 120), ("colombo", "galle", 130),
                ("colombo", "yala", 305), ("colombo", "ella", 200), ("colombo", "trincomalee", 260),
                ("colombo", "jaffna", 400), ("colombo", "arugamBay", 320), ("colombo", "nuwaraEliya", 180),
                ("colombo", "bentota", 65), ("colombo", "mirissa", 150), ("colombo", "anuradhapura", 200),
                ("sigiriya", "kandy", 85), ("sigiriya", "polonnaruwa", 60), ("sigiriya", "anuradhapura", 80),
                ("sigiriya", "dambulla", 20), ("sigiriya", "trincomalee", 110), ("kandy", "nuwaraEliya", 80),
                ("kandy", "ella", 140), ("kandy", "anuradhapura", 140), ("nuwaraEliya", "ella", 65),
                ("nuwaraEliya", "yala", 165), ("ella", "yala", 100), ("ella", "mirissa", 130),
                ("ella", "arugamBay", 130), ("galle", "mirissa", 25), ("galle", "yala", 175),
                ("mirissa", "yala", 150), ("yala", "arugamBay", 140), ("anuradhapura", "jaffna", 200),
                ("anuradhapura", "trincomalee", 110), ("trincomalee", "arugamBay", 180),
            ]
            .into_iter()
            .map(|(from, to, km)| RouteDistance { from: from.to_string(), to: to.to_string(), km })
            .collect(),
            activities: keyed(
                vec![
                    activity("yalaSafari", "Yala Safari (Half Day)", "safari", dec!(45), "4-5 hours", Some("yala")),
                    activity("yalaSafariFull", "Yala Safari (Full Day)", "safari", dec!(75), "8-10 hours", Some("yala")),
                    activity("udawalaweSafari", "Udawalawe Safari", "safari", dec!(40), "4 hours", Some("udawalawe")),
                    activity("minneriyaSafari", "Minneriya Safari", "safari", dec!(40), "4 hours", Some("minneriya")),
                    activity("wilpattuSafari", "Wilpattu Safari (Full Day)", "safari", dec!(65), "8 hours", Some("wilpattu")),
                    activity("whaleWatchingMirissa", "Whale Watching (Mirissa)", "water", dec!(55), "5-6 hours", Some("mirissa")),
                    activity("whaleWatchingTrinco", "Whale Watching (Trincomalee)", "water", dec!(50), "5-6 hours", Some("trincomalee")),
                    activity("snorkeling", "Snorkeling Trip", "water", dec!(25), "2-3 hours", None),
                    activity("divingCourse", "PADI Open Water Course", "water", dec!(350), "3-4 days", None),
                    activity("surfingLesson", "Surfing Lesson", "water", dec!(30), "2 hours", Some("arugamBay")),
                    activity("whitewaterRafting", "Whitewater Rafting (Kitulgala)", "adventure", dec!(40), "3-4 hours", None),
                    activity("hotAirBalloon", "Hot Air Balloon (Sigiriya)", "adventure", dec!(220), "1 hour flight", Some("sigiriya")),
                    activity("zipline", "Flying Ravana Zipline", "adventure", dec!(45), "30 mins", Some("ella")),
                    activity("cookingClass", "Sri Lankan Cooking Class", "cultural", dec!(35), "3-4 hours", None),
                    activity("kandyDance", "Kandy Cultural Dance Show", "cultural", dec!(12), "1 hour", Some("kandy")),
                    activity("teaFactory", "Tea Factory Visit", "cultural", dec!(8), "1-2 hours", Some("nuwaraEliya")),
                    activity("ayurvedaSpa", "Ayurveda Spa Treatment", "wellness", dec!(60), "2-3 hours", None),
                    Activity {
                        id: "ellaTrainRide".to_string(),
                        name: "Scenic Train Ride (Kandy-Ella)".to_string(),
                        category: "experience".to_string(),
                        price_per_person: ActivityPrice::ByClass {
                            first_class: dec!(15),
                            second_class: dec!(8),
                            third_class: dec!(3),
                        },
                        duration: "6-7 hours".to_string(),
                        includes: vec!["Train Ticket".to_string()],
                        destination: None,
                        child_price: false,
                    },
                    activity("villageTour", "Village Experience", "cultural", dec!(25), "3-4 hours", None),
                ],
                |a| &a.id,
            ),
            services: keyed(
                vec![
                    service("simCard", "Tourist SIM Card (Dialog/Mobitel)", Some(dec!(10)), None, "Activated SIM with data package"),
                    service("guide", "Licensed English Guide", None, Some(dec!(45)), "Professional tour guide"),
                    service("guideMultilingual", "Multilingual Guide", None, Some(dec!(55)), "Guide fluent in multiple languages"),
                    service("photographer", "Professional Photographer", None, Some(dec!(120)), "Edited photos delivered digitally"),
                    service("dronePhotography", "Drone Photography Package", Some(dec!(200)), None, "Aerial photos & video at key locations"),
                    service("privateChef", "Private Chef (Special Dietary)", None, Some(dec!(80)), "For vegan, halal, kosher, or medical diets"),
                    service("childSeat", "Child Car Seat", Some(dec!(5)), None, "Child seat for the whole tour"),
                    service("wifi", "Portable WiFi Device", None, Some(dec!(8)), "Unlimited 4G data, shareable"),
                ],
                |s| &s.id,
            ),
            currency_rates: BTreeMap::from([
                (Currency::Usd, dec!(1)),
                (Currency::Eur, dec!(0.92)),
                (Currency::Gbp, dec!(0.79)),
                (Currency::Aud, dec!(1.53)),
                (Currency::Lkr, dec!(325)),
            ]),
            seasons: Seasons {
                peak: Season { label: "Peak Season".to_string(), months: vec![12, 1, 2, 7, 8], multiplier: dec!(1.20) },
                shoulder: Season { label: "Shoulder Season".to_string(), months: vec![3, 4, 11], multiplier: dec!(1.10) },
                low: Season { label: "Green Season (Best Value)".to_string(), months: vec![5, 6, 9, 10], multiplier: dec!(1.0) },
            },
            discounts: Discounts {
                group: vec![
                    GroupDiscount { min_travelers: 6, rate: dec!(0.05) },
                    GroupDiscount { min_travelers: 10, rate: dec!(0.08) },
                    GroupDiscount { min_travelers: 15, rate: dec!(0.10) },
                ],
                early_bird_days: 60,
                early_bird_rate: dec!(0.05),
                returning_rate: dec!(0.05),
                long_stay_days: 14,
                long_stay_rate: dec!(0.05),
            },
            payment_terms: PaymentTerms { deposit_rate: dec!(0.30), balance_due_days: 30 },
            transfers: TransferRates {
                airport_pickup: dec!(35),
                airport_dropoff: dec!(35),
                round_trip_factor: dec!(1.8),
                fallback_leg_km: 50,
            },
            driver_rates: BTreeMap::from([
                (DriverType::Standard, dec!(30)),
                (DriverType::EnglishSpeaking, dec!(45)),
                (DriverType::TourGuide, dec!(65)),
            ]),
            quick_quote: QuickQuoteRates {
                vehicle_bands: vec![
                    VehicleBand { max_pax: 3, day_rate: dec!(55) },
                    VehicleBand { max_pax: 6, day_rate: dec!(75) },
                ],
                large_group_day_rate: dec!(120),
                entrance_fee_per_person: dec!(50),
                low_factor: dec!(0.9),
                high_factor: dec!(1.2),
            },
            policy: PricingPolicy::default(),
        }
    }
}

impl Default for PricingCatalog {
    fn default() -> Self {
        Self::sri_lanka()
    }
}

fn keyed<T>(items: Vec<T>, key: impl Fn(&T) -> &String) -> BTreeMap<String, T> {
    items.into_iter().map(|item| (key(&item).clone(), item)).collect()
}

fn vehicle(id: &str, name: &str, pax: u32, luggage: u32, per_day: Decimal, fuel: Decimal) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        name: name.to_string(),
        max_passengers: pax,
        max_luggage: luggage,
        price_per_day: per_day,
        fuel_cost_per_km: fuel,
        per_km: Decimal::ZERO,
        hourly_rate: Decimal::ZERO,
        minimum_hours: Decimal::ZERO,
        features: Vec::new(),
    }
}

impl Vehicle {
    fn transfer_rates(mut self, per_km: Decimal, hourly_rate: Decimal, minimum_hours: Decimal) -> Self {
        self.per_km = per_km;
        self.hourly_rate = hourly_rate;
        self.minimum_hours = minimum_hours;
        self
    }

    fn features(mut self, features: &[&str]) -> Self {
        self.features = features.iter().map(|f| f.to_string()).collect();
        self
    }
}

fn tier(id: &str, name: &str, rates: [Decimal; 4], description: &str, includes: &[&str]) -> AccommodationTier {
    let [single, double, triple, family] = rates;
    AccommodationTier {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price_per_night: RoomRates { single, double, triple, family },
        includes: includes.iter().map(|s| s.to_string()).collect(),
    }
}

fn destination(
    id: &str,
    name: &str,
    region: &str,
    km: u32,
    (adult, child): (Decimal, Decimal),
    stay: Decimal,
) -> Destination {
    Destination {
        id: id.to_string(),
        name: name.to_string(),
        region: region.to_string(),
        distance_from_colombo: km,
        entrance_fee: EntranceFee { adult, child },
        suggested_duration: stay,
        highlights: Vec::new(),
    }
}

fn activity(
    id: &str,
    name: &str,
    category: &str,
    price: Decimal,
    duration: &str,
    destination: Option<&str>,
) -> Activity {
    Activity {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price_per_person: ActivityPrice::Flat(price),
        duration: duration.to_string(),
        includes: Vec::new(),
        destination: destination.map(str::to_string),
        child_price: false,
    }
}

fn service(
    id: &str,
    name: &str,
    price: Option<Decimal>,
    price_per_day: Option<Decimal>,
    description: &str,
) -> AdditionalService {
    AdditionalService {
        id: id.to_string(),
        name: name.to_string(),
        price,
        price_per_day,
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_verifies() {
        PricingCatalog::sri_lanka().verify().unwrap();
    }

    #[test]
    fn test_route_distance_is_symmetric() {
        let catalog = PricingCatalog::sri_lanka();
        assert_eq!(catalog.route_distance("kandy", "ella"), Some(140));
        assert_eq!(catalog.route_distance("ella", "kandy"), Some(140));
        assert_eq!(catalog.route_distance("ella", "jaffna"), None);
    }

    #[test]
    fn test_vehicle_lookup_covers_group_fleet() {
        let catalog = PricingCatalog::sri_lanka();
        assert_eq!(catalog.vehicle("sedan").unwrap().max_passengers, 3);
        assert_eq!(catalog.vehicle("miniCoach").unwrap().max_passengers, 20);
        assert!(catalog.vehicle("spaceship").is_none());
    }

    #[test]
    fn test_season_lookup() {
        let seasons = PricingCatalog::sri_lanka().seasons;
        assert_eq!(seasons.for_month(12).multiplier, dec!(1.20));
        assert_eq!(seasons.for_month(4).multiplier, dec!(1.10));
        assert_eq!(seasons.for_month(6).multiplier, dec!(1.0));
    }

    #[test]
    fn test_group_discount_picks_largest_threshold() {
        let discounts = PricingCatalog::sri_lanka().discounts;
        assert!(discounts.group_rate(5).is_none());
        assert_eq!(discounts.group_rate(6).unwrap().rate, dec!(0.05));
        assert_eq!(discounts.group_rate(12).unwrap().rate, dec!(0.08));
        assert_eq!(discounts.group_rate(40).unwrap().rate, dec!(0.10));
    }

    #[test]
    fn test_json_round_trip_preserves_catalog() {
        let json = serde_json::to_string(&PricingCatalog::sri_lanka()).unwrap();
        let catalog = PricingCatalog::from_json_str(&json).unwrap();
        assert_eq!(catalog.vehicles.len(), 5);
        assert_eq!(catalog.transfers.round_trip_factor, dec!(1.8));
        assert!(matches!(
            catalog.activities["ellaTrainRide"].price_per_person,
            ActivityPrice::ByClass { .. }
        ));
    }

    #[test]
    fn test_verify_reports_every_problem() {
        let mut catalog = PricingCatalog::sri_lanka();
        catalog.payment_terms.deposit_rate = dec!(1.5);
        catalog.currency_rates.remove(&Currency::Usd);
        catalog.route_distances.push(RouteDistance {
            from: "kandy".to_string(),
            to: "atlantis".to_string(),
            km: 10,
        });

        match catalog.verify() {
            Err(CatalogError::Integrity(problems)) => {
                assert_eq!(problems.len(), 3);
                assert!(problems.iter().any(|p| p.contains("atlantis")));
            }
            other => panic!("expected integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = PricingCatalog::load("/nonexistent/catalog.json");
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
