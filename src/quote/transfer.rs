//! Group transport and transfer pricing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculators::{deposit_for, round_money, round_trip_price, transfer_leg_price, BillingBasis};
use super::catalog::PricingCatalog;
use super::services::QuoteError;

/// Longest transfer accepted, in km. Colombo to Jaffna is about 400.
const MAX_TRANSFER_KM: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverType {
    Standard,
    EnglishSpeaking,
    TourGuide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
    MultiDay,
}

impl TripType {
    /// Driver-days billed for this trip type.
    fn driver_units(&self, days: u32) -> u32 {
        match self {
            TripType::OneWay => 1,
            TripType::RoundTrip => 2,
            TripType::MultiDay => days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransferRequest {
    pub vehicle: String,
    #[serde(default)]
    pub trip_type: TripType,
    #[serde(default)]
    pub distance_km: Decimal,
    #[serde(default)]
    pub days: u32,
    pub passengers: u32,
    #[serde(default)]
    pub driver: Option<DriverType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferQuote {
    pub vehicle: String,
    pub vehicle_name: String,
    pub trip_type: TripType,
    pub billing_basis: BillingBasis,
    /// One-way leg price; zero for multi-day hire
    pub one_way_price: Decimal,
    pub vehicle_price: Decimal,
    pub driver: Option<DriverType>,
    pub driver_charge: Decimal,
    pub total: Decimal,
    pub deposit: Decimal,
    pub balance: Decimal,
}

/// Price a vehicle hire from either fleet.
pub fn price_transfer(catalog: &PricingCatalog, req: &TransferRequest) -> Result<TransferQuote, QuoteError> {
    let vehicle = catalog
        .vehicle(&req.vehicle)
        .ok_or_else(|| QuoteError::UnknownVehicle(req.vehicle.clone()))?;

    let mut errors = Vec::new();
    if req.passengers == 0 {
        errors.push("At least 1 passenger is required".to_string());
    }
    if !vehicle.seats(req.passengers) {
        errors.push(format!(
            "{} seats {} passengers, requested {}",
            vehicle.name, vehicle.max_passengers, req.passengers
        ));
    }
    match req.trip_type {
        TripType::OneWay | TripType::RoundTrip if req.distance_km <= Decimal::ZERO => {
            errors.push("Transfer distance must be greater than 0 km".to_string());
        }
        TripType::OneWay | TripType::RoundTrip if req.distance_km > MAX_TRANSFER_KM => {
            errors.push(format!("Transfer distance cannot exceed {} km", MAX_TRANSFER_KM));
        }
        TripType::MultiDay if req.days == 0 => {
            errors.push("Multi-day hire must be at least 1 day".to_string());
        }
        _ => {}
    }
    if !errors.is_empty() {
        return Err(QuoteError::Invalid { errors });
    }

    let (one_way_price, vehicle_price, billing_basis) = match req.trip_type {
        TripType::OneWay => {
            let (leg, basis) = transfer_leg_price(
                vehicle.per_km,
                req.distance_km,
                vehicle.hourly_rate,
                vehicle.minimum_hours,
            );
            (leg, leg, basis)
        }
        TripType::RoundTrip => {
            let (leg, basis) = transfer_leg_price(
                vehicle.per_km,
                req.distance_km,
                vehicle.hourly_rate,
                vehicle.minimum_hours,
            );
            (leg, round_trip_price(leg, catalog.transfers.round_trip_factor), basis)
        }
        TripType::MultiDay => (
            Decimal::ZERO,
            vehicle.price_per_day * Decimal::from(req.days),
            BillingBasis::PerDay,
        ),
    };

    let driver_charge = match req.driver {
        Some(driver) => {
            let rate = catalog.driver_rates.get(&driver).copied().unwrap_or_default();
            rate * Decimal::from(req.trip_type.driver_units(req.days))
        }
        None => Decimal::ZERO,
    };

    let total = round_money(vehicle_price + driver_charge);
    let deposit = deposit_for(total, catalog.payment_terms.deposit_rate);

    tracing::debug!(
        vehicle = %vehicle.id,
        trip_type = ?req.trip_type,
        basis = ?billing_basis,
        total = %total,
        "priced transfer"
    );

    Ok(TransferQuote {
        vehicle: vehicle.id.clone(),
        vehicle_name: vehicle.name.clone(),
        trip_type: req.trip_type,
        billing_basis,
        one_way_price: round_money(one_way_price),
        vehicle_price: round_money(vehicle_price),
        driver: req.driver,
        driver_charge,
        total,
        deposit,
        balance: total - deposit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::catalog::Vehicle;
    use rust_decimal_macros::dec;

    fn shuttle_catalog() -> PricingCatalog {
        let mut catalog = PricingCatalog::sri_lanka();
        catalog.group_fleet.insert(
            "shuttle".to_string(),
            Vehicle {
                id: "shuttle".to_string(),
                name: "Airport Shuttle".to_string(),
                max_passengers: 8,
                max_luggage: 8,
                price_per_day: dec!(90),
                fuel_cost_per_km: dec!(0.1),
                per_km: dec!(2),
                hourly_rate: dec!(15),
                minimum_hours: dec!(1),
                features: Vec::new(),
            },
        );
        catalog
    }

    fn request(trip_type: TripType, km: Decimal) -> TransferRequest {
        TransferRequest {
            vehicle: "shuttle".to_string(),
            trip_type,
            distance_km: km,
            days: 0,
            passengers: 4,
            driver: None,
        }
    }

    #[test]
    fn test_ten_km_one_way_and_round_trip() {
        let catalog = shuttle_catalog();

        let one_way = price_transfer(&catalog, &request(TripType::OneWay, dec!(10))).unwrap();
        assert_eq!(one_way.total, dec!(20));
        assert_eq!(one_way.billing_basis, BillingBasis::PerKm);

        let round = price_transfer(&catalog, &request(TripType::RoundTrip, dec!(10))).unwrap();
        assert_eq!(round.one_way_price, dec!(20));
        assert_eq!(round.total, dec!(36));
        assert_eq!(round.total, one_way.total * dec!(1.8));
    }

    #[test]
    fn test_short_transfer_billed_at_minimum_hours() {
        let catalog = shuttle_catalog();
        let quote = price_transfer(&catalog, &request(TripType::OneWay, dec!(5))).unwrap();
        assert_eq!(quote.total, dec!(15));
        assert_eq!(quote.billing_basis, BillingBasis::MinimumHours);
    }

    #[test]
    fn test_multi_day_with_driver() {
        let catalog = shuttle_catalog();
        let req = TransferRequest {
            days: 3,
            driver: Some(DriverType::TourGuide),
            ..request(TripType::MultiDay, dec!(0))
        };
        let quote = price_transfer(&catalog, &req).unwrap();
        assert_eq!(quote.vehicle_price, dec!(270));
        assert_eq!(quote.driver_charge, dec!(195));
        assert_eq!(quote.total, dec!(465));
        assert_eq!(quote.deposit, dec!(140));
        assert_eq!(quote.balance, dec!(325));
    }

    #[test]
    fn test_round_trip_driver_billed_twice() {
        let catalog = shuttle_catalog();
        let req = TransferRequest {
            driver: Some(DriverType::Standard),
            ..request(TripType::RoundTrip, dec!(10))
        };
        let quote = price_transfer(&catalog, &req).unwrap();
        assert_eq!(quote.driver_charge, dec!(60));
        assert_eq!(quote.total, dec!(96));
    }

    #[test]
    fn test_rejects_overfull_vehicle() {
        let catalog = shuttle_catalog();
        let req = TransferRequest { passengers: 9, ..request(TripType::OneWay, dec!(10)) };
        match price_transfer(&catalog, &req) {
            Err(QuoteError::Invalid { errors }) => assert!(errors[0].contains("seats 8")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_missing_distance_and_days() {
        let catalog = shuttle_catalog();
        assert!(matches!(
            price_transfer(&catalog, &request(TripType::OneWay, dec!(0))),
            Err(QuoteError::Invalid { .. })
        ));
        assert!(matches!(
            price_transfer(&catalog, &request(TripType::MultiDay, dec!(0))),
            Err(QuoteError::Invalid { .. })
        ));
    }

    #[test]
    fn test_rejects_distance_beyond_island() {
        let catalog = PricingCatalog::sri_lanka();
        let req = TransferRequest {
            vehicle: "miniCoach".to_string(),
            passengers: 10,
            ..request(TripType::OneWay, Decimal::MAX)
        };
        match price_transfer(&catalog, &req) {
            Err(QuoteError::Invalid { errors }) => assert!(errors[0].contains("cannot exceed 1000 km")),
            other => panic!("expected validation error, got {:?}", other),
        }

        let longest = TransferRequest { distance_km: dec!(1000), ..req };
        assert!(price_transfer(&catalog, &longest).is_ok());
    }

    #[test]
    fn test_unknown_vehicle() {
        let catalog = shuttle_catalog();
        let req = TransferRequest { vehicle: "hovercraft".to_string(), ..request(TripType::OneWay, dec!(10)) };
        assert_eq!(
            price_transfer(&catalog, &req).unwrap_err(),
            QuoteError::UnknownVehicle("hovercraft".to_string())
        );
    }

    #[test]
    fn test_trip_type_wire_names() {
        let req: TransferRequest = serde_json::from_str(
            r#"{"vehicle":"miniCoach","trip_type":"round-trip","distance_km":"120","passengers":18,"driver":"english-speaking"}"#,
        )
        .unwrap();
        assert_eq!(req.trip_type, TripType::RoundTrip);
        assert_eq!(req.driver, Some(DriverType::EnglishSpeaking));
        // 2.5 x 120 = 300 vs 25 x 4 = 100; x 1.8 = 540; driver 45 x 2
        let quote = price_transfer(&PricingCatalog::sri_lanka(), &req).unwrap();
        assert_eq!(quote.total, dec!(630));
    }
}
