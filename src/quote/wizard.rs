//! Multi-step trip builder.
//!
//! A [`TripDraft`] is an explicit state object: the current [`Step`] plus
//! the [`TripDetails`] collected so far. Transitions take the draft by
//! reference and never touch anything else, so a front end can replay
//! them in any order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::PricingCatalog;
use super::models::TripDetails;
use super::services::QuoteCalculator;

/// Wizard page, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    TravelersAndDates = 1,
    Destinations = 2,
    Transport = 3,
    Accommodation = 4,
    Review = 5,
}

impl Step {
    pub const FIRST: Step = Step::TravelersAndDates;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::TravelersAndDates => "Travelers & Dates",
            Step::Destinations => "Destinations",
            Step::Transport => "Transport",
            Step::Accommodation => "Accommodation",
            Step::Review => "Activities & Review",
        }
    }

    fn next(self) -> Option<Step> {
        Step::try_from(self.number() + 1).ok()
    }

    fn prev(self) -> Option<Step> {
        Step::try_from(self.number().checked_sub(1)?).ok()
    }
}

impl TryFrom<u8> for Step {
    type Error = WizardError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Step::TravelersAndDates),
            2 => Ok(Step::Destinations),
            3 => Ok(Step::Transport),
            4 => Ok(Step::Accommodation),
            5 => Ok(Step::Review),
            other => Err(WizardError::NoSuchStep(other)),
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> u8 {
        step.number()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("step {0} does not exist")]
    NoSuchStep(u8),
    #[error("step {} is incomplete", .0.number())]
    Incomplete(Step),
    #[error("cannot jump ahead to step {} from step {}", .to.number(), .from.number())]
    JumpAhead { from: Step, to: Step },
}

/// Single-field edits a front end sends while the user fills the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum TripUpdate {
    Adults(u32),
    Children(u32),
    StartDate(Option<NaiveDate>),
    Days(u32),
    ToggleDestination(String),
    Vehicle(Option<String>),
    AirportPickup(bool),
    AirportDropoff(bool),
    AccommodationTier(Option<String>),
    Rooms(u32),
    ToggleActivity(String),
    ToggleService(String),
    ReturningCustomer(bool),
    SpecialRequests(String),
    Currency(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    pub trip: TripDetails,
    pub step: Step,
}

impl Default for TripDraft {
    fn default() -> Self {
        TripDraft {
            trip: TripDetails::default(),
            step: Step::FIRST,
        }
    }
}

impl TripDraft {
    pub fn new(trip: TripDetails) -> Self {
        TripDraft { trip, step: Step::FIRST }
    }

    /// Whether everything `step` asks for has been filled in.
    pub fn is_step_complete(&self, step: Step, catalog: &PricingCatalog) -> bool {
        let trip = &self.trip;
        match step {
            Step::TravelersAndDates => trip.adults >= 1 && trip.start_date.is_some() && trip.days >= 1,
            Step::Destinations => !trip.destinations.is_empty(),
            Step::Transport => trip
                .vehicle
                .as_deref()
                .and_then(|id| catalog.vehicle(id))
                .is_some_and(|v| v.seats(trip.total_pax())),
            Step::Accommodation => trip
                .accommodation_tier
                .as_deref()
                .is_some_and(|id| catalog.tier(id).is_some()),
            Step::Review => true,
        }
    }

    /// Advance one step. Stays on the last step.
    pub fn next_step(&mut self, catalog: &PricingCatalog) -> Result<Step, WizardError> {
        if !self.is_step_complete(self.step, catalog) {
            return Err(WizardError::Incomplete(self.step));
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Go back one step. Stays on the first step.
    pub fn prev_step(&mut self) -> Step {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Revisit the current or an earlier step.
    pub fn go_to_step(&mut self, step: Step) -> Result<Step, WizardError> {
        if step > self.step {
            return Err(WizardError::JumpAhead { from: self.step, to: step });
        }
        self.step = step;
        Ok(self.step)
    }

    /// Apply one edit, keeping derived fields consistent.
    pub fn apply(&mut self, update: TripUpdate, catalog: &PricingCatalog) {
        let trip = &mut self.trip;
        let mut refit_vehicle = false;
        match update {
            TripUpdate::Adults(adults) => {
                trip.adults = adults;
                refit_vehicle = true;
            }
            TripUpdate::Children(children) => {
                trip.children = children;
                trip.children_ages.truncate(children as usize);
                refit_vehicle = true;
            }
            TripUpdate::StartDate(date) => {
                trip.start_date = date;
                trip.normalize();
            }
            TripUpdate::Days(days) => {
                trip.days = days;
                trip.normalize();
            }
            TripUpdate::ToggleDestination(id) => toggle(&mut trip.destinations, id),
            TripUpdate::Vehicle(vehicle) => trip.vehicle = vehicle,
            TripUpdate::AirportPickup(on) => trip.airport_pickup = on,
            TripUpdate::AirportDropoff(on) => trip.airport_dropoff = on,
            TripUpdate::AccommodationTier(tier) => trip.accommodation_tier = tier,
            TripUpdate::Rooms(rooms) => trip.rooms = rooms,
            TripUpdate::ToggleActivity(id) => toggle(&mut trip.activities, id),
            TripUpdate::ToggleService(id) => toggle(&mut trip.services, id),
            TripUpdate::ReturningCustomer(on) => trip.is_returning_customer = on,
            TripUpdate::SpecialRequests(text) => trip.special_requests = text,
            TripUpdate::Currency(code) => trip.currency = code,
        }
        if refit_vehicle {
            self.ensure_vehicle_fits(catalog);
        }
    }

    /// Upgrade to the recommended vehicle when the party outgrows the
    /// selected one. Never downgrades.
    fn ensure_vehicle_fits(&mut self, catalog: &PricingCatalog) {
        let pax = self.trip.total_pax();
        let fits = match self.trip.vehicle.as_deref().and_then(|id| catalog.vehicle(id)) {
            Some(vehicle) => vehicle.seats(pax),
            None => return,
        };
        if fits {
            return;
        }
        match QuoteCalculator::new(catalog).recommended_vehicle(pax) {
            Some(upgrade) => {
                tracing::debug!(pax, vehicle = %upgrade.id, "upgrading vehicle for party size");
                self.trip.vehicle = Some(upgrade.id.clone());
            }
            None => tracing::warn!(pax, "no vehicle seats the whole party"),
        }
    }
}

fn toggle(list: &mut Vec<String>, id: String) {
    match list.iter().position(|existing| *existing == id) {
        Some(index) => {
            list.remove(index);
        }
        None => list.push(id),
    }
}
