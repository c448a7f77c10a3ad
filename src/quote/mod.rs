//! Trip quote engine.
//!
//! Prices private-driver tours from a static [`PricingCatalog`]:
//! - Trip validation and itemized quotes (transport, accommodation,
//!   entrance fees, activities, services, optional discounts)
//! - Quick price ranges before the trip form is complete
//! - Vehicle recommendation and suggested trip length
//! - Group transport and airport transfer prices
//! - The multi-step trip wizard
//!
//! All amounts are USD `Decimal`s; other currencies only appear at the
//! display boundary.

pub mod calculators;
pub mod catalog;
pub mod currency;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod transfer;
pub mod wizard;

pub use calculators::{round_money, round_whole};
pub use catalog::{CatalogError, PricingCatalog, PricingPolicy, Vehicle};
pub use currency::{format_price, Currency};
pub use models::{QuickQuote, Quote, TripDetails, ValidationReport};
pub use routes::router;
pub use services::{QuoteCalculator, QuoteError};
pub use transfer::{price_transfer, TransferQuote, TransferRequest};
pub use wizard::{Step, TripDraft, TripUpdate};
