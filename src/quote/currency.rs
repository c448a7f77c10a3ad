//! Display currencies and price formatting.
//!
//! All pricing happens in USD. A currency only matters at the display
//! boundary, where an amount is converted with the catalog rate table and
//! rounded to whole units.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculators::round_whole;

/// Currencies a quote can be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Aud,
    Lkr,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Aud,
        Currency::Lkr,
    ];

    /// Parse a currency code, falling back to USD for anything unsupported.
    pub fn from_code(code: &str) -> Currency {
        match code.trim().to_ascii_uppercase().as_str() {
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "AUD" => Currency::Aud,
            "LKR" => Currency::Lkr,
            _ => Currency::Usd,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Aud => "AUD",
            Currency::Lkr => "LKR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Aud => "A$",
            Currency::Lkr => "Rs ",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Multipliers against USD, keyed by currency.
pub type CurrencyRates = BTreeMap<Currency, Decimal>;

/// Convert a USD amount and round it to whole units of `currency`.
///
/// Returns the currency actually used: a currency missing from the rate
/// table, or an amount too large to convert, falls back to USD.
pub fn convert(amount_usd: Decimal, currency: Currency, rates: &CurrencyRates) -> (Currency, Decimal) {
    match rates.get(&currency).and_then(|rate| amount_usd.checked_mul(*rate)) {
        Some(converted) => (currency, round_whole(converted)),
        None => (Currency::Usd, round_whole(amount_usd)),
    }
}

/// Amount in every currency of the rate table. Currencies the amount
/// overflows in are left out.
pub fn convert_all(amount_usd: Decimal, rates: &CurrencyRates) -> BTreeMap<Currency, Decimal> {
    rates
        .iter()
        .filter_map(|(currency, rate)| Some((*currency, round_whole(amount_usd.checked_mul(*rate)?))))
        .collect()
}

/// Format a USD amount for display, e.g. `€1,234`.
pub fn format_price(amount_usd: Decimal, code: &str, rates: &CurrencyRates) -> String {
    let (currency, amount) = convert(amount_usd, Currency::from_code(code), rates);
    format!("{}{}", currency.symbol(), group_thousands(amount))
}

fn group_thousands(amount: Decimal) -> String {
    let digits = amount.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount.is_sign_negative() && !amount.is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}
