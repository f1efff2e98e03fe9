//! Locale-aware display formatting for dashboard values.
//!
//! Currency amounts render under the Spanish (Colombia) convention and dates
//! under the Spanish (Spain) long form. Both formatters are pure: same input,
//! same string, no environment lookups.

mod currency;
mod date;
mod locale;

pub use currency::{format_currency, format_currency_decimal};
pub use date::{format_date, long_date, parse_date_input};
pub use locale::Locale;
