use serde::{Deserialize, Serialize};

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Locale preset used by the dashboard formatters.
///
/// The set is closed: each preset carries its separator and month tables here
/// instead of resolving them through a locale database at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Spanish (Colombia). Currency amounts use this preset.
    #[default]
    EsCo,
    /// Spanish (Spain). Long-form dates use this preset.
    EsEs,
}

impl Locale {
    #[must_use]
    pub(super) fn grouping_separator(self) -> char {
        match self {
            Self::EsCo | Self::EsEs => '.',
        }
    }

    #[must_use]
    pub(super) fn decimal_separator(self) -> char {
        match self {
            Self::EsCo | Self::EsEs => ',',
        }
    }

    /// Full month name for a 1-based month number; empty for out-of-range input.
    #[must_use]
    pub(super) fn month_name(self, month: u32) -> &'static str {
        let index = month.wrapping_sub(1) as usize;
        match self {
            Self::EsCo | Self::EsEs => SPANISH_MONTHS.get(index).copied().unwrap_or(""),
        }
    }
}
