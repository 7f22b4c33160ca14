use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Currency of a ledger. Every ledger holds exactly one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Native chain token
    Dot,
    Usd,
    Eur,
    Gbp,
    Chf,
}

impl Currency {
    /// Magnitude below which a balance counts as settled.
    pub fn negligible_threshold(self) -> f64 {
        match self {
            Currency::Dot => 0.000_001,
            Currency::Usd | Currency::Eur | Currency::Gbp | Currency::Chf => 0.01,
        }
    }

    pub fn is_negligible(self, amount: f64) -> bool {
        amount.abs() < self.negligible_threshold()
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Dot => "DOT",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
