//! Currency codes for prices and payment preferences.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes accepted by the payment gateway.
///
/// The default is Argentine pesos, matching the store's home market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    ARS,
    USD,
    BRL,
    CLP,
    UYU,
}

impl CurrencyCode {
    /// The ISO 4217 code as a static string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ARS => "ARS",
            Self::USD => "USD",
            Self::BRL => "BRL",
            Self::CLP => "CLP",
            Self::UYU => "UYU",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ARS" => Ok(Self::ARS),
            "USD" => Ok(Self::USD),
            "BRL" => Ok(Self::BRL),
            "CLP" => Ok(Self::CLP),
            "UYU" => Ok(Self::UYU),
            _ => Err(format!("unsupported currency code: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ars() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::ARS);
    }

    #[test]
    fn test_code_roundtrip() {
        for code in [
            CurrencyCode::ARS,
            CurrencyCode::USD,
            CurrencyCode::BRL,
            CurrencyCode::CLP,
            CurrencyCode::UYU,
        ] {
            assert_eq!(code.code().parse::<CurrencyCode>(), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
