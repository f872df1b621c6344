use crate::token::Token;

/// An amount in the token's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Balance {
    #[serde(with = "amount_str")]
    pub amount: u128,
    pub token: Token,
}

impl Balance {
    pub fn new(amount: u128, token: Token) -> Self {
        Self { amount, token }
    }

    /// Parses a human amount such as `"1.5"`, rounding past the token precision.
    pub fn from_user_input(input: &str, token: Token) -> Result<Self, crate::Error> {
        let amount = vault_utils::unit::parse_units(input, token.decimals).map_err(|e| {
            crate::Error::InvalidAmount {
                input: input.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { amount, token })
    }

    pub fn to_float(&self) -> f64 {
        self.amount as f64 / 10f64.powi(self.token.decimals as i32)
    }

    /// `"1.5 DOT"`
    pub fn format(&self) -> Result<String, crate::Error> {
        let value = vault_utils::unit::format_to_string(self.amount, self.token.decimals)?;
        Ok(format!("{} {}", value, self.token.symbol))
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

// u128 does not survive a JSON number round trip in every consumer
mod amount_str {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u128>().map_err(serde::de::Error::custom)
    }
}
