use serde::{Deserialize, Serialize};

/// Markets Basil operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Country {
    India,
    Netherlands,
    Germany,
}

impl Country {
    /// Standard tax slabs for the market, in percent.
    pub fn standard_tax_rates(&self) -> &'static [f64] {
        match self {
            Country::India => &[0.0, 5.0, 12.0, 18.0, 28.0],
            Country::Netherlands => &[9.0, 21.0],
            Country::Germany => &[7.0, 19.0],
        }
    }

    /// ISO 4217 currency code.
    pub fn currency(&self) -> &'static str {
        match self {
            Country::India => "INR",
            Country::Netherlands | Country::Germany => "EUR",
        }
    }
}
