use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Discrete reading of a technical rating column (`Recommend.*`, range -1..1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingSignal {
    StrongSell,
    Sell,
    Neutral,
    Buy,
    StrongBuy,
}

impl RatingSignal {
    pub fn from_value(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let signal = if value >= 0.5 {
            Self::StrongBuy
        } else if value >= 0.1 {
            Self::Buy
        } else if value > -0.1 {
            Self::Neutral
        } else if value > -0.5 {
            Self::Sell
        } else {
            Self::StrongSell
        };
        Some(signal)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::StrongSell => "Strong Sell",
            Self::Sell => "Sell",
            Self::Neutral => "Neutral",
            Self::Buy => "Buy",
            Self::StrongBuy => "Strong Buy",
        }
    }
}

impl Display for RatingSignal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
