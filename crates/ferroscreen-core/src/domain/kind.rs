use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Asset class a screener query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenerKind {
    Stock,
    Forex,
    Crypto,
    Bond,
    Futures,
    Coin,
}

impl ScreenerKind {
    pub const ALL: [Self; 6] = [
        Self::Stock,
        Self::Forex,
        Self::Crypto,
        Self::Bond,
        Self::Futures,
        Self::Coin,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Bond => "bond",
            Self::Futures => "futures",
            Self::Coin => "coin",
        }
    }

    /// Scan endpoint path segment used when no market narrows the query.
    pub const fn market_path(self) -> &'static str {
        match self {
            Self::Stock => "america",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Bond => "bond",
            Self::Futures => "futures",
            Self::Coin => "coin",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Stock => 1,
            Self::Forex => 1 << 1,
            Self::Crypto => 1 << 2,
            Self::Bond => 1 << 3,
            Self::Futures => 1 << 4,
            Self::Coin => 1 << 5,
        }
    }
}

impl Display for ScreenerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenerKind {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(Self::Stock),
            "forex" => Ok(Self::Forex),
            "crypto" => Ok(Self::Crypto),
            "bond" => Ok(Self::Bond),
            "futures" => Ok(Self::Futures),
            "coin" => Ok(Self::Coin),
            other => Err(ParseError::ScreenerKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// Compact set of screener kinds a field is valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KindSet(u8);

impl KindSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b11_1111);
    pub const STOCK: Self = Self::of(ScreenerKind::Stock);
    pub const FOREX: Self = Self::of(ScreenerKind::Forex);
    pub const CRYPTO: Self = Self::of(ScreenerKind::Crypto);
    pub const BOND: Self = Self::of(ScreenerKind::Bond);
    pub const FUTURES: Self = Self::of(ScreenerKind::Futures);
    pub const COIN: Self = Self::of(ScreenerKind::Coin);
    /// Every kind with a traded price series.
    pub const MARKETS: Self = Self::STOCK
        .union(Self::FOREX)
        .union(Self::CRYPTO)
        .union(Self::FUTURES)
        .union(Self::COIN);
    pub const CRYPTOS: Self = Self::CRYPTO.union(Self::COIN);

    pub const fn of(kind: ScreenerKind) -> Self {
        Self(kind.bit())
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn with(self, kind: ScreenerKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub const fn contains(self, kind: ScreenerKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = ScreenerKind> {
        ScreenerKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<ScreenerKind> for KindSet {
    fn from_iter<T: IntoIterator<Item = ScreenerKind>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl Serialize for KindSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for KindSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let kinds = Vec::<ScreenerKind>::deserialize(deserializer)?;
        Ok(kinds.into_iter().collect())
    }
}
