//! Named field lists for common screens.
//!
//! Every preset only references fields valid for its kind; the tests below
//! compile each one to prove it.

use crate::catalog::FieldCatalog;
use crate::domain::{Interval, ScreenerKind};
use crate::error::ScreenerError;
use crate::field::FieldRef;

const PRICE_BASICS: [&str; 7] = ["NAME", "PRICE", "CHANGE_PERCENT", "HIGH", "LOW", "OPEN", "VOLUME"];

const TECHNICAL_PANEL: &[&str] = &[
    "TECHNICAL_RATING",
    "MOVING_AVERAGES_RATING",
    "OSCILLATORS_RATING",
    "RELATIVE_STRENGTH_INDEX_14",
    "RELATIVE_STRENGTH_INDEX_7",
    "STOCHASTIC_PERCENTK_14_3_3",
    "STOCHASTIC_PERCENTD_14_3_3",
    "MACD_LEVEL_12_26",
    "MACD_SIGNAL_12_26",
    "MACD_HIST",
    "COMMODITY_CHANNEL_INDEX_20",
    "AVERAGE_DIRECTIONAL_INDEX_14",
    "AWESOME_OSCILLATOR",
    "MOMENTUM_10",
    "WILLIAMS_PERCENT_RANGE_14",
    "ULTIMATE_OSCILLATOR_7_14_28",
    "STOCHASTIC_RSI_FAST_3_3_14_14",
    "STOCHASTIC_RSI_SLOW_3_3_14_14",
    "POSITIVE_DIRECTIONAL_INDICATOR_14",
    "NEGATIVE_DIRECTIONAL_INDICATOR_14",
    "AROON_UP_14",
    "AROON_DOWN_14",
    "BULL_BEAR_POWER",
    "RATE_OF_CHANGE_9",
    "EXPONENTIAL_MOVING_AVERAGE_10",
    "EXPONENTIAL_MOVING_AVERAGE_20",
    "EXPONENTIAL_MOVING_AVERAGE_50",
    "EXPONENTIAL_MOVING_AVERAGE_100",
    "EXPONENTIAL_MOVING_AVERAGE_200",
    "SIMPLE_MOVING_AVERAGE_10",
    "SIMPLE_MOVING_AVERAGE_20",
    "SIMPLE_MOVING_AVERAGE_50",
    "SIMPLE_MOVING_AVERAGE_100",
    "SIMPLE_MOVING_AVERAGE_200",
    "HULL_MOVING_AVERAGE_9",
    "VOLUME_WEIGHTED_MOVING_AVERAGE_20",
    "BOLLINGER_UPPER_BAND_20",
    "BOLLINGER_LOWER_BAND_20",
    "KELTNER_CHANNELS_UPPER_BAND_20",
    "KELTNER_CHANNELS_LOWER_BAND_20",
    "DONCHIAN_CHANNELS_UPPER_BAND_20",
    "DONCHIAN_CHANNELS_LOWER_BAND_20",
    "VOLUME_WEIGHTED_AVERAGE_PRICE",
    "CHAIKINMONEYFLOW",
    "MONEYFLOW",
    "ICHIMOKU_BASE_LINE_9_26_52_26",
    "ICHIMOKU_CONVERSION_LINE_9_26_52_26",
    "ICHIMOKU_LEADING_SPAN_A_9_26_52_26",
    "ICHIMOKU_LEADING_SPAN_B_9_26_52_26",
    "PIVOT_CLASSIC_P",
    "PIVOT_CLASSIC_R1",
    "PIVOT_CLASSIC_R2",
    "PIVOT_CLASSIC_R3",
    "PIVOT_CLASSIC_S1",
    "PIVOT_CLASSIC_S2",
    "PIVOT_CLASSIC_S3",
    "PIVOT_FIBONACCI_P",
    "PIVOT_FIBONACCI_R1",
    "PIVOT_FIBONACCI_R2",
    "PIVOT_FIBONACCI_R3",
    "PIVOT_FIBONACCI_S1",
    "PIVOT_FIBONACCI_S2",
    "PIVOT_FIBONACCI_S3",
    "AVERAGE_TRUE_RANGE_14",
    "PARABOLIC_SAR",
];

const STOCK_OVERVIEW: &[&str] = &[
    "NAME",
    "DESCRIPTION",
    "EXCHANGE",
    "SECTOR",
    "INDUSTRY",
    "PRICE",
    "CHANGE_PERCENT",
    "VOLUME",
    "RELATIVE_VOLUME",
    "MARKET_CAPITALIZATION",
    "PRICE_TO_EARNINGS_RATIO_TTM",
    "DIVIDEND_YIELD_FWD",
    "TECHNICAL_RATING",
];

const FOREX_OVERVIEW: &[&str] = &[
    "NAME",
    "DESCRIPTION",
    "PRICE",
    "CHANGE_PERCENT",
    "CHANGE",
    "HIGH",
    "LOW",
    "BID",
    "ASK",
    "TECHNICAL_RATING",
];

/// Immutable, kind-tagged field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    name: &'static str,
    kind: ScreenerKind,
    fields: Vec<FieldRef>,
}

impl Preset {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn kind(&self) -> ScreenerKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldRef] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FieldRef> {
        self.fields
    }
}

/// Price basics plus the full technical panel bound to `interval`.
pub fn crypto_technicals(interval: Interval) -> Result<Preset, ScreenerError> {
    let catalog = FieldCatalog::builtin();
    let mut fields = resolve(catalog, &PRICE_BASICS)?;
    for key in TECHNICAL_PANEL {
        fields.push(catalog.field(key)?.at(interval)?);
    }
    Ok(Preset {
        name: "crypto-technicals",
        kind: ScreenerKind::Crypto,
        fields,
    })
}

pub fn stock_overview() -> Result<Preset, ScreenerError> {
    Ok(Preset {
        name: "stock-overview",
        kind: ScreenerKind::Stock,
        fields: resolve(FieldCatalog::builtin(), STOCK_OVERVIEW)?,
    })
}

pub fn forex_overview() -> Result<Preset, ScreenerError> {
    Ok(Preset {
        name: "forex-overview",
        kind: ScreenerKind::Forex,
        fields: resolve(FieldCatalog::builtin(), FOREX_OVERVIEW)?,
    })
}

fn resolve(catalog: &FieldCatalog, keys: &[&str]) -> Result<Vec<FieldRef>, ScreenerError> {
    keys.iter()
        .map(|key| catalog.field(key).map_err(ScreenerError::from))
        .collect()
}
