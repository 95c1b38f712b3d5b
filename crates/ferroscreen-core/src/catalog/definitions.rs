//! Static field definitions for the built-in catalog.
//!
//! Single entries live in [`FIELDS`]. Families that only differ by a
//! parameter are expanded from their parameter lists: indicators over every
//! lookback length, statement lines over every reporting period, pivots over
//! every method, and candle patterns.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use super::{Category, FieldDescriptor, SemanticType};
use crate::domain::{Interval, KindSet};

use super::Category as C;
use super::SemanticType as T;

struct Def {
    key: &'static str,
    column: &'static str,
    label: &'static str,
    semantic_type: SemanticType,
    category: Category,
    kinds: KindSet,
    interval: bool,
}

const fn fixed(
    key: &'static str,
    column: &'static str,
    label: &'static str,
    semantic_type: SemanticType,
    category: Category,
    kinds: KindSet,
) -> Def {
    Def {
        key,
        column,
        label,
        semantic_type,
        category,
        kinds,
        interval: false,
    }
}

const fn timed(
    key: &'static str,
    column: &'static str,
    label: &'static str,
    semantic_type: SemanticType,
    category: Category,
    kinds: KindSet,
) -> Def {
    Def {
        key,
        column,
        label,
        semantic_type,
        category,
        kinds,
        interval: true,
    }
}

const ALL: KindSet = KindSet::ALL;
const MARKETS: KindSet = KindSet::MARKETS;
const PRICED: KindSet = KindSet::MARKETS.union(KindSet::BOND);
const STOCK: KindSet = KindSet::STOCK;
const CRYPTOS: KindSet = KindSet::CRYPTOS;
const FX_CRYPTO: KindSet = KindSet::FOREX.union(KindSet::CRYPTOS);
const BOND: KindSet = KindSet::BOND;
const FUTURES: KindSet = KindSet::FUTURES;

/// Every built-in field resolves daily unless bound otherwise.
const DEFAULT_INTERVAL: Interval = Interval::OneDay;

#[rustfmt::skip]
static FIELDS: &[Def] = &[
    // descriptive
    fixed("NAME", "name", "Name", T::Text, C::Descriptive, ALL),
    fixed("DESCRIPTION", "description", "Description", T::Text, C::Descriptive, ALL),
    fixed("LOGO_ID", "logoid", "Logo", T::Text, C::Descriptive, ALL),
    fixed("UPDATE_MODE", "update_mode", "Update Mode", T::Text, C::Descriptive, ALL),
    fixed("TYPE", "type", "Type", T::Enum, C::Descriptive, ALL),
    fixed("SUBTYPE", "subtype", "Subtype", T::Enum, C::Descriptive, ALL),
    fixed("EXCHANGE", "exchange", "Exchange", T::Enum, C::Descriptive, ALL),
    fixed("CURRENCY", "currency", "Currency", T::Enum, C::Descriptive, ALL),
    fixed("COUNTRY", "country", "Country", T::Enum, C::Descriptive, STOCK.union(BOND)),
    fixed("SECTOR", "sector", "Sector", T::Enum, C::Descriptive, STOCK),
    fixed("INDUSTRY", "industry", "Industry", T::Enum, C::Descriptive, STOCK),
    fixed("IS_PRIMARY", "is_primary", "Primary Listing", T::Boolean, C::Descriptive, STOCK),
    fixed("EMPLOYEES", "number_of_employees", "Number of Employees", T::Number, C::Descriptive, STOCK),
    fixed("PRICE_SCALE", "pricescale", "Price Scale", T::Number, C::Descriptive, ALL),
    fixed("MIN_MOVE", "minmov", "Minimum Movement", T::Number, C::Descriptive, ALL),

    // price
    timed("PRICE", "close", "Price", T::Number, C::Price, PRICED),
    timed("OPEN", "open", "Open", T::Number, C::Price, PRICED),
    timed("HIGH", "high", "High", T::Number, C::Price, PRICED),
    timed("LOW", "low", "Low", T::Number, C::Price, PRICED),
    timed("CHANGE_PERCENT", "change", "Change %", T::Percent, C::Price, PRICED),
    timed("CHANGE", "change_abs", "Change", T::Number, C::Price, PRICED),
    timed("CHANGE_FROM_OPEN_PERCENT", "change_from_open", "Change from Open %", T::Percent, C::Price, MARKETS),
    timed("GAP_PERCENT", "gap", "Gap %", T::Percent, C::Price, MARKETS),
    fixed("PREMARKET_CHANGE_PERCENT", "premarket_change", "Pre-market Change %", T::Percent, C::Price, STOCK),
    fixed("POSTMARKET_CHANGE_PERCENT", "postmarket_change", "Post-market Change %", T::Percent, C::Price, STOCK),
    fixed("ALL_TIME_HIGH", "all_time_high", "All Time High", T::Number, C::Price, MARKETS),
    fixed("ALL_TIME_LOW", "all_time_low", "All Time Low", T::Number, C::Price, MARKETS),
    fixed("HIGH_52_WEEK", "price_52_week_high", "52 Week High", T::Number, C::Price, MARKETS),
    fixed("LOW_52_WEEK", "price_52_week_low", "52 Week Low", T::Number, C::Price, MARKETS),
    fixed("LAST_UPDATE_TIME", "last_update_time", "Last Update Time", T::Timestamp, C::Price, ALL),

    // volume
    timed("VOLUME", "volume", "Volume", T::Number, C::Volume, MARKETS),
    fixed("AVERAGE_VOLUME_10D", "average_volume_10d_calc", "Average Volume (10 day)", T::Number, C::Volume, MARKETS),
    fixed("AVERAGE_VOLUME_30D", "average_volume_30d_calc", "Average Volume (30 day)", T::Number, C::Volume, MARKETS),
    fixed("AVERAGE_VOLUME_90D", "average_volume_90d_calc", "Average Volume (90 day)", T::Number, C::Volume, MARKETS),
    fixed("RELATIVE_VOLUME", "relative_volume_10d_calc", "Relative Volume", T::Number, C::Volume, MARKETS),
    timed("VOLUME_CHANGE_PERCENT", "volume_change", "Volume Change %", T::Percent, C::Volume, MARKETS),
    timed("VALUE_TRADED", "Value.Traded", "Volume*Price", T::Number, C::Volume, MARKETS),
    timed("VOLUME_WEIGHTED_AVERAGE_PRICE", "VWAP", "Volume Weighted Average Price", T::Number, C::Volume, MARKETS),
    timed("VOLUME_WEIGHTED_MOVING_AVERAGE_20", "VWMA", "Volume Weighted Moving Average (20)", T::Number, C::Volume, MARKETS),
    timed("CHAIKINMONEYFLOW", "ChaikinMoneyFlow", "Chaikinmoneyflow", T::Number, C::Volume, MARKETS),
    timed("MONEYFLOW", "MoneyFlow", "Moneyflow", T::Number, C::Volume, MARKETS),

    // performance
    fixed("PERF_1W", "Perf.W", "Weekly Performance", T::Percent, C::Performance, MARKETS),
    fixed("PERF_1M", "Perf.1M", "Monthly Performance", T::Percent, C::Performance, MARKETS),
    fixed("PERF_3M", "Perf.3M", "3-Month Performance", T::Percent, C::Performance, MARKETS),
    fixed("PERF_6M", "Perf.6M", "6-Month Performance", T::Percent, C::Performance, MARKETS),
    fixed("PERF_YTD", "Perf.YTD", "YTD Performance", T::Percent, C::Performance, MARKETS),
    fixed("PERF_1Y", "Perf.Y", "Yearly Performance", T::Percent, C::Performance, MARKETS),
    fixed("PERF_5Y", "Perf.5Y", "5 Year Performance", T::Percent, C::Performance, STOCK),
    fixed("PERF_ALL", "Perf.All", "All Time Performance", T::Percent, C::Performance, MARKETS),

    // valuation
    fixed("MARKET_CAPITALIZATION", "market_cap_basic", "Market Capitalization", T::Number, C::Valuation, STOCK),
    fixed("ENTERPRISE_VALUE", "enterprise_value_fq", "Enterprise Value", T::Number, C::Valuation, STOCK),
    fixed("PRICE_TO_EARNINGS_RATIO_TTM", "price_earnings_ttm", "Price to Earnings Ratio (TTM)", T::Number, C::Valuation, STOCK),
    fixed("PRICE_TO_BOOK_FY", "price_book_ratio", "Price to Book (FY)", T::Number, C::Valuation, STOCK),
    fixed("PRICE_TO_SALES_FY", "price_sales_ratio", "Price to Sales (FY)", T::Number, C::Valuation, STOCK),
    fixed("PRICE_TO_FREE_CASH_FLOW_TTM", "price_free_cash_flow_ttm", "Price to Free Cash Flow (TTM)", T::Number, C::Valuation, STOCK),
    fixed("EV_TO_EBITDA_TTM", "enterprise_value_ebitda_ttm", "Enterprise Value/EBITDA (TTM)", T::Number, C::Valuation, STOCK),
    fixed("BASIC_EPS_TTM", "earnings_per_share_basic_ttm", "Basic EPS (TTM)", T::Number, C::Valuation, STOCK),
    fixed("DILUTED_EPS_TTM", "earnings_per_share_diluted_ttm", "EPS Diluted (TTM)", T::Number, C::Valuation, STOCK),
    fixed("EPS_GROWTH_TTM_YOY", "earnings_per_share_diluted_yoy_growth_ttm", "EPS Diluted Growth (TTM YoY)", T::Percent, C::Valuation, STOCK),
    fixed("EARNINGS_RELEASE_DATE", "earnings_release_date", "Recent Earnings Date", T::Timestamp, C::Valuation, STOCK),
    fixed("EARNINGS_RELEASE_NEXT_DATE", "earnings_release_next_date", "Upcoming Earnings Date", T::Timestamp, C::Valuation, STOCK),

    // dividends
    fixed("DIVIDEND_YIELD_FWD", "dividend_yield_recent", "Dividend Yield Forward", T::Percent, C::Dividends, STOCK),
    fixed("DIVIDENDS_PER_SHARE_FY", "dps_common_stock_prim_issue_fy", "Dividends per Share (FY)", T::Number, C::Dividends, STOCK),
    fixed("DIVIDEND_PAYOUT_RATIO_TTM", "dividend_payout_ratio_ttm", "Dividend Payout Ratio (TTM)", T::Percent, C::Dividends, STOCK),
    fixed("EX_DIVIDEND_DATE", "ex_dividend_date_recent", "Ex-Dividend Date", T::Timestamp, C::Dividends, STOCK),

    // profitability
    fixed("GROSS_MARGIN_TTM", "gross_margin", "Gross Margin (TTM)", T::Percent, C::Profitability, STOCK),
    fixed("OPERATING_MARGIN_TTM", "operating_margin", "Operating Margin (TTM)", T::Percent, C::Profitability, STOCK),
    fixed("NET_MARGIN_TTM", "net_margin", "Net Margin (TTM)", T::Percent, C::Profitability, STOCK),
    fixed("RETURN_ON_ASSETS_TTM", "return_on_assets", "Return on Assets (TTM)", T::Percent, C::Profitability, STOCK),
    fixed("RETURN_ON_EQUITY_TTM", "return_on_equity", "Return on Equity (TTM)", T::Percent, C::Profitability, STOCK),
    fixed("RETURN_ON_INVESTED_CAPITAL_TTM", "return_on_invested_capital", "Return on Invested Capital (TTM)", T::Percent, C::Profitability, STOCK),

    // balance sheet
    fixed("TOTAL_ASSETS_FQ", "total_assets", "Total Assets (MRQ)", T::Number, C::BalanceSheet, STOCK),
    fixed("TOTAL_DEBT_FQ", "total_debt", "Total Debt (MRQ)", T::Number, C::BalanceSheet, STOCK),
    fixed("DEBT_TO_EQUITY_FQ", "debt_to_equity", "Debt to Equity Ratio (MRQ)", T::Number, C::BalanceSheet, STOCK),
    fixed("CURRENT_RATIO_FQ", "current_ratio", "Current Ratio (MRQ)", T::Number, C::BalanceSheet, STOCK),
    fixed("QUICK_RATIO_FQ", "quick_ratio", "Quick Ratio (MRQ)", T::Number, C::BalanceSheet, STOCK),
    fixed("CASH_AND_EQUIVALENTS_FQ", "cash_n_equivalents_fq", "Cash & Equivalents (MRQ)", T::Number, C::BalanceSheet, STOCK),

    // income
    fixed("TOTAL_REVENUE_TTM", "total_revenue", "Total Revenue (TTM)", T::Number, C::Income, STOCK),
    fixed("REVENUE_GROWTH_TTM_YOY", "total_revenue_yoy_growth_ttm", "Revenue Growth (TTM YoY)", T::Percent, C::Income, STOCK),
    fixed("GROSS_PROFIT_TTM", "gross_profit", "Gross Profit (TTM)", T::Number, C::Income, STOCK),
    fixed("NET_INCOME_TTM", "net_income", "Net Income (TTM)", T::Number, C::Income, STOCK),
    fixed("EBITDA_TTM", "ebitda", "EBITDA (TTM)", T::Number, C::Income, STOCK),
    fixed("FREE_CASH_FLOW_TTM", "free_cash_flow", "Free Cash Flow (TTM)", T::Number, C::Income, STOCK),

    // ratings
    timed("TECHNICAL_RATING", "Recommend.All", "Technical Rating", T::Number, C::Ratings, MARKETS),
    timed("MOVING_AVERAGES_RATING", "Recommend.MA", "Moving Averages Rating", T::Number, C::Ratings, MARKETS),
    timed("OSCILLATORS_RATING", "Recommend.Other", "Oscillators Rating", T::Number, C::Ratings, MARKETS),
    fixed("ANALYST_RATING", "recommendation_mark", "Analyst Rating", T::Number, C::Ratings, STOCK),

    // oscillators
    timed("RELATIVE_STRENGTH_INDEX_14", "RSI", "Relative Strength Index (14)", T::Number, C::Oscillators, MARKETS),
    timed("RELATIVE_STRENGTH_INDEX_7", "RSI7", "Relative Strength Index (7)", T::Number, C::Oscillators, MARKETS),
    timed("STOCHASTIC_PERCENTK_14_3_3", "Stoch.K", "Stochastic %K (14, 3, 3)", T::Number, C::Oscillators, MARKETS),
    timed("STOCHASTIC_PERCENTD_14_3_3", "Stoch.D", "Stochastic %D (14, 3, 3)", T::Number, C::Oscillators, MARKETS),
    timed("STOCHASTIC_RSI_FAST_3_3_14_14", "Stoch.RSI.K", "Stochastic RSI Fast (3, 3, 14, 14)", T::Number, C::Oscillators, MARKETS),
    timed("STOCHASTIC_RSI_SLOW_3_3_14_14", "Stoch.RSI.D", "Stochastic RSI Slow (3, 3, 14, 14)", T::Number, C::Oscillators, MARKETS),
    timed("MACD_LEVEL_12_26", "MACD.macd", "MACD Level (12, 26)", T::Number, C::Oscillators, MARKETS),
    timed("MACD_SIGNAL_12_26", "MACD.signal", "MACD Signal (12, 26)", T::Number, C::Oscillators, MARKETS),
    timed("MACD_HIST", "MACD.hist", "MACD Hist", T::Number, C::Oscillators, MARKETS),
    timed("COMMODITY_CHANNEL_INDEX_20", "CCI20", "Commodity Channel Index (20)", T::Number, C::Oscillators, MARKETS),
    timed("AVERAGE_DIRECTIONAL_INDEX_14", "ADX", "Average Directional Index (14)", T::Number, C::Oscillators, MARKETS),
    timed("POSITIVE_DIRECTIONAL_INDICATOR_14", "ADX+DI", "Positive Directional Indicator (14)", T::Number, C::Oscillators, MARKETS),
    timed("NEGATIVE_DIRECTIONAL_INDICATOR_14", "ADX-DI", "Negative Directional Indicator (14)", T::Number, C::Oscillators, MARKETS),
    timed("AWESOME_OSCILLATOR", "AO", "Awesome Oscillator", T::Number, C::Oscillators, MARKETS),
    timed("MOMENTUM_10", "Mom", "Momentum (10)", T::Number, C::Oscillators, MARKETS),
    timed("WILLIAMS_PERCENT_RANGE_14", "W.R", "Williams Percent Range (14)", T::Number, C::Oscillators, MARKETS),
    timed("ULTIMATE_OSCILLATOR_7_14_28", "UO", "Ultimate Oscillator (7, 14, 28)", T::Number, C::Oscillators, MARKETS),
    timed("AROON_UP_14", "Aroon.Up", "Aroon Up (14)", T::Number, C::Oscillators, MARKETS),
    timed("AROON_DOWN_14", "Aroon.Down", "Aroon Down (14)", T::Number, C::Oscillators, MARKETS),
    timed("BULL_BEAR_POWER", "BBPower", "Bull Bear Power", T::Number, C::Oscillators, MARKETS),
    timed("RATE_OF_CHANGE_9", "ROC", "Rate Of Change (9)", T::Number, C::Oscillators, MARKETS),

    // moving averages outside the EMA/SMA families
    timed("HULL_MOVING_AVERAGE_9", "HullMA9", "Hull Moving Average (9)", T::Number, C::MovingAverages, MARKETS),

    // bands and channels
    timed("BOLLINGER_UPPER_BAND_20", "BB.upper", "Bollinger Upper Band (20)", T::Number, C::BandsChannels, MARKETS),
    timed("BOLLINGER_LOWER_BAND_20", "BB.lower", "Bollinger Lower Band (20)", T::Number, C::BandsChannels, MARKETS),
    timed("KELTNER_CHANNELS_UPPER_BAND_20", "KltChnl.upper", "Keltner Channels Upper Band (20)", T::Number, C::BandsChannels, MARKETS),
    timed("KELTNER_CHANNELS_LOWER_BAND_20", "KltChnl.lower", "Keltner Channels Lower Band (20)", T::Number, C::BandsChannels, MARKETS),
    timed("DONCHIAN_CHANNELS_UPPER_BAND_20", "DonchCh20.Upper", "Donchian Channels Upper Band (20)", T::Number, C::BandsChannels, MARKETS),
    timed("DONCHIAN_CHANNELS_LOWER_BAND_20", "DonchCh20.Lower", "Donchian Channels Lower Band (20)", T::Number, C::BandsChannels, MARKETS),

    // volatility
    timed("AVERAGE_TRUE_RANGE_14", "ATR", "Average True Range (14)", T::Number, C::Volatility, MARKETS),
    timed("AVERAGE_DAY_RANGE_14", "ADR", "Average Day Range (14)", T::Number, C::Volatility, MARKETS),
    timed("PARABOLIC_SAR", "P.SAR", "Parabolic SAR", T::Number, C::Volatility, MARKETS),
    timed("VOLATILITY", "Volatility.D", "Volatility", T::Percent, C::Volatility, MARKETS),
    fixed("BETA_1_YEAR", "beta_1_year", "1-Year Beta", T::Number, C::Volatility, STOCK),

    // ichimoku
    timed("ICHIMOKU_BASE_LINE_9_26_52_26", "Ichimoku.BLine", "Ichimoku Base Line (9, 26, 52, 26)", T::Number, C::Ichimoku, MARKETS),
    timed("ICHIMOKU_CONVERSION_LINE_9_26_52_26", "Ichimoku.CLine", "Ichimoku Conversion Line (9, 26, 52, 26)", T::Number, C::Ichimoku, MARKETS),
    timed("ICHIMOKU_LEADING_SPAN_A_9_26_52_26", "Ichimoku.Lead1", "Ichimoku Leading Span A (9, 26, 52, 26)", T::Number, C::Ichimoku, MARKETS),
    timed("ICHIMOKU_LEADING_SPAN_B_9_26_52_26", "Ichimoku.Lead2", "Ichimoku Leading Span B (9, 26, 52, 26)", T::Number, C::Ichimoku, MARKETS),

    // forex and crypto pairs
    fixed("BID", "bid", "Bid", T::Number, C::Forex, FX_CRYPTO),
    fixed("ASK", "ask", "Ask", T::Number, C::Forex, FX_CRYPTO),
    fixed("BASE_CURRENCY", "base_currency", "Base Currency", T::Enum, C::Forex, FX_CRYPTO),
    fixed("CURRENCY_PAIR_TYPE", "forex_type", "Currency Pair Type", T::Enum, C::Forex, KindSet::FOREX),

    // crypto
    fixed("MARKET_CAP_CRYPTO", "market_cap_calc", "Market Capitalization", T::Number, C::Crypto, CRYPTOS),
    fixed("CIRCULATING_SUPPLY", "circulating_supply", "Circulating Supply", T::Number, C::Crypto, CRYPTOS),
    fixed("TOTAL_SUPPLY", "total_supply", "Total Supply", T::Number, C::Crypto, CRYPTOS),
    fixed("MAX_SUPPLY", "max_supply", "Max Supply", T::Number, C::Crypto, CRYPTOS),
    fixed("FULLY_DILUTED_MARKET_CAP", "fully_diluted_market_cap", "Fully Diluted Market Cap", T::Number, C::Crypto, KindSet::COIN),
    fixed("VOLUME_24H_USD", "24h_vol_cmc", "Volume 24h in USD", T::Number, C::Crypto, KindSet::COIN),
    fixed("VOLUME_24H_CHANGE_PERCENT", "24h_vol_change_cmc", "Volume 24h Change %", T::Percent, C::Crypto, KindSet::COIN),
    fixed("CRYPTO_RANK", "crypto_total_rank", "Rank", T::Number, C::Crypto, KindSet::COIN),
    fixed("CRYPTO_CATEGORY", "crypto_common_categories", "Category", T::Enum, C::Crypto, KindSet::COIN),

    // bonds
    fixed("ISSUER", "issuer", "Issuer", T::Text, C::Bond, BOND),
    fixed("COUPON", "coupon", "Coupon", T::Percent, C::Bond, BOND),
    fixed("YIELD_TO_MATURITY", "yield_to_maturity", "Yield to Maturity", T::Percent, C::Bond, BOND),
    fixed("MATURITY_DATE", "maturity_date", "Maturity Date", T::Timestamp, C::Bond, BOND),
    fixed("FACE_VALUE", "face_value", "Face Value", T::Number, C::Bond, BOND),
    fixed("DURATION", "duration", "Duration", T::Number, C::Bond, BOND),
    fixed("CREDIT_RATING", "credit_rating", "Credit Rating", T::Enum, C::Bond, BOND),

    // futures
    fixed("OPEN_INTEREST", "open_interest", "Open Interest", T::Number, C::Futures, FUTURES),
    fixed("EXPIRATION_DATE", "expiration", "Expiration Date", T::Timestamp, C::Futures, FUTURES),
    fixed("ROOT_SYMBOL", "root", "Root", T::Text, C::Futures, FUTURES),
    fixed("CONTINUOUS", "is_continuous", "Continuous Contract", T::Boolean, C::Futures, FUTURES),
];

/// Indicator whose only parameter is its lookback length. `{n}` in the
/// column template is replaced by the length.
struct Family {
    key: &'static str,
    column: &'static str,
    label: &'static str,
    semantic_type: SemanticType,
    category: Category,
}

const fn family(
    key: &'static str,
    column: &'static str,
    label: &'static str,
    semantic_type: SemanticType,
    category: Category,
) -> Family {
    Family {
        key,
        column,
        label,
        semantic_type,
        category,
    }
}

/// Two bars up to one year of daily bars.
const INDICATOR_LENGTHS: RangeInclusive<u16> = 2..=365;

#[rustfmt::skip]
static LENGTH_FAMILIES: &[Family] = &[
    // moving averages
    family("EXPONENTIAL_MOVING_AVERAGE", "EMA{n}", "Exponential Moving Average", T::Number, C::MovingAverages),
    family("SIMPLE_MOVING_AVERAGE", "SMA{n}", "Simple Moving Average", T::Number, C::MovingAverages),
    family("WEIGHTED_MOVING_AVERAGE", "WMA{n}", "Weighted Moving Average", T::Number, C::MovingAverages),
    family("HULL_MOVING_AVERAGE", "HullMA{n}", "Hull Moving Average", T::Number, C::MovingAverages),
    family("VOLUME_WEIGHTED_MOVING_AVERAGE", "VWMA{n}", "Volume Weighted Moving Average", T::Number, C::MovingAverages),
    family("DOUBLE_EXPONENTIAL_MOVING_AVERAGE", "DEMA{n}", "Double Exponential Moving Average", T::Number, C::MovingAverages),
    family("TRIPLE_EXPONENTIAL_MOVING_AVERAGE", "TEMA{n}", "Triple Exponential Moving Average", T::Number, C::MovingAverages),

    // oscillators
    family("RELATIVE_STRENGTH_INDEX", "RSI{n}", "Relative Strength Index", T::Number, C::Oscillators),
    family("COMMODITY_CHANNEL_INDEX", "CCI{n}", "Commodity Channel Index", T::Number, C::Oscillators),
    family("MOMENTUM", "Mom{n}", "Momentum", T::Number, C::Oscillators),
    family("RATE_OF_CHANGE", "ROC{n}", "Rate Of Change", T::Number, C::Oscillators),
    family("WILLIAMS_PERCENT_RANGE", "W.R{n}", "Williams Percent Range", T::Number, C::Oscillators),
    family("AVERAGE_DIRECTIONAL_INDEX", "ADX{n}", "Average Directional Index", T::Number, C::Oscillators),
    family("POSITIVE_DIRECTIONAL_INDICATOR", "ADX+DI{n}", "Positive Directional Indicator", T::Number, C::Oscillators),
    family("NEGATIVE_DIRECTIONAL_INDICATOR", "ADX-DI{n}", "Negative Directional Indicator", T::Number, C::Oscillators),
    family("AROON_UP", "Aroon.Up{n}", "Aroon Up", T::Number, C::Oscillators),
    family("AROON_DOWN", "Aroon.Down{n}", "Aroon Down", T::Number, C::Oscillators),
    family("CHANDE_MOMENTUM_OSCILLATOR", "CMO{n}", "Chande Momentum Oscillator", T::Number, C::Oscillators),
    family("STOCHASTIC_PERCENTK", "Stoch.K{n}", "Stochastic %K", T::Number, C::Oscillators),

    // volume
    family("MONEY_FLOW_INDEX", "MFI{n}", "Money Flow Index", T::Number, C::Volume),
    family("CHAIKIN_MONEY_FLOW", "CMF{n}", "Chaikin Money Flow", T::Number, C::Volume),

    // volatility
    family("AVERAGE_TRUE_RANGE", "ATR{n}", "Average True Range", T::Number, C::Volatility),
    family("AVERAGE_DAY_RANGE", "ADR{n}", "Average Day Range", T::Number, C::Volatility),
    family("STANDARD_DEVIATION", "StdDev{n}", "Standard Deviation", T::Number, C::Volatility),
    family("HISTORICAL_VOLATILITY", "HV{n}", "Historical Volatility", T::Percent, C::Volatility),

    // bands and channels
    family("BOLLINGER_UPPER_BAND", "BB{n}.upper", "Bollinger Upper Band", T::Number, C::BandsChannels),
    family("BOLLINGER_LOWER_BAND", "BB{n}.lower", "Bollinger Lower Band", T::Number, C::BandsChannels),
    family("BOLLINGER_BASIS", "BB{n}.basis", "Bollinger Basis", T::Number, C::BandsChannels),
    family("KELTNER_CHANNELS_UPPER_BAND", "KltChnl{n}.upper", "Keltner Channels Upper Band", T::Number, C::BandsChannels),
    family("KELTNER_CHANNELS_LOWER_BAND", "KltChnl{n}.lower", "Keltner Channels Lower Band", T::Number, C::BandsChannels),
    family("DONCHIAN_CHANNELS_UPPER_BAND", "DonchCh{n}.Upper", "Donchian Channels Upper Band", T::Number, C::BandsChannels),
    family("DONCHIAN_CHANNELS_LOWER_BAND", "DonchCh{n}.Lower", "Donchian Channels Lower Band", T::Number, C::BandsChannels),
];

/// Reported statement line, expanded over every reporting period.
struct Fundamental {
    key: &'static str,
    column: &'static str,
    label: &'static str,
    semantic_type: SemanticType,
    category: Category,
    growth: bool,
}

const fn amount(key: &'static str, column: &'static str, label: &'static str, category: Category) -> Fundamental {
    Fundamental {
        key,
        column,
        label,
        semantic_type: SemanticType::Number,
        category,
        growth: true,
    }
}

const fn ratio(
    key: &'static str,
    column: &'static str,
    label: &'static str,
    semantic_type: SemanticType,
    category: Category,
) -> Fundamental {
    Fundamental {
        key,
        column,
        label,
        semantic_type,
        category,
        growth: false,
    }
}

#[rustfmt::skip]
static FUNDAMENTALS: &[Fundamental] = &[
    // income statement
    amount("TOTAL_REVENUE", "total_revenue", "Total Revenue", C::Income),
    amount("COST_OF_GOODS", "cost_of_goods", "Cost of Goods Sold", C::Income),
    amount("GROSS_PROFIT", "gross_profit", "Gross Profit", C::Income),
    amount("RESEARCH_AND_DEVELOPMENT", "research_and_dev", "Research & Development", C::Income),
    amount("SELLING_GENERAL_ADMIN", "sell_gen_admin_exp_total", "Selling, General & Admin Expenses", C::Income),
    amount("OPERATING_INCOME", "oper_income", "Operating Income", C::Income),
    amount("INTEREST_EXPENSE", "interest_expense", "Interest Expense", C::Income),
    amount("PRETAX_INCOME", "pretax_income", "Pretax Income", C::Income),
    amount("INCOME_TAX", "income_tax", "Income Tax", C::Income),
    amount("NET_INCOME", "net_income", "Net Income", C::Income),
    amount("EBIT", "ebit", "EBIT", C::Income),
    amount("EBITDA", "ebitda", "EBITDA", C::Income),
    amount("BASIC_EPS", "earnings_per_share_basic", "Basic EPS", C::Valuation),
    amount("DILUTED_EPS", "earnings_per_share_diluted", "Diluted EPS", C::Valuation),

    // cash flow
    amount("OPERATING_CASH_FLOW", "cash_f_operating_activities", "Cash from Operating Activities", C::Income),
    amount("INVESTING_CASH_FLOW", "cash_f_investing_activities", "Cash from Investing Activities", C::Income),
    amount("FINANCING_CASH_FLOW", "cash_f_financing_activities", "Cash from Financing Activities", C::Income),
    amount("CAPITAL_EXPENDITURES", "capital_expenditures", "Capital Expenditures", C::Income),
    amount("FREE_CASH_FLOW", "free_cash_flow", "Free Cash Flow", C::Income),

    // balance sheet
    amount("TOTAL_ASSETS", "total_assets", "Total Assets", C::BalanceSheet),
    amount("TOTAL_CURRENT_ASSETS", "total_current_assets", "Total Current Assets", C::BalanceSheet),
    amount("TOTAL_LIABILITIES", "total_liabilities", "Total Liabilities", C::BalanceSheet),
    amount("TOTAL_CURRENT_LIABILITIES", "total_current_liabilities", "Total Current Liabilities", C::BalanceSheet),
    amount("TOTAL_EQUITY", "total_equity", "Total Equity", C::BalanceSheet),
    amount("TOTAL_DEBT", "total_debt", "Total Debt", C::BalanceSheet),
    amount("NET_DEBT", "net_debt", "Net Debt", C::BalanceSheet),
    amount("CASH_AND_SHORT_TERM_INVESTMENTS", "cash_n_short_term_invest", "Cash & Short Term Investments", C::BalanceSheet),
    amount("GOODWILL", "goodwill", "Goodwill", C::BalanceSheet),
    amount("TOTAL_INVENTORY", "total_inventory", "Total Inventory", C::BalanceSheet),
    amount("TOTAL_RECEIVABLES", "total_receivables_net", "Total Receivables", C::BalanceSheet),
    amount("BOOK_VALUE_PER_SHARE", "book_value_per_share", "Book Value per Share", C::BalanceSheet),
    amount("SHARES_OUTSTANDING", "total_shares_outstanding", "Total Shares Outstanding", C::BalanceSheet),

    // dividends
    amount("DIVIDENDS_PAID", "dividends_paid", "Dividends Paid", C::Dividends),
    amount("DIVIDENDS_PER_SHARE", "dps_common_stock_prim_issue", "Dividends per Share", C::Dividends),
    ratio("DIVIDEND_PAYOUT_RATIO", "dividend_payout_ratio", "Dividend Payout Ratio", T::Percent, C::Dividends),

    // ratios
    ratio("GROSS_MARGIN", "gross_margin", "Gross Margin", T::Percent, C::Profitability),
    ratio("OPERATING_MARGIN", "operating_margin", "Operating Margin", T::Percent, C::Profitability),
    ratio("NET_MARGIN", "net_margin", "Net Margin", T::Percent, C::Profitability),
    ratio("RETURN_ON_ASSETS", "return_on_assets", "Return on Assets", T::Percent, C::Profitability),
    ratio("RETURN_ON_EQUITY", "return_on_equity", "Return on Equity", T::Percent, C::Profitability),
    ratio("RETURN_ON_INVESTED_CAPITAL", "return_on_invested_capital", "Return on Invested Capital", T::Percent, C::Profitability),
    ratio("DEBT_TO_EQUITY", "debt_to_equity", "Debt to Equity Ratio", T::Number, C::BalanceSheet),
    ratio("CURRENT_RATIO", "current_ratio", "Current Ratio", T::Number, C::BalanceSheet),
    ratio("QUICK_RATIO", "quick_ratio", "Quick Ratio", T::Number, C::BalanceSheet),
    ratio("PRICE_TO_EARNINGS_RATIO", "price_earnings", "Price to Earnings Ratio", T::Number, C::Valuation),
    ratio("PRICE_TO_BOOK", "price_book", "Price to Book", T::Number, C::Valuation),
    ratio("PRICE_TO_SALES", "price_sales", "Price to Sales", T::Number, C::Valuation),
    ratio("EV_TO_EBITDA", "enterprise_value_ebitda", "Enterprise Value/EBITDA", T::Number, C::Valuation),
];

/// Key suffix, column suffix and label of each reporting period.
const REPORTING_PERIODS: [(&str, &str, &str); 4] = [
    ("FQ", "fq", "MRQ"),
    ("FH", "fh", "Semi-Annual"),
    ("FY", "fy", "FY"),
    ("TTM", "ttm", "TTM"),
];

const PIVOT_METHODS: [(&str, &str); 5] = [
    ("CLASSIC", "Classic"),
    ("FIBONACCI", "Fibonacci"),
    ("CAMARILLA", "Camarilla"),
    ("WOODIE", "Woodie"),
    ("DEMARK", "Demark"),
];

const PIVOT_LEVELS: [(&str, &str); 7] = [
    ("P", "Middle"),
    ("R1", "R1"),
    ("R2", "R2"),
    ("R3", "R3"),
    ("S1", "S1"),
    ("S2", "S2"),
    ("S3", "S3"),
];

const CANDLE_PATTERNS: [(&str, &str, &str); 12] = [
    ("DOJI", "Doji", "Doji"),
    ("DOJI_DRAGONFLY", "Doji.Dragonfly", "Dragonfly Doji"),
    ("DOJI_GRAVESTONE", "Doji.Gravestone", "Gravestone Doji"),
    ("ENGULFING_BULLISH", "Engulfing.Bullish", "Bullish Engulfing"),
    ("ENGULFING_BEARISH", "Engulfing.Bearish", "Bearish Engulfing"),
    ("HAMMER", "Hammer", "Hammer"),
    ("HANGING_MAN", "HangingMan", "Hanging Man"),
    ("SHOOTING_STAR", "ShootingStar", "Shooting Star"),
    ("MORNING_STAR", "MorningStar", "Morning Star"),
    ("EVENING_STAR", "EveningStar", "Evening Star"),
    ("THREE_WHITE_SOLDIERS", "3WhiteSoldiers", "Three White Soldiers"),
    ("THREE_BLACK_CROWS", "3BlackCrows", "Three Black Crows"),
];

/// Hand-written entries come first; a generated family member whose key or
/// column is already taken is skipped.
pub(super) fn builtin_descriptors() -> Vec<FieldDescriptor> {
    let mut keys = HashSet::new();
    let mut columns = HashSet::new();
    FIELDS
        .iter()
        .map(from_def)
        .chain(length_families())
        .chain(fundamentals())
        .chain(pivots())
        .chain(candle_patterns())
        .filter(|descriptor| {
            let new_key = keys.insert(descriptor.key().to_owned());
            let new_column = columns.insert(descriptor.column().to_owned());
            new_key && new_column
        })
        .collect()
}

fn from_def(def: &Def) -> FieldDescriptor {
    let descriptor = FieldDescriptor::new(
        def.key,
        def.column,
        def.label,
        def.semantic_type,
        def.category,
        def.kinds,
    );
    if def.interval {
        descriptor.with_default_interval(DEFAULT_INTERVAL)
    } else {
        descriptor
    }
}

fn length_families() -> impl Iterator<Item = FieldDescriptor> {
    LENGTH_FAMILIES.iter().flat_map(|family| {
        INDICATOR_LENGTHS.map(move |length| {
            FieldDescriptor::new(
                format!("{}_{length}", family.key),
                family.column.replace("{n}", &length.to_string()),
                format!("{} ({length})", family.label),
                family.semantic_type,
                family.category,
                MARKETS,
            )
            .with_default_interval(DEFAULT_INTERVAL)
        })
    })
}

fn fundamentals() -> impl Iterator<Item = FieldDescriptor> {
    FUNDAMENTALS.iter().flat_map(|metric| {
        REPORTING_PERIODS
            .into_iter()
            .flat_map(move |(period, suffix, period_label)| {
                let value = FieldDescriptor::new(
                    format!("{}_{period}", metric.key),
                    format!("{}_{suffix}", metric.column),
                    format!("{} ({period_label})", metric.label),
                    metric.semantic_type,
                    metric.category,
                    STOCK,
                );
                let yearly = metric.growth.then(|| {
                    FieldDescriptor::new(
                        format!("{}_YOY_GROWTH_{period}", metric.key),
                        format!("{}_yoy_growth_{suffix}", metric.column),
                        format!("{} Growth ({period_label} YoY)", metric.label),
                        SemanticType::Percent,
                        metric.category,
                        STOCK,
                    )
                });
                // Only quarterly figures have a sequential comparison.
                let quarterly = (metric.growth && period == "FQ").then(|| {
                    FieldDescriptor::new(
                        format!("{}_QOQ_GROWTH_{period}", metric.key),
                        format!("{}_qoq_growth_{suffix}", metric.column),
                        format!("{} Growth ({period_label} QoQ)", metric.label),
                        SemanticType::Percent,
                        metric.category,
                        STOCK,
                    )
                });
                std::iter::once(value).chain(yearly).chain(quarterly)
            })
    })
}

fn pivots() -> impl Iterator<Item = FieldDescriptor> {
    PIVOT_METHODS
        .into_iter()
        .flat_map(|(method_key, method_name)| {
            PIVOT_LEVELS
                .into_iter()
                // DeMark pivots only define the middle and first levels.
                .filter(move |(level, _)| {
                    method_key != "DEMARK" || matches!(*level, "P" | "R1" | "S1")
                })
                .map(move |(level, column_level)| {
                    FieldDescriptor::new(
                        format!("PIVOT_{method_key}_{level}"),
                        format!("Pivot.M.{method_name}.{column_level}"),
                        format!("Pivot {method_name} {level}"),
                        SemanticType::Number,
                        Category::Pivots,
                        MARKETS,
                    )
                    .with_default_interval(DEFAULT_INTERVAL)
                })
        })
}

fn candle_patterns() -> impl Iterator<Item = FieldDescriptor> {
    CANDLE_PATTERNS.into_iter().map(|(key, column, label)| {
        FieldDescriptor::new(
            format!("CANDLE_{key}"),
            format!("Candle.{column}"),
            format!("Candle {label}"),
            SemanticType::Boolean,
            Category::Patterns,
            MARKETS,
        )
        .with_default_interval(DEFAULT_INTERVAL)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn keys_are_unique() {
        let descriptors = builtin_descriptors();
        let mut seen = HashSet::new();
        for descriptor in &descriptors {
            assert!(seen.insert(descriptor.key().to_owned()), "{}", descriptor.key());
        }
    }

    #[test]
    fn every_field_is_valid_for_some_kind() {
        for descriptor in builtin_descriptors() {
            assert!(!descriptor.allowed_kinds().is_empty(), "{}", descriptor.key());
        }
    }

    #[test]
    fn columns_are_unique() {
        let descriptors = builtin_descriptors();
        let mut seen = HashSet::new();
        for descriptor in &descriptors {
            assert!(seen.insert(descriptor.column().to_owned()), "{}", descriptor.column());
        }
    }

    #[test]
    fn families_expand_to_expected_columns() {
        let descriptors = builtin_descriptors();
        let columns: HashSet<&str> = descriptors.iter().map(|d| d.column()).collect();
        for column in [
            "EMA200",
            "SMA10",
            "WMA365",
            "ATR2",
            "DonchCh55.Upper",
            "total_revenue_fq",
            "total_revenue_qoq_growth_fq",
            "net_income_yoy_growth_fy",
            "Pivot.M.Fibonacci.S3",
            "Pivot.M.Demark.Middle",
            "Candle.3BlackCrows",
        ] {
            assert!(columns.contains(column), "{column}");
        }
        assert!(!columns.contains("Pivot.M.Demark.R3"));
        assert!(!columns.contains("net_margin_yoy_growth_fy"));
        assert!(!columns.contains("total_revenue_qoq_growth_fy"));
    }

    #[test]
    fn hand_written_entries_win_over_generated_members() {
        let descriptors = builtin_descriptors();
        let rsi = descriptors
            .iter()
            .find(|d| d.key() == "RELATIVE_STRENGTH_INDEX_14")
            .expect("rsi");
        assert_eq!(rsi.column(), "RSI");
        assert!(!descriptors.iter().any(|d| d.column() == "RSI14"));

        let revenue = descriptors
            .iter()
            .find(|d| d.key() == "TOTAL_REVENUE_TTM")
            .expect("revenue");
        assert_eq!(revenue.column(), "total_revenue");
        let keys: HashSet<&str> = descriptors.iter().map(|d| d.key()).collect();
        assert!(FIELDS.iter().all(|def| keys.contains(def.key)));
    }
}
