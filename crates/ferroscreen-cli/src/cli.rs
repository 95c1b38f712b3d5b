//! CLI argument definitions for ferroscreen.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scan` | Run a query once and print the result table |
//! | `watch` | Poll a query and print one table per line |
//! | `compile` | Print the request body without sending it |
//! | `fields` | Search and inspect the field catalog |
//!
//! # Examples
//!
//! ```bash
//! # Large caps above $50, biggest first
//! ferroscreen scan --kind stock --field NAME --field PRICE \
//!     --filter "PRICE > 50" --sort MARKET_CAPITALIZATION:desc --limit 20
//!
//! # Hourly technicals for BTC and ETH every five minutes
//! ferroscreen watch --kind crypto --preset crypto-technicals --interval 60 \
//!     --ticker BTC --ticker ETH --every 300
//!
//! # Which RSI fields exist?
//! ferroscreen fields search rsi
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ferroscreen_core::{Category, Interval, ScreenerKind, DEFAULT_PAGE_LIMIT};

#[derive(Debug, Parser)]
#[command(
    name = "ferroscreen",
    author,
    version,
    about = "Typed screener queries against the TradingView scanner"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// JSON client configuration file; environment variables override it.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Scanner base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Transport retries for throttled or failed requests.
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a query once.
    Scan(QueryArgs),
    /// Execute a query repeatedly (NDJSON output).
    Watch(WatchArgs),
    /// Compile a query and print the wire body.
    Compile(QueryArgs),
    /// Inspect the field catalog.
    Fields {
        #[command(subcommand)]
        command: FieldsCommand,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetName {
    CryptoTechnicals,
    StockOverview,
    ForexOverview,
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Screener kind: stock, forex, crypto, bond, futures or coin.
    #[arg(long, default_value = "stock")]
    pub kind: ScreenerKind,

    /// Start from a named field list.
    #[arg(long, value_enum)]
    pub preset: Option<PresetName>,

    /// Interval the crypto-technicals preset is bound to.
    #[arg(long, default_value = "60")]
    pub interval: Interval,

    /// Selected field as KEY or KEY@interval (repeatable).
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// Predicate as "KEY op value", e.g. "PRICE > 50" or "SECTOR in Finance,Energy".
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Explicit ticker; crypto shorthand like BTC expands to BINANCE:BTCUSDT.
    #[arg(long = "ticker")]
    pub tickers: Vec<String>,

    /// Market to scan (stock kind), e.g. america or germany.
    #[arg(long = "market")]
    pub markets: Vec<String>,

    /// Restrict to an exchange, e.g. NASDAQ.
    #[arg(long = "exchange")]
    pub exchanges: Vec<String>,

    /// Symbol type filter, e.g. stock or fund.
    #[arg(long = "symbol-type")]
    pub symbol_types: Vec<String>,

    /// Sort as KEY[@interval][:asc|desc]; descending by default.
    #[arg(long)]
    pub sort: Option<String>,

    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    pub limit: usize,

    #[arg(long, default_value_t = 0)]
    pub offset: usize,
}

#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Seconds between execution starts (minimum 1).
    #[arg(long, default_value_t = 60.0)]
    pub every: f64,

    /// Stop after this many tables.
    #[arg(long)]
    pub max_iterations: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum FieldsCommand {
    /// Case-insensitive search over keys and labels.
    Search {
        text: String,
        /// Only fields valid for this kind.
        #[arg(long)]
        kind: Option<ScreenerKind>,
    },
    /// List a category, e.g. oscillators or moving_averages.
    Category { tag: Category },
    /// Show one field descriptor.
    Show { key: String },
}
