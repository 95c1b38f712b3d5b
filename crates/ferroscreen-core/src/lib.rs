//! # Ferroscreen Core
//!
//! Typed field catalog, filter compiler and polling session for the
//! TradingView scanner API.
//!
//! ## Overview
//!
//! - **Field catalog**: immutable registry of typed, optionally
//!   interval-parameterized fields, shared process-wide
//! - **Field references and predicates**: pure builders, nothing is evaluated
//!   locally
//! - **Compiler**: validates kind safety, operand types and paging, then
//!   serializes a deterministic wire body
//! - **Session**: single-flight executor with queued mutations and a
//!   cancellable polling stream
//! - **Transport**: pluggable boundary with a paced, retrying HTTP default
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Field descriptors and lookup |
//! | [`field`] | Field references and predicate builders |
//! | [`filter`] | Operators, operands and filter sets |
//! | [`query`] | Screener query data model |
//! | [`compiler`] | Query validation and wire serialization |
//! | [`session`] | Stateful session with single-flight execution |
//! | [`stream`] | Polling stream configuration |
//! | [`transport`] | Transport trait and HTTP implementation |
//! | [`materializer`] | Result tables |
//! | [`presets`] | Named field lists |
//! | [`config`] | Client configuration |
//! | [`error`] | Error types |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ferroscreen_core::{ClientConfig, FieldCatalog, HttpTransport, ScreenerKind, ScreenerSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = FieldCatalog::builtin();
//!     let price = catalog.field("PRICE")?;
//!     let transport = Arc::new(HttpTransport::new(&ClientConfig::from_env()?)?);
//!
//!     let session = ScreenerSession::new(ScreenerKind::Stock, transport);
//!     session
//!         .select([catalog.field("NAME")?, price.clone()])
//!         .filter(price.gt(50));
//!
//!     let table = session.execute().await?;
//!     println!("{} of {} rows", table.len(), table.total_count);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod compiler;
pub mod config;
pub mod domain;
pub mod error;
pub mod field;
pub mod filter;
pub mod http_client;
pub mod materializer;
pub mod presets;
pub mod query;
pub mod rating;
pub mod retry;
pub mod session;
pub mod stream;
pub mod throttling;
pub mod transport;

pub use catalog::{Category, FieldCatalog, FieldDescriptor, SemanticType};
pub use compiler::{compile, compile_with, CompileOptions, CompiledColumn, WireQuery};
pub use config::ClientConfig;
pub use domain::{Interval, KindSet, ScreenerKind, UtcDateTime};
pub use error::{
    CatalogError, CompileError, ConfigError, FieldError, MaterializeError, ParseError,
    ScreenerError, TransportError,
};
pub use field::FieldRef;
pub use filter::{Comparand, FilterSet, Operand, Operator, Predicate, Scalar};
pub use http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use materializer::{materialize, ResultRow, ResultTable};
pub use presets::Preset;
pub use query::{
    Page, ScreenerQuery, Sort, SortDirection, Universe, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
pub use rating::RatingSignal;
pub use retry::{Backoff, RetryConfig};
pub use session::{ScreenerSession, SessionPhase};
pub use stream::{StreamConfig, UpdateCallback, MIN_STREAM_INTERVAL};
pub use throttling::RequestPacer;
pub use transport::{decode_response, HttpTransport, RawResponse, RawRow, ScreenerTransport};
