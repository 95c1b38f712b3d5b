//! Query compiler.
//!
//! [`compile`] validates a [`ScreenerQuery`] against the catalog's type rules
//! and produces the [`WireQuery`] handed to the transport. Validation is fail
//! fast, in this order:
//!
//! 1. every selected, filtered, compared and sorted field is valid for the
//!    query's kind ([`CompileError::FieldKindMismatch`])
//! 2. every predicate's operand fits its operator and field type
//!    ([`CompileError::OperandType`])
//! 3. the page limit is within [`MAX_PAGE_LIMIT`]
//!
//! Interval-capable fields without a bound interval are then normalized to
//! their catalog default. Compilation is pure: equal queries produce
//! byte-identical bodies.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{Interval, ScreenerKind};
use crate::error::CompileError;
use crate::field::FieldRef;
use crate::query::{ScreenerQuery, MAX_PAGE_LIMIT};

/// Options that affect the body but not validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub language: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            language: String::from("en"),
        }
    }
}

/// A selected column as it appears, in order, in the compiled request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledColumn {
    pub key: String,
    pub token: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
}

impl CompiledColumn {
    fn from_field(field: &FieldRef) -> Self {
        Self {
            key: field.key().to_owned(),
            token: field.wire_token(),
            label: field.label(),
            interval: field.effective_interval(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct WireFilter {
    left: String,
    operation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    right: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct WireOptions {
    lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct WireSort {
    #[serde(rename = "sortBy")]
    sort_by: String,
    #[serde(rename = "sortOrder")]
    sort_order: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct WireSymbolQuery {
    types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct WireSymbols {
    query: WireSymbolQuery,
    tickers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct WireBody {
    columns: Vec<String>,
    filter: Vec<WireFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    markets: Vec<String>,
    options: WireOptions,
    range: [usize; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<WireSort>,
    symbols: WireSymbols,
}

/// Serialized request ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct WireQuery {
    kind: ScreenerKind,
    market: String,
    columns: Vec<CompiledColumn>,
    body: WireBody,
}

impl WireQuery {
    pub const fn kind(&self) -> ScreenerKind {
        self.kind
    }

    /// Path segment selecting the scan endpoint.
    pub fn market(&self) -> &str {
        &self.market
    }

    /// Columns in request order; raw row values zip positionally against these.
    pub fn columns(&self) -> &[CompiledColumn] {
        &self.columns
    }

    pub fn endpoint(&self, base_url: &str) -> String {
        format!(
            "{}/{}/scan",
            base_url.trim_end_matches('/'),
            urlencoding::encode(&self.market)
        )
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.body)
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.body)
    }
}

/// Compiles with default options.
pub fn compile(query: &ScreenerQuery) -> Result<WireQuery, CompileError> {
    compile_with(query, &CompileOptions::default())
}

pub fn compile_with(
    query: &ScreenerQuery,
    options: &CompileOptions,
) -> Result<WireQuery, CompileError> {
    check_kinds(query)?;
    for predicate in &query.filters {
        predicate.check_operand()?;
    }
    check_page(query)?;

    let mut columns: Vec<CompiledColumn> = Vec::with_capacity(query.selected_fields.len());
    let mut defaulted = 0usize;
    for field in &query.selected_fields {
        if field.interval().is_none() && field.descriptor().interval_capable() {
            defaulted += 1;
        }
        let column = CompiledColumn::from_field(field);
        if !columns.iter().any(|existing| existing.token == column.token) {
            columns.push(column);
        }
    }

    let mut filter: Vec<WireFilter> = query
        .filters
        .iter()
        .map(|predicate| WireFilter {
            left: predicate.field().wire_token(),
            operation: predicate.operator().wire_name(),
            right: predicate.operand_json(),
        })
        .collect();
    if !query.universe.exchanges.is_empty() {
        filter.push(WireFilter {
            left: String::from("exchange"),
            operation: "in_range",
            right: Some(Value::from(query.universe.exchanges.clone())),
        });
    }

    let body = WireBody {
        columns: columns.iter().map(|column| column.token.clone()).collect(),
        filter,
        markets: query.universe.markets.clone(),
        options: WireOptions {
            lang: options.language.clone(),
        },
        range: [
            query.page.offset,
            query.page.offset.saturating_add(query.page.limit),
        ],
        sort: query.sort.as_ref().map(|sort| WireSort {
            sort_by: sort.field.wire_token(),
            sort_order: sort.direction.as_str(),
        }),
        symbols: WireSymbols {
            query: WireSymbolQuery {
                types: query.universe.symbol_types.clone(),
            },
            tickers: query.universe.tickers.clone(),
        },
    };

    tracing::debug!(
        kind = %query.kind,
        columns = columns.len(),
        filters = body.filter.len(),
        defaulted_intervals = defaulted,
        "compiled screener query"
    );

    Ok(WireQuery {
        kind: query.kind,
        market: market_path(query),
        columns,
        body,
    })
}

fn market_path(query: &ScreenerQuery) -> String {
    match (query.kind, query.universe.markets.as_slice()) {
        (ScreenerKind::Stock, [single]) => single.to_ascii_lowercase(),
        (ScreenerKind::Stock, [_, _, ..]) => String::from("global"),
        (kind, _) => kind.market_path().to_owned(),
    }
}

fn check_kinds(query: &ScreenerQuery) -> Result<(), CompileError> {
    let kind = query.kind;
    let predicate_fields = query
        .filters
        .iter()
        .flat_map(|predicate| std::iter::once(predicate.field()).chain(predicate.operand_field()));
    let sort_field = query.sort.iter().map(|sort| &sort.field);

    for field in query
        .selected_fields
        .iter()
        .chain(predicate_fields)
        .chain(sort_field)
    {
        if !field.descriptor().supports(kind) {
            return Err(CompileError::FieldKindMismatch {
                field_key: field.key().to_owned(),
                kind,
            });
        }
    }
    Ok(())
}

fn check_page(query: &ScreenerQuery) -> Result<(), CompileError> {
    if query.page.limit == 0 {
        return Err(CompileError::EmptyPage);
    }
    if query.page.limit > MAX_PAGE_LIMIT {
        return Err(CompileError::PageLimitExceeded {
            limit: query.page.limit,
            max: MAX_PAGE_LIMIT,
        });
    }
    Ok(())
}
