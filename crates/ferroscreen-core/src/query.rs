//! Screener query data model.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::ScreenerKind;
use crate::error::ParseError;
use crate::field::FieldRef;
use crate::filter::{FilterSet, Predicate};

/// Rows requested when the caller does not paginate.
pub const DEFAULT_PAGE_LIMIT: usize = 150;
/// Largest page the service accepts in one request.
pub const MAX_PAGE_LIMIT: usize = 5_000;

/// Markets, exchanges, symbol types and explicit tickers a query is scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    #[serde(default)]
    pub markets: Vec<String>,
    #[serde(default)]
    pub exchanges: Vec<String>,
    #[serde(default)]
    pub symbol_types: Vec<String>,
    #[serde(default)]
    pub tickers: Vec<String>,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markets<I, S>(mut self, markets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markets = markets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exchanges<I, S>(mut self, exchanges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exchanges = exchanges.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_symbol_types<I, S>(mut self, symbol_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbol_types = symbol_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = tickers.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ParseError::SortDirection {
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: FieldRef,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: FieldRef, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}

/// Everything needed to compile one request.
///
/// Building a query never fails; kind, type and paging rules are enforced by
/// [`compile`](crate::compile) before anything reaches the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerQuery {
    pub kind: ScreenerKind,
    pub selected_fields: Vec<FieldRef>,
    pub filters: FilterSet,
    pub universe: Universe,
    pub sort: Option<Sort>,
    pub page: Page,
}

impl ScreenerQuery {
    pub fn new(kind: ScreenerKind) -> Self {
        Self {
            kind,
            selected_fields: Vec::new(),
            filters: FilterSet::new(),
            universe: Universe::default(),
            sort: None,
            page: Page::default(),
        }
    }

    /// Appends fields, skipping references already selected.
    pub fn select<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = FieldRef>,
    {
        self.add_fields(fields);
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    pub fn universe(mut self, universe: Universe) -> Self {
        self.universe = universe;
        self
    }

    pub fn sort_by(mut self, field: FieldRef, direction: SortDirection) -> Self {
        self.sort = Some(Sort::new(field, direction));
        self
    }

    pub fn paginate(mut self, offset: usize, limit: usize) -> Self {
        self.page = Page::new(offset, limit);
        self
    }

    pub(crate) fn add_fields<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = FieldRef>,
    {
        for field in fields {
            if !self.selected_fields.contains(&field) {
                self.selected_fields.push(field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldCatalog;

    #[test]
    fn select_keeps_order_and_skips_duplicates() {
        let catalog = FieldCatalog::builtin();
        let name = catalog.field("NAME").expect("builtin");
        let price = catalog.field("PRICE").expect("builtin");
        let query = ScreenerQuery::new(ScreenerKind::Stock)
            .select([name.clone(), price.clone()])
            .select([name.clone()]);
        assert_eq!(query.selected_fields, vec![name, price]);
    }

    #[test]
    fn differently_bound_references_are_both_kept() {
        let rsi = FieldCatalog::builtin()
            .field("RELATIVE_STRENGTH_INDEX_14")
            .expect("builtin");
        let query = ScreenerQuery::new(ScreenerKind::Crypto).select([
            rsi.with_interval("60").expect("valid"),
            rsi.with_interval("240").expect("valid"),
        ]);
        assert_eq!(query.selected_fields.len(), 2);
    }

    #[test]
    fn default_page_is_first_150_rows() {
        assert_eq!(Page::default(), Page::new(0, DEFAULT_PAGE_LIMIT));
    }
}
