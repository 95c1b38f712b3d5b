//! # Field Catalog
//!
//! Immutable registry of every column the screener service understands.
//!
//! The built-in catalog is generated once per process from the static
//! definition table in `definitions` and then shared read-only, so any number
//! of sessions can look fields up concurrently without locking.
//!
//! ```rust
//! use ferroscreen_core::{Category, FieldCatalog};
//!
//! let catalog = FieldCatalog::builtin();
//! let rsi = catalog.lookup("RELATIVE_STRENGTH_INDEX_14").expect("builtin field");
//! assert_eq!(rsi.column(), "RSI");
//! assert!(rsi.interval_capable());
//!
//! let pivots = catalog.by_category(Category::Pivots);
//! assert!(!pivots.is_empty());
//! ```

mod definitions;

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::domain::{Interval, KindSet, ScreenerKind};
use crate::error::{CatalogError, ParseError};
use crate::field::FieldRef;

/// Value type of a field, which decides the operators it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Number,
    Percent,
    #[serde(rename = "string")]
    Text,
    Enum,
    Boolean,
    Timestamp,
}

impl SemanticType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Percent => "percent",
            Self::Text => "string",
            Self::Enum => "enum",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
        }
    }

    /// Types compared as numbers on the wire.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Percent | Self::Timestamp)
    }

    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Text | Self::Enum)
    }
}

impl Display for SemanticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grouping tag used by search and presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Descriptive,
    Price,
    Volume,
    Performance,
    Valuation,
    Dividends,
    Profitability,
    BalanceSheet,
    Income,
    Ratings,
    Oscillators,
    MovingAverages,
    BandsChannels,
    Pivots,
    Volatility,
    Ichimoku,
    Patterns,
    Forex,
    Crypto,
    Bond,
    Futures,
}

impl Category {
    pub const ALL: [Self; 21] = [
        Self::Descriptive,
        Self::Price,
        Self::Volume,
        Self::Performance,
        Self::Valuation,
        Self::Dividends,
        Self::Profitability,
        Self::BalanceSheet,
        Self::Income,
        Self::Ratings,
        Self::Oscillators,
        Self::MovingAverages,
        Self::BandsChannels,
        Self::Pivots,
        Self::Volatility,
        Self::Ichimoku,
        Self::Patterns,
        Self::Forex,
        Self::Crypto,
        Self::Bond,
        Self::Futures,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descriptive => "descriptive",
            Self::Price => "price",
            Self::Volume => "volume",
            Self::Performance => "performance",
            Self::Valuation => "valuation",
            Self::Dividends => "dividends",
            Self::Profitability => "profitability",
            Self::BalanceSheet => "balance_sheet",
            Self::Income => "income",
            Self::Ratings => "ratings",
            Self::Oscillators => "oscillators",
            Self::MovingAverages => "moving_averages",
            Self::BandsChannels => "bands_channels",
            Self::Pivots => "pivots",
            Self::Volatility => "volatility",
            Self::Ichimoku => "ichimoku",
            Self::Patterns => "patterns",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Bond => "bond",
            Self::Futures => "futures",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseError::Category {
                value: value.to_owned(),
            })
    }
}

/// Immutable description of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    key: String,
    column: String,
    label: String,
    semantic_type: SemanticType,
    category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_interval: Option<Interval>,
    allowed_kinds: KindSet,
}

impl FieldDescriptor {
    pub fn new(
        key: impl Into<String>,
        column: impl Into<String>,
        label: impl Into<String>,
        semantic_type: SemanticType,
        category: Category,
        allowed_kinds: KindSet,
    ) -> Self {
        Self {
            key: key.into(),
            column: column.into(),
            label: label.into(),
            semantic_type,
            category,
            default_interval: None,
            allowed_kinds,
        }
    }

    /// Marks the field interval-capable with the given default resolution.
    pub fn with_default_interval(mut self, interval: Interval) -> Self {
        self.default_interval = Some(interval);
        self
    }

    /// Stable symbolic identifier, e.g. `RELATIVE_STRENGTH_INDEX_14`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Column identifier understood by the remote service, e.g. `RSI`.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    pub const fn category(&self) -> Category {
        self.category
    }

    pub const fn interval_capable(&self) -> bool {
        self.default_interval.is_some()
    }

    pub const fn default_interval(&self) -> Option<Interval> {
        self.default_interval
    }

    pub const fn allowed_kinds(&self) -> KindSet {
        self.allowed_kinds
    }

    pub const fn supports(&self, kind: ScreenerKind) -> bool {
        self.allowed_kinds.contains(kind)
    }

    fn matches(&self, needle_lower: &str) -> bool {
        self.key.to_ascii_lowercase().contains(needle_lower)
            || self.label.to_lowercase().contains(needle_lower)
    }
}

/// Read-only registry of field descriptors, ordered by key.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    fields: Vec<Arc<FieldDescriptor>>,
    index: HashMap<String, usize>,
}

static BUILTIN: OnceLock<FieldCatalog> = OnceLock::new();

impl FieldCatalog {
    /// Process-wide catalog built from the static definition table.
    pub fn builtin() -> &'static FieldCatalog {
        BUILTIN.get_or_init(|| {
            let catalog = Self::from_descriptors(definitions::builtin_descriptors())
                .expect("builtin field definitions have unique keys");
            tracing::debug!(fields = catalog.len(), "built field catalog");
            catalog
        })
    }

    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = FieldDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut fields: Vec<Arc<FieldDescriptor>> =
            descriptors.into_iter().map(Arc::new).collect();
        fields.sort_by(|left, right| left.key.cmp(&right.key));

        let mut index = HashMap::with_capacity(fields.len());
        for (position, descriptor) in fields.iter().enumerate() {
            if index.insert(descriptor.key.clone(), position).is_some() {
                return Err(CatalogError::DuplicateField {
                    key: descriptor.key.clone(),
                });
            }
        }

        Ok(Self { fields, index })
    }

    pub fn lookup(&self, key: &str) -> Result<&Arc<FieldDescriptor>, CatalogError> {
        self.index
            .get(key)
            .map(|position| &self.fields[*position])
            .ok_or_else(|| CatalogError::UnknownField {
                key: key.to_owned(),
                suggestion: self.suggest(key),
            })
    }

    /// Looks a field up and wraps it in an unbound [`FieldRef`].
    pub fn field(&self, key: &str) -> Result<FieldRef, CatalogError> {
        self.lookup(key).map(|descriptor| FieldRef::new(Arc::clone(descriptor)))
    }

    /// Case-insensitive substring match against key and label, ordered by key.
    /// Blank text matches every field.
    pub fn search(&self, text: &str) -> Vec<&Arc<FieldDescriptor>> {
        let needle = text.trim().to_lowercase();
        self.fields
            .iter()
            .filter(|descriptor| descriptor.matches(&needle))
            .collect()
    }

    pub fn by_category(&self, category: Category) -> Vec<&Arc<FieldDescriptor>> {
        self.fields
            .iter()
            .filter(|descriptor| descriptor.category == category)
            .collect()
    }

    pub fn for_kind(&self, kind: ScreenerKind) -> impl Iterator<Item = &Arc<FieldDescriptor>> {
        self.fields
            .iter()
            .filter(move |descriptor| descriptor.supports(kind))
    }

    pub fn all(&self) -> &[Arc<FieldDescriptor>] {
        &self.fields
    }

    /// Default interval declared for a field, `None` when it is not interval-capable.
    pub fn default_interval(&self, key: &str) -> Result<Option<Interval>, CatalogError> {
        self.lookup(key).map(|descriptor| descriptor.default_interval)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn suggest(&self, key: &str) -> Option<String> {
        let upper = key.trim().to_ascii_uppercase();
        if upper.is_empty() {
            return None;
        }
        if self.index.contains_key(&upper) {
            return Some(upper);
        }
        let by_column = self
            .fields
            .iter()
            .find(|descriptor| descriptor.column.eq_ignore_ascii_case(key.trim()));
        if let Some(descriptor) = by_column {
            return Some(descriptor.key.clone());
        }
        self.search(key)
            .first()
            .map(|descriptor| descriptor.key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldCatalog {
        FieldCatalog::from_descriptors([
            FieldDescriptor::new(
                "PRICE",
                "close",
                "Price",
                SemanticType::Number,
                Category::Price,
                KindSet::ALL,
            )
            .with_default_interval(Interval::OneDay),
            FieldDescriptor::new(
                "NAME",
                "name",
                "Name",
                SemanticType::Text,
                Category::Descriptive,
                KindSet::ALL,
            ),
        ])
        .expect("unique keys")
    }

    #[test]
    fn orders_fields_by_key() {
        let catalog = sample();
        let keys: Vec<&str> = catalog.all().iter().map(|d| d.key()).collect();
        assert_eq!(keys, vec!["NAME", "PRICE"]);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let descriptor = FieldDescriptor::new(
            "NAME",
            "name",
            "Name",
            SemanticType::Text,
            Category::Descriptive,
            KindSet::ALL,
        );
        let err = FieldCatalog::from_descriptors([descriptor.clone(), descriptor])
            .expect_err("duplicate must fail");
        assert_eq!(
            err,
            CatalogError::DuplicateField {
                key: String::from("NAME")
            }
        );
    }

    #[test]
    fn unknown_key_suggests_case_corrected_key() {
        let err = sample().lookup("price").expect_err("lookup is exact");
        assert_eq!(
            err,
            CatalogError::UnknownField {
                key: String::from("price"),
                suggestion: Some(String::from("PRICE")),
            }
        );
    }

    #[test]
    fn unknown_key_suggests_by_column() {
        let err = sample().lookup("close").expect_err("lookup is by key");
        assert!(matches!(
            err,
            CatalogError::UnknownField { suggestion: Some(ref key), .. } if key == "PRICE"
        ));
    }

    #[test]
    fn blank_search_lists_every_field() {
        let catalog = sample();
        assert_eq!(catalog.search("").len(), 2);
        assert_eq!(catalog.search("   ").len(), 2);
    }

    #[test]
    fn blank_key_gets_no_suggestion() {
        let err = sample().lookup("").expect_err("blank key");
        assert_eq!(
            err,
            CatalogError::UnknownField {
                key: String::new(),
                suggestion: None,
            }
        );
    }

    #[test]
    fn parses_category_tags() {
        assert_eq!(
            Category::from_str("moving-averages").expect("must parse"),
            Category::MovingAverages
        );
        assert!(Category::from_str("astrology").is_err());
    }
}
