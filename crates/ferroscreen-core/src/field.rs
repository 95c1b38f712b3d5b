//! Field references and the comparison builder.
//!
//! A [`FieldRef`] is a cheap handle to one catalog entry, optionally bound to
//! an [`Interval`]. Its comparison methods never evaluate anything: each one
//! returns a [`Predicate`] value that the compiler validates later.
//!
//! ```rust
//! use ferroscreen_core::{FieldCatalog, Operator};
//!
//! let catalog = FieldCatalog::builtin();
//! let price = catalog.field("PRICE").expect("builtin field");
//! let rsi_hourly = catalog
//!     .field("RELATIVE_STRENGTH_INDEX_14")
//!     .expect("builtin field")
//!     .with_interval("60")
//!     .expect("rsi accepts intervals");
//!
//! let cheap = price.lt(50);
//! let oversold = rsi_hourly.crosses_below(30);
//! assert_eq!(cheap.operator(), Operator::Lt);
//! assert_eq!(oversold.field().wire_token(), "RSI|60");
//! ```

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::catalog::{FieldDescriptor, SemanticType};
use crate::domain::Interval;
use crate::error::FieldError;
use crate::filter::{Comparand, Operand, Operator, Predicate, Scalar};

/// Handle to a catalog field, optionally bound to an interval.
///
/// Two references are equal when they point at the same field and carry the
/// same interval; an unbound reference differs from every bound one.
#[derive(Debug, Clone)]
pub struct FieldRef {
    descriptor: Arc<FieldDescriptor>,
    interval: Option<Interval>,
}

impl FieldRef {
    pub fn new(descriptor: Arc<FieldDescriptor>) -> Self {
        Self {
            descriptor,
            interval: None,
        }
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn key(&self) -> &str {
        self.descriptor.key()
    }

    pub fn semantic_type(&self) -> SemanticType {
        self.descriptor.semantic_type()
    }

    /// Interval explicitly bound by the caller.
    pub const fn interval(&self) -> Option<Interval> {
        self.interval
    }

    /// Returns a copy bound to the interval spelled by `code`.
    pub fn with_interval(&self, code: &str) -> Result<Self, FieldError> {
        let interval = Interval::parse(code).map_err(|_| FieldError::InvalidInterval {
            key: self.key().to_owned(),
            value: code.to_owned(),
        })?;
        self.at(interval)
    }

    /// Returns a copy bound to `interval`.
    pub fn at(&self, interval: Interval) -> Result<Self, FieldError> {
        if !self.descriptor.interval_capable() {
            return Err(FieldError::IntervalNotSupported {
                key: self.key().to_owned(),
                interval,
            });
        }
        Ok(Self {
            descriptor: Arc::clone(&self.descriptor),
            interval: Some(interval),
        })
    }

    /// Bound interval, falling back to the catalog default.
    pub fn effective_interval(&self) -> Option<Interval> {
        self.interval.or(self.descriptor.default_interval())
    }

    /// Copy with the catalog default applied when nothing was bound.
    pub fn normalized(&self) -> Self {
        Self {
            descriptor: Arc::clone(&self.descriptor),
            interval: self.effective_interval(),
        }
    }

    /// Column token sent to the service, `column` or `column|interval`.
    pub fn wire_token(&self) -> String {
        match self.effective_interval().and_then(Interval::wire_suffix) {
            Some(suffix) => format!("{}|{suffix}", self.descriptor.column()),
            None => self.descriptor.column().to_owned(),
        }
    }

    /// Human-readable column label, suffixed with the interval when not daily.
    pub fn label(&self) -> String {
        match self.effective_interval().and_then(Interval::wire_suffix) {
            Some(suffix) => format!("{} ({suffix})", self.descriptor.label()),
            None => self.descriptor.label().to_owned(),
        }
    }

    pub fn equals(&self, value: impl Into<Comparand>) -> Predicate {
        self.compare(Operator::Eq, value.into())
    }

    pub fn not_equals(&self, value: impl Into<Comparand>) -> Predicate {
        self.compare(Operator::Ne, value.into())
    }

    pub fn gt(&self, value: impl Into<Comparand>) -> Predicate {
        self.compare(Operator::Gt, value.into())
    }

    pub fn gte(&self, value: impl Into<Comparand>) -> Predicate {
        self.compare(Operator::Gte, value.into())
    }

    pub fn lt(&self, value: impl Into<Comparand>) -> Predicate {
        self.compare(Operator::Lt, value.into())
    }

    pub fn lte(&self, value: impl Into<Comparand>) -> Predicate {
        self.compare(Operator::Lte, value.into())
    }

    pub fn between(&self, low: impl Into<Scalar>, high: impl Into<Scalar>) -> Predicate {
        Predicate::new(
            self.clone(),
            Operator::Between,
            Operand::Range(low.into(), high.into()),
        )
    }

    pub fn not_between(&self, low: impl Into<Scalar>, high: impl Into<Scalar>) -> Predicate {
        Predicate::new(
            self.clone(),
            Operator::NotBetween,
            Operand::Range(low.into(), high.into()),
        )
    }

    pub fn isin<I, V>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        Predicate::new(
            self.clone(),
            Operator::In,
            Operand::Set(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn not_in<I, V>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        Predicate::new(
            self.clone(),
            Operator::NotIn,
            Operand::Set(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn crosses(&self, value: impl Into<Comparand>) -> Predicate {
        self.compare(Operator::Crosses, value.into())
    }

    pub fn crosses_above(&self, value: impl Into<Comparand>) -> Predicate {
        self.compare(Operator::CrossesAbove, value.into())
    }

    pub fn crosses_below(&self, value: impl Into<Comparand>) -> Predicate {
        self.compare(Operator::CrossesBelow, value.into())
    }

    pub fn empty(&self) -> Predicate {
        Predicate::new(self.clone(), Operator::Empty, Operand::None)
    }

    pub fn not_empty(&self) -> Predicate {
        Predicate::new(self.clone(), Operator::NotEmpty, Operand::None)
    }

    /// Substring match on a text field.
    pub fn matches(&self, text: impl Into<String>) -> Predicate {
        Predicate::new(
            self.clone(),
            Operator::Match,
            Operand::Scalar(Scalar::Text(text.into())),
        )
    }

    fn compare(&self, operator: Operator, value: Comparand) -> Predicate {
        Predicate::new(self.clone(), operator, value.into())
    }
}

impl PartialEq for FieldRef {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.key() == other.descriptor.key() && self.interval == other.interval
    }
}

impl Eq for FieldRef {}

impl Hash for FieldRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.key().hash(state);
        self.interval.hash(state);
    }
}

impl Display for FieldRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.interval {
            Some(interval) => write!(f, "{}@{interval}", self.key()),
            None => f.write_str(self.key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::domain::KindSet;

    fn rsi() -> FieldRef {
        FieldRef::new(Arc::new(
            FieldDescriptor::new(
                "RSI",
                "RSI",
                "Relative Strength Index (14)",
                SemanticType::Number,
                Category::Oscillators,
                KindSet::MARKETS,
            )
            .with_default_interval(Interval::OneDay),
        ))
    }

    fn name() -> FieldRef {
        FieldRef::new(Arc::new(FieldDescriptor::new(
            "NAME",
            "name",
            "Name",
            SemanticType::Text,
            Category::Descriptive,
            KindSet::ALL,
        )))
    }

    #[test]
    fn with_interval_returns_new_reference() {
        let base = rsi();
        let hourly = base.with_interval("60").expect("rsi accepts intervals");
        assert_eq!(base.interval(), None);
        assert_eq!(hourly.interval(), Some(Interval::OneHour));
        assert_ne!(base, hourly);
    }

    #[test]
    fn unbound_differs_from_explicit_default() {
        let base = rsi();
        let daily = base.at(Interval::OneDay).expect("rsi accepts intervals");
        assert_ne!(base, daily);
        assert_eq!(base.wire_token(), daily.wire_token());
    }

    #[test]
    fn static_field_rejects_interval() {
        let err = name().with_interval("60").expect_err("name is static");
        assert!(matches!(err, FieldError::IntervalNotSupported { ref key, .. } if key == "NAME"));
    }

    #[test]
    fn invalid_code_is_reported_before_capability() {
        let err = name().with_interval("7").expect_err("unknown code");
        assert!(matches!(err, FieldError::InvalidInterval { ref key, .. } if key == "NAME"));
    }

    #[test]
    fn tokens_and_labels_carry_interval() {
        let four_hour = rsi().with_interval("240").expect("valid");
        assert_eq!(four_hour.wire_token(), "RSI|240");
        assert_eq!(four_hour.label(), "Relative Strength Index (14) (240)");
        assert_eq!(four_hour.to_string(), "RSI@240");
    }

    #[test]
    fn builders_do_not_evaluate() {
        let predicate = rsi().between(30, 70);
        assert_eq!(predicate.operator(), Operator::Between);
        assert_eq!(
            predicate.operand(),
            &Operand::Range(Scalar::Integer(30), Scalar::Integer(70))
        );
    }
}
