//! Filter expression builder.
//!
//! Predicates are plain data produced by [`FieldRef`](crate::FieldRef)
//! builder methods. A [`FilterSet`] keeps them in insertion order and is
//! interpreted as their conjunction.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde_json::Value;

use crate::catalog::SemanticType;
use crate::error::{CompileError, ParseError};
use crate::field::FieldRef;

/// Comparison or membership operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Between,
    NotBetween,
    In,
    NotIn,
    Crosses,
    CrossesAbove,
    CrossesBelow,
    Empty,
    NotEmpty,
    Match,
}

impl Operator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Between => "between",
            Self::NotBetween => "notBetween",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Crosses => "crosses",
            Self::CrossesAbove => "crossesAbove",
            Self::CrossesBelow => "crossesBelow",
            Self::Empty => "empty",
            Self::NotEmpty => "notEmpty",
            Self::Match => "match",
        }
    }

    /// Operation name understood by the remote service.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Eq => "equal",
            Self::Ne => "nequal",
            Self::Gt => "greater",
            Self::Gte => "egreater",
            Self::Lt => "less",
            Self::Lte => "eless",
            Self::Between | Self::In => "in_range",
            Self::NotBetween | Self::NotIn => "not_in_range",
            Self::Crosses => "crosses",
            Self::CrossesAbove => "crosses_above",
            Self::CrossesBelow => "crosses_below",
            Self::Empty => "empty",
            Self::NotEmpty => "nempty",
            Self::Match => "match",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let operator = match value.trim() {
            "eq" | "==" | "=" => Self::Eq,
            "ne" | "!=" => Self::Ne,
            "gt" | ">" => Self::Gt,
            "gte" | ">=" => Self::Gte,
            "lt" | "<" => Self::Lt,
            "lte" | "<=" => Self::Lte,
            "between" => Self::Between,
            "notBetween" | "not_between" => Self::NotBetween,
            "in" | "isin" => Self::In,
            "notIn" | "not_in" => Self::NotIn,
            "crosses" => Self::Crosses,
            "crossesAbove" | "crosses_above" => Self::CrossesAbove,
            "crossesBelow" | "crosses_below" => Self::CrossesBelow,
            "empty" => Self::Empty,
            "notEmpty" | "not_empty" => Self::NotEmpty,
            "match" => Self::Match,
            other => {
                return Err(ParseError::Operator {
                    value: other.to_owned(),
                })
            }
        };
        Ok(operator)
    }
}

/// Literal operand value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Scalar {
    const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    fn is_finite_number(&self) -> bool {
        self.as_f64().is_some_and(f64::is_finite)
    }

    /// Parses CLI-style text: integers, then floats, then booleans, else text.
    pub fn parse_loose(text: &str) -> Self {
        let trimmed = text.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self::Integer(value);
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            return Self::Float(value);
        }
        match trimmed {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => Self::Text(trimmed.to_owned()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Integer(value) => Value::from(*value),
            Self::Float(value) => Value::from(*value),
            Self::Text(value) => Value::from(value.as_str()),
            Self::Bool(value) => Value::from(*value),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }

            impl From<$ty> for Comparand {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

scalar_from! {
    i32 => Integer as i64,
    i64 => Integer as i64,
    u32 => Integer as i64,
    f32 => Float as f64,
    f64 => Float as f64,
    bool => Bool as bool,
    String => Text as String,
    &str => Text as String,
}

/// Right-hand side of a comparison: a literal or another column.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparand {
    Scalar(Scalar),
    Field(FieldRef),
}

impl From<Scalar> for Comparand {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<FieldRef> for Comparand {
    fn from(value: FieldRef) -> Self {
        Self::Field(value)
    }
}

impl From<&FieldRef> for Comparand {
    fn from(value: &FieldRef) -> Self {
        Self::Field(value.clone())
    }
}

/// Operand shape, which depends on the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    None,
    Scalar(Scalar),
    Field(FieldRef),
    Range(Scalar, Scalar),
    Set(Vec<Scalar>),
}

impl From<Comparand> for Operand {
    fn from(value: Comparand) -> Self {
        match value {
            Comparand::Scalar(scalar) => Self::Scalar(scalar),
            Comparand::Field(field) => Self::Field(field),
        }
    }
}

/// One comparison against one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: FieldRef,
    operator: Operator,
    operand: Operand,
}

impl Predicate {
    pub fn new(field: FieldRef, operator: Operator, operand: Operand) -> Self {
        Self {
            field,
            operator,
            operand,
        }
    }

    pub fn field(&self) -> &FieldRef {
        &self.field
    }

    pub const fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Field used as the operand, if any.
    pub fn operand_field(&self) -> Option<&FieldRef> {
        match &self.operand {
            Operand::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Checks the operand shape and type against the field's semantic type.
    pub fn check_operand(&self) -> Result<(), CompileError> {
        let ty = self.field.semantic_type();
        match self.operator {
            Operator::Eq | Operator::Ne => match &self.operand {
                Operand::Scalar(scalar) if scalar_fits(ty, scalar) => Ok(()),
                Operand::Scalar(_) => Err(self.reject(format!("operand does not match {ty} field"))),
                Operand::Field(other) if same_family(ty, other.semantic_type()) => Ok(()),
                Operand::Field(other) => Err(self.reject(format!(
                    "cannot compare {ty} field with {} field '{}'",
                    other.semantic_type(),
                    other.key()
                ))),
                _ => Err(self.reject("expects a single value")),
            },
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => {
                self.require_type(ty.is_numeric(), ty)?;
                self.require_numeric_comparand(|other| other.is_numeric())
            }
            Operator::Crosses | Operator::CrossesAbove | Operator::CrossesBelow => {
                let crossable = |ty: SemanticType| matches!(ty, SemanticType::Number | SemanticType::Percent);
                self.require_type(crossable(ty), ty)?;
                self.require_numeric_comparand(crossable)
            }
            Operator::Between | Operator::NotBetween => {
                self.require_type(ty.is_numeric(), ty)?;
                match &self.operand {
                    Operand::Range(low, high) if low.is_finite_number() && high.is_finite_number() => {
                        match (low.as_f64(), high.as_f64()) {
                            (Some(low), Some(high)) if low <= high => Ok(()),
                            _ => Err(self.reject("range lower bound exceeds upper bound")),
                        }
                    }
                    _ => Err(self.reject("expects a pair of finite numbers")),
                }
            }
            Operator::In | Operator::NotIn => {
                self.require_type(ty.is_textual(), ty)?;
                match &self.operand {
                    Operand::Set(values) if values.is_empty() => Err(self.reject("value set is empty")),
                    Operand::Set(values) if values.iter().all(|v| matches!(v, Scalar::Text(_))) => Ok(()),
                    _ => Err(self.reject("expects a set of text values")),
                }
            }
            Operator::Empty | Operator::NotEmpty => match &self.operand {
                Operand::None => Ok(()),
                _ => Err(self.reject("takes no operand")),
            },
            Operator::Match => {
                self.require_type(ty == SemanticType::Text, ty)?;
                match &self.operand {
                    Operand::Scalar(Scalar::Text(_)) => Ok(()),
                    _ => Err(self.reject("expects a text pattern")),
                }
            }
        }
    }

    /// Wire form of the operand, `None` for operators without one.
    pub fn operand_json(&self) -> Option<Value> {
        match &self.operand {
            Operand::None => None,
            Operand::Scalar(scalar) => Some(scalar.to_json()),
            Operand::Field(field) => Some(Value::from(field.wire_token())),
            Operand::Range(low, high) => Some(Value::Array(vec![low.to_json(), high.to_json()])),
            Operand::Set(values) => Some(Value::Array(values.iter().map(Scalar::to_json).collect())),
        }
    }

    fn require_type(&self, allowed: bool, ty: SemanticType) -> Result<(), CompileError> {
        if allowed {
            Ok(())
        } else {
            Err(self.reject(format!("not supported on {ty} fields")))
        }
    }

    fn require_numeric_comparand(
        &self,
        accepts: impl Fn(SemanticType) -> bool,
    ) -> Result<(), CompileError> {
        match &self.operand {
            Operand::Scalar(scalar) if scalar.is_finite_number() => Ok(()),
            Operand::Field(other) if accepts(other.semantic_type()) => Ok(()),
            Operand::Field(other) => Err(self.reject(format!(
                "operand field '{}' is {}, expected a numeric field",
                other.key(),
                other.semantic_type()
            ))),
            _ => Err(self.reject("expects a finite number or numeric field")),
        }
    }

    fn reject(&self, reason: impl Into<String>) -> CompileError {
        CompileError::OperandType {
            field_key: self.field.key().to_owned(),
            operator: self.operator,
            reason: reason.into(),
        }
    }
}

fn scalar_fits(ty: SemanticType, scalar: &Scalar) -> bool {
    match ty {
        SemanticType::Number | SemanticType::Percent | SemanticType::Timestamp => {
            scalar.is_numeric() && scalar.is_finite_number()
        }
        SemanticType::Text | SemanticType::Enum => matches!(scalar, Scalar::Text(_)),
        SemanticType::Boolean => matches!(scalar, Scalar::Bool(_)),
    }
}

fn same_family(left: SemanticType, right: SemanticType) -> bool {
    (left.is_numeric() && right.is_numeric())
        || (left.is_textual() && right.is_textual())
        || (left == SemanticType::Boolean && right == SemanticType::Boolean)
}

/// Ordered conjunction of predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn clear(&mut self) {
        self.predicates.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.predicates.iter()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl FromIterator<Predicate> for FilterSet {
    fn from_iter<T: IntoIterator<Item = Predicate>>(iter: T) -> Self {
        Self {
            predicates: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}
