use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Time resolution an interval-capable field can be evaluated at.
///
/// Codes follow the remote service: minute counts as bare numbers, then
/// `1D`, `1W` and `1M` (month). Parsing is exact; `1m` is not a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    FourHours,
    OneDay,
    OneWeek,
    OneMonth,
}

impl Interval {
    pub const ALL: [Self; 10] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::TwoHours,
        Self::FourHours,
        Self::OneDay,
        Self::OneWeek,
        Self::OneMonth,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::OneMinute => "1",
            Self::FiveMinutes => "5",
            Self::FifteenMinutes => "15",
            Self::ThirtyMinutes => "30",
            Self::OneHour => "60",
            Self::TwoHours => "120",
            Self::FourHours => "240",
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
        }
    }

    /// Suffix appended to a column token, `None` for the service's implicit
    /// daily resolution.
    pub const fn wire_suffix(self) -> Option<&'static str> {
        match self {
            Self::OneDay => None,
            other => Some(other.code()),
        }
    }

    pub fn parse(code: &str) -> Result<Self, ParseError> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.code() == code.trim())
            .ok_or_else(|| ParseError::Interval {
                value: code.to_owned(),
            })
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Interval {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.code().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_code() {
        for interval in Interval::ALL {
            assert_eq!(Interval::parse(interval.code()).expect("must parse"), interval);
        }
    }

    #[test]
    fn rejects_unknown_and_lowercase_month() {
        for code in ["45", "1h", "1m", "", "1d"] {
            let err = Interval::parse(code).expect_err("must fail");
            assert!(matches!(err, ParseError::Interval { .. }), "{code}");
        }
    }

    #[test]
    fn daily_has_no_wire_suffix() {
        assert_eq!(Interval::OneDay.wire_suffix(), None);
        assert_eq!(Interval::FourHours.wire_suffix(), Some("240"));
    }
}
