use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// Field value as seen by the example matcher and the unique index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Null,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
}

impl Value {
    /// True for the "unset" value of each type: null, `0`, `0.0` and `""`.
    ///
    /// Dates have no zero value; only a missing date is empty.
    pub fn is_empty_default(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Integer(i) => *i == 0,
            Self::Decimal(d) => d.is_zero(),
            Self::Text(s) => s.is_empty(),
            Self::Date(_) => false,
        }
    }

    /// Whether a stored value satisfies a probe value.
    ///
    /// Text matches when the lowercased stored value contains the lowercased
    /// probe. Every other type must be equal.
    pub fn matches(&self, probe: &Value) -> bool {
        match (self, probe) {
            (Self::Text(stored), Self::Text(probe)) => {
                stored.to_lowercase().contains(&probe.to_lowercase())
            }
            (stored, probe) => stored == probe,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Decimal(d) => write!(f, "{}", d),
            Self::Text(s) => write!(f, "{}", s),
            Self::Date(d) => write!(f, "{}", d),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}
