use chrono::{DateTime, NaiveDate};

/// A raw or stored option value.
///
/// `Float` only ever appears as raw input; declared options coerce it to one
/// of the other kinds.
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionValue {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<OptionValue>),
    Date(NaiveDate),
}

impl OptionValue {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Truthiness: `0`, `"0"`, `""`, `"false"`, `"no"`, `"off"` and empty
    /// arrays are false. Dates and unparsable strings do not convert.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(i) => Some(*i != 0),
            Self::Float(f) => Some(*f != 0.0),
            Self::Str(s) => {
                let lowered = s.trim().to_ascii_lowercase();
                match lowered.as_str() {
                    "" | "0" | "false" | "no" | "off" => Some(false),
                    "1" | "true" | "yes" | "on" => Some(true),
                    other => other.parse::<f64>().ok().map(|f| f != 0.0),
                }
            }
            Self::Array(items) => Some(!items.is_empty()),
            Self::Date(_) | Self::None => None,
        }
    }

    pub fn to_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Float(f) => integral(*f),
            Self::Str(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
            }
            Self::Array(_) | Self::Date(_) | Self::None => None,
        }
    }

    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Self::Array(_) | Self::None => None,
        }
    }

    /// A scalar becomes a one-element array.
    pub fn to_array(&self) -> Option<Vec<OptionValue>> {
        match self {
            Self::Array(items) => Some(items.clone()),
            Self::None => None,
            scalar => Some(vec![scalar.clone()]),
        }
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Str(s) => {
                let trimmed = s.trim();
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .or_else(|| {
                        DateTime::parse_from_rfc3339(trimmed)
                            .ok()
                            .map(|dt| dt.date_naive())
                    })
            }
            _ => None,
        }
    }
}

fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<NaiveDate> for OptionValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::None)
    }
}
