// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field values and the kinds a field can be declared with.
//!
//! Every field holds a [`FieldValue`], a closed set of the value shapes forms
//! deal with. A field is declared with a [`FieldKind`] and only accepts values
//! of that kind (or [`FieldValue::Null`], which stands for "nothing entered").

use alloc::string::String;
use core::fmt;

/// The kind of value a field holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Signed integer.
    Integer,
    /// Floating point number.
    Float,
    /// Boolean toggle.
    Bool,
    /// Calendar date.
    Date,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Date => "date",
        })
    }
}

/// A plain calendar date.
///
/// No calendar arithmetic beyond ordering and whole-year differences is
/// provided; the date is whatever the host's date picker produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    /// Year, e.g. `1990`.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: u8,
    /// Day of month, `1..=31`.
    pub day: u8,
}

impl Date {
    /// Creates a date.
    #[must_use]
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Number of complete years from `self` to `later`.
    ///
    /// Negative when `later` precedes `self`.
    ///
    /// ```rust
    /// use understory_form::Date;
    ///
    /// let born = Date::new(2000, 6, 15);
    /// assert_eq!(born.whole_years_until(Date::new(2020, 6, 14)), 19);
    /// assert_eq!(born.whole_years_until(Date::new(2020, 6, 15)), 20);
    /// ```
    #[must_use]
    pub fn whole_years_until(self, later: Self) -> i32 {
        let years = later.year - self.year;
        if (later.month, later.day) < (self.month, self.day) {
            years - 1
        } else {
            years
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// The value currently held by a field.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FieldValue {
    /// Nothing entered.
    #[default]
    Null,
    /// Free text.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean toggle.
    Bool(bool),
    /// Calendar date.
    Date(Date),
}

impl FieldValue {
    /// Returns the kind of this value, or `None` for [`FieldValue::Null`].
    #[must_use]
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Null => None,
            Self::Text(_) => Some(FieldKind::Text),
            Self::Integer(_) => Some(FieldKind::Integer),
            Self::Float(_) => Some(FieldKind::Float),
            Self::Bool(_) => Some(FieldKind::Bool),
            Self::Date(_) => Some(FieldKind::Date),
        }
    }

    /// Returns `true` if this value can be stored in a field of `kind`.
    ///
    /// [`FieldValue::Null`] fits every kind.
    #[must_use]
    pub fn fits(&self, kind: FieldKind) -> bool {
        self.kind().is_none_or(|k| k == kind)
    }

    /// Returns `true` if something has been entered.
    ///
    /// `Null` and empty text count as nothing entered.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Text(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Returns `true` for [`FieldValue::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the number as `f64` for integer and float values.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the date, if this is a date value.
    #[must_use]
    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Date> for FieldValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
