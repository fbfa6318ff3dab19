// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small constraint builder implementing [`Validator`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::validation::{ValidationError, ValidationResult, Validator};
use crate::value::{Date, FieldValue};

#[derive(Clone, Debug)]
enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Minimum(f64),
    Maximum(f64),
    MinAge { years: i32, today: Date },
    MaxAge { years: i32, today: Date },
    Matches { message: String, test: fn(&str) -> bool },
}

impl Rule {
    fn check(&self, value: &FieldValue) -> Option<String> {
        if let Self::Required = self {
            return (!value.is_filled()).then(|| "is required".into());
        }
        match (self, value) {
            (Self::MinLength(n), FieldValue::Text(s)) if s.chars().count() < *n => {
                Some(format!("must be at least {n} characters"))
            }
            (Self::MaxLength(n), FieldValue::Text(s)) if s.chars().count() > *n => {
                Some(format!("must be at most {n} characters"))
            }
            (Self::Minimum(min), _) => value
                .as_number()
                .filter(|v| v < min)
                .map(|_| format!("must be at least {min}")),
            (Self::Maximum(max), _) => value
                .as_number()
                .filter(|v| v > max)
                .map(|_| format!("must be at most {max}")),
            (Self::MinAge { years, today }, FieldValue::Date(born))
                if born.whole_years_until(*today) < *years =>
            {
                Some(format!("must be at least {years} years old"))
            }
            (Self::MaxAge { years, today }, FieldValue::Date(born))
                if born.whole_years_until(*today) > *years =>
            {
                Some(format!("must be at most {years} years old"))
            }
            (Self::Matches { message, test }, FieldValue::Text(s)) if !test(s) => {
                Some(message.clone())
            }
            _ => None,
        }
    }
}

/// An ordered list of common constraints.
///
/// Every constraint is checked and every failure reported, in the order the
/// constraints were added. Constraints that do not apply to the value's kind
/// (a length limit on a number, say) are skipped, as is everything except
/// [`required`](Self::required) when the value is [`FieldValue::Null`].
///
/// ```rust
/// use understory_form::{FieldValue, Rules, Validator};
///
/// let rules = Rules::new()
///     .min_length(3)
///     .matches("must contain only letters", |s| s.chars().all(char::is_alphabetic));
///
/// let result = rules.validate(&FieldValue::from("J0"));
/// let messages: Vec<_> = result.errors().iter().map(|e| e.message.as_str()).collect();
/// assert_eq!(
///     messages,
///     ["must be at least 3 characters", "must contain only letters"]
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Rules {
    /// Creates an empty rule list. It accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Requires something to be entered: not null and not empty text.
    #[must_use]
    pub fn required(self) -> Self {
        self.with(Rule::Required)
    }

    /// Text must have at least `n` characters.
    #[must_use]
    pub fn min_length(self, n: usize) -> Self {
        self.with(Rule::MinLength(n))
    }

    /// Text must have at most `n` characters.
    #[must_use]
    pub fn max_length(self, n: usize) -> Self {
        self.with(Rule::MaxLength(n))
    }

    /// Numbers must be at least `min`.
    #[must_use]
    pub fn minimum(self, min: f64) -> Self {
        self.with(Rule::Minimum(min))
    }

    /// Numbers must be at most `max`.
    #[must_use]
    pub fn maximum(self, max: f64) -> Self {
        self.with(Rule::Maximum(max))
    }

    /// Text must satisfy `test`, otherwise `message` is reported.
    #[must_use]
    pub fn matches(self, message: impl Into<String>, test: fn(&str) -> bool) -> Self {
        self.with(Rule::Matches {
            message: message.into(),
            test,
        })
    }

    /// A birth date must be at least `years` whole years before `today`.
    #[must_use]
    pub fn min_age(self, years: i32, today: Date) -> Self {
        self.with(Rule::MinAge { years, today })
    }

    /// A birth date must be at most `years` whole years before `today`.
    #[must_use]
    pub fn max_age(self, years: i32, today: Date) -> Self {
        self.with(Rule::MaxAge { years, today })
    }
}

impl Validator for Rules {
    fn validate(&self, value: &FieldValue) -> ValidationResult {
        self.rules
            .iter()
            .filter_map(|r| r.check(value))
            .map(ValidationError::root)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn messages(result: &ValidationResult) -> Vec<&str> {
        result.errors().iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn empty_rules_accept_anything() {
        assert!(Rules::new().validate(&FieldValue::Null).is_valid());
        assert!(Rules::new().validate(&FieldValue::from("")).is_valid());
    }

    #[test]
    fn min_length_rejects_empty_text() {
        let result = Rules::new().min_length(3).validate(&FieldValue::from(""));
        assert_eq!(messages(&result), vec!["must be at least 3 characters"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let rules = Rules::new().min_length(3).max_length(3);
        assert!(rules.validate(&FieldValue::from("äöü")).is_valid());
    }

    #[test]
    fn null_only_fails_required() {
        let rules = Rules::new().min_length(3).required();
        assert_eq!(
            messages(&rules.validate(&FieldValue::Null)),
            vec!["is required"]
        );
        assert!(Rules::new().min_length(3).validate(&FieldValue::Null).is_valid());
    }

    #[test]
    fn numeric_bounds() {
        let rules = Rules::new().minimum(18.0).maximum(99.0);
        assert_eq!(
            messages(&rules.validate(&FieldValue::from(17))),
            vec!["must be at least 18"]
        );
        assert_eq!(
            messages(&rules.validate(&FieldValue::from(99.5))),
            vec!["must be at most 99"]
        );
        assert!(rules.validate(&FieldValue::from(30)).is_valid());
    }

    #[test]
    fn age_limits_use_reference_date() {
        let today = Date::new(2024, 3, 1);
        let rules = Rules::new().min_age(18, today).max_age(65, today);
        assert_eq!(
            messages(&rules.validate(&FieldValue::from(Date::new(2006, 3, 2)))),
            vec!["must be at least 18 years old"]
        );
        assert!(rules.validate(&FieldValue::from(Date::new(2006, 3, 1))).is_valid());
        assert_eq!(
            messages(&rules.validate(&FieldValue::from(Date::new(1950, 1, 1)))),
            vec!["must be at most 65 years old"]
        );
    }

    #[test]
    fn rules_ignore_other_kinds() {
        let rules = Rules::new().min_length(3).min_age(18, Date::new(2024, 1, 1));
        assert!(rules.validate(&FieldValue::from(true)).is_valid());
    }
}
